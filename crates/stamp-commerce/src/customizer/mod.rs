//! Customizer module.
//!
//! Contains the step sequencing, builder selections, pad matching, design
//! handling, and the session state machine that turns selections into
//! checkout or cart lines.

mod assembly;
mod design;
mod pads;
mod review;
mod selections;
mod session;
mod step;

pub use assembly::CartAssembly;
pub use design::{AssetUploader, DesignFile, ACCEPTED_DESIGN_EXTENSIONS};
pub use pads::{PadMatch, PadMatcher, PositionalPadMatcher, SizeTablePadMatcher};
pub use review::{PriceBreakdown, ReviewRow};
pub use selections::{BuilderSelections, SelectedSize};
pub use session::Customizer;
pub use step::{steps_for, Step};
