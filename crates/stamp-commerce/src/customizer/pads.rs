//! Matching stamp pads to the selected stamp size.
//!
//! The storefront pairs pads with sizes by price rank: the cheapest size gets
//! the cheapest pad, and so on. That pairing is kept behind [`PadMatcher`] so
//! an explicit compatibility table can replace it.

use crate::catalog::{SizeOption, StampPadOption};
use std::collections::HashMap;
use std::fmt;

/// Pads offered for a size.
#[derive(Debug, Clone, PartialEq)]
pub enum PadMatch {
    /// Exactly one pad fits the selected size.
    Matched(StampPadOption),
    /// No specific match; every pad is offered, cheapest first.
    All(Vec<StampPadOption>),
}

impl PadMatch {
    pub fn into_options(self) -> Vec<StampPadOption> {
        match self {
            PadMatch::Matched(pad) => vec![pad],
            PadMatch::All(pads) => pads,
        }
    }
}

/// Strategy deciding which pads are offered for the selected size.
pub trait PadMatcher: Send + Sync + fmt::Debug {
    fn match_pads(
        &self,
        sizes: &[SizeOption],
        pads: &[StampPadOption],
        selected_size: Option<usize>,
    ) -> PadMatch;
}

fn sorted_by_price(pads: &[StampPadOption]) -> Vec<StampPadOption> {
    let mut pads = pads.to_vec();
    pads.sort_by_key(|pad| pad.price);
    pads
}

fn all_by_price(pads: &[StampPadOption]) -> PadMatch {
    PadMatch::All(sorted_by_price(pads))
}

/// Pairs sizes and pads index-to-index after sorting both by price.
///
/// Falls back to every pad when there is no selection, fewer than two
/// sizes or pads, the selected size is an "all sizes" bundle, or the rank
/// has no pad.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalPadMatcher;

impl PadMatcher for PositionalPadMatcher {
    fn match_pads(
        &self,
        sizes: &[SizeOption],
        pads: &[StampPadOption],
        selected_size: Option<usize>,
    ) -> PadMatch {
        let Some(selected) = selected_size.and_then(|i| sizes.get(i)) else {
            return all_by_price(pads);
        };
        if sizes.len() < 2 || pads.len() < 2 || selected.is_all_sizes_bundle() {
            return all_by_price(pads);
        }

        let mut ranked: Vec<(usize, &SizeOption)> = sizes.iter().enumerate().collect();
        ranked.sort_by_key(|(_, size)| size.price);
        let rank = ranked
            .iter()
            .position(|(index, _)| Some(*index) == selected_size);

        let sorted_pads = sorted_by_price(pads);
        match rank.and_then(|r| sorted_pads.get(r)) {
            Some(pad) => PadMatch::Matched(pad.clone()),
            None => PadMatch::All(sorted_pads),
        }
    }
}

/// Explicit size-label to pad-name table.
///
/// Sizes missing from the table offer every pad.
#[derive(Debug, Clone, Default)]
pub struct SizeTablePadMatcher {
    by_size: HashMap<String, String>,
}

impl SizeTablePadMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the pad (by name) that fits a size (by label).
    pub fn with_pair(mut self, size_label: impl AsRef<str>, pad_name: impl Into<String>) -> Self {
        self.by_size
            .insert(size_label.as_ref().to_lowercase(), pad_name.into());
        self
    }
}

impl PadMatcher for SizeTablePadMatcher {
    fn match_pads(
        &self,
        sizes: &[SizeOption],
        pads: &[StampPadOption],
        selected_size: Option<usize>,
    ) -> PadMatch {
        selected_size
            .and_then(|i| sizes.get(i))
            .and_then(|size| self.by_size.get(&size.label.to_lowercase()))
            .and_then(|name| pads.iter().find(|pad| &pad.name == name))
            .map(|pad| PadMatch::Matched(pad.clone()))
            .unwrap_or_else(|| all_by_price(pads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sizes() -> Vec<SizeOption> {
        // Deliberately not in price order.
        vec![
            SizeOption::new("6x6 inch", Money::usd(7999)),
            SizeOption::new("4x4 inch", Money::usd(5999)),
            SizeOption::new("8x8 inch", Money::usd(9999)),
        ]
    }

    fn pads() -> Vec<StampPadOption> {
        vec![
            StampPadOption::new("Large Pad", Money::usd(1299)),
            StampPadOption::new("Small Pad", Money::usd(799)),
            StampPadOption::new("Medium Pad", Money::usd(999)),
        ]
    }

    fn matched_name(m: PadMatch) -> Option<String> {
        match m {
            PadMatch::Matched(pad) => Some(pad.name),
            PadMatch::All(_) => None,
        }
    }

    #[test]
    fn test_positional_pairs_by_price_rank() {
        let m = PositionalPadMatcher;
        assert_eq!(matched_name(m.match_pads(&sizes(), &pads(), Some(1))).as_deref(), Some("Small Pad"));
        assert_eq!(matched_name(m.match_pads(&sizes(), &pads(), Some(0))).as_deref(), Some("Medium Pad"));
        assert_eq!(matched_name(m.match_pads(&sizes(), &pads(), Some(2))).as_deref(), Some("Large Pad"));
    }

    #[test]
    fn test_positional_without_selection_offers_all_sorted() {
        let options = PositionalPadMatcher.match_pads(&sizes(), &pads(), None).into_options();
        let prices: Vec<i64> = options.iter().map(|p| p.price.amount_cents).collect();
        assert_eq!(prices, vec![799, 999, 1299]);
    }

    #[test]
    fn test_positional_all_sizes_bundle_offers_all() {
        let mut sizes = sizes();
        sizes.push(SizeOption::new("All Sizes Bundle", Money::usd(19_999)));
        let m = PositionalPadMatcher.match_pads(&sizes, &pads(), Some(3));
        assert_eq!(m.into_options().len(), 3);
    }

    #[test]
    fn test_positional_rank_out_of_range_offers_all() {
        let two_pads = vec![
            StampPadOption::new("Small Pad", Money::usd(799)),
            StampPadOption::new("Medium Pad", Money::usd(999)),
        ];
        let m = PositionalPadMatcher.match_pads(&sizes(), &two_pads, Some(2));
        assert!(matches!(m, PadMatch::All(ref pads) if pads.len() == 2));
    }

    #[test]
    fn test_positional_single_pad_offers_all() {
        let one_pad = vec![StampPadOption::new("Only Pad", Money::usd(899))];
        let m = PositionalPadMatcher.match_pads(&sizes(), &one_pad, Some(0));
        assert!(matches!(m, PadMatch::All(_)));
    }

    #[test]
    fn test_table_matcher() {
        let m = SizeTablePadMatcher::new().with_pair("8x8 inch", "Large Pad");
        assert_eq!(matched_name(m.match_pads(&sizes(), &pads(), Some(2))).as_deref(), Some("Large Pad"));
        assert!(matches!(m.match_pads(&sizes(), &pads(), Some(0)), PadMatch::All(_)));
    }
}
