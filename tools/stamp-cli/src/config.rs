//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stamp_commerce::customizer::{CartAssembly, SizeTablePadMatcher};
use stamp_commerce::PricingRules;
use stamp_data::{AssetHostConfig, StorefrontConfig};

/// CLI configuration file (`stamp.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Storefront API configuration. Credentials normally come from the
    /// environment.
    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Design asset host configuration.
    #[serde(default)]
    pub assets: AssetHostConfig,

    /// Shipping, tax and add-on pricing.
    #[serde(default)]
    pub pricing: PricingRules,

    /// Local cart configuration.
    #[serde(default)]
    pub cart: CartConfig,

    /// Catalog presentation.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    /// Parse config content, choosing the format by file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Local cart configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartConfig {
    /// Cart file, relative to the working directory.
    #[serde(default = "default_cart_path")]
    pub path: String,

    /// How finished customizations are laid out in the cart.
    #[serde(default)]
    pub assembly: CartAssembly,
}

fn default_cart_path() -> String {
    ".stamp/cart.json".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            path: default_cart_path(),
            assembly: CartAssembly::default(),
        }
    }
}

/// Catalog presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Product opened when no slug is given.
    #[serde(default = "default_featured_slug")]
    pub featured_slug: String,

    /// Explicit size-to-pad pairs. When empty, pads are paired with
    /// sizes by price rank.
    #[serde(default)]
    pub pad_pairs: Vec<PadPair>,
}

fn default_featured_slug() -> String {
    "big-custom-stamps".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_slug: default_featured_slug(),
            pad_pairs: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Table matcher built from `pad_pairs`, if any are configured.
    pub fn pad_matcher(&self) -> Option<SizeTablePadMatcher> {
        if self.pad_pairs.is_empty() {
            return None;
        }
        Some(
            self.pad_pairs
                .iter()
                .fold(SizeTablePadMatcher::new(), |matcher, pair| {
                    matcher.with_pair(&pair.size, pair.pad.clone())
                }),
        )
    }
}

/// A stamp size label and the pad name that fits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PadPair {
    pub size: String,
    pub pad: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
