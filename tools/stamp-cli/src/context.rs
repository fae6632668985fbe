//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use stamp_commerce::cart::Cart;
use stamp_commerce::catalog::{Catalog, Product};
use stamp_commerce::customizer::Customizer;
use stamp_data::{AssetHostClient, FetchClient, ReqwestTransport, StorefrontClient};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, nearest directory first.
const CONFIG_NAMES: [&str; 3] = ["stamp.toml", ".stamp.toml", "stamp.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    client: FetchClient,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            Self::find_config(&cwd).unwrap_or_default()
        };

        let transport = ReqwestTransport::with_timeout(config.http.timeout())
            .context("Failed to build HTTP client")?;
        let client = FetchClient::with_transport(Arc::new(transport));

        Ok(Self {
            config,
            output,
            cwd,
            client,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Storefront client for catalog and checkout.
    pub fn storefront(&self) -> StorefrontClient {
        StorefrontClient::new(self.client.clone(), self.config.storefront.clone())
            .with_currency(self.config.pricing.currency)
    }

    /// Asset host client for design uploads.
    pub fn asset_host(&self) -> AssetHostClient {
        AssetHostClient::new(self.client.clone(), self.config.assets.clone())
    }

    /// Fetch the catalog.
    pub async fn catalog(&self) -> Result<Catalog> {
        let spinner = self.output.spinner("Loading products");
        let result = Catalog::load(&self.storefront()).await;
        spinner.finish_and_clear();
        Ok(result?)
    }

    /// Product for a slug, or the featured builder product when none is given.
    pub fn pick_product(&self, catalog: &Catalog, slug: Option<&str>) -> Result<Product> {
        let product = match slug {
            Some(slug) => catalog.require(slug)?,
            None => catalog
                .builder_product(&self.config.catalog.featured_slug)
                .with_context(|| {
                    format!(
                        "No products available (featured: {})",
                        self.config.catalog.featured_slug
                    )
                })?,
        };
        Ok(product.clone())
    }

    /// New customizer session for a product, using the configured pad pairing.
    pub fn customizer(&self, catalog: &Catalog, product: Product) -> Customizer {
        let session = Customizer::new(product, catalog.add_ons(&self.config.pricing));
        match self.config.catalog.pad_matcher() {
            Some(matcher) => session.with_pad_matcher(matcher),
            None => session,
        }
    }

    /// Path of the local cart file.
    pub fn cart_path(&self) -> PathBuf {
        self.resolve_path(&self.config.cart.path)
    }

    /// Load the local cart; a missing file is an empty cart.
    pub fn load_cart(&self) -> Result<Cart> {
        let path = self.cart_path();
        if !path.exists() {
            return Ok(Cart::new(self.config.pricing.currency));
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cart: {}", path.display()))?;
        Cart::from_json(&content)
            .with_context(|| format!("Failed to parse cart: {}", path.display()))
    }

    /// Persist the local cart.
    pub fn save_cart(&self, cart: &Cart) -> Result<()> {
        let path = self.cart_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, cart.to_json()?)
            .with_context(|| format!("Failed to write cart: {}", path.display()))?;
        tracing::debug!(path = %path.display(), lines = cart.lines().len(), "cart saved");
        Ok(())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}
