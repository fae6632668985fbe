//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};
use stamp_commerce::CommerceError;

/// Environment variable holding the storefront domain.
pub const DOMAIN_ENV: &str = "STOREFRONT_DOMAIN";
/// Environment variable holding the storefront access token.
pub const ACCESS_TOKEN_ENV: &str = "STOREFRONT_ACCESS_TOKEN";

/// Storefront GraphQL API settings.
///
/// Domain and token may be left unset here and supplied through the
/// environment; they are resolved on every request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorefrontConfig {
    pub domain: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub api_version: String,
    /// Products fetched by the catalog query.
    pub products_per_page: u32,
    /// Variants fetched per product.
    pub variants_per_product: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            domain: None,
            access_token: None,
            api_version: "2024-01".to_string(),
            products_per_page: 20,
            variants_per_product: 10,
        }
    }
}

impl StorefrontConfig {
    /// Defaults with credentials taken from the environment.
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn with_credentials(
        mut self,
        domain: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        self.domain = Some(domain.into());
        self.access_token = Some(access_token.into());
        self
    }

    /// Domain and access token, from this config or the environment.
    pub fn credentials(&self) -> Result<(String, String), CommerceError> {
        let domain = resolve(self.domain.as_deref(), DOMAIN_ENV);
        let token = resolve(self.access_token.as_deref(), ACCESS_TOKEN_ENV);
        match (domain, token) {
            (Some(domain), Some(token)) => Ok((domain, token)),
            (None, Some(_)) => Err(CommerceError::MissingCredentials(DOMAIN_ENV.to_string())),
            (Some(_), None) => Err(CommerceError::MissingCredentials(ACCESS_TOKEN_ENV.to_string())),
            (None, None) => Err(CommerceError::MissingCredentials(format!(
                "{} and {}",
                DOMAIN_ENV, ACCESS_TOKEN_ENV
            ))),
        }
    }

    /// GraphQL endpoint for a domain.
    pub fn endpoint(&self, domain: &str) -> String {
        let domain = domain
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!("https://{}/api/{}/graphql.json", domain, self.api_version)
    }
}

fn resolve(configured: Option<&str>, env_key: &str) -> Option<String> {
    let non_blank = |v: &str| {
        let v = v.trim();
        (!v.is_empty()).then(|| v.to_string())
    };
    configured
        .and_then(non_blank)
        .or_else(|| std::env::var(env_key).ok().as_deref().and_then(non_blank))
}

/// Unsigned upload settings for the asset host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetHostConfig {
    pub api_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub folder: String,
}

impl Default for AssetHostConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.cloudinary.com/v1_1".to_string(),
            cloud_name: "sleekstamp".to_string(),
            upload_preset: "sleekstamp_unsigned".to_string(),
            folder: "sleekstamp-logos".to_string(),
        }
    }
}

impl AssetHostConfig {
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name
        )
    }
}
