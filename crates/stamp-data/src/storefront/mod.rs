//! Storefront GraphQL adapter.
//!
//! Implements the catalog provider and the checkout service against the
//! hosted commerce backend's storefront API.

mod mapping;
mod queries;
mod types;

pub use mapping::map_product;

use crate::{FetchClient, FetchError, StorefrontConfig};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stamp_commerce::catalog::{CatalogProvider, Product};
use stamp_commerce::checkout::{validate_lines, CheckoutLine, CheckoutService};
use stamp_commerce::money::Currency;
use stamp_commerce::CommerceError;
use types::{
    AttributeInput, CartCreateData, CartCreateVariables, CartInput, CartLineInput, GraphQlRequest,
    GraphQlResponse, ProductsData,
};

/// Header carrying the public storefront token.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Client for the storefront GraphQL API.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: FetchClient,
    config: StorefrontConfig,
    currency: Currency,
}

impl StorefrontClient {
    pub fn new(client: FetchClient, config: StorefrontConfig) -> Self {
        Self {
            client,
            config,
            currency: Currency::default(),
        }
    }

    /// Store currency; products priced in any other currency are skipped.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// POST one GraphQL document to the configured endpoint.
    async fn graphql<V, T>(
        &self,
        domain: &str,
        token: &str,
        query: &str,
        variables: Option<V>,
    ) -> Result<GraphQlResponse<T>, FetchError>
    where
        V: Serialize + Send,
        T: DeserializeOwned + Send,
    {
        let request = self
            .client
            .post(self.config.endpoint(domain))
            .header(ACCESS_TOKEN_HEADER, token)
            .accept("application/json")
            .json(&GraphQlRequest { query, variables })?;
        request.send().await?.error_for_status()?.json()
    }
}

fn error_messages(errors: &[types::GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[async_trait]
impl CatalogProvider for StorefrontClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, CommerceError> {
        let (domain, token) = self.config.credentials().map_err(|err| {
            tracing::error!(error = %err, "storefront credentials missing");
            err
        })?;

        let query = queries::products_query(
            self.config.products_per_page,
            self.config.variants_per_product,
        );
        let response: GraphQlResponse<ProductsData> = self
            .graphql(&domain, &token, &query, None::<()>)
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "catalog query failed");
                CommerceError::CatalogUnavailable(err.to_string())
            })?;

        let Some(data) = response.data else {
            let detail = error_messages(&response.errors);
            tracing::error!(errors = %detail, "catalog query returned no data");
            return Err(CommerceError::CatalogUnavailable(detail));
        };
        if !response.errors.is_empty() {
            tracing::warn!(errors = %error_messages(&response.errors), "catalog query returned partial data");
        }

        let products: Vec<Product> = data
            .products
            .nodes()
            .filter_map(|node| map_product(node, self.currency))
            .collect();
        tracing::info!(products = products.len(), "catalog fetched");
        Ok(products)
    }
}

#[async_trait]
impl CheckoutService for StorefrontClient {
    async fn create_checkout(&self, lines: &[CheckoutLine]) -> Result<String, CommerceError> {
        validate_lines(lines)?;
        let (domain, token) = self.config.credentials()?;

        let cart_lines = lines
            .iter()
            .filter_map(|line| {
                let variant = line.variant_id.as_ref()?;
                Some(CartLineInput {
                    merchandise_id: variant.to_string(),
                    quantity: line.quantity,
                    attributes: line
                        .attributes
                        .iter()
                        .map(|a| AttributeInput {
                            key: a.key.clone(),
                            value: a.value.clone(),
                        })
                        .collect(),
                })
            })
            .collect();
        let variables = CartCreateVariables {
            cart_input: CartInput { lines: cart_lines },
        };

        tracing::info!(lines = lines.len(), "creating hosted checkout");
        let response: GraphQlResponse<CartCreateData> = self
            .graphql(&domain, &token, queries::CART_CREATE_MUTATION, Some(variables))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "checkout request failed");
                CommerceError::CheckoutFailed
            })?;

        let payload = response.data.and_then(|d| d.cart_create);
        let checkout_url = payload
            .as_ref()
            .and_then(|p| p.cart.as_ref())
            .and_then(|c| c.checkout_url.clone());

        match checkout_url {
            Some(url) => {
                tracing::info!(url = %url, "hosted checkout created");
                Ok(url)
            }
            None => {
                let user_errors = payload
                    .map(|p| {
                        p.user_errors
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("; ")
                    })
                    .unwrap_or_default();
                tracing::error!(
                    user_errors = %user_errors,
                    errors = %error_messages(&response.errors),
                    "failed to create cart"
                );
                Err(CommerceError::CheckoutFailed)
            }
        }
    }
}
