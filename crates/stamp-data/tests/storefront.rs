//! Storefront and asset host adapters against a recording transport.

use async_trait::async_trait;
use serde_json::{json, Value};
use stamp_commerce::catalog::{Catalog, CatalogProvider, ProductCategory};
use stamp_commerce::checkout::{CheckoutLine, CheckoutService, ATTR_INK_COLOR, ATTR_LOGO};
use stamp_commerce::customizer::{AssetUploader, DesignFile};
use stamp_commerce::ids::VariantId;
use stamp_commerce::money::Money;
use stamp_commerce::{CommerceError, PricingRules};
use stamp_data::{
    AssetHostClient, AssetHostConfig, FetchClient, FetchError, HttpTransport, RequestBody,
    RequestBuilder, Response, StorefrontClient, StorefrontConfig,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned responses and records every request.
#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<RequestBuilder>>,
    responses: Mutex<VecDeque<Result<Response, FetchError>>>,
}

impl RecordingTransport {
    fn replying(responses: Vec<Response>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
        })
    }

    fn failing(error: FetchError) -> Arc<Self> {
        let transport = Self::default();
        if let Ok(mut responses) = transport.responses.lock() {
            responses.push_back(Err(error));
        }
        Arc::new(transport)
    }

    fn requests(&self) -> Vec<RequestBuilder> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| Err(FetchError::RequestError("no canned response".into())))
    }
}

fn storefront(transport: Arc<RecordingTransport>) -> StorefrontClient {
    StorefrontClient::new(
        FetchClient::with_transport(transport),
        StorefrontConfig::default().with_credentials("sleekstamp.myshopify.com", "public-token"),
    )
}

fn catalog_response() -> Value {
    let variant = |id: &str, title: &str, amount: &str| {
        json!({"node": {
            "id": id,
            "title": title,
            "price": {"amount": amount, "currencyCode": "USD"},
            "availableForSale": true,
            "selectedOptions": [{"name": "Size", "value": title}]
        }})
    };
    let product = |id: &str, title: &str, handle: &str, amount: &str, variants: Value| {
        json!({"node": {
            "id": id,
            "title": title,
            "handle": handle,
            "productType": "",
            "description": "Stamp description",
            "priceRange": {"minVariantPrice": {"amount": amount, "currencyCode": "USD"}},
            "images": {"edges": []},
            "variants": {"edges": variants}
        }})
    };
    json!({"data": {"products": {"edges": [
        product("p1", "Big Custom Stamps", "big-custom-stamps", "59.99", json!([
            variant("v4", "4x4 inch", "59.99"),
            variant("v6", "6x6 inch", "79.99"),
            variant("v8", "8x8 inch", "99.99"),
        ])),
        product("p2", "Small Stamp Pad", "small-stamp-pad", "7.99", json!([variant("vsp", "Default Title", "7.99")])),
        product("p3", "Large Stamp Pad", "large-stamp-pad", "12.99", json!([variant("vlp", "Default Title", "12.99")])),
        product("p4", "Priority Processing", "priority-processing", "6.99", json!([variant("vpp", "Default Title", "6.99")])),
    ]}}})
}

#[tokio::test]
async fn test_catalog_query_and_mapping() {
    let transport = RecordingTransport::replying(vec![Response::json_body(200, &catalog_response())]);
    let client = storefront(transport.clone());

    let catalog = Catalog::load(&client).await.unwrap();
    assert_eq!(catalog.all().len(), 4);
    assert_eq!(catalog.display().count(), 3);

    let stamp = catalog.require("big-custom-stamps").unwrap();
    assert_eq!(stamp.category, ProductCategory::CustomStamps);
    assert_eq!(stamp.sizes.len(), 3);

    let addons = catalog.add_ons(&PricingRules::default());
    let pads: Vec<&str> = addons.stamp_pads.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(pads, vec!["Small Stamp Pad", "Large Stamp Pad"]);
    assert_eq!(addons.priority.price, Money::usd(699));
    assert_eq!(addons.priority.variant_id, Some(VariantId::new("vpp")));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.url(),
        "https://sleekstamp.myshopify.com/api/2024-01/graphql.json"
    );
    assert_eq!(
        request.header_value("X-Shopify-Storefront-Access-Token"),
        Some("public-token")
    );
    let body: Value = request.json_body().unwrap();
    assert!(body["query"].as_str().unwrap().contains("products(first: 20)"));
}

#[tokio::test]
async fn test_catalog_graphql_errors_surface_as_unavailable() {
    let transport = RecordingTransport::replying(vec![Response::json_body(
        200,
        &json!({"data": null, "errors": [{"message": "Access denied"}]}),
    )]);
    let err = storefront(transport).fetch_products().await.unwrap_err();
    assert_eq!(err, CommerceError::CatalogUnavailable("Access denied".into()));
}

#[tokio::test]
async fn test_missing_credentials_make_no_request() {
    if std::env::var(stamp_data::DOMAIN_ENV).is_ok() {
        return;
    }
    let transport = RecordingTransport::replying(vec![]);
    let client = StorefrontClient::new(
        FetchClient::with_transport(transport.clone()),
        StorefrontConfig::default(),
    );
    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, CommerceError::MissingCredentials(_)));
    assert!(transport.requests().is_empty());
}

fn stamp_line() -> CheckoutLine {
    CheckoutLine::new("Big Custom Stamps", Some(VariantId::new("v6")), 1)
        .with_attribute(ATTR_INK_COLOR, "Blue")
        .with_attribute(ATTR_LOGO, "https://res.example/logo.png")
}

#[tokio::test]
async fn test_checkout_sends_cart_create() {
    let transport = RecordingTransport::replying(vec![Response::json_body(
        200,
        &json!({"data": {"cartCreate": {
            "cart": {"checkoutUrl": "https://sleekstamp.myshopify.com/cart/c/xyz"},
            "userErrors": []
        }}}),
    )]);
    let client = storefront(transport.clone());
    let lines = vec![stamp_line(), CheckoutLine::new("Small Stamp Pad", Some(VariantId::new("vsp")), 1)];

    let url = client.create_checkout(&lines).await.unwrap();
    assert_eq!(url, "https://sleekstamp.myshopify.com/cart/c/xyz");

    let body: Value = transport.requests()[0].json_body().unwrap();
    assert!(body["query"].as_str().unwrap().contains("cartCreate"));
    let sent = &body["variables"]["cartInput"]["lines"];
    assert_eq!(sent[0]["merchandiseId"], "v6");
    assert_eq!(sent[0]["quantity"], 1);
    assert_eq!(sent[0]["attributes"][0], json!({"key": "Ink Color", "value": "Blue"}));
    assert_eq!(sent[1]["merchandiseId"], "vsp");
    assert_eq!(sent[1]["attributes"], json!([]));
}

#[tokio::test]
async fn test_checkout_missing_variant_makes_no_request() {
    let transport = RecordingTransport::replying(vec![]);
    let client = storefront(transport.clone());
    let lines = vec![stamp_line(), CheckoutLine::new("Legacy Stamp", None, 1)];

    let err = client.create_checkout(&lines).await.unwrap_err();
    assert_eq!(err, CommerceError::MissingVariant("Legacy Stamp".into()));
    assert!(err.to_string().contains("remove them and add them again"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_checkout_user_errors_are_generic() {
    let transport = RecordingTransport::replying(vec![Response::json_body(
        200,
        &json!({"data": {"cartCreate": {
            "cart": null,
            "userErrors": [{"field": ["input", "lines", "0", "merchandiseId"], "message": "Merchandise does not exist"}]
        }}}),
    )]);
    let err = storefront(transport).create_checkout(&[stamp_line()]).await.unwrap_err();
    assert_eq!(err, CommerceError::CheckoutFailed);
    assert_eq!(err.to_string(), "Failed to initialize checkout.");
}

#[tokio::test]
async fn test_checkout_transport_failure_is_generic() {
    let transport = RecordingTransport::failing(FetchError::Timeout);
    let err = storefront(transport).create_checkout(&[stamp_line()]).await.unwrap_err();
    assert_eq!(err, CommerceError::CheckoutFailed);
}

fn uploader(transport: Arc<RecordingTransport>) -> AssetHostClient {
    AssetHostClient::new(
        FetchClient::with_transport(transport),
        AssetHostConfig {
            cloud_name: "demo-cloud".into(),
            ..Default::default()
        },
    )
}

#[tokio::test]
async fn test_upload_posts_multipart_and_returns_secure_url() {
    let transport = RecordingTransport::replying(vec![Response::json_body(
        200,
        &json!({"secure_url": "https://res.example/demo-cloud/sleekstamp-logos/logo.png"}),
    )]);
    let file = DesignFile::new("logo.png", vec![1, 2, 3]);

    let url = uploader(transport.clone()).upload_asset(&file).await.unwrap();
    assert_eq!(url, "https://res.example/demo-cloud/sleekstamp-logos/logo.png");

    let request = &transport.requests()[0];
    assert_eq!(
        request.url(),
        "https://api.cloudinary.com/v1_1/demo-cloud/image/upload"
    );
    let RequestBody::Multipart(form) = request.request_body() else {
        panic!("expected multipart body");
    };
    assert_eq!(form.text_value("upload_preset"), Some("sleekstamp_unsigned"));
    assert_eq!(form.text_value("folder"), Some("sleekstamp-logos"));
    assert_eq!(form.parts[0].name(), "file");
}

#[tokio::test]
async fn test_upload_non_success_gives_generic_message() {
    let transport = RecordingTransport::replying(vec![Response::json_body(
        400,
        &json!({"error": {"message": "Upload preset must be whitelisted for unsigned uploads"}}),
    )]);
    let file = DesignFile::new("logo.png", vec![1, 2, 3]);

    let err = uploader(transport).upload_asset(&file).await.unwrap_err();
    assert_eq!(err, CommerceError::UploadFailed);
    assert_eq!(err.to_string(), "Failed to upload your logo. Please try again.");
}
