//! End-to-end customizer sessions against fake collaborators.

use async_trait::async_trait;
use stamp_commerce::checkout::{validate_lines, ATTR_INK_COLOR, ATTR_LOGO, ATTR_PRIORITY, ATTR_STAMP_PAD};
use stamp_commerce::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct FakeUploader {
    uploads: AtomicUsize,
    fail: AtomicBool,
}

#[async_trait]
impl AssetUploader for FakeUploader {
    async fn upload_asset(&self, file: &DesignFile) -> Result<String, CommerceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CommerceError::UploadFailed);
        }
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://assets.example/sleekstamp-logos/{}", file.file_name))
    }
}

#[derive(Default)]
struct FakeCheckout {
    submitted: Mutex<Vec<Vec<CheckoutLine>>>,
    fail: AtomicBool,
}

impl FakeCheckout {
    fn calls(&self) -> usize {
        self.submitted.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn last(&self) -> Vec<CheckoutLine> {
        self.submitted
            .lock()
            .ok()
            .and_then(|s| s.last().cloned())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CheckoutService for FakeCheckout {
    async fn create_checkout(&self, lines: &[CheckoutLine]) -> Result<String, CommerceError> {
        validate_lines(lines)?;
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(lines.to_vec());
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(CommerceError::CheckoutFailed);
        }
        Ok("https://shop.example/cart/c/abc123".to_string())
    }
}

fn big_custom_stamp() -> Product {
    Product::new(
        "gid://shopify/Product/1",
        "Big Custom Stamps",
        "big-custom-stamps",
        ProductCategory::CustomStamps,
        Money::usd(5999),
    )
    .with_sizes(vec![
        SizeOption::new("4x4 inch", Money::usd(5999)).with_variant("gid://shopify/ProductVariant/11"),
        SizeOption::new("6x6 inch", Money::usd(7999)).with_variant("gid://shopify/ProductVariant/12"),
        SizeOption::new("8x8 inch", Money::usd(9999)).with_variant("gid://shopify/ProductVariant/13"),
    ])
    .with_default_variant("gid://shopify/ProductVariant/11")
}

fn addons() -> AddOnCatalog {
    AddOnCatalog {
        stamp_pads: vec![
            StampPadOption::new("Small Stamp Pad", Money::usd(799)).with_variant("gid://shopify/ProductVariant/21"),
            StampPadOption::new("Medium Stamp Pad", Money::usd(999)).with_variant("gid://shopify/ProductVariant/22"),
            StampPadOption::new("Large Stamp Pad", Money::usd(1299)).with_variant("gid://shopify/ProductVariant/23"),
        ],
        priority: PriorityOption {
            price: Money::usd(499),
            variant_id: Some(VariantId::new("gid://shopify/ProductVariant/31")),
            product_id: Some(ProductId::new("gid://shopify/Product/3")),
        },
    }
}

fn logo() -> DesignFile {
    DesignFile::new("logo.png", vec![0x89, b'P', b'N', b'G']).with_content_type("image/png")
}

/// Drive a session through every step to Review: 6x6, logo, medium pad,
/// blue ink, priority.
fn session_at_review() -> Customizer {
    let mut session = Customizer::new(big_custom_stamp(), addons());
    session.select_size_by_label("6x6 inch").unwrap();
    session.next().unwrap();
    session.attach_design(logo(), Some("blob:preview".into())).unwrap();
    session.next().unwrap();
    session.select_pad("Medium Stamp Pad").unwrap();
    session.next().unwrap();
    session.set_ink_color("Blue").unwrap();
    session.next().unwrap();
    session.set_priority(true);
    session.next().unwrap();
    assert_eq!(session.current_step(), Step::Review);
    session
}

#[test]
fn test_total_for_six_inch_with_pad_and_priority() {
    let session = session_at_review();
    assert_eq!(session.total().unwrap(), Money::usd(9497));
    assert_eq!(session.total().unwrap().display(), "$94.97");
    assert_eq!(session.progress_percent(), 100);
}

#[test]
fn test_size_step_offers_every_size() {
    let mut session = Customizer::new(big_custom_stamp(), addons());
    let count = session.size_options().len();
    assert_eq!(count, 3);
    for i in 0..count {
        let price = session.select_size(i).unwrap().price;
        assert_eq!(session.price_breakdown().unwrap().base, price);
        assert_eq!(session.total().unwrap(), price);
    }
    assert!(session.select_size(count).is_err());
}

#[test]
fn test_total_is_sum_for_every_combination() {
    let mut session = Customizer::new(big_custom_stamp(), addons());
    for size in 0..session.size_options().len() {
        session.select_size(size).unwrap();
        let pads: Vec<Option<StampPadOption>> = std::iter::once(None)
            .chain(session.pad_options().into_iter().map(Some))
            .collect();
        for pad in pads {
            match &pad {
                Some(p) => session.select_pad(&p.name).unwrap(),
                None => session.clear_pad(),
            }
            for priority in [false, true] {
                session.set_priority(priority);
                let expected = session.size_options()[size].price.amount_cents
                    + pad.as_ref().map(|p| p.price.amount_cents).unwrap_or(0)
                    + if priority { 499 } else { 0 };
                assert_eq!(session.total().unwrap(), Money::usd(expected));
            }
        }
    }
}

#[test]
fn test_toggling_pad_off_subtracts_exactly_its_price() {
    let mut session = session_at_review();
    let before = session.price_breakdown().unwrap();
    assert!(!session.toggle_pad("Medium Stamp Pad").unwrap());
    let after = session.price_breakdown().unwrap();

    assert_eq!(before.total.amount_cents - after.total.amount_cents, 999);
    assert_eq!(after.base, before.base);
    assert_eq!(after.priority, before.priority);
    assert!(after.stamp_pad.is_zero());

    assert!(session.toggle_pad("Medium Stamp Pad").unwrap());
    assert_eq!(session.total().unwrap(), before.total);
}

#[test]
fn test_submit_gated_on_design_for_artwork_categories() {
    for category in [
        ProductCategory::CustomStamps,
        ProductCategory::FaceStamps,
        ProductCategory::WoodenStamps,
    ] {
        let mut product = big_custom_stamp();
        product.category = category;
        let mut session = Customizer::new(product, addons());
        session.select_size(0).unwrap();
        session.next().unwrap();
        session.attach_design(logo(), None).unwrap();
        while session.current_step() != Step::Review {
            session.next().unwrap();
        }
        assert!(session.can_submit());

        session.remove_design();
        assert!(!session.can_submit());

        session.attach_design(logo(), None).unwrap();
        assert!(session.can_submit());
    }
}

#[tokio::test]
async fn test_finish_checkout_builds_three_lines() {
    let mut session = session_at_review();
    let uploader = FakeUploader::default();
    let checkout = FakeCheckout::default();

    let url = session.finish_checkout(&uploader, &checkout).await.unwrap();
    assert_eq!(url, "https://shop.example/cart/c/abc123");
    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 1);

    let lines = checkout.last();
    assert_eq!(lines.len(), 3);
    let stamp = &lines[0];
    assert_eq!(stamp.variant_id, Some(VariantId::new("gid://shopify/ProductVariant/12")));
    assert_eq!(stamp.attribute(ATTR_INK_COLOR), Some("Blue"));
    assert_eq!(stamp.attribute(ATTR_STAMP_PAD), Some("Medium Stamp Pad"));
    assert_eq!(stamp.attribute(ATTR_PRIORITY), Some("Yes"));
    assert_eq!(
        stamp.attribute(ATTR_LOGO),
        Some("https://assets.example/sleekstamp-logos/logo.png")
    );
    assert_eq!(lines[1].variant_id, Some(VariantId::new("gid://shopify/ProductVariant/22")));
    assert_eq!(lines[2].variant_id, Some(VariantId::new("gid://shopify/ProductVariant/31")));
}

#[test]
fn test_priority_line_only_with_priority_variant() {
    let mut session = session_at_review();
    session.clear_pad();
    assert_eq!(session.checkout_lines().len(), 2);

    let mut fallback_addons = addons();
    fallback_addons.priority.variant_id = None;
    let mut fallback = Customizer::new(big_custom_stamp(), fallback_addons);
    fallback.select_size(1).unwrap();
    fallback.set_priority(true);
    let lines = fallback.checkout_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].attribute(ATTR_PRIORITY), Some("Yes"));
}

#[tokio::test]
async fn test_upload_failure_aborts_and_allows_retry() {
    let mut session = session_at_review();
    let uploader = FakeUploader::default();
    uploader.fail.store(true, Ordering::SeqCst);
    let checkout = FakeCheckout::default();

    let err = session.finish_checkout(&uploader, &checkout).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to upload your logo. Please try again.");
    assert_eq!(checkout.calls(), 0);
    assert!(!session.is_submitting());
    assert!(session.can_submit());

    uploader.fail.store(false, Ordering::SeqCst);
    assert!(session.finish_checkout(&uploader, &checkout).await.is_ok());
    assert_eq!(checkout.calls(), 1);
}

#[tokio::test]
async fn test_checkout_retry_reuses_uploaded_design() {
    let mut session = session_at_review();
    let uploader = FakeUploader::default();
    let checkout = FakeCheckout::default();
    checkout.fail.store(true, Ordering::SeqCst);

    let err = session.finish_checkout(&uploader, &checkout).await.unwrap_err();
    assert_eq!(err, CommerceError::CheckoutFailed);
    assert!(!session.is_submitting());

    checkout.fail.store(false, Ordering::SeqCst);
    session.finish_checkout(&uploader, &checkout).await.unwrap();

    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 1);
    assert_eq!(checkout.calls(), 2);
}

#[tokio::test]
async fn test_finished_session_refuses_second_submit() {
    let mut session = session_at_review();
    let uploader = FakeUploader::default();
    let checkout = FakeCheckout::default();
    session.finish_checkout(&uploader, &checkout).await.unwrap();

    assert!(session.is_submitting());
    assert!(!session.can_submit());
    let err = session.finish_checkout(&uploader, &checkout).await.unwrap_err();
    assert_eq!(err, CommerceError::SubmissionInProgress);
    assert_eq!(checkout.calls(), 1);
}

#[tokio::test]
async fn test_finish_before_review_is_refused() {
    let mut session = Customizer::new(big_custom_stamp(), addons());
    let err = session
        .finish_checkout(&FakeUploader::default(), &FakeCheckout::default())
        .await
        .unwrap_err();
    assert_eq!(err, CommerceError::NotAtReview);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_finish_to_cart_then_edit_line() {
    let rules = PricingRules::default();
    let uploader = FakeUploader::default();
    let mut cart = Cart::default();

    let mut session = session_at_review();
    let ids = session
        .finish_to_cart(&uploader, &mut cart, CartAssembly::Bundled)
        .await
        .unwrap();
    assert_eq!(ids.len(), 1);
    cart.set_quantity(&ids[0], 2).unwrap();

    let line = cart.get(&ids[0]).cloned().unwrap();
    assert_eq!(line.unit_price, Money::usd(9497));
    assert_eq!(line.logo_url.as_deref(), Some("https://assets.example/sleekstamp-logos/logo.png"));

    let mut edit = Customizer::resume_from_line(big_custom_stamp(), addons(), &line);
    edit.select_size_by_label("8x8 inch").unwrap();
    edit.select_pad("Large Stamp Pad").unwrap();
    while edit.current_step() != Step::Review {
        edit.next().unwrap();
    }
    edit.finish_cart_edit(&uploader, &mut cart, &ids[0]).await.unwrap();

    let updated = cart.get(&ids[0]).unwrap();
    assert_eq!(updated.size.as_deref(), Some("8x8 inch"));
    assert_eq!(updated.stamp_pad.as_deref(), Some("Large Stamp Pad"));
    assert_eq!(updated.unit_price, Money::usd(9999 + 1299 + 499));
    assert_eq!(updated.quantity, 2);
    // The hosted logo carried over; nothing was uploaded again.
    assert_eq!(uploader.uploads.load(Ordering::SeqCst), 1);

    let summary = cart.summary(&rules).unwrap();
    assert_eq!(summary.subtotal, Money::usd(2 * 11_797));
    assert!(summary.has_free_shipping());
}

#[tokio::test]
async fn test_cart_with_separate_add_ons_checks_out() {
    let uploader = FakeUploader::default();
    let checkout = FakeCheckout::default();
    let mut cart = Cart::default();

    let mut session = session_at_review();
    session
        .finish_to_cart(&uploader, &mut cart, CartAssembly::SeparateAddOns)
        .await
        .unwrap();
    assert_eq!(cart.lines().len(), 3);
    assert_eq!(cart.total().unwrap(), Money::usd(9497));

    let url = checkout_cart(&cart, &checkout).await.unwrap();
    assert!(url.starts_with("https://shop.example/"));
    assert_eq!(checkout.last().len(), 3);
}

#[tokio::test]
async fn test_separate_add_ons_with_fallback_priority_check_out() {
    let uploader = FakeUploader::default();
    let checkout = FakeCheckout::default();
    let mut cart = Cart::default();

    let mut addons = addons();
    addons.priority = AddOnCatalog::fallback(&PricingRules::default()).priority;
    let mut session = Customizer::new(big_custom_stamp(), addons);
    session.select_size_by_label("6x6 inch").unwrap();
    session.attach_design(logo(), None).unwrap();
    session.select_pad("Medium Stamp Pad").unwrap();
    session.set_priority(true);
    while session.current_step() != Step::Review {
        session.next().unwrap();
    }

    session
        .finish_to_cart(&uploader, &mut cart, CartAssembly::SeparateAddOns)
        .await
        .unwrap();
    let names: Vec<&str> = cart.lines().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Big Custom Stamps", "Medium Stamp Pad"]);
    assert!(cart.lines().iter().all(|l| l.variant_id.is_some()));
    assert_eq!(cart.lines()[0].unit_price, Money::usd(8498));
    assert_eq!(cart.total().unwrap(), Money::usd(9497));

    checkout_cart(&cart, &checkout).await.unwrap();
    let submitted = checkout.last();
    assert_eq!(submitted.len(), 2);
    assert_eq!(submitted[0].attribute(ATTR_PRIORITY), Some("Yes"));
}

#[test]
fn test_cart_summary_scenario() {
    let mut cart = Cart::default();
    cart.add(
        CartLine::new("p1", "Self-Inking Stamp", Money::usd(2999), Some(VariantId::new("v1")))
            .with_quantity(2),
    )
    .unwrap();
    cart.add(CartLine::new("p2", "Wooden Stamp", Money::usd(5799), Some(VariantId::new("v2"))))
        .unwrap();

    let summary = cart.summary(&PricingRules::default()).unwrap();
    assert_eq!(summary.subtotal, Money::usd(11_797));
    assert_eq!(summary.shipping, Money::usd(599));
    assert_eq!(summary.tax, Money::usd(944));
    assert_eq!(summary.total, Money::usd(13_340));
}
