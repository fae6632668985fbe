//! The customizer state machine.
//!
//! A [`Customizer`] walks one product through its step list, accumulates
//! [`BuilderSelections`], keeps the running total, and on finish turns the
//! selections into checkout lines or cart lines.

use crate::cart::{Cart, CartLine, CartLinePatch};
use crate::catalog::{AddOnCatalog, Product, SizeOption, StampPadOption};
use crate::checkout::{customization_attributes, CheckoutLine, CheckoutService};
use crate::customizer::review::{
    row_label, NO_DESIGN, NO_PAD, NO_SIZE, PRIORITY_VALUE, STANDARD_VALUE,
};
use crate::customizer::{
    steps_for, AssetUploader, BuilderSelections, CartAssembly, DesignFile, PadMatcher,
    PositionalPadMatcher, PriceBreakdown, ReviewRow, SelectedSize, Step,
};
use crate::error::CommerceError;
use crate::ids::{LineItemId, ProductId, VariantId};
use crate::money::Money;

/// One customization session for a single product.
#[derive(Debug)]
pub struct Customizer {
    product: Product,
    addons: AddOnCatalog,
    matcher: Box<dyn PadMatcher>,
    steps: Vec<Step>,
    index: usize,
    selections: BuilderSelections,
    /// Hosted URL of the current design, once uploaded.
    asset_url: Option<String>,
    submitting: bool,
}

impl Customizer {
    /// Start a session at the first step of the product's flow.
    pub fn new(product: Product, addons: AddOnCatalog) -> Self {
        let steps = steps_for(&product.category, product.has_sizes());
        let selections =
            BuilderSelections::new(product.default_ink_color(), addons.priority.price);
        tracing::debug!(product = %product.slug, steps = steps.len(), "customizer session started");
        Self {
            product,
            addons,
            matcher: Box::new(PositionalPadMatcher),
            steps,
            index: 0,
            selections,
            asset_url: None,
            submitting: false,
        }
    }

    /// Replace the pad matching strategy.
    pub fn with_pad_matcher(mut self, matcher: impl PadMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    /// Reopen a session pre-filled from an existing cart line.
    ///
    /// The line's hosted logo stands in for an attached design until a new
    /// file replaces it. Choices the product no longer offers are dropped.
    pub fn resume_from_line(product: Product, addons: AddOnCatalog, line: &CartLine) -> Self {
        let mut session = Self::new(product, addons);
        if let Some(size) = line.size.as_deref() {
            if session.select_size_by_label(size).is_err() {
                tracing::debug!(size, "cart line size no longer offered");
            }
        }
        if let Some(pad) = line.stamp_pad.as_deref() {
            if session.select_pad(pad).is_err() {
                tracing::debug!(pad, "cart line stamp pad no longer offered");
            }
        }
        if let Some(ink) = line.ink_color.as_deref() {
            if session.set_ink_color(ink).is_err() {
                tracing::debug!(ink, "cart line ink color no longer offered");
            }
        }
        session.selections.priority = line.priority_processing;
        session.asset_url = line.logo_url.clone();
        session
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selections(&self) -> &BuilderSelections {
        &self.selections
    }

    /// Hosted design URL, once uploaded.
    pub fn asset_url(&self) -> Option<&str> {
        self.asset_url.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_step(&self) -> Step {
        self.steps.get(self.index).copied().unwrap_or(Step::Review)
    }

    /// 1-indexed position of the current step.
    pub fn step_number(&self) -> usize {
        self.index + 1
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn progress_percent(&self) -> u8 {
        if self.steps.is_empty() {
            return 100;
        }
        ((self.step_number() * 100) / self.total_steps()).min(100) as u8
    }

    /// Sizes offered on the Size step, in catalog order.
    pub fn size_options(&self) -> &[SizeOption] {
        &self.product.sizes
    }

    /// Select the size at `index`.
    ///
    /// A previously chosen pad that no longer fits the new size is dropped.
    pub fn select_size(&mut self, index: usize) -> Result<&SizeOption, CommerceError> {
        let option = self
            .product
            .sizes
            .get(index)
            .filter(|s| s.available)
            .cloned()
            .ok_or_else(|| CommerceError::SizeNotAvailable(format!("option {}", index + 1)))?;

        tracing::debug!(product = %self.product.slug, size = %option.label, "size selected");
        self.selections.size = Some(SelectedSize { index, option });

        if let Some(pad) = self.selections.stamp_pad.take() {
            if self.pad_options().iter().any(|p| p.name == pad.name) {
                self.selections.stamp_pad = Some(pad);
            } else {
                tracing::debug!(pad = %pad.name, "stamp pad dropped after size change");
            }
        }

        self.selections
            .size
            .as_ref()
            .map(|s| &s.option)
            .ok_or_else(|| CommerceError::SizeNotAvailable(format!("option {}", index + 1)))
    }

    /// Select a size by its label (case-insensitive).
    pub fn select_size_by_label(&mut self, label: &str) -> Result<&SizeOption, CommerceError> {
        let index = self
            .product
            .size_by_label(label)
            .map(|(i, _)| i)
            .ok_or_else(|| CommerceError::SizeNotAvailable(label.to_string()))?;
        self.select_size(index)
    }

    /// Attach design artwork, replacing any previous design.
    pub fn attach_design(
        &mut self,
        file: DesignFile,
        preview: Option<String>,
    ) -> Result<(), CommerceError> {
        file.validate()?;
        tracing::debug!(file = %file.file_name, bytes = file.len(), "design attached");
        self.selections.design = Some(file);
        self.selections.design_preview = preview;
        self.asset_url = None;
        Ok(())
    }

    pub fn remove_design(&mut self) {
        self.selections.design = None;
        self.selections.design_preview = None;
        self.asset_url = None;
    }

    /// Whether a design is attached or already hosted.
    pub fn has_design(&self) -> bool {
        self.selections.design.is_some() || self.asset_url.is_some()
    }

    /// Pads offered for the currently selected size.
    pub fn pad_options(&self) -> Vec<StampPadOption> {
        self.matcher
            .match_pads(
                &self.product.sizes,
                &self.addons.stamp_pads,
                self.selections.size_index(),
            )
            .into_options()
    }

    /// Select a stamp pad by name from the pads offered for the current size.
    pub fn select_pad(&mut self, name: &str) -> Result<(), CommerceError> {
        let pad = self
            .pad_options()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CommerceError::StampPadNotAvailable(name.to_string()))?;
        tracing::debug!(pad = %pad.name, "stamp pad selected");
        self.selections.stamp_pad = Some(pad);
        Ok(())
    }

    pub fn clear_pad(&mut self) {
        self.selections.stamp_pad = None;
    }

    /// Toggle a pad on or off. Returns whether it is now selected.
    pub fn toggle_pad(&mut self, name: &str) -> Result<bool, CommerceError> {
        let is_selected = self
            .selections
            .stamp_pad_name()
            .map(|current| current.eq_ignore_ascii_case(name))
            .unwrap_or(false);
        if is_selected {
            self.clear_pad();
            Ok(false)
        } else {
            self.select_pad(name)?;
            Ok(true)
        }
    }

    /// Choose an ink color from the product's palette (case-insensitive).
    pub fn set_ink_color(&mut self, color: &str) -> Result<(), CommerceError> {
        let color = self
            .product
            .ink_palette()
            .into_iter()
            .find(|c| c.eq_ignore_ascii_case(color))
            .ok_or_else(|| CommerceError::InkColorNotAvailable(color.to_string()))?;
        self.selections.ink_color = color;
        Ok(())
    }

    pub fn set_priority(&mut self, priority: bool) {
        self.selections.priority = priority;
    }

    /// Selected size price; the product price when there is no size axis;
    /// zero while a size is still to be chosen.
    fn base_price(&self) -> Money {
        match &self.selections.size {
            Some(size) => size.option.price,
            None if !self.product.has_sizes() => self.product.price,
            None => Money::zero(self.product.price.currency),
        }
    }

    pub fn price_breakdown(&self) -> Result<PriceBreakdown, CommerceError> {
        let base = self.base_price();
        let stamp_pad = self.selections.stamp_pad_price();
        let priority = self.selections.priority_charge();
        let total = base
            .try_add(&stamp_pad)
            .and_then(|t| t.try_add(&priority))
            .ok_or(CommerceError::Overflow)?;
        Ok(PriceBreakdown {
            base,
            stamp_pad,
            priority,
            total,
        })
    }

    /// Running total: base + stamp pad + priority.
    pub fn total(&self) -> Result<Money, CommerceError> {
        Ok(self.price_breakdown()?.total)
    }

    /// Whether `step`'s requirement currently holds.
    pub fn is_step_complete(&self, step: Step) -> bool {
        match step {
            Step::Size => self.selections.size.is_some(),
            Step::Upload => !self.product.category.needs_artwork() || self.has_design(),
            Step::Color => !self.selections.ink_color.is_empty(),
            Step::Pad | Step::Priority | Step::Review => true,
        }
    }

    /// Whether Continue is available on the current step.
    pub fn can_continue(&self) -> bool {
        self.current_step() != Step::Review && self.is_step_complete(self.current_step())
    }

    /// Whether the Review step's final action is available.
    pub fn can_submit(&self) -> bool {
        self.current_step() == Step::Review && !self.submitting && self.missing_requirement().is_none()
    }

    /// First unmet requirement for finishing, if any.
    fn missing_requirement(&self) -> Option<CommerceError> {
        if self.steps.contains(&Step::Size) && self.selections.size.is_none() {
            return Some(CommerceError::StepIncomplete(Step::Size));
        }
        if self.product.category.needs_artwork() && !self.has_design() {
            return Some(CommerceError::DesignRequired);
        }
        None
    }

    /// Move to the next step.
    pub fn next(&mut self) -> Result<Step, CommerceError> {
        let current = self.current_step();
        if current == Step::Review {
            return Err(CommerceError::InvalidStepTransition {
                from: current,
                to: current,
            });
        }
        if !self.is_step_complete(current) {
            return Err(CommerceError::StepIncomplete(current));
        }
        self.index += 1;
        let next = self.current_step();
        tracing::debug!(from = current.as_str(), to = next.as_str(), "customizer advanced");
        Ok(next)
    }

    /// Move to the previous step.
    pub fn back(&mut self) -> Result<Step, CommerceError> {
        let current = self.current_step();
        if self.index == 0 {
            return Err(CommerceError::InvalidStepTransition {
                from: current,
                to: current,
            });
        }
        self.index -= 1;
        let prev = self.current_step();
        tracing::debug!(from = current.as_str(), to = prev.as_str(), "customizer went back");
        Ok(prev)
    }

    /// Jump back to an earlier step of this flow (the review "Edit" links).
    pub fn go_to(&mut self, step: Step) -> Result<(), CommerceError> {
        let current = self.current_step();
        match self.steps.iter().position(|s| *s == step) {
            Some(target) if target <= self.index => {
                self.index = target;
                tracing::debug!(from = current.as_str(), to = step.as_str(), "customizer jumped");
                Ok(())
            }
            _ => Err(CommerceError::InvalidStepTransition {
                from: current,
                to: step,
            }),
        }
    }

    /// Summary rows for every step of this flow except Review.
    pub fn review_rows(&self) -> Vec<ReviewRow> {
        let zero = Money::zero(self.product.price.currency);
        self.steps
            .iter()
            .filter_map(|&step| {
                let label = row_label(step)?;
                let (value, price) = match step {
                    Step::Size => (
                        self.selections.size_label().unwrap_or(NO_SIZE).to_string(),
                        self.selections.size.as_ref().map(|s| s.option.price).unwrap_or(zero),
                    ),
                    Step::Upload => (self.design_label(), zero),
                    Step::Pad => (
                        self.selections.stamp_pad_name().unwrap_or(NO_PAD).to_string(),
                        self.selections.stamp_pad_price(),
                    ),
                    Step::Color => (self.selections.ink_color.clone(), zero),
                    Step::Priority => (
                        if self.selections.priority {
                            PRIORITY_VALUE.to_string()
                        } else {
                            STANDARD_VALUE.to_string()
                        },
                        self.selections.priority_charge(),
                    ),
                    Step::Review => return None,
                };
                Some(ReviewRow {
                    label,
                    value,
                    price,
                    edit_step: step,
                })
            })
            .collect()
    }

    fn design_label(&self) -> String {
        match (&self.selections.design, &self.asset_url) {
            (Some(file), _) => file.file_name.clone(),
            (None, Some(url)) => url.rsplit('/').next().unwrap_or(url.as_str()).to_string(),
            (None, None) => NO_DESIGN.to_string(),
        }
    }

    /// Upload the attached design unless it is already hosted.
    ///
    /// Returns the hosted URL, or `None` when no design is attached.
    pub async fn ensure_design_uploaded(
        &mut self,
        uploader: &dyn AssetUploader,
    ) -> Result<Option<String>, CommerceError> {
        if let Some(url) = &self.asset_url {
            return Ok(Some(url.clone()));
        }
        let Some(file) = &self.selections.design else {
            return Ok(None);
        };
        let url = uploader.upload_asset(file).await?;
        tracing::info!(file = %file.file_name, url = %url, "design uploaded");
        self.asset_url = Some(url.clone());
        Ok(Some(url))
    }

    /// Variant of the stamp itself: the selected size's, else the product's.
    fn base_variant(&self) -> Option<VariantId> {
        self.selections
            .size
            .as_ref()
            .and_then(|s| s.option.variant_id.clone())
            .or_else(|| self.product.default_variant_id.clone())
    }

    fn ink_choice(&self) -> Option<&str> {
        if self.steps.contains(&Step::Color) {
            Some(self.selections.ink_color.as_str())
        } else {
            None
        }
    }

    /// Checkout lines for the current selections: the stamp with its
    /// customization attributes, then the pad and priority lines if chosen.
    ///
    /// The logo attribute carries the hosted URL, so upload first.
    pub fn checkout_lines(&self) -> Vec<CheckoutLine> {
        let mut base = CheckoutLine::new(self.product.name.clone(), self.base_variant(), 1);
        base.attributes = customization_attributes(
            self.ink_choice(),
            self.selections.stamp_pad_name(),
            self.selections.priority,
            self.asset_url.as_deref(),
        );
        let mut lines = vec![base];

        if let Some(pad) = &self.selections.stamp_pad {
            lines.push(CheckoutLine::new(pad.name.clone(), pad.variant_id.clone(), 1));
        }
        if self.selections.priority {
            if let Some(variant) = &self.addons.priority.variant_id {
                lines.push(CheckoutLine::new(
                    "Priority Processing",
                    Some(variant.clone()),
                    1,
                ));
            }
        }
        lines
    }

    /// Cart lines for the current selections in the given layout.
    pub fn cart_lines(&self, assembly: CartAssembly) -> Result<Vec<CartLine>, CommerceError> {
        let breakdown = self.price_breakdown()?;
        let pad_line = self
            .selections
            .stamp_pad
            .as_ref()
            .filter(|pad| pad.variant_id.is_some());
        let priority_line = self.selections.priority && self.addons.priority.variant_id.is_some();

        let unit_price = match assembly {
            CartAssembly::Bundled => breakdown.total,
            CartAssembly::SeparateAddOns => {
                // Add-ons without a variant cannot stand as their own line.
                let mut price = breakdown.base;
                if pad_line.is_none() {
                    price = price
                        .try_add(&breakdown.stamp_pad)
                        .ok_or(CommerceError::Overflow)?;
                }
                if !priority_line {
                    price = price
                        .try_add(&breakdown.priority)
                        .ok_or(CommerceError::Overflow)?;
                }
                price
            }
        };

        let mut stamp = CartLine::new(
            self.product.id.clone(),
            self.product.name.clone(),
            unit_price,
            self.base_variant(),
        );
        stamp.slug = self.product.slug.clone();
        stamp.image = self.product.image.clone();
        stamp.size = self.selections.size_label().map(str::to_string);
        stamp.ink_color = self.ink_choice().map(str::to_string);
        stamp.stamp_pad = self.selections.stamp_pad_name().map(str::to_string);
        stamp.priority_processing = self.selections.priority;
        stamp.logo_url = self.asset_url.clone();
        let mut lines = vec![stamp];

        if assembly == CartAssembly::SeparateAddOns {
            if let Some(pad) = pad_line {
                let product_id = pad
                    .product_id
                    .clone()
                    .unwrap_or_else(|| ProductId::new(pad.name.clone()));
                lines.push(CartLine::new(
                    product_id,
                    pad.name.clone(),
                    pad.price,
                    pad.variant_id.clone(),
                ));
            }
            if priority_line {
                let priority = &self.addons.priority;
                let product_id = priority
                    .product_id
                    .clone()
                    .unwrap_or_else(|| ProductId::new("priority-processing"));
                lines.push(CartLine::new(
                    product_id,
                    "Priority Processing",
                    priority.price,
                    priority.variant_id.clone(),
                ));
            }
        }
        Ok(lines)
    }

    /// Claim the submitting flag after checking the session can finish.
    fn begin_submit(&mut self) -> Result<(), CommerceError> {
        if self.submitting {
            return Err(CommerceError::SubmissionInProgress);
        }
        if self.current_step() != Step::Review {
            return Err(CommerceError::NotAtReview);
        }
        if let Some(err) = self.missing_requirement() {
            return Err(err);
        }
        self.submitting = true;
        Ok(())
    }

    /// Release the submitting flag after a failure so the user can retry.
    fn settle<T>(&mut self, result: Result<T, CommerceError>) -> Result<T, CommerceError> {
        if let Err(err) = &result {
            tracing::warn!(product = %self.product.slug, error = %err, "customizer finish failed");
            self.submitting = false;
        }
        result
    }

    /// Upload the design if needed and submit checkout lines.
    ///
    /// Returns the hosted checkout URL. On failure the session stays
    /// retryable and a hosted design is not uploaded again.
    pub async fn finish_checkout(
        &mut self,
        uploader: &dyn AssetUploader,
        service: &dyn CheckoutService,
    ) -> Result<String, CommerceError> {
        self.begin_submit()?;
        let result = self.submit_checkout(uploader, service).await;
        self.settle(result)
    }

    async fn submit_checkout(
        &mut self,
        uploader: &dyn AssetUploader,
        service: &dyn CheckoutService,
    ) -> Result<String, CommerceError> {
        self.ensure_design_uploaded(uploader).await?;
        let lines = self.checkout_lines();
        tracing::info!(product = %self.product.slug, lines = lines.len(), "submitting customizer checkout");
        service.create_checkout(&lines).await
    }

    /// Upload the design if needed and add the session to the cart.
    pub async fn finish_to_cart(
        &mut self,
        uploader: &dyn AssetUploader,
        cart: &mut Cart,
        assembly: CartAssembly,
    ) -> Result<Vec<LineItemId>, CommerceError> {
        self.begin_submit()?;
        let result = self.add_to_cart(uploader, cart, assembly).await;
        self.settle(result)
    }

    async fn add_to_cart(
        &mut self,
        uploader: &dyn AssetUploader,
        cart: &mut Cart,
        assembly: CartAssembly,
    ) -> Result<Vec<LineItemId>, CommerceError> {
        self.ensure_design_uploaded(uploader).await?;
        let lines = self.cart_lines(assembly)?;
        let mut ids = Vec::with_capacity(lines.len());
        for line in lines {
            ids.push(cart.add(line)?);
        }
        tracing::info!(product = %self.product.slug, lines = ids.len(), mode = assembly.as_str(), "customization added to cart");
        Ok(ids)
    }

    /// Write the session back over an existing cart line, keeping its
    /// quantity. Add-ons are bundled into the line.
    pub async fn finish_cart_edit(
        &mut self,
        uploader: &dyn AssetUploader,
        cart: &mut Cart,
        line_id: &LineItemId,
    ) -> Result<(), CommerceError> {
        self.begin_submit()?;
        let result = self.replace_cart_line(uploader, cart, line_id).await;
        self.settle(result)
    }

    async fn replace_cart_line(
        &mut self,
        uploader: &dyn AssetUploader,
        cart: &mut Cart,
        line_id: &LineItemId,
    ) -> Result<(), CommerceError> {
        if cart.get(line_id).is_none() {
            return Err(CommerceError::ItemNotInCart(line_id.to_string()));
        }
        self.ensure_design_uploaded(uploader).await?;
        let lines = self.cart_lines(CartAssembly::Bundled)?;
        let line = lines
            .first()
            .ok_or_else(|| CommerceError::ItemNotInCart(line_id.to_string()))?;
        cart.update(line_id, CartLinePatch::replace_with(line))?;
        tracing::info!(line = %line_id, product = %self.product.slug, "cart line updated from customizer");
        Ok(())
    }
}
