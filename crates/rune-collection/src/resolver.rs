//! Update lifecycle tracking and initial/final attribute resolution.
//!
//! The layout calls the prepare/finalize hooks around a batch of structural
//! updates or an animated bounds change, and asks for initial attributes of
//! appearing items and final attributes of disappearing items in between.
//!
//! # Usage
//!
//! ```ignore
//! let mut resolver = AttributeResolver::new();
//! resolver.set_cell_attributes_fn(|attrs, ctx| {
//!     if ctx.is_structural_update() {
//!         attrs.alpha = 0.0;
//!         attrs.transform = Transform2D::scale_uniform(0.8);
//!     }
//! });
//!
//! // Hook style, for layouts whose lifecycle spans several callbacks:
//! resolver.prepare_for_updates(items);
//! let start = resolver.initial_attributes_for_item(&baseline, path);
//! resolver.finalize_updates();
//!
//! // Scoped style, finalize runs on drop:
//! {
//!     let batch = resolver.begin_updates(items);
//!     let end = batch.final_attributes_for_item(&baseline, path);
//! }
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

use rune_config::AssistantConfig;
use tracing::{debug, trace};

use crate::attributes::LayoutAttributes;
use crate::context::UpdateContext;
use crate::geometry::Rect;
use crate::index_path::IndexPath;
use crate::update::{PendingUpdates, UpdateItem};

/// Mutates a copy of an item's attributes to express its animated start or
/// end state. The attributes passed in are already a copy.
pub type CellAttributesFn = Box<dyn Fn(&mut LayoutAttributes, &UpdateContext)>;

/// Tracks the open update batch and bounds change for a layout and resolves
/// transition attributes through a single registered closure.
///
/// Not thread-safe; the owning layout drives it from its layout pass.
pub struct AttributeResolver {
    config: AssistantConfig,
    cell_attributes_fn: Option<CellAttributesFn>,
    pending_updates: Option<PendingUpdates>,
    previous_bounds: Option<Rect>,
}

impl Default for AttributeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AttributeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeResolver")
            .field("config", &self.config)
            .field("has_cell_attributes_fn", &self.cell_attributes_fn.is_some())
            .field("pending_updates", &self.pending_updates)
            .field("previous_bounds", &self.previous_bounds)
            .finish()
    }
}

impl AttributeResolver {
    pub fn new() -> Self {
        Self::with_config(AssistantConfig::default())
    }

    pub fn with_config(config: AssistantConfig) -> Self {
        Self {
            config,
            cell_attributes_fn: None,
            pending_updates: None,
            previous_bounds: None,
        }
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    // ===== Registration =====

    /// Register the closure that mutates attributes of appearing and
    /// disappearing cells, replacing any previous one.
    ///
    /// Only later resolutions are affected; nothing is cached.
    pub fn set_cell_attributes_fn<F>(&mut self, f: F)
    where
        F: Fn(&mut LayoutAttributes, &UpdateContext) + 'static,
    {
        self.cell_attributes_fn = Some(Box::new(f));
    }

    /// Drop the registered closure; resolutions return unmodified copies.
    pub fn clear_cell_attributes_fn(&mut self) {
        self.cell_attributes_fn = None;
    }

    pub fn has_cell_attributes_fn(&self) -> bool {
        self.cell_attributes_fn.is_some()
    }

    // ===== Layout hooks =====

    /// Open a structural update batch. Call from the layout's
    /// prepare-for-updates step.
    ///
    /// If a batch is already open its descriptors are replaced.
    pub fn prepare_for_updates(&mut self, items: impl IntoIterator<Item = UpdateItem>) {
        let pending = PendingUpdates::new(items.into_iter().collect());
        if let Some(previous) = &self.pending_updates {
            debug!(
                replaced = previous.items().len(),
                "prepare_for_updates while a batch is open; replacing descriptors"
            );
        }
        debug!(items = pending.items().len(), "prepare_for_updates");
        self.pending_updates = Some(pending);
    }

    /// Close the structural update batch. No-op if none is open.
    pub fn finalize_updates(&mut self) {
        match self.pending_updates.take() {
            Some(pending) => debug!(items = pending.items().len(), "finalize_updates"),
            None if self.config.log_unbalanced_brackets => {
                debug!("finalize_updates without an open update batch; ignoring")
            }
            None => {}
        }
    }

    /// Open an animated bounds change, remembering the bounds before it.
    pub fn prepare_for_animated_bounds_change(&mut self, old_bounds: Rect) {
        debug!(?old_bounds, "prepare_for_animated_bounds_change");
        self.previous_bounds = Some(old_bounds);
    }

    /// Close the animated bounds change. No-op if none is open.
    pub fn finalize_animated_bounds_change(&mut self) {
        match self.previous_bounds.take() {
            Some(old_bounds) => debug!(?old_bounds, "finalize_animated_bounds_change"),
            None if self.config.log_unbalanced_brackets => {
                debug!("finalize_animated_bounds_change without an open bounds change; ignoring")
            }
            None => {}
        }
    }

    // ===== Scoped brackets =====

    /// Open a structural update batch that is finalized when the returned
    /// guard drops.
    pub fn begin_updates(
        &mut self,
        items: impl IntoIterator<Item = UpdateItem>,
    ) -> UpdateBatch<'_> {
        self.prepare_for_updates(items);
        UpdateBatch { resolver: self }
    }

    /// Open an animated bounds change that is finalized when the returned
    /// guard drops.
    pub fn begin_animated_bounds_change(&mut self, old_bounds: Rect) -> BoundsChange<'_> {
        self.prepare_for_animated_bounds_change(old_bounds);
        BoundsChange { resolver: self }
    }

    // ===== State =====

    pub fn is_preparing_updates(&self) -> bool {
        self.pending_updates.is_some()
    }

    pub fn is_animating_bounds_change(&self) -> bool {
        self.previous_bounds.is_some()
    }

    /// Descriptors of the open batch; empty when none is open.
    pub fn pending_update_items(&self) -> &[UpdateItem] {
        self.pending_updates
            .as_ref()
            .map(PendingUpdates::items)
            .unwrap_or(&[])
    }

    /// Bounds captured by the open bounds change.
    pub fn previous_bounds(&self) -> Option<Rect> {
        self.previous_bounds
    }

    // ===== Resolution =====

    /// Start attributes for an appearing item.
    ///
    /// Returns a mutated copy of `attributes`; the argument is never modified.
    pub fn initial_attributes_for_item(
        &self,
        attributes: &LayoutAttributes,
        index_path: IndexPath,
    ) -> LayoutAttributes {
        self.resolve(attributes, index_path, false)
    }

    /// End attributes for a disappearing item.
    ///
    /// Returns a mutated copy of `attributes`; the argument is never modified.
    pub fn final_attributes_for_item(
        &self,
        attributes: &LayoutAttributes,
        index_path: IndexPath,
    ) -> LayoutAttributes {
        self.resolve(attributes, index_path, true)
    }

    fn resolve(
        &self,
        attributes: &LayoutAttributes,
        index_path: IndexPath,
        is_final: bool,
    ) -> LayoutAttributes {
        let update = self.pending_updates.as_ref().and_then(|pending| {
            if is_final {
                pending.disappearing(index_path)
            } else {
                pending.appearing(index_path)
            }
        });
        let context = UpdateContext::new(is_final, update, self.previous_bounds);

        let mut resolved = attributes.clone();
        if let Some(f) = &self.cell_attributes_fn {
            f(&mut resolved, &context);
        }

        if self.config.trace_resolutions {
            trace!(
                %index_path,
                is_final,
                action = ?context.update_action(),
                section = context.is_section_update(),
                bounds = context.is_bounds_update(),
                alpha = resolved.alpha,
                "resolved transition attributes"
            );
        }
        resolved
    }
}

/// An open structural update batch; runs
/// [`finalize_updates`](AttributeResolver::finalize_updates) on drop.
#[must_use = "the update batch is finalized as soon as the guard is dropped"]
pub struct UpdateBatch<'a> {
    resolver: &'a mut AttributeResolver,
}

impl UpdateBatch<'_> {
    /// Finalize now instead of at end of scope.
    pub fn finish(self) {}
}

impl Deref for UpdateBatch<'_> {
    type Target = AttributeResolver;

    fn deref(&self) -> &Self::Target {
        self.resolver
    }
}

impl DerefMut for UpdateBatch<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resolver
    }
}

impl Drop for UpdateBatch<'_> {
    fn drop(&mut self) {
        self.resolver.finalize_updates();
    }
}

/// An open animated bounds change; runs
/// [`finalize_animated_bounds_change`](AttributeResolver::finalize_animated_bounds_change)
/// on drop.
#[must_use = "the bounds change is finalized as soon as the guard is dropped"]
pub struct BoundsChange<'a> {
    resolver: &'a mut AttributeResolver,
}

impl BoundsChange<'_> {
    /// Finalize now instead of at end of scope.
    pub fn finish(self) {}
}

impl Deref for BoundsChange<'_> {
    type Target = AttributeResolver;

    fn deref(&self) -> &Self::Target {
        self.resolver
    }
}

impl DerefMut for BoundsChange<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.resolver
    }
}

impl Drop for BoundsChange<'_> {
    fn drop(&mut self) {
        self.resolver.finalize_animated_bounds_change();
    }
}
