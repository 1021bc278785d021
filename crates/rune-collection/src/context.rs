//! Descriptor handed to the attribute closure for one resolution.

use crate::geometry::Rect;
use crate::update::{UpdateAction, UpdateMatch};

/// Describes the transition an attribute resolution belongs to.
///
/// Built only by [`AttributeResolver`](crate::AttributeResolver); the
/// registered closure reads it to decide how to mutate the attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateContext {
    is_final_attributes: bool,
    is_section_update: bool,
    is_bounds_update: bool,
    previous_bounds: Rect,
    update_action: Option<UpdateAction>,
}

impl UpdateContext {
    pub(crate) fn new(
        is_final_attributes: bool,
        update: Option<UpdateMatch>,
        previous_bounds: Option<Rect>,
    ) -> Self {
        Self {
            is_final_attributes,
            is_section_update: update.is_some_and(|m| m.is_section),
            is_bounds_update: previous_bounds.is_some(),
            previous_bounds: previous_bounds.unwrap_or_default(),
            update_action: update.map(|m| m.action),
        }
    }

    /// `true` for the end state of a transition (a disappearing item),
    /// `false` for the start state (an appearing item).
    pub fn is_final_attributes(&self) -> bool {
        self.is_final_attributes
    }

    /// The matched descriptor targets the item's whole section.
    pub fn is_section_update(&self) -> bool {
        self.is_section_update
    }

    /// The resolution happens during an animated bounds change.
    pub fn is_bounds_update(&self) -> bool {
        self.is_bounds_update
    }

    /// Container bounds before the change; `None` unless [`is_bounds_update`](Self::is_bounds_update).
    pub fn previous_bounds(&self) -> Option<Rect> {
        self.is_bounds_update.then_some(self.previous_bounds)
    }

    /// Action of the pending descriptor matching the item, if any.
    pub fn update_action(&self) -> Option<UpdateAction> {
        self.update_action
    }

    /// The item is named by the open structural batch.
    pub fn is_structural_update(&self) -> bool {
        self.update_action.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_bounds_hidden_without_bounds_update() {
        let update = UpdateMatch {
            action: UpdateAction::Insert,
            is_section: false,
        };
        let ctx = UpdateContext::new(false, Some(update), None);
        assert!(!ctx.is_bounds_update());
        assert_eq!(ctx.previous_bounds(), None);
        assert!(ctx.is_structural_update());
    }

    #[test]
    fn test_bounds_context() {
        let old = Rect::new(0.0, 0.0, 320.0, 480.0);
        let ctx = UpdateContext::new(true, None, Some(old));
        assert!(ctx.is_final_attributes());
        assert!(ctx.is_bounds_update());
        assert_eq!(ctx.previous_bounds(), Some(old));
        assert!(!ctx.is_section_update());
        assert_eq!(ctx.update_action(), None);
    }

    #[test]
    fn test_section_flag_follows_match() {
        let update = UpdateMatch {
            action: UpdateAction::Delete,
            is_section: true,
        };
        let ctx = UpdateContext::new(false, Some(update), None);
        assert!(ctx.is_section_update());
        assert_eq!(ctx.update_action(), Some(UpdateAction::Delete));
    }
}
