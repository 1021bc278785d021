//! Structural update descriptors and the per-batch lookup index built from them.
//!
//! A descriptor names what happened (`action`) and where, before and/or after
//! the update. Only the "after" side matters for appearing items and only the
//! "before" side for disappearing ones:
//!
//! | action | before | after |
//! |---|---|---|
//! | Insert | - | target |
//! | Delete | target | - |
//! | Reload | target | target |
//! | Move | source | destination |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::index_path::IndexPath;

/// Kind of structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateAction {
    Insert,
    Delete,
    Reload,
    Move,
}

/// What a descriptor points at: a whole section or a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpdateTarget {
    Section { section: usize },
    Item { index_path: IndexPath },
}

impl UpdateTarget {
    pub fn section(section: usize) -> Self {
        Self::Section { section }
    }

    pub fn item(index_path: IndexPath) -> Self {
        Self::Item { index_path }
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Self::Section { .. })
    }
}

impl From<IndexPath> for UpdateTarget {
    fn from(index_path: IndexPath) -> Self {
        Self::item(index_path)
    }
}

/// One entry of a structural update batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItem {
    pub action: UpdateAction,
    /// Location before the update; `None` for inserts.
    pub before: Option<UpdateTarget>,
    /// Location after the update; `None` for deletes.
    pub after: Option<UpdateTarget>,
}

impl UpdateItem {
    pub fn insert(target: impl Into<UpdateTarget>) -> Self {
        Self {
            action: UpdateAction::Insert,
            before: None,
            after: Some(target.into()),
        }
    }

    pub fn delete(target: impl Into<UpdateTarget>) -> Self {
        Self {
            action: UpdateAction::Delete,
            before: Some(target.into()),
            after: None,
        }
    }

    pub fn reload(target: impl Into<UpdateTarget>) -> Self {
        let target = target.into();
        Self {
            action: UpdateAction::Reload,
            before: Some(target),
            after: Some(target),
        }
    }

    pub fn move_item(from: IndexPath, to: IndexPath) -> Self {
        Self {
            action: UpdateAction::Move,
            before: Some(UpdateTarget::item(from)),
            after: Some(UpdateTarget::item(to)),
        }
    }

    pub fn move_section(from: usize, to: usize) -> Self {
        Self {
            action: UpdateAction::Move,
            before: Some(UpdateTarget::section(from)),
            after: Some(UpdateTarget::section(to)),
        }
    }

    /// True if either side of the descriptor addresses a whole section.
    pub fn is_section_update(&self) -> bool {
        self.before.is_some_and(|t| t.is_section()) || self.after.is_some_and(|t| t.is_section())
    }
}

/// Result of looking a locator up in the pending batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UpdateMatch {
    pub action: UpdateAction,
    pub is_section: bool,
}

/// Section and item targets for one side (before or after) of a batch.
/// The first descriptor naming a target wins.
#[derive(Debug, Default)]
struct SideIndex {
    sections: BTreeMap<usize, UpdateAction>,
    items: BTreeMap<IndexPath, UpdateAction>,
}

impl SideIndex {
    fn record(&mut self, target: UpdateTarget, action: UpdateAction) {
        match target {
            UpdateTarget::Section { section } => {
                self.sections.entry(section).or_insert(action);
            }
            UpdateTarget::Item { index_path } => {
                self.items.entry(index_path).or_insert(action);
            }
        }
    }

    fn lookup(&self, index_path: IndexPath) -> Option<UpdateMatch> {
        if let Some(&action) = self.sections.get(&index_path.section) {
            return Some(UpdateMatch {
                action,
                is_section: true,
            });
        }
        self.items.get(&index_path).map(|&action| UpdateMatch {
            action,
            is_section: false,
        })
    }
}

/// Descriptors of the open structural batch plus lookup tables over them.
#[derive(Debug, Default)]
pub(crate) struct PendingUpdates {
    items: Vec<UpdateItem>,
    appearing: SideIndex,
    disappearing: SideIndex,
}

impl PendingUpdates {
    pub fn new(items: Vec<UpdateItem>) -> Self {
        let mut appearing = SideIndex::default();
        let mut disappearing = SideIndex::default();
        for item in &items {
            if let Some(after) = item.after {
                appearing.record(after, item.action);
            }
            if let Some(before) = item.before {
                disappearing.record(before, item.action);
            }
        }
        Self {
            items,
            appearing,
            disappearing,
        }
    }

    pub fn items(&self) -> &[UpdateItem] {
        &self.items
    }

    /// Match for an item that exists after the update (initial attributes).
    pub fn appearing(&self, index_path: IndexPath) -> Option<UpdateMatch> {
        self.appearing.lookup(index_path)
    }

    /// Match for an item that existed before the update (final attributes).
    pub fn disappearing(&self, index_path: IndexPath) -> Option<UpdateMatch> {
        self.disappearing.lookup(index_path)
    }
}
