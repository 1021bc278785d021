//! Attribute resolution for items appearing in or disappearing from an
//! animated collection layout.
//!
//! A grid or list layout hands its steady-state [`LayoutAttributes`] to an
//! [`AttributeResolver`] while a batch of structural updates (or an animated
//! bounds change) is in flight. The resolver copies those attributes, runs the
//! single registered mutation closure with an [`UpdateContext`] describing the
//! transition, and returns the mutated copy.
//!
//! # Architecture
//!
//! ```text
//! Layout (driver)
//!   ├── prepare_for_updates / finalize_updates            (structural bracket)
//!   ├── prepare_for_animated_bounds_change / finalize_..  (bounds bracket)
//!   └── initial_attributes_for_item / final_attributes_for_item
//!
//! AttributeResolver
//!   ├── PendingUpdates (index over the open batch)
//!   ├── previous bounds (open bounds change)
//!   └── CellAttributesFn (last registration wins)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use rune_collection::{AttributeResolver, IndexPath, UpdateItem};
//!
//! let mut resolver = AttributeResolver::new();
//! resolver.set_cell_attributes_fn(|attrs, ctx| {
//!     if !ctx.is_final_attributes() && ctx.is_structural_update() {
//!         attrs.alpha = 0.0;
//!     }
//! });
//!
//! let batch = resolver.begin_updates([UpdateItem::insert(IndexPath::new(0, 3))]);
//! let start = batch.initial_attributes_for_item(&baseline, IndexPath::new(0, 3));
//! // `finalize_updates` runs when `batch` drops.
//! ```

pub mod attributes;
pub mod context;
pub mod geometry;
pub mod index_path;
pub mod resolver;
pub mod transform;
pub mod update;

pub use attributes::LayoutAttributes;
pub use context::UpdateContext;
pub use geometry::{Point, Rect, Size};
pub use index_path::IndexPath;
pub use resolver::{AttributeResolver, BoundsChange, CellAttributesFn, UpdateBatch};
pub use transform::Transform2D;
pub use update::{UpdateAction, UpdateItem, UpdateTarget};

pub use rune_config::AssistantConfig;
