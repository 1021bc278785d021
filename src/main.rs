//! Drives an [`AttributeResolver`] the way a grid layout would: one batch of
//! structural updates followed by an animated bounds change, logging the
//! start/end attributes the layout would hand to its renderer.
//!
//! Run with: cargo run -- (settings from rune.toml, RUNE_LOG, RUNE_DEMO_COLUMNS)

use anyhow::{Context, Result, ensure};
use rune_collection::{
    AttributeResolver, IndexPath, LayoutAttributes, Rect, Transform2D, UpdateAction, UpdateItem,
    UpdateTarget,
};
use rune_config::{DemoConfig, RuneConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Fixed-size grid: sections stack vertically, items flow left to right.
struct GridLayout {
    config: DemoConfig,
    sections: Vec<usize>,
}

impl GridLayout {
    fn new(config: DemoConfig) -> Self {
        let sections = vec![config.items_per_section; config.sections];
        Self { config, sections }
    }

    fn stride(&self) -> f32 {
        self.config.item_size + self.config.spacing
    }

    fn bounds(&self) -> Rect {
        let rows: usize = self
            .sections
            .iter()
            .map(|n| n.div_ceil(self.config.columns))
            .sum();
        Rect::new(
            0.0,
            0.0,
            self.config.columns as f32 * self.stride(),
            rows as f32 * self.stride(),
        )
    }

    fn attributes(&self, path: IndexPath) -> Option<LayoutAttributes> {
        let count = *self.sections.get(path.section)?;
        if path.item >= count {
            return None;
        }
        let columns = self.config.columns;
        let rows_before: usize = self.sections[..path.section]
            .iter()
            .map(|n| n.div_ceil(columns))
            .sum();
        let row = rows_before + path.item / columns;
        let col = path.item % columns;
        let size = self.config.item_size;
        Some(LayoutAttributes::new(
            path,
            Rect::new(
                col as f32 * self.stride(),
                row as f32 * self.stride(),
                size,
                size,
            ),
        ))
    }

    fn insert_item(&mut self, path: IndexPath) {
        if let Some(count) = self.sections.get_mut(path.section) {
            *count += 1;
        }
    }

    fn delete_section(&mut self, section: usize) {
        if section < self.sections.len() {
            self.sections.remove(section);
        }
    }
}

fn init_logging(config: &RuneConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Fade and shrink cells named by the batch; slide everything during a
/// bounds change so items appear anchored to the old bounds.
fn register_cell_animation(resolver: &mut AttributeResolver) {
    resolver.set_cell_attributes_fn(|attrs, ctx| {
        if ctx.is_structural_update() {
            attrs.alpha = 0.0;
            attrs.transform = match ctx.update_action() {
                Some(UpdateAction::Delete) if ctx.is_section_update() => {
                    Transform2D::scale_uniform(0.2)
                }
                _ => Transform2D::scale_uniform(0.6),
            };
        }
        if let Some(old) = ctx.previous_bounds() {
            attrs.frame = attrs.frame.offset(old.x, old.y);
        }
    });
}

fn log_attributes(label: &str, attrs: &LayoutAttributes) {
    let visible = attrs.visible_frame();
    info!(
        "{label} {}: alpha={:.2} visible=({:.1}, {:.1}, {:.1}x{:.1})",
        attrs.index_path, attrs.alpha, visible.x, visible.y, visible.w, visible.h
    );
}

fn main() -> Result<()> {
    let config = RuneConfig::try_load().context("loading rune.toml")?;
    init_logging(&config)?;
    ensure!(config.demo.columns > 0, "demo.columns must be at least 1");
    ensure!(config.demo.sections > 1, "demo.sections must be at least 2");

    let mut layout = GridLayout::new(config.demo.clone());
    let mut resolver = AttributeResolver::with_config(config.assistant);
    register_cell_animation(&mut resolver);

    // Batch: insert an item at the end of section 0, delete the last section.
    let inserted = IndexPath::new(0, config.demo.items_per_section);
    let deleted_section = config.demo.sections - 1;
    let items = [
        UpdateItem::insert(inserted),
        UpdateItem::delete(UpdateTarget::section(deleted_section)),
    ];

    let disappearing: Vec<LayoutAttributes> = (0..config.demo.items_per_section)
        .filter_map(|item| layout.attributes(IndexPath::new(deleted_section, item)))
        .collect();
    layout.insert_item(inserted);
    layout.delete_section(deleted_section);

    {
        let batch = resolver.begin_updates(items);
        let appearing = layout
            .attributes(inserted)
            .context("inserted item missing from layout")?;
        log_attributes("appear", &batch.initial_attributes_for_item(&appearing, inserted));
        for attrs in &disappearing {
            log_attributes(
                "disappear",
                &batch.final_attributes_for_item(attrs, attrs.index_path),
            );
        }
    }

    // Animated bounds change: the container scrolls down by one row.
    let old_bounds = layout.bounds().offset(0.0, -layout.stride());
    let bounds = resolver.begin_animated_bounds_change(old_bounds);
    for item in 0..config.demo.columns {
        let path = IndexPath::new(0, item);
        if let Some(attrs) = layout.attributes(path) {
            log_attributes("bounds", &bounds.initial_attributes_for_item(&attrs, path));
        }
    }
    bounds.finish();

    info!(
        preparing = resolver.is_preparing_updates(),
        animating_bounds = resolver.is_animating_bounds_change(),
        "done"
    );
    Ok(())
}
