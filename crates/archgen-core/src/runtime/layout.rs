// archgen-core/src/runtime/layout.rs
// ============================================================================
// Module: ArchGen Layout Engine
// Description: Banded zone layout with ceil-division node grids.
// Purpose: Compute absolute, non-overlapping geometry for every zone and
//          node in a closure; renderers consume the result verbatim.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The template is fixed, the heights are not. Bands top to bottom:
//! consumers, then the platform wrapper with the outside-left column
//! (external identity above sources) beside it, then external logging and
//! alerting side by side underneath. Inside the wrapper three columns:
//! connectivity and governance on the left, serving above the pipeline
//! compound band in the center, orchestration and observability on the
//! right. The pipeline band nests medallion (always one horizontal row),
//! processing, landing, and ingestion.
//!
//! Every zone sizes itself from its member count via ceil division, columns
//! stack their zones with gaps, and wrappers grow to their tallest column.
//! Siblings are laid out on disjoint intervals, so rectangles cannot
//! overlap regardless of selection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::Catalog;
use crate::core::CatalogEntry;
use crate::core::CatalogOverlay;
use crate::core::DiagramNode;
use crate::core::Rect;
use crate::core::Selection;
use crate::core::ZoneId;
use crate::core::ZoneKind;
use crate::core::ZoneRect;

// ============================================================================
// SECTION: Layout Config
// ============================================================================

/// Numeric layout knobs. All values are canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LayoutConfig {
    /// Node box width.
    pub node_w: u32,
    /// Node box height.
    pub node_h: u32,
    /// Gap between adjacent node cells.
    pub cell_gap: u32,
    /// Inner padding between a zone border and its content.
    pub zone_pad: u32,
    /// Height reserved for the zone label strip.
    pub label_h: u32,
    /// Vertical gap between stacked zones in a column.
    pub zone_gap: u32,
    /// Horizontal gap between columns and side-by-side zones.
    pub column_gap: u32,
    /// Canvas margin.
    pub margin: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_w: 120,
            node_h: 70,
            cell_gap: 16,
            zone_pad: 16,
            label_h: 26,
            zone_gap: 24,
            column_gap: 28,
            margin: 30,
        }
    }
}

/// Column cap per zone. The medallion row never wraps.
const fn zone_max_cols(kind: ZoneKind) -> u32 {
    match kind {
        ZoneKind::Medallion => u32::MAX,
        ZoneKind::ExtIdentity | ZoneKind::Connectivity | ZoneKind::Orchestration => 1,
        ZoneKind::Sources
        | ZoneKind::Governance
        | ZoneKind::Landing
        | ZoneKind::Observability
        | ZoneKind::ExtLogging => 2,
        ZoneKind::Serving | ZoneKind::Processing | ZoneKind::Ingestion | ZoneKind::ExtAlerting => 3,
        ZoneKind::Consumers => 4,
    }
}

// ============================================================================
// SECTION: Layout Output
// ============================================================================

/// Zones in paint order plus placed nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Zone rectangles, parents before children.
    pub zones: Vec<ZoneRect>,
    /// Placed nodes.
    pub nodes: Vec<DiagramNode>,
}

// ============================================================================
// SECTION: Layout Engine
// ============================================================================

/// Computes geometry for a closure.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
}

impl LayoutEngine {
    /// Creates an engine with the given config.
    #[must_use]
    pub fn new(cfg: LayoutConfig) -> Self {
        Self {
            cfg,
        }
    }

    /// Lays out the closure. Ids missing from both the catalog and the
    /// overlay are skipped.
    #[must_use]
    pub fn layout(&self, catalog: &Catalog, overlay: &CatalogOverlay, closure: &Selection) -> Layout {
        let members = self.collect_members(catalog, overlay, closure);
        let cfg = &self.cfg;

        // Natural sizes per populated zone.
        let size = |kind: ZoneKind| -> Option<(u32, u32)> {
            let n = members.count(kind);
            (n > 0).then(|| self.zone_size(kind, n))
        };

        // Column widths. A column's width is the widest natural width of
        // its populated zones; fully empty columns vanish.
        let left_outside_w = column_width(&[size(ZoneKind::ExtIdentity), size(ZoneKind::Sources)]);
        let col_a_w = column_width(&[size(ZoneKind::Connectivity), size(ZoneKind::Governance)]);
        let col_c_w = column_width(&[size(ZoneKind::Orchestration), size(ZoneKind::Observability)]);

        let pipeline_inner_w = column_width(&[
            size(ZoneKind::Medallion),
            size(ZoneKind::Processing),
            size(ZoneKind::Landing),
            size(ZoneKind::Ingestion),
        ]);
        let pipeline_w = if pipeline_inner_w == 0 {
            0
        } else {
            pipeline_inner_w + 2 * cfg.zone_pad
        };
        let col_b_w = column_width(&[size(ZoneKind::Serving), Some((pipeline_w, 0))]);

        let mut zones = Vec::new();
        let mut nodes = Vec::new();

        // Consumers band sits above everything else.
        let mut cursor_y = cfg.margin;
        let platform_x = cfg.margin + left_outside_w + gap_if(left_outside_w > 0, cfg.column_gap);
        if let Some((w, h)) = size(ZoneKind::Consumers) {
            let rect = Rect::new(platform_x + cfg.zone_pad + col_a_w + cfg.column_gap, cursor_y, w, h);
            self.emit_zone(&mut zones, &mut nodes, &members, ZoneKind::Consumers, rect, None, 0, true);
            cursor_y = rect.bottom() + cfg.zone_gap;
        }

        // Platform wrapper geometry depends on its tallest inner column.
        let col_a_h = self.column_height(&[
            size(ZoneKind::Connectivity).map(|s| s.1),
            size(ZoneKind::Governance).map(|s| s.1),
        ]);
        let col_c_h = self.column_height(&[
            size(ZoneKind::Orchestration).map(|s| s.1),
            size(ZoneKind::Observability).map(|s| s.1),
        ]);
        let pipeline_h = self.pipeline_height(&members);
        let col_b_h = self.column_height(&[
            size(ZoneKind::Serving).map(|s| s.1),
            (pipeline_h > 0).then_some(pipeline_h),
        ]);
        let inner_h = col_a_h.max(col_b_h).max(col_c_h);

        let platform_w = 2 * cfg.zone_pad
            + col_a_w
            + gap_if(col_a_w > 0, cfg.column_gap)
            + col_b_w
            + gap_if(col_c_w > 0, cfg.column_gap)
            + col_c_w;
        let platform_h = cfg.label_h + 2 * cfg.zone_pad + inner_h;
        let platform = Rect::new(platform_x, cursor_y, platform_w, platform_h);
        let platform_id = ZoneId::from("platform");

        // Outside-left column aligns with the wrapper top.
        let mut left_y = platform.y;
        if let Some((w, h)) = size(ZoneKind::ExtIdentity) {
            let rect = Rect::new(cfg.margin, left_y, w.max(left_outside_w), h);
            self.emit_zone(&mut zones, &mut nodes, &members, ZoneKind::ExtIdentity, rect, None, 0, true);
            left_y = rect.bottom() + cfg.zone_gap;
        }
        if let Some((w, h)) = size(ZoneKind::Sources) {
            let rect = Rect::new(cfg.margin, left_y, w.max(left_outside_w), h);
            self.emit_zone(&mut zones, &mut nodes, &members, ZoneKind::Sources, rect, None, 0, true);
        }

        zones.push(ZoneRect {
            id: platform_id.clone(),
            label: "GOOGLE CLOUD PLATFORM".to_string(),
            rect: platform,
            parent: None,
            z_index: 1,
            dashed: false,
            filled: true,
        });

        // Inner columns.
        let inner_y = platform.y + cfg.label_h + cfg.zone_pad;
        let col_a_x = platform.x + cfg.zone_pad;
        let col_b_x = col_a_x + col_a_w + gap_if(col_a_w > 0, cfg.column_gap);
        let col_c_x = col_b_x + col_b_w + gap_if(col_c_w > 0, cfg.column_gap);

        let mut y = inner_y;
        for kind in [ZoneKind::Connectivity, ZoneKind::Governance] {
            if let Some((_, h)) = size(kind) {
                let rect = Rect::new(col_a_x, y, col_a_w, h);
                self.emit_zone(&mut zones, &mut nodes, &members, kind, rect, Some(&platform_id), 2, true);
                y = rect.bottom() + cfg.zone_gap;
            }
        }

        let mut y = inner_y;
        if let Some((_, h)) = size(ZoneKind::Serving) {
            let rect = Rect::new(col_b_x, y, col_b_w, h);
            self.emit_zone(&mut zones, &mut nodes, &members, ZoneKind::Serving, rect, Some(&platform_id), 2, true);
            y = rect.bottom() + cfg.zone_gap;
        }
        if pipeline_h > 0 {
            let pipeline = Rect::new(col_b_x, y, col_b_w, pipeline_h);
            let pipeline_id = ZoneId::from("data-pipeline");
            zones.push(ZoneRect {
                id: pipeline_id.clone(),
                label: "DATA PIPELINE".to_string(),
                rect: pipeline,
                parent: Some(platform_id.clone()),
                z_index: 2,
                dashed: true,
                filled: false,
            });
            let child_x = pipeline.x + cfg.zone_pad;
            let child_w = pipeline.w - 2 * cfg.zone_pad;
            let mut child_y = pipeline.y + cfg.label_h + cfg.zone_pad;
            for kind in [ZoneKind::Medallion, ZoneKind::Processing, ZoneKind::Landing, ZoneKind::Ingestion] {
                if let Some((_, h)) = size(kind) {
                    let rect = Rect::new(child_x, child_y, child_w, h);
                    self.emit_zone(&mut zones, &mut nodes, &members, kind, rect, Some(&pipeline_id), 3, true);
                    child_y = rect.bottom() + cfg.zone_gap;
                }
            }
        }

        let mut y = inner_y;
        for kind in [ZoneKind::Orchestration, ZoneKind::Observability] {
            if let Some((_, h)) = size(kind) {
                let rect = Rect::new(col_c_x, y, col_c_w, h);
                self.emit_zone(&mut zones, &mut nodes, &members, kind, rect, Some(&platform_id), 2, true);
                y = rect.bottom() + cfg.zone_gap;
            }
        }

        // External logging and alerting sit side by side under the wrapper.
        let below_y = platform.bottom() + cfg.zone_gap;
        let mut x = platform.x;
        for kind in [ZoneKind::ExtLogging, ZoneKind::ExtAlerting] {
            if let Some((w, h)) = size(kind) {
                let rect = Rect::new(x, below_y, w, h);
                self.emit_zone(&mut zones, &mut nodes, &members, kind, rect, None, 0, true);
                x = rect.right() + cfg.column_gap;
            }
        }

        Layout {
            zones,
            nodes,
        }
    }

    /// Gathers closure members per zone, sorted by priority then id.
    fn collect_members<'a>(
        &self,
        catalog: &'a Catalog,
        overlay: &'a CatalogOverlay,
        closure: &Selection,
    ) -> Members<'a> {
        let mut members = Members::default();
        for id in &closure.nodes {
            if let Some(entry) = overlay.resolve(catalog, id) {
                members.push(entry);
            }
        }
        members.sort();
        members
    }

    /// Natural zone size for `n` members.
    fn zone_size(&self, kind: ZoneKind, n: u32) -> (u32, u32) {
        let cfg = &self.cfg;
        let cols = n.min(zone_max_cols(kind));
        let rows = n.div_ceil(cols);
        let w = 2 * cfg.zone_pad + cols * cfg.node_w + (cols - 1) * cfg.cell_gap;
        let h = cfg.label_h + 2 * cfg.zone_pad + rows * cfg.node_h + (rows - 1) * cfg.cell_gap;
        (w, h)
    }

    /// Stacked height of populated zones plus gaps between adjacent pairs.
    fn column_height(&self, heights: &[Option<u32>]) -> u32 {
        let mut total = 0u32;
        let mut count = 0u32;
        for h in heights.iter().flatten() {
            total += h;
            count += 1;
        }
        total + self.cfg.zone_gap * count.saturating_sub(1)
    }

    /// Height of the pipeline compound band, zero when empty.
    fn pipeline_height(&self, members: &Members<'_>) -> u32 {
        let heights: Vec<Option<u32>> =
            [ZoneKind::Medallion, ZoneKind::Processing, ZoneKind::Landing, ZoneKind::Ingestion]
                .into_iter()
                .map(|kind| {
                    let n = members.count(kind);
                    (n > 0).then(|| self.zone_size(kind, n).1)
                })
                .collect();
        if heights.iter().all(Option::is_none) {
            return 0;
        }
        self.cfg.label_h + 2 * self.cfg.zone_pad + self.column_height(&heights)
    }

    /// Emits one zone rect and its node grid, rows centered.
    #[allow(clippy::too_many_arguments, reason = "Internal emit helper shared by every band.")]
    fn emit_zone(
        &self,
        zones: &mut Vec<ZoneRect>,
        nodes: &mut Vec<DiagramNode>,
        members: &Members<'_>,
        kind: ZoneKind,
        rect: Rect,
        parent: Option<&ZoneId>,
        z_index: u8,
        dashed: bool,
    ) {
        let cfg = &self.cfg;
        let zone_id = ZoneId::from(kind.id());
        zones.push(ZoneRect {
            id: zone_id.clone(),
            label: kind.label().to_string(),
            rect,
            parent: parent.cloned(),
            z_index,
            dashed,
            filled: false,
        });

        let entries = members.of(kind);
        let n = u32::try_from(entries.len()).unwrap_or(u32::MAX);
        if n == 0 {
            return;
        }
        let cols = n.min(zone_max_cols(kind));
        for (index, entry) in entries.iter().enumerate() {
            let i = u32::try_from(index).unwrap_or(u32::MAX);
            let row = i / cols;
            let col = i % cols;
            let row_n = cols.min(n - row * cols);
            let row_w = row_n * cfg.node_w + (row_n - 1) * cfg.cell_gap;
            let start_x = rect.x + (rect.w.saturating_sub(row_w)) / 2;
            let node_rect = Rect::new(
                start_x + col * (cfg.node_w + cfg.cell_gap),
                rect.y + cfg.label_h + cfg.zone_pad + row * (cfg.node_h + cfg.cell_gap),
                cfg.node_w,
                cfg.node_h,
            );
            nodes.push(DiagramNode {
                id: entry.id.clone(),
                label: entry.display_name.clone(),
                subtitle: entry.subtitle.clone(),
                category: entry.category,
                zone: zone_id.clone(),
                rect: node_rect,
            });
        }
    }
}

/// Width of a column as the widest populated zone, zero when empty.
fn column_width(sizes: &[Option<(u32, u32)>]) -> u32 {
    sizes.iter().flatten().map(|(w, _)| *w).max().unwrap_or(0)
}

const fn gap_if(present: bool, gap: u32) -> u32 {
    if present { gap } else { 0 }
}

// ============================================================================
// SECTION: Zone Membership
// ============================================================================

/// Closure members bucketed by zone.
#[derive(Debug, Default)]
struct Members<'a> {
    buckets: Vec<(ZoneKind, Vec<&'a CatalogEntry>)>,
}

impl<'a> Members<'a> {
    fn push(&mut self, entry: &'a CatalogEntry) {
        if let Some((_, bucket)) = self.buckets.iter_mut().find(|(kind, _)| *kind == entry.zone) {
            bucket.push(entry);
        } else {
            self.buckets.push((entry.zone, vec![entry]));
        }
    }

    fn sort(&mut self) {
        for (_, bucket) in &mut self.buckets {
            bucket.sort_by(|a, b| a.sort_priority.cmp(&b.sort_priority).then_with(|| a.id.cmp(&b.id)));
        }
    }

    fn of(&self, kind: ZoneKind) -> &[&'a CatalogEntry] {
        self.buckets
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(&[], |(_, bucket)| bucket.as_slice())
    }

    fn count(&self, kind: ZoneKind) -> u32 {
        u32::try_from(self.of(kind).len()).unwrap_or(u32::MAX)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, reason = "Panic-based assertions are permitted in tests.")]

    use crate::core::NodeId;
    use crate::runtime::closure::ClosureExpander;

    use super::*;

    fn laid_out(prompt_sources: &[&str]) -> Layout {
        let mut sel = Selection::new();
        for id in prompt_sources {
            sel.add_source(NodeId::from(*id));
        }
        ClosureExpander::default().expand(&mut sel);
        LayoutEngine::default().layout(&Catalog::builtin(), &CatalogOverlay::new(), &sel)
    }

    #[test]
    fn test_sibling_zones_never_overlap() {
        let layout = laid_out(&["oracle_db", "kafka_stream", "salesforce"]);
        for (i, a) in layout.zones.iter().enumerate() {
            for b in layout.zones.iter().skip(i + 1) {
                let nested = a.rect.contains_rect(&b.rect) || b.rect.contains_rect(&a.rect);
                assert!(
                    nested || !a.rect.overlaps(&b.rect),
                    "zones {} and {} overlap without nesting",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_nodes_stay_inside_their_zone() {
        let layout = laid_out(&["oracle_db"]);
        for node in &layout.nodes {
            let zone = layout
                .zones
                .iter()
                .find(|z| z.id == node.zone)
                .unwrap_or_else(|| panic!("zone {} missing", node.zone));
            assert!(zone.rect.contains_rect(&node.rect), "node {} escapes {}", node.id, zone.id);
        }
    }

    #[test]
    fn test_medallion_is_a_single_row() {
        let layout = laid_out(&["oracle_db"]);
        let ys: Vec<u32> = layout
            .nodes
            .iter()
            .filter(|n| n.zone.as_str() == "medallion")
            .map(|n| n.rect.y)
            .collect();
        assert_eq!(ys.len(), 3);
        assert!(ys.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn test_empty_zones_are_omitted() {
        let layout = laid_out(&["oracle_db"]);
        assert!(layout.zones.iter().all(|z| {
            z.id.as_str() == "platform"
                || z.id.as_str() == "data-pipeline"
                || layout.nodes.iter().any(|n| n.zone == z.id)
        }));
    }

    #[test]
    fn test_extra_consumer_adds_one_row_of_height() {
        let base = laid_out(&["oracle_db"]);
        let mut sel = Selection::new();
        sel.add_source(NodeId::from("oracle_db"));
        for id in ["executives", "data_scientists", "downstream_sys"] {
            sel.add(NodeId::from(id));
        }
        ClosureExpander::default().expand(&mut sel);
        let grown = LayoutEngine::default().layout(&Catalog::builtin(), &CatalogOverlay::new(), &sel);

        let h = |layout: &Layout| layout.zone_by("consumers").map(|z| z.rect.h);
        // Four consumers still fit one row under the default column cap.
        assert_eq!(h(&base), h(&grown));
        let base_platform = base.zone_by("platform").map(|z| z.rect.h);
        let grown_platform = grown.zone_by("platform").map(|z| z.rect.h);
        assert_eq!(base_platform, grown_platform);
    }

    impl Layout {
        fn zone_by(&self, id: &str) -> Option<&ZoneRect> {
            self.zones.iter().find(|z| z.id.as_str() == id)
        }
    }
}
