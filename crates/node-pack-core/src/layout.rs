//! Grid layout - column packing for freshly loaded nodes
//!
//! Nodes are split into consecutive runs, one run per column:
//!
//! ```text
//!  pad  col 0 (w0)  pad  col 1 (w1)  pad ...
//!  ┌────────────┐      ┌────────────┐
//!  │  node 0    │      │  node 3    │   row 0
//!  └────────────┘      └────────────┘
//!  ┌────────────┐      ┌────────────┐
//!  │  node 1    │      │  node 4    │   row 1
//!  └────────────┘      └────────────┘
//!  ┌────────────┐
//!  │  node 2    │                       row 2
//!  └────────────┘
//! ```
//!
//! Each column is as wide as its widest node and nodes are centered
//! horizontally inside it. Rows are spaced by the tallest node of *all*
//! columns, so every row index shares one y coordinate across columns.
//! This is not a bin packer; shorter columns keep the global row pitch.

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::camera::FIT_ZOOM;

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// Column count used when the caller asks for none (or a non-positive count)
pub const DEFAULT_COLUMNS: u32 = 3;

/// Column slider range
pub const MIN_COLUMNS: u32 = 1;
pub const MAX_COLUMNS: u32 = 20;

/// Gap around and between columns and rows
pub const DEFAULT_PADDING: f32 = 50.0;

// =============================================================================
// SETTINGS
// =============================================================================

/// Tunables for a load: spacing, initial column count and camera zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub padding: f32,
    /// Initial value of the column slider
    pub default_columns: u32,
    /// Zoom applied after the camera is centered on the loaded nodes
    pub zoom: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            default_columns: DEFAULT_COLUMNS,
            zoom: FIT_ZOOM,
        }
    }
}

// =============================================================================
// COLUMN COUNT
// =============================================================================

/// Number of columns actually used for `node_count` nodes.
///
/// A missing or non-positive request falls back to [`DEFAULT_COLUMNS`]; the
/// result is then clamped to `[1, node_count]` (and is 1 for no nodes).
pub fn effective_columns(requested: Option<i64>, node_count: usize) -> usize {
    let requested = match requested {
        Some(count) if count > 0 => usize::try_from(count).unwrap_or(usize::MAX),
        _ => DEFAULT_COLUMNS as usize,
    };
    requested.min(node_count).max(1)
}

// =============================================================================
// GRID LAYOUT
// =============================================================================

/// Largest node extent per column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetrics {
    pub max_width: f32,
    pub max_height: f32,
}

/// Result of one layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Effective column count
    pub columns: usize,
    /// Nodes per full column (the last column may hold fewer)
    pub nodes_per_column: usize,
    pub metrics: Vec<ColumnMetrics>,
    pub padding: f32,
    /// One position per input size, same order as the input
    pub positions: Vec<Pos2>,
    /// Union of all node rectangles; `None` when there are no nodes
    pub bounds: Option<Rect>,
}

impl GridLayout {
    /// Lay out nodes of the given sizes.
    ///
    /// Never fails: an empty input produces an empty layout.
    pub fn compute(sizes: &[Vec2], requested_columns: Option<i64>, padding: f32) -> Self {
        let node_count = sizes.len();
        let columns = effective_columns(requested_columns, node_count);
        let nodes_per_column = node_count.div_ceil(columns);

        let mut metrics = vec![ColumnMetrics::default(); columns];
        for (index, size) in sizes.iter().enumerate() {
            let column = index / nodes_per_column;
            // Out-of-range columns don't contribute to the metrics
            if let Some(m) = metrics.get_mut(column) {
                m.max_width = m.max_width.max(size.x);
                m.max_height = m.max_height.max(size.y);
            }
        }

        let row_height = metrics.iter().map(|m| m.max_height).fold(0.0, f32::max);

        // origins[k] = left edge of column k; the extra slot after the last
        // column is where an out-of-range node lands.
        let mut origins = Vec::with_capacity(columns + 1);
        let mut x = padding;
        origins.push(x);
        for m in &metrics {
            x += m.max_width + padding;
            origins.push(x);
        }

        let positions: Vec<Pos2> = sizes
            .iter()
            .enumerate()
            .map(|(index, size)| {
                let column = index / nodes_per_column;
                let row = index % nodes_per_column;
                let origin = origins.get(column).copied().unwrap_or(x);
                let column_width = metrics.get(column).map_or(0.0, |m| m.max_width);

                Pos2::new(
                    origin + (column_width - size.x) / 2.0,
                    padding + row as f32 * (row_height + padding),
                )
            })
            .collect();

        let bounds = positions
            .iter()
            .zip(sizes)
            .map(|(pos, size)| Rect::from_min_size(*pos, *size))
            .reduce(|acc, rect| acc.union(rect));

        Self {
            columns,
            nodes_per_column,
            metrics,
            padding,
            positions,
            bounds,
        }
    }

    /// (column, row) of the node at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        if self.nodes_per_column == 0 {
            return (0, 0);
        }
        (index / self.nodes_per_column, index % self.nodes_per_column)
    }

    /// Left edge of a column
    pub fn column_origin(&self, column: usize) -> f32 {
        self.padding
            + self
                .metrics
                .iter()
                .take(column)
                .map(|m| m.max_width + self.padding)
                .sum::<f32>()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Positions only; see [`GridLayout::compute`].
pub fn grid_layout(sizes: &[Vec2], requested_columns: Option<i64>, padding: f32) -> Vec<Pos2> {
    GridLayout::compute(sizes, requested_columns, padding).positions
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-2;

    fn arb_sizes() -> impl Strategy<Value = Vec<Vec2>> {
        prop::collection::vec((0.0f32..400.0, 0.0f32..300.0), 0..40)
            .prop_map(|dims| dims.into_iter().map(|(w, h)| Vec2::new(w, h)).collect())
    }

    proptest! {
        #[test]
        fn columns_are_clamped(requested in -5i64..40, n in 1usize..60) {
            let fallback = if requested > 0 { requested as usize } else { 3 };
            prop_assert_eq!(effective_columns(Some(requested), n), fallback.min(n).max(1));
        }

        #[test]
        fn one_position_per_node(sizes in arb_sizes(), requested in -3i64..25) {
            let positions = grid_layout(&sizes, Some(requested), 50.0);
            prop_assert_eq!(positions.len(), sizes.len());
        }

        #[test]
        fn nodes_are_centered_in_their_column(sizes in arb_sizes(), requested in 1i64..25) {
            let layout = GridLayout::compute(&sizes, Some(requested), 50.0);
            for (index, (pos, size)) in layout.positions.iter().zip(&sizes).enumerate() {
                let (column, _) = layout.cell(index);
                let width = layout.metrics[column].max_width;
                let offset = pos.x - layout.column_origin(column);
                prop_assert!((offset - (width - size.x) / 2.0).abs() < EPSILON);
            }
        }

        #[test]
        fn rows_share_y_across_columns(sizes in arb_sizes(), requested in 1i64..25) {
            let layout = GridLayout::compute(&sizes, Some(requested), 50.0);
            for a in 0..sizes.len() {
                for b in 0..sizes.len() {
                    if layout.cell(a).1 == layout.cell(b).1 {
                        prop_assert_eq!(layout.positions[a].y, layout.positions[b].y);
                    }
                }
            }
        }

        #[test]
        fn every_column_index_is_in_range(sizes in arb_sizes(), requested in -3i64..25) {
            let layout = GridLayout::compute(&sizes, Some(requested), 50.0);
            for index in 0..sizes.len() {
                prop_assert!(layout.cell(index).0 < layout.columns);
            }
        }
    }
}
