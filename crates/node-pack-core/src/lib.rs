//! Node Pack Core
//!
//! Pure logic behind the node pack sidebar. Nothing here touches a UI;
//! the host application is reached only through the traits in [`host`].
//!
//! # Pipeline
//!
//! ```text
//! NodeTypeRegistry (host)
//!        │
//!        ▼
//! CategoryIndex ──────────────► Summary (count + sorted listing)
//!        │
//!        ▼  sorted node types of the selected category
//! (host creates + measures nodes)
//!        │
//!        ▼
//! GridLayout (column packing)
//!        │
//!        ▼
//! CameraFrame (center the cluster on the canvas)
//! ```

pub mod camera;
pub mod category_index;
pub mod error;
pub mod host;
pub mod layout;
pub mod summary;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use camera::{content_bounds, fit_camera, CameraFrame, FIT_ZOOM};
pub use category_index::{filter_categories, CategoryIndex};
pub use error::LoadFault;
pub use host::{Canvas, Graph, NodeInstance, NodeTypeRegistry};
pub use layout::{
    effective_columns, grid_layout, ColumnMetrics, GridLayout, LayoutSettings, DEFAULT_COLUMNS,
    DEFAULT_PADDING, MAX_COLUMNS, MIN_COLUMNS,
};
pub use summary::{summarize, Summary};
pub use types::{NodeHandle, NodeTypeId, NodeTypeInfo};
