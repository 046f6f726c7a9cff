//! Node Pack Loader
//!
//! Demo host and tooling around the node pack sidebar:
//!
//! - [`config`] - `node_pack_loader.yaml` loading
//! - [`registry`] - YAML-backed node type registry
//! - [`host`] - in-memory graph and canvas
//! - [`headless`] - run a load to completion without a window
//! - [`app`] - eframe app wiring sidebar and canvas together
//!
//! The layout and sidebar logic live in `node-pack-core` and
//! `node-pack-sidebar`.

pub mod app;
pub mod config;
pub mod headless;
pub mod host;
pub mod registry;

pub use app::NodePackApp;
pub use config::{ConfigError, ConfigLoader, LoaderConfig, SettleConfig, WindowConfig};
pub use headless::run_load;
pub use host::{DemoCanvas, DemoGraph};
pub use registry::{DemoNode, RegistryEntry, RegistryError, YamlRegistry};
