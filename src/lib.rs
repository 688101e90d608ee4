#![allow(missing_docs)]
//! elizaOS eAIP Plugin
//!
//! Aeronautical chart (eAIP) query plugin: organizes and indexes
//! per-airport chart PDFs on disk and serves chart listings and rendered
//! chart images by ICAO code.
//!
//! # Example
//!
//! ```rust,no_run
//! use elizaos_plugin_eaip::{EaipConfig, EaipPlugin, EaipResponse};
//!
//! # async fn example() {
//! let config = EaipConfig::from_env();
//! let mut plugin = EaipPlugin::new(config);
//!
//! match plugin.handle_command("ZBAA 36L", false).await {
//!     EaipResponse::Listing { entries, .. } => {
//!         for entry in &entries {
//!             println!("{}. [{}] {}", entry.id, entry.sort, entry.name);
//!         }
//!     }
//!     EaipResponse::Text(message) => println!("{}", message),
//!     EaipResponse::Image(bytes) => println!("{} byte chart image", bytes.len()),
//! }
//! # }
//! ```

pub mod actions;
pub mod command;
pub mod error;
pub mod merge;
pub mod plugin;
pub mod processor;
pub mod providers;
pub mod render;
pub mod service;
pub mod types;

pub use command::{EaipCommand, USAGE};
pub use error::{EaipError, Result};
pub use merge::merge_pdf_folder;
pub use plugin::{create_plugin, get_eaip_plugin, EaipPlugin, EaipResponse};
pub use processor::{ChartProcessor, UpdateAction, CHART_TYPES, SPECIAL_CHART_TYPES};
pub use render::{ChartRenderer, DEFAULT_ZOOM};
pub use service::EaipService;
pub use types::*;

#[allow(unused_imports)]
use anyhow::Result as AnyhowResult;
