//! Cut-list engine for configurable door leaves.
//!
//! A [`DoorConfig`] is expanded into linear frame members and rectangular
//! sheet pieces, which are then packed onto stock bars (first-fit
//! decreasing) and stock sheets (per-thickness shelf packing). The result is
//! a [`MaterialSummary`] with layouts, waste and approximate mass figures.
//!
//! ```no_run
//! use cutlist_core::{compute_summary, DoorConfig, StockSettings};
//!
//! let config = DoorConfig {
//!     width: 900.0,
//!     height: 2000.0,
//!     thickness: 40.0,
//!     prism_count: 1,
//!     layers: Some(vec![6.0, 4.0]),
//!     top_panel: None,
//! };
//! let summary = compute_summary(&config, &StockSettings::default());
//! println!("{} bars, {} sheets", summary.prism.bars_needed, summary.mdf.sheets_needed);
//! ```

pub mod optimizer;
pub mod requirements;
pub mod settings;
pub mod types;

pub use optimizer::{compute_from_value, compute_summary, parse_config, CutlistEngine};
pub use settings::StockSettings;
pub use types::*;
