//! expense_chart
//!
//! A small Rust library for turning personal expense data into a signed bar
//! chart. Pairs with the `expense-chart` CLI.
//!
//! ### Features
//! - Read two-column tables, bank-account CSV exports, or the expense backend's JSON API
//! - Compare two periods per category (current minus baseline)
//! - Render a bar chart with the zero line at half height: gains green, losses red
//! - Output as inline SVG, standalone HTML report, or PNG/SVG image via `plotters`
//!
//! ### Example
//! ```no_run
//! use expense_chart::chart::{ChartOptions, render_chart};
//! use expense_chart::svg::SvgDocument;
//! use expense_chart::Dataset;
//!
//! let data = Dataset::try_from(vec![
//!     ("Food".to_string(), 10.0),
//!     ("Rent".to_string(), -20.0),
//!     ("Travel".to_string(), 5.0),
//! ])?;
//! let opts = ChartOptions::default();
//! let mut svg = SvgDocument::new(opts.width, opts.height);
//! render_chart(&mut svg, &data, &opts)?;
//! svg.save("chart.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod acquire;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod plotters_surface;
pub mod report;
pub mod stats;
pub mod storage;
pub mod surface;
pub mod svg;

pub use chart::{ChartOptions, render_chart};
pub use error::{ChartError, DataError, FetchError, SurfaceError};
pub use models::{CostItem, Dataset, Expense};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
