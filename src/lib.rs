//! scb_turnout
//!
//! A small Rust library for retrieving election turnout from Statistics Sweden
//! (SCB) and finding, for every election year, the region(s) with the highest
//! turnout. Pairs with the `scb-turnout` CLI.
//!
//! ### Features
//! - Fetch table metadata and data from the SCB PxWeb API
//! - Aggregate raw records into a year -> region -> value table, treating `".."` as missing
//! - Per-year maximum with ties, excluding the nationwide aggregate
//! - Console report and CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use scb_turnout::{Client, pipeline, report::ConsoleReport};
//!
//! let client = Client::default();
//! let winners = pipeline::yearly_winners(&client, "ME0104B8", "Riket")?;
//! print!("{}", ConsoleReport(&winners));
//! scb_turnout::storage::save_csv(&winners, "turnout.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod storage;

pub use aggregate::{Aggregate, RegionYearValues};
pub use api::{Client, DataSource};
pub use error::ModelError;
pub use models::{ElectionKind, RawRecord};
pub use stats::{YearWinner, YearlyWinners};
