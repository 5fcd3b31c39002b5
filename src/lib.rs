//! HTTP relay for Financial Modeling Prep annual income statements
//!
//! The relay fetches one company's annual income statements on every request
//! and returns them filtered by year, revenue and net income ranges, and
//! optionally sorted by any field.
//!
//! # Quick Start
//!
//! ```no_run
//! use fmp_relay::FinancialModelingPrep;
//! use fmp_relay::pipeline::{FilterParams, process};
//! use fmp_relay::request::common::SortOrder;
//! use fmp_relay::rest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FinancialModelingPrep::default().with_key("your_api_key");
//!     let records = rest::income_statement(&client, "AAPL").records().get().await?;
//!
//!     let params = FilterParams::default()
//!         .year_start(2018)
//!         .sort_by("netIncome", SortOrder::Desc);
//!     for record in process(records, &params)? {
//!         println!("{:?} {}", record.get("date"), record.net_income());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Serving
//!
//! [`server::router`] builds the axum router exposing `GET /data`; the
//! `fmp-relay` binary wires it to [`config::Config::from_env`].
//!
//! # Features
//!
//! - **`reqwest`** (default) - Uses [`reqwest`](https://docs.rs/reqwest) with rustls as the HTTP client.
//!
//! - **`hyper`** - Alternative HTTP client using [`hyper`](https://docs.rs/hyper) directly.
//!   To use hyper instead: `default-features = false, features = ["hyper"]`.

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod request;
pub mod response;
pub mod rest;
pub mod server;
pub mod tracing_init;

pub mod execute;
pub mod processor;

pub use error::{Error, ErrorKind, Result};
pub use record::Record;
pub use request::Request;
pub use response::Response;

/// The Financial Modeling Prep client with the default HTTP client.
///
/// - When `reqwest` feature is enabled (default): uses `reqwest::Client`
/// - When only `hyper` is enabled: uses `HyperClient`
/// - Otherwise: use `client::FinancialModelingPrep<YourClient>` directly
#[cfg(feature = "reqwest")]
pub type FinancialModelingPrep = client::FinancialModelingPrep<reqwest::Client>;

/// The Financial Modeling Prep client with the default HTTP client.
///
/// - When `reqwest` feature is enabled (default): uses `reqwest::Client`
/// - When only `hyper` is enabled: uses `HyperClient`
/// - Otherwise: use `client::FinancialModelingPrep<YourClient>` directly
#[cfg(all(feature = "hyper", not(feature = "reqwest")))]
pub type FinancialModelingPrep = client::FinancialModelingPrep<request::HyperClient>;

// When neither reqwest nor hyper is enabled, re-export the generic client
#[cfg(not(any(feature = "reqwest", feature = "hyper")))]
pub use client::FinancialModelingPrep;
