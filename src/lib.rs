//! uscout - Concurrent username presence scanner
//!
//! Probes web platforms for the presence of a given identifier using a
//! cheap heuristic over the HTTP response.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`registry`] - On-disk platform registry (load, select, append)
//! - [`scanner`] - Concurrent probing engine with bounded concurrency
//! - [`models`] - Core data structures and types
//! - [`report`] - HTML report and terminal summary rendering
//!
//! # Example
//!
//! ```no_run
//! use uscout::config::Config;
//! use uscout::scanner::{ScanObservers, Scanner};
//! use uscout::registry;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let platforms = registry::load(&config.scanner.registry_path)?;
//!     let scanner = Scanner::new(&config.scanner)?;
//!     let results = scanner
//!         .scan(&["admin".to_string()], &platforms, &ScanObservers::new())
//!         .await?;
//!     println!("{} results", results.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;
pub mod scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::{FetchOutcome, Platform, ScanResult, ScanStats, ValidationRule};
    pub use crate::report::{summary_table, HtmlReport};
    pub use crate::scanner::{ScanObservers, Scanner};
}

// Direct re-exports for convenience
pub use models::{Platform, ScanResult, ScanStats, ValidationRule};
