//! Rendering of completed scan results
//!
//! Consumes the final result set produced by the scan engine; nothing
//! here feeds back into probing.

pub mod html;
pub mod summary;

pub use html::HtmlReport;
pub use summary::summary_table;
