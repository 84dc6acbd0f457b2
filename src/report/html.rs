//! HTML report rendering with Handlebars
//!
//! Renders the final result set into a standalone HTML page and saves
//! it under a timestamped filename.

use chrono::Local;
use handlebars::Handlebars;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::{ScanResult, ScanStats};

/// Default report template
const REPORT_TEMPLATE: &str = include_str!("../../templates/report.hbs");

/// Template data for rendering
#[derive(Debug, Serialize)]
struct ReportData<'a> {
    usernames: String,
    generated_at: String,
    stats: &'a ScanStats,
    results: &'a [ScanResult],
}

/// HTML report writer
pub struct HtmlReport {
    handlebars: Handlebars<'static>,
    output_dir: PathBuf,
}

impl HtmlReport {
    /// Create a report writer, registering the embedded template and
    /// creating the output directory
    pub fn new(output_dir: &Path) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string("report", REPORT_TEMPLATE)?;

        fs::create_dir_all(output_dir)?;

        Ok(Self {
            handlebars,
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Render the report to an HTML string
    pub fn render(
        &self,
        identifiers: &[String],
        results: &[ScanResult],
        stats: &ScanStats,
    ) -> Result<String> {
        let data = ReportData {
            usernames: identifiers.join(", "),
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            stats,
            results,
        };

        Ok(self.handlebars.render("report", &data)?)
    }

    /// Render and save the report, returning the written path
    pub fn save(
        &self,
        identifiers: &[String],
        results: &[ScanResult],
        stats: &ScanStats,
    ) -> Result<PathBuf> {
        let html = self.render(identifiers, results, stats)?;

        let filename = format!("results_{}.html", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.output_dir.join(filename);

        let mut file = File::create(&path)?;
        file.write_all(html.as_bytes())?;

        tracing::info!(path = %path.display(), "saved HTML report");

        Ok(path)
    }
}
