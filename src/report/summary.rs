//! Terminal summary table

use std::collections::BTreeMap;

use crate::models::ScanResult;

/// Render per-platform found / not-found counts as fixed-width text
///
/// Platforms are listed alphabetically regardless of the completion
/// order the engine produced.
pub fn summary_table(results: &[ScanResult]) -> String {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for result in results {
        let entry = counts.entry(result.platform.as_str()).or_default();
        if result.found {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    let name_width = counts
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(0)
        .max("Platform".len());

    let mut out = String::new();
    out.push_str(&format!(
        "{:<name_width$}  {:>5}  {:>9}\n",
        "Platform", "Found", "Not Found"
    ));
    for (name, (found, not_found)) in counts {
        out.push_str(&format!(
            "{name:<name_width$}  {found:>5}  {not_found:>9}\n"
        ));
    }

    out
}
