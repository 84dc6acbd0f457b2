//! On-disk platform registry
//!
//! The registry is a JSON file holding an ordered list of platform
//! descriptors. The scan engine only ever sees an already-validated,
//! immutable snapshot produced by [`load`]; mutation happens through
//! [`add_or_update`] before any scan starts.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::models::Platform;

/// Whether [`add_or_update`] inserted a new entry or replaced one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new platform was appended
    Added,
    /// An existing platform of the same name was replaced
    Updated,
}

/// Load and validate the platform registry
///
/// Names are trimmed and lowercased; every entry must carry a URL
/// template with exactly one substitution slot. A missing file or an
/// empty registry is a fatal precondition failure for the whole run.
pub fn load(path: &Path) -> Result<Vec<Platform>> {
    if !path.exists() {
        return Err(RegistryError::NotFound(path.display().to_string()).into());
    }

    let content = fs::read_to_string(path)?;
    let mut platforms: Vec<Platform> = serde_json::from_str(&content)?;

    let mut seen = HashSet::new();
    for platform in &mut platforms {
        platform.normalize();
        validate_entry(platform)?;
        if !seen.insert(platform.name.clone()) {
            return Err(RegistryError::DuplicateName(platform.name.clone()).into());
        }
    }

    if platforms.is_empty() {
        return Err(RegistryError::Empty.into());
    }

    tracing::debug!(
        path = %path.display(),
        count = platforms.len(),
        "loaded platform registry"
    );

    Ok(platforms)
}

/// Filter platforms by a case-insensitive name selection
///
/// An empty selection or the single name `all` selects everything.
pub fn select(platforms: &[Platform], names: &[String]) -> Result<Vec<Platform>> {
    if names.is_empty() || (names.len() == 1 && names[0].eq_ignore_ascii_case("all")) {
        return Ok(platforms.to_vec());
    }

    let wanted: Vec<String> = names.iter().map(|n| n.trim().to_lowercase()).collect();
    let chosen: Vec<Platform> = platforms
        .iter()
        .filter(|p| wanted.contains(&p.name))
        .cloned()
        .collect();

    if chosen.is_empty() {
        return Err(RegistryError::NoMatch(names.join(", ")).into());
    }

    Ok(chosen)
}

/// List the names of all registered platforms
pub fn platform_names(platforms: &[Platform]) -> Vec<String> {
    platforms.iter().map(|p| p.name.clone()).collect()
}

/// Append a platform to the registry, or update it in place when the
/// name already exists
///
/// Creates the registry file when absent. The written file is pretty
/// JSON so it stays hand-editable.
pub fn add_or_update(path: &Path, mut platform: Platform) -> Result<AddOutcome> {
    platform.normalize();
    validate_entry(&platform)?;

    let mut platforms: Vec<Platform> = if path.exists() {
        serde_json::from_str(&fs::read_to_string(path)?)?
    } else {
        Vec::new()
    };

    let outcome = match platforms.iter_mut().find(|p| p.name == platform.name) {
        Some(existing) => {
            *existing = platform;
            AddOutcome::Updated
        }
        None => {
            platforms.push(platform);
            AddOutcome::Added
        }
    };

    fs::write(path, serde_json::to_string_pretty(&platforms)?)?;

    Ok(outcome)
}

fn validate_entry(platform: &Platform) -> Result<()> {
    if platform.name.is_empty() {
        return Err(RegistryError::InvalidEntry {
            name: platform.url_template.clone(),
            reason: "name must be non-empty".to_string(),
        }
        .into());
    }

    let slots = platform.slot_count();
    if slots != 1 {
        return Err(RegistryError::InvalidEntry {
            name: platform.name.clone(),
            reason: format!("URL template must contain exactly one {{}} slot, found {slots}"),
        }
        .into());
    }

    Ok(())
}
