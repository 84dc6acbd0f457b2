//! Presence classification over fetch outcomes
//!
//! Classification is a pure function of the outcome and the platform's
//! validation rule; no cross-task state may influence the verdict. A
//! failed probe (exhausted retries) and a confirmed absence both come
//! out as not found, which downstream consumers cannot tell apart.

use crate::models::{FetchOutcome, ValidationRule};

/// Derive a presence verdict from one fetch outcome
///
/// Truth table: status 200 with a rule whose marker text is missing
/// from the body is found; status 200 without a rule is found; any
/// other status, or exhausted retries, is not found.
pub fn classify(outcome: &FetchOutcome, rule: Option<&ValidationRule>) -> bool {
    if outcome.status != Some(200) {
        return false;
    }

    match rule {
        Some(rule) => match outcome.body.as_deref() {
            Some(body) => {
                let needle = rule.text_absent.to_lowercase();
                !body.to_lowercase().contains(&needle)
            }
            // No body to inspect, cannot confirm presence
            None => false,
        },
        None => true,
    }
}
