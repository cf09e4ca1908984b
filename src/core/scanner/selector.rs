// src/core/scanner/selector.rs

use std::collections::HashSet;
use tracing::debug;

use crate::core::error::ScanError;
use crate::core::models::{Finding, ScanMode};

/// Narrows the catalog to the checks a request asked for.
///
/// Full mode returns the catalog unchanged. Selective mode keeps only findings whose
/// category was requested, in catalog order, and refuses an empty category set.
/// A catalog with repeated ids is rejected outright since results could no longer be
/// told apart.
pub fn select(
    mode: ScanMode,
    requested: &HashSet<String>,
    catalog: Vec<Finding>,
) -> Result<Vec<Finding>, ScanError> {
    check_unique_ids(&catalog)?;

    match mode {
        ScanMode::Full => {
            debug!(count = catalog.len(), "Full scan, using entire catalog.");
            Ok(catalog)
        }
        ScanMode::Selective => {
            if requested.is_empty() {
                return Err(ScanError::InvalidRequest(
                    "selective scan requires at least one category".to_string(),
                ));
            }
            let total = catalog.len();
            let selected: Vec<Finding> = catalog
                .into_iter()
                .filter(|f| requested.contains(&f.category))
                .collect();
            debug!(total, selected = selected.len(), "Selective scan narrowed catalog.");
            Ok(selected)
        }
    }
}

fn check_unique_ids(catalog: &[Finding]) -> Result<(), ScanError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for finding in catalog {
        if !seen.insert(finding.id.as_str()) {
            return Err(ScanError::SelectionFailure(format!(
                "catalog contains duplicate finding id '{}'",
                finding.id
            )));
        }
    }
    Ok(())
}
