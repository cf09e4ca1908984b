// src/main.rs

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use vanguard_scan_engine::core::analysis::analyze;
use vanguard_scan_engine::core::knowledge_base::StaticCatalog;
use vanguard_scan_engine::{
    EngineConfig, ScanMode, ScanOrchestrator, ScanRequest, ScanSessionStore, logging,
};

mod cli;
mod output;

use cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::initialize_logging()?;

    if cli.list_categories {
        for category in StaticCatalog::default().categories() {
            println!("{category}");
        }
        return Ok(());
    }

    let Some(raw_target) = cli.target.as_deref() else {
        bail!("a target is required");
    };
    let target = normalize_target(raw_target)?;

    if !cli.authorized {
        warn!(target = %target, "Scan refused, authorization not acknowledged.");
        bail!(
            "refusing to scan {target}: pass --authorized to confirm you own it or have explicit permission to test it"
        );
    }

    let config = EngineConfig::default()
        .with_scan_duration(Duration::from_millis(cli.scan_delay_ms))
        .with_default_deadline(cli.timeout_ms.map(Duration::from_millis));
    let store = ScanSessionStore::new();
    let orchestrator = ScanOrchestrator::with_defaults(store.clone(), &config);

    let request = match cli.mode {
        ScanMode::Full => {
            if !cli.categories.is_empty() {
                warn!(categories = ?cli.categories, "Categories are ignored in full mode.");
            }
            ScanRequest::full(target.clone())
        }
        ScanMode::Selective => {
            let catalog = StaticCatalog::default();
            let categories = resolve_categories(&cli.categories, &catalog.categories())?;
            ScanRequest::selective(target.clone(), categories)
        }
    };

    eprintln!("Scanning {target} ... (log: {})", log_path.display());
    let handle = orchestrator.spawn_scan(request)?;
    let result = tokio::select! {
        outcome = handle.wait() => outcome.wrap_err_with(|| format!("scan of {target} failed"))?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, abandoning scan.");
            bail!("scan of {target} interrupted");
        }
    };

    let summary = analyze(&result, orchestrator.catalog());
    match cli.format {
        OutputFormat::Text => print!("{}", output::render_text(&result, &summary)),
        OutputFormat::Json => println!("{}", output::render_json(&result, &summary)?),
    }
    Ok(())
}

/// Adds an `https://` scheme when missing and checks the target parses as a URL
/// with a host. Deeper reachability checks are left to the probe.
fn normalize_target(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("target must not be empty");
    }
    let with_scheme = if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };
    let url = Url::parse(&with_scheme).wrap_err_with(|| format!("invalid target '{raw}'"))?;
    if url.host_str().is_none() {
        bail!("target '{raw}' has no host");
    }
    Ok(url.to_string())
}

/// Maps each requested category onto the catalog's own tag, ignoring case and
/// surrounding whitespace. An unknown name is an error, since it would otherwise
/// select nothing and report a clean scan.
fn resolve_categories(requested: &[String], known: &[&str]) -> Result<Vec<String>> {
    let mut resolved = Vec::with_capacity(requested.len());
    for raw in requested {
        let wanted = raw.trim();
        if wanted.is_empty() {
            continue;
        }
        match known.iter().find(|tag| tag.eq_ignore_ascii_case(wanted)) {
            Some(tag) => resolved.push(tag.to_string()),
            None => bail!(
                "unknown category '{wanted}', expected one of: {}",
                known.join(", ")
            ),
        }
    }
    Ok(resolved)
}
