use crate::OutputFormat;
use crate::commands::source::SourceArgs;
use anyhow::{Context, Result};
use relister_browser::{CdpSession, CdpSurface, ChromeFinder, ChromeLauncher, ProfileManager};
use relister_core::{Category, ListingRecord, Settings};
use relister_engine::{BatchSummary, Composers, LifecycleEngine, open_selling_page};
use std::path::PathBuf;

/// Browser and settings overrides for a publish run
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub config: Option<PathBuf>,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub temp_profile: bool,
    pub headless: bool,
    pub port: Option<u16>,
}

/// Settings file (if any) with command-line overrides applied
pub fn resolve_settings(options: &SessionOptions) -> Result<Settings> {
    let mut settings = match &options.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if let Some(chrome) = &options.chrome_path {
        settings.chrome_path = Some(chrome.clone());
    }
    if let Some(profile) = &options.profile {
        settings.profile = profile.clone();
    }

    url::Url::parse(&settings.marketplace_url)
        .with_context(|| format!("Invalid marketplace URL: {}", settings.marketplace_url))?;

    Ok(settings)
}

pub fn execute(
    source: &SourceArgs,
    category: Category,
    options: &SessionOptions,
    format: OutputFormat,
) -> Result<()> {
    let settings = resolve_settings(options)?;

    // Reject a bad batch before a browser is started
    let records = source.load(category)?;
    Composers::standard().check_batch(&records, category)?;

    if records.is_empty() {
        println!("No {} listings to publish", category);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let summary = runtime.block_on(launch_and_publish(&settings, options, &records, category))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Pretty => output_pretty(&summary),
    }

    Ok(())
}

async fn launch_and_publish(
    settings: &Settings,
    options: &SessionOptions,
    records: &[ListingRecord],
    category: Category,
) -> Result<BatchSummary> {
    println!("🔍 Locating Chrome...");
    let chrome_binary = ChromeFinder::new(settings.chrome_path.clone()).find()?;
    println!("✅ Found Chrome at: {}", chrome_binary.display());

    let profile = if options.temp_profile {
        println!("📁 Using temporary profile");
        ProfileManager::temporary()?
    } else {
        let profile = ProfileManager::named(&settings.profile)?;
        println!("📁 Using profile: {}", profile.path().display());
        profile
    };

    let mut launcher = ChromeLauncher::new(
        chrome_binary,
        profile.path().to_path_buf(),
        settings.marketplace_url.clone(),
    )
    .headless(options.headless);
    if let Some(port) = options.port {
        launcher = launcher.with_port(port);
    }

    println!("🚀 Launching Chrome...");
    let mut chrome = launcher.launch()?;

    let result = run_session(launcher.debugging_port(), settings, records, category).await;

    if let Err(e) = chrome.kill() {
        tracing::debug!("Chrome already exited: {}", e);
    }
    if let Err(e) = chrome.wait() {
        tracing::debug!("Waiting for Chrome to exit failed: {}", e);
    }
    drop(profile);

    result
}

async fn run_session(
    port: u16,
    settings: &Settings,
    records: &[ListingRecord],
    category: Category,
) -> Result<BatchSummary> {
    let session = CdpSession::connect(port).await?;
    let surface = CdpSurface::new(session.page().clone(), &settings.timeouts);

    println!(
        "🔐 Waiting for a signed-in session (sign in in the Chrome window if asked)..."
    );
    open_selling_page(&surface, &settings.marketplace_url, &settings.timeouts).await?;

    println!("📦 Updating {} {} listings...", records.len(), category);
    let engine = LifecycleEngine::new(surface, settings.timeouts);
    let result = engine.update_listings(records, category).await;

    if let Err(e) = session.close().await {
        tracing::debug!("Closing the CDP session failed: {}", e);
    }

    Ok(result?)
}

fn output_pretty(summary: &BatchSummary) {
    use console::style;

    println!(
        "\n{}",
        style(format!("Published {} {} listings", summary.published(), summary.category))
            .bold()
            .cyan()
    );

    for outcome in &summary.outcomes {
        let replaced = if outcome.removed_prior {
            style("replaced").yellow()
        } else {
            style("new").green()
        };
        println!("  {} ({})", style(&outcome.title).bold(), replaced);
        if !outcome.groups.shared.is_empty() {
            println!("    Shared to:   {}", outcome.groups.shared.join(", "));
        }
        if !outcome.groups.unconfirmed.is_empty() {
            println!(
                "    {} {}",
                style("Unconfirmed:").yellow(),
                outcome.groups.unconfirmed.join(", ")
            );
        }
    }

    let elapsed = summary.finished_at - summary.started_at;
    println!(
        "\n  Replaced {} · {} group shares · {}s",
        summary.removed(),
        summary.shared(),
        elapsed.num_seconds()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_defaults_without_config() {
        let settings = resolve_settings(&SessionOptions::default()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"profile": "seller", "timeouts": {{"element": 2500}}}}"#
        )
        .unwrap();

        let options = SessionOptions {
            config: Some(file.path().to_path_buf()),
            profile: Some("other".to_string()),
            chrome_path: Some(PathBuf::from("/opt/chrome")),
            ..SessionOptions::default()
        };
        let settings = resolve_settings(&options).unwrap();

        assert_eq!(settings.profile, "other");
        assert_eq!(settings.chrome_path, Some(PathBuf::from("/opt/chrome")));
        assert_eq!(settings.timeouts.element, Duration::from_millis(2500));
        assert_eq!(settings.timeouts.probe, Duration::from_secs(3));
    }

    #[test]
    fn test_rejects_bad_marketplace_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"marketplace_url": "not a url"}}"#).unwrap();

        let options = SessionOptions {
            config: Some(file.path().to_path_buf()),
            ..SessionOptions::default()
        };
        let err = resolve_settings(&options).unwrap_err();
        assert!(err.to_string().contains("Invalid marketplace URL"));
    }
}
