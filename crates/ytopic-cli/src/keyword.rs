//! `keyword` subcommands: denylist screening and uncached analysis.

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::Subcommand;
use ytopic_analysis::{build_report, no_results_report, KeywordReport};
use ytopic_core::{blocked_keyword_stats, check_keyword, KeywordCheck};
use ytopic_youtube::YoutubeClient;

/// Sub-commands available under `keyword`.
#[derive(Debug, Subcommand)]
pub enum KeywordCommands {
    /// Validate a keyword against the length bounds and denylist
    Check {
        keyword: String,
        /// Also print denylist rule counts per category
        #[arg(long)]
        stats: bool,
    },
    /// Fetch and analyze a keyword without touching the cache
    Analyze { keyword: String },
}

pub(crate) async fn run(command: KeywordCommands) -> anyhow::Result<()> {
    match command {
        KeywordCommands::Check { keyword, stats } => run_keyword_check(&keyword, stats),
        KeywordCommands::Analyze { keyword } => run_keyword_analyze(&keyword).await,
    }
}

/// One-line verdict for a keyword.
pub(crate) fn describe_check(raw: &str) -> String {
    match check_keyword(raw) {
        Err(rejection) => format!("rejected: {rejection}"),
        Ok(KeywordCheck::Allowed(keyword)) => format!("allowed: {keyword}"),
        Ok(KeywordCheck::Blocked { keyword, rule }) => format!(
            "blocked: {keyword} (matched '{}', {}: {})",
            rule.pattern, rule.category, rule.reason
        ),
    }
}

fn run_keyword_check(raw: &str, stats: bool) -> anyhow::Result<()> {
    println!("{}", describe_check(raw));

    if stats {
        let stats = blocked_keyword_stats();
        println!(
            "{:<12}{:>6}\n{:<12}{:>6}\n{:<12}{:>6}\n{:<12}{:>6}\n{:<12}{:>6}\n{:<12}{:>6}",
            "adult",
            stats.adult,
            "violence",
            stats.violence,
            "illegal",
            stats.illegal,
            "copyright",
            stats.copyright,
            "spam",
            stats.spam,
            "total",
            stats.total
        );
    }
    Ok(())
}

async fn run_keyword_analyze(raw: &str) -> anyhow::Result<()> {
    let keyword = match check_keyword(raw)? {
        KeywordCheck::Allowed(keyword) => keyword,
        KeywordCheck::Blocked { keyword, rule } => {
            anyhow::bail!("keyword '{keyword}' is blocked ({})", rule.category)
        }
    };

    let config = ytopic_core::load_app_config()?;
    let api_key = config
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is not set; cannot analyze"))?;
    let client =
        YoutubeClient::with_base_url(api_key, config.youtube_timeout_secs, &config.youtube_base_url)
            .context("failed to build YouTube client")?;

    let report = analyze(&client, keyword).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn analyze(client: &YoutubeClient, keyword: &str) -> anyhow::Result<KeywordReport> {
    let now = Utc::now();
    let ids = client
        .search_video_ids(keyword, now - Duration::days(365))
        .await?;
    if ids.is_empty() {
        return Ok(no_results_report(keyword, now));
    }

    let videos = client.list_videos(&ids).await?;
    tracing::info!(keyword, videos = videos.len(), "fetched videos for analysis");
    Ok(build_report(keyword, &videos, now))
}
