//! `topics` subcommands: popular-video sync, rotation, listing.

use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use ytopic_analysis::topic_from_popular_video;
use ytopic_core::{ContentType, NewTopic};
use ytopic_db::{PgStore, TopicRow};
use ytopic_youtube::YoutubeClient;

/// Sub-commands available under `topics`.
#[derive(Debug, Subcommand)]
pub enum TopicsCommands {
    /// Turn a region's most-popular chart into topics
    Sync {
        /// ISO 3166-1 region code
        #[arg(long, default_value = "KR")]
        region: String,
        /// Number of chart videos to fetch (1-50)
        #[arg(long, default_value = "50")]
        max: u32,
        /// Print the derived topics without writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Retire stale topics and add this month's seasonal topics
    Rotate,
    /// Insert the curated trend-based topics
    AddTrending,
    /// List active topics
    List {
        /// Filter by `short` or `long`
        #[arg(long)]
        content_type: Option<ContentType>,
    },
}

pub(crate) async fn run(command: TopicsCommands) -> anyhow::Result<()> {
    let config = ytopic_core::load_app_config()?;

    match command {
        TopicsCommands::Sync {
            region,
            max,
            dry_run,
        } => run_topics_sync(&config, &region, max, dry_run).await,
        TopicsCommands::Rotate => {
            let pool = crate::connect(&config).await?;
            let summary = ytopic_db::run_topic_rotation(&PgStore::new(pool), Utc::now()).await?;
            println!(
                "rotated topics: {} -> {} ({} added, {} deactivated)",
                summary.before_count,
                summary.after_count,
                summary.added_count,
                summary.deactivated_count
            );
            Ok(())
        }
        TopicsCommands::AddTrending => {
            let pool = crate::connect(&config).await?;
            let before = ytopic_db::count_topics(&pool).await?;
            let added = ytopic_db::add_trending_topics(&pool).await?;
            let after = ytopic_db::count_topics(&pool).await?;
            let shorts = ytopic_db::list_active_topics(&pool, Some(ContentType::Short)).await?;
            let long = ytopic_db::list_active_topics(&pool, Some(ContentType::Long)).await?;
            tracing::info!(added, before, after, "trending topics added");
            println!(
                "added {added} trending topics: {before} -> {after} ({} short, {} long active)",
                shorts.len(),
                long.len()
            );
            Ok(())
        }
        TopicsCommands::List { content_type } => {
            let pool = crate::connect(&config).await?;
            let rows = ytopic_db::list_active_topics(&pool, content_type).await?;
            print_topics(&rows);
            Ok(())
        }
    }
}

async fn run_topics_sync(
    config: &ytopic_core::AppConfig,
    region: &str,
    max: u32,
    dry_run: bool,
) -> anyhow::Result<()> {
    let api_key = config
        .youtube_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("YOUTUBE_API_KEY is not set; cannot sync topics"))?;
    let client =
        YoutubeClient::with_base_url(api_key, config.youtube_timeout_secs, &config.youtube_base_url)
            .context("failed to build YouTube client")?;

    let videos = client.most_popular(region, max).await?;
    let topics: Vec<NewTopic> = videos.iter().map(topic_from_popular_video).collect();

    if dry_run {
        println!("dry-run: would insert {} topics for region {region}", topics.len());
        for topic in &topics {
            println!(
                "  {:<5} {:>4} {:<14} {}",
                topic.content_type.as_str(),
                topic.revenue_score.to_string(),
                topic.category,
                topic.title
            );
        }
        return Ok(());
    }

    let pool = crate::connect(config).await?;
    let inserted = ytopic_db::insert_topics(&pool, &topics).await?;
    tracing::info!(region, inserted, "popular-video sync complete");
    println!("inserted {inserted} topics from {region} most-popular chart");
    Ok(())
}

/// Truncate to `max` characters, marking the cut with `...`.
pub(crate) fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        format!("{}...", title.chars().take(max).collect::<String>())
    } else {
        title.to_string()
    }
}

fn print_topics(rows: &[TopicRow]) {
    if rows.is_empty() {
        println!("no active topics; run `db seed` or `topics sync` first");
        return;
    }

    println!(
        "{:<7}{:<7}{:<8}{:<14}TITLE",
        "SCORE", "TYPE", "COMP", "CATEGORY"
    );
    for row in rows {
        println!(
            "{:<7}{:<7}{:<8}{:<14}{}",
            row.revenue_score.to_string(),
            row.content_type,
            row.competition_level,
            row.category,
            truncate_title(&row.title, 50)
        );
    }
}
