//! CLI administration tool for shorty.
//!
//! Moderation and diagnostics without going through the HTTP API. This is
//! the only writer of the `expired` link status.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a link (code or full short URL)
//! cargo run --bin admin -- link show aB3dE
//!
//! # Blacklist a link
//! cargo run --bin admin -- link flag https://shorty.co/aB3dE
//!
//! # Expire a link without confirmation prompt
//! cargo run --bin admin -- link expire aB3dE --yes
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components) and
//! `SHORT_URL_BASE`, `CODE_LENGTH`, `CODE_ALPHABET` for parsing short URLs.

use shorty::application::services::{AnalyticsService, LinkService, StatsService, VisitService};
use shorty::config::{Config, mask_connection_string};
use shorty::domain::entities::{Link, LinkStatus};
use shorty::infrastructure::persistence::{
    PgAnalyticsRepository, PgLinkRepository, PgVisitRepository,
};
use shorty::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and moderate links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link moderation subcommands. Links are addressed by code or short URL.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a link and its counters
    Show { code: String },

    /// Blacklist a link (irreversible)
    Flag {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Expire an active link
    Expire {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = server::connect_pool(&config).await.with_context(|| {
        format!("Cannot reach {}", mask_connection_string(&config.database_url))
    })?;
    let pool = Arc::new(pool);

    let links = Arc::new(LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        config.link_settings()?,
    ));

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &links).await?,
        Commands::Stats => handle_stats(links, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link moderation commands.
async fn handle_link_action(
    action: LinkAction,
    links: &LinkService<PgLinkRepository>,
) -> Result<()> {
    match action {
        LinkAction::Show { code } => {
            let link = find_link(links, &code).await?;
            print_link(links, &link);
        }
        LinkAction::Flag { code, yes } => {
            let link = find_link(links, &code).await?;
            print_link(links, &link);

            if link.is_blacklisted() {
                println!("{}", "Link is already blacklisted".yellow());
                return Ok(());
            }

            if !yes && !confirm("Blacklist this link? It can no longer be resolved or reissued.")? {
                println!("{}", "Cancelled".red());
                return Ok(());
            }

            links
                .flag(link.id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to flag link: {}", e))?;

            println!("{}", "Link blacklisted".green().bold());
        }
        LinkAction::Expire { code, yes } => {
            let link = find_link(links, &code).await?;
            print_link(links, &link);

            if !link.is_active() {
                println!(
                    "{}",
                    format!("Only active links can be expired (status: {})", link.status).yellow()
                );
                return Ok(());
            }

            if !yes && !confirm("Expire this link?")? {
                println!("{}", "Cancelled".red());
                return Ok(());
            }

            let expired = links
                .expire(link.id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to expire link: {}", e))?;

            if expired {
                println!("{}", "Link expired".green().bold());
            } else {
                println!("{}", "Link changed status concurrently, nothing done".yellow());
            }
        }
    }

    Ok(())
}

async fn find_link(links: &LinkService<PgLinkRepository>, input: &str) -> Result<Link> {
    let code = links
        .parse_short_code(input)
        .with_context(|| format!("'{}' is not a short code or short URL", input))?;

    links
        .find(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn print_link(links: &LinkService<PgLinkRepository>, link: &Link) {
    let status = match link.status {
        LinkStatus::Active => link.status.as_str().green(),
        LinkStatus::Expired => link.status.as_str().yellow(),
        LinkStatus::Blacklisted => link.status.as_str().red(),
    };

    println!();
    println!("  Short URL: {}", links.short_url(&link.short_code).cyan());
    println!("  Target:    {}", link.long_url.bright_white());
    println!("  Status:    {}", status.bold());
    println!("  Clicks:    {}", link.click_count.to_string().bright_green());
    println!("  QR codes:  {}", link.qr_generated_count.to_string().bright_green());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
    println!();
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

/// Displays system statistics.
async fn handle_stats(
    links: Arc<LinkService<PgLinkRepository>>,
    pool: &Arc<PgPool>,
) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let visits = VisitService::new(Arc::new(PgVisitRepository::new(pool.clone())));
    let analytics = AnalyticsService::new(Arc::new(PgAnalyticsRepository::new(pool.clone())));
    let stats = StatsService::new(links, Arc::new(visits), Arc::new(analytics));

    let overview = stats
        .overview()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("  Links:         {}", overview.total_links.to_string().bright_green().bold());
    println!("  Clicks:        {}", overview.total_clicks.to_string().bright_green().bold());
    println!("  Blacklisted:   {}", overview.total_blacklisted.to_string().red().bold());
    println!("  Expired:       {}", overview.total_expired.to_string().yellow().bold());
    println!("  Created today: {}", overview.created_today.to_string().bright_white());
    println!("  Visits today:  {}", overview.visits_today.to_string().bright_white());
    println!("  QR codes:      {}", overview.total_qr_generated.to_string().bright_white());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();

            for table in ["links", "visits", "reports", "contacts", "analytics_events"] {
                let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                    .fetch_one(pool)
                    .await?;

                println!("  {:<18} {}", table, count.to_string().bright_white());
            }
            println!();
        }
    }

    Ok(())
}
