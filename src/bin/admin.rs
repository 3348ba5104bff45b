//! CLI administration tool for partner-links.
//!
//! Provides commands for managing partners, viewing statistics,
//! and performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List all partners
//! cargo run --bin admin -- partner list
//!
//! # Grant admin rights (by id or email)
//! cargo run --bin admin -- partner promote anna@example.com
//!
//! # Deactivate a partner
//! cargo run --bin admin -- partner deactivate 5b0c6f1e-8a5e-4a38-9d43-2f7d2a6b1c11
//!
//! # View statistics for the last 7 days
//! cargo run --bin admin -- stats --days 7
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Issue a development access token
//! cargo run --bin admin -- token issue --user 5b0c6f1e-8a5e-4a38-9d43-2f7d2a6b1c11
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): required by `partner`, `stats` and `db`
//! - `AUTH_JWT_SECRET`: required by `token issue`
//! - `AUTH_JWT_AUDIENCE`: audience claim for `token issue` (default: `authenticated`)

use partner_links::application::services::AuthService;
use partner_links::config::Config;
use partner_links::domain::entities::Partner;
use partner_links::domain::repositories::{PartnerRepository, StatsRepository, StatsWindow};
use partner_links::infrastructure::persistence::{PgPartnerRepository, PgStatsRepository};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound for `stats --days` (about a century).
const MAX_DAYS: i64 = 36_500;

/// Upper bound for `token issue --hours` (one year).
const MAX_TOKEN_HOURS: i64 = 8_760;

/// CLI tool for managing partner-links.
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
    /// Manage partners
    Partner {
        #[command(subcommand)]
        action: PartnerAction,
    },

    /// Show global statistics
    Stats {
        /// Only count events from the last N days
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=MAX_DAYS))]
        days: Option<i64>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Development access tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Partner management subcommands.
///
/// `partner` arguments accept either the partner id or the email address.
#[derive(Subcommand)]
enum PartnerAction {
    /// List all partners
    List,

    /// Grant admin rights
    Promote { partner: String },

    /// Revoke admin rights
    Demote { partner: String },

    /// Reactivate a partner
    Activate { partner: String },

    /// Deactivate a partner
    Deactivate {
        partner: String,

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

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Sign an access token accepted by the API
    Issue {
        /// User id placed in the `sub` claim
        #[arg(short, long)]
        user: Option<Uuid>,

        /// Email placed in the `email` claim
        #[arg(short, long)]
        email: Option<String>,

        /// Lifetime in hours
        #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(i64).range(1..=MAX_TOKEN_HOURS))]
        hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Token { action } => handle_token_action(action)?,
        Commands::Partner { action } => handle_partner_action(action, &connect().await?).await?,
        Commands::Stats { days } => handle_stats(&connect().await?, days).await?,
        Commands::Db { action } => handle_db_action(action, &connect().await?).await?,
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url()?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Dispatches partner management commands.
async fn handle_partner_action(action: PartnerAction, pool: &PgPool) -> Result<()> {
    let repo = PgPartnerRepository::new(Arc::new(pool.clone()));

    match action {
        PartnerAction::List => list_partners(&repo).await?,
        PartnerAction::Promote { partner } => set_admin(&repo, &partner, true).await?,
        PartnerAction::Demote { partner } => set_admin(&repo, &partner, false).await?,
        PartnerAction::Activate { partner } => set_active(&repo, &partner, true, true).await?,
        PartnerAction::Deactivate { partner, yes } => {
            set_active(&repo, &partner, false, yes).await?
        }
    }

    Ok(())
}

/// Lists all partners with status indicators.
///
/// # Output Format
///
/// ```text
/// 👥 Partners
///
///   ID                                    Email                          Name                 Status
///   ───────────────────────────────────────────────────────────────────────────────────────────────────
///   5b0c6f1e-8a5e-4a38-9d43-2f7d2a6b1c11  anna@example.com               Anna                 ACTIVE ADMIN
/// ```
async fn list_partners(repo: &PgPartnerRepository) -> Result<()> {
    println!("{}", "👥 Partners".bright_blue().bold());
    println!();

    let partners = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list partners: {}", e))?;

    if partners.is_empty() {
        println!("{}", "  No partners registered".yellow());
        println!();
        println!("  Partners register through {}", "POST /api/partners/register".bright_cyan());
        return Ok(());
    }

    println!(
        "  {:<37} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Email".bright_white().bold(),
        "Name".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(100).bright_black());

    for partner in &partners {
        let status = if partner.is_active {
            "ACTIVE".green()
        } else {
            "INACTIVE".red()
        };
        let role = if partner.is_admin {
            "ADMIN".bright_magenta()
        } else {
            "".normal()
        };

        println!(
            "  {:<37} {:<30} {:<20} {} {}",
            partner.id.to_string().bright_black(),
            partner.email.cyan(),
            partner.name,
            status,
            role
        );
    }

    println!();
    println!(
        "  Total: {}",
        partners.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Looks a partner up by id, falling back to an exact email match.
async fn find_partner(repo: &PgPartnerRepository, id_or_email: &str) -> Result<Partner> {
    let found = match id_or_email.parse::<Uuid>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .list_all()
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
            .into_iter()
            .find(|p| p.email.eq_ignore_ascii_case(id_or_email)),
    };

    found.with_context(|| format!("Partner '{}' not found", id_or_email))
}

async fn set_admin(repo: &PgPartnerRepository, id_or_email: &str, is_admin: bool) -> Result<()> {
    let title = if is_admin {
        "⬆️  Promote Partner"
    } else {
        "⬇️  Demote Partner"
    };
    println!("{}", title.bright_blue().bold());
    println!();

    let partner = find_partner(repo, id_or_email).await?;

    if partner.is_admin == is_admin {
        let state = if is_admin { "an admin" } else { "not an admin" };
        println!("{}", format!("⚠️  {} is already {}", partner.email, state).yellow());
        return Ok(());
    }

    let updated = repo
        .set_admin(partner.id, is_admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update partner: {}", e))?
        .context("Partner disappeared during update")?;

    println!("  Partner: {}", updated.email.cyan());
    println!("  Admin:   {}", updated.is_admin.to_string().bright_white());
    println!();
    println!("{}", "✅ Partner updated".green().bold());
    println!();

    Ok(())
}

/// Toggles the active flag.
///
/// Deactivation asks for confirmation (default: No) unless `--yes` is given.
async fn set_active(
    repo: &PgPartnerRepository,
    id_or_email: &str,
    is_active: bool,
    skip_confirm: bool,
) -> Result<()> {
    let title = if is_active {
        "🔓 Activate Partner"
    } else {
        "🔒 Deactivate Partner"
    };
    println!("{}", title.bright_blue().bold());
    println!();

    let partner = find_partner(repo, id_or_email).await?;

    if partner.is_active == is_active {
        let state = if is_active { "active" } else { "deactivated" };
        println!("{}", format!("⚠️  {} is already {}", partner.email, state).yellow());
        return Ok(());
    }

    println!("  Partner: {}", partner.email.cyan());
    println!("  Name:    {}", partner.name);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Deactivate this partner? Their links keep redirecting until disabled.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    repo.set_active(partner.id, is_active)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update partner: {}", e))?
        .context("Partner disappeared during update")?;

    println!();
    println!("{}", "✅ Partner updated".green().bold());
    println!();

    Ok(())
}

/// Displays system-wide totals.
///
/// Shows partner and link counts plus clicks, sign-ups and purchases,
/// optionally restricted to the last `days` days.
async fn handle_stats(pool: &PgPool, days: Option<i64>) -> Result<()> {
    let window = stats_window(days, Utc::now())?;

    let repo = PgStatsRepository::new(Arc::new(pool.clone()));
    let totals = repo
        .global_totals(window)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    match days {
        Some(d) => println!(
            "{}",
            format!("📊 Statistics (last {} days)", d).bright_blue().bold()
        ),
        None => println!("{}", "📊 Statistics".bright_blue().bold()),
    }
    println!();

    println!(
        "  Partners:  {}",
        totals.partners.to_string().bright_green().bold()
    );
    println!(
        "  Links:     {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:    {}",
        totals.events.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Sign-ups:  {}",
        totals.events.signups.to_string().bright_green().bold()
    );
    println!(
        "  Purchases: {}",
        totals.events.purchases.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Event window covering the last `days` days before `now`.
fn stats_window(days: Option<i64>, now: DateTime<Utc>) -> Result<StatsWindow> {
    let Some(days) = days else {
        return Ok(StatsWindow::default());
    };

    let from = Duration::try_days(days)
        .filter(|_| days > 0)
        .and_then(|span| now.checked_sub_signed(span))
        .with_context(|| format!("--days {} is out of range", days))?;

    Ok(StatsWindow::since(from))
}

fn token_ttl(hours: i64) -> Result<Duration> {
    Duration::try_hours(hours)
        .filter(|ttl| hours > 0 && Utc::now().checked_add_signed(*ttl).is_some())
        .with_context(|| format!("--hours {} is out of range", hours))
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Signs a token with the configured secret.
///
/// Prompts for the user id when `--user` is omitted. Intended for local
/// development; production tokens come from the identity provider.
fn handle_token_action(action: TokenAction) -> Result<()> {
    let TokenAction::Issue { user, email, hours } = action;
    let ttl = token_ttl(hours)?;

    println!("{}", "🔑 Issue Access Token".bright_blue().bold());
    println!();

    let secret = std::env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET must be set")?;
    let audience =
        std::env::var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

    let user_id = match user {
        Some(id) => id,
        None => {
            let raw: String = Input::new()
                .with_prompt("User id")
                .with_initial_text(Uuid::new_v4().to_string())
                .interact_text()?;
            raw.trim().parse().context("User id must be a UUID")?
        }
    };

    let token = AuthService::new(&secret, &audience)
        .issue_token(user_id, email.as_deref(), ttl)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("  User:     {}", user_id.to_string().cyan());
    if let Some(email) = &email {
        println!("  Email:    {}", email.cyan());
    }
    println!("  Audience: {}", audience.bright_black());
    println!("  Expires:  {} hours", hours);
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/me",
        token.bright_yellow()
    );
    println!();

    Ok(())
}
