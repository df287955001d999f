//! CLI administration tool for link-registry.
//!
//! Manages user entitlements, shows registry statistics and performs
//! database checks without going through the HTTP API. Entitlement changes
//! made here take effect on the user's next request, including for sessions
//! that are already open.
//!
//! # Usage
//!
//! ```bash
//! # List users and their entitlements
//! cargo run --bin admin -- user list
//!
//! # Grant pro status (unlimited links)
//! cargo run --bin admin -- user entitle alice --pro true
//!
//! # Make someone an administrator without prompting
//! cargo run --bin admin -- user entitle bob --admin true -y
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
//! - `DATABASE_URL` or `DB_*` components (see the `config` module)

use link_registry::application::services::FREE_TIER_LINK_LIMIT;
use link_registry::config::Config;
use link_registry::domain::entities::User;
use link_registry::domain::repositories::{LinkRepository, UserRepository};
use link_registry::infrastructure::persistence::{PgLinkRepository, PgUserRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-registry.
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
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// List all users with entitlements and link counts
    List,

    /// Change a user's entitlement flags
    Entitle {
        /// Username to modify
        username: String,

        /// Set pro status (unlimited links)
        #[arg(long)]
        pro: Option<bool>,

        /// Set administrator status
        #[arg(long)]
        admin: Option<bool>,

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

    let database_url =
        Config::load_database_url().context("Failed to load database configuration")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let users = PgUserRepository::new(pool.clone());
    let links = PgLinkRepository::new(pool);

    match action {
        UserAction::List => list_users(&users, &links).await?,
        UserAction::Entitle {
            username,
            pro,
            admin,
            yes,
        } => entitle_user(&users, username, pro, admin, yes).await?,
    }

    Ok(())
}

/// Lists all users with entitlement flags and link usage.
///
/// # Output Format
///
/// ```text
/// 👥 Users
///
///   Username             Links      Pro    Admin  Created
///   ──────────────────────────────────────────────────────────────────
///   alice                3/5        no     no     2024-01-15 10:30
///   bob                  42/∞       yes    no     2024-01-16 14:20
/// ```
async fn list_users(users: &PgUserRepository, links: &PgLinkRepository) -> Result<()> {
    println!("{}", "👥 Users".bright_blue().bold());
    println!();

    let all = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No users found".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<10} {:<6} {:<6} {}",
        "Username".bright_white().bold(),
        "Links".bright_white().bold(),
        "Pro".bright_white().bold(),
        "Admin".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(66).bright_black());

    for user in &all {
        let count = links
            .count_by_owner(user.id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

        let usage = if user.is_privileged() {
            format!("{}/∞", count)
        } else {
            format!("{}/{}", count, FREE_TIER_LINK_LIMIT)
        };

        println!(
            "  {:<20} {:<10} {:<6} {:<6} {}",
            user.username.cyan(),
            usage,
            flag(user.is_pro),
            flag(user.is_admin),
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Updates a user's entitlement flags after confirmation.
///
/// Flags that are not given keep their current value.
async fn entitle_user(
    users: &PgUserRepository,
    username: String,
    pro: Option<bool>,
    admin: Option<bool>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔧 Update Entitlements".bright_blue().bold());
    println!();

    if pro.is_none() && admin.is_none() {
        println!("{}", "⚠️  Nothing to change: pass --pro and/or --admin".yellow());
        return Ok(());
    }

    let user = users
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("User '{}' not found", username))?;

    let new_pro = pro.unwrap_or(user.is_pro);
    let new_admin = admin.unwrap_or(user.is_admin);

    print_user(&user);
    println!(
        "  Pro:   {} → {}",
        flag(user.is_pro),
        flag(new_pro).bright_yellow()
    );
    println!(
        "  Admin: {} → {}",
        flag(user.is_admin),
        flag(new_admin).bright_yellow()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let updated = users
        .set_entitlements(user.id, new_pro, new_admin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update user: {}", e))?;

    println!();
    println!("{}", "✅ Entitlements updated".green().bold());
    print_user(&updated);
    println!();

    Ok(())
}

fn print_user(user: &User) {
    println!("  User:  {}", user.username.cyan());
    println!("  ID:    {}", user.id.to_string().bright_black());
}

fn flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Displays registry statistics.
///
/// Shows:
/// - Total number of users
/// - Total number of links
/// - Sum of recorded visits
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let visits_total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(visit_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Users:   {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits:  {}",
        visits_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
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

            let migrations: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM _sqlx_migrations WHERE success",
            )
            .fetch_one(pool)
            .await
            .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
