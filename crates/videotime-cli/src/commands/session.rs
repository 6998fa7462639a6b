//! Watch session CLI commands: reports and privacy erasure.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use videotime_core::error::AppError;
use videotime_core::types::completion::RuleOutcome;
use videotime_core::types::id::{ModuleId, UserId};
use videotime_core::types::pagination::PageRequest;
use videotime_entity::watch::WatchSession;
use videotime_service::RequestContext;

use crate::output::{self, OutputFormat};

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// List sessions on a video instance, newest first
    List {
        /// Video instance ID
        #[arg(long)]
        module: ModuleId,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Sessions per page
        #[arg(long, default_value_t = 25)]
        per_page: u64,
    },
    /// Aggregate progress of one user on an instance
    Summary {
        /// Video instance ID
        #[arg(long)]
        module: ModuleId,
        /// User ID
        #[arg(long)]
        user: UserId,
    },
    /// Completion rules evaluated for one user
    Completion {
        /// Video instance ID
        #[arg(long)]
        module: ModuleId,
        /// User ID
        #[arg(long)]
        user: UserId,
    },
    /// Delete watch data for a user, an instance, or both
    Erase {
        /// Restrict to this user
        #[arg(long)]
        user: Option<UserId>,
        /// Restrict to this video instance
        #[arg(long)]
        module: Option<ModuleId>,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Session ID
    id: String,
    /// User ID
    user_id: String,
    /// State
    state: String,
    /// Percent watched
    percent: String,
    /// Watch time
    watch_time: String,
    /// Last position
    position: String,
    /// Started
    started: String,
}

impl From<&WatchSession> for SessionRow {
    fn from(s: &WatchSession) -> Self {
        Self {
            id: s.id.to_string(),
            user_id: s.user_id.to_string(),
            state: s.state.to_string(),
            percent: format!("{:.1}%", s.percent_watched * 100.0),
            watch_time: format!("{:.0}s", s.cumulative_watch_time),
            position: format!("{:.1}s", s.current_position),
            started: s.started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Completion rule display row
#[derive(Debug, Serialize, Tabled)]
struct RuleRow {
    /// Rule
    rule: String,
    /// Satisfied
    satisfied: String,
    /// Threshold
    threshold: String,
    /// Observed
    observed: String,
}

impl From<&RuleOutcome> for RuleRow {
    fn from(o: &RuleOutcome) -> Self {
        Self {
            rule: o.rule.to_string(),
            satisfied: if o.satisfied { "✓" } else { "✗" }.to_string(),
            threshold: o.threshold.map(|t| t.to_string()).unwrap_or_else(|| "-".to_string()),
            observed: o.observed.to_string(),
        }
    }
}

/// Execute session commands
pub async fn execute(
    args: &SessionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let state = super::build_state(config).await?;
    let ctx = RequestContext::system();

    match &args.command {
        SessionCommand::List {
            module,
            page,
            per_page,
        } => {
            let page = state
                .tracker
                .list_sessions(&ctx, *module, PageRequest::new(*page, *per_page))
                .await?;
            match format {
                OutputFormat::Json => output::print_item(&page, format),
                OutputFormat::Table => {
                    let rows: Vec<SessionRow> = page.items.iter().map(SessionRow::from).collect();
                    output::print_list(&rows, format);
                    println!(
                        "Page {} of {} ({} sessions)",
                        page.page, page.total_pages, page.total_items
                    );
                }
            }
        }
        SessionCommand::Summary { module, user } => {
            let summary = state.tracker.summarize(*module, *user).await?;
            output::print_item(&summary, format);
        }
        SessionCommand::Completion { module, user } => {
            let status = state.tracker.completion_status(*module, *user).await?;
            if !status.has_rules() {
                output::print_warning("No completion rules are configured for this instance.");
                return Ok(());
            }
            let rows: Vec<RuleRow> = status.outcomes.iter().map(RuleRow::from).collect();
            output::print_list(&rows, format);
            if status.is_complete() {
                output::print_success("Complete");
            }
        }
        SessionCommand::Erase {
            user,
            module,
            force,
        } => {
            let (prompt, scope) = match (user, module) {
                (Some(u), Some(m)) => (
                    format!("Delete all watch data of user {u} on instance {m}?"),
                    Scope::ModuleUser(*m, *u),
                ),
                (Some(u), None) => (
                    format!("Delete all watch data of user {u}?"),
                    Scope::User(*u),
                ),
                (None, Some(m)) => (
                    format!("Delete all watch data on instance {m}?"),
                    Scope::Module(*m),
                ),
                (None, None) => {
                    return Err(AppError::validation("Pass --user, --module, or both"));
                }
            };

            if !super::confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }

            let deleted = match scope {
                Scope::User(u) => state.privacy.erase_user(&ctx, u).await?,
                Scope::Module(m) => state.privacy.erase_module(&ctx, m).await?,
                Scope::ModuleUser(m, u) => state.privacy.erase_module_user(&ctx, m, u).await?,
            };
            output::print_success(&format!("Deleted {deleted} sessions"));
        }
    }

    Ok(())
}

enum Scope {
    User(UserId),
    Module(ModuleId),
    ModuleUser(ModuleId, UserId),
}
