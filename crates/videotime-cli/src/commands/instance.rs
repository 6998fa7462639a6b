//! Video instance CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;

use videotime_core::error::AppError;
use videotime_core::types::id::ModuleId;
use videotime_entity::instance::{EffectiveSettings, VideoInstance};
use videotime_service::RequestContext;

use crate::output::{self, OutputFormat};

/// Arguments for instance commands
#[derive(Debug, Args)]
pub struct InstanceArgs {
    /// Instance subcommand
    #[command(subcommand)]
    pub command: InstanceCommand,
}

/// Instance subcommands
#[derive(Debug, Subcommand)]
pub enum InstanceCommand {
    /// Show stored and effective settings
    Show {
        /// Video instance ID
        module: ModuleId,
    },
    /// Remove an instance's stored settings (sessions are kept)
    Delete {
        /// Video instance ID
        module: ModuleId,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize)]
struct InstanceView {
    instance: Option<VideoInstance>,
    effective: EffectiveSettings,
}

/// Execute instance commands
pub async fn execute(
    args: &InstanceArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let state = super::build_state(config).await?;

    match &args.command {
        InstanceCommand::Show { module } => {
            let view = InstanceView {
                instance: state.instances.get(*module).await?,
                effective: state.instances.effective(*module).await?,
            };
            if view.instance.is_none() {
                output::print_warning("Instance is not configured; site defaults apply.");
            }
            output::print_item(&view, format);
        }
        InstanceCommand::Delete { module, force } => {
            if !super::confirm(&format!("Delete settings of instance {module}?"), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            if state
                .instances
                .delete(&RequestContext::system(), *module)
                .await?
            {
                output::print_success(&format!("Instance {module} deleted"));
            } else {
                output::print_warning(&format!("Instance {module} was not configured"));
            }
        }
    }

    Ok(())
}
