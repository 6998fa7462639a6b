//! Activity details and completion requirements.

use super::{TabContext, TabPlugin};

/// Describes the activity and what counts as completing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InformationTab;

impl TabPlugin for InformationTab {
    fn name(&self) -> &str {
        "information"
    }

    fn label(&self) -> &str {
        "Information"
    }

    fn render_context(&self, ctx: &TabContext<'_>) -> serde_json::Value {
        let rules = &ctx.settings.rules;
        let mut requirements = Vec::new();
        if rules.on_finish {
            requirements.push("Watch until the end".to_string());
        }
        if let Some(percent) = rules.on_percent {
            requirements.push(format!("Watch {percent}% of the video"));
        }
        if let Some(seconds) = rules.on_view_time {
            requirements.push(format!("Watch for at least {seconds} seconds"));
        }

        serde_json::json!({
            "name": ctx.name,
            "video_url": ctx.settings.video_url,
            "completion_requirements": requirements,
        })
    }
}
