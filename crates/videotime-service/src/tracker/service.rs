//! The watch session tracker.
//!
//! Progress mutations are single atomic store calls. Notifications go out
//! only after the store has accepted the change, and a failed notification
//! is logged without affecting the result.

use std::sync::Arc;

use tracing::{debug, info, warn};

use videotime_core::config::TrackerConfig;
use videotime_core::error::AppError;
use videotime_core::events::{DomainEvent, WatchEvent};
use videotime_core::result::AppResult;
use videotime_core::traits::CompletionNotifier;
use videotime_core::types::completion::CompletionStatus;
use videotime_core::types::id::{ModuleId, UserId, WatchSessionId};
use videotime_core::types::pagination::{PageRequest, PageResponse};
use videotime_database::WatchSessionStore;
use videotime_entity::completion::CompletionRules;
use videotime_entity::user::UserRole;
use videotime_entity::watch::{WatchSession, WatchSummary};

use super::resume::resume_position;
use super::seek::SeekDecision;
use super::validate;
use crate::context::RequestContext;
use crate::instance::InstanceService;

/// Tracks per-user watch progress on video instances.
#[derive(Debug, Clone)]
pub struct WatchSessionTracker {
    sessions: Arc<dyn WatchSessionStore>,
    instances: Arc<InstanceService>,
    notifier: Arc<dyn CompletionNotifier>,
    config: TrackerConfig,
}

impl WatchSessionTracker {
    /// Creates a new tracker.
    pub fn new(
        sessions: Arc<dyn WatchSessionStore>,
        instances: Arc<InstanceService>,
        notifier: Arc<dyn CompletionNotifier>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            sessions,
            instances,
            notifier,
            config,
        }
    }

    /// Tracker configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Return the user's open session on the instance, opening one if needed.
    ///
    /// With `new_session_after_finish` disabled, a user whose latest session
    /// is finished gets that session back instead of a new one.
    pub async fn get_or_create_session(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<WatchSession> {
        if !self.config.new_session_after_finish {
            if let Some(latest) = self.sessions.find_latest(module_id, user_id).await? {
                if latest.is_finished() {
                    debug!(session_id = %latest.id, "Reusing finished session");
                    return Ok(latest);
                }
            }
        }

        let (session, created) = self.sessions.get_or_create_open(module_id, user_id).await?;

        if created {
            info!(
                session_id = %session.id,
                module_id = %module_id,
                user_id = %user_id,
                "Watch session started"
            );
            self.publish(
                Some(user_id),
                WatchEvent::SessionCreated {
                    session_id: session.id,
                    module_id,
                    user_id,
                },
            )
            .await;
        }

        Ok(session)
    }

    /// Add played seconds to a session.
    pub async fn record_tick(
        &self,
        ctx: &RequestContext,
        session_id: WatchSessionId,
        elapsed_seconds: f64,
    ) -> AppResult<WatchSession> {
        let elapsed_seconds = validate::seconds("elapsed_seconds", elapsed_seconds)?;
        self.authorize(ctx, session_id).await?;

        let session = self
            .sessions
            .add_watch_time(session_id, elapsed_seconds)
            .await?
            .ok_or_else(|| session_not_found(session_id))?;

        debug!(
            session_id = %session_id,
            elapsed_seconds,
            total = session.cumulative_watch_time,
            "Tick recorded"
        );
        Ok(session)
    }

    /// Record the playback position.
    pub async fn record_position(
        &self,
        ctx: &RequestContext,
        session_id: WatchSessionId,
        percent: f64,
        current_time: f64,
    ) -> AppResult<WatchSession> {
        let percent = validate::fraction("percent", percent)?;
        let current_time = validate::seconds("current_time", current_time)?;
        self.authorize(ctx, session_id).await?;

        let session = self
            .sessions
            .record_position(session_id, percent, current_time)
            .await?
            .ok_or_else(|| session_not_found(session_id))?;

        debug!(
            session_id = %session_id,
            percent,
            current_time,
            percent_watched = session.percent_watched,
            "Position recorded"
        );
        Ok(session)
    }

    /// Record playback end, then hand the completion snapshot downstream.
    pub async fn record_finish(
        &self,
        ctx: &RequestContext,
        session_id: WatchSessionId,
        final_percent: f64,
        final_time: f64,
    ) -> AppResult<WatchSession> {
        let final_percent = validate::fraction("final_percent", final_percent)?;
        let final_time = validate::seconds("final_time", final_time)?;
        self.authorize(ctx, session_id).await?;

        let (session, transitioned) = self
            .sessions
            .record_finish(session_id, final_percent, final_time)
            .await?
            .ok_or_else(|| session_not_found(session_id))?;

        if transitioned {
            info!(
                session_id = %session_id,
                module_id = %session.module_id,
                user_id = %session.user_id,
                watch_time = session.cumulative_watch_time,
                "Watch session finished"
            );
            self.publish(
                Some(ctx.user_id),
                WatchEvent::SessionFinished {
                    session_id,
                    module_id: session.module_id,
                    user_id: session.user_id,
                },
            )
            .await;
        }

        self.publish_completion(session.module_id, session.user_id)
            .await;
        Ok(session)
    }

    /// Seconds at which playback should start for a returning user.
    pub async fn compute_resume_time(
        &self,
        module_id: ModuleId,
        user_id: UserId,
        video_duration: f64,
    ) -> AppResult<f64> {
        let video_duration = validate::seconds("duration", video_duration)?;

        let settings = self.instances.effective(module_id).await?;
        if !settings.resume_playback {
            return Ok(0.0);
        }

        let latest = self.sessions.find_latest(module_id, user_id).await?;
        Ok(resume_position(
            latest.map(|s| s.current_position),
            video_duration,
            self.config.resume_end_tolerance_seconds,
        ))
    }

    /// Which configured rules a session satisfies.
    pub fn evaluate_completion(
        session: &WatchSession,
        rules: &CompletionRules,
    ) -> CompletionStatus {
        rules.evaluate(session)
    }

    /// Aggregate of every session the user has on the instance.
    pub async fn summarize(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<WatchSummary> {
        let sessions = self.sessions.find_all_for(module_id, user_id).await?;
        Ok(WatchSummary::from_sessions(module_id, user_id, &sessions))
    }

    /// Completion rules evaluated over all of the user's visits.
    pub async fn completion_status(
        &self,
        module_id: ModuleId,
        user_id: UserId,
    ) -> AppResult<CompletionStatus> {
        let settings = self.instances.effective(module_id).await?;
        let summary = self.summarize(module_id, user_id).await?;
        Ok(settings.rules.evaluate(&summary))
    }

    /// Record that the activity page was viewed.
    pub async fn log_viewed(&self, module_id: ModuleId, user_id: UserId) -> AppResult<()> {
        debug!(module_id = %module_id, user_id = %user_id, "Module viewed");
        self.publish(Some(user_id), WatchEvent::ModuleViewed { module_id, user_id })
            .await;
        self.publish_completion(module_id, user_id).await;
        Ok(())
    }

    /// Whether the player may seek a session to `target_percent`.
    pub async fn check_seek(
        &self,
        ctx: &RequestContext,
        session_id: WatchSessionId,
        target_percent: f64,
    ) -> AppResult<SeekDecision> {
        let target_percent = validate::fraction("percent", target_percent)?;
        let session = self.authorize(ctx, session_id).await?;
        let settings = self.instances.effective(session.module_id).await?;

        let decision = SeekDecision::decide(
            settings.prevent_fast_forwarding,
            session.percent_watched,
            target_percent,
            self.config.seek_epsilon,
        );
        if !decision.allowed {
            debug!(
                session_id = %session_id,
                target_percent,
                max_percent = decision.max_percent,
                "Seek denied"
            );
        }
        Ok(decision)
    }

    /// Sessions on an instance, newest first.
    pub async fn list_sessions(
        &self,
        ctx: &RequestContext,
        module_id: ModuleId,
        page: PageRequest,
    ) -> AppResult<PageResponse<WatchSession>> {
        ctx.require_role(UserRole::Teacher)?;
        self.sessions.list_by_module(module_id, page).await
    }

    /// Load a session the caller may change.
    async fn authorize(
        &self,
        ctx: &RequestContext,
        session_id: WatchSessionId,
    ) -> AppResult<WatchSession> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| session_not_found(session_id))?;
        ctx.require_owner_or_admin(session.user_id)?;
        Ok(session)
    }

    async fn publish_completion(&self, module_id: ModuleId, user_id: UserId) {
        match self.completion_status(module_id, user_id).await {
            Ok(status) if status.has_rules() => {
                self.publish(
                    Some(user_id),
                    WatchEvent::CompletionUpdated {
                        module_id,
                        user_id,
                        status,
                    },
                )
                .await;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    module_id = %module_id,
                    user_id = %user_id,
                    error = %e,
                    "Completion evaluation failed"
                );
            }
        }
    }

    async fn publish(&self, actor_id: Option<UserId>, event: WatchEvent) {
        let event = DomainEvent::new(actor_id, event);
        if let Err(e) = self.notifier.notify(&event).await {
            warn!(
                event = event.payload.name(),
                module_id = %event.payload.module_id(),
                user_id = %event.payload.user_id(),
                error = %e,
                "Completion notification failed"
            );
        }
    }
}

fn session_not_found(session_id: WatchSessionId) -> AppError {
    AppError::not_found(format!("Watch session {session_id} not found"))
}
