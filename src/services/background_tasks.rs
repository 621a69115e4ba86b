use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use crate::repositories::{QuestionRepository, SessionRepository};

/// Runs the one-time storage layout migration without delaying startup.
pub fn spawn_legacy_migration(repository: Arc<dyn QuestionRepository>) -> JoinHandle<()> {
    tokio::spawn(async move {
        match repository.migrate_legacy_layout().await {
            Ok(report) if report.already_current => {
                log::debug!("Question storage layout is current");
            }
            Ok(report) => log::info!(
                "Question storage migration finished: {} moved, {} merged, {} skipped, {} failed",
                report.migrated,
                report.merged,
                report.skipped,
                report.failed
            ),
            Err(err) => log::error!("Question storage migration failed: {}", err),
        }
    })
}

pub fn spawn_session_sweeper(
    sessions: Arc<dyn SessionRepository>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            match sessions.purge_expired().await {
                Ok(0) => {}
                Ok(removed) => log::info!("Purged {} expired sessions", removed),
                Err(err) => log::warn!("Session sweep failed: {}", err),
            }
        }
    })
}
