use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::error::Result;
use crate::repository::consent::ConsentRepository;
use crate::repository::results::ResultRepository;
use crate::services::leaderboard::{self, LeaderboardConfig};
use crate::services::report;

/// One broadcast destination could not be reached. Logged and counted,
/// never fatal for the cycle.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("destination rejected the message: {0}")]
    Rejected(String),

    #[error("delivery timed out")]
    Timeout,
}

/// Delivery seam towards the chat platform. One call per configured
/// destination; implementations must be time-bounded and must not
/// retry indefinitely.
#[async_trait]
pub trait BroadcastSink: Send + Sync {
    async fn send(&self, destination: &str, text: &str) -> std::result::Result<(), DeliveryError>;
}

#[derive(Debug, Clone)]
pub struct PublicationConfig {
    pub destinations: Vec<String>,
    pub leaderboard: LeaderboardConfig,
    /// Cosmetic closing lines; one is picked deterministically per period.
    pub closing_lines: Vec<String>,
}

#[derive(Debug)]
pub struct DeliveryOutcome {
    pub destination: String,
    pub result: std::result::Result<(), DeliveryError>,
}

#[derive(Debug)]
pub enum PublicationReport {
    /// Empty store: nothing sent, nothing reset.
    NothingToPublish,
    /// At least one destination received the leaderboard; the period
    /// was archived and the store cleared.
    Published {
        period: String,
        deliveries: Vec<DeliveryOutcome>,
        archived: u64,
    },
    /// Every delivery failed; the store was left untouched so the
    /// period's data is not lost.
    BroadcastFailed { deliveries: Vec<DeliveryOutcome> },
}

impl PublicationReport {
    pub fn succeeded(&self) -> bool {
        !matches!(self, PublicationReport::BroadcastFailed { .. })
    }
}

/// Run one publication cycle: snapshot, rank, format, broadcast to all
/// destinations independently, then archive-and-reset — but only when
/// at least one delivery went through.
///
/// The period label is derived from `now`, so a retried cycle archives
/// under the same key instead of duplicating.
pub async fn run(
    pool: &SqlitePool,
    sink: &dyn BroadcastSink,
    config: &PublicationConfig,
    now: DateTime<Utc>,
) -> Result<PublicationReport> {
    let results = ResultRepository::new(pool).list_all().await?;

    if results.is_empty() {
        tracing::info!("no results stored, skipping publication");
        return Ok(PublicationReport::NothingToPublish);
    }

    let minors = ConsentRepository::new(pool).minor_ids().await?;
    let view = leaderboard::rank(&results, &minors, &config.leaderboard, None);

    let closing = report::pick_closing_line(&config.closing_lines, now.timestamp() as u64);
    let message = report::render_publication(&view, closing);

    let mut deliveries = Vec::with_capacity(config.destinations.len());
    for destination in &config.destinations {
        let result = sink.send(destination, &message).await;

        match &result {
            Ok(()) => tracing::info!(destination, "leaderboard published"),
            Err(err) => tracing::error!(destination, error = %err, "leaderboard delivery failed"),
        }

        deliveries.push(DeliveryOutcome {
            destination: destination.clone(),
            result,
        });
    }

    let delivered = deliveries.iter().filter(|d| d.result.is_ok()).count();

    if delivered == 0 {
        tracing::error!("no destination reachable, keeping results for a retry");
        return Ok(PublicationReport::BroadcastFailed { deliveries });
    }

    let period = now.format("%Y-%m-%d").to_string();
    let archived = ResultRepository::new(pool).archive_and_reset(&period).await?;

    Ok(PublicationReport::Published {
        period,
        deliveries,
        archived,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use crate::models::NewResult;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Sink that records every call and fails for configured destinations.
    struct RecordingSink {
        failing: HashSet<String>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingSink {
        fn new(failing: &[&str]) -> Self {
            Self {
                failing: failing.iter().map(|s| s.to_string()).collect(),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent_to(&self) -> Vec<String> {
            self.sent.lock().unwrap().iter().map(|(d, _)| d.clone()).collect()
        }
    }

    #[async_trait]
    impl BroadcastSink for RecordingSink {
        async fn send(
            &self,
            destination: &str,
            text: &str,
        ) -> std::result::Result<(), DeliveryError> {
            if self.failing.contains(destination) {
                return Err(DeliveryError::Transport("connection refused".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((destination.to_string(), text.to_string()));
            Ok(())
        }
    }

    async fn test_db() -> Database {
        let db = Database::new("sqlite::memory:").await.expect("connect");
        db.init_schema().await.expect("schema");
        db
    }

    async fn seed(db: &Database, id: i64, series: i64, tens: i64) {
        ResultRepository::new(db.pool())
            .upsert_if_better(&NewResult {
                participant_id: id,
                first_name: format!("Shooter{id}"),
                last_name: None,
                handle: None,
                best_series: series,
                accessory_tens: tens,
            })
            .await
            .unwrap();
    }

    fn config(destinations: &[&str]) -> PublicationConfig {
        PublicationConfig {
            destinations: destinations.iter().map(|s| s.to_string()).collect(),
            leaderboard: LeaderboardConfig::default(),
            closing_lines: vec!["Great season, everyone!".to_string()],
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 31, 9, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_store_publishes_nothing() {
        let db = test_db().await;
        let sink = RecordingSink::new(&[]);

        let report = run(db.pool(), &sink, &config(&["chat-1"]), fixed_now())
            .await
            .unwrap();

        assert!(matches!(report, PublicationReport::NothingToPublish));
        assert!(sink.sent_to().is_empty());
    }

    #[tokio::test]
    async fn successful_broadcast_archives_and_clears() {
        let db = test_db().await;
        seed(&db, 1, 95, 3).await;
        seed(&db, 2, 70, 1).await;
        let sink = RecordingSink::new(&[]);

        let report = run(db.pool(), &sink, &config(&["chat-1", "chat-2"]), fixed_now())
            .await
            .unwrap();

        match report {
            PublicationReport::Published {
                period,
                deliveries,
                archived,
            } => {
                assert_eq!(period, "2026-08-31");
                assert_eq!(archived, 2);
                assert_eq!(deliveries.len(), 2);
                assert!(deliveries.iter().all(|d| d.result.is_ok()));
            }
            other => panic!("unexpected report: {other:?}"),
        }

        let repo = ResultRepository::new(db.pool());
        assert!(repo.list_all().await.unwrap().is_empty());
        assert_eq!(repo.list_archived("2026-08-31").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn partial_failure_still_resets() {
        let db = test_db().await;
        seed(&db, 1, 85, 2).await;
        let sink = RecordingSink::new(&["chat-down"]);

        let report = run(
            db.pool(),
            &sink,
            &config(&["chat-down", "chat-up"]),
            fixed_now(),
        )
        .await
        .unwrap();

        assert!(report.succeeded());
        assert_eq!(sink.sent_to(), vec!["chat-up"]);
        assert!(
            ResultRepository::new(db.pool())
                .list_all()
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn total_failure_leaves_store_untouched() {
        let db = test_db().await;
        seed(&db, 1, 85, 2).await;
        let sink = RecordingSink::new(&["chat-1", "chat-2"]);

        let report = run(db.pool(), &sink, &config(&["chat-1", "chat-2"]), fixed_now())
            .await
            .unwrap();

        match report {
            PublicationReport::BroadcastFailed { deliveries } => {
                assert_eq!(deliveries.len(), 2);
                assert!(deliveries.iter().all(|d| d.result.is_err()));
            }
            other => panic!("unexpected report: {other:?}"),
        }

        let repo = ResultRepository::new(db.pool());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert!(repo.list_archived("2026-08-31").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn message_contains_closing_line_and_tables() {
        let db = test_db().await;
        seed(&db, 1, 93, 6).await;
        let sink = RecordingSink::new(&[]);

        run(db.pool(), &sink, &config(&["chat-1"]), fixed_now())
            .await
            .unwrap();

        let sent = sink.sent.lock().unwrap();
        let (_, text) = &sent[0];
        assert!(text.contains("93-6x"));
        assert!(text.contains("Great season, everyone!"));
    }
}
