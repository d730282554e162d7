// ==========================================
// Prospect Intake - Pipeline Events
// ==========================================
// Responsibility: stage notifications emitted by the importer
// The importer only knows the trait; sinks decide what to do
// (tracing log, test recorder, nothing).
// ==========================================

use crate::domain::{ClassificationTag, RejectionReason, RunSummary};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// Event types
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Both datasets loaded; nothing written yet
    InputLoaded {
        run_id: Uuid,
        total_read: usize,
        existing_count: usize,
    },
    /// Exact duplicates removed by de-duplication
    DuplicatesCollapsed {
        run_id: Uuid,
        removed_rows: Vec<usize>,
    },
    RecordRejected {
        run_id: Uuid,
        row_index: usize,
        reasons: Vec<RejectionReason>,
    },
    RecordAccepted {
        run_id: Uuid,
        row_index: usize,
        tag: ClassificationTag,
    },
    /// Both outputs written
    RunCompleted { summary: RunSummary },
}

impl PipelineEvent {
    pub fn as_str(&self) -> &str {
        match self {
            PipelineEvent::InputLoaded { .. } => "InputLoaded",
            PipelineEvent::DuplicatesCollapsed { .. } => "DuplicatesCollapsed",
            PipelineEvent::RecordRejected { .. } => "RecordRejected",
            PipelineEvent::RecordAccepted { .. } => "RecordAccepted",
            PipelineEvent::RunCompleted { .. } => "RunCompleted",
        }
    }
}

// ==========================================
// Publisher Trait
// ==========================================

/// Receives pipeline events
///
/// # Returns
/// - Err: publishing failed; the importer logs it and carries on
pub trait PipelineEventPublisher: Send + Sync {
    fn publish(&self, event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Writes every event to the tracing subscriber
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl PipelineEventPublisher for TracingEventPublisher {
    fn publish(&self, event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        match &event {
            PipelineEvent::InputLoaded {
                run_id,
                total_read,
                existing_count,
            } => tracing::info!(%run_id, total_read, existing_count, "input loaded"),
            PipelineEvent::DuplicatesCollapsed {
                run_id,
                removed_rows,
            } => tracing::info!(%run_id, removed = removed_rows.len(), ?removed_rows, "duplicates collapsed"),
            PipelineEvent::RecordRejected {
                run_id,
                row_index,
                reasons,
            } => tracing::debug!(%run_id, row_index, ?reasons, "record rejected"),
            PipelineEvent::RecordAccepted {
                run_id,
                row_index,
                tag,
            } => tracing::debug!(%run_id, row_index, %tag, "record accepted"),
            PipelineEvent::RunCompleted { summary } => tracing::info!(
                run_id = %summary.run_id,
                total_read = summary.total_read,
                duplicates_removed = summary.duplicates_removed,
                total_valid = summary.total_valid,
                total_invalid = summary.total_invalid,
                inserts = summary.inserts,
                updates = summary.updates,
                "run completed"
            ),
        }
        Ok(())
    }
}

/// Drops every event (unit tests, library callers that don't care)
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl PipelineEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(event = event.as_str(), "NoOpEventPublisher: event skipped");
        Ok(())
    }
}

/// Wraps `Option<Arc<dyn PipelineEventPublisher>>`
#[derive(Clone, Default)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn PipelineEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn PipelineEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// Publish if configured; failures are logged, never propagated
    pub fn publish(&self, event: PipelineEvent) {
        if let Some(publisher) = &self.inner {
            let kind = event.as_str().to_string();
            if let Err(e) = publisher.publish(event) {
                tracing::warn!(event = %kind, error = %e, "event publishing failed");
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<PipelineEvent>>,
    }

    impl PipelineEventPublisher for Recorder {
        fn publish(&self, event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.events.lock().unwrap().push(event);
            Ok(())
        }
    }

    struct Failing;

    impl PipelineEventPublisher for Failing {
        fn publish(&self, _event: PipelineEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("sink closed".into())
        }
    }

    fn accepted() -> PipelineEvent {
        PipelineEvent::RecordAccepted {
            run_id: Uuid::nil(),
            row_index: 3,
            tag: ClassificationTag::Update,
        }
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(accepted()).unwrap();
        assert_eq!(json["type"], "record_accepted");
        assert_eq!(json["tag"], "UPDATE");
        assert_eq!(json["row_index"], 3);
    }

    #[test]
    fn test_optional_publisher_forwards() {
        let recorder = Arc::new(Recorder::default());
        let publisher = OptionalEventPublisher::with_publisher(recorder.clone());
        assert!(publisher.is_configured());

        publisher.publish(accepted());

        assert_eq!(recorder.events.lock().unwrap().as_slice(), &[accepted()]);
    }

    #[test]
    fn test_optional_publisher_none_and_failures_are_silent() {
        OptionalEventPublisher::none().publish(accepted());
        OptionalEventPublisher::with_publisher(Arc::new(Failing)).publish(accepted());
    }

    #[test]
    fn test_builtin_publishers_accept_all_events() {
        let summary = RunSummary {
            run_id: Uuid::nil(),
            total_read: 1,
            duplicates_removed: 0,
            total_valid: 1,
            total_invalid: 0,
            inserts: 1,
            updates: 0,
        };
        let events = vec![
            PipelineEvent::InputLoaded {
                run_id: Uuid::nil(),
                total_read: 1,
                existing_count: 0,
            },
            PipelineEvent::DuplicatesCollapsed {
                run_id: Uuid::nil(),
                removed_rows: vec![],
            },
            PipelineEvent::RecordRejected {
                run_id: Uuid::nil(),
                row_index: 0,
                reasons: vec![RejectionReason::InvalidPhone],
            },
            accepted(),
            PipelineEvent::RunCompleted { summary },
        ];
        for event in events {
            assert!(TracingEventPublisher.publish(event.clone()).is_ok());
            assert!(NoOpEventPublisher.publish(event).is_ok());
        }
    }
}
