// ==========================================
// Prospect Intake - Prospect Importer Implementation
// ==========================================
// Responsibility: drive one intake run from input file to output files
// Flow: parse → map → (load existing index) → normalize → dedup
//       → validate → route → classify → project → write
// Both datasets are loaded before anything is written.
// ==========================================

use crate::config::IntakeConfigReader;
use crate::domain::{
    ClassificationTag, ClassifiedRecord, CustomerDocument, ProspectRow, RawProspectRecord,
    RejectedRecord, RunSummary,
};
use crate::engine::{
    ExistingSystemIndex, OptionalEventPublisher, PipelineEvent, PipelineEventPublisher,
    ProspectValidator, RecordClassifier, Routed,
};
use crate::exporter::{build_documents, write_outputs};
use crate::importer::error::ImportResult;
use crate::importer::prospect_importer_trait::{
    ConflictHandler, DataCleaner, FieldMapper, FileParser, ProspectImporter,
};
use crate::lookup::PostalLookup;
use crate::repository::ExistingSystemRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// Run input / output types
// ==========================================

/// One intake run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeRequest {
    pub input_path: PathBuf,
    pub rejected_path: PathBuf,
    pub accepted_path: PathBuf,
    pub today: NaiveDate, // reference date for the age rule
}

/// In-memory result of stages 3-6
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub summary: RunSummary,
    pub rejected: Vec<RejectedRecord>,
    pub classified: Vec<ClassifiedRecord>,
    pub documents: Vec<CustomerDocument>,
}

/// Completed run: outcome plus where it was written
#[derive(Debug, Clone)]
pub struct IntakeReport {
    pub outcome: IntakeOutcome,
    pub rejected_path: PathBuf,
    pub accepted_path: PathBuf,
    pub elapsed: Duration,
}

impl IntakeReport {
    pub fn summary(&self) -> &RunSummary {
        &self.outcome.summary
    }
}

/// Per-run settings read from config once
struct RunSettings {
    locale: String,
    min_age_years: i64,
}

// ==========================================
// ProspectImporterImpl
// ==========================================
pub struct ProspectImporterImpl<R, C>
where
    R: ExistingSystemRepository,
    C: IntakeConfigReader,
{
    // system of record
    existing_repo: R,

    config: C,

    // external collaborator
    postal_lookup: Arc<dyn PostalLookup>,

    // pipeline components
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    conflict_handler: Box<dyn ConflictHandler>,

    events: OptionalEventPublisher,
}

impl<R, C> ProspectImporterImpl<R, C>
where
    R: ExistingSystemRepository,
    C: IntakeConfigReader,
{
    pub fn new(
        existing_repo: R,
        config: C,
        postal_lookup: Arc<dyn PostalLookup>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        conflict_handler: Box<dyn ConflictHandler>,
    ) -> Self {
        Self {
            existing_repo,
            config,
            postal_lookup,
            file_parser,
            field_mapper,
            data_cleaner,
            conflict_handler,
            events: OptionalEventPublisher::none(),
        }
    }

    pub fn with_event_publisher(mut self, publisher: Arc<dyn PipelineEventPublisher>) -> Self {
        self.events = OptionalEventPublisher::with_publisher(publisher);
        self
    }

    async fn load_settings(&self) -> ImportResult<RunSettings> {
        Ok(RunSettings {
            locale: self.config.get_locale().await?,
            min_age_years: self.config.get_min_age_years().await?,
        })
    }

    async fn load_existing_index(&self) -> ImportResult<ExistingSystemIndex> {
        let values = self.existing_repo.load_tax_ids().await?;
        let index = ExistingSystemIndex::build(values, &*self.data_cleaner);
        info!(
            source = %self.existing_repo.source_name(),
            known_tax_ids = index.len(),
            "existing system index built"
        );
        Ok(index)
    }

    /// Stages 3-6 for one run
    async fn run_pipeline(
        &self,
        run_id: Uuid,
        records: Vec<RawProspectRecord>,
        index: &ExistingSystemIndex,
        today: NaiveDate,
        settings: &RunSettings,
    ) -> IntakeOutcome {
        let total_read = records.len();

        // === normalize ===
        let rows: Vec<ProspectRow> = records
            .iter()
            .map(|raw| ProspectRow {
                row_index: raw.row_index,
                record: self.data_cleaner.normalize(raw),
            })
            .collect();

        // === dedup ===
        let (rows, removed_rows) = self.conflict_handler.collapse_duplicates(rows);
        let duplicates_removed = removed_rows.len();
        if duplicates_removed > 0 {
            self.events.publish(PipelineEvent::DuplicatesCollapsed {
                run_id,
                removed_rows,
            });
        }
        debug!(kept = rows.len(), duplicates_removed, "normalization complete");

        // === validate + route (sequential: one lookup at a time) ===
        let validator = ProspectValidator::new(self.postal_lookup.clone(), settings.min_age_years);
        let classifier = RecordClassifier::new(&settings.locale);

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for row in rows {
            let outcome = validator.validate(&row.record, today).await;
            match classifier.route(row, outcome) {
                Routed::Accepted(row) => accepted.push(row),
                Routed::Rejected(record) => {
                    self.events.publish(PipelineEvent::RecordRejected {
                        run_id,
                        row_index: record.row.row_index,
                        reasons: record.reasons.clone(),
                    });
                    rejected.push(record);
                }
            }
        }

        // === classify ===
        let classified = classifier.classify(accepted, index);
        for item in &classified {
            self.events.publish(PipelineEvent::RecordAccepted {
                run_id,
                row_index: item.row.row_index,
                tag: item.tag,
            });
        }

        // === project ===
        let documents = build_documents(&classified);

        let updates = classified
            .iter()
            .filter(|c| c.tag == ClassificationTag::Update)
            .count();
        let summary = RunSummary {
            run_id,
            total_read,
            duplicates_removed,
            total_valid: classified.len(),
            total_invalid: rejected.len(),
            inserts: classified.len() - updates,
            updates,
        };
        if summary.unaccounted() != 0 {
            error!(unaccounted = summary.unaccounted(), "record count mismatch");
        }

        IntakeOutcome {
            summary,
            rejected,
            classified,
            documents,
        }
    }
}

// ==========================================
// ProspectImporter implementation
// ==========================================
#[async_trait]
impl<R, C> ProspectImporter for ProspectImporterImpl<R, C>
where
    R: ExistingSystemRepository,
    C: IntakeConfigReader,
{
    #[instrument(skip(self, request), fields(run_id, input = %request.input_path.display()))]
    async fn import_file(&self, request: &IntakeRequest) -> ImportResult<IntakeReport> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!("intake started");

        let settings = self.load_settings().await?;

        // === 1. load input (fatal) ===
        let table = self
            .file_parser
            .parse_to_raw_table(&request.input_path)
            .map_err(|e| {
                error!(error = %e, "input loading failed");
                e
            })?;
        let source_name = request.input_path.display().to_string();
        self.field_mapper.check_columns(&source_name, &table.headers)?;

        // === 2. load existing system (fatal) ===
        let index = self.load_existing_index().await.map_err(|e| {
            error!(error = %e, "existing system loading failed");
            e
        })?;

        self.events.publish(PipelineEvent::InputLoaded {
            run_id,
            total_read: table.len(),
            existing_count: index.len(),
        });

        // === 3. field mapping ===
        let records: Vec<RawProspectRecord> = table
            .rows
            .iter()
            .map(|(row_index, cells)| self.field_mapper.map_to_raw_prospect(cells, *row_index))
            .collect();

        // === 4-7. normalize, validate, classify, project ===
        let outcome = self
            .run_pipeline(run_id, records, &index, request.today, &settings)
            .await;

        // === 8. write outputs ===
        write_outputs(
            &settings.locale,
            &request.rejected_path,
            &outcome.rejected,
            &request.accepted_path,
            &outcome.documents,
        )?;

        self.events.publish(PipelineEvent::RunCompleted {
            summary: outcome.summary.clone(),
        });

        let elapsed = start_time.elapsed();
        info!(
            total_read = outcome.summary.total_read,
            valid = outcome.summary.total_valid,
            invalid = outcome.summary.total_invalid,
            elapsed_ms = elapsed.as_millis() as u64,
            "intake finished"
        );

        Ok(IntakeReport {
            outcome,
            rejected_path: request.rejected_path.clone(),
            accepted_path: request.accepted_path.clone(),
            elapsed,
        })
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn process_records(
        &self,
        records: Vec<RawProspectRecord>,
        today: NaiveDate,
    ) -> ImportResult<IntakeOutcome> {
        let settings = self.load_settings().await?;
        let index = self.load_existing_index().await?;
        Ok(self
            .run_pipeline(Uuid::new_v4(), records, &index, today, &settings)
            .await)
    }
}
