// ==========================================
// Prospect Intake - Exporter Layer
// ==========================================
// Responsibility: project accepted records into wire documents,
// write both output files and render the run summary
// ==========================================

pub mod accepted_sink;
pub mod document_builder;
pub mod output_pair;
pub mod rejected_sink;
pub mod run_summary;

pub use accepted_sink::AcceptedJsonSink;
pub use document_builder::{build_documents, composite_id, split_phone, to_customer_document};
pub use output_pair::write_outputs;
pub use rejected_sink::RejectedCsvSink;
pub use run_summary::summary_lines;
