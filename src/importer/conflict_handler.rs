// ==========================================
// Prospect Intake - Conflict Handler
// ==========================================
// Responsibility: collapse exact duplicate rows after normalization
// Key: every normalized field (source position excluded)
// ==========================================

use crate::domain::{ProspectRecord, ProspectRow};
use crate::importer::prospect_importer_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashSet;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    /// First occurrence wins; relative order of kept rows is unchanged.
    fn collapse_duplicates(&self, rows: Vec<ProspectRow>) -> (Vec<ProspectRow>, Vec<usize>) {
        let mut seen: HashSet<ProspectRecord> = HashSet::with_capacity(rows.len());
        let mut kept = Vec::with_capacity(rows.len());
        let mut removed = Vec::new();

        for row in rows {
            if seen.contains(&row.record) {
                removed.push(row.row_index);
            } else {
                seen.insert(row.record.clone());
                kept.push(row);
            }
        }

        (kept, removed)
    }
}
