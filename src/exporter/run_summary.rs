// ==========================================
// Prospect Intake - Run Summary Report
// ==========================================
// Localized console lines for a finished run
// ==========================================

use crate::domain::RunSummary;
use crate::i18n;

/// One line per counter, in report order
///
/// `unaccounted` is always printed; anything but 0 means records were lost.
pub fn summary_lines(summary: &RunSummary, locale: &str) -> Vec<String> {
    let counters: [(&str, String); 7] = [
        ("message.summary_read", summary.total_read.to_string()),
        ("message.summary_duplicates", summary.duplicates_removed.to_string()),
        ("message.summary_valid", summary.total_valid.to_string()),
        ("message.summary_invalid", summary.total_invalid.to_string()),
        ("message.summary_unaccounted", summary.unaccounted().to_string()),
        ("message.summary_inserts", summary.inserts.to_string()),
        ("message.summary_updates", summary.updates.to_string()),
    ];

    counters
        .iter()
        .map(|(key, count)| i18n::t_in_with_args(key, locale, &[("count", count)]))
        .collect()
}
