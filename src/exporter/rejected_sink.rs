// ==========================================
// Prospect Intake - Rejected Records Sink (CSV)
// ==========================================
// Columns: the 14 input columns (normalized values) + localized reason column
// The header row is always written, even with zero records.
// ==========================================

use crate::domain::RejectedRecord;
use crate::i18n;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::columns;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{info, instrument};

pub struct RejectedCsvSink {
    locale: String,
}

fn write_error(err: impl std::fmt::Display) -> ImportError {
    ImportError::FileWriteError(err.to_string())
}

impl RejectedCsvSink {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
        }
    }

    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = columns::INPUT_COLUMNS.iter().map(|c| c.to_string()).collect();
        header.push(i18n::t_in("output.reason_column", &self.locale));
        header
    }

    /// Write every rejected record to `writer`
    pub fn write_to<W: Write>(&self, writer: W, rejected: &[RejectedRecord]) -> ImportResult<()> {
        let mut csv_writer = Writer::from_writer(writer);
        csv_writer.write_record(self.header()).map_err(write_error)?;

        for item in rejected {
            let r = &item.row.record;
            let birth_date = r.birth_date.to_canonical_string();
            // same order as columns::INPUT_COLUMNS
            csv_writer
                .write_record([
                    r.name.as_str(),
                    r.street.as_str(),
                    r.district.as_str(),
                    r.city.as_str(),
                    r.region.as_str(),
                    r.course.as_str(),
                    r.tax_id.as_str(),
                    birth_date.as_str(),
                    r.phone.as_str(),
                    r.institution.as_str(),
                    r.postal_code.as_str(),
                    r.email.as_str(),
                    r.street_number.as_str(),
                    r.registration_code.as_str(),
                    item.reason_text.as_str(),
                ])
                .map_err(write_error)?;
        }

        csv_writer.flush().map_err(write_error)?;
        Ok(())
    }

    #[instrument(skip(self, rejected), fields(count = rejected.len()))]
    pub fn write(&self, path: &Path, rejected: &[RejectedRecord]) -> ImportResult<()> {
        let file = File::create(path)
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.display(), e)))?;
        self.write_to(file, rejected)?;
        info!(path = %path.display(), "rejected records written");
        Ok(())
    }
}
