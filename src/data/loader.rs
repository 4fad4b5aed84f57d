// ============================================================
// Layer 4 - Corpus Loader
// ============================================================
// Streams rows out of a delimited text file (CSV by default)
// using the csv crate.
//
// The header row is a configuration contract. Every configured
// column is resolved to an index once, up front. A missing
// column is fatal before any data row is read.
//
// Each data row then becomes one of:
//   - RowRead::Record     well-formed, fields picked by index
//   - RowRead::Malformed  field count differs from the header,
//                         or the row is not valid UTF-8
//
// An I/O failure while reading is fatal and propagates.
//
// Example (APCD hemistich layout):
//   الشطر الايمن,الشطر الايسر,البحر,القافية,الشاعر,...
//   خليلي لا تستعجلا...,وان تجمعا شملي...,الطويل,د,امرؤ القيس,...

use anyhow::{Context, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path};

use crate::domain::error::PrepError;
use crate::domain::record::{RawRecord, RowRead};
use crate::domain::traits::RecordSource;

/// Separator used when joining several grouping columns.
const GROUP_SEPARATOR: &str = " / ";

/// Which header names carry which field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Half-verse column (line layout) or h1 column (hemistich layout)
    pub text: String,

    /// h2 column; setting it switches to hemistich layout
    pub second: Option<String>,

    pub meter: String,

    /// Author-supplied rhyme column (hemistich layout only)
    pub rhyme: Option<String>,

    /// Columns that together identify a poem
    pub group: Vec<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            text:   "text".to_string(),
            second: None,
            meter:  "meter".to_string(),
            rhyme:  None,
            group:  Vec::new(),
        }
    }
}

/// Resolved column positions.
#[derive(Debug)]
struct ColumnIndex {
    text:   usize,
    second: Option<usize>,
    meter:  usize,
    rhyme:  Option<usize>,
    group:  Vec<usize>,
}

impl ColumnIndex {
    fn resolve(spec: &ColumnSpec, headers: &[String]) -> std::result::Result<Self, PrepError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name.trim())
                .ok_or_else(|| PrepError::MissingColumn {
                    column:    name.to_string(),
                    available: headers.to_vec(),
                })
        };

        Ok(Self {
            text:   find(spec.text.as_str())?,
            second: spec.second.as_deref().map(find).transpose()?,
            meter:  find(spec.meter.as_str())?,
            rhyme:  spec.rhyme.as_deref().map(find).transpose()?,
            group:  spec.group.iter().map(|g| find(g.as_str())).collect::<std::result::Result<_, _>>()?,
        })
    }
}

/// Reads corpus rows from a delimited file.
/// Implements the RecordSource trait from Layer 3.
pub struct CsvLoader {
    reader:  Reader<File>,
    columns: ColumnIndex,
    width:   usize,
    record:  StringRecord,
    row:     u64,
}

impl CsvLoader {
    /// Open `path`, read its header and resolve every configured column.
    pub fn open(path: &Path, spec: &ColumnSpec, delimiter: u8) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_path(path)
            .map_err(|e| PrepError::Input {
                path:   path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| PrepError::Input {
                path:   path.to_path_buf(),
                reason: format!("bad header row: {e}"),
            })?
            .iter()
            .map(|h| h.trim_start_matches('\u{FEFF}').trim().to_string())
            .collect();

        let columns = ColumnIndex::resolve(spec, &headers)
            .with_context(|| format!("Header check failed for '{}'", path.display()))?;

        tracing::debug!(
            "Opened '{}' with {} columns ({} layout)",
            path.display(),
            headers.len(),
            if columns.second.is_some() { "hemistich" } else { "line" },
        );

        Ok(Self {
            reader,
            columns,
            width: headers.len(),
            record: StringRecord::new(),
            row: 0,
        })
    }

    fn field(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or_default()
    }

    fn build_record(&self) -> RawRecord {
        let group = self
            .columns
            .group
            .iter()
            .map(|&i| self.field(i).trim())
            .collect::<Vec<_>>()
            .join(GROUP_SEPARATOR);

        let text  = self.field(self.columns.text);
        let meter = self.field(self.columns.meter);

        let record = match self.columns.second {
            Some(i) => RawRecord::pair(self.row, text, self.field(i), meter),
            None    => RawRecord::half(self.row, text, meter),
        }
        .with_group(group);

        match self.columns.rhyme {
            Some(i) => record.with_rhyme(self.field(i)),
            None    => record,
        }
    }
}

impl RecordSource for CsvLoader {
    fn next_row(&mut self) -> Result<Option<RowRead>> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => Ok(None),
            Ok(true) => {
                self.row += 1;
                if self.record.len() != self.width {
                    return Ok(Some(RowRead::Malformed {
                        row:    self.row,
                        reason: format!(
                            "expected {} fields, found {}",
                            self.width,
                            self.record.len()
                        ),
                    }));
                }
                Ok(Some(RowRead::Record(self.build_record())))
            }
            // A failed read of the underlying file is fatal
            Err(e) if e.is_io_error() => {
                Err(e).with_context(|| format!("Read failed after row {}", self.row))
            }
            // Anything else (e.g. invalid UTF-8) only spoils this row
            Err(e) => {
                self.row += 1;
                Ok(Some(RowRead::Malformed { row: self.row, reason: e.to_string() }))
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents).unwrap();
        f.flush().unwrap();
        f
    }

    fn drain(loader: &mut CsvLoader) -> Vec<RowRead> {
        let mut rows = Vec::new();
        while let Some(row) = loader.next_row().unwrap() {
            rows.push(row);
        }
        rows
    }

    #[test]
    fn test_reads_line_layout() {
        let f = csv_file("poet,text,meter\nعنترة,بيت اول,الكامل\nعنترة,بيت ثان,الكامل\n".as_bytes());
        let spec = ColumnSpec { group: vec!["poet".to_string()], ..Default::default() };
        let mut loader = CsvLoader::open(f.path(), &spec, b',').unwrap();

        let rows = drain(&mut loader);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            RowRead::Record(RawRecord::half(1, "بيت اول", "الكامل").with_group("عنترة"))
        );
    }

    #[test]
    fn test_reads_hemistich_layout_with_rhyme() {
        let f = csv_file("h1\th2\tm\tr\nا\tب\tالطويل\tد\n".as_bytes());
        let spec = ColumnSpec {
            text:   "h1".to_string(),
            second: Some("h2".to_string()),
            meter:  "m".to_string(),
            rhyme:  Some("r".to_string()),
            group:  Vec::new(),
        };
        let mut loader = CsvLoader::open(f.path(), &spec, b'\t').unwrap();
        let rows = drain(&mut loader);
        assert_eq!(
            rows,
            vec![RowRead::Record(RawRecord::pair(1, "ا", "ب", "الطويل").with_rhyme("د"))]
        );
    }

    #[test]
    fn test_wrong_field_count_is_malformed() {
        let f = csv_file(b"text,meter\na,b,c\nx,y\n");
        let mut loader = CsvLoader::open(f.path(), &ColumnSpec::default(), b',').unwrap();
        let rows = drain(&mut loader);
        assert!(matches!(rows[0], RowRead::Malformed { row: 1, .. }));
        assert_eq!(rows[1], RowRead::Record(RawRecord::half(2, "x", "y")));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let f = csv_file(b"text,meter\n\xff\xfe,x\nok,y\n");
        let mut loader = CsvLoader::open(f.path(), &ColumnSpec::default(), b',').unwrap();
        let rows = drain(&mut loader);
        assert_eq!(rows.len(), 2);
        assert!(matches!(rows[0], RowRead::Malformed { .. }));
        assert_eq!(rows[1], RowRead::Record(RawRecord::half(2, "ok", "y")));
    }

    #[test]
    fn test_bom_and_padded_headers_are_accepted() {
        let f = csv_file("\u{FEFF} text , meter\nا,الرمل\n".as_bytes());
        let mut loader = CsvLoader::open(f.path(), &ColumnSpec::default(), b',').unwrap();
        assert_eq!(drain(&mut loader).len(), 1);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let f = csv_file(b"text,bahr\na,b\n");
        let err = CsvLoader::open(f.path(), &ColumnSpec::default(), b',').err().unwrap();
        let prep = err.downcast_ref::<PrepError>().unwrap();
        assert!(matches!(prep, PrepError::MissingColumn { column, .. } if column == "meter"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        let err  = CsvLoader::open(&path, &ColumnSpec::default(), b',').err().unwrap();
        assert!(matches!(err.downcast_ref::<PrepError>(), Some(PrepError::Input { .. })));
    }
}
