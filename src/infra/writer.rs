// ============================================================
// Layer 6 - Output Stream
// ============================================================
// Writes one split's lines to disk, one example per line,
// UTF-8, Arabic text exactly as cleaned (no reshaping, no
// transliteration).
//
// Two formats:
//   text   [د] وان تجمعا شملي وتنتظرا غدا [الطويل] خليلي لا تستعجلا ان تزودا
//   jsonl  {"text":"[د] ...","meter":"الطويل","rhyme":"د","group":"..."}
//
// Parent directories are created. Any failure to create, write
// or flush is fatal and names the path.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::couplet::FormattedLine;
use crate::domain::error::PrepError;
use crate::domain::traits::LineSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One FormattedLine per line
    #[default]
    Text,
    /// One JSON object per line with the line and its tags
    Jsonl,
}

/// A buffered file holding one split.
/// Implements the LineSink trait from Layer 3.
pub struct OutputStream {
    path:   PathBuf,
    format: OutputFormat,
    out:    BufWriter<File>,
    lines:  usize,
}

impl OutputStream {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path, format: OutputFormat) -> Result<Self> {
        let fail = |source| PrepError::Output { path: path.to_path_buf(), source };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(fail)?;
        }
        let file = File::create(path).map_err(fail)?;

        tracing::debug!("Writing {:?} output to '{}'", format, path.display());
        Ok(Self {
            path: path.to_path_buf(),
            format,
            out: BufWriter::new(file),
            lines: 0,
        })
    }

    pub fn lines_written(&self) -> usize {
        self.lines
    }

    fn write_record(&mut self, line: &FormattedLine) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", line.text),
            OutputFormat::Jsonl => {
                serde_json::to_writer(&mut self.out, line)?;
                self.out.write_all(b"\n")
            }
        }
    }

    fn output_error(&self, source: std::io::Error) -> PrepError {
        PrepError::Output { path: self.path.clone(), source }
    }
}

impl LineSink for OutputStream {
    fn write_line(&mut self, line: &FormattedLine) -> Result<()> {
        self.write_record(line).map_err(|e| self.output_error(e))?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush().map_err(|e| self.output_error(e))?;
        tracing::debug!("Wrote {} lines to '{}'", self.lines, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> FormattedLine {
        FormattedLine {
            text:  "[ا] بيت ثاني [الطويل] بيت اول".to_string(),
            meter: "الطويل".to_string(),
            rhyme: "ا".to_string(),
            group: "المتنبي".to_string(),
        }
    }

    #[test]
    fn test_text_output_creates_parents() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/train.txt");

        let mut sink = OutputStream::create(&path, OutputFormat::Text).unwrap();
        sink.write_line(&line()).unwrap();
        sink.write_line(&line()).unwrap();
        sink.finish().unwrap();

        assert_eq!(sink.lines_written(), 2);
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, format!("{}\n{}\n", line().text, line().text));
    }

    #[test]
    fn test_jsonl_output_keeps_arabic_unescaped() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("val.jsonl");

        let mut sink = OutputStream::create(&path, OutputFormat::Jsonl).unwrap();
        sink.write_line(&line()).unwrap();
        sink.finish().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("الطويل"));
        let parsed: FormattedLine = serde_json::from_str(written.trim_end()).unwrap();
        assert_eq!(parsed, line());
    }

    #[test]
    fn test_unwritable_destination_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file
        let err = OutputStream::create(dir.path(), OutputFormat::Text).err().unwrap();
        assert!(matches!(err.downcast_ref::<PrepError>(), Some(PrepError::Output { .. })));
    }
}
