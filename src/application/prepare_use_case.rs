// ============================================================
// Layer 2 - PrepareUseCase
// ============================================================
// Orchestrates one formatting run, in order:
//
//   Step 1: Validate the configuration          (Layer 2)
//   Step 2: Open the corpus, check the header   (Layer 4 - data)
//   Step 3: Open both output streams            (Layer 6 - infra)
//   Step 4: Assemble and format couplets        (Layer 4 - data)
//   Step 5: Seeded train / validation split     (Layer 4 - data)
//   Step 6: Write both streams                  (Layer 6 - infra)
//   Step 7: Save the run report (optional)      (Layer 6 - infra)
//
// Fatal problems (missing input, missing column, unwritable
// output) abort with an error naming the resource. Everything
// per-record is counted in RunStats and reported at the end.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

use crate::data::{
    assembler::CoupletAssembler,
    loader::{ColumnSpec, CsvLoader},
    preprocessor::Preprocessor,
    rhyme::{RhymeExtractor, DEFAULT_RHYME_SUFFIX_LEN},
    splitter::{split_by_group, split_train_val, SplitPlan, DEFAULT_SEED},
};
use crate::domain::{
    couplet::FormattedLine,
    error::PrepError,
    meter::MeterLabel,
    stats::RunStats,
    traits::{LineSink, RecordSource},
};
use crate::infra::{
    report::RunReport,
    writer::{OutputFormat, OutputStream},
};

/// How many distinct unknown meter labels to name in the final log.
const UNKNOWN_METERS_TO_LOG: usize = 5;

// ─── Prepare Configuration ───────────────────────────────────────────────────
// Everything that decides the output of a run. Serialisable so the
// run report can record exactly how the files were produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub input:     PathBuf,
    pub train_out: PathBuf,
    pub val_out:   PathBuf,

    pub split: SplitPlan,
    pub seed:  u64,

    /// Emit each stream in seeded shuffled order instead of input order
    pub shuffle: bool,

    /// Hold out whole groups (poems or poets) instead of single lines.
    /// The split plan then counts groups.
    #[serde(default)]
    pub split_by_group: bool,

    pub rhyme_suffix_len: usize,

    pub columns:   ColumnSpec,
    pub delimiter: char,

    pub meter_label: MeterLabel,
    pub format:      OutputFormat,

    /// Also drop every non-Arabic character while cleaning
    pub arabic_only: bool,

    /// Where to save the JSON run report, if anywhere
    pub report: Option<PathBuf>,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            input:            PathBuf::from("data/raw/APCD.csv"),
            train_out:        PathBuf::from("data/processed/train.txt"),
            val_out:          PathBuf::from("data/processed/val.txt"),
            split:            SplitPlan::default(),
            seed:             DEFAULT_SEED,
            shuffle:          false,
            split_by_group:   false,
            rhyme_suffix_len: DEFAULT_RHYME_SUFFIX_LEN,
            columns:          ColumnSpec::default(),
            delimiter:        ',',
            meter_label:      MeterLabel::default(),
            format:           OutputFormat::default(),
            arabic_only:      false,
            report:           None,
        }
    }
}

impl PrepareConfig {
    /// Reject settings that cannot produce a meaningful run.
    pub fn validate(&self) -> std::result::Result<(), PrepError> {
        let invalid = |msg: String| Err(PrepError::InvalidConfig(msg));

        if let SplitPlan::Fraction(f) = self.split {
            if !(0.0..=1.0).contains(&f) {
                return invalid(format!("validation fraction must be within [0, 1], got {f}"));
            }
        }
        if self.rhyme_suffix_len == 0 {
            return invalid("rhyme suffix length must be at least 1".to_string());
        }
        if !self.delimiter.is_ascii() {
            return invalid(format!("delimiter must be a single ASCII character, got '{}'", self.delimiter));
        }
        if same_path(&self.train_out, &self.val_out) {
            return invalid(format!(
                "train and validation outputs must differ (both '{}')",
                self.train_out.display()
            ));
        }
        for out in [&self.train_out, &self.val_out] {
            if same_path(&self.input, out) {
                return invalid(format!(
                    "output '{}' would overwrite the input corpus",
                    out.display()
                ));
            }
        }
        if self.columns.rhyme.is_some() && self.columns.second.is_none() {
            return invalid("a rhyme column needs the hemistich layout (set the h2 column)".to_string());
        }
        if self.split_by_group && self.columns.group.is_empty() {
            return invalid("splitting by group needs at least one group column".to_string());
        }
        Ok(())
    }
}

/// Whether two paths name the same file, after resolving `.`, `..` and
/// links. Outputs usually do not exist yet, so see [`resolve`].
fn same_path(a: &Path, b: &Path) -> bool {
    a == b || resolve(a) == resolve(b)
}

/// Absolute form of `path`: `.` and `..` are folded lexically, then the
/// longest existing ancestor is canonicalized and the rest re-attached.
fn resolve(path: &Path) -> PathBuf {
    let absolute = if path.is_relative() {
        std::env::current_dir().unwrap_or_default().join(path)
    } else {
        path.to_path_buf()
    };

    let mut lexical = PathBuf::new();
    for part in absolute.components() {
        match part {
            Component::CurDir    => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    let mut existing = lexical.as_path();
    let mut missing  = Vec::new();
    loop {
        if let Ok(mut real) = existing.canonicalize() {
            real.extend(missing.iter().rev());
            return real;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }
    lexical
}

// ─── PrepareUseCase ──────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline against the configured files.
    pub fn execute(&self) -> Result<RunStats> {
        let cfg = &self.config;

        // ── Step 1: Validate ─────────────────────────────────────────────────
        cfg.validate()?;

        // ── Step 2: Open the corpus ──────────────────────────────────────────
        // The header is checked here, before any output is created.
        tracing::info!("Loading corpus from '{}'", cfg.input.display());
        let mut source = CsvLoader::open(&cfg.input, &cfg.columns, cfg.delimiter as u8)?;

        // ── Step 3: Open both output streams ─────────────────────────────────
        let mut train = OutputStream::create(&cfg.train_out, cfg.format)?;
        let mut val   = OutputStream::create(&cfg.val_out, cfg.format)?;

        // ── Steps 4-6: Assemble, split, write ────────────────────────────────
        let stats = self.run(&mut source, &mut train, &mut val)?;

        tracing::info!(
            "Saved {} train lines to '{}' and {} validation lines to '{}'",
            train.lines_written(),
            cfg.train_out.display(),
            val.lines_written(),
            cfg.val_out.display(),
        );

        // ── Step 7: Run report ───────────────────────────────────────────────
        if let Some(path) = &cfg.report {
            RunReport::new(cfg.clone(), stats.clone())
                .save(path)
                .with_context(|| format!("Saving run report to '{}'", path.display()))?;
            tracing::info!("Run report saved to '{}'", path.display());
        }

        Ok(stats)
    }

    /// The pipeline proper, over any source and any pair of sinks.
    pub fn run(
        &self,
        source: &mut dyn RecordSource,
        train:  &mut dyn LineSink,
        val:    &mut dyn LineSink,
    ) -> Result<RunStats> {
        let cfg = &self.config;

        let preprocessor = if cfg.arabic_only {
            Preprocessor::arabic_only()
        } else {
            Preprocessor::new()
        };
        let mut assembler = CoupletAssembler::new(preprocessor, RhymeExtractor::new(cfg.rhyme_suffix_len));
        let mut stats     = RunStats::default();

        // ── Step 4: Assemble and format couplets ─────────────────────────────
        let mut lines = Vec::new();
        while let Some(row) = source.next_row()? {
            if let Some(couplet) = assembler.accept(row, &mut stats) {
                lines.push(couplet.format(cfg.meter_label));
            }
        }
        assembler.finish(&mut stats);

        tracing::info!(
            "Read {} records, emitted {} couplets, dropped {}",
            stats.records_read,
            stats.couplets_emitted,
            stats.dropped.total(),
        );
        if stats.dropped.unknown_meter > 0 {
            let top = stats
                .top_unknown_meters(UNKNOWN_METERS_TO_LOG)
                .iter()
                .map(|(label, n)| format!("'{label}' x{n}"))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!(
                "{} records dropped: unrecognized meter (most frequent: {})",
                stats.dropped.unknown_meter,
                top
            );
        }

        // ── Step 5: Seeded train / validation split ──────────────────────────
        let total = lines.len();
        let (train_lines, val_lines) = if cfg.split_by_group {
            split_by_group(lines, |l: &FormattedLine| l.group.clone(), cfg.split, cfg.seed, cfg.shuffle)
        } else {
            split_train_val(lines, cfg.split, cfg.seed, cfg.shuffle)
        };
        if val_lines.is_empty() && total > 0 && matches!(cfg.split, SplitPlan::Fraction(f) if f > 0.0) {
            tracing::warn!("Validation set is empty: too few lines or groups to hold any out");
        }

        // ── Step 6: Write both streams ───────────────────────────────────────
        for line in &train_lines {
            train.write_line(line)?;
        }
        for line in &val_lines {
            val.write_line(line)?;
        }
        train.finish()?;
        val.finish()?;

        stats.train_lines = train_lines.len();
        stats.val_lines   = val_lines.len();
        tracing::info!("Train : {}  |  Val : {}", stats.train_lines, stats.val_lines);

        Ok(stats)
    }
}
