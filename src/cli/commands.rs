// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `prepare` and `meters`, and all
// their configurable flags.
//
// clap's derive macros generate --help text, error messages for
// missing args and string → number conversion.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::loader::ColumnSpec;
use crate::data::rhyme::DEFAULT_RHYME_SUFFIX_LEN;
use crate::data::splitter::{SplitPlan, DEFAULT_SEED, DEFAULT_VAL_FRACTION};
use crate::domain::meter::MeterLabel;
use crate::infra::writer::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter, clean and format a verse corpus into train/validation files
    Prepare(PrepareArgs),

    /// List the sixteen recognised meters and their accepted aliases
    Meters,
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Corpus file (CSV or other delimited text with a header row)
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the training lines
    #[arg(long)]
    pub train_out: PathBuf,

    /// Where to write the validation lines
    #[arg(long)]
    pub val_out: PathBuf,

    /// Fraction of couplets held out for validation (rounded up)
    #[arg(long, default_value_t = DEFAULT_VAL_FRACTION)]
    pub val_fraction: f64,

    /// Fixed number of validation couplets; overrides --val-fraction
    #[arg(long)]
    pub val_count: Option<usize>,

    /// Seed for the train/validation assignment
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Write each stream in seeded shuffled order instead of input order
    #[arg(long)]
    pub shuffle: bool,

    /// Hold out whole groups (see --group-column) instead of single
    /// couplets; the fraction or count then applies to groups
    #[arg(long)]
    pub split_by_group: bool,

    /// Number of trailing letters of the second half used as rhyme key
    #[arg(long, default_value_t = DEFAULT_RHYME_SUFFIX_LEN)]
    pub rhyme_suffix_len: usize,

    /// Column with the half-verse (or the first half with --h2-column)
    #[arg(long, default_value = "text")]
    pub text_column: String,

    /// Column with the second half; switches to one-couplet-per-row input
    #[arg(long)]
    pub h2_column: Option<String>,

    /// Column with the meter label
    #[arg(long, default_value = "meter")]
    pub meter_column: String,

    /// Column with an author-supplied rhyme (needs --h2-column)
    #[arg(long)]
    pub rhyme_column: Option<String>,

    /// Column identifying a poem; repeat for composite keys (poet, diwan, ...)
    #[arg(long = "group-column")]
    pub group_columns: Vec<String>,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Spelling of the meter tag
    #[arg(long, value_enum, default_value_t = MeterLabelArg::Arabic)]
    pub meter_label: MeterLabelArg,

    /// Output file format
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Also remove every character outside the Arabic block
    #[arg(long)]
    pub arabic_only: bool,

    /// Save the configuration and run statistics as JSON here
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MeterLabelArg {
    /// الطويل, الكامل, ...
    Arabic,
    /// taweel, kamel, ...
    Latin,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatArg {
    /// One formatted line per couplet
    Text,
    /// One JSON object per couplet
    Jsonl,
}

impl From<MeterLabelArg> for MeterLabel {
    fn from(a: MeterLabelArg) -> Self {
        match a {
            MeterLabelArg::Arabic => MeterLabel::Arabic,
            MeterLabelArg::Latin  => MeterLabel::Latin,
        }
    }
}

impl From<FormatArg> for OutputFormat {
    fn from(a: FormatArg) -> Self {
        match a {
            FormatArg::Text  => OutputFormat::Text,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        let split = match a.val_count {
            Some(n) => SplitPlan::Count(n),
            None    => SplitPlan::Fraction(a.val_fraction),
        };

        PrepareConfig {
            input:            a.input,
            train_out:        a.train_out,
            val_out:          a.val_out,
            split,
            seed:             a.seed,
            shuffle:          a.shuffle,
            split_by_group:   a.split_by_group,
            rhyme_suffix_len: a.rhyme_suffix_len,
            columns: ColumnSpec {
                text:   a.text_column,
                second: a.h2_column,
                meter:  a.meter_column,
                rhyme:  a.rhyme_column,
                group:  a.group_columns,
            },
            delimiter:   a.delimiter,
            meter_label: a.meter_label.into(),
            format:      a.format.into(),
            arabic_only: a.arabic_only,
            report:      a.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> PrepareConfig {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Prepare(a) => a.into(),
            Commands::Meters     => panic!("expected prepare"),
        }
    }

    #[test]
    fn test_defaults_match_config_defaults() {
        let cfg = parse(&[
            "diwan-prep", "prepare",
            "--input", "in.csv", "--train-out", "t.txt", "--val-out", "v.txt",
        ]);
        let defaults = PrepareConfig::default();
        assert_eq!(cfg.split, defaults.split);
        assert_eq!(cfg.seed, defaults.seed);
        assert_eq!(cfg.rhyme_suffix_len, defaults.rhyme_suffix_len);
        assert_eq!(cfg.columns, defaults.columns);
        assert_eq!(cfg.meter_label, defaults.meter_label);
        assert_eq!(cfg.format, defaults.format);
        assert_eq!(cfg.split_by_group, defaults.split_by_group);
        assert_eq!(cfg.input, PathBuf::from("in.csv"));
    }

    #[test]
    fn test_split_by_group_flag() {
        let cfg = parse(&[
            "diwan-prep", "prepare",
            "--input", "in.csv", "--train-out", "t.txt", "--val-out", "v.txt",
            "--group-column", "poet",
            "--split-by-group",
            "--val-fraction", "0.25",
        ]);
        assert!(cfg.split_by_group);
        assert_eq!(cfg.split, SplitPlan::Fraction(0.25));
        assert!(cfg.validate().is_ok());

        let ungrouped = parse(&[
            "diwan-prep", "prepare",
            "--input", "in.csv", "--train-out", "t.txt", "--val-out", "v.txt",
            "--split-by-group",
        ]);
        assert!(ungrouped.validate().is_err());
    }

    #[test]
    fn test_apcd_style_arguments() {
        let cfg = parse(&[
            "diwan-prep", "prepare",
            "--input", "APCD.csv", "--train-out", "t.jsonl", "--val-out", "v.jsonl",
            "--text-column", "الشطر الايمن",
            "--h2-column", "الشطر الايسر",
            "--meter-column", "البحر",
            "--rhyme-column", "القافية",
            "--group-column", "الشاعر",
            "--group-column", "الديوان",
            "--val-count", "100",
            "--meter-label", "latin",
            "--format", "jsonl",
            "--shuffle",
        ]);
        assert_eq!(cfg.split, SplitPlan::Count(100));
        assert_eq!(cfg.columns.second.as_deref(), Some("الشطر الايسر"));
        assert_eq!(cfg.columns.group, vec!["الشاعر".to_string(), "الديوان".to_string()]);
        assert_eq!(cfg.meter_label, MeterLabel::Latin);
        assert_eq!(cfg.format, OutputFormat::Jsonl);
        assert!(cfg.shuffle);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_input_is_required() {
        let res = Cli::try_parse_from(["diwan-prep", "prepare", "--train-out", "t", "--val-out", "v"]);
        assert!(res.is_err());
    }
}
