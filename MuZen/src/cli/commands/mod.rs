use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;
use crate::formats::{self, Dataset, DatasetFormat};

/// Dataset format specification for `--format`
#[derive(Debug, Clone, Copy)]
pub struct FormatArg(pub DatasetFormat);

impl FromStr for FormatArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "flat" | "xml" => Ok(FormatArg(DatasetFormat::XmlFlat)),
            "grouped" => Ok(FormatArg(DatasetFormat::XmlGrouped)),
            "recipe" | "mix" => Ok(FormatArg(DatasetFormat::Recipe)),
            "ini" => Ok(FormatArg(DatasetFormat::Ini)),
            _ => Err(format!(
                "Invalid format '{s}'. Valid values: flat, grouped, recipe, ini"
            )),
        }
    }
}

pub mod check;
pub mod diff;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the records of a config file
    Inspect {
        /// Source file
        file: PathBuf,

        /// File format: flat, grouped, recipe, or ini
        #[arg(short, long)]
        format: FormatArg,

        /// Record element tag (flat/grouped/recipe formats)
        #[arg(long, default_value = "Event")]
        record_tag: String,

        /// Capture only this child tag (grouped format)
        #[arg(long)]
        child_tag: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a file survives the parse/serialize round trip
    Check {
        /// Source file
        file: PathBuf,

        /// File format: flat, grouped, recipe, or ini
        #[arg(short, long)]
        format: FormatArg,

        /// Record element tag (flat/grouped/recipe formats)
        #[arg(long, default_value = "Event")]
        record_tag: String,

        /// Capture only this child tag (grouped format)
        #[arg(long)]
        child_tag: Option<String>,

        /// Only report failures
        #[arg(short, long)]
        quiet: bool,
    },

    /// Compare two config files record by record
    Diff {
        /// Older file
        old: PathBuf,

        /// Newer file
        new: PathBuf,

        /// File format: flat, grouped, recipe, or ini
        #[arg(short, long)]
        format: FormatArg,

        /// Record element tag (flat/grouped/recipe formats)
        #[arg(long, default_value = "Event")]
        record_tag: String,

        /// Capture only this child tag (grouped format)
        #[arg(long)]
        child_tag: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Suppress the summary line
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    pub fn execute(self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect {
                file,
                format,
                record_tag,
                child_tag,
                json,
            } => inspect::execute(&file, format.0, &record_tag, child_tag.as_deref(), json),
            Commands::Check {
                file,
                format,
                record_tag,
                child_tag,
                quiet,
            } => check::execute(&file, format.0, &record_tag, child_tag.as_deref(), quiet),
            Commands::Diff {
                old,
                new,
                format,
                record_tag,
                child_tag,
                json,
                quiet,
            } => diff::execute(
                &old,
                &new,
                format.0,
                &record_tag,
                child_tag.as_deref(),
                json,
                quiet,
            ),
        }
    }
}

/// Read and parse a file with the given format settings.
pub fn load_dataset(
    path: &Path,
    format: DatasetFormat,
    record_tag: &str,
    child_tag: Option<&str>,
) -> Result<(String, Dataset), Error> {
    let content = fs::read_to_string(path)?;
    let dataset = match format {
        DatasetFormat::XmlFlat => formats::parse_flat(&content, record_tag)?,
        DatasetFormat::XmlGrouped => formats::parse_grouped(&content, record_tag, child_tag)?,
        DatasetFormat::Recipe => formats::parse_recipe(&content, record_tag)?,
        DatasetFormat::Ini => formats::parse_ini(&content)?,
    };
    Ok((content, dataset))
}
