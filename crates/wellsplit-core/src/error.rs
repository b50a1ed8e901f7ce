use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WellSplitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Genotype table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported plate size: {0} wells (expected 96 or 384)")]
    UnsupportedPlateSize(u32),

    #[error("Genotype table has {found} entries, plate needs {expected}")]
    MissingPlateData { expected: usize, found: usize },

    #[error("Genotype table line {line} has no label for well {well_index}")]
    BlankGenotypeLabel { well_index: usize, line: u64 },

    #[error("No output symbol registered for channel {0}")]
    UnrecognizedChannel(u32),

    #[error("Invalid contrast mode '{0}' (expected none, auto or norm)")]
    InvalidContrastMode(String),

    #[error("{given} contrast modes given for {channels} channels (expected 1 or {channels})")]
    ChannelContrastCountMismatch { given: usize, channels: u32 },

    #[error("Filename '{filename}' does not match input pattern {pattern}")]
    FilenamePatternMismatch { filename: String, pattern: String },

    #[error("Cannot infer fields per well: {0}; set fields_per_well explicitly")]
    AmbiguousFieldCount(String),

    #[error("Input frame not found: {}", .0.display())]
    MissingInputFrame(PathBuf),

    #[error("Conversion of {} failed: {reason}", .input.display())]
    ConversionEngineFailure { input: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, WellSplitError>;
