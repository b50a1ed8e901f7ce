use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CHANNEL_COUNT, DEFAULT_CHANNEL_SYMBOLS, DEFAULT_ENGINE_PROGRAM,
    DEFAULT_FILE_BIT_DEPTH, DEFAULT_OUTPUT_BIT_DEPTH,
};
use crate::plate::TableFormat;
use crate::profile::MicroscopeProfile;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory holding the raw microscope frames.
    pub input_dir: PathBuf,
    /// Root under which one directory per genotype is created.
    pub output_dir: PathBuf,
    /// Delimited plate table with one genotype label per well.
    pub genotype_table: PathBuf,
    #[serde(default)]
    pub microscope: MicroscopeProfile,
    #[serde(default)]
    pub plate: PlateConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub table: TableFormat,
    #[serde(default)]
    pub acquisition: AcquisitionConfig,
    #[serde(default)]
    pub contrast: ContrastConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl BatchConfig {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        genotype_table: impl Into<PathBuf>,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            genotype_table: genotype_table.into(),
            microscope: MicroscopeProfile::default(),
            plate: PlateConfig::default(),
            naming: NamingConfig::default(),
            table: TableFormat::default(),
            acquisition: AcquisitionConfig::default(),
            contrast: ContrastConfig::default(),
            execution: ExecutionConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlateConfig {
    pub wells: u32,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self { wells: 384 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Text before the frame number in raw filenames.
    pub input_prefix: String,
    /// Text between the frame number and the channel number.
    pub channel_separator: String,
    pub input_extension: String,
    /// Zero-padded width of the frame number. Inferred when unset.
    pub digit_width: Option<usize>,
    /// Raw filename used to infer `digit_width`.
    pub sample_filename: Option<String>,
    pub group_prefix: String,
    pub group_suffix: String,
    pub output_extension: String,
    /// Output symbol per channel, index 0 is channel 1.
    pub channel_symbols: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            input_prefix: String::new(),
            channel_separator: "_".into(),
            input_extension: "tif".into(),
            digit_width: None,
            sample_filename: None,
            group_prefix: String::new(),
            group_suffix: String::new(),
            output_extension: "tif".into(),
            channel_symbols: DEFAULT_CHANNEL_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub channels: u32,
    /// Fields imaged per well. Inferred from the input directory when unset.
    pub fields_per_well: Option<u32>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            channels: DEFAULT_CHANNEL_COUNT,
            fields_per_well: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// One mode for all channels, or one per channel: `none`, `auto`, `norm`.
    pub modes: Vec<String>,
    /// Bits per pixel allocated by the raw file format.
    pub file_bit_depth: u8,
    pub output_bit_depth: u8,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            modes: vec!["none".into()],
            file_bit_depth: DEFAULT_FILE_BIT_DEPTH,
            output_bit_depth: DEFAULT_OUTPUT_BIT_DEPTH,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Concurrent engine invocations. Defaults to one per CPU.
    pub jobs: Option<usize>,
    /// Regenerate outputs that already exist.
    pub overwrite: bool,
    /// Do not log a warning for each missing input frame.
    pub quiet_missing: bool,
    pub engine_program: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            jobs: None,
            overwrite: false,
            quiet_missing: false,
            engine_program: DEFAULT_ENGINE_PROGRAM.into(),
        }
    }
}

impl fmt::Display for ExecutionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.jobs {
            Some(jobs) => write!(f, "{jobs} jobs")?,
            None => write!(f, "auto jobs")?,
        }
        if self.overwrite {
            write!(f, ", overwrite")?;
        }
        Ok(())
    }
}
