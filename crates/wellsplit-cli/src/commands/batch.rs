use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use wellsplit_core::pipeline::config::BatchConfig;
use wellsplit_core::pipeline::BatchContext;
use wellsplit_core::profile::{MicroscopeProfile, ProfileParams};

#[derive(Clone, Copy, ValueEnum)]
pub enum MicroscopeArg {
    Cobra,
    Joe,
    Custom,
}

/// Batch settings shared by every subcommand that needs a plate.
///
/// Flags override values loaded from `--config`.
#[derive(Args)]
pub struct BatchArgs {
    /// Batch config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the raw microscope frames
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Root directory for genotype output directories
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Plate table with one genotype label per well (header row first)
    #[arg(short, long)]
    pub genotypes: Option<PathBuf>,

    /// Plate size in wells (96 or 384)
    #[arg(long)]
    pub wells: Option<u32>,

    /// Microscope profile
    #[arg(long, value_enum)]
    pub microscope: Option<MicroscopeArg>,

    /// Tiles per frame (custom microscope)
    #[arg(long, requires = "sensor_bits")]
    pub tiles_per_frame: Option<u32>,

    /// Sensor bit depth (custom microscope)
    #[arg(long, requires = "tiles_per_frame")]
    pub sensor_bits: Option<u8>,

    /// Space-separated engine geometry arguments (custom microscope)
    #[arg(long, allow_hyphen_values = true)]
    pub transform_ops: Option<String>,

    /// Channels acquired per field
    #[arg(long)]
    pub channels: Option<u32>,

    /// Fields imaged per well (inferred from the input directory if omitted)
    #[arg(long)]
    pub fields: Option<u32>,

    /// Comma-separated contrast modes: one for all channels or one per channel
    #[arg(long)]
    pub contrast: Option<String>,

    /// Zero-padded width of frame numbers (inferred if omitted)
    #[arg(long)]
    pub digit_width: Option<usize>,

    /// Raw filename to infer the frame number width from
    #[arg(long)]
    pub sample: Option<String>,

    /// Text before the frame number in raw filenames
    #[arg(long)]
    pub prefix: Option<String>,

    /// Text between frame number and channel in raw filenames
    #[arg(long)]
    pub separator: Option<String>,

    /// Text before the genotype label in output names
    #[arg(long)]
    pub group_prefix: Option<String>,

    /// Text after the genotype label in output names
    #[arg(long)]
    pub group_suffix: Option<String>,
}

impl BatchArgs {
    pub fn load_config(&self) -> Result<BatchConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                toml::from_str(&contents).context("Invalid batch config")?
            }
            None => {
                let (Some(input), Some(output), Some(genotypes)) =
                    (&self.input, &self.output, &self.genotypes)
                else {
                    bail!("--input, --output and --genotypes are required without --config");
                };
                BatchConfig::new(input.clone(), output.clone(), genotypes.clone())
            }
        };
        self.apply_overrides(&mut config)?;
        Ok(config)
    }

    pub fn build_context(&self) -> Result<BatchContext> {
        let config = self.load_config()?;
        BatchContext::build(config).context("Invalid batch configuration")
    }

    fn apply_overrides(&self, config: &mut BatchConfig) -> Result<()> {
        if let Some(ref input) = self.input {
            config.input_dir = input.clone();
        }
        if let Some(ref output) = self.output {
            config.output_dir = output.clone();
        }
        if let Some(ref genotypes) = self.genotypes {
            config.genotype_table = genotypes.clone();
        }
        if let Some(wells) = self.wells {
            config.plate.wells = wells;
        }
        if let Some(microscope) = self.microscope {
            config.microscope = match microscope {
                MicroscopeArg::Cobra => MicroscopeProfile::Cobra,
                MicroscopeArg::Joe => MicroscopeProfile::Joe,
                MicroscopeArg::Custom => {
                    let (Some(tiles_per_frame), Some(sensor_bit_depth)) =
                        (self.tiles_per_frame, self.sensor_bits)
                    else {
                        bail!("--microscope custom needs --tiles-per-frame and --sensor-bits");
                    };
                    MicroscopeProfile::Custom(ProfileParams {
                        tiles_per_frame,
                        sensor_bit_depth,
                        transform_ops: self
                            .transform_ops
                            .as_deref()
                            .map(|ops| ops.split_whitespace().map(String::from).collect())
                            .unwrap_or_default(),
                    })
                }
            };
        }
        if let Some(channels) = self.channels {
            config.acquisition.channels = channels;
        }
        if let Some(fields) = self.fields {
            config.acquisition.fields_per_well = Some(fields);
        }
        if let Some(ref contrast) = self.contrast {
            config.contrast.modes = contrast.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(width) = self.digit_width {
            config.naming.digit_width = Some(width);
        }
        if let Some(ref sample) = self.sample {
            config.naming.sample_filename = Some(sample.clone());
        }
        if let Some(ref prefix) = self.prefix {
            config.naming.input_prefix = prefix.clone();
        }
        if let Some(ref separator) = self.separator {
            config.naming.channel_separator = separator.clone();
        }
        if let Some(ref prefix) = self.group_prefix {
            config.naming.group_prefix = prefix.clone();
        }
        if let Some(ref suffix) = self.group_suffix {
            config.naming.group_suffix = suffix.clone();
        }
        Ok(())
    }
}
