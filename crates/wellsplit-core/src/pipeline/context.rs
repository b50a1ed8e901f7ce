use tracing::info;

use crate::contrast::{resolve_channels, TransformParams};
use crate::error::{Result, WellSplitError};
use crate::io::frames::{infer_digit_width, infer_fields_per_well, list_input_frames};
use crate::naming::{FrameFilenameCodec, InputPattern};
use crate::plate::{GenotypeTable, PlateLayout};
use crate::profile::ProfileParams;

use super::config::BatchConfig;

/// Validated, immutable state shared by planning and execution.
///
/// Every configuration error surfaces while building this, before any task
/// exists.
#[derive(Clone, Debug)]
pub struct BatchContext {
    pub config: BatchConfig,
    pub layout: PlateLayout,
    pub genotypes: GenotypeTable,
    pub profile: ProfileParams,
    pub codec: FrameFilenameCodec,
    /// Intensity operation per channel, index 0 is channel 1.
    pub channel_transforms: Vec<TransformParams>,
    pub jobs: usize,
}

impl BatchContext {
    /// Validate `config` and load the genotype table it points at.
    pub fn build(config: BatchConfig) -> Result<Self> {
        let layout = PlateLayout::from_well_count(config.plate.wells)?;
        validate_settings(&config)?;
        let genotypes = GenotypeTable::load(&config.genotype_table, &layout, &config.table)?;
        Self::assemble(config, layout, genotypes)
    }

    fn assemble(config: BatchConfig, layout: PlateLayout, genotypes: GenotypeTable) -> Result<Self> {
        let profile = config.microscope.params();
        let channel_transforms = resolve_channels(
            &config.contrast.modes,
            config.acquisition.channels,
            profile.sensor_bit_depth,
            config.contrast.file_bit_depth,
        )?;

        let naming = &config.naming;
        let pattern = InputPattern::new(
            &naming.input_prefix,
            &naming.channel_separator,
            &naming.input_extension,
        )?;

        let digit_width = match naming.digit_width {
            Some(width) => width,
            None => infer_digit_width(
                &config.input_dir,
                &pattern,
                naming.sample_filename.as_deref(),
            )?,
        };

        let fields_per_well = match config.acquisition.fields_per_well {
            Some(0) => {
                return Err(WellSplitError::InvalidConfig(
                    "fields_per_well must be at least 1".into(),
                ))
            }
            Some(fields) => fields,
            None => detect_fields_per_well(&config, &layout, &pattern)?,
        };

        let jobs = match config.execution.jobs {
            Some(0) => return Err(WellSplitError::InvalidConfig("jobs must be at least 1".into())),
            Some(jobs) => jobs,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };

        info!(
            plate = %layout,
            profile = %config.microscope,
            digit_width,
            fields_per_well,
            jobs,
            "Batch configuration resolved"
        );

        let codec = FrameFilenameCodec::new(naming.clone(), digit_width, fields_per_well);
        Ok(Self {
            config,
            layout,
            genotypes,
            profile,
            codec,
            channel_transforms,
            jobs,
        })
    }

    pub fn channels(&self) -> u32 {
        self.config.acquisition.channels
    }

    pub fn fields_per_well(&self) -> u32 {
        self.codec.fields_per_well()
    }

    pub fn transform_for(&self, channel: u32) -> TransformParams {
        self.channel_transforms[(channel - 1) as usize]
    }

    /// Tiles each genotype directory receives per channel.
    pub fn tiles_per_well(&self) -> u32 {
        self.fields_per_well() * self.profile.tiles_per_frame
    }
}

/// Checks that need no filesystem access.
fn validate_settings(config: &BatchConfig) -> Result<()> {
    let channels = config.acquisition.channels;
    if channels == 0 {
        return Err(WellSplitError::InvalidConfig(
            "at least one channel is required".into(),
        ));
    }
    config.microscope.params().validate()?;

    if config.contrast.modes.len() != 1 && config.contrast.modes.len() != channels as usize {
        return Err(WellSplitError::ChannelContrastCountMismatch {
            given: config.contrast.modes.len(),
            channels,
        });
    }

    let symbols = config.naming.channel_symbols.len() as u32;
    if symbols < channels {
        return Err(WellSplitError::UnrecognizedChannel(symbols + 1));
    }
    Ok(())
}

fn detect_fields_per_well(
    config: &BatchConfig,
    layout: &PlateLayout,
    pattern: &InputPattern,
) -> Result<u32> {
    let channels = config.acquisition.channels;
    let frames = list_input_frames(&config.input_dir, pattern)?;
    let count = frames
        .iter()
        .filter_map(|name| pattern.parse(name))
        .filter(|(_, channel)| (1..=channels).contains(channel))
        .count();
    let fields = infer_fields_per_well(count, layout.well_count(), channels)?;
    info!(frames = count, fields, "Inferred fields per well");
    Ok(fields)
}
