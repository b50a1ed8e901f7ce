use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WellSplitError};

/// Per-channel contrast handling requested by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContrastMode {
    /// Keep raw intensities, rescaling sensor bits into the file's range.
    None,
    /// Stretch to the full output range.
    Auto,
    /// Normalize with clipping.
    Norm,
}

impl FromStr for ContrastMode {
    type Err = WellSplitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "auto" => Ok(Self::Auto),
            "norm" => Ok(Self::Norm),
            _ => Err(WellSplitError::InvalidContrastMode(s.to_string())),
        }
    }
}

impl fmt::Display for ContrastMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Auto => write!(f, "auto"),
            Self::Norm => write!(f, "norm"),
        }
    }
}

/// Concrete intensity operation handed to the transform engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformParams {
    Identity,
    /// Fixed-point rescale by a power of two.
    Multiply(u32),
    AutoLevel,
    Normalize,
}

impl TransformParams {
    pub fn multiply_factor(&self) -> Option<u32> {
        match self {
            Self::Multiply(factor) => Some(*factor),
            _ => None,
        }
    }
}

impl fmt::Display for TransformParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::Multiply(factor) => write!(f, "Multiply x{factor}"),
            Self::AutoLevel => write!(f, "Auto Level"),
            Self::Normalize => write!(f, "Normalize"),
        }
    }
}

pub fn resolve(mode: ContrastMode, sensor_bit_depth: u8, file_bit_depth: u8) -> TransformParams {
    match mode {
        ContrastMode::None if file_bit_depth > sensor_bit_depth => {
            let shift = u32::from(file_bit_depth - sensor_bit_depth);
            match 1u32.checked_shl(shift) {
                Some(factor) => TransformParams::Multiply(factor),
                None => TransformParams::Identity,
            }
        }
        ContrastMode::None => TransformParams::Identity,
        ContrastMode::Auto => TransformParams::AutoLevel,
        ContrastMode::Norm => TransformParams::Normalize,
    }
}

/// Resolve the configured mode list into one operation per channel.
///
/// A single mode applies to every channel; otherwise there must be exactly
/// one mode per channel.
pub fn resolve_channels(
    modes: &[String],
    channels: u32,
    sensor_bit_depth: u8,
    file_bit_depth: u8,
) -> Result<Vec<TransformParams>> {
    let parsed = modes
        .iter()
        .map(|m| m.parse::<ContrastMode>())
        .collect::<Result<Vec<_>>>()?;

    let per_channel = match parsed.len() {
        1 => vec![parsed[0]; channels as usize],
        n if n == channels as usize => parsed,
        given => {
            return Err(WellSplitError::ChannelContrastCountMismatch { given, channels });
        }
    };

    Ok(per_channel
        .into_iter()
        .map(|mode| resolve(mode, sensor_bit_depth, file_bit_depth))
        .collect())
}
