use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WellSplitError};

/// Acquisition characteristics of a microscope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParams {
    /// Output tiles cut from each raw frame.
    pub tiles_per_frame: u32,
    /// Meaningful bits per pixel reported by the camera.
    pub sensor_bit_depth: u8,
    /// Geometry arguments passed verbatim to the transform engine.
    #[serde(default)]
    pub transform_ops: Vec<String>,
}

impl ProfileParams {
    pub fn validate(&self) -> Result<()> {
        if self.tiles_per_frame == 0 {
            return Err(WellSplitError::InvalidConfig(
                "tiles_per_frame must be at least 1".into(),
            ));
        }
        if self.sensor_bit_depth == 0 || self.sensor_bit_depth > 32 {
            return Err(WellSplitError::InvalidConfig(format!(
                "sensor_bit_depth {} out of range 1..=32",
                self.sensor_bit_depth
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MicroscopeProfile {
    /// 11-bit camera, each frame split into a 2x2 grid.
    #[default]
    Cobra,
    /// 12-bit camera mounted sideways; shaved border, rotated, 3x3 grid.
    Joe,
    Custom(ProfileParams),
}

impl MicroscopeProfile {
    pub fn params(&self) -> ProfileParams {
        match self {
            Self::Cobra => ProfileParams {
                tiles_per_frame: 4,
                sensor_bit_depth: 11,
                transform_ops: ops(&["-crop", "2x2@", "+repage"]),
            },
            Self::Joe => ProfileParams {
                tiles_per_frame: 9,
                sensor_bit_depth: 12,
                transform_ops: ops(&[
                    "-shave", "16x16", "-rotate", "90", "-crop", "3x3@", "+repage",
                ]),
            },
            Self::Custom(params) => params.clone(),
        }
    }
}

fn ops(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

impl fmt::Display for MicroscopeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cobra => write!(f, "Cobra"),
            Self::Joe => write!(f, "Joe"),
            Self::Custom(p) => write!(
                f,
                "Custom ({} tiles, {}-bit)",
                p.tiles_per_frame, p.sensor_bit_depth
            ),
        }
    }
}
