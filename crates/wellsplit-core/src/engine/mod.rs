pub mod magick;

use std::path::Path;

use crate::contrast::TransformParams;
use crate::error::Result;

pub use magick::MagickEngine;

/// Everything the engine needs to turn one raw frame into a run of tiles.
#[derive(Clone, Debug)]
pub struct EngineRequest<'a> {
    pub input: &'a Path,
    pub transform: TransformParams,
    pub transform_ops: &'a [String],
    pub output_bit_depth: u8,
    /// Sequence number of the first tile written.
    pub sequence_start: u32,
    /// Output path containing the sequence placeholder.
    pub output_pattern: &'a Path,
}

/// External image transform. An invocation must write exactly
/// `tiles_per_frame` sequentially numbered files starting at
/// `sequence_start`, or fail as a whole.
pub trait TransformEngine: Send + Sync {
    fn name(&self) -> &str;

    fn convert(&self, request: &EngineRequest<'_>) -> Result<()>;
}
