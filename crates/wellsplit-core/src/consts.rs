/// Bit depth of the TIFF containers written by the microscope.
pub const DEFAULT_FILE_BIT_DEPTH: u8 = 16;

/// Bit depth requested from the transform engine for every tile.
pub const DEFAULT_OUTPUT_BIT_DEPTH: u8 = 16;

/// Number of imaging channels acquired per field.
pub const DEFAULT_CHANNEL_COUNT: u32 = 3;

/// Output filename symbols, indexed by 1-based channel number
/// (wall, nucleus, actin).
pub const DEFAULT_CHANNEL_SYMBOLS: [&str; 3] = ["W", "N", "A"];

/// Column of the genotype table holding the label.
pub const DEFAULT_LABEL_COLUMN: usize = 0;

/// Placeholder the transform engine substitutes with the tile sequence number.
pub const SEQUENCE_PLACEHOLDER: &str = "%d";

/// Prefix of the per-task staging directory created inside a group directory.
pub const STAGING_DIR_PREFIX: &str = ".wellsplit-staging-";

/// Default external transform program (ImageMagick).
pub const DEFAULT_ENGINE_PROGRAM: &str = "convert";
