pub mod codec;
pub mod pattern;
pub mod sequence;

pub use codec::{FrameFilenameCodec, OutputTemplate};
pub use pattern::InputPattern;
pub use sequence::{first_sequence_number, sequence_range};
