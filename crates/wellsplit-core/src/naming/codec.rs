use std::path::{Path, PathBuf};

use crate::consts::SEQUENCE_PLACEHOLDER;
use crate::error::{Result, WellSplitError};
use crate::pipeline::config::NamingConfig;

/// Builds raw input filenames and per-group output filename templates.
#[derive(Clone, Debug)]
pub struct FrameFilenameCodec {
    naming: NamingConfig,
    digit_width: usize,
    fields_per_well: u32,
}

impl FrameFilenameCodec {
    pub fn new(naming: NamingConfig, digit_width: usize, fields_per_well: u32) -> Self {
        Self {
            naming,
            digit_width,
            fields_per_well,
        }
    }

    pub fn digit_width(&self) -> usize {
        self.digit_width
    }

    pub fn fields_per_well(&self) -> u32 {
        self.fields_per_well
    }

    /// Raw frame filename for a well's scan ordinal, 1-based field and channel.
    pub fn input_filename(&self, scan_ordinal: u32, field: u32, channel: u32) -> String {
        let frame = scan_ordinal as u64 * self.fields_per_well as u64 + field as u64;
        format!(
            "{}{:0width$}{}{}.{}",
            self.naming.input_prefix,
            frame,
            self.naming.channel_separator,
            channel,
            extension(&self.naming.input_extension),
            width = self.digit_width,
        )
    }

    /// Directory name shared by every well carrying `label`.
    pub fn group_name(&self, label: &str) -> String {
        format!(
            "{}{}{}",
            self.naming.group_prefix, label, self.naming.group_suffix
        )
    }

    /// Output symbol for a 1-based channel number.
    pub fn channel_symbol(&self, channel: u32) -> Result<&str> {
        channel
            .checked_sub(1)
            .and_then(|i| self.naming.channel_symbols.get(i as usize))
            .map(String::as_str)
            .ok_or(WellSplitError::UnrecognizedChannel(channel))
    }

    pub fn output_template(&self, label: &str, channel: u32) -> Result<OutputTemplate> {
        let symbol = self.channel_symbol(channel)?;
        Ok(OutputTemplate {
            stem: format!("{}-{}", self.group_name(label), symbol),
            extension: extension(&self.naming.output_extension).to_string(),
        })
    }
}

fn extension(ext: &str) -> &str {
    ext.trim_start_matches('.')
}

fn escape_percent(s: &str) -> String {
    s.replace('%', "%%")
}

/// Output filename for one channel of one group, minus the sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTemplate {
    stem: String,
    extension: String,
}

impl OutputTemplate {
    pub fn file_name(&self, sequence: u32) -> String {
        format!("{}{}.{}", self.stem, sequence, self.extension)
    }

    /// Filename with the engine's sequence placeholder in place of the number.
    /// A literal `%` is doubled so the engine does not read it as an escape.
    pub fn pattern(&self) -> String {
        format!(
            "{}{}.{}",
            escape_percent(&self.stem),
            SEQUENCE_PLACEHOLDER,
            escape_percent(&self.extension)
        )
    }

    /// Full engine output pattern for tiles written into `dir`.
    pub fn pattern_in(&self, dir: &Path) -> PathBuf {
        let dir = match dir.to_str() {
            Some(dir) => PathBuf::from(escape_percent(dir)),
            None => dir.to_path_buf(),
        };
        dir.join(self.pattern())
    }

    /// Every file a frame starting at `first` with `count` tiles produces.
    pub fn paths_in(&self, dir: &Path, first: u32, count: u32) -> Vec<PathBuf> {
        (first..first + count)
            .map(|seq| dir.join(self.file_name(seq)))
            .collect()
    }
}
