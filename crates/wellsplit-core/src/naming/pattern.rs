use regex::Regex;

use crate::error::{Result, WellSplitError};

/// Matcher for raw microscope filenames:
/// `<prefix><digits><separator><channel>.<ext>`.
#[derive(Clone, Debug)]
pub struct InputPattern {
    regex: Regex,
}

impl InputPattern {
    pub fn new(prefix: &str, channel_separator: &str, extension: &str) -> Result<Self> {
        let source = format!(
            r"^{}(\d+){}(\d+)\.{}$",
            regex::escape(prefix),
            regex::escape(channel_separator),
            regex::escape(extension.trim_start_matches('.')),
        );
        let regex = Regex::new(&source)
            .map_err(|e| WellSplitError::InvalidConfig(format!("input pattern: {e}")))?;
        Ok(Self { regex })
    }

    pub fn matches(&self, filename: &str) -> bool {
        self.regex.is_match(filename)
    }

    /// Length of the frame-number digit run in `filename`.
    pub fn digit_width(&self, filename: &str) -> Result<usize> {
        self.regex
            .captures(filename)
            .and_then(|caps| caps.get(1))
            .map(|digits| digits.as_str().len())
            .ok_or_else(|| WellSplitError::FilenamePatternMismatch {
                filename: filename.to_string(),
                pattern: self.as_str().to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Frame number and channel encoded in `filename`, if it matches.
    pub fn parse(&self, filename: &str) -> Option<(u64, u32)> {
        let caps = self.regex.captures(filename)?;
        let frame = caps.get(1)?.as_str().parse().ok()?;
        let channel = caps.get(2)?.as_str().parse().ok()?;
        Some((frame, channel))
    }
}
