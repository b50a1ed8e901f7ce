use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::consts::DEFAULT_ENGINE_PROGRAM;
use crate::contrast::TransformParams;
use crate::error::{Result, WellSplitError};

use super::{EngineRequest, TransformEngine};

/// Runs ImageMagick's `convert` (or a compatible program) once per frame.
#[derive(Clone, Debug)]
pub struct MagickEngine {
    program: PathBuf,
}

impl Default for MagickEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE_PROGRAM)
    }
}

impl MagickEngine {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that the program can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program).arg("-version").output().is_ok()
    }

    /// Argument list for one invocation, excluding the program itself.
    pub fn command_args(request: &EngineRequest<'_>) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![request.input.into()];
        args.extend(contrast_args(request.transform).into_iter().map(OsString::from));
        args.extend(request.transform_ops.iter().map(OsString::from));
        args.push("-depth".into());
        args.push(request.output_bit_depth.to_string().into());
        args.push("-scene".into());
        args.push(request.sequence_start.to_string().into());
        args.push(request.output_pattern.into());
        args
    }
}

fn contrast_args(transform: TransformParams) -> Vec<String> {
    match transform {
        TransformParams::Identity => vec![],
        TransformParams::Multiply(factor) => {
            vec!["-evaluate".into(), "multiply".into(), factor.to_string()]
        }
        TransformParams::AutoLevel => vec!["-auto-level".into()],
        TransformParams::Normalize => vec!["-normalize".into()],
    }
}

impl TransformEngine for MagickEngine {
    fn name(&self) -> &str {
        self.program.to_str().unwrap_or("convert")
    }

    fn convert(&self, request: &EngineRequest<'_>) -> Result<()> {
        let args = Self::command_args(request);
        debug!(program = %self.program.display(), ?args, "Invoking transform engine");

        let mut command = Command::new(&self.program);
        command.args(&args);
        // A terminal Ctrl-C signals the whole foreground group. The engine gets
        // a group of its own so in-flight conversions finish while the
        // scheduler stops admitting new ones.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let output = command
            .output()
            .map_err(|e| WellSplitError::ConversionEngineFailure {
                input: request.input.to_path_buf(),
                reason: format!("failed to launch {}: {e}", self.program.display()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WellSplitError::ConversionEngineFailure {
                input: request.input.to_path_buf(),
                reason: format!("{} ({})", stderr.trim(), output.status),
            });
        }
        Ok(())
    }
}
