#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::io;
use std::sync::{Arc, Mutex};

use wellsplit_core::engine::{EngineRequest, TransformEngine};
use wellsplit_core::error::{Result, WellSplitError};
use wellsplit_core::pipeline::config::BatchConfig;
use wellsplit_core::profile::{MicroscopeProfile, ProfileParams};

pub const LABELS: [&str; 3] = ["wt", "mutA", "mutB"];
pub const FIELDS: u32 = 2;
pub const CHANNELS: u32 = 3;
pub const TILES: u32 = 2;

/// Row-major labels for a plate: wells cycle through `LABELS`.
pub fn cycling_labels(wells: usize) -> Vec<String> {
    (0..wells).map(|i| LABELS[i % LABELS.len()].to_string()).collect()
}

pub fn write_genotype_table(path: &Path, labels: &[String]) {
    let mut contents = String::from("genotype,notes\n");
    for label in labels {
        contents.push_str(label);
        contents.push_str(",x\n");
    }
    fs::write(path, contents).unwrap();
}

pub fn frame_name(frame: u64, channel: u32) -> String {
    format!("img{:04}_c{}.tif", frame, channel)
}

/// Create every raw frame a 96-well plate with `FIELDS` fields and
/// `CHANNELS` channels would produce.
pub fn write_input_frames(dir: &Path, wells: u64) {
    fs::create_dir_all(dir).unwrap();
    for frame in 1..=wells * FIELDS as u64 {
        for channel in 1..=CHANNELS {
            fs::write(dir.join(frame_name(frame, channel)), b"raw").unwrap();
        }
    }
}

/// A complete 96-well batch in `root` with a small custom profile.
pub fn plate_fixture(root: &Path) -> BatchConfig {
    let input = root.join("frames");
    let output = root.join("tiles");
    let table = root.join("plate.csv");

    write_input_frames(&input, 96);
    write_genotype_table(&table, &cycling_labels(96));

    let mut config = BatchConfig::new(input, output, table);
    config.plate.wells = 96;
    config.microscope = MicroscopeProfile::Custom(ProfileParams {
        tiles_per_frame: TILES,
        sensor_bit_depth: 12,
        transform_ops: vec![],
    });
    config.naming.input_prefix = "img".into();
    config.naming.channel_separator = "_c".into();
    config.acquisition.channels = CHANNELS;
    config.acquisition.fields_per_well = Some(FIELDS);
    config.execution.jobs = Some(4);
    config
}

/// Expand an engine output pattern the way ImageMagick does: `%d` becomes
/// the scene number and `%%` a literal percent sign.
fn expand(pattern: &Path, sequence: u32) -> PathBuf {
    let pattern = pattern.to_string_lossy();
    let mut expanded = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            expanded.push(c);
            continue;
        }
        match chars.next() {
            Some('d') => expanded.push_str(&sequence.to_string()),
            Some(other) => expanded.push(other),
            None => expanded.push('%'),
        }
    }
    PathBuf::from(expanded)
}

/// Writes placeholder tiles the way the real engine names them.
pub struct FakeEngine {
    pub tiles: u32,
    pub calls: AtomicUsize,
    /// Input filenames for which the engine fails after writing one tile.
    pub fail_inputs: Mutex<Vec<String>>,
}

impl FakeEngine {
    pub fn new(tiles: u32) -> Self {
        Self {
            tiles,
            calls: AtomicUsize::new(0),
            fail_inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(tiles: u32, inputs: &[&str]) -> Self {
        let engine = Self::new(tiles);
        *engine.fail_inputs.lock().unwrap() = inputs.iter().map(|s| s.to_string()).collect();
        engine
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransformEngine for FakeEngine {
    fn name(&self) -> &str {
        "fake"
    }

    fn convert(&self, request: &EngineRequest<'_>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let input_name = request
            .input
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();

        if self.fail_inputs.lock().unwrap().contains(&input_name) {
            fs::write(expand(request.output_pattern, request.sequence_start), b"partial")?;
            return Err(WellSplitError::ConversionEngineFailure {
                input: request.input.to_path_buf(),
                reason: "simulated failure".into(),
            });
        }

        for seq in request.sequence_start..request.sequence_start + self.tiles {
            fs::write(expand(request.output_pattern, seq), b"tile")?;
        }
        Ok(())
    }
}

/// Every regular file below `dir`, relative to `dir`.
pub fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    if !dir.exists() {
        return out;
    }
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            for inner in files_under(&path) {
                out.push(path.strip_prefix(dir).unwrap().join(inner));
            }
        } else {
            out.push(path.strip_prefix(dir).unwrap().to_path_buf());
        }
    }
    out.sort();
    out
}

/// Log sink shared between a test and the subscriber it installs.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with warnings and errors logged on this thread captured as text.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
