use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_LABEL_COLUMN;
use crate::error::{Result, WellSplitError};

use super::layout::PlateLayout;

/// How labels are laid out in the delimited plate table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableFormat {
    /// Field delimiter, a single ASCII character.
    pub delimiter: char,
    /// 0-based column holding the genotype label.
    pub label_column: usize,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ',',
            label_column: DEFAULT_LABEL_COLUMN,
        }
    }
}

/// Genotype label for every well, indexed by grid index (row-major).
#[derive(Clone, Debug)]
pub struct GenotypeTable {
    labels: Vec<String>,
}

impl GenotypeTable {
    /// Load labels from a delimited file. The first row is a header and is
    /// discarded; one row per well follows in row-major order.
    pub fn load(path: &Path, layout: &PlateLayout, format: &TableFormat) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, layout, format)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        layout: &PlateLayout,
        format: &TableFormat,
    ) -> Result<Self> {
        if !format.delimiter.is_ascii() {
            return Err(WellSplitError::InvalidConfig(format!(
                "table delimiter '{}' is not ASCII",
                format.delimiter
            )));
        }

        let expected = layout.well_count();
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(format.delimiter as u8)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // The reader skips blank lines, which in a one-column table are wells
        // without a label. A jump in line numbers marks one.
        csv_reader.headers()?;
        let mut record = csv::StringRecord::new();
        let mut labels = Vec::with_capacity(expected);
        while labels.len() < expected {
            let line = csv_reader.position().line();
            if !csv_reader.read_record(&mut record)? {
                break;
            }
            let consumed = csv_reader.position().line() - line;
            let embedded = record.iter().map(|f| f.matches('\n').count() as u64).sum::<u64>();
            let label = match record.get(format.label_column) {
                Some(label) => label,
                None => break,
            };
            if consumed > embedded + 1 || label.is_empty() {
                return Err(WellSplitError::BlankGenotypeLabel {
                    well_index: labels.len(),
                    line,
                });
            }
            labels.push(label.to_string());
        }

        if labels.len() < expected {
            return Err(WellSplitError::MissingPlateData {
                expected,
                found: labels.len(),
            });
        }

        debug!(wells = expected, "Loaded genotype table");
        Ok(Self { labels })
    }

    /// Build a table directly from row-major labels.
    pub fn from_labels<I, S>(labels: I, layout: &PlateLayout) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected = layout.well_count();
        let labels: Vec<String> = labels.into_iter().take(expected).map(Into::into).collect();
        if labels.len() < expected {
            return Err(WellSplitError::MissingPlateData {
                expected,
                found: labels.len(),
            });
        }
        Ok(Self { labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, grid_index: usize) -> &str {
        &self.labels[grid_index]
    }

    /// Number of wells before `grid_index` (in grid order) carrying the same
    /// label.
    pub fn occurrence_rank(&self, grid_index: usize) -> usize {
        let label = &self.labels[grid_index];
        self.labels[..grid_index]
            .iter()
            .filter(|other| *other == label)
            .count()
    }

    /// Total number of wells carrying `label`.
    pub fn label_count(&self, label: &str) -> usize {
        self.labels.iter().filter(|l| l.as_str() == label).count()
    }

    /// Distinct labels with their well counts, in order of first appearance.
    pub fn groups(&self) -> Vec<(&str, usize)> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for label in &self.labels {
            let count = counts.entry(label.as_str()).or_insert(0);
            if *count == 0 {
                order.push(label.as_str());
            }
            *count += 1;
        }
        order.into_iter().map(|l| (l, counts[l])).collect()
    }
}
