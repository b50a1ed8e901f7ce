pub mod genotype;
pub mod layout;
pub mod scan_path;

pub use genotype::{GenotypeTable, TableFormat};
pub use layout::{PlateLayout, Well};
pub use scan_path::scan_ordinal;
