pub mod arrow;
pub mod csv;
pub mod parquet;

pub use arrow::PinCellsToArrow;
pub use csv::{CsvPinConfig, CsvSummary, CsvToPin, GeometryFormat, PinSource, csv_to_pin_csv};
pub use parquet::{GridMetadata, PinCellsToGeoParquet, read_grid_metadata, write_geoparquet};
