use crate::cell::PinCell;
use crate::error::PinError;
use crate::geom::parse_geometry;
use crate::index::Region;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

enum SourceIndices {
    Geometry(usize),
    Coordinates { lon_idx: usize, lat_idx: usize },
    Pin(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Where each CSV row's location comes from.
#[derive(Debug, Clone)]
pub enum PinSource {
    /// A single column containing WKT or GeoJSON geometry (WGS84)
    GeometryColumn(String),
    /// Separate longitude and latitude columns
    CoordinateColumns {
        lon_column: String,
        lat_column: String,
    },
    /// A column of PINs to decode back to coordinates
    PinColumn(String),
}

/// Configuration for CSV conversion.
#[derive(Debug, Clone)]
pub struct CsvPinConfig {
    pub source: PinSource,
    pub region: Region,
    pub exclude_columns: Vec<String>,
    pub include_cell_geometry: Option<GeometryFormat>,
    /// Log and skip rows that cannot be converted instead of failing.
    pub skip_invalid_rows: bool,
}

/// Row counts from a conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CsvSummary {
    pub rows_read: usize,
    pub rows_written: usize,
    pub skipped: usize,
}

impl CsvPinConfig {
    fn with_source(source: PinSource, region: Region) -> Self {
        Self {
            source,
            region,
            exclude_columns: Vec::new(),
            include_cell_geometry: None,
            skip_invalid_rows: false,
        }
    }

    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use pindrop_rs::{CsvPinConfig, Region};
    ///
    /// let config = CsvPinConfig::new("geometry", Region::India);
    /// ```
    pub fn new(geometry_column: impl Into<String>, region: Region) -> Self {
        Self::with_source(PinSource::GeometryColumn(geometry_column.into()), region)
    }

    /// Create config for a CSV with separate longitude/latitude columns.
    ///
    /// # Example
    /// ```
    /// use pindrop_rs::{CsvPinConfig, Region};
    ///
    /// let config = CsvPinConfig::from_coords("lon", "lat", Region::World)
    ///     .skip_invalid_rows(true);
    /// ```
    pub fn from_coords(
        lon_column: impl Into<String>,
        lat_column: impl Into<String>,
        region: Region,
    ) -> Self {
        Self::with_source(
            PinSource::CoordinateColumns {
                lon_column: lon_column.into(),
                lat_column: lat_column.into(),
            },
            region,
        )
    }

    /// Create config that decodes a PIN column into `latitude`/`longitude` columns.
    pub fn from_pins(pin_column: impl Into<String>, region: Region) -> Self {
        Self::with_source(PinSource::PinColumn(pin_column.into()), region)
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Include the cell rectangle in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }

    pub fn skip_invalid_rows(mut self, skip: bool) -> Self {
        self.skip_invalid_rows = skip;
        self
    }
}

pub trait CsvToPin {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<CsvSummary, PinError>;
}

impl<P: AsRef<Path>> CsvToPin for P {
    fn to_pin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<CsvSummary, PinError> {
        csv_to_pin_csv(self, output_path, config)
    }
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, PinError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| PinError::CsvError(format!("Column '{}' not found", name)))
}

fn parse_degrees(record: &csv::StringRecord, idx: usize, what: &str) -> Result<f64, PinError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| PinError::CsvError(format!("Missing {} column at index {}", what, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| PinError::CsvError(format!("Invalid {}: '{}'", what, raw)))
}

fn row_cells(
    record: &csv::StringRecord,
    source: &SourceIndices,
    region: Region,
) -> Result<Vec<PinCell>, PinError> {
    match source {
        SourceIndices::Geometry(idx) => {
            let geom_str = record.get(*idx).ok_or_else(|| {
                PinError::CsvError(format!("Missing geometry column at index {}", idx))
            })?;
            PinCell::from_geometry(parse_geometry(geom_str)?, region)
        }
        SourceIndices::Coordinates { lon_idx, lat_idx } => {
            let lon = parse_degrees(record, *lon_idx, "longitude")?;
            let lat = parse_degrees(record, *lat_idx, "latitude")?;
            Ok(vec![PinCell::from_wgs84(&(lon, lat), region)?])
        }
        SourceIndices::Pin(idx) => {
            let raw = record
                .get(*idx)
                .ok_or_else(|| PinError::CsvError(format!("Missing PIN column at index {}", idx)))?;
            Ok(vec![PinCell::from_pin(raw.trim(), region)?])
        }
    }
}

/// Converts a CSV file to a CSV keyed by PIN (or, for a PIN source, by decoded coordinates).
///
/// Streams rows, so large files are fine. The output starts with a `pin`
/// column; decoding adds `latitude` and `longitude`; `cell_geometry` follows
/// when requested; the remaining input columns are copied unless excluded.
/// Input columns sharing a name with a generated column are dropped.
/// A geometry that maps to several cells (lines, multi-geometries) writes one
/// row per cell.
///
/// # Example
///
/// ```no_run
/// use pindrop_rs::{CsvPinConfig, GeometryFormat, Region, csv_to_pin_csv};
///
/// let config = CsvPinConfig::from_coords("Longitude", "Latitude", Region::India)
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// let summary = csv_to_pin_csv("post_offices.csv", "output.csv", &config).unwrap();
/// println!("{} rows written", summary.rows_written);
/// ```
pub fn csv_to_pin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPinConfig,
) -> Result<CsvSummary, PinError> {
    let file = File::open(csv_path.as_ref()).map_err(|e| PinError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PinError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        PinSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        PinSource::CoordinateColumns {
            lon_column,
            lat_column,
        } => {
            let lon_idx = column_index(&headers, lon_column)?;
            let lat_idx = column_index(&headers, lat_column)?;
            (
                SourceIndices::Coordinates { lon_idx, lat_idx },
                HashSet::from([lon_idx, lat_idx]),
            )
        }
        PinSource::PinColumn(col) => {
            let idx = column_index(&headers, col)?;
            (SourceIndices::Pin(idx), HashSet::from([idx]))
        }
    };
    let decoding = matches!(source_indices, SourceIndices::Pin(_));

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path.as_ref()).map_err(|e| PinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["pin"];
    if decoding {
        header_row.extend(["latitude", "longitude"]);
    }
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }

    // Input columns named like a generated column are replaced by it.
    for (i, h) in headers.iter().enumerate() {
        if header_row.contains(&h) && exclude_indices.insert(i) {
            log::debug!("Input column '{}' replaced by generated column", h);
        }
    }

    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| PinError::CsvError(e.to_string()))?;

    let mut summary = CsvSummary::default();

    for (row_number, result) in reader.records().enumerate() {
        let record = result.map_err(|e| PinError::CsvError(e.to_string()))?;
        summary.rows_read += 1;

        let cells = match row_cells(&record, &source_indices, config.region) {
            Ok(cells) => cells,
            Err(e) if config.skip_invalid_rows => {
                log::warn!("Skipping row {}: {}", row_number + 1, e);
                summary.skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.pin.hyphenated()];

            if decoding {
                row.push(cell.latitude().to_string());
                row.push(cell.longitude().to_string());
            }

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| PinError::CsvError(e.to_string()))?;
            summary.rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| PinError::IoError(e.to_string()))?;

    log::debug!(
        "{} conversion: {} rows read, {} written, {} skipped",
        config.region.code_name(),
        summary.rows_read,
        summary.rows_written,
        summary.skipped
    );
    Ok(summary)
}
