//! # pindrop-rs
//!
//! DIGIPIN and WorldPIN: ten-symbol geocodes built by subdividing a region
//! into a 4x4 grid ten times over.
//!
//! ### 1. Encoding and decoding
//!
//! ```
//! use pindrop_rs::{Region, decode_from_pin, encode_to_pin};
//!
//! # fn main() -> Result<(), pindrop_rs::PinError> {
//! // (longitude, latitude)
//! let pin = encode_to_pin(&(77.2090, 28.6139), Region::India)?;
//! println!("{}", pin); // XXX-XXX-XXXX
//!
//! let (centre, cell) = decode_from_pin(&pin.to_string(), Region::India)?;
//! assert!(cell.contains(&(77.2090, 28.6139)));
//! assert!((centre.latitude - 28.6139).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `PinCell` - Single Cell Operations
//!
//! ```
//! use pindrop_rs::{PinCell, Region};
//!
//! # fn main() -> Result<(), pindrop_rs::PinError> {
//! let cell = PinCell::from_wgs84(&(-0.1276, 51.5072), Region::World)?;
//! let polygon = cell.to_polygon();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToPin` - CSV File Conversion
//!
//! ```no_run
//! use pindrop_rs::{CsvPinConfig, CsvToPin, GeometryFormat, Region};
//!
//! let config = CsvPinConfig::new("geometry", Region::India)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_pin_csv("output.csv", &config).unwrap();
//! ```
//!
//! Result envelopes for UI or HTTP callers live in [`api`].

pub mod api;
pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod pin;

pub use cell::{PinCell, decode_batch, encode_batch};
pub use coord::{Coordinate, Coordinates};
pub use error::{Axis, Bound, PinError};
pub use geom::{parse_geojson, parse_geometry, parse_wkt};
pub use index::{
    BoundingBox, Codec, DIGIPIN_ALPHABET, Decoded, Encoded, GRID_SIZE, GridAlphabet,
    INDIA_BOUNDS, LEVELS, PIN_DISPLAY_LEN, PIN_SEPARATOR, Region, Subdivision, VALID_CHARS,
    WORLD_BOUNDS,
};
pub use io::{
    CsvPinConfig, CsvSummary, CsvToPin, GeometryFormat, GridMetadata, PinCellsToArrow,
    PinCellsToGeoParquet, PinSource, csv_to_pin_csv, read_grid_metadata, write_geoparquet,
};
pub use pin::{
    Pin, decode_from_pin, encode_to_pin, encode_to_pin_with_bounds, is_valid_format, normalize,
};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
