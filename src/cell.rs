use crate::coord::{Coordinate, Coordinates};
use crate::error::PinError;
use crate::index::{BoundingBox, GRID_SIZE, LEVELS, Region};
use crate::io::arrow::PinCellsToArrow;
use crate::io::parquet::PinCellsToGeoParquet;
use crate::pin::{self, Pin};
use arrow_array::RecordBatch;
use geo::Centroid;
use geo_types::{Geometry, LineString, Point, Polygon};
use geoarrow_array::array::{PointArray, PolygonArray};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;

/// A single grid cell: its PIN, the region it belongs to, its centre and bounds.
///
/// # Example
///
/// ```
/// use pindrop_rs::{PinCell, Region};
///
/// # fn main() -> Result<(), pindrop_rs::PinError> {
/// let cell = PinCell::from_wgs84(&(77.2090, 28.6139), Region::India)?;
/// println!("PIN: {}", cell.pin);
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// let restored = PinCell::from_pin(&cell.pin.to_string(), Region::India)?;
/// assert_eq!(cell.pin, restored.pin);
///
/// // Rectangle of the cell, e.g. for drawing it on a map
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PinCell {
    pub pin: Pin,
    pub region: Region,
    /// Centre of the cell, x = longitude, y = latitude
    pub center: Point<f64>,
    /// Terminal bounds of the cell
    pub bounds: BoundingBox,
}

impl PinCell {
    /// Encodes a WGS84 coordinate, `(lon, lat)` for tuples.
    pub fn from_wgs84(coord: &impl Coordinate, region: Region) -> Result<Self, PinError> {
        let (pin, bounds) = pin::encode_to_pin_with_bounds(coord, region)?;
        Ok(Self {
            pin,
            region,
            center: bounds.center().to_point(),
            bounds,
        })
    }

    /// Builds a cell from a PIN string (hyphens optional, any case).
    ///
    /// The centre follows the region's decode precision.
    pub fn from_pin(raw: &str, region: Region) -> Result<Self, PinError> {
        let pin = pin::normalize(raw)?;
        let decoded = pin.decode(region)?;
        Ok(Self {
            pin,
            region,
            center: decoded.coordinates.to_point(),
            bounds: decoded.cell,
        })
    }

    /// Cells crossed by a line, in order of first visit.
    ///
    /// Samples every segment at half the region's cell size; each cell appears once.
    pub fn from_line_string(line: &LineString, region: Region) -> Result<Vec<Self>, PinError> {
        if let [only] = line.0.as_slice() {
            return Ok(vec![Self::from_wgs84(&Point::from(*only), region)?]);
        }

        let step = sample_step(region);
        let mut seen: HashSet<Pin> = HashSet::new();
        let mut cells: Vec<PinCell> = Vec::new();

        for window in line.0.windows(2) {
            let start = &window[0];
            let end = &window[1];

            let dx = end.x - start.x;
            let dy = end.y - start.y;
            let steps = ((dx.abs().max(dy.abs())) / step).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let cell = Self::from_wgs84(&(start.x + t * dx, start.y + t * dy), region)?;
                if seen.insert(cell.pin.clone()) {
                    cells.push(cell);
                }
            }
        }

        Ok(cells)
    }

    /// Create PinCells from an arbitrary `geo_types::Geometry` in WGS84.
    ///
    /// Points map to one cell each, lines are sampled, polygons use their
    /// centroid; multi-geometries and collections are flattened.
    pub fn from_geometry(geom: Geometry<f64>, region: Region) -> Result<Vec<Self>, PinError> {
        match geom {
            Geometry::Point(pt) => Ok(vec![Self::from_wgs84(&pt, region)?]),
            Geometry::MultiPoint(mp) => mp
                .0
                .iter()
                .map(|pt| Self::from_wgs84(pt, region))
                .collect(),
            Geometry::Line(line) => Self::from_line_string(&LineString::from(line), region),
            Geometry::LineString(line) => Self::from_line_string(&line, region),
            Geometry::MultiLineString(mls) => {
                let mut cells = Vec::new();
                for line in &mls.0 {
                    cells.extend(Self::from_line_string(line, region)?);
                }
                Ok(cells)
            }
            Geometry::Polygon(poly) => Ok(poly
                .centroid()
                .map(|c| Self::from_wgs84(&c, region))
                .transpose()?
                .into_iter()
                .collect()),
            Geometry::MultiPolygon(mp) => mp
                .0
                .iter()
                .filter_map(|poly| poly.centroid())
                .map(|c| Self::from_wgs84(&c, region))
                .collect(),
            Geometry::Rect(rect) => Ok(vec![Self::from_wgs84(&Point::from(rect.center()), region)?]),
            Geometry::GeometryCollection(gc) => {
                let mut cells = Vec::new();
                for g in gc.0 {
                    cells.extend(Self::from_geometry(g, region)?);
                }
                Ok(cells)
            }
            _ => Err(PinError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            )),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.center.y()
    }

    pub fn longitude(&self) -> f64 {
        self.center.x()
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::from(self.center)
    }

    /// Converts this cell to its rectangular polygon.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// Converts this cell's center to an Arrow PointArray.
    pub fn to_arrow_points(&self) -> PointArray {
        std::slice::from_ref(self).to_arrow_points()
    }

    /// Converts this cell to an Arrow PolygonArray.
    pub fn to_arrow_polygons(&self) -> PolygonArray {
        std::slice::from_ref(self).to_arrow_polygons()
    }

    /// Converts this cell to an Arrow RecordBatch with all attributes.
    pub fn to_record_batch(&self) -> Result<RecordBatch, PinError> {
        std::slice::from_ref(self).to_record_batch()
    }

    /// Writes this cell to a GeoParquet file.
    pub fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PinError> {
        std::slice::from_ref(self).to_geoparquet(path)
    }
}

/// Half the edge of a terminal cell, in degrees, along the shorter axis.
fn sample_step(region: Region) -> f64 {
    let root = region.bounds();
    let divisions = (GRID_SIZE as f64).powi(LEVELS as i32);
    root.lat_span().min(root.lon_span()) / divisions / 2.0
}

/// Encodes many coordinates in parallel. Output order matches input order.
pub fn encode_batch<C>(coords: &[C], region: Region) -> Vec<Result<PinCell, PinError>>
where
    C: Coordinate + Sync,
{
    coords
        .par_iter()
        .map(|c| PinCell::from_wgs84(c, region))
        .collect()
}

/// Decodes many PINs in parallel. Output order matches input order.
pub fn decode_batch<S>(pins: &[S], region: Region) -> Vec<Result<PinCell, PinError>>
where
    S: AsRef<str> + Sync,
{
    pins.par_iter()
        .map(|p| PinCell::from_pin(p.as_ref(), region))
        .collect()
}
