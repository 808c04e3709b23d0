use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Trait for types that can provide WGS84 longitude/latitude.
///
/// Implemented for `(f64, f64)` tuples in `(lon, lat)` order, `geo_types::Point<f64>`
/// and [`Coordinates`]. This allows the codec to accept any of them.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

/// A latitude/longitude pair in degrees.
///
/// There is no range restriction here; whether a value is usable depends on the
/// [`Region`](crate::Region) it is encoded against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a value from anything implementing [`Coordinate`].
    pub fn from_coord(coord: &impl Coordinate) -> Self {
        Self::new(coord.y(), coord.x())
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl Coordinate for Coordinates {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

impl From<Point<f64>> for Coordinates {
    fn from(point: Point<f64>) -> Self {
        Self::from_coord(&point)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coords: Coordinates) -> Self {
        coords.to_point()
    }
}
