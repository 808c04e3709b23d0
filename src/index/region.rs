use crate::coord::{Coordinate, Coordinates};
use crate::error::{Axis, Bound, PinError};
use crate::index::constants::{
    INDIA_BOUNDS, INDIA_COORDINATE_PRECISION, MEAN_EARTH_RADIUS_M, WORLD_BOUNDS,
};
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An axis-aligned latitude/longitude box, in degrees.
///
/// Expected to satisfy `min_lat < max_lat` and `min_lon < max_lon`. Boxes are
/// never mutated; every subdivision level derives a new one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Returns the centre of the box.
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Inclusive containment test. Always false for NaN input.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.y())
            && (self.min_lon..=self.max_lon).contains(&coord.x())
    }

    /// Like [`contains`](Self::contains) but reports which limit was crossed.
    ///
    /// Latitude is checked before longitude.
    ///
    /// # Errors
    ///
    /// - [`PinError::NotFinite`] - NaN or infinite coordinate
    /// - [`PinError::OutOfBounds`] - the first axis/limit that is violated
    pub fn check(&self, coord: &impl Coordinate) -> Result<(), PinError> {
        check_axis(Axis::Latitude, coord.y(), self.min_lat, self.max_lat)?;
        check_axis(Axis::Longitude, coord.x(), self.min_lon, self.max_lon)
    }

    /// Approximate `(width, height)` of the box in metres, measured at its centre latitude.
    pub fn approximate_size_m(&self) -> (f64, f64) {
        let height = MEAN_EARTH_RADIUS_M * self.lat_span().to_radians();
        let width = MEAN_EARTH_RADIUS_M
            * self.lon_span().to_radians()
            * self.center().latitude.to_radians().cos();
        (width.abs(), height)
    }

    /// Converts to a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}

fn check_axis(axis: Axis, value: f64, min: f64, max: f64) -> Result<(), PinError> {
    if !value.is_finite() {
        return Err(PinError::NotFinite(axis));
    }
    if value < min {
        return Err(PinError::OutOfBounds {
            axis,
            bound: Bound::Min,
            value,
            limit: min,
        });
    }
    if value > max {
        return Err(PinError::OutOfBounds {
            axis,
            bound: Bound::Max,
            value,
            limit: max,
        });
    }
    Ok(())
}

/// A named coordinate domain with its own root bounds.
///
/// `India` produces DIGIPINs, `World` produces WorldPINs. Both use the same
/// alphabet and depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    India,
    World,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::India, Region::World];

    /// Root bounds of the region.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Region::India => INDIA_BOUNDS,
            Region::World => WORLD_BOUNDS,
        }
    }

    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        self.bounds().contains(coord)
    }

    /// Decimal places decoded centres are rounded to, if any.
    ///
    /// DIGIPINs already in circulation were decoded by a reference library that
    /// reports six decimals, so India keeps that; World reports the exact centre.
    pub fn coordinate_precision(&self) -> Option<u32> {
        match self {
            Region::India => Some(INDIA_COORDINATE_PRECISION),
            Region::World => None,
        }
    }

    /// Name of the code family issued in this region.
    pub fn code_name(&self) -> &'static str {
        match self {
            Region::India => "DIGIPIN",
            Region::World => "WorldPIN",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::India => "india",
            Region::World => "world",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "india" | "digipin" => Ok(Region::India),
            "world" | "worldpin" => Ok(Region::World),
            _ => Err(PinError::UnknownRegion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bounds() {
        let india = Region::India.bounds();
        assert_eq!(india, BoundingBox::new(2.5, 38.5, 63.5, 99.5));

        let world = Region::World.bounds();
        assert_eq!(world, BoundingBox::new(-90.0, 90.0, -180.0, 180.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let india = Region::India.bounds();
        assert!(india.contains(&(63.5, 2.5)));
        assert!(india.contains(&(99.5, 38.5)));
        assert!(!india.contains(&(99.5001, 38.5)));
        assert!(!india.contains(&(f64::NAN, 20.0)));
    }

    #[test]
    fn test_check_reports_axis_and_bound() {
        let india = Region::India.bounds();

        let err = india.check(&(77.0, 40.0)).unwrap_err();
        assert_eq!(
            err,
            PinError::OutOfBounds {
                axis: Axis::Latitude,
                bound: Bound::Max,
                value: 40.0,
                limit: 38.5,
            }
        );

        let err = india.check(&(60.0, 20.0)).unwrap_err();
        assert!(matches!(
            err,
            PinError::OutOfBounds {
                axis: Axis::Longitude,
                bound: Bound::Min,
                ..
            }
        ));

        assert_eq!(
            india.check(&(77.0, f64::INFINITY)),
            Err(PinError::NotFinite(Axis::Latitude))
        );
        assert!(india.check(&(77.0, 20.0)).is_ok());
    }

    #[test]
    fn test_center() {
        let center = Region::India.bounds().center();
        assert_eq!(center, Coordinates::new(20.5, 81.5));
    }

    #[test]
    fn test_region_from_str() -> Result<(), PinError> {
        assert_eq!("india".parse::<Region>()?, Region::India);
        assert_eq!(" World ".parse::<Region>()?, Region::World);
        assert_eq!("DIGIPIN".parse::<Region>()?, Region::India);
        assert_eq!("worldpin".parse::<Region>()?, Region::World);
        assert!(matches!(
            "mars".parse::<Region>(),
            Err(PinError::UnknownRegion(_))
        ));
        Ok(())
    }

    #[test]
    fn test_region_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Region::World).unwrap(), r#""world""#);
        let region: Region = serde_json::from_str(r#""india""#).unwrap();
        assert_eq!(region, Region::India);
    }

    #[test]
    fn test_bounding_box_serde_names() {
        let json = serde_json::to_value(Region::India.bounds()).unwrap();
        assert_eq!(json["minLat"], 2.5);
        assert_eq!(json["maxLon"], 99.5);
    }

    #[test]
    fn test_to_polygon_is_closed_rectangle() {
        let polygon = Region::India.bounds().to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }

    #[test]
    fn test_approximate_size() {
        // one degree of latitude is roughly 111 km
        let (w, h) = BoundingBox::new(0.0, 1.0, 0.0, 1.0).approximate_size_m();
        assert!((h - 111_195.0).abs() < 100.0);
        assert!((w - h).abs() < 100.0);
    }
}
