use crate::error::PinError;
use geo_types::Geometry;
use geojson::GeoJson;
use std::str::FromStr;
use wkt::Wkt;

/// Parses a WGS84 geometry string, auto-detecting GeoJSON or WKT.
///
/// A leading `{` means GeoJSON; anything else is read as WKT. Coordinates are
/// expected in `(lon, lat)` order as both formats specify.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, PinError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PinError::GeometryParseError("empty geometry".to_string()));
    }
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON Geometry or Feature.
///
/// FeatureCollections are rejected; split them into rows first.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, PinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| PinError::GeometryParseError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        GeoJson::Feature(feature) => feature.geometry.ok_or_else(|| {
            PinError::GeometryParseError("GeoJSON feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(PinError::GeometryParseError(
                "GeoJSON FeatureCollection is not a single geometry".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(|e| PinError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, PinError> {
    let wkt = Wkt::<f64>::from_str(s).map_err(|e| PinError::GeometryParseError(e.to_string()))?;

    Geometry::try_from(wkt)
        .map_err(|_| PinError::GeometryParseError(format!("unsupported WKT geometry: {}", s)))
}
