use crate::cell::PinCell;
use crate::error::PinError;
use arrow_array::{Float64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`PinCell`]s to Arrow arrays.
///
/// Implemented for `[PinCell]` and `Vec<PinCell>`.
pub trait PinCellsToArrow {
    /// Converts cell centres to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cells to an Arrow PolygonArray of cell rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with pin, region, centre, bounds and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, PinError>;
}

impl PinCellsToArrow for [PinCell] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for cell in self {
            builder.push_point(Some(&cell.center));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|c: &PinCell| c.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, PinError> {
        let polygon_array = self.to_arrow_polygons();
        let pins: StringArray = self.iter().map(|c| Some(c.pin.hyphenated())).collect();
        let regions: StringArray = self.iter().map(|c| Some(c.region.as_str())).collect();
        let float_column = |f: fn(&PinCell) -> f64| -> Float64Array {
            self.iter().map(|c| Some(f(c))).collect()
        };

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("pin", DataType::Utf8, false),
            Field::new("region", DataType::Utf8, false),
            Field::new("latitude", DataType::Float64, false),
            Field::new("longitude", DataType::Float64, false),
            Field::new("min_lat", DataType::Float64, false),
            Field::new("max_lat", DataType::Float64, false),
            Field::new("min_lon", DataType::Float64, false),
            Field::new("max_lon", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(pins),
                Arc::new(regions),
                Arc::new(float_column(|c| c.latitude())),
                Arc::new(float_column(|c| c.longitude())),
                Arc::new(float_column(|c| c.bounds.min_lat)),
                Arc::new(float_column(|c| c.bounds.max_lat)),
                Arc::new(float_column(|c| c.bounds.min_lon)),
                Arc::new(float_column(|c| c.bounds.max_lon)),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| PinError::IoError(e.to_string()))
    }
}

impl PinCellsToArrow for Vec<PinCell> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, PinError> {
        self.as_slice().to_record_batch()
    }
}
