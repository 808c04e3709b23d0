use crate::cell::PinCell;
use crate::error::PinError;
use crate::index::{BoundingBox, LEVELS, Region};
use crate::io::arrow::PinCellsToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::format::KeyValue;
use std::fs::File;
use std::path::Path;

const META_PREFIX: &str = "pindrop";

/// The grid a GeoParquet file of cells was produced from, one entry per region.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetadata {
    pub region: Region,
    pub code_name: String,
    pub root: BoundingBox,
    pub levels: usize,
}

impl GridMetadata {
    pub fn for_region(region: Region) -> Self {
        Self {
            region,
            code_name: region.code_name().to_string(),
            root: region.bounds(),
            levels: LEVELS,
        }
    }

    fn to_key_values(&self) -> Vec<KeyValue> {
        let key = |field: &str| format!("{}:{}:{}", META_PREFIX, self.region, field);
        let root = &self.root;
        vec![
            KeyValue::new(key("code"), self.code_name.clone()),
            KeyValue::new(
                key("root"),
                format!(
                    "{},{},{},{}",
                    root.min_lat, root.max_lat, root.min_lon, root.max_lon
                ),
            ),
            KeyValue::new(key("levels"), self.levels.to_string()),
        ]
    }
}

fn parse_root(raw: &str) -> Result<BoundingBox, PinError> {
    let values = raw
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| PinError::IoError(format!("Invalid root bounds '{}': {}", raw, e)))?;
    match values.as_slice() {
        [min_lat, max_lat, min_lon, max_lon] => {
            Ok(BoundingBox::new(*min_lat, *max_lat, *min_lon, *max_lon))
        }
        _ => Err(PinError::IoError(format!("Invalid root bounds '{}'", raw))),
    }
}

fn lookup_value<'a>(entries: &'a [KeyValue], key: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|kv| kv.key == key)
        .and_then(|kv| kv.value.as_deref())
}

/// Regions present in `cells`, in `Region::ALL` order.
fn regions_of(cells: &[PinCell]) -> Vec<Region> {
    Region::ALL
        .into_iter()
        .filter(|region| cells.iter().any(|c| c.region == *region))
        .collect()
}

/// Writes a RecordBatch with a GeoArrow geometry column as WKB-encoded GeoParquet.
///
/// `grids` are recorded in the file's key-value metadata next to the `geo`
/// entry so readers know which region and root box the PINs belong to.
pub fn write_geoparquet(
    batch: &RecordBatch,
    path: impl AsRef<Path>,
    grids: &[GridMetadata],
) -> Result<(), PinError> {
    let schema = batch.schema();
    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder = GeoParquetRecordBatchEncoder::try_new(&schema, &options)
        .map_err(|e| PinError::IoError(e.to_string()))?;

    let file = File::create(path.as_ref()).map_err(|e| PinError::IoError(e.to_string()))?;
    let mut writer = ArrowWriter::try_new(file, encoder.target_schema(), None)
        .map_err(|e| PinError::IoError(e.to_string()))?;

    let encoded = encoder
        .encode_record_batch(batch)
        .map_err(|e| PinError::IoError(e.to_string()))?;
    writer
        .write(&encoded)
        .map_err(|e| PinError::IoError(e.to_string()))?;

    let geo = encoder
        .into_keyvalue()
        .map_err(|e| PinError::IoError(e.to_string()))?;
    writer.append_key_value_metadata(geo);

    let region_list = grids
        .iter()
        .map(|g| g.region.as_str())
        .collect::<Vec<_>>()
        .join(",");
    writer.append_key_value_metadata(KeyValue::new(
        format!("{}:regions", META_PREFIX),
        region_list,
    ));
    for kv in grids.iter().flat_map(GridMetadata::to_key_values) {
        writer.append_key_value_metadata(kv);
    }

    writer
        .finish()
        .map_err(|e| PinError::IoError(e.to_string()))?;

    log::debug!(
        "wrote {} cells ({} grid(s)) to {}",
        batch.num_rows(),
        grids.len(),
        path.as_ref().display()
    );
    Ok(())
}

/// Reads back the grid metadata written by [`write_geoparquet`].
///
/// A file without grid metadata yields an empty list.
pub fn read_grid_metadata(path: impl AsRef<Path>) -> Result<Vec<GridMetadata>, PinError> {
    let file = File::open(path.as_ref()).map_err(|e| PinError::IoError(e.to_string()))?;
    let reader = SerializedFileReader::new(file).map_err(|e| PinError::IoError(e.to_string()))?;

    let entries = reader
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .cloned()
        .unwrap_or_default();
    let lookup = |key: String| lookup_value(&entries, &key);

    let Some(regions) = lookup(format!("{}:regions", META_PREFIX)) else {
        return Ok(Vec::new());
    };

    regions
        .split(',')
        .filter(|r| !r.is_empty())
        .map(|raw| -> Result<GridMetadata, PinError> {
            let region: Region = raw.parse()?;
            let field = |name: &str| {
                lookup(format!("{}:{}:{}", META_PREFIX, region, name)).ok_or_else(|| {
                    PinError::IoError(format!("Missing '{}' metadata for {}", name, region))
                })
            };
            let levels = field("levels")?
                .parse()
                .map_err(|_| PinError::IoError(format!("Invalid levels for {}", region)))?;
            Ok(GridMetadata {
                region,
                code_name: field("code")?.to_string(),
                root: parse_root(field("root")?)?,
                levels,
            })
        })
        .collect()
}

pub trait PinCellsToGeoParquet: PinCellsToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PinError>;
}

impl PinCellsToGeoParquet for [PinCell] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PinError> {
        let grids: Vec<GridMetadata> = regions_of(self)
            .into_iter()
            .map(GridMetadata::for_region)
            .collect();
        write_geoparquet(&self.to_record_batch()?, path, &grids)
    }
}

impl PinCellsToGeoParquet for Vec<PinCell> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), PinError> {
        self.as_slice().to_geoparquet(path)
    }
}
