use crate::coord::{Coordinate, Coordinates};
use crate::error::PinError;
use crate::index::alphabet::{DIGIPIN_ALPHABET, GridAlphabet};
use crate::index::constants::{GRID_SIZE, LEVELS};
use crate::index::region::{BoundingBox, Region};

const LAST_INDEX: i64 = GRID_SIZE as i64 - 1;

/// Output of [`Codec::encode`]: the raw symbols and the terminal grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Ten symbols, no separators.
    pub symbols: String,
    pub cell: BoundingBox,
}

/// Output of [`Codec::decode`]: the cell centre and the terminal grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoded {
    pub coordinates: Coordinates,
    pub cell: BoundingBox,
}

/// One subdivision step, as reported by [`Codec::trace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Subdivision {
    /// 1-based level.
    pub level: usize,
    pub row: usize,
    pub col: usize,
    pub symbol: char,
    /// Bounds selected at this level.
    pub bounds: BoundingBox,
}

/// The grid-subdivision codec.
///
/// Each level splits the current bounds into a 4x4 grid, emits the symbol of
/// the cell containing the point and recurses into that cell. After
/// [`LEVELS`] levels the remaining box is the grid cell.
///
/// The codec only holds a root box and a reference to an alphabet; it is `Copy`
/// and can be shared freely across threads.
///
/// # Example
/// ```
/// use pindrop_rs::{Codec, Region};
///
/// # fn main() -> Result<(), pindrop_rs::PinError> {
/// let codec = Codec::for_region(Region::India);
/// let encoded = codec.encode(&(77.2090, 28.6139))?;
/// let decoded = codec.decode(&encoded.symbols)?;
/// assert!(encoded.cell.contains(&decoded.coordinates));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    root: BoundingBox,
    alphabet: &'a GridAlphabet,
    precision: Option<u32>,
}

impl<'a> Codec<'a> {
    /// Creates a codec over arbitrary root bounds.
    ///
    /// `root` must have `min < max` on both axes. Debug builds panic on a
    /// degenerate root. Release builds put every point in the last row when
    /// the latitude span is zero, and in the first column when the longitude
    /// span is zero.
    pub fn new(root: BoundingBox, alphabet: &'a GridAlphabet) -> Self {
        debug_assert!(
            root.min_lat < root.max_lat && root.min_lon < root.max_lon,
            "degenerate root bounds: {:?}",
            root
        );
        Self {
            root,
            alphabet,
            precision: None,
        }
    }

    /// Rounds decoded centres to `places` decimals.
    pub fn with_precision(mut self, places: Option<u32>) -> Self {
        self.precision = places;
        self
    }

    pub fn root(&self) -> BoundingBox {
        self.root
    }

    pub fn alphabet(&self) -> &'a GridAlphabet {
        self.alphabet
    }

    /// Encodes a coordinate into its symbols and grid cell.
    ///
    /// # Errors
    ///
    /// - [`PinError::NotFinite`] - NaN or infinite input
    /// - [`PinError::OutOfBounds`] - outside the root bounds (inclusive)
    pub fn encode(&self, coord: &impl Coordinate) -> Result<Encoded, PinError> {
        self.root.check(coord)?;
        let (lat, lon) = (coord.y(), coord.x());

        let (symbols, cell) = (0..LEVELS).fold(
            (String::with_capacity(LEVELS), self.root),
            |(mut symbols, bounds), _| {
                let (row, col) = locate(&bounds, lat, lon);
                symbols.push(self.alphabet.symbol_at(row, col));
                (symbols, narrow_for_encode(&bounds, row, col))
            },
        );

        Ok(Encoded { symbols, cell })
    }

    /// Decodes raw symbols (no separators, any case) into the cell centre and cell.
    ///
    /// # Errors
    ///
    /// - [`PinError::WrongLength`] - not exactly [`LEVELS`] symbols
    /// - [`PinError::InvalidSymbol`] - the first symbol not in the alphabet
    pub fn decode(&self, symbols: &str) -> Result<Decoded, PinError> {
        let len = symbols.chars().count();
        if len != LEVELS {
            return Err(PinError::WrongLength(len));
        }

        let cell = symbols.chars().try_fold(self.root, |bounds, symbol| {
            let (row, col) = self.alphabet.cell_of(symbol)?;
            Ok::<_, PinError>(narrow_for_decode(&bounds, row, col))
        })?;

        let center = cell.center();
        let coordinates = match self.precision {
            Some(places) => Coordinates::new(
                round_to(center.latitude, places),
                round_to(center.longitude, places),
            ),
            None => center,
        };

        Ok(Decoded { coordinates, cell })
    }

    /// Runs the encoder and reports every level.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn trace(&self, coord: &impl Coordinate) -> Result<Vec<Subdivision>, PinError> {
        self.root.check(coord)?;
        let (lat, lon) = (coord.y(), coord.x());

        let levels = (1..=LEVELS)
            .scan(self.root, |bounds, level| {
                let (row, col) = locate(bounds, lat, lon);
                *bounds = narrow_for_encode(bounds, row, col);
                Some(Subdivision {
                    level,
                    row,
                    col,
                    symbol: self.alphabet.symbol_at(row, col),
                    bounds: *bounds,
                })
            })
            .collect();

        Ok(levels)
    }
}

impl Codec<'static> {
    /// The codec for a region: its root bounds, the shared alphabet and its
    /// decode precision policy.
    pub fn for_region(region: Region) -> Self {
        Codec::new(region.bounds(), &DIGIPIN_ALPHABET).with_precision(region.coordinate_precision())
    }
}

/// Finds the `(row, col)` of the 4x4 cell of `bounds` holding the point.
///
/// Row 0 is the northern band. Indices are clamped to `0..=3`, which puts points
/// on the northern or eastern edge of the root box into the last cell.
pub fn locate(bounds: &BoundingBox, lat: f64, lon: f64) -> (usize, usize) {
    let lat_step = bounds.lat_span() / GRID_SIZE as f64;
    let lon_step = bounds.lon_span() / GRID_SIZE as f64;

    let row = LAST_INDEX.saturating_sub(((lat - bounds.min_lat) / lat_step).floor() as i64);
    let col = ((lon - bounds.min_lon) / lon_step).floor() as i64;

    (clamp_index(row), clamp_index(col))
}

fn clamp_index(index: i64) -> usize {
    index.clamp(0, LAST_INDEX) as usize
}

/// Narrows `bounds` to cell `(row, col)` the way the encoder does, from the
/// southern edge up.
pub fn narrow_for_encode(bounds: &BoundingBox, row: usize, col: usize) -> BoundingBox {
    let lat_step = bounds.lat_span() / GRID_SIZE as f64;
    let lon_step = bounds.lon_span() / GRID_SIZE as f64;
    let (row, col) = (row as f64, col as f64);

    let min_lon = bounds.min_lon + lon_step * col;
    BoundingBox {
        min_lat: bounds.min_lat + lat_step * (3.0 - row),
        max_lat: bounds.min_lat + lat_step * (4.0 - row),
        min_lon,
        max_lon: min_lon + lon_step,
    }
}

/// Narrows `bounds` to cell `(row, col)` the way the decoder does, from the
/// northern edge down.
pub fn narrow_for_decode(bounds: &BoundingBox, row: usize, col: usize) -> BoundingBox {
    let lat_step = bounds.lat_span() / GRID_SIZE as f64;
    let lon_step = bounds.lon_span() / GRID_SIZE as f64;
    let (row, col) = (row as f64, col as f64);

    let min_lon = bounds.min_lon + lon_step * col;
    BoundingBox {
        min_lat: bounds.max_lat - lat_step * (row + 1.0),
        max_lat: bounds.max_lat - lat_step * row,
        min_lon,
        max_lon: min_lon + lon_step,
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
