use crate::index::region::BoundingBox;

/// Number of subdivision levels; one symbol is emitted per level.
pub const LEVELS: usize = 10;

/// Cells per axis at every level (a 4x4 grid).
pub const GRID_SIZE: usize = 4;

/// Separator inserted into the public PIN form.
pub const PIN_SEPARATOR: char = '-';

/// Symbol counts of the three hyphen-separated PIN groups (`XXX-XXX-XXXX`).
pub(crate) const PIN_GROUPS: [usize; 3] = [3, 3, 4];

/// Length of the hyphenated PIN (`XXX-XXX-XXXX`).
pub const PIN_DISPLAY_LEN: usize = LEVELS + PIN_GROUPS.len() - 1;

/// Root bounds of the India (DIGIPIN) region.
pub const INDIA_BOUNDS: BoundingBox = BoundingBox::new(2.5, 38.5, 63.5, 99.5);

/// Root bounds of the World (WorldPIN) region.
pub const WORLD_BOUNDS: BoundingBox = BoundingBox::new(-90.0, 90.0, -180.0, 180.0);

/// Decimal places the India reference decoder reports the cell centre with.
pub(crate) const INDIA_COORDINATE_PRECISION: u32 = 6;

/// Valid PIN symbols in ascending order.
pub const VALID_CHARS: [char; 16] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'C', 'F', 'J', 'K', 'L', 'M', 'P', 'T',
];

/// Mean Earth radius in metres (IUGG).
pub(crate) const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;
