use std::fmt;

/// Coordinate axis named in bounds errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Which edge of a bounding box was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Min => write!(f, "minimum"),
            Bound::Max => write!(f, "maximum"),
        }
    }
}

/// Error type for pindrop-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PinError {
    /// The coordinate lies outside the region's root bounds.
    OutOfBounds {
        axis: Axis,
        bound: Bound,
        value: f64,
        limit: f64,
    },
    /// The coordinate is NaN or infinite.
    NotFinite(Axis),
    /// The PIN does not have 10 symbols once hyphens are removed.
    WrongLength(usize),
    /// The PIN contains characters outside the grid alphabet (deduplicated).
    InvalidCharacters(Vec<char>),
    /// A single symbol could not be found in the grid alphabet.
    InvalidSymbol(char),
    /// The region name is not recognised.
    UnknownRegion(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinError::OutOfBounds {
                axis,
                bound,
                value,
                limit,
            } => write!(
                f,
                "Coordinate out of bounds: {} {} is beyond the {} of {}",
                axis, value, bound, limit
            ),
            PinError::NotFinite(axis) => write!(f, "Coordinate is not finite: {}", axis),
            PinError::WrongLength(n) => write!(
                f,
                "PIN must be 10 characters (excluding hyphens), got {}",
                n
            ),
            PinError::InvalidCharacters(chars) => {
                let list: Vec<String> = chars.iter().map(|c| c.to_string()).collect();
                write!(f, "Invalid characters: {}", list.join(", "))
            }
            PinError::InvalidSymbol(c) => write!(f, "Invalid symbol: '{}'", c),
            PinError::UnknownRegion(name) => write!(f, "Unknown region: {}", name),
            PinError::IoError(msg) => write!(f, "IO error: {}", msg),
            PinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            PinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for PinError {}
