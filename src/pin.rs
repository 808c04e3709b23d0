use crate::coord::{Coordinate, Coordinates};
use crate::error::PinError;
use crate::index::constants::{LEVELS, PIN_DISPLAY_LEN, PIN_GROUPS, PIN_SEPARATOR};
use crate::index::{BoundingBox, Codec, DIGIPIN_ALPHABET, Decoded, Region};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical PIN: ten uppercase symbols from the grid alphabet.
///
/// Displays (and serializes) in the public `XXX-XXX-XXXX` form. Parsing accepts
/// input with or without hyphens, in any case.
///
/// # Example
/// ```
/// use pindrop_rs::Pin;
///
/// # fn main() -> Result<(), pindrop_rs::PinError> {
/// let pin: Pin = "39j49ll8t4".parse()?;
/// assert_eq!(pin.to_string(), "39J-49L-L8T4");
/// assert_eq!(pin.symbols(), "39J49LL8T4");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin {
    symbols: String,
}

impl Pin {
    /// Wraps symbols produced by the encoder, which are valid by construction.
    pub(crate) fn from_encoded(symbols: String) -> Self {
        Self { symbols }
    }

    /// The ten symbols without separators.
    pub fn symbols(&self) -> &str {
        &self.symbols
    }

    /// The public `XXX-XXX-XXXX` form.
    pub fn hyphenated(&self) -> String {
        let mut out = String::with_capacity(PIN_DISPLAY_LEN);
        let mut chars = self.symbols.chars();
        for (i, &group) in PIN_GROUPS.iter().enumerate() {
            if i > 0 {
                out.push(PIN_SEPARATOR);
            }
            out.extend(chars.by_ref().take(group));
        }
        out
    }

    /// Decodes this PIN against a region.
    pub fn decode(&self, region: Region) -> Result<Decoded, PinError> {
        Codec::for_region(region).decode(&self.symbols)
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.hyphenated()
    }
}

/// Upper-cases and strips separators.
pub(crate) fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|&c| c != PIN_SEPARATOR)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Characters outside the alphabet, each reported once in order of first appearance.
pub(crate) fn invalid_characters(stripped: &str) -> Vec<char> {
    let mut invalid: Vec<char> = Vec::new();
    for c in stripped.chars() {
        if !DIGIPIN_ALPHABET.contains(c) && !invalid.contains(&c) {
            invalid.push(c);
        }
    }
    invalid
}

/// Normalizes a user-supplied PIN.
///
/// Upper-cases, strips hyphens, then checks the length before the characters.
///
/// # Errors
///
/// - [`PinError::WrongLength`] - not 10 characters once hyphens are removed
/// - [`PinError::InvalidCharacters`] - every character outside the alphabet
pub fn normalize(raw: &str) -> Result<Pin, PinError> {
    let stripped = strip_separators(raw);

    let len = stripped.chars().count();
    if len != LEVELS {
        return Err(PinError::WrongLength(len));
    }

    let invalid = invalid_characters(&stripped);
    if !invalid.is_empty() {
        return Err(PinError::InvalidCharacters(invalid));
    }

    Ok(Pin { symbols: stripped })
}

/// True when [`normalize`] would succeed.
pub fn is_valid_format(raw: &str) -> bool {
    normalize(raw).is_ok()
}

/// Encodes a coordinate to a PIN.
///
/// # Example
/// ```
/// use pindrop_rs::{Region, encode_to_pin};
///
/// # fn main() -> Result<(), pindrop_rs::PinError> {
/// let pin = encode_to_pin(&(77.2090, 28.6139), Region::India)?;
/// assert_eq!(pin.to_string().len(), 12);
/// # Ok(())
/// # }
/// ```
pub fn encode_to_pin(coord: &impl Coordinate, region: Region) -> Result<Pin, PinError> {
    encode_to_pin_with_bounds(coord, region).map(|(pin, _)| pin)
}

/// Encodes a coordinate to a PIN and returns its grid cell as well.
pub fn encode_to_pin_with_bounds(
    coord: &impl Coordinate,
    region: Region,
) -> Result<(Pin, BoundingBox), PinError> {
    let encoded = Codec::for_region(region).encode(coord)?;
    Ok((Pin::from_encoded(encoded.symbols), encoded.cell))
}

/// Normalizes and decodes a PIN, returning the cell centre and the cell.
pub fn decode_from_pin(raw: &str, region: Region) -> Result<(Coordinates, BoundingBox), PinError> {
    let decoded = normalize(raw)?.decode(region)?;
    Ok((decoded.coordinates, decoded.cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hyphenated_and_plain() -> Result<(), PinError> {
        assert_eq!(normalize("39J-49L-L8T4")?.to_string(), "39J-49L-L8T4");
        assert_eq!(normalize("39J49LL8T4")?.to_string(), "39J-49L-L8T4");
        assert_eq!(normalize("39j-49l-l8t4")?.to_string(), "39J-49L-L8T4");
        // hyphens anywhere are separators
        assert_eq!(normalize("39-J49-LL8T-4")?.symbols(), "39J49LL8T4");
        Ok(())
    }

    #[test]
    fn test_normalize_wrong_length() {
        assert_eq!(normalize(""), Err(PinError::WrongLength(0)));
        assert_eq!(normalize("---"), Err(PinError::WrongLength(0)));
        assert_eq!(normalize("39J-49L"), Err(PinError::WrongLength(6)));
        assert_eq!(normalize("39J-49L-L8T4-2"), Err(PinError::WrongLength(11)));
    }

    #[test]
    fn test_length_checked_before_characters() {
        assert_eq!(normalize("ABC"), Err(PinError::WrongLength(3)));
    }

    #[test]
    fn test_normalize_lists_every_invalid_char_once() {
        assert_eq!(
            normalize("AB0-A9L-L8T4"),
            Err(PinError::InvalidCharacters(vec!['A', 'B', '0']))
        );
        assert_eq!(
            normalize("39J 49LL8T"),
            Err(PinError::InvalidCharacters(vec![' ']))
        );
    }

    #[test]
    fn test_invalid_chars_are_reported_uppercased() {
        assert_eq!(
            normalize("a9J49LL8T4"),
            Err(PinError::InvalidCharacters(vec!['A']))
        );
    }

    #[test]
    fn test_is_valid_format() {
        assert!(is_valid_format("39J-49L-L8T4"));
        assert!(is_valid_format("39j49ll8t4"));
        assert!(!is_valid_format(""));
        assert!(!is_valid_format("39J-49L-L8T"));
        assert!(!is_valid_format("00000000000"));
        assert!(!is_valid_format("39J-49L-L8TÄ"));
    }

    #[test]
    fn test_encode_to_pin_matches_codec() -> Result<(), PinError> {
        let (pin, cell) = encode_to_pin_with_bounds(&(77.2090, 28.6139), Region::India)?;
        let encoded = Codec::for_region(Region::India).encode(&(77.2090, 28.6139))?;
        assert_eq!(pin.symbols(), encoded.symbols);
        assert_eq!(cell, encoded.cell);
        Ok(())
    }

    #[test]
    fn test_decode_from_pin_round_trip() -> Result<(), PinError> {
        let pin = encode_to_pin(&(77.2090, 28.6139), Region::India)?;
        let (coords, cell) = decode_from_pin(&pin.to_string().to_lowercase(), Region::India)?;

        assert!(cell.contains(&coords));
        assert_eq!(encode_to_pin(&coords, Region::India)?, pin);
        Ok(())
    }

    #[test]
    fn test_india_post_reference_vectors() -> Result<(), PinError> {
        // Dak Bhawan, New Delhi
        let dak_bhawan = Coordinates::new(28.622788, 77.213033);
        let pin = encode_to_pin(&dak_bhawan, Region::India)?;
        assert_eq!(pin.to_string(), "39J-49L-L8T4");

        let (centre, _) = decode_from_pin("39J-49L-L8T4", Region::India)?;
        assert!((centre.latitude - 28.622793).abs() < 1e-9);
        assert!((centre.longitude - 77.213049).abs() < 1e-9);

        let delhi = encode_to_pin(&Coordinates::new(28.6139, 77.2090), Region::India)?;
        assert_eq!(delhi.to_string(), "39J-438-TJC7");
        Ok(())
    }

    #[test]
    fn test_decode_from_pin_reports_format_errors() {
        assert_eq!(
            decode_from_pin("39J-49L", Region::World),
            Err(PinError::WrongLength(6))
        );
    }

    #[test]
    fn test_pin_serde_uses_hyphenated_form() -> Result<(), PinError> {
        let pin = normalize("39J49LL8T4")?;
        let json = serde_json::to_string(&pin).unwrap();
        assert_eq!(json, r#""39J-49L-L8T4""#);

        let back: Pin = serde_json::from_str(r#""39j49ll8t4""#).unwrap();
        assert_eq!(back, pin);

        assert!(serde_json::from_str::<Pin>(r#""nope""#).is_err());
        Ok(())
    }
}
