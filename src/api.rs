//! Result envelopes for callers that want plain success/failure records
//! (UI layers, HTTP handlers, FFI) rather than `Result`s.
//!
//! Every record serializes with camelCase names and omits empty fields:
//!
//! ```
//! use pindrop_rs::{Coordinates, Region, api};
//!
//! let result = api::encode(&Coordinates::new(28.6139, 77.2090), Region::India);
//! let json = serde_json::to_value(&result).unwrap();
//! assert_eq!(json["success"], true);
//! assert!(json["gridBounds"]["minLat"].is_number());
//! assert!(json.get("error").is_none());
//! ```

use crate::coord::Coordinates;
use crate::error::PinError;
use crate::index::{BoundingBox, Region};
use crate::index::constants::{LEVELS, VALID_CHARS};
use crate::pin::{self, invalid_characters, strip_separators};
use serde::{Deserialize, Serialize};

/// Outcome of [`encode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_bounds: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of [`decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_bounds: Option<BoundingBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Outcome of [`validate_pin_format`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl EncodeResult {
    fn failure(err: PinError, region: Region) -> Self {
        Self {
            success: false,
            pin: None,
            grid_bounds: None,
            error: Some(describe_encode_error(&err, region)),
        }
    }
}

impl DecodeResult {
    fn failure(message: String) -> Self {
        Self {
            success: false,
            coordinates: None,
            grid_bounds: None,
            error: Some(message),
        }
    }
}

fn describe_encode_error(err: &PinError, region: Region) -> String {
    match err {
        PinError::OutOfBounds { .. } | PinError::NotFinite(_) => {
            let b = region.bounds();
            format!(
                "Coordinates outside {} bounds ({}). Latitude must be {}° to {}°, Longitude must be {}° to {}°",
                region.code_name(),
                err,
                b.min_lat,
                b.max_lat,
                b.min_lon,
                b.max_lon
            )
        }
        other => other.to_string(),
    }
}

/// Encodes coordinates for a region.
pub fn encode(coords: &Coordinates, region: Region) -> EncodeResult {
    match pin::encode_to_pin_with_bounds(coords, region) {
        Ok((pin, cell)) => EncodeResult {
            success: true,
            pin: Some(pin.hyphenated()),
            grid_bounds: Some(cell),
            error: None,
        },
        Err(err) => EncodeResult::failure(err, region),
    }
}

/// Validates and decodes a PIN for a region.
///
/// Format problems are reported the same way [`validate_pin_format`] reports
/// them, joined into one message.
pub fn decode(pin: &str, region: Region) -> DecodeResult {
    let validation = validate_pin_format(pin);
    let normalized = match (validation.valid, validation.normalized) {
        (true, Some(normalized)) => normalized,
        _ => {
            let message = validation
                .errors
                .map(|errors| errors.join(", "))
                .unwrap_or_else(|| "Invalid PIN format".to_string());
            return DecodeResult::failure(message);
        }
    };

    match pin::decode_from_pin(&normalized, region) {
        Ok((coordinates, cell)) => DecodeResult {
            success: true,
            coordinates: Some(coordinates),
            grid_bounds: Some(cell),
            error: None,
        },
        Err(err) => DecodeResult::failure(err.to_string()),
    }
}

/// Checks a PIN's format, collecting every problem found.
///
/// Empty input gives the single error `"PIN is required"`. Otherwise both a
/// length error and an invalid-characters error can be reported together.
pub fn validate_pin_format(pin: &str) -> ValidationResult {
    if pin.is_empty() {
        return ValidationResult {
            valid: false,
            normalized: None,
            errors: Some(vec!["PIN is required".to_string()]),
        };
    }

    let stripped = strip_separators(pin);
    let mut errors = Vec::new();

    let len = stripped.chars().count();
    if len != LEVELS {
        errors.push(PinError::WrongLength(len).to_string());
    }

    let invalid = invalid_characters(&stripped);
    if !invalid.is_empty() {
        let valid: Vec<String> = VALID_CHARS.iter().map(|c| c.to_string()).collect();
        errors.push(format!(
            "{}. Valid characters are: {}",
            PinError::InvalidCharacters(invalid),
            valid.join(", ")
        ));
    }

    if !errors.is_empty() {
        return ValidationResult {
            valid: false,
            normalized: None,
            errors: Some(errors),
        };
    }

    match pin::normalize(pin) {
        Ok(normalized) => ValidationResult {
            valid: true,
            normalized: Some(normalized.hyphenated()),
            errors: None,
        },
        Err(err) => ValidationResult {
            valid: false,
            normalized: None,
            errors: Some(vec![err.to_string()]),
        },
    }
}

/// Inclusive bounds test; false for NaN.
pub fn is_within_bounds(coords: &Coordinates, region: Region) -> bool {
    region.contains(coords)
}

pub fn get_bounds(region: Region) -> BoundingBox {
    region.bounds()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_success() {
        let result = encode(&Coordinates::new(28.6139, 77.2090), Region::India);
        assert!(result.success);
        assert!(result.error.is_none());

        let pin = result.pin.unwrap();
        assert_eq!(pin.len(), 12);
        assert_eq!(&pin[3..4], "-");
        assert_eq!(&pin[7..8], "-");
        assert!(result.grid_bounds.is_some());
    }

    #[test]
    fn test_encode_out_of_bounds_message() {
        let result = encode(&Coordinates::new(51.5, -0.12), Region::India);
        assert!(!result.success);
        assert!(result.pin.is_none());
        let error = result.error.unwrap();
        assert!(error.contains("DIGIPIN"));
        assert!(error.contains("latitude"));
    }

    #[test]
    fn test_encode_world_accepts_london() {
        let result = encode(&Coordinates::new(51.5, -0.12), Region::World);
        assert!(result.success);
    }

    #[test]
    fn test_decode_round_trip() {
        let coords = Coordinates::new(28.6139, 77.2090);
        let encoded = encode(&coords, Region::India);
        let decoded = decode(encoded.pin.as_deref().unwrap_or_default(), Region::India);

        assert!(decoded.success);
        let (a, b) = (decoded.grid_bounds.unwrap(), encoded.grid_bounds.unwrap());
        assert!((a.min_lat - b.min_lat).abs() < 1e-9);
        assert!((a.max_lon - b.max_lon).abs() < 1e-9);
        let c = decoded.coordinates.unwrap();
        assert!((c.latitude - coords.latitude).abs() < 0.0001);
        assert!((c.longitude - coords.longitude).abs() < 0.0001);
    }

    #[test]
    fn test_decode_reports_all_format_errors() {
        let result = decode("AAA", Region::India);
        assert!(!result.success);
        let error = result.error.unwrap();
        assert!(error.contains("10 characters"));
        assert!(error.contains("Invalid characters: A"));
    }

    #[test]
    fn test_validate_empty() {
        let result = validate_pin_format("");
        assert!(!result.valid);
        assert_eq!(result.errors, Some(vec!["PIN is required".to_string()]));
    }

    #[test]
    fn test_validate_valid_pin() {
        let result = validate_pin_format("39j49ll8t4");
        assert!(result.valid);
        assert_eq!(result.normalized.as_deref(), Some("39J-49L-L8T4"));
        assert!(result.errors.is_none());
    }

    #[test]
    fn test_validate_collects_length_and_characters() {
        let result = validate_pin_format("XYZ-123");
        assert!(!result.valid);
        let errors = result.errors.unwrap();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("X, Y, Z, 1"));
    }

    #[test]
    fn test_validation_serializes_without_empty_fields() {
        let json = serde_json::to_string(&validate_pin_format("39J49LL8T4")).unwrap();
        assert_eq!(json, r#"{"valid":true,"normalized":"39J-49L-L8T4"}"#);
    }

    #[test]
    fn test_bounds_helpers() {
        assert_eq!(get_bounds(Region::India), Region::India.bounds());
        assert!(is_within_bounds(&Coordinates::new(2.5, 63.5), Region::India));
        assert!(!is_within_bounds(&Coordinates::new(2.4, 63.5), Region::India));
        assert!(is_within_bounds(&Coordinates::new(-90.0, 180.0), Region::World));
        assert!(!is_within_bounds(&Coordinates::new(f64::NAN, 0.0), Region::World));
    }
}
