//! Property tests for the grid codec across both regions.

use pindrop_rs::{
    Axis, Coordinates, DIGIPIN_ALPHABET, GRID_SIZE, LEVELS, PinError, Region, VALID_CHARS,
    api, decode_from_pin, encode_to_pin, encode_to_pin_with_bounds, is_valid_format, normalize,
};
use proptest::prelude::*;

fn india_coordinate() -> impl Strategy<Value = Coordinates> {
    (2.5f64..=38.5, 63.5f64..=99.5).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
}

fn world_coordinate() -> impl Strategy<Value = Coordinates> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon))
}

fn symbols() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VALID_CHARS.to_vec()), LEVELS)
        .prop_map(|chars| chars.into_iter().collect())
}

fn hyphenate(symbols: &str) -> String {
    format!("{}-{}-{}", &symbols[..3], &symbols[3..6], &symbols[6..])
}

fn within(coords: &Coordinates, cell: &pindrop_rs::BoundingBox) -> bool {
    const EPS: f64 = 1e-9;
    coords.latitude >= cell.min_lat - EPS
        && coords.latitude <= cell.max_lat + EPS
        && coords.longitude >= cell.min_lon - EPS
        && coords.longitude <= cell.max_lon + EPS
}

fn is_public_pattern(pin: &str) -> bool {
    let parts: Vec<&str> = pin.split('-').collect();
    parts.len() == 3
        && parts.iter().map(|p| p.len()).eq([3, 3, 4])
        && parts
            .iter()
            .flat_map(|p| p.chars())
            .all(|c| VALID_CHARS.contains(&c))
}

proptest! {
    #[test]
    fn test_india_round_trip(coords in india_coordinate()) {
        let (pin, cell) = encode_to_pin_with_bounds(&coords, Region::India).unwrap();
        prop_assert!(within(&coords, &cell));

        let (centre, decoded_cell) = decode_from_pin(&pin.to_string(), Region::India).unwrap();
        prop_assert!(within(&coords, &decoded_cell));
        prop_assert_eq!(encode_to_pin(&centre, Region::India).unwrap(), pin);
    }

    #[test]
    fn test_world_round_trip(coords in world_coordinate()) {
        let pin = encode_to_pin(&coords, Region::World).unwrap();
        let (centre, cell) = decode_from_pin(pin.symbols(), Region::World).unwrap();
        prop_assert!(within(&coords, &cell));
        prop_assert_eq!(encode_to_pin(&centre, Region::World).unwrap(), pin);
    }

    #[test]
    fn test_world_pins_match_public_pattern(coords in world_coordinate()) {
        let pin = encode_to_pin(&coords, Region::World).unwrap();
        prop_assert!(is_public_pattern(&pin.to_string()));
    }

    #[test]
    fn test_latitude_outside_india_rejected(lat in 38.5001f64..90.0, lon in 63.5f64..=99.5) {
        let result = encode_to_pin(&Coordinates::new(lat, lon), Region::India);
        let is_latitude_error = matches!(
            result,
            Err(PinError::OutOfBounds { axis: Axis::Latitude, .. })
        );
        prop_assert!(is_latitude_error);
        prop_assert!(!api::is_within_bounds(&Coordinates::new(lat, lon), Region::India));
    }

    #[test]
    fn test_longitude_outside_world_rejected(lat in -90.0f64..=90.0, lon in 180.0001f64..1000.0) {
        let result = encode_to_pin(&Coordinates::new(lat, -lon), Region::World);
        let is_longitude_error = matches!(
            result,
            Err(PinError::OutOfBounds { axis: Axis::Longitude, .. })
        );
        prop_assert!(is_longitude_error);
    }

    #[test]
    fn test_valid_symbols_accepted_in_any_form(raw in symbols()) {
        prop_assert!(is_valid_format(&raw));
        prop_assert!(is_valid_format(&raw.to_lowercase()));
        prop_assert!(is_valid_format(&hyphenate(&raw)));

        let pin = normalize(&hyphenate(&raw.to_lowercase())).unwrap();
        prop_assert_eq!(pin.symbols(), raw.as_str());
        prop_assert!(api::validate_pin_format(&raw).valid);
    }

    #[test]
    fn test_invalid_symbol_rejected(raw in symbols(), pos in 0usize..LEVELS, bad in "[01ABDEGHINOQRSUVWXYZ]") {
        let mut chars: Vec<char> = raw.chars().collect();
        chars[pos] = bad.chars().next().unwrap();
        let corrupted: String = chars.into_iter().collect();

        prop_assert!(!is_valid_format(&corrupted));
        let is_char_error = matches!(normalize(&corrupted), Err(PinError::InvalidCharacters(_)));
        prop_assert!(is_char_error);
        prop_assert!(decode_from_pin(&corrupted, Region::World).is_err());
    }

    #[test]
    fn test_wrong_length_rejected(raw in symbols(), len in 0usize..LEVELS) {
        let short = &raw[..len];
        prop_assert!(!is_valid_format(short));
        prop_assert_eq!(normalize(short), Err(PinError::WrongLength(len)));
    }
}

#[test]
fn test_alphabet_is_total_and_unique() {
    let mut seen = Vec::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let symbol = DIGIPIN_ALPHABET.symbol_at(row, col);
            assert!(VALID_CHARS.contains(&symbol));
            assert_eq!(DIGIPIN_ALPHABET.cell_of(symbol), Ok((row, col)));
            seen.push(symbol);
        }
    }
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), GRID_SIZE * GRID_SIZE);
}
