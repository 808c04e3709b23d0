pub mod alphabet;
pub mod codec;
pub mod constants;
pub mod region;

pub use alphabet::{DIGIPIN_ALPHABET, GridAlphabet};
pub use codec::{Codec, Decoded, Encoded, Subdivision, locate, narrow_for_decode, narrow_for_encode};
pub use constants::{
    GRID_SIZE, INDIA_BOUNDS, LEVELS, PIN_DISPLAY_LEN, PIN_SEPARATOR, VALID_CHARS, WORLD_BOUNDS,
};
pub use region::{BoundingBox, Region};
