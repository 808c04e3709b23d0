use crate::error::PinError;
use crate::index::constants::GRID_SIZE;

/// The 4x4 symbol table used at every subdivision level.
///
/// Row 0 is the northernmost band and column 0 the westernmost, so the symbol in
/// the top-left corner selects the north-west quarter of the current bounds.
#[derive(Debug, PartialEq, Eq)]
pub struct GridAlphabet {
    table: [[char; GRID_SIZE]; GRID_SIZE],
}

/// The DIGIPIN table, shared by the India and World regions.
///
/// ```text
/// F C 9 8
/// J 3 2 7
/// K 4 5 6
/// L M P T
/// ```
pub static DIGIPIN_ALPHABET: GridAlphabet = GridAlphabet::new([
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
]);

impl GridAlphabet {
    /// Creates an alphabet from a table of 16 distinct uppercase symbols.
    pub const fn new(table: [[char; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { table }
    }

    /// Returns the symbol for a grid cell.
    ///
    /// Indices above 3 are clamped to the last row/column.
    pub fn symbol_at(&self, row: usize, col: usize) -> char {
        self.table[row.min(GRID_SIZE - 1)][col.min(GRID_SIZE - 1)]
    }

    /// Returns the `(row, col)` of a symbol, ignoring ASCII case.
    ///
    /// # Example
    /// ```
    /// use pindrop_rs::DIGIPIN_ALPHABET;
    ///
    /// assert_eq!(DIGIPIN_ALPHABET.cell_of('f'), Ok((0, 0)));
    /// assert!(DIGIPIN_ALPHABET.cell_of('A').is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// [`PinError::InvalidSymbol`] when the symbol is not in the table.
    pub fn cell_of(&self, symbol: char) -> Result<(usize, usize), PinError> {
        let upper = symbol.to_ascii_uppercase();
        self.table
            .iter()
            .enumerate()
            .find_map(|(row, cells)| cells.iter().position(|&s| s == upper).map(|col| (row, col)))
            .ok_or(PinError::InvalidSymbol(symbol))
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.cell_of(symbol).is_ok()
    }

    /// Iterates the symbols in row-major order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.table.iter().flatten().copied()
    }
}
