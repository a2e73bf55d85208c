//! Character display trait

use core::fmt::Write;

use heapless::String;

/// Widest numeric field that can be rendered (all digits of a `u32`)
pub const MAX_FIELD_WIDTH: u8 = 10;

/// Character display addressed by row and column
///
/// Rows and columns are 1-based, matching HD44780-style panels.
pub trait CharDisplay {
    /// Write ASCII text starting at a position
    fn write_text(&mut self, row: u8, col: u8, text: &str);
}

/// Numeric field helpers on top of [`CharDisplay`]
pub trait DisplayExt: CharDisplay {
    /// Write a zero-padded number occupying exactly `width` characters
    ///
    /// Digits that do not fit are dropped from the left, so a value of 12345
    /// in a 4 wide field shows as `2345`.
    fn write_number(&mut self, row: u8, col: u8, value: u32, width: u8) {
        let digits = format_digits(value, width);
        self.write_text(row, col, &digits);
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay + ?Sized> DisplayExt for T {}

/// Render `value` as exactly `width` zero-padded digits (width clamped to 1..=10)
pub fn format_digits(value: u32, width: u8) -> String<{ MAX_FIELD_WIDTH as usize }> {
    let width = width.clamp(1, MAX_FIELD_WIDTH) as usize;
    let shown = u64::from(value) % 10u64.pow(width as u32);

    let mut out = String::new();
    // Cannot overflow: at most `width` digits are produced
    let _ = write!(out, "{:0width$}", shown, width = width);
    out
}
