//! Display trait for the monochrome game screen

use core::fmt::Write;

use heapless::String;

/// Errors that can occur while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Shape lies partly or fully outside the panel
    OutOfBounds,
    /// Text did not fit the formatting buffer
    BufferOverflow,
    /// Bus transfer failed
    Bus,
}

/// Pixel ink on a monochrome panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel lit
    White,
    /// Pixel dark
    Black,
}

/// Trait for the game display
///
/// Implementations draw into a frame buffer. Transferring the buffer to the
/// panel is left to the owner of the display, outside the game tick.
pub trait DisplayBackend {
    /// Clear the entire frame buffer
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Fill a `size` x `size` square whose top-left corner is `(x, y)`
    fn draw_box(&mut self, x: u16, y: u16, size: u16, color: Color) -> Result<(), DisplayError>;

    /// Draw the white outline of a `size` x `size` square
    fn draw_frame(&mut self, x: u16, y: u16, size: u16) -> Result<(), DisplayError>;

    /// Draw text starting at `(x, y)`, clearing the background behind it
    fn draw_text(&mut self, x: u16, y: u16, text: &str) -> Result<(), DisplayError>;
}

/// Helpers for drawing game elements
pub trait DisplayExt: DisplayBackend {
    /// Draw the score label ("Pts: 12")
    fn draw_score(&mut self, x: u16, y: u16, score: u32) -> Result<(), DisplayError> {
        let mut text: String<16> = String::new();
        // Trailing spaces overwrite digits left by a longer previous score
        write!(text, "Pts: {:<6}", score).map_err(|_| DisplayError::BufferOverflow)?;
        self.draw_text(x, y, text.as_str())
    }
}

// Blanket implementation for all DisplayBackend types
impl<T: DisplayBackend> DisplayExt for T {}
