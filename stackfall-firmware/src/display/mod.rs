//! OLED display support

mod ssd1306;

use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;

pub use ssd1306::Ssd1306;

/// The panel as wired on the board
pub type GameDisplay = Ssd1306<I2c<'static, I2C0, Async>>;
