//! Stackfall - Falling-Block Puzzle Firmware
//!
//! Main firmware binary for RP2040 boards with a 128x64 SSD1306 OLED and
//! two push buttons. Finished scores go out over a UART score link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c, InterruptHandler as I2cInterruptHandler};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stackfall_core::input::ButtonAction;
use stackfall_core::traits::DisplayBackend as _;

use crate::config::{DISPLAY_I2C_ADDRESS, I2C_FREQUENCY_HZ, LINK_BAUD_RATE, PLAYER_NAME};
use crate::display::Ssd1306;

mod channels;
mod config;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => I2cInterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 16]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stackfall firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // OLED on I2C0 (SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, Irqs, i2c_config);

    let mut display = Ssd1306::new(i2c, DISPLAY_I2C_ADDRESS);
    if let Err(e) = display.init().await {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
        display.clear().ok();
        display.flush().await.ok();
    }

    // Score link on UART0 (TX=GPIO0, RX=GPIO1)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = LINK_BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 16]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();
    info!("Score link initialized for player {}", PLAYER_NAME);

    // Buttons, active low (move=GPIO14, rotate=GPIO15)
    let move_button = Input::new(p.PIN_14, Pull::Up);
    let rotate_button = Input::new(p.PIN_15, Pull::Up);

    spawner
        .spawn(tasks::button_task(move_button, ButtonAction::Move))
        .unwrap();
    spawner
        .spawn(tasks::button_task(rotate_button, ButtonAction::Rotate))
        .unwrap();
    spawner.spawn(tasks::score_link_task(tx)).unwrap();
    spawner.spawn(tasks::game_task(display)).unwrap();

    info!("All tasks spawned");
}
