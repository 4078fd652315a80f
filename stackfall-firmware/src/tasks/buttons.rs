//! Button tasks
//!
//! One task per push button. Each waits for the falling edge, runs the
//! press through the button's debouncer and updates the shared controls.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use stackfall_core::config::REFRACTORY_MS;
use stackfall_core::input::{Button, ButtonAction};

use crate::channels::CONTROLS;

/// Button task - one instance per button
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(mut pin: Input<'static>, action: ButtonAction) {
    info!("Button task started: {:?}", action);

    let mut button = Button::new(action, REFRACTORY_MS);

    loop {
        pin.wait_for_falling_edge().await;

        let now_ms = Instant::now().as_millis();
        if button.press(now_ms, &CONTROLS) {
            debug!(
                "{:?} pressed: column {}, variation {}",
                action,
                CONTROLS.column(),
                CONTROLS.variation().index()
            );
        } else {
            trace!("{:?} ignored (debounce)", action);
        }
    }
}
