//! Score link transmit task
//!
//! Sends score reports over UART to the network bridge. Zero scores are
//! not worth reporting and are skipped.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use stackfall_core::score::ScoreReport;
use stackfall_protocol::packet::MAX_PACKET_SIZE;

use crate::channels::SCORE_CHANNEL;
use crate::config::PLAYER_NAME;

/// Score link task - drains the score channel
#[embassy_executor::task]
pub async fn score_link_task(mut tx: BufferedUartTx) {
    info!("Score link task started (player {})", PLAYER_NAME);

    loop {
        let report = SCORE_CHANNEL.receive().await;

        if !report.is_reportable() {
            trace!("Skipping zero score");
            continue;
        }

        send_report(&mut tx, report).await;
    }
}

/// Encode and send one report
async fn send_report(tx: &mut BufferedUartTx, report: ScoreReport) {
    let packet = match report.to_packet(PLAYER_NAME) {
        Ok(packet) => packet,
        Err(e) => {
            warn!("Failed to encode score report: {:?}", e);
            return;
        }
    };

    let mut buf = [0u8; MAX_PACKET_SIZE];
    match packet.encode(&mut buf) {
        Ok(len) => {
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send score report: {:?}", e);
            } else {
                debug!("Sent {:?}", report);
            }
        }
        Err(e) => warn!("Failed to frame score report: {:?}", e),
    }
}
