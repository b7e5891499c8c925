//! Console UART transmit task
//!
//! Writes each reply as one CRLF-terminated line.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::REPLY_CHANNEL;

/// Console TX task
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx) {
    info!("Console TX task started");

    loop {
        let reply = REPLY_CHANNEL.receive().await;
        let line = reply.to_line();

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send reply: {:?}", e);
            continue;
        }
        trace!("TX: {}", line.as_str());
    }
}
