//! Console UART receive task
//!
//! Assembles lines from the UART, parses them into commands and hands them
//! to the motor task. Malformed input is answered directly.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use stepwave_protocol::{Command, LineBuffer, Reply};

use crate::channels::{COMMAND_CHANNEL, REPLY_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Console RX task
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            match lines.feed(byte) {
                Ok(Some(line)) => dispatch(&line).await,
                Ok(None) => {}
                Err(e) => {
                    debug!("Line rejected: {}", e);
                    REPLY_CHANNEL.send(Reply::Error(e.as_str())).await;
                }
            }
        }
    }
}

/// Parse one line and forward it
async fn dispatch(line: &str) {
    match Command::parse(line) {
        Ok(command) => {
            debug!("Command: {}", command);
            COMMAND_CHANNEL.send(command).await;
        }
        Err(e) => {
            debug!("Parse error: {}", e);
            REPLY_CHANNEL.send(Reply::Error(e.as_str())).await;
        }
    }
}
