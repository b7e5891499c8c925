//! Motor task
//!
//! Owns the console session and with it the only sequencer. Commands are
//! carried out one at a time in arrival order.
//!
//! Moves block this task for their full duration (`embassy_time::Delay` is a
//! busy wait). Console input keeps arriving in the buffered UART meanwhile
//! and is picked up once the move returns.

use defmt::*;
use embassy_time::Delay;

use stepwave_core::Session;
use stepwave_protocol::{Command, Reply};

use crate::channels::{COMMAND_CHANNEL, REPLY_CHANNEL};
use crate::coils::BoardCoils;

/// Motor task
#[embassy_executor::task]
pub async fn motor_task(mut session: Session<BoardCoils, Delay>) {
    info!("Motor task started");

    match session.begin() {
        Ok(reply) => REPLY_CHANNEL.send(reply).await,
        Err(e) => {
            error!("Failed to release coils at startup: {}", e);
            REPLY_CHANNEL.send(Reply::Error(e.as_str())).await;
        }
    }

    loop {
        let command = COMMAND_CHANNEL.receive().await;
        let reply = session.handle(command);

        if command == Command::Quit {
            info!("Console session closed, coils released");
        }
        trace!("Cursor: {}", session.sequencer().cursor());

        REPLY_CHANNEL.send(reply).await;
    }
}
