//! Inter-task communication channels
//!
//! Console commands flow from the receive task to the motor task; replies
//! from both flow to the transmit task.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use stepwave_protocol::{Command, Reply};

/// Channel capacity for parsed console commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for replies waiting to be written
const REPLY_CHANNEL_SIZE: usize = 8;

/// Parsed commands for the motor task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Replies for the console transmit task
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Reply<'static>, REPLY_CHANNEL_SIZE> =
    Channel::new();
