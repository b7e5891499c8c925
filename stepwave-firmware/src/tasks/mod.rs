//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod console_rx;
pub mod console_tx;
pub mod motor;

pub use console_rx::console_rx_task;
pub use console_tx::console_tx_task;
pub use motor::motor_task;
