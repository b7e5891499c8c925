//! Coil driver implementations

pub mod hbridge;
pub mod wave;

pub use hbridge::{HBridgeChannel, HBridgeDriver};
pub use wave::WaveDriver;
