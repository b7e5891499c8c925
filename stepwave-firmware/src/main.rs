//! Stepwave - Stepper Sequencer Firmware
//!
//! Drives a small stepper motor from an RP2040 through either a wave-drive
//! output board or a two-channel H-bridge, commanded over a UART console.
//! The drive mode and motor parameters come from the embedded machine.toml.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use stepwave_core::config::{DriveMode, MotorConfig};
use stepwave_core::{AngleConverter, Sequencer, Session};
use stepwave_drivers::coil::{HBridgeChannel, HBridgeDriver, WaveDriver};

use crate::coils::{BoardCoils, PWM_TOP};
use crate::config::parse_config;

/// Embedded configuration (compiled into firmware)
/// Edit machine.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../machine.toml");

mod channels;
mod coils;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Stepwave firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Motor config: mode={}, step_delay={}us, {} deg/step",
        config.mode, config.step_delay_us, config.degrees_per_step
    );

    // Console UART (115200 baud default)
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for console");

    // Only the outputs for the configured mode are claimed; the other
    // board's pins stay high-impedance.
    let coils = match config.mode {
        DriveMode::Wave => {
            let pins = [
                Output::new(p.PIN_2, Level::Low),
                Output::new(p.PIN_3, Level::Low),
                Output::new(p.PIN_4, Level::Low),
                Output::new(p.PIN_5, Level::Low),
            ];
            BoardCoils::Wave(WaveDriver::new_active_high(pins))
        }
        DriveMode::Bipolar => {
            let mut pwm_config = PwmConfig::default();
            pwm_config.top = PWM_TOP;
            pwm_config.compare_a = 0;
            pwm_config.compare_b = 0;

            let coil_a = Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config.clone());
            let coil_b = Pwm::new_output_ab(p.PWM_SLICE4, p.PIN_8, p.PIN_9, pwm_config);

            let (Some(a1), Some(a2)) = coil_a.split() else {
                defmt::panic!("PWM slice 3 did not yield both outputs");
            };
            let (Some(b1), Some(b2)) = coil_b.split() else {
                defmt::panic!("PWM slice 4 did not yield both outputs");
            };

            BoardCoils::Bipolar(HBridgeDriver::new(
                HBridgeChannel::new(a1, a2),
                HBridgeChannel::new(b1, b2),
            ))
        }
    };

    info!("Coil outputs initialized");

    let sequencer = match Sequencer::from_config(&config, coils, Delay) {
        Ok(sequencer) => sequencer,
        Err(e) => defmt::panic!("Invalid motor configuration: {}", e),
    };
    let converter = match AngleConverter::new(config.degrees_per_step) {
        Ok(converter) => converter,
        Err(e) => defmt::panic!("Invalid step angle: {}", e),
    };
    let session = Session::new(sequencer, converter);

    // Spawn tasks
    spawner.spawn(tasks::console_rx_task(rx)).unwrap();
    spawner.spawn(tasks::console_tx_task(tx)).unwrap();
    spawner.spawn(tasks::motor_task(session)).unwrap();

    info!("All tasks spawned, firmware running");
}

/// Parse the embedded configuration
///
/// build.rs runs the same reader over machine.toml, so this only fails if
/// the build check was bypassed. There is no fallback to defaults.
fn load_config() -> MotorConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => defmt::panic!("Failed to parse embedded config: {}", e.as_str()),
    }
}
