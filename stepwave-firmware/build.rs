//! Build script for stepwave-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates machine.toml at compile time with the same reader the
//!   firmware uses at boot

#[allow(dead_code)]
#[path = "src/config.rs"]
mod config;

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate machine.toml configuration at compile time
///
/// The `toml` crate reports syntax errors with line and column; the
/// firmware's own reader then has to accept the file, since it is the one
/// that runs at boot.
fn validate_config() {
    println!("cargo:rerun-if-changed=machine.toml");
    println!("cargo:rerun-if-changed=src/config.rs");

    let config_path = Path::new("machine.toml");

    if !config_path.exists() {
        fail(
            "machine.toml not found",
            &["The firmware embeds machine.toml from the stepwave-firmware directory.".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read machine.toml", &[e.to_string()]),
    };

    if let Err(e) = toml::from_str::<toml::Value>(&content) {
        let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
        fail("Invalid TOML syntax in machine.toml", &lines);
    }

    match config::parse_config(&content) {
        Ok(motor) => println!(
            "cargo:warning=machine.toml validated successfully ({:?}, {} us/step, {} deg/step)",
            motor.mode, motor.step_delay_us, motor.degrees_per_step
        ),
        Err(e) => fail(
            "Invalid [motor] configuration",
            &[
                e.as_str().to_string(),
                "The firmware reader accepts one [motor] table with plain".into(),
                "strings, numbers and a wave_order integer array.".into(),
            ],
        ),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    let body = lines
        .iter()
        .map(|line| format!("║  • {:<62} ║", fit_line(line, 62)))
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Shorten `line` to at most `width` characters, marking the cut with `...`
fn fit_line(line: &str, width: usize) -> String {
    if line.chars().count() > width {
        let kept: String = line.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        line.to_string()
    }
}
