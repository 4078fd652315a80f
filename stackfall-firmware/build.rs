//! Build script for stackfall-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates game.toml and turns it into constants for the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest player name the score link carries
const MAX_PLAYER_LEN: usize = 16;

fn main() {
    setup_linker();
    let config = validate_config();
    generate_constants(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Values the firmware needs from game.toml
struct GameConfig {
    player_name: String,
    i2c_address: u8,
    i2c_frequency_hz: u32,
    baud_rate: u32,
}

/// Validate game.toml at compile time
fn validate_config() -> GameConfig {
    println!("cargo:rerun-if-changed=game.toml");

    let config_path = Path::new("game.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: game.toml not found!                                     ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a game.toml configuration file.           ║\n\
            ║  Please create one in the stackfall-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read game.toml                                 ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in game.toml                         ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();

    let player_name = match lookup(&config, "player", "name") {
        Some(toml::Value::String(name)) => {
            if name.is_empty() || name.len() > MAX_PLAYER_LEN {
                errors.push(format!(
                    "[player] name must be 1-{} characters",
                    MAX_PLAYER_LEN
                ));
            }
            if !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                errors.push("[player] name may only use A-Z, a-z, 0-9, '_' and '-'".to_string());
            }
            name.clone()
        }
        Some(_) => {
            errors.push("[player] name must be a string".to_string());
            String::new()
        }
        None => {
            errors.push("[player] missing 'name'".to_string());
            String::new()
        }
    };

    let i2c_address = integer_in(&config, "display", "i2c_address", 0x08, 0x77, &mut errors);
    let i2c_frequency_hz = integer_in(
        &config,
        "display",
        "i2c_frequency_hz",
        10_000,
        1_000_000,
        &mut errors,
    );
    let baud_rate = integer_in(&config, "link", "baud_rate", 1_200, 921_600, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid game configuration                               ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=game.toml validated successfully");

    GameConfig {
        player_name,
        i2c_address: i2c_address as u8,
        i2c_frequency_hz: i2c_frequency_hz as u32,
        baud_rate: baud_rate as u32,
    }
}

fn lookup<'a>(config: &'a toml::Value, section: &str, key: &str) -> Option<&'a toml::Value> {
    config.get(section).and_then(|s| s.get(key))
}

/// Read an integer and check it lies in `min..=max`
fn integer_in(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> i64 {
    match lookup(config, section, key) {
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => *v,
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            min
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            min
        }
        None => {
            errors.push(format!("[{}] missing '{}'", section, key));
            min
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated values to `$OUT_DIR/game_config.rs`
fn generate_constants(config: &GameConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("game_config.rs")).unwrap();

    writeln!(f, "/// Name sent with every score report").unwrap();
    writeln!(f, "pub const PLAYER_NAME: &str = {:?};", config.player_name).unwrap();
    writeln!(f, "/// 7-bit I2C address of the OLED").unwrap();
    writeln!(f, "pub const DISPLAY_I2C_ADDRESS: u8 = {:#04x};", config.i2c_address).unwrap();
    writeln!(f, "pub const I2C_FREQUENCY_HZ: u32 = {};", config.i2c_frequency_hz).unwrap();
    writeln!(f, "pub const LINK_BAUD_RATE: u32 = {};", config.baud_rate).unwrap();
}
