//! Board configuration
//!
//! Generated by build.rs from game.toml; see that file for the meaning and
//! valid range of each value.

include!(concat!(env!("OUT_DIR"), "/game_config.rs"));
