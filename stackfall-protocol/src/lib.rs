//! Stackfall score link protocol
//!
//! This crate defines the UART protocol between the game controller and the
//! network bridge that forwards scores to the remote leaderboard. The link is
//! one-way and fire-and-forget: the controller never waits for an answer.
//!
//! # Protocol Overview
//!
//! Every report travels in a small binary packet:
//! ```text
//! ┌──────┬─────┬──────┬──────────────┬───────┐
//! │ SYNC │ LEN │ KIND │ PAYLOAD      │ CRC-8 │
//! │ 1B   │ 1B  │ 1B   │ 0–32B        │ 1B    │
//! └──────┴─────┴──────┴──────────────┴───────┘
//! ```
//!
//! The payload is the postcard encoding of the score and the player name.

#![no_std]
#![deny(unsafe_code)]

pub mod packet;
pub mod report;

pub use packet::{crc8, Packet, PacketDecoder, PacketError, MAX_PAYLOAD_SIZE, PACKET_SYNC};
pub use report::{DecodedScore, ScoreKind, ScoreReport, MAX_PLAYER_LEN};
