//! Score reports carried over the link
//!
//! The game publishes a running score after every landed piece and a final
//! score when a session ends. Both travel with the player name configured
//! at build time.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::packet::{Packet, PacketError, MAX_PAYLOAD_SIZE};

// Packet kind IDs
pub const KIND_RUNNING_SCORE: u8 = 0x10;
pub const KIND_FINAL_SCORE: u8 = 0x11;

/// Maximum player name length in bytes
pub const MAX_PLAYER_LEN: usize = 16;

/// Whether a score belongs to a session in progress or a finished one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScoreKind {
    /// Score after a landed piece, session still running
    Running,
    /// Score of a session that just ended
    Final,
}

impl ScoreKind {
    /// Packet kind byte for this score kind
    pub fn to_byte(self) -> u8 {
        match self {
            ScoreKind::Running => KIND_RUNNING_SCORE,
            ScoreKind::Final => KIND_FINAL_SCORE,
        }
    }

    /// Parse a packet kind byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KIND_RUNNING_SCORE => Some(ScoreKind::Running),
            KIND_FINAL_SCORE => Some(ScoreKind::Final),
            _ => None,
        }
    }
}

/// A score offered by the game loop to the publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScoreReport {
    pub kind: ScoreKind,
    pub score: u32,
}

#[derive(Serialize)]
struct BodyRef<'a> {
    score: u32,
    player: &'a str,
}

#[derive(Deserialize)]
struct Body {
    score: u32,
    player: String<MAX_PLAYER_LEN>,
}

impl ScoreReport {
    /// Running score of a session in progress
    pub const fn running(score: u32) -> Self {
        Self {
            kind: ScoreKind::Running,
            score,
        }
    }

    /// Final score of a finished session
    pub const fn final_score(score: u32) -> Self {
        Self {
            kind: ScoreKind::Final,
            score,
        }
    }

    /// Whether this report is worth sending to the leaderboard
    pub fn is_reportable(&self) -> bool {
        self.score > 0
    }

    /// Build the link packet for this report
    pub fn to_packet(&self, player: &str) -> Result<Packet, PacketError> {
        if player.len() > MAX_PLAYER_LEN {
            return Err(PacketError::PayloadTooLarge);
        }

        let body = BodyRef {
            score: self.score,
            player,
        };
        let mut buf = [0u8; MAX_PAYLOAD_SIZE];
        let used = postcard::to_slice(&body, &mut buf).map_err(|_| PacketError::Encoding)?;

        Packet::new(self.kind.to_byte(), used)
    }
}

/// A report recovered from a packet on the bridge side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedScore {
    pub report: ScoreReport,
    pub player: String<MAX_PLAYER_LEN>,
}

impl DecodedScore {
    /// Parse a score packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        let kind = ScoreKind::from_byte(packet.kind).ok_or(PacketError::Malformed)?;
        let body: Body = postcard::from_bytes(&packet.payload).map_err(|_| PacketError::Encoding)?;

        Ok(Self {
            report: ScoreReport {
                kind,
                score: body.score,
            },
            player: body.player,
        })
    }
}
