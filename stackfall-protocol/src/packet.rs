//! Packet encoding and decoding for the score link.
//!
//! Packet format:
//! - SYNC (1 byte): 0x5A synchronization byte
//! - LEN (1 byte): payload length (0-32)
//! - KIND (1 byte): report kind identifier
//! - PAYLOAD (0-32 bytes): postcard-encoded report body
//! - CRC (1 byte): CRC-8 (poly 0x07, init 0x00) over LEN, KIND and PAYLOAD

use heapless::Vec;

/// Packet synchronization byte
pub const PACKET_SYNC: u8 = 0x5A;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 32;

/// Maximum complete packet size (SYNC + LEN + KIND + MAX_PAYLOAD + CRC)
pub const MAX_PACKET_SIZE: usize = 1 + 1 + 1 + MAX_PAYLOAD_SIZE + 1;

const CRC8_POLY: u8 = 0x07;

/// Errors that can occur while building, encoding or decoding packets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// CRC mismatch
    BadCrc,
    /// Length byte out of range or unknown kind
    Malformed,
    /// Output buffer too small for encoding
    BufferTooSmall,
    /// Payload could not be serialized or deserialized
    Encoding,
}

/// Fold one byte into a running CRC-8
fn crc8_update(mut crc: u8, byte: u8) -> u8 {
    crc ^= byte;
    for _ in 0..8 {
        crc = if crc & 0x80 != 0 {
            (crc << 1) ^ CRC8_POLY
        } else {
            crc << 1
        };
    }
    crc
}

/// CRC-8 (SMBus flavour) of a byte slice
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0, |crc, &byte| crc8_update(crc, byte))
}

/// A packet ready to be sent or just received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Report kind identifier
    pub kind: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Packet {
    /// Create a packet with the given kind and payload
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, PacketError> {
        let payload = Vec::from_slice(payload).map_err(|_| PacketError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// CRC over the length, kind and payload bytes
    fn crc(&self) -> u8 {
        let crc = crc8_update(0, self.payload.len() as u8);
        let crc = crc8_update(crc, self.kind);
        self.payload.iter().fold(crc, |crc, &byte| crc8_update(crc, byte))
    }

    /// Number of bytes this packet occupies on the wire
    pub fn encoded_len(&self) -> usize {
        4 + self.payload.len()
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(PacketError::BufferTooSmall);
        }

        let payload_end = 3 + self.payload.len();
        buffer[0] = PACKET_SYNC;
        buffer[1] = self.payload.len() as u8;
        buffer[2] = self.kind;
        buffer[3..payload_end].copy_from_slice(&self.payload);
        buffer[payload_end] = self.crc();

        Ok(len)
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PACKET_SIZE>, PacketError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| PacketError::BufferTooSmall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Hunting for the SYNC byte
    Sync,
    /// Got SYNC, next byte is LEN
    Length,
    /// Got LEN, next byte is KIND
    Kind,
    /// Collecting payload bytes
    Payload,
    /// Next byte is the CRC
    Crc,
}

/// Byte-at-a-time packet decoder
///
/// Used by the bridge side of the link. Garbage between packets is skipped
/// until the next SYNC byte.
#[derive(Debug, Clone)]
pub struct PacketDecoder {
    state: DecodeState,
    expected_len: u8,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    /// Create a decoder waiting for a SYNC byte
    pub fn new() -> Self {
        Self {
            state: DecodeState::Sync,
            expected_len: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    /// Drop any partially received packet
    pub fn reset(&mut self) {
        self.state = DecodeState::Sync;
        self.expected_len = 0;
        self.kind = 0;
        self.payload.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(packet))` once a packet with a valid CRC is complete,
    /// `Ok(None)` while more bytes are needed.
    pub fn push(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.state {
            DecodeState::Sync => {
                if byte == PACKET_SYNC {
                    self.state = DecodeState::Length;
                }
                Ok(None)
            }
            DecodeState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(PacketError::Malformed);
                }
                self.expected_len = byte;
                self.state = DecodeState::Kind;
                Ok(None)
            }
            DecodeState::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.state = if self.expected_len == 0 {
                    DecodeState::Crc
                } else {
                    DecodeState::Payload
                };
                Ok(None)
            }
            DecodeState::Payload => {
                // Capacity is guaranteed by the LEN check above
                let _ = self.payload.push(byte);
                if self.payload.len() == self.expected_len as usize {
                    self.state = DecodeState::Crc;
                }
                Ok(None)
            }
            DecodeState::Crc => {
                let packet = Packet {
                    kind: self.kind,
                    payload: self.payload.clone(),
                };
                self.reset();

                if packet.crc() != byte {
                    return Err(PacketError::BadCrc);
                }
                Ok(Some(packet))
            }
        }
    }

    /// Feed a run of bytes, returning the first complete packet
    ///
    /// Bytes after a complete packet are not consumed.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<Option<Packet>, PacketError> {
        for &byte in bytes {
            if let Some(packet) = self.push(byte)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_check_value() {
        // Standard check input for CRC-8/SMBUS
        assert_eq!(crc8(b"123456789"), 0xF4);
        assert_eq!(crc8(&[]), 0x00);
    }

    #[test]
    fn test_encode_layout() {
        let packet = Packet::new(0x10, &[0x04, 0x03, b'b', b'o', b'b']).unwrap();
        let mut buffer = [0u8; 16];
        let len = packet.encode(&mut buffer).unwrap();

        assert_eq!(len, 9);
        assert_eq!(buffer[0], PACKET_SYNC);
        assert_eq!(buffer[1], 5);
        assert_eq!(buffer[2], 0x10);
        assert_eq!(&buffer[3..8], &[0x04, 0x03, b'b', b'o', b'b']);
        assert_eq!(buffer[8], crc8(&buffer[1..8]));
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let packet = Packet::new(0x11, &[1, 2, 3]).unwrap();
        let mut buffer = [0u8; 6];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));
    }

    #[test]
    fn test_empty_payload_packet_decodes() {
        let packet = Packet::new(0x11, &[]).unwrap();
        let bytes = packet.encode_to_vec().unwrap();
        assert_eq!(bytes.len(), 4);

        let mut decoder = PacketDecoder::new();
        let decoded = decoder.push_slice(&bytes).unwrap().unwrap();
        assert_eq!(decoded, packet);
    }

    #[test]
    fn test_decoder_rejects_corrupted_payload() {
        let packet = Packet::new(0x10, &[9, 8, 7]).unwrap();
        let mut bytes = packet.encode_to_vec().unwrap();
        bytes[4] ^= 0x01;

        let mut decoder = PacketDecoder::new();
        assert_eq!(decoder.push_slice(&bytes), Err(PacketError::BadCrc));
    }

    #[test]
    fn test_decoder_skips_line_noise() {
        let packet = Packet::new(0x10, &[42]).unwrap();
        let encoded = packet.encode_to_vec().unwrap();

        let mut data = Vec::<u8, 16>::new();
        data.extend_from_slice(&[0x00, 0xFF, 0x13]).unwrap();
        data.extend_from_slice(&encoded).unwrap();

        let mut decoder = PacketDecoder::new();
        let decoded = decoder.push_slice(&data).unwrap().unwrap();
        assert_eq!(decoded.payload.as_slice(), &[42]);
    }

    #[test]
    fn test_decoder_rejects_oversized_length() {
        let mut decoder = PacketDecoder::new();
        assert_eq!(decoder.push(PACKET_SYNC), Ok(None));
        assert_eq!(
            decoder.push(MAX_PAYLOAD_SIZE as u8 + 1),
            Err(PacketError::Malformed)
        );

        // Decoder is usable again after the error
        let packet = Packet::new(0x11, &[1]).unwrap();
        let bytes = packet.encode_to_vec().unwrap();
        assert_eq!(decoder.push_slice(&bytes).unwrap(), Some(packet));
    }

    #[test]
    fn test_payload_too_large() {
        let payload = [0u8; MAX_PAYLOAD_SIZE + 1];
        assert_eq!(Packet::new(0x10, &payload), Err(PacketError::PayloadTooLarge));
    }
}
