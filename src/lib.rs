//! Bionic actuator CAN codec
//!
//! Builds the body of command frames for bionic (MyActuator style) joint drives
//! and parses the replies they send back. Only the payload is handled here: the
//! arbitration ID that selects the target motor is attached by whatever owns the
//! bus.
//!
//! ```
//! use bionic_comm::{decode, set_zero_position, Message, QueryCode};
//!
//! assert_eq!(&set_zero_position(1)[..], &[0x00, 0x01, 0x00, 0x03]);
//!
//! match decode(&[0xA0, 0x01, 0x39, 0xF7, 0x24, 0x7D]).unwrap() {
//!     Message::Query(reply) => assert_eq!(reply.code, QueryCode::Angle),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

use failure::Fail;

pub mod bits;
pub mod commands;
pub mod decoder;
pub mod responses;
pub mod units;

pub use commands::{
    set_zero_position, Command, CurrentTorqueControl, HybridControl, PositionControl, Query,
    SpeedControl, ZeroPosition, ZERO_POSITION_CAN_ID,
};
pub use decoder::{classify, decode, is_valid};
pub use responses::{
    ConfigCode, ConfigStatus, ConfigurationAck, Fault, Message, MessageType, PositionReading,
    PositionSpeed, QueryCode, QueryReply, SpeedReading,
};

/// Largest data field of a classic CAN frame
pub const MAX_PAYLOAD_LEN: usize = 8;

/// Body of a CAN frame, without the arbitration ID
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_LEN>;

/// Errors returned if a reply cannot be decoded
#[derive(Fail, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Payload is shorter than its message type requires
    #[fail(
        display = "Insufficient data: expected {} bytes, got {}",
        expected, actual
    )]
    InsufficientData {
        /// Bytes required by the message type
        expected: usize,
        /// Bytes actually received
        actual: usize,
    },
    /// Fault code outside the drive's error table
    #[fail(display = "Unknown error code {}", _0)]
    UnknownErrorCode(u8),
    /// Configuration code outside the known table
    #[fail(display = "Unknown configuration code {}", _0)]
    UnknownConfigCode(u8),
    /// Configuration status other than success or failure
    #[fail(display = "Unknown configuration status {}", _0)]
    UnknownConfigStatus(u8),
    /// Query code outside the known table
    #[fail(display = "Unknown query code {}", _0)]
    UnknownQueryCode(u8),
}

/// Result of decoding a reply
pub type Result<T> = core::result::Result<T, Error>;
