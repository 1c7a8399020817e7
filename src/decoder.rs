//! Decoding of drive replies
//!
//! The top three bits of the first byte select the layout and the low five bits
//! carry the drive's fault code. Unknown layouts are reported as
//! [`Message::Unrecognized`]; payloads that are too short, or carry codes
//! outside their tables, are errors.

use byteorder::{BigEndian, ByteOrder};
use tracing::{debug, warn};

use crate::responses::{
    ConfigCode, ConfigStatus, ConfigurationAck, Fault, Message, MessageType, PositionReading,
    PositionSpeed, QueryCode, QueryReply, SpeedReading,
};
use crate::{units, Error, Result};

const TAG_SHIFT: u8 = 5;
const FAULT_MASK: u8 = 0x1F;

/// Message type of `payload`, `None` if empty or the tag is unknown
pub fn classify(payload: &[u8]) -> Option<MessageType> {
    let first = *payload.first()?;
    MessageType::from_tag(first >> TAG_SHIFT)
}

/// Whether `payload` carries a known message type
pub fn is_valid(payload: &[u8]) -> bool {
    classify(payload).is_some()
}

/// Decodes a reply
pub fn decode(payload: &[u8]) -> Result<Message> {
    let message_type = match classify(payload) {
        Some(message_type) => message_type,
        None => {
            debug!("unrecognized reply {:02x?}", payload);
            return Ok(Message::Unrecognized);
        }
    };

    let expected = message_type.payload_len();
    if payload.len() < expected {
        warn!(
            "{:?} reply needs {} bytes, got {}",
            message_type,
            expected,
            payload.len()
        );
        return Err(Error::InsufficientData {
            expected,
            actual: payload.len(),
        });
    }

    let fault = Fault::from_u8(payload[0] & FAULT_MASK).map_err(|e| {
        warn!("{:?} reply: {}", message_type, e);
        e
    })?;

    let message = match message_type {
        MessageType::PositionSpeed => Message::PositionSpeed(position_speed(payload, fault)),
        MessageType::Position => Message::Position(position(payload, fault)),
        MessageType::Speed => Message::Speed(speed(payload, fault)),
        MessageType::Configuration => Message::Configuration(configuration(payload, fault)?),
        MessageType::Query => Message::Query(query(payload, fault)?),
    };

    Ok(message)
}

// Extractors below rely on `decode` having checked the payload length

fn position_speed(payload: &[u8], fault: Fault) -> PositionSpeed {
    // Speed and current share the middle nibble of byte 4
    let position = BigEndian::read_u16(&payload[1..3]);
    let speed = BigEndian::read_u16(&payload[3..5]) >> 4;
    let current = BigEndian::read_u16(&payload[4..6]) & 0x0FFF;

    PositionSpeed {
        fault,
        position: units::position_from_fixed(position),
        speed: units::speed_from_fixed(speed),
        current: units::current_from_fixed(current),
        motor_temperature: units::temperature_from_raw(payload[6]),
        mos_temperature: units::temperature_from_raw(payload[7]),
    }
}

fn position(payload: &[u8], fault: Fault) -> PositionReading {
    PositionReading {
        fault,
        position: BigEndian::read_f32(&payload[1..5]),
        current: units::current_from_tenths(BigEndian::read_u16(&payload[5..7])),
        temperature: payload[7],
    }
}

fn speed(payload: &[u8], fault: Fault) -> SpeedReading {
    SpeedReading {
        fault,
        speed: BigEndian::read_f32(&payload[1..5]),
        current: units::current_from_tenths(BigEndian::read_u16(&payload[5..7])),
        temperature: payload[7],
    }
}

fn configuration(payload: &[u8], fault: Fault) -> Result<ConfigurationAck> {
    Ok(ConfigurationAck {
        fault,
        code: ConfigCode::from_u8(payload[1])?,
        status: ConfigStatus::from_u8(payload[2])?,
    })
}

fn query(payload: &[u8], fault: Fault) -> Result<QueryReply> {
    Ok(QueryReply {
        fault,
        code: QueryCode::from_u8(payload[1])?,
        data: BigEndian::read_f32(&payload[2..6]),
    })
}
