//! Replies sent back by a drive

use core::fmt;

use crate::Error;

/// Reply to a position, speed or current command in the default return mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSpeed {
    /// Fault state of the drive
    pub fault: Fault,
    /// Position in rad, -12.5 to 12.5
    pub position: f32,
    /// Speed, -18.0 to 18.0
    pub speed: f32,
    /// Phase current in A, -70.0 to 70.0
    pub current: f32,
    /// Motor temperature in C
    pub motor_temperature: f32,
    /// MOS (driver) temperature in C
    pub mos_temperature: f32,
}

/// Reply carrying the full precision position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReading {
    /// Fault state of the drive
    pub fault: Fault,
    /// Position as reported
    pub position: f32,
    /// Current in A
    pub current: f32,
    /// Temperature byte as sent, not offset or scaled
    pub temperature: u8,
}

/// Reply carrying the full precision speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedReading {
    /// Fault state of the drive
    pub fault: Fault,
    /// Speed as reported
    pub speed: f32,
    /// Current in A
    pub current: f32,
    /// Temperature byte as sent, not offset or scaled
    pub temperature: u8,
}

/// Acknowledgement of a configuration write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigurationAck {
    /// Fault state of the drive
    pub fault: Fault,
    /// Parameter that was configured
    pub code: ConfigCode,
    /// Whether the write took
    pub status: ConfigStatus,
}

/// Reply to a custom query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryReply {
    /// Fault state of the drive
    pub fault: Fault,
    /// Quantity the data refers to
    pub code: QueryCode,
    /// Queried value
    pub data: f32,
}

/// A decoded reply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Type 1
    PositionSpeed(PositionSpeed),
    /// Type 2
    Position(PositionReading),
    /// Type 3
    Speed(SpeedReading),
    /// Type 4
    Configuration(ConfigurationAck),
    /// Type 5
    Query(QueryReply),
    /// Payload whose tag matches no known message type
    Unrecognized,
}

impl Message {
    /// Type of the reply, `None` if unrecognized
    pub fn message_type(&self) -> Option<MessageType> {
        match *self {
            Message::PositionSpeed(_) => Some(MessageType::PositionSpeed),
            Message::Position(_) => Some(MessageType::Position),
            Message::Speed(_) => Some(MessageType::Speed),
            Message::Configuration(_) => Some(MessageType::Configuration),
            Message::Query(_) => Some(MessageType::Query),
            Message::Unrecognized => None,
        }
    }

    /// Fault reported alongside the reply, `None` if unrecognized
    pub fn fault(&self) -> Option<Fault> {
        match *self {
            Message::PositionSpeed(m) => Some(m.fault),
            Message::Position(m) => Some(m.fault),
            Message::Speed(m) => Some(m.fault),
            Message::Configuration(m) => Some(m.fault),
            Message::Query(m) => Some(m.fault),
            Message::Unrecognized => None,
        }
    }
}

/// Reply layouts, selected by the top three bits of the first byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Packed position, speed, current and temperatures
    PositionSpeed,
    /// Float position
    Position,
    /// Float speed
    Speed,
    /// Configuration acknowledgement
    Configuration,
    /// Custom query reply
    Query,
}

impl MessageType {
    /// Looks up a 3 bit tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(MessageType::PositionSpeed),
            2 => Some(MessageType::Position),
            3 => Some(MessageType::Speed),
            4 => Some(MessageType::Configuration),
            5 => Some(MessageType::Query),
            _ => None,
        }
    }

    /// Tag carried in the first byte
    pub fn value(&self) -> u8 {
        match *self {
            MessageType::PositionSpeed => 1,
            MessageType::Position => 2,
            MessageType::Speed => 3,
            MessageType::Configuration => 4,
            MessageType::Query => 5,
        }
    }

    /// Bytes needed to decode this type
    pub fn payload_len(&self) -> usize {
        match *self {
            MessageType::PositionSpeed | MessageType::Position | MessageType::Speed => 8,
            MessageType::Configuration => 3,
            MessageType::Query => 6,
        }
    }
}

/// Drive faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// No faults
    None,
    /// Motor temperature too high
    Overheating,
    /// Motor current too high
    Overcurrent,
    /// Supply voltage too low
    UnderVoltage,
    /// Encoder error
    Encoder,
    /// Brake voltage too high
    BrakeOverVoltage,
    /// DRV driver error
    Drv,
}

impl Fault {
    /// Looks up the code in the low five bits of a reply. Code 5 is unused by the firmware.
    pub fn from_u8(n: u8) -> Result<Self, Error> {
        match n {
            0 => Ok(Fault::None),
            1 => Ok(Fault::Overheating),
            2 => Ok(Fault::Overcurrent),
            3 => Ok(Fault::UnderVoltage),
            4 => Ok(Fault::Encoder),
            6 => Ok(Fault::BrakeOverVoltage),
            7 => Ok(Fault::Drv),
            _ => Err(Error::UnknownErrorCode(n)),
        }
    }

    /// Code as sent by the drive
    pub fn value(&self) -> u8 {
        match *self {
            Fault::None => 0,
            Fault::Overheating => 1,
            Fault::Overcurrent => 2,
            Fault::UnderVoltage => 3,
            Fault::Encoder => 4,
            Fault::BrakeOverVoltage => 6,
            Fault::Drv => 7,
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match *self {
            Fault::None => "No Errors",
            Fault::Overheating => "Motor Overheating",
            Fault::Overcurrent => "Motor Overcurrent",
            Fault::UnderVoltage => "Motor Voltage too low",
            Fault::Encoder => "Motor Encoder Error",
            Fault::BrakeOverVoltage => "Motor brake voltage too high",
            Fault::Drv => "DRV Driver Error",
        }
    }
}

/// Parameters acknowledged by a configuration reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCode {
    /// Reserved
    Reserved,
    /// System acceleration
    Acceleration,
    /// Flux observation gain
    FluxObservationGain,
    /// Damping coefficient
    DampingCoefficient,
}

impl ConfigCode {
    /// Looks up the code byte of a configuration reply
    pub fn from_u8(n: u8) -> Result<Self, Error> {
        match n {
            0 => Ok(ConfigCode::Reserved),
            1 => Ok(ConfigCode::Acceleration),
            2 => Ok(ConfigCode::FluxObservationGain),
            3 => Ok(ConfigCode::DampingCoefficient),
            _ => Err(Error::UnknownConfigCode(n)),
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match *self {
            ConfigCode::Reserved => "Reserved",
            ConfigCode::Acceleration => "Configuring System Acceleration",
            ConfigCode::FluxObservationGain => "Configuring Flux Observation Gain",
            ConfigCode::DampingCoefficient => "Configuring Damping Coefficient",
        }
    }
}

/// Outcome of a configuration write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStatus {
    /// Write rejected
    Failure,
    /// Write applied
    Success,
}

impl ConfigStatus {
    /// Looks up the status byte of a configuration reply
    pub fn from_u8(n: u8) -> Result<Self, Error> {
        match n {
            0 => Ok(ConfigStatus::Failure),
            1 => Ok(ConfigStatus::Success),
            _ => Err(Error::UnknownConfigStatus(n)),
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match *self {
            ConfigStatus::Failure => "Failure",
            ConfigStatus::Success => "Success",
        }
    }
}

/// Quantities a custom query can return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryCode {
    /// Reserved
    Reserved,
    /// Angle
    Angle,
    /// Speed
    Speed,
    /// Current
    Current,
    /// Power
    Power,
    /// Acceleration
    Acceleration,
    /// Flux current
    CurrentFlux,
}

impl QueryCode {
    /// Looks up the code byte of a query reply
    pub fn from_u8(n: u8) -> Result<Self, Error> {
        match n {
            0 => Ok(QueryCode::Reserved),
            1 => Ok(QueryCode::Angle),
            2 => Ok(QueryCode::Speed),
            3 => Ok(QueryCode::Current),
            4 => Ok(QueryCode::Power),
            5 => Ok(QueryCode::Acceleration),
            6 => Ok(QueryCode::CurrentFlux),
            _ => Err(Error::UnknownQueryCode(n)),
        }
    }

    /// Human readable description
    pub fn description(&self) -> &'static str {
        match *self {
            QueryCode::Reserved => "Reserved",
            QueryCode::Angle => "Angle",
            QueryCode::Speed => "Speed",
            QueryCode::Current => "Current",
            QueryCode::Power => "Power",
            QueryCode::Acceleration => "Accel",
            QueryCode::CurrentFlux => "Current Flux",
        }
    }
}

macro_rules! display_description {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.description())
                }
            }
        )*
    };
}

display_description!(Fault, ConfigCode, ConfigStatus, QueryCode);
