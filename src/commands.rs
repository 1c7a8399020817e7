//! Commands sent to a drive
//!
//! Every encoder returns the frame body only. The target motor is selected by
//! the arbitration ID, which the caller attaches when sending.
//!
//! Out of range inputs are never rejected: they are truncated to their field
//! width exactly as the drive's registers would take them, leaving validation to
//! the firmware.

use byteorder::BigEndian;
use tracing::trace;

use crate::bits::{push_bits, push_float32_bits, split_into_bytes};
use crate::units;
use crate::Payload;

/// Arbitration ID the zero position command is sent on
pub const ZERO_POSITION_CAN_ID: u16 = 0x7FF;

/// `control_status` of [`CurrentTorqueControl`] selecting current control
pub const CURRENT_CONTROL: u8 = 0;
/// `control_status` of [`CurrentTorqueControl`] selecting torque control
pub const TORQUE_CONTROL: u8 = 1;

const QUERY_MODE: u64 = 0x7;
const ZERO_POSITION_TERMINATOR: u64 = 0x3;

fn finish(command: u64, len: usize) -> Payload {
    let payload = split_into_bytes::<BigEndian>(command, len);
    trace!("encoded command {:02x?}", payload.as_slice());
    payload
}

/// Servo position control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionControl {
    /// Target position, sent as its raw `f32` bit pattern
    pub position: f32,
    /// Motor mode tag, 1 for servo position control
    pub motor_mode: u8,
    /// Speed limit in RPM
    pub max_speed: f32,
    /// Current limit in A
    pub max_current: f32,
    /// Message return status, 0 to 3
    pub message_return: u8,
}

impl PositionControl {
    /// Encoded length in bytes
    pub const LEN: usize = 8;

    /// Moves to `position` at up to 60 RPM and 5 A
    pub fn new(position: f32) -> Self {
        PositionControl {
            position,
            motor_mode: 1,
            max_speed: 60.0,
            max_current: 5.0,
            message_return: 0,
        }
    }

    /// Sets the speed limit in RPM
    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Sets the current limit in A
    pub fn with_max_current(mut self, max_current: f32) -> Self {
        self.max_current = max_current;
        self
    }

    /// Sets the message return status
    pub fn with_message_return(mut self, message_return: u8) -> Self {
        self.message_return = message_return;
        self
    }

    /// Overrides the motor mode tag
    pub fn with_motor_mode(mut self, motor_mode: u8) -> Self {
        self.motor_mode = motor_mode;
        self
    }

    /// Builds the 8 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, self.motor_mode.into(), 3);
        command = push_float32_bits(command, self.position);
        command = push_bits(command, units::tenths(self.max_speed), 15);
        command = push_bits(command, units::tenths(self.max_current), 12);
        command = push_bits(command, self.message_return.into(), 2);
        finish(command, Self::LEN)
    }
}

/// Speed control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedControl {
    /// Target speed in RPM, sent as its raw `f32` bit pattern
    pub speed: f32,
    /// Motor mode tag, 2 for speed control
    pub motor_mode: u8,
    /// Current in A. The field holds 0 to 6553.6 A in 0.1 A steps.
    pub current: f32,
    /// Message return status, 0 to 3
    pub message_return: u8,
}

impl SpeedControl {
    /// Encoded length in bytes
    pub const LEN: usize = 7;

    /// Runs at `speed` with 5 A
    pub fn new(speed: f32) -> Self {
        SpeedControl {
            speed,
            motor_mode: 2,
            current: 5.0,
            message_return: 0,
        }
    }

    /// Sets the current in A
    pub fn with_current(mut self, current: f32) -> Self {
        self.current = current;
        self
    }

    /// Sets the message return status
    pub fn with_message_return(mut self, message_return: u8) -> Self {
        self.message_return = message_return;
        self
    }

    /// Overrides the motor mode tag
    pub fn with_motor_mode(mut self, motor_mode: u8) -> Self {
        self.motor_mode = motor_mode;
        self
    }

    /// Builds the 7 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, self.motor_mode.into(), 3);
        command = push_bits(command, 0, 3);
        command = push_bits(command, self.message_return.into(), 2);
        command = push_float32_bits(command, self.speed);
        command = push_bits(command, units::tenths(self.current), 16);
        finish(command, Self::LEN)
    }
}

/// Direct current or torque control
///
/// The value field is documented by the vendor as a signed 16 bit quantity. It
/// is packed by masking, which matches two's complement for values within
/// `i16` range and wraps silently outside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentTorqueControl {
    /// Current in A or torque in N·m, depending on `control_status`
    pub value: f32,
    /// [`CURRENT_CONTROL`], [`TORQUE_CONTROL`], or another firmware defined state up to 7
    pub control_status: u8,
    /// Motor mode tag, 3 for current control
    pub motor_mode: u8,
    /// Message return status, 0 to 3
    pub message_return: u8,
}

impl CurrentTorqueControl {
    /// Encoded length in bytes
    pub const LEN: usize = 3;

    /// Drives `value` A of current
    pub fn current(value: f32) -> Self {
        CurrentTorqueControl {
            value,
            control_status: CURRENT_CONTROL,
            motor_mode: 3,
            message_return: 0,
        }
    }

    /// Drives `value` N·m of torque
    pub fn torque(value: f32) -> Self {
        CurrentTorqueControl::current(value).with_control_status(TORQUE_CONTROL)
    }

    /// Sets the control status
    pub fn with_control_status(mut self, control_status: u8) -> Self {
        self.control_status = control_status;
        self
    }

    /// Sets the message return status
    pub fn with_message_return(mut self, message_return: u8) -> Self {
        self.message_return = message_return;
        self
    }

    /// Overrides the motor mode tag
    pub fn with_motor_mode(mut self, motor_mode: u8) -> Self {
        self.motor_mode = motor_mode;
        self
    }

    /// Builds the 3 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, self.motor_mode.into(), 3);
        command = push_bits(command, self.control_status.into(), 3);
        command = push_bits(command, self.message_return.into(), 2);
        command = push_bits(command, units::tenths(self.value), 16);
        finish(command, Self::LEN)
    }
}

/// Sets the current position as zero
///
/// Unlike the other commands the motor ID travels in the body, and the frame
/// goes out on [`ZERO_POSITION_CAN_ID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroPosition {
    /// Motor to zero
    pub motor_id: u16,
}

impl ZeroPosition {
    /// Encoded length in bytes
    pub const LEN: usize = 4;

    /// Builds the 4 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, u64::from(self.motor_id >> 8), 8);
        command = push_bits(command, u64::from(self.motor_id & 0xFF), 8);
        command = push_bits(command, 0, 8);
        command = push_bits(command, ZERO_POSITION_TERMINATOR, 8);
        finish(command, Self::LEN)
    }
}

/// Builds the zero position body for `motor_id`
pub fn set_zero_position(motor_id: u16) -> Payload {
    ZeroPosition { motor_id }.encode()
}

/// Reads back a single quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Motor position
    Position,
    /// Motor speed
    Speed,
    /// Current draw
    Current,
    /// Power consumption
    Power,
}

impl Query {
    /// Encoded length in bytes
    pub const LEN: usize = 2;

    fn value(&self) -> u8 {
        match *self {
            Query::Position => 0x1,
            Query::Speed => 0x2,
            Query::Current => 0x3,
            Query::Power => 0x4,
        }
    }

    /// Builds the 2 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, QUERY_MODE, 3);
        command = push_bits(command, 0, 5);
        command = push_bits(command, self.value().into(), 8);
        finish(command, Self::LEN)
    }
}

/// Force-position hybrid (PD) control
///
/// The drive computes `kp * (position error) + kd * (speed error) + torque`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridControl {
    /// Proportional gain, 0 to 500
    pub kp: f32,
    /// Derivative gain, 0 to 5
    pub kd: f32,
    /// Target position in degrees
    pub position: f32,
    /// Target speed in RPM
    pub speed: f32,
    /// Feed-forward torque in N·m
    pub torque: f32,
}

impl HybridControl {
    /// Encoded length in bytes
    pub const LEN: usize = 8;

    /// Targets `position`, `speed` and `torque` with the unloaded default gains
    /// (kp 15, kd 0.5)
    pub fn new(position: f32, speed: f32, torque: f32) -> Self {
        HybridControl {
            kp: 15.0,
            kd: 0.5,
            position,
            speed,
            torque,
        }
    }

    /// Sets both gains
    pub fn with_gains(mut self, kp: f32, kd: f32) -> Self {
        self.kp = kp;
        self.kd = kd;
        self
    }

    /// Builds the 8 byte body
    pub fn encode(&self) -> Payload {
        let mut command = 0;
        command = push_bits(command, 0, 3);
        command = push_bits(command, units::kp_to_fixed(self.kp), 12);
        command = push_bits(command, units::kd_to_fixed(self.kd), 9);
        command = push_bits(command, units::degrees_to_fixed(self.position), 16);
        command = push_bits(command, units::rpm_to_fixed(self.speed), 12);
        command = push_bits(command, units::torque_to_fixed(self.torque), 12);
        finish(command, Self::LEN)
    }
}

/// Any command understood by the drive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Servo position control
    Position(PositionControl),
    /// Speed control
    Speed(SpeedControl),
    /// Current or torque control
    CurrentTorque(CurrentTorqueControl),
    /// Zero position
    ZeroPosition(ZeroPosition),
    /// Single quantity query
    Query(Query),
    /// Force-position hybrid control
    Hybrid(HybridControl),
}

impl Command {
    /// Builds the frame body
    pub fn encode(&self) -> Payload {
        match self {
            Command::Position(c) => c.encode(),
            Command::Speed(c) => c.encode(),
            Command::CurrentTorque(c) => c.encode(),
            Command::ZeroPosition(c) => c.encode(),
            Command::Query(c) => c.encode(),
            Command::Hybrid(c) => c.encode(),
        }
    }

    /// Length of the encoded body in bytes
    pub fn len(&self) -> usize {
        match self {
            Command::Position(_) => PositionControl::LEN,
            Command::Speed(_) => SpeedControl::LEN,
            Command::CurrentTorque(_) => CurrentTorqueControl::LEN,
            Command::ZeroPosition(_) => ZeroPosition::LEN,
            Command::Query(_) => Query::LEN,
            Command::Hybrid(_) => HybridControl::LEN,
        }
    }

    /// Always false, every command carries at least two bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! impl_from_command {
    ($($variant:ident($ty:ty)),*) => {
        $(
            impl From<$ty> for Command {
                fn from(c: $ty) -> Self {
                    Command::$variant(c)
                }
            }
        )*
    };
}

impl_from_command!(
    Position(PositionControl),
    Speed(SpeedControl),
    CurrentTorque(CurrentTorqueControl),
    ZeroPosition(ZeroPosition),
    Query(Query),
    Hybrid(HybridControl)
);
