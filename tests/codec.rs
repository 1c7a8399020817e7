use bionic_comm::{
    classify, decode, set_zero_position, Command, ConfigCode, ConfigStatus, CurrentTorqueControl,
    Error, Fault, HybridControl, Message, MessageType, PositionControl, Query, QueryCode,
    SpeedControl, ZeroPosition,
};

#[test]
fn zero_position_splits_motor_id() {
    assert_eq!(&set_zero_position(1)[..], &[0x00, 0x01, 0x00, 0x03]);
    assert_eq!(&set_zero_position(0x7FF)[..], &[0x07, 0xFF, 0x00, 0x03]);
}

#[test]
fn every_command_has_its_declared_length() {
    let cases: Vec<(Command, usize)> = vec![
        (PositionControl::new(-3.0).into(), 8),
        (SpeedControl::new(250.0).into(), 7),
        (CurrentTorqueControl::current(2.0).into(), 3),
        (CurrentTorqueControl::torque(-2.0).into(), 3),
        (ZeroPosition { motor_id: 0xFFFF }.into(), 4),
        (Query::Position.into(), 2),
        (Query::Speed.into(), 2),
        (Query::Current.into(), 2),
        (Query::Power.into(), 2),
        (HybridControl::new(-30.0, -4.0, 2.5).into(), 8),
    ];

    for (command, len) in cases {
        assert_eq!(command.encode().len(), len, "{:?}", command);
    }
}

#[test]
fn motor_mode_is_in_top_three_bits() {
    assert_eq!(PositionControl::new(0.0).encode()[0] >> 5, 1);
    assert_eq!(SpeedControl::new(0.0).encode()[0] >> 5, 2);
    assert_eq!(CurrentTorqueControl::current(0.0).encode()[0] >> 5, 3);
    assert_eq!(Query::Power.encode()[0] >> 5, 7);
    assert_eq!(HybridControl::new(0.0, 0.0, 0.0).encode()[0] >> 5, 0);
}

#[test]
fn oversized_message_return_is_masked() {
    let masked = PositionControl::new(0.0).with_message_return(0b111).encode();
    let plain = PositionControl::new(0.0).with_message_return(0b11).encode();
    assert_eq!(masked, plain);
}

#[test]
fn position_command_embeds_raw_float() {
    let payload = PositionControl::new(1.5).encode();
    // mode(3) + float(32) starts the frame
    let head = u64::from_be_bytes([
        payload[0], payload[1], payload[2], payload[3], payload[4], payload[5], payload[6],
        payload[7],
    ]);
    let position = ((head >> 29) & 0xFFFF_FFFF) as u32;
    assert_eq!(f32::from_bits(position), 1.5);
}

#[test]
fn classify_first_byte() {
    assert_eq!(classify(&[0x20]), Some(MessageType::PositionSpeed));
    assert_eq!(classify(&[0xA0]), Some(MessageType::Query));
    assert_eq!(classify(&[0x00]), None);
    assert_eq!(classify(&[]), None);
}

#[test]
fn sample_query_reply() {
    let message = decode(&[0xA0, 0x01, 0x39, 0xF7, 0x24, 0x7D]).expect("decode");
    assert_eq!(message.message_type(), Some(MessageType::Query));
    assert_eq!(message.fault(), Some(Fault::None));
    assert_eq!(message.fault().map(|f| f.to_string()), Some("No Errors".to_string()));

    match message {
        Message::Query(reply) => {
            assert_eq!(reply.code, QueryCode::Angle);
            assert_eq!(reply.code.to_string(), "Angle");
            assert_eq!(reply.data, f32::from_be_bytes([0x39, 0xF7, 0x24, 0x7D]));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn temperature_scale_differs_between_layouts() {
    let packed = decode(&[0x20, 0x80, 0x00, 0x80, 0x08, 0x00, 0x5A, 0x5A]).expect("type 1");
    let float = decode(&[0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x5A]).expect("type 2");

    match (packed, float) {
        (Message::PositionSpeed(packed), Message::Position(float)) => {
            assert_eq!(packed.motor_temperature, 20.0);
            assert_eq!(packed.mos_temperature, 20.0);
            assert_eq!(float.temperature, 0x5A);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn configuration_ack() {
    match decode(&[0x80, 0x03, 0x00]).expect("decode") {
        Message::Configuration(ack) => {
            assert_eq!(ack.code, ConfigCode::DampingCoefficient);
            assert_eq!(ack.status, ConfigStatus::Failure);
            assert_eq!(ack.code.to_string(), "Configuring Damping Coefficient");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn unknown_error_code_is_reported() {
    let err = decode(&[0x25, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(err, Error::UnknownErrorCode(5));
    assert_eq!(err.to_string(), "Unknown error code 5");
}

#[test]
fn too_short_is_reported() {
    let err = decode(&[0x40, 0x3F, 0xC0]).unwrap_err();
    assert_eq!(
        err,
        Error::InsufficientData {
            expected: 8,
            actual: 3
        }
    );
}
