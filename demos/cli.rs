use bionic_comm::{
    decode, set_zero_position, Command, CurrentTorqueControl, HybridControl, Message,
    PositionControl, Query, SpeedControl, ZERO_POSITION_CAN_ID,
};

fn main() {
    let commands: [(&str, Command); 5] = [
        ("position", PositionControl::new(1.5).into()),
        ("speed", SpeedControl::new(100.0).into()),
        ("torque", CurrentTorqueControl::torque(-1.5).into()),
        ("query", Query::Position.into()),
        ("hybrid", HybridControl::new(90.0, 5.0, 10.0).into()),
    ];

    for (name, command) in commands.iter() {
        println!("{:>8}: {}", name, hex(&command.encode()));
    }

    println!(
        "{:>8}: {} (id {:#x})",
        "zero",
        hex(&set_zero_position(1)),
        ZERO_POSITION_CAN_ID
    );

    let reply: [u8; 6] = [0xA0, 0x01, 0x39, 0xF7, 0x24, 0x7D];
    match decode(&reply) {
        Ok(Message::Query(reply)) => println!(
            "{:>8}: {} = {} ({})",
            "reply",
            reply.code,
            reply.data,
            reply.fault
        ),
        Ok(other) => println!("{:?}", other),
        Err(e) => println!("discarding frame: {}", e),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:#04x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
