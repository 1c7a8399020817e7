//! Bit accumulator used to lay out command fields
//!
//! Fields are pushed most significant first. A value wider than its field keeps
//! only its low bits, the same way the drive's registers would latch it.

use byteorder::ByteOrder;

use crate::{Payload, MAX_PAYLOAD_LEN};

fn mask(width: u32) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1 << width) - 1
    }
}

/// Shifts `accumulator` left by `width` bits and ORs in the low `width` bits of `value`
pub fn push_bits(accumulator: u64, value: u64, width: u32) -> u64 {
    accumulator.checked_shl(width).unwrap_or(0) | (value & mask(width))
}

/// Pushes the IEEE-754 bit pattern of `value` as a 32 bit field
pub fn push_float32_bits(accumulator: u64, value: f32) -> u64 {
    push_bits(accumulator, u64::from(value.to_bits()), 32)
}

/// Splits the low `length` bytes of `accumulator` into a payload.
///
/// `BigEndian` emits the most significant byte first, `LittleEndian` reverses
/// that. Bits above `length * 8` are dropped. Lengths past a CAN data field are
/// capped at [`MAX_PAYLOAD_LEN`].
pub fn split_into_bytes<B: ByteOrder>(accumulator: u64, length: usize) -> Payload {
    let length = length.min(MAX_PAYLOAD_LEN);
    let mut buf = [0u8; MAX_PAYLOAD_LEN];

    // write_uint needs at least one byte
    if length > 0 {
        B::write_uint(
            &mut buf[..length],
            accumulator & mask(length as u32 * 8),
            length,
        );
    }

    buf[..length].iter().copied().collect()
}
