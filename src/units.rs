//! Conversions between physical units and the protocol's fixed-point fields

/// Half-range of the position fields, in radians
pub const POSITION_LIMIT: f64 = 12.5;
/// Half-range of the hybrid control speed field
pub const SPEED_LIMIT: f64 = 18.0;
/// Half-range of the hybrid control torque field, in N·m
pub const TORQUE_LIMIT: f64 = 150.0;

const FULL_16: f64 = 65536.0;
const FULL_12: f64 = 4095.0;

/// Truncates toward zero, keeping the two's complement pattern of negative results
fn truncate(value: f32) -> u64 {
    value as i64 as u64
}

/// Maps `value` from `[-limit, limit]` onto `[0, full_scale]`, rounding and clamping
fn scale_clamped(value: f64, limit: f64, full_scale: f64) -> u64 {
    let scaled = libm::round((value + limit) / (2.0 * limit) * full_scale);
    scaled.max(0.0).min(full_scale) as u64
}

/// Value times ten, truncated. Used for the speed and current fields of the
/// direct control commands.
///
/// The product stays in `f32` so that `0.7` lands on 7 and not 6.
pub fn tenths(value: f32) -> u64 {
    truncate(value * 10.0)
}

/// Hybrid control position, degrees to `0..=65536`.
///
/// The upper bound does not fit the 16 bit field and wraps to zero once packed.
pub fn degrees_to_fixed(degrees: f32) -> u64 {
    scale_clamped(f64::from(degrees).to_radians(), POSITION_LIMIT, FULL_16)
}

/// Hybrid control speed, RPM to `0..=4095`
pub fn rpm_to_fixed(rpm: f32) -> u64 {
    scale_clamped(f64::from(rpm), SPEED_LIMIT, FULL_12)
}

/// Hybrid control feed-forward torque, N·m to `0..=4095`
pub fn torque_to_fixed(torque: f32) -> u64 {
    scale_clamped(f64::from(torque), TORQUE_LIMIT, FULL_12)
}

/// Proportional gain, `0..500` onto 12 bits
pub fn kp_to_fixed(kp: f32) -> u64 {
    truncate(kp * 4095.0 / 500.0)
}

/// Derivative gain, `0..5` onto 9 bits
pub fn kd_to_fixed(kd: f32) -> u64 {
    truncate(kd * 511.0 / 5.0)
}

/// Position from the 16 bit field of a position/speed reply
pub fn position_from_fixed(raw: u16) -> f32 {
    f32::from(raw) * (25.0 / 65536.0) - 12.5
}

/// Speed from the 12 bit field of a position/speed reply
pub fn speed_from_fixed(raw: u16) -> f32 {
    f32::from(raw) * (36.0 / 4095.0) - 18.0
}

/// Current in A from the 12 bit field of a position/speed reply
pub fn current_from_fixed(raw: u16) -> f32 {
    f32::from(raw) * (140.0 / 4095.0) - 70.0
}

/// Current in A from a field holding tenths of an amp
pub fn current_from_tenths(raw: u16) -> f32 {
    f32::from(raw) / 10.0
}

/// Temperature in C from a byte offset by 50 in half degree steps
pub fn temperature_from_raw(raw: u8) -> f32 {
    (f32::from(raw) - 50.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn degrees() {
        assert_eq!(degrees_to_fixed(0.0), 32768);
        assert_eq!(degrees_to_fixed(90.0), 36886);
        assert_eq!(degrees_to_fixed(-1000.0), 0);
        assert_eq!(degrees_to_fixed(1000.0), 65536);
        assert_eq!(degrees_to_fixed(f32::NAN), 0);
    }

    #[test]
    fn rpm_rounds_half_away() {
        // 2047.5 before rounding
        assert_eq!(rpm_to_fixed(0.0), 2048);
        assert_eq!(rpm_to_fixed(5.0), 2616);
        assert_eq!(rpm_to_fixed(-18.0), 0);
        assert_eq!(rpm_to_fixed(18.0), 4095);
        assert_eq!(rpm_to_fixed(100.0), 4095);
    }

    #[test]
    fn torque() {
        assert_eq!(torque_to_fixed(0.0), 2048);
        assert_eq!(torque_to_fixed(10.0), 2184);
        assert_eq!(torque_to_fixed(-500.0), 0);
        assert_eq!(torque_to_fixed(500.0), 4095);
    }

    #[test]
    fn gains_truncate() {
        assert_eq!(kp_to_fixed(15.0), 122);
        assert_eq!(kp_to_fixed(100.0), 819);
        assert_eq!(kd_to_fixed(0.5), 51);
        assert_eq!(kd_to_fixed(2.0), 204);
    }

    #[test]
    fn tenths_truncates_toward_zero() {
        assert_eq!(tenths(60.0), 600);
        assert_eq!(tenths(2.55), 25);
        assert_eq!(tenths(-1.5) & 0xFFFF, 0xFFF1);
    }

    #[test]
    fn tenths_of_inexact_decimals() {
        assert_eq!(tenths(0.7), 7);
        assert_eq!(tenths(0.9), 9);
        assert_eq!(tenths(2.3), 23);
        assert_eq!(tenths(4.6), 46);
        assert_eq!(tenths(-0.7) & 0xFFFF, 0xFFF9);
    }

    #[test]
    fn tenths_exact_over_range() {
        for i in 0..=1000i64 {
            let value = i as f32 / 10.0;
            assert_eq!(tenths(value), i as u64, "{}", value);
            assert_eq!(tenths(-value), (-i) as u64, "{}", -value);
        }
    }

    #[test]
    fn reply_scaling() {
        assert!(close(position_from_fixed(32768), 0.0));
        assert!(close(position_from_fixed(0), -12.5));
        assert!(close(speed_from_fixed(4095), 18.0));
        assert!(close(speed_from_fixed(0), -18.0));
        assert!(close(current_from_fixed(0), -70.0));
        assert!(close(current_from_fixed(4095), 70.0));
        assert!(close(current_from_tenths(123), 12.3));
    }

    #[test]
    fn temperature_offset() {
        assert!(close(temperature_from_raw(50), 0.0));
        assert!(close(temperature_from_raw(90), 20.0));
        assert!(close(temperature_from_raw(0), -25.0));
    }
}
