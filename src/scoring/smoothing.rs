/// One-step exponential filter with factor 0.5: the published score moves
/// halfway toward the instantaneous score each cycle. Halves round up.
pub fn smooth(previous: u8, instantaneous: u8) -> u8 {
    let blended = (u16::from(previous) + u16::from(instantaneous) + 1) / 2;
    blended.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        assert_eq!(smooth(60, 80), 70);
        assert_eq!(smooth(80, 60), 70);
    }

    #[test]
    fn test_half_rounds_up() {
        assert_eq!(smooth(60, 61), 61);
        assert_eq!(smooth(0, 1), 1);
    }

    #[test]
    fn test_fixed_point_at_target() {
        assert_eq!(smooth(42, 42), 42);
        assert_eq!(smooth(0, 0), 0);
        assert_eq!(smooth(100, 100), 100);
    }

    #[test]
    fn test_repeated_application_converges_monotonically() {
        let target = 90u8;
        let mut published = 10u8;
        let mut last_distance = i32::from(target) - i32::from(published);
        for _ in 0..20 {
            published = smooth(published, target);
            let distance = (i32::from(target) - i32::from(published)).abs();
            assert!(distance <= last_distance);
            last_distance = distance;
        }
        assert_eq!(published, target);
    }

    #[test]
    fn test_output_in_range() {
        for previous in [0u8, 50, 100] {
            for instantaneous in [0u8, 50, 100] {
                assert!(smooth(previous, instantaneous) <= 100);
            }
        }
    }
}
