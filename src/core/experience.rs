//! Experience curve: how much experience each level needs.

use super::constants::*;

/// Calculates the experience required to clear `level`.
///
/// Levels 1-20 grow linearly (`100 + (level-1)*50`). Past level 20 the curve
/// turns exponential: `100 * 1.12^(level-20) + level*100`, floored.
/// Level 0 is treated as level 1.
pub fn exp_needed(level: u32) -> u64 {
    let level = level.max(1);
    if level <= EXP_LINEAR_CAP_LEVEL {
        EXP_BASE + (level as u64 - 1) * EXP_LINEAR_STEP
    } else {
        let growth = EXP_GROWTH_RATE.powi((level - EXP_LINEAR_CAP_LEVEL) as i32);
        (EXP_BASE as f64 * growth + level as f64 * EXP_LEVEL_FACTOR).floor() as u64
    }
}

/// Total experience accumulated from level 1 / 0 exp up to `level` / `exp`.
pub fn total_exp(level: u32, exp: u64) -> u64 {
    (1..level.max(1)).map(exp_needed).sum::<u64>() + exp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_segment() {
        assert_eq!(exp_needed(1), 100);
        assert_eq!(exp_needed(2), 150);
        assert_eq!(exp_needed(3), 200);
        assert_eq!(exp_needed(4), 250);
        assert_eq!(exp_needed(5), 300);
        assert_eq!(exp_needed(20), 1050);
    }

    #[test]
    fn test_exponential_segment() {
        // 100 * 1.12 + 2100 = 2212
        assert_eq!(exp_needed(21), 2212);
        // 100 * 1.12^10 + 3000 = 3310.58...
        assert_eq!(exp_needed(30), 3310);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(exp_needed(0), exp_needed(1));
    }

    #[test]
    fn test_strictly_increasing_through_100() {
        for level in 1..=100 {
            assert!(
                exp_needed(level + 1) > exp_needed(level),
                "exp_needed({}) = {} should exceed exp_needed({}) = {}",
                level + 1,
                exp_needed(level + 1),
                level,
                exp_needed(level)
            );
        }
    }

    #[test]
    fn test_total_exp() {
        assert_eq!(total_exp(1, 0), 0);
        assert_eq!(total_exp(1, 40), 40);
        assert_eq!(total_exp(3, 0), 250);
        assert_eq!(total_exp(4, 180), 100 + 150 + 200 + 180);
    }
}
