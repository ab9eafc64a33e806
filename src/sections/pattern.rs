//! Pattern stage - penalizes repetitive and sequential runs.

const MIN_MULTIPLIER: f64 = 0.3;
const REPEAT_WEIGHT: f64 = 0.5;
const SEQUENCE_WEIGHT: f64 = 0.3;

/// Multiplier in `[0.3, 1.0]` applied to the entropy estimate.
///
/// Every adjacent pair counts as a repeat when both characters are equal and
/// as a sequence step when their code points differ by exactly one in either
/// direction ("abc", "321"). Passwords shorter than two characters are never
/// penalized.
pub fn penalty_multiplier(password: &str) -> f64 {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() < 2 {
        return 1.0;
    }

    let mut repeats = 0usize;
    let mut sequences = 0usize;
    for pair in chars.windows(2) {
        let prev = pair[0] as i64;
        let curr = pair[1] as i64;
        if curr == prev {
            repeats += 1;
        }
        if (curr - prev).abs() == 1 {
            sequences += 1;
        }
    }

    let pairs = (chars.len() - 1) as f64;
    let repeat_ratio = repeats as f64 / pairs;
    let seq_ratio = sequences as f64 / pairs;

    (1.0 - repeat_ratio * REPEAT_WEIGHT - seq_ratio * SEQUENCE_WEIGHT).clamp(MIN_MULTIPLIER, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_too_short() {
        assert_eq!(penalty_multiplier(""), 1.0);
        assert_eq!(penalty_multiplier("a"), 1.0);
    }

    #[test]
    fn test_penalty_all_repeats() {
        assert!((penalty_multiplier("aaaaaaaa") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_ascending_and_descending() {
        assert!((penalty_multiplier("abcdef") - 0.7).abs() < 1e-9);
        assert!((penalty_multiplier("654321") - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_mixed_run() {
        // a-a repeat, a-b sequence, b-x nothing
        let expected = 1.0 - (1.0 / 3.0) * 0.5 - (1.0 / 3.0) * 0.3;
        assert!((penalty_multiplier("aabx") - expected).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_no_pattern() {
        assert_eq!(penalty_multiplier("xK9#mP2!qR4z&wT7"), 1.0);
    }
}
