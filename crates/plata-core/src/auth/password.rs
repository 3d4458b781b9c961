//! Password strength scoring.

/// Registration is rejected locally below this score.
pub const MIN_REGISTER_STRENGTH: u8 = 50;

/// Strength score, 0–100 in steps of 25: one step each for length over
/// seven characters, an ASCII uppercase letter, a digit, and a
/// non-alphanumeric character.
pub fn strength(password: &str) -> u8 {
    let mut score = 0;
    if password.chars().count() > 7 {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 25;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 25;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 25;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_adds_a_step() {
        assert_eq!(strength("ab"), 0);
        assert_eq!(strength("abcdefgh"), 25);
        assert_eq!(strength("Abcdefgh"), 50);
        assert_eq!(strength("Abcdefg1"), 75);
        assert_eq!(strength("Abcdefg1!"), 100);
    }

    #[test]
    fn test_rules_are_independent_of_order() {
        assert_eq!(strength("!1Ab"), 75); // short, but three rules hit
        assert_eq!(strength("A1!"), 75);
        assert_eq!(strength("aaaaaaaaa"), 25); // long only
    }

    #[test]
    fn test_monotonic_in_satisfied_rules() {
        // Any string satisfying more rules scores at least as much as
        // one satisfying a subset.
        let ladder = ["ab", "abcdefgh", "Abcdefgh", "Abcdefg1", "Abcdefg1!"];
        for pair in ladder.windows(2) {
            assert!(strength(pair[0]) <= strength(pair[1]));
        }
    }

    #[test]
    fn test_non_ascii_counts_as_symbol() {
        assert_eq!(strength("ñ"), 25);
    }

    #[test]
    fn test_register_threshold() {
        assert!(strength("abcdefgh") < MIN_REGISTER_STRENGTH);
        assert!(strength("Abcdefgh") >= MIN_REGISTER_STRENGTH);
    }
}
