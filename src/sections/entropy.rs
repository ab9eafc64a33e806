//! Entropy stage - estimates bits of entropy from the character pool.

const LOWERCASE_POOL: u32 = 26;
const UPPERCASE_POOL: u32 = 26;
const DIGIT_POOL: u32 = 10;
const SYMBOL_POOL: u32 = 33;

/// Size of the character pool the password draws from.
///
/// Each class present contributes once: lowercase 26, uppercase 26,
/// digits 10, anything else 33.
pub fn pool_size(password: &str) -> u32 {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    [
        (has_lower, LOWERCASE_POOL),
        (has_upper, UPPERCASE_POOL),
        (has_digit, DIGIT_POOL),
        (has_symbol, SYMBOL_POOL),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, size)| size)
    .sum()
}

/// Bits of entropy: `length * log2(pool)`, 0 for an empty password.
pub fn calculate_entropy(password: &str) -> f64 {
    let pool = pool_size(password);
    if pool == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * f64::from(pool).log2()
}
