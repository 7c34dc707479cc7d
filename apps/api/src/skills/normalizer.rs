//! Skill normalization. Every skill string entering either side of a comparison
//! goes through `normalize`, so equality on the normalized form is skill equality.

/// Punctuation trimmed from both ends of a skill token.
pub const SKILL_PUNCTUATION: &[char] = &['.', ',', '(', ')'];

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || SKILL_PUNCTUATION.contains(&c)
}

/// Trims surrounding whitespace and `SKILL_PUNCTUATION`, then lower-cases.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> String {
    raw.trim_matches(is_trimmable).to_lowercase()
}
