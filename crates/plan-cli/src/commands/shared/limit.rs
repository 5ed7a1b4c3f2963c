/// Compute effective limit with precedence: global flag -> configured fallback.
#[must_use]
pub fn effective_limit(flag: Option<u32>, fallback: u32) -> u32 {
    flag.unwrap_or(fallback)
}
