use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a rupee amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Trims whitespace, drops a leading `₹`, `Rs.` or `Rs` and removes comma
/// separators (both `1,500,000` and `15,00,000` groupings).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = trimmed
        .strip_prefix('₹')
        .or_else(|| trimmed.strip_prefix("Rs."))
        .or_else(|| trimmed.strip_prefix("Rs"))
        .or_else(|| trimmed.strip_prefix("rs."))
        .or_else(|| trimmed.strip_prefix("rs"))
        .unwrap_or(trimmed);
    unprefixed.trim().replace(',', "")
}

/// Parses a rupee amount such as `₹15,00,000`, `Rs. 50000` or `1200.50`.
///
/// Empty or whitespace-only input is treated as 0. Sign is preserved so
/// negative amounts reach profile validation.
pub fn parse_rupees(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// `value_parser` adapter for clap.
pub fn rupees_arg(s: &str) -> Result<Decimal, String> {
    parse_rupees(s).map_err(|e| e.to_string())
}
