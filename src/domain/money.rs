use std::fmt;

/// Format an amount as dollars with two decimals.
/// Example: 10.0 -> "$10.00", 3.456 -> "$3.46"
pub fn format_amount(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Whether an amount can be recorded as an expense.
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// Parse a decimal string typed on the command line into an amount.
/// Accepts an optional leading `$`. Example: "12.5" -> 12.5, "$40" -> 40.0
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let input = input.trim();
    let digits = input.strip_prefix('$').unwrap_or(input);
    let amount: f64 = digits.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !amount.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
