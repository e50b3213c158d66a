//! Base-unit token amounts and display formatting.
//!
//! All monetary values move through the portal as unsigned 18-decimal
//! fixed-point integers ("base units") and are only converted to decimal
//! strings at the display boundary. Conversion is always by truncation:
//!
//! ```text
//! display(v, p) = floor(v / 10^(18 - p)) / 10^p
//! ```
//!
//! so a rendered balance never exceeds the true amount. The one marked
//! exception is the dust sentinel: a nonzero balance that truncates to
//! all zeros renders as `≈0.01` (at 2-decimal precision) instead of
//! `0.00`, so dust is never misreported as exactly zero.

use crate::error::PortalError;

/// Number of decimal places in the token's base-unit representation.
pub const TOKEN_DECIMALS: u32 = 18;

/// Base units per whole token (`10^18`).
pub const UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Maximum fractional digits a display string may request.
pub const MAX_DISPLAY_PRECISION: u8 = 3;

/// Parse a human decimal string (`"1,234.5"`) into base units.
///
/// Digit-group separators (`,`, `_`) are ignored. Fractional digits
/// beyond the 18 supported places are truncated, never rounded up.
/// Signs, exponents, and empty input are rejected.
pub fn to_base_units(text: &str) -> Result<u128, PortalError> {
    let invalid = || PortalError::InvalidAmount {
        input: text.to_string(),
    };

    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    if cleaned.is_empty() || cleaned == "." {
        return Err(invalid());
    }

    let (int_part, frac_part) = match cleaned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (cleaned.as_str(), ""),
    };
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let whole: u128 = if int_part.is_empty() {
        0
    } else {
        // All digits at this point; a parse failure means overflow.
        int_part.parse().map_err(|_| PortalError::AmountOverflow)?
    };
    let whole_units = whole
        .checked_mul(UNITS_PER_TOKEN)
        .ok_or(PortalError::AmountOverflow)?;

    // Truncate fractional digits beyond the supported precision.
    let frac_digits: String = frac_part.chars().take(TOKEN_DECIMALS as usize).collect();
    let frac_units = if frac_digits.is_empty() {
        0
    } else {
        let frac_value: u128 = frac_digits.parse().map_err(|_| PortalError::AmountOverflow)?;
        // frac_value < 10^len, so the scale-up stays below 10^18.
        frac_value * 10u128.pow(TOKEN_DECIMALS - frac_digits.len() as u32)
    };

    whole_units
        .checked_add(frac_units)
        .ok_or(PortalError::AmountOverflow)
}

/// Format base units as a grouped decimal string with exactly
/// `precision` fractional digits (0–3), truncating toward zero.
pub fn format_tokens(base_units: u128, precision: u8) -> String {
    let precision = precision.min(MAX_DISPLAY_PRECISION);
    let whole = base_units / UNITS_PER_TOKEN;
    let grouped = group_digits(whole);
    if precision == 0 {
        return grouped;
    }

    // Base units per displayed fractional step.
    let step = 10u128.pow(TOKEN_DECIMALS - precision as u32);
    let frac_display = base_units % UNITS_PER_TOKEN / step;
    if base_units > 0 && whole == 0 && frac_display == 0 {
        // Nonzero balance below display resolution.
        return dust_sentinel(precision);
    }
    format!(
        "{grouped}.{frac_display:0width$}",
        width = precision as usize
    )
}

/// Format a base-unit amount that arrives as a string from an external
/// payload. Never fails: non-integer input falls back to a float parse
/// (truncated), and garbage renders as zero.
pub fn format_tokens_lossy(text: &str, precision: u8) -> String {
    let trimmed = text.trim();
    match trimmed.parse::<u128>() {
        Ok(units) => format_tokens(units, precision),
        Err(_) => {
            let approx = trimmed.parse::<f64>().unwrap_or(0.0);
            if approx.is_finite() && approx > 0.0 {
                log::debug!("amount {trimmed:?} is not a base-unit integer; using float fallback");
                format_tokens(approx.trunc() as u128, precision)
            } else {
                format_tokens(0, precision)
            }
        }
    }
}

fn dust_sentinel(precision: u8) -> String {
    let mut out = String::from("≈0.");
    for _ in 1..precision {
        out.push('0');
    }
    out.push('1');
    out
}

fn group_digits(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
