//! Browser-compatible number conversions used by the calculator pages.

use std::sync::LazyLock;

use fancy_regex::Regex;

// `Number()` accepts only a plain decimal literal; `f64::from_str` on its own
// would also take `inf` and `NaN`.
static DECIMAL_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$").ok());

#[cfg(test)]
pub(crate) fn decimal_literal_compiles() -> bool {
    DECIMAL_LITERAL.is_some()
}

fn is_decimal_literal(src: &str) -> bool {
    DECIMAL_LITERAL
        .as_ref()
        .and_then(|re| re.is_match(src).ok())
        .unwrap_or(false)
}

/// `Number(src)`: the whole trimmed string must be a numeric literal.
/// Empty input is `0`, anything unparsable is `NaN`.
pub fn number_from_str(src: &str) -> f64 {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return parse_prefixed_radix(digits, radix);
        }
    }

    if !is_decimal_literal(trimmed) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_radix(src: &str, radix: u32) -> f64 {
    if src.is_empty() {
        return f64::NAN;
    }
    let mut out = 0.0f64;
    for ch in src.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return f64::NAN;
        };
        out = out * f64::from(radix) + f64::from(digit);
    }
    out
}

/// `parseInt(src, radix)`: parses the longest valid digit prefix.
pub fn parse_int(src: &str, radix: Option<u32>) -> f64 {
    let src = src.trim_start();
    if src.is_empty() {
        return f64::NAN;
    }

    let bytes = src.as_bytes();
    let mut i = 0usize;
    let negative = if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
        bytes[0] == b'-'
    } else {
        false
    };

    let has_hex_prefix = |rest: &str| rest.starts_with("0x") || rest.starts_with("0X");
    let radix = match radix {
        None | Some(0) => {
            if has_hex_prefix(&src[i..]) {
                i += 2;
                16
            } else {
                10
            }
        }
        Some(radix) if (2..=36).contains(&radix) => {
            if radix == 16 && has_hex_prefix(&src[i..]) {
                i += 2;
            }
            radix
        }
        Some(_) => return f64::NAN,
    };

    let mut parsed_any = false;
    let mut value = 0.0f64;
    for ch in src[i..].chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        parsed_any = true;
        value = value * f64::from(radix) + f64::from(digit);
    }

    if !parsed_any {
        return f64::NAN;
    }
    if negative { -value } else { value }
}

/// `parseFloat(src)`: parses the longest decimal prefix.
pub fn parse_float(src: &str) -> f64 {
    let src = src.trim_start();
    let bytes = src.as_bytes();
    let mut i = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    if src[i..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut digits = 0usize;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        digits += 1;
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            digits += 1;
            i += 1;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let exp_start = i;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let mut exp_digits = 0usize;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            exp_digits += 1;
            i += 1;
        }
        if exp_digits == 0 {
            i = exp_start;
        }
    }

    src[..i].parse::<f64>().unwrap_or(f64::NAN)
}

/// Default number-to-string conversion: shortest round-trip digits, with
/// exponent notation at or above `1e21` and below `1e-6`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        return normalize_exponential_string(&format!("{value:e}"));
    }
    format!("{value}")
}

fn normalize_exponential_string(raw: &str) -> String {
    let Some(exp_idx) = raw.find('e') else {
        return raw.to_string();
    };
    let mantissa = &raw[..exp_idx];
    let exponent = raw[exp_idx + 1..].parse::<i32>().unwrap_or(0);
    format!("{mantissa}e{exponent:+}")
}
