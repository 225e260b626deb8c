//! Lenient number reading for text taken off the page.
//!
//! Page text is read the way browser scripts read it: leading whitespace is
//! skipped, the longest numeric prefix is used and trailing text ("3 items",
//! `72"`, `183cm`) is ignored.

/// Integer prefix of `text`, like `parseInt(text, 10)` (with `0x` hex).
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Decimal prefix of `text`, like `parseFloat(text)`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -inf } else { inf });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-') | Some(b'+')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Round to the nearest integer, halves toward positive infinity
/// (`Math.round`).
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// `Number.prototype.toString` for plain magnitudes: non-finite values are
/// spelled out and negative zero prints as `0`.
pub fn number_to_string(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if x == 0.0 {
        "0".to_string()
    } else {
        x.to_string()
    }
}

/// One decimal place, as `Number.prototype.toFixed(1)` prints it.
pub fn to_fixed_1(x: f64) -> String {
    if !x.is_finite() {
        return number_to_string(x);
    }
    let sign = if x < 0.0 { "-" } else { "" };
    let abs = x.abs();
    let tenths = abs * 10.0;
    // `{:.1}` rounds exact ties to even; toFixed rounds them away from zero.
    if tenths.fract() == 0.5 && abs.mul_add(10.0, -tenths) == 0.0 {
        return format!("{}{:.1}", sign, (tenths + 0.5) / 10.0);
    }
    format!("{}{:.1}", sign, abs)
}
