//! Number formatting for the detail views.
//!
//! Rounding is half away from zero on the decimal digits, so `20.125` with
//! two digits is `20.13`.

/// Fraction digits of the exact decimal expansion of any `f64`.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Fixed-point text with exactly `digits` fraction digits, rounded half away
/// from zero on the exact value of `value`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = round_half_up(&exact, digits);
    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&int_part);
    if digits > 0 {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Round a non-negative plain decimal string to `digits` fraction digits.
/// Returns the integer digits and exactly `digits` fraction digits.
fn round_half_up(decimal: &str, digits: usize) -> (String, String) {
    let (int_part, frac_part) = decimal.split_once('.').unwrap_or((decimal, ""));
    let mut kept: Vec<u8> = int_part.bytes().collect();
    let frac = frac_part.as_bytes();
    kept.extend((0..digits).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(digits).is_some_and(|&d| d >= b'5') {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let split = kept.len() - digits;
    let int_digits = String::from_utf8_lossy(&kept[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&kept[split..]).into_owned();
    (int_digits, frac_digits)
}

/// Format like a US-locale number display: comma thousands separators, at
/// most `max_fraction` fraction digits, trailing zeros dropped.
///
/// Rounds the shortest round-trip digits of `value`, the way locale number
/// formatting does. `54561458.2348` with 3 digits becomes `54,561,458.235`.
pub fn group_thousands(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return to_fixed(value, 0);
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = round_half_up(&shortest, max_fraction);
    let int_part = int_part.as_str();
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 2);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Distance in kilometers as shown in the panels, e.g. `1,234.5 km`.
pub fn kilometers(value: f64) -> String {
    format!("{} km", group_thousands(value, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_and_rounds() {
        assert_eq!(group_thousands(54_561_458.2348, 3), "54,561,458.235");
        assert_eq!(group_thousands(1234.5, 3), "1,234.5");
        assert_eq!(group_thousands(999.0, 3), "999");
        assert_eq!(group_thousands(1000.0, 3), "1,000");
        assert_eq!(group_thousands(0.0004, 3), "0");
        assert_eq!(group_thousands(-1_234_567.891, 2), "-1,234,567.89");
    }

    #[test]
    fn rounding_can_carry_into_new_group() {
        assert_eq!(group_thousands(999_999.9999, 3), "1,000,000");
    }

    #[test]
    fn to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(6.25, 1), "6.3");
        assert_eq!(to_fixed(20.125, 2), "20.13");
        assert_eq!(to_fixed(-20.125, 2), "-20.13");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn to_fixed_uses_exact_binary_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(0.1, 20), "0.10000000000000000555");
    }

    #[test]
    fn to_fixed_pads_and_carries() {
        assert_eq!(to_fixed(3.0, 2), "3.00");
        assert_eq!(to_fixed(9.9996, 3), "10.000");
        assert_eq!(to_fixed(485.5, 0), "486");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
    }

    #[test]
    fn grouping_rounds_ties_up() {
        assert_eq!(group_thousands(1234.0625, 3), "1,234.063");
        assert_eq!(group_thousands(0.0005, 3), "0.001");
    }

    #[test]
    fn kilometers_suffix() {
        assert_eq!(kilometers(384_400.0), "384,400 km");
    }
}
