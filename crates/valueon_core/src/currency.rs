//! Korean won amounts: parsing user input like `"1억 5000만"` and formatting
//! totals the way Korean real-estate documents print them.

const JO: f64 = 1_000_000_000_000.0;
const EOK: f64 = 100_000_000.0;
const MAN: f64 = 10_000.0;

/// Parse a Korean money expression into won.
///
/// Plain numbers (`"1,500,000"`, `"2.5"`) parse directly. Otherwise digits are
/// read as coefficients of the following unit: 십/백/천 build up a group which
/// is then scaled by 만/억/조. A unit with no coefficient counts as 1 (`"만원"`
/// is 10,000), `원` is ignored and trailing digits are added as won.
/// Unparseable input yields 0.
pub fn parse_korean_money(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }

    let (negative, body) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    if let Ok(value) = body.parse::<f64>() {
        if value.is_finite() {
            return if negative { -value } else { value };
        }
    }

    let mut total = 0.0;
    let mut group = 0.0;
    let mut digits = String::new();

    for ch in body.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            digits.push(ch);
            continue;
        }

        let coefficient = take_number(&mut digits);
        match ch {
            '십' => group += coefficient.unwrap_or(1.0) * 10.0,
            '백' => group += coefficient.unwrap_or(1.0) * 100.0,
            '천' => group += coefficient.unwrap_or(1.0) * 1_000.0,
            '만' | '억' | '조' => {
                let unit = match ch {
                    '만' => MAN,
                    '억' => EOK,
                    _ => JO,
                };
                group += coefficient.unwrap_or(0.0);
                if group == 0.0 {
                    group = 1.0;
                }
                total += group * unit;
                group = 0.0;
            }
            _ => {
                // 원 and anything unrecognised
                if let Some(value) = coefficient {
                    group += value;
                }
            }
        }
    }

    total += group + take_number(&mut digits).unwrap_or(0.0);
    if negative {
        -total
    } else {
        total
    }
}

fn take_number(digits: &mut String) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<f64>().ok().filter(|v| v.is_finite());
    digits.clear();
    value
}

/// Format an amount in won as `"1조 2,345억 6,789만 1,234"`.
///
/// Fractions of a won are rounded away and empty groups are skipped, so
/// 150,000,000 prints as `"1억 5,000만"`.
pub fn format_korean_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let rounded = amount.round();
    if rounded == 0.0 {
        return "0".to_string();
    }

    let mut remaining = rounded.abs() as u64;
    let mut parts = Vec::new();
    for (unit, value) in [("조", 1_000_000_000_000u64), ("억", 100_000_000), ("만", 10_000), ("", 1)] {
        let coefficient = remaining / value;
        if coefficient > 0 {
            parts.push(format!("{}{}", group_thousands(coefficient), unit));
            remaining %= value;
        }
    }

    let body = parts.join(" ");
    if rounded < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Insert thousands separators: 1234567 → "1,234,567".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
