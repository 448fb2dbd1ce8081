// Cell coercion and the elementwise arithmetic shared by the ratio stages.

// Number formats found in statement workbooks: "1,234,567", "(1,234)",
// "△1,234" (Japanese negative marker), "1.234,56" when the decimal
// separator is a comma.
pub mod number_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NumberFormat {
        pub decimal_separator: char,
        pub thousand_separator: Option<char>,
    }

    impl Default for NumberFormat {
        fn default() -> Self {
            NumberFormat {
                decimal_separator: '.',
                thousand_separator: Some(','),
            }
        }
    }

    // Strict parse; fails on anything that is not a finite number.
    pub fn parse_decimal(s: &str, format: &NumberFormat) -> Result<f64> {
        let trimmed = s.trim();
        let (negative, body) = if let Some(rest) = trimmed.strip_prefix(['△', '▲']) {
            (true, rest.trim())
        } else if let Some(inner) = trimmed.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
            (true, inner.trim())
        } else {
            (false, trimmed)
        };

        let mut normalized: String = body
            .chars()
            .filter(|c| Some(*c) != format.thousand_separator)
            .collect();
        if format.decimal_separator != '.' {
            normalized = normalized.replace(format.decimal_separator, ".");
        }

        let value = f64::from_str(&normalized)
            .map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))?;
        if !value.is_finite() {
            return Err(anyhow!("Decimal '{}' is not finite", s));
        }
        Ok(if negative { -value } else { value })
    }

    /// Lenient parse used at ingestion: blank or unparseable cells become 0.
    pub fn coerce_numeric(s: &str, format: &NumberFormat) -> f64 {
        parse_decimal(s, format).unwrap_or(0.0)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_decimal_with_thousands() {
            let fmt = NumberFormat::default();
            assert_eq!(parse_decimal("1,234,567", &fmt).unwrap(), 1234567.0);
            assert_eq!(parse_decimal(" 12.5 ", &fmt).unwrap(), 12.5);
        }

        #[test]
        fn test_parse_decimal_negative_markers() {
            let fmt = NumberFormat::default();
            assert_eq!(parse_decimal("△1,200", &fmt).unwrap(), -1200.0);
            assert_eq!(parse_decimal("▲30", &fmt).unwrap(), -30.0);
            assert_eq!(parse_decimal("(450)", &fmt).unwrap(), -450.0);
            assert_eq!(parse_decimal("-7", &fmt).unwrap(), -7.0);
        }

        #[test]
        fn test_parse_decimal_comma_decimal_separator() {
            let fmt = NumberFormat {
                decimal_separator: ',',
                thousand_separator: Some('.'),
            };
            assert_eq!(parse_decimal("1.234,56", &fmt).unwrap(), 1234.56);
        }

        #[test]
        fn test_parse_decimal_rejects_garbage() {
            let fmt = NumberFormat::default();
            assert!(parse_decimal("n/a", &fmt).is_err());
            assert!(parse_decimal("", &fmt).is_err());
            assert!(parse_decimal("inf", &fmt).is_err());
        }

        #[test]
        fn test_coerce_numeric_falls_back_to_zero() {
            let fmt = NumberFormat::default();
            assert_eq!(coerce_numeric("-", &fmt), 0.0);
            assert_eq!(coerce_numeric("", &fmt), 0.0);
            assert_eq!(coerce_numeric("NaN", &fmt), 0.0);
            assert_eq!(coerce_numeric("2,000", &fmt), 2000.0);
        }
    }
}

/// `num / den`, or `NaN` when the denominator is zero. NaN operands
/// propagate.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        f64::NAN
    } else {
        num / den
    }
}

/// `ratio` expressed as a percentage.
pub fn percent(num: f64, den: f64) -> f64 {
    ratio(num, den) * 100.0
}

/// Elementwise `percent` over two equally long series.
pub fn percent_series(num: &[f64], den: &[f64]) -> Vec<f64> {
    num.iter().zip(den).map(|(n, d)| percent(*n, *d)).collect()
}

/// Elementwise `ratio` over two equally long series.
pub fn ratio_series(num: &[f64], den: &[f64]) -> Vec<f64> {
    num.iter().zip(den).map(|(n, d)| ratio(*n, *d)).collect()
}

pub fn add_series(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x + y).collect()
}

pub fn sub_series(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

/// Year-over-year first difference; the first element is 0.
pub fn first_difference(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        out.push(if i == 0 { 0.0 } else { v - values[i - 1] });
    }
    out
}

/// Period-over-period change in percent. The first element is 0; so is a
/// change from 0 to 0. A change away from a zero base is undefined.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for (i, cur) in values.iter().enumerate() {
        if i == 0 {
            out.push(0.0);
            continue;
        }
        let prev = values[i - 1];
        if prev == 0.0 && *cur == 0.0 {
            out.push(0.0);
        } else {
            out.push(percent(cur - prev, prev));
        }
    }
    out
}
