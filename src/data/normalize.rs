//! Conversion of SPSS/PASW number text into floats.
//!
//! SPSS/PASW writes small and large numbers as `<mantissa>E<exponent>`,
//! e.g. `16E005` for 1.6e6. The grammar accepted here is
//!
//! ```text
//! scientific := mantissa "E" exponent
//! mantissa   := any text that parses as a float and contains no 'e' or 'E'
//! exponent   := digit+
//! ```
//!
//! The exponent carries no sign. Text without an `E` is parsed as a plain float.
//! Anything else, and any non-finite result, is a format error.

use crate::error::Error;

/// Parses `<mantissa>E<exponent>` into `mantissa * 10^exponent`.
pub fn parse_scientific(s: &str) -> Result<f64, Error> {
    let format_error = || Error::Format(s.to_owned());
    let (mantissa, exponent) = s.split_once('E').ok_or_else(format_error)?;
    if mantissa.is_empty()
        || mantissa.contains(&['e', 'E'][..])
        || exponent.is_empty()
        || !exponent.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(format_error());
    }
    let mantissa: f64 = mantissa.parse().map_err(|_| format_error())?;
    let exponent: u32 = exponent.parse().map_err(|_| format_error())?;
    // repeated multiplication drifts from the nearest double above 10^22
    let scale: f64 = format!("1e{}", exponent)
        .parse()
        .map_err(|_| format_error())?;
    let value = mantissa * scale;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format_error())
    }
}

/// Normalizes a single value, trimming surrounding whitespace first.
pub fn normalize(s: &str) -> Result<f64, Error> {
    let s = s.trim();
    if s.contains('E') {
        return parse_scientific(s);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::Format(s.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, parse_scientific};
    use crate::error::Error;

    fn bits(s: &str) -> u64 {
        normalize(s).unwrap().to_bits()
    }

    #[test]
    fn spss_scientific_notation() {
        assert_eq!(normalize("16E005").unwrap(), 1600000.0);
        assert_eq!(bits("16E005"), (16.0f64 * 100000.0).to_bits());
        assert_eq!(bits("3E0"), 3.0f64.to_bits());
        assert_eq!(bits("25E12"), (25.0f64 * 1e12).to_bits());
        assert_eq!(bits("1.5E2"), 150.0f64.to_bits());
        assert_eq!(bits("-2E3"), (-2000.0f64).to_bits());
    }

    #[test]
    fn exponent_may_have_many_digits() {
        assert_eq!(bits("7E0000000003"), 7000.0f64.to_bits());
    }

    #[test]
    fn powers_of_ten_are_correctly_rounded() {
        assert_eq!(bits("1E33"), 1e33f64.to_bits());
        assert_eq!(bits("1E23"), 1e23f64.to_bits());
        assert_eq!(bits("1E308"), 1e308f64.to_bits());
        for m in [1.0f64, 3.0, 16.0, 7.5] {
            for e in 0..=308 {
                let expected = m * format!("1e{}", e).parse::<f64>().unwrap();
                if !expected.is_finite() {
                    continue;
                }
                assert_eq!(
                    bits(&format!("{}E{}", m, e)),
                    expected.to_bits(),
                    "{}E{}",
                    m,
                    e
                );
            }
        }
    }

    #[test]
    fn plain_floats_are_unchanged() {
        for s in ["0.1", "0.05", "2", "-1.25", "0", "1e-5"] {
            assert_eq!(bits(s), s.parse::<f64>().unwrap().to_bits());
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize(" 0.9 ").unwrap(), 0.9);
    }

    #[test]
    fn other_shapes_are_format_errors() {
        for s in [
            "E5", "5E", "5E-3", "5E+3", "1e2E3", "5E3E1", "xE2", "5E2.0", "abc", "", "A", "inf",
            "NaN", "1E999",
        ] {
            assert!(
                matches!(normalize(s), Err(Error::Format(_))),
                "'{}' should not normalize",
                s
            );
        }
    }

    #[test]
    fn scientific_requires_marker() {
        assert!(matches!(parse_scientific("1600000"), Err(Error::Format(_))));
    }
}
