//! Ranges de threshold no formato Nagios.
//!
//! ```text
//! spec  := ["@"] range
//! range := [start] ":" [end] | value
//! ```
//!
//! | Spec      | Região aceitável  | Alerta quando        |
//! |-----------|-------------------|----------------------|
//! | `30`      | `[0, 30]`         | `v < 0` ou `v > 30`  |
//! | `10:`     | `[10, +∞)`        | `v < 10`             |
//! | `:30`     | `(-∞, 30]`        | `v > 30`             |
//! | `~:30`    | `(-∞, 30]`        | `v > 30`             |
//! | `10:30`   | `[10, 30]`        | fora de `[10, 30]`   |
//! | `@10:30`  | `[10, 30]`        | dentro de `[10, 30]` |
//!
//! Spec vazio nunca alerta.

use crate::error::{CheckError, Result};
use std::fmt;

/// Intervalo numérico parseado de um spec de threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub start: f64,
    pub end: f64,
    pub start_inclusive: bool,
    pub end_inclusive: bool,
    /// Alerta quando o valor cai DENTRO do intervalo.
    pub invert: bool,
}

impl Range {
    /// Range que aceita qualquer valor.
    pub fn unbounded() -> Self {
        Self {
            start: f64::NEG_INFINITY,
            end: f64::INFINITY,
            start_inclusive: true,
            end_inclusive: true,
            invert: false,
        }
    }

    /// Parseia um spec de threshold.
    pub fn parse(spec: &str) -> Result<Self> {
        let trimmed = spec.trim();
        let (invert, body) = match trimmed.strip_prefix('@') {
            Some(rest) => (true, rest.trim()),
            None => (false, trimmed),
        };

        if body.is_empty() {
            if invert {
                return Err(CheckError::parse(spec, "range vazio após '@'"));
            }
            return Ok(Self::unbounded());
        }

        let (start, end) = match body.split_once(':') {
            Some((start, end)) => {
                if end.contains(':') {
                    return Err(CheckError::parse(spec, "mais de um ':'"));
                }
                let start = match start.trim() {
                    "" | "~" => f64::NEG_INFINITY,
                    s => parse_bound(spec, s)?,
                };
                let end = match end.trim() {
                    "" => f64::INFINITY,
                    e => parse_bound(spec, e)?,
                };
                (start, end)
            }
            None => (0.0, parse_bound(spec, body)?),
        };

        if start > end {
            return Err(CheckError::parse(
                spec,
                format!("início {start} maior que fim {end}"),
            ));
        }

        Ok(Self {
            start,
            end,
            start_inclusive: true,
            end_inclusive: true,
            invert,
        })
    }

    /// `true` se o valor deve gerar alerta.
    pub fn evaluate(&self, value: f64) -> bool {
        let inside = self.contains(value);
        if self.invert { inside } else { !inside }
    }

    fn contains(&self, value: f64) -> bool {
        let after_start = if self.start_inclusive {
            value >= self.start
        } else {
            value > self.start
        };
        let before_end = if self.end_inclusive {
            value <= self.end
        } else {
            value < self.end
        };
        after_start && before_end
    }

    /// Descrição curta da violação, usada no resumo do check.
    pub fn violation(&self) -> String {
        if self.invert {
            format!("inside range {self}")
        } else {
            format!("outside range {self}")
        }
    }
}

fn parse_bound(spec: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .map_err(|_| CheckError::parse(spec, format!("'{raw}' não é numérico")))?;
    if value.is_nan() {
        return Err(CheckError::parse(spec, "NaN não é um limite válido"));
    }
    Ok(value)
}

impl fmt::Display for Range {
    /// Forma canônica, aceita de volta por [`Range::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.invert {
            f.write_str("@")?;
        }
        if self.start == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else if self.start != 0.0 || self.end == f64::INFINITY {
            write!(f, "{}:", self.start)?;
        }
        if self.end != f64::INFINITY {
            write!(f, "{}", self.end)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Range {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_range_alerts_outside_only() {
        let r = Range::parse("10:30").unwrap();
        for v in [10.0, 10.5, 22.5, 29.99, 30.0] {
            assert!(!r.evaluate(v), "{v} não deveria alertar");
        }
        for v in [-1.0, 9.99, 30.01, 1e9] {
            assert!(r.evaluate(v), "{v} deveria alertar");
        }
    }

    #[test]
    fn inverted_range_alerts_inside() {
        let r = Range::parse("@10:30").unwrap();
        assert!(r.evaluate(10.0));
        assert!(r.evaluate(20.0));
        assert!(r.evaluate(30.0));
        assert!(!r.evaluate(9.0));
        assert!(!r.evaluate(31.0));
    }

    #[test]
    fn bare_value_means_zero_to_value() {
        assert_eq!(Range::parse("25").unwrap(), Range::parse("0:25").unwrap());
        let r = Range::parse("25").unwrap();
        assert!(r.evaluate(-0.5));
        assert!(!r.evaluate(0.0));
        assert!(r.evaluate(25.1));
    }

    #[test]
    fn open_ended_ranges() {
        let lower = Range::parse("10:").unwrap();
        assert_eq!(lower.end, f64::INFINITY);
        assert!(lower.evaluate(9.0));
        assert!(!lower.evaluate(1e12));

        let upper = Range::parse(":30").unwrap();
        assert_eq!(upper.start, f64::NEG_INFINITY);
        assert!(!upper.evaluate(-1e12));
        assert!(upper.evaluate(30.5));

        assert_eq!(Range::parse("~:30").unwrap(), upper);
    }

    #[test]
    fn empty_spec_never_alerts() {
        let r = Range::parse("").unwrap();
        assert!(!r.evaluate(f64::MAX));
        assert!(!r.evaluate(f64::MIN));
        assert!(!Range::parse("   ").unwrap().evaluate(0.0));
    }

    #[test]
    fn rejects_start_greater_than_end() {
        assert!(matches!(Range::parse("5:1"), Err(CheckError::Parse { .. })));
        assert!(matches!(Range::parse("-5"), Err(CheckError::Parse { .. })));
    }

    #[test]
    fn rejects_non_numeric_bounds() {
        for spec in ["abc", "10:x", "y:10", "1:2:3", "NaN", "@"] {
            assert!(
                matches!(Range::parse(spec), Err(CheckError::Parse { .. })),
                "'{spec}' deveria falhar"
            );
        }
    }

    #[test]
    fn negative_and_fractional_bounds() {
        let r = Range::parse("-10.5:-2").unwrap();
        assert!(!r.evaluate(-5.0));
        assert!(r.evaluate(0.0));
    }

    #[test]
    fn display_is_canonical() {
        for spec in ["10:30", "@10:30", "~:5", "10:", "0:", "22.5", "-3:4.25"] {
            assert_eq!(Range::parse(spec).unwrap().to_string(), spec);
        }
        assert_eq!(Range::parse("0:30").unwrap().to_string(), "30");
        assert_eq!(Range::parse(":30").unwrap().to_string(), "~:30");
        assert_eq!(Range::parse(" 10 : 30 ").unwrap().to_string(), "10:30");
        assert_eq!("@~:0".parse::<Range>().unwrap().to_string(), "@~:0");
    }

    #[test]
    fn violation_hint() {
        assert_eq!(
            Range::parse("10:30").unwrap().violation(),
            "outside range 10:30"
        );
        assert_eq!(
            Range::parse("@10:30").unwrap().violation(),
            "inside range @10:30"
        );
    }
}
