//! printf-style conversion specs for writing values, e.g. `%.18e` or `%g`.

use std::fmt::{self, Display, Formatter, Write};
use std::iter::Peekable;
use std::str::{Chars, FromStr};
use thiserror::Error;

/// Largest accepted width or precision.
pub const MAX_FIELD: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format spec {0:?} must start with '%'")]
    MissingPercent(String),
    #[error("format spec {0:?} has no conversion character")]
    MissingConversion(String),
    #[error("unsupported conversion '{conv}' in format spec {spec:?}")]
    UnknownConversion { conv: char, spec: String },
    #[error("unexpected trailing characters in format spec {0:?}")]
    Trailing(String),
    #[error("width or precision in format spec {0:?} exceeds {max}", max = MAX_FIELD)]
    TooLarge(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    /// `e` / `E`
    Exponent,
    /// `f` / `F`
    Fixed,
    /// `g` / `G`
    General,
}

/// A numeric conversion spec: `%[flags][width][.precision]conv`.
///
/// Supported conversions are `e`, `f` and `g` (and their upper-case forms),
/// with the `-`, `+`, space, `0` and `#` flags. Exponents are written with a
/// sign and at least two digits (`1.5e+00`), and non-finite values as `nan`,
/// `inf` or `-inf`.
///
/// ```
/// use ts_text::NumberFormat;
///
/// let fmt: NumberFormat = "%.1f".parse().unwrap();
/// assert_eq!(fmt.format(2.0), "2.0");
/// assert_eq!(NumberFormat::default().format(1.0), "1.000000000000000000e+00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    conv: Conversion,
    upper: bool,
    precision: Option<usize>,
    width: usize,
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
}

impl Default for NumberFormat {
    /// `%.18e`: enough significant digits to round-trip an `f64`.
    fn default() -> Self {
        Self::exponent(18)
    }
}

impl NumberFormat {
    fn new(conv: Conversion, precision: Option<usize>) -> Self {
        Self {
            conv,
            upper: false,
            precision,
            width: 0,
            left: false,
            plus: false,
            space: false,
            zero: false,
            alt: false,
        }
    }

    /// `%.{precision}e`, with `precision` clamped to [`MAX_FIELD`].
    pub fn exponent(precision: usize) -> Self {
        Self::new(Conversion::Exponent, Some(precision.min(MAX_FIELD)))
    }

    /// `%.{precision}f`, with `precision` clamped to [`MAX_FIELD`].
    pub fn fixed(precision: usize) -> Self {
        Self::new(Conversion::Fixed, Some(precision.min(MAX_FIELD)))
    }

    /// `%g`
    pub fn general() -> Self {
        Self::new(Conversion::General, None)
    }

    /// Formats a single value.
    pub fn format(&self, value: f64) -> String {
        let mut out = String::new();
        self.write_to(&mut out, value);
        out
    }

    /// Appends the formatted value to `out`.
    pub fn write_to(&self, out: &mut String, value: f64) {
        let body = if value.is_nan() {
            self.case("nan")
        } else if value.is_infinite() {
            self.case("inf")
        } else {
            let abs = value.abs();
            let precision = self.precision.unwrap_or(6);
            let body = match self.conv {
                Conversion::Exponent => exponent_body(abs, precision, self.alt),
                Conversion::Fixed => fixed_body(abs, precision, self.alt),
                Conversion::General => general_body(abs, precision, self.alt),
            };
            self.case(&body)
        };

        let sign = if !value.is_nan() && value.is_sign_negative() {
            "-"
        } else if self.plus {
            "+"
        } else if self.space {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.len();
        let pad = self.width.saturating_sub(len);
        if self.left {
            out.push_str(sign);
            out.push_str(&body);
            out.extend(std::iter::repeat_n(' ', pad));
        } else if self.zero && value.is_finite() {
            out.push_str(sign);
            out.extend(std::iter::repeat_n('0', pad));
            out.push_str(&body);
        } else {
            out.extend(std::iter::repeat_n(' ', pad));
            out.push_str(sign);
            out.push_str(&body);
        }
    }

    fn case(&self, body: &str) -> String {
        if self.upper {
            body.to_ascii_uppercase()
        } else {
            body.to_owned()
        }
    }
}

/// `d.ddde±XX` for a non-negative finite value.
fn exponent_body(abs: f64, precision: usize, alt: bool) -> String {
    let (mantissa, exp) = split_exponent(abs, precision);
    let mut body = mantissa;
    if alt && precision == 0 {
        body.push('.');
    }
    push_exponent(&mut body, exp);
    body
}

fn fixed_body(abs: f64, precision: usize, alt: bool) -> String {
    let mut body = format!("{:.*}", precision, abs);
    if alt && precision == 0 {
        body.push('.');
    }
    body
}

/// C `%g`: the shorter of `%e` and `%f` for the requested significant digits,
/// without trailing zeros unless `#` is given.
fn general_body(abs: f64, precision: usize, alt: bool) -> String {
    let p = precision.max(1);
    let (_, exp) = split_exponent(abs, p - 1);
    if exp < p as i32 && exp >= -4 {
        let mut body = format!("{:.*}", (p as i32 - 1 - exp) as usize, abs);
        if !alt {
            strip_fraction_zeros(&mut body);
        }
        body
    } else {
        let (mut mantissa, exp) = split_exponent(abs, p - 1);
        if !alt {
            strip_fraction_zeros(&mut mantissa);
        }
        push_exponent(&mut mantissa, exp);
        mantissa
    }
}

/// Rounds to `precision` fractional mantissa digits and splits off the decimal exponent.
fn split_exponent(abs: f64, precision: usize) -> (String, i32) {
    let formatted = format!("{:.*e}", precision, abs);
    match formatted.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_owned(), exp.parse().unwrap_or(0)),
        None => (formatted, 0),
    }
}

fn push_exponent(body: &mut String, exp: i32) {
    let sign = if exp < 0 { '-' } else { '+' };
    // writing into a String cannot fail
    let _ = write!(body, "e{}{:02}", sign, exp.abs());
}

fn strip_fraction_zeros(body: &mut String) {
    if body.contains('.') {
        let trimmed = body.trim_end_matches('0').trim_end_matches('.').len();
        body.truncate(trimmed);
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let rest = spec
            .strip_prefix('%')
            .ok_or_else(|| FormatError::MissingPercent(spec.to_owned()))?;
        let mut chars = rest.chars().peekable();
        let mut fmt = Self::new(Conversion::General, None);

        while let Some(&c) = chars.peek() {
            match c {
                '-' => fmt.left = true,
                '+' => fmt.plus = true,
                ' ' => fmt.space = true,
                '0' => fmt.zero = true,
                '#' => fmt.alt = true,
                _ => break,
            }
            chars.next();
        }

        fmt.width = parse_field(&mut chars, spec)?;
        if chars.peek() == Some(&'.') {
            chars.next();
            fmt.precision = Some(parse_field(&mut chars, spec)?);
        }

        let conv = chars
            .next()
            .ok_or_else(|| FormatError::MissingConversion(spec.to_owned()))?;
        (fmt.conv, fmt.upper) = match conv {
            'e' => (Conversion::Exponent, false),
            'E' => (Conversion::Exponent, true),
            'f' => (Conversion::Fixed, false),
            'F' => (Conversion::Fixed, true),
            'g' => (Conversion::General, false),
            'G' => (Conversion::General, true),
            other => {
                return Err(FormatError::UnknownConversion {
                    conv: other,
                    spec: spec.to_owned(),
                });
            }
        };
        if chars.next().is_some() {
            return Err(FormatError::Trailing(spec.to_owned()));
        }
        Ok(fmt)
    }
}

/// Reads a run of decimal digits, rejecting values above [`MAX_FIELD`].
fn parse_field(chars: &mut Peekable<Chars<'_>>, spec: &str) -> Result<usize, FormatError> {
    let mut value = 0usize;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .filter(|v| *v <= MAX_FIELD)
            .ok_or_else(|| FormatError::TooLarge(spec.to_owned()))?;
        chars.next();
    }
    Ok(value)
}

impl Display for NumberFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_char('%')?;
        for (set, flag) in [
            (self.left, '-'),
            (self.plus, '+'),
            (self.space, ' '),
            (self.zero, '0'),
            (self.alt, '#'),
        ] {
            if set {
                f.write_char(flag)?;
            }
        }
        if self.width > 0 {
            write!(f, "{}", self.width)?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{}", p)?;
        }
        let conv = match self.conv {
            Conversion::Exponent => 'e',
            Conversion::Fixed => 'f',
            Conversion::General => 'g',
        };
        f.write_char(if self.upper { conv.to_ascii_uppercase() } else { conv })
    }
}
