//! Withdrawal amounts as typed into the form. The text is read like a number
//! field: leading whitespace, an optional sign, decimal digits with an optional
//! exponent, and anything after the number is ignored.

/// Units per dollar (7 decimal places).
pub(crate) const AMOUNT_SCALE: i128 = 10_000_000;
const UNITS_PER_CENT: i128 = AMOUNT_SCALE / 100;
/// Significant digits kept; later digits only mark the amount inexact.
const MAX_DIGITS: u32 = 36;
const MAX_EXPONENT: i32 = 1_000;

/// A positive amount, exact to `1 / AMOUNT_SCALE` dollars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Amount {
    units: i128,
    /// Non-zero digits below one unit were dropped.
    inexact: bool,
}

#[derive(Default)]
struct Decimal {
    mantissa: i128,
    significant: u32,
    exponent: i32,
    inexact: bool,
}

impl Decimal {
    fn push(&mut self, digit: u8, fraction: bool) {
        if self.significant < MAX_DIGITS {
            self.mantissa = self.mantissa * 10 + i128::from(digit);
            if self.mantissa != 0 {
                self.significant += 1;
            }
            if fraction {
                self.exponent -= 1;
            }
        } else {
            self.inexact |= digit != 0;
            if !fraction {
                self.exponent += 1;
            }
        }
    }
}

fn digit_at(bytes: &[u8], pos: usize) -> Option<u8> {
    bytes
        .get(pos)
        .filter(|b| b.is_ascii_digit())
        .map(|b| b - b'0')
}

impl Amount {
    /// `None` unless `input` starts with a positive number. Amounts beyond
    /// `i128` units are refused as well.
    pub fn parse(input: &str) -> Option<Self> {
        let bytes = input.trim_start().as_bytes();
        let mut pos = 0;
        let negative = match bytes.first() {
            Some(b'-') => {
                pos = 1;
                true
            }
            Some(b'+') => {
                pos = 1;
                false
            }
            _ => false,
        };

        let mut decimal = Decimal::default();
        let start = pos;
        while let Some(digit) = digit_at(bytes, pos) {
            decimal.push(digit, false);
            pos += 1;
        }
        let mut has_digits = pos > start;

        if bytes.get(pos) == Some(&b'.') {
            let fraction_start = pos + 1;
            let mut end = fraction_start;
            while let Some(digit) = digit_at(bytes, end) {
                decimal.push(digit, true);
                end += 1;
            }
            has_digits |= end > fraction_start;
            pos = end;
        }
        if !has_digits {
            return None;
        }

        // an exponent only counts when at least one digit follows it
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            let mut end = pos + 1;
            let exponent_negative = match bytes.get(end) {
                Some(b'-') => {
                    end += 1;
                    true
                }
                Some(b'+') => {
                    end += 1;
                    false
                }
                _ => false,
            };
            let digits_start = end;
            let mut exponent: i32 = 0;
            while let Some(digit) = digit_at(bytes, end) {
                exponent = (exponent * 10 + i32::from(digit)).min(MAX_EXPONENT);
                end += 1;
            }
            if end > digits_start {
                decimal.exponent += if exponent_negative {
                    -exponent
                } else {
                    exponent
                };
            }
        }

        if negative || decimal.mantissa == 0 {
            return None;
        }
        Self::scale(decimal)
    }

    fn scale(decimal: Decimal) -> Option<Self> {
        let shift = decimal.exponent + 7;
        if shift >= 0 {
            let units = 10i128
                .checked_pow(shift.unsigned_abs())?
                .checked_mul(decimal.mantissa)?;
            return Some(Self {
                units,
                inexact: decimal.inexact,
            });
        }

        match 10i128.checked_pow(shift.unsigned_abs()) {
            Some(divisor) => Some(Self {
                units: decimal.mantissa / divisor,
                inexact: decimal.inexact || decimal.mantissa % divisor != 0,
            }),
            // smaller than one unit
            None => Some(Self {
                units: 0,
                inexact: true,
            }),
        }
    }

    pub fn is_below_cents(&self, cents: i128) -> bool {
        match cents.checked_mul(UNITS_PER_CENT) {
            Some(limit) => self.units < limit,
            None => cents > 0,
        }
    }

    pub fn exceeds_cents(&self, cents: i128) -> bool {
        match cents.checked_mul(UNITS_PER_CENT) {
            Some(limit) => self.units > limit || (self.units == limit && self.inexact),
            None => cents < 0,
        }
    }

    /// Rounded half-up to the cent.
    pub fn to_cents(&self) -> i128 {
        let rest = self.units % UNITS_PER_CENT;
        self.units / UNITS_PER_CENT + i128::from(rest >= UNITS_PER_CENT / 2)
    }
}
