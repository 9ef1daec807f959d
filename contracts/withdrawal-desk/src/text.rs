//! Fixed-buffer text helpers. Contract code has no allocator, so every string
//! that needs inspecting or formatting goes through a stack buffer.

use core::fmt::{self, Write};
use soroban_sdk::{Env, String};

use crate::{
    amount::Amount,
    storage_types::{AccountType, FEE_RATE_SCALE},
};

pub(crate) const MAX_EMAIL_LEN: usize = 254;
pub(crate) const MAX_NAME_LEN: usize = 128;
const MAX_AMOUNT_LEN: usize = 128;
const MAX_ACCOUNT_LEN: usize = 32;
const DATE_LEN: usize = 40;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) struct TextBuf<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuf<N> {
    pub fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    pub fn as_str(&self) -> &str {
        // only whole `&str` fragments are ever written
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn to_soroban(&self, e: &Env) -> String {
        String::from_str(e, self.as_str())
    }
}

impl<const N: usize> Write for TextBuf<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Copies `s` into `buf`; `None` when it does not fit or is not UTF-8.
pub(crate) fn read_str<'a>(s: &String, buf: &'a mut [u8]) -> Option<&'a str> {
    let len = s.len() as usize;
    if len > buf.len() {
        return None;
    }
    s.copy_into_slice(&mut buf[..len]);
    core::str::from_utf8(&buf[..len]).ok()
}

/// Cents rendered as `12.50`.
pub(crate) struct Dollars(pub i128);

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// Lowercases the address like JavaScript `toLowerCase`, except that a final
/// capital sigma becomes `σ`. `None` for an empty, oversized or non-UTF-8 address.
pub(crate) fn normalize_email(e: &Env, email: &String) -> Option<String> {
    let mut buf = [0u8; MAX_EMAIL_LEN];
    let raw = read_str(email, &mut buf)?;
    if raw.is_empty() {
        return None;
    }
    // lowercasing grows a character by at most half its encoded length
    let mut out = TextBuf::<{ 2 * MAX_EMAIL_LEN }>::new();
    for c in raw.chars().flat_map(char::to_lowercase) {
        out.write_char(c).ok()?;
    }
    Some(out.to_soroban(e))
}

pub(crate) fn is_valid_email(email: &String) -> bool {
    let mut buf = [0u8; MAX_EMAIL_LEN];
    match read_str(email, &mut buf) {
        Some(s) => !s.is_empty() && s.contains('@'),
        None => false,
    }
}

pub(crate) fn parse_amount(amount: &String) -> Option<Amount> {
    let mut buf = [0u8; MAX_AMOUNT_LEN];
    Amount::parse(read_str(amount, &mut buf)?)
}

pub(crate) fn parse_account_type(account: &String) -> Option<AccountType> {
    let mut buf = [0u8; MAX_ACCOUNT_LEN];
    AccountType::from_wire(read_str(account, &mut buf)?)
}

/// Proleptic Gregorian (year, month, day) of a unix timestamp, UTC.
pub(crate) fn civil_date(timestamp: u64) -> (u64, usize, u64) {
    let z = timestamp / 86_400 + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month as usize, day)
}

/// `October 16, 2026`
pub(crate) fn format_date(e: &Env, timestamp: u64) -> String {
    let (year, month, day) = civil_date(timestamp);
    // "September 30, " plus at most 20 digits of a u64 year
    let mut out = TextBuf::<DATE_LEN>::new();
    if write!(out, "{} {}, {}", MONTHS[month - 1], day, year).is_err() {
        return String::from_str(e, "");
    }
    out.to_soroban(e)
}

/// `10.0%` for a percentage rate, `Fixed` otherwise.
pub(crate) fn format_fee_label(e: &Env, fee_rate: i128) -> String {
    if fee_rate >= FEE_RATE_SCALE {
        return String::from_str(e, "Fixed");
    }
    let tenths = (fee_rate * 1_000 + FEE_RATE_SCALE / 2) / FEE_RATE_SCALE;
    // tenths <= 1000, so at most "100.0%"
    let mut out = TextBuf::<8>::new();
    if write!(out, "{}.{}%", tenths / 10, tenths % 10).is_err() {
        return String::from_str(e, "");
    }
    out.to_soroban(e)
}
