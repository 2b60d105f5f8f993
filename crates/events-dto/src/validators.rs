//! Pure predicates for the string fields carried by event DTOs.
//!
//! The date helpers mirror how a browser interprets date strings: anything
//! `Number()` would read as a number is refused outright, and the remaining
//! input is tried against the ISO-8601, RFC 2822 and `Date.prototype.toString`
//! shapes. Accepted dates are normalised to ISO-8601 UTC with millisecond
//! precision.
//!
//! Only four-digit years are accepted, so every normalised date is itself a
//! valid date string and fits a PostgreSQL `timestamptz`.

use std::sync::OnceLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use regex::Regex;

/// Earliest calendar year an accepted date may fall in.
pub const MIN_YEAR: i32 = 0;
/// Latest calendar year an accepted date may fall in.
pub const MAX_YEAR: i32 = 9999;

const LOCAL_PART_MAX: usize = 64;
const ADDRESS_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static TLD_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
        let label = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
        let pattern = format!(r"^{atom}(?:\.{atom})*@{label}(?:\.{label})*$");
        Regex::new(&pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn tld_regex() -> &'static Regex {
    TLD_RE.get_or_init(|| {
        Regex::new(r".+\.[a-zA-Z]+$")
            .unwrap_or_else(|error| panic!("tld regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` is a well-formed address with a letters-only
/// top-level domain.
///
/// The general grammar alone accepts `user@localhost`; the extra suffix check
/// rejects addresses without a dotted, alphabetic TLD.
///
/// # Examples
/// ```
/// use events_dto::validators::is_email;
///
/// assert!(is_email("abc@abc.com"));
/// assert!(!is_email("abc@abc"));
/// assert!(!is_email("abc@abc.123"));
/// ```
pub fn is_email(value: &str) -> bool {
    let Some((local, _domain)) = value.rsplit_once('@') else {
        return false;
    };
    if local.len() > LOCAL_PART_MAX || value.len() > ADDRESS_MAX {
        return false;
    }
    email_regex().is_match(value) && tld_regex().is_match(value)
}

/// Interpret `value` the way ECMAScript `Number(value)` does.
///
/// Returns `None` where JavaScript would produce `NaN`. Blank input yields
/// `Some(0.0)`, matching the language.
pub fn parse_js_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some(parsed) = parse_radix_literal(trimmed) {
        return Some(parsed);
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else if is_decimal_literal(unsigned) {
        unsigned.parse::<f64>().ok()?
    } else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_radix_literal(value: &str) -> Option<f64> {
    let (radix, digits) = if let Some(rest) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        (16, rest)
    } else if let Some(rest) = value.strip_prefix("0o").or_else(|| value.strip_prefix("0O")) {
        (8, rest)
    } else if let Some(rest) = value.strip_prefix("0b").or_else(|| value.strip_prefix("0B")) {
        (2, rest)
    } else {
        return None;
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
    })
}

fn is_decimal_literal(value: &str) -> bool {
    let (mantissa, exponent) = match value.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (value, None),
    };

    let (integral, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if integral.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integral) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(raw) => {
            let digits = raw
                .strip_prefix('+')
                .or_else(|| raw.strip_prefix('-'))
                .unwrap_or(raw);
            !digits.is_empty() && all_digits(digits)
        }
    }
}

/// Return `true` when ECMAScript would read `value` as a number.
///
/// # Examples
/// ```
/// use events_dto::validators::is_numeric_string;
///
/// assert!(is_numeric_string("123"));
/// assert!(is_numeric_string(""));
/// assert!(!is_numeric_string("aaaa"));
/// ```
pub fn is_numeric_string(value: &str) -> bool {
    parse_js_number(value).is_some()
}

/// Return `true` when `date` holds an instant whose UTC year lies in
/// [`MIN_YEAR`]`..=`[`MAX_YEAR`].
///
/// Years outside that range have no four-digit ISO-8601 rendering.
pub fn is_valid_date(date: Option<DateTime<Utc>>) -> bool {
    date.is_some_and(|instant| (MIN_YEAR..=MAX_YEAR).contains(&instant.year()))
}

/// Return `true` when `value` is a non-numeric string that parses to a valid
/// date.
///
/// Numeric strings are rejected first because permissive date parsers read
/// them as years or epoch offsets.
///
/// # Examples
/// ```
/// use events_dto::validators::is_valid_date_string;
///
/// assert!(is_valid_date_string("2022-04-10T18:00:00.000Z"));
/// assert!(is_valid_date_string("Sat Apr 09 2022 21:42:30 GMT+0200"));
/// assert!(!is_valid_date_string("123"));
/// assert!(!is_valid_date_string(""));
/// ```
pub fn is_valid_date_string(value: &str) -> bool {
    if is_numeric_string(value) {
        return false;
    }
    is_valid_date(parse_date(value))
}

/// Render a UTC instant as ISO-8601 with milliseconds and a `Z` suffix.
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Canonicalise a date string, returning `None` for anything
/// [`is_valid_date_string`] rejects.
///
/// # Examples
/// ```
/// use events_dto::validators::normalize_date;
///
/// assert_eq!(
///     normalize_date("Sat Apr 09 2022 21:42:30 GMT+0200").as_deref(),
///     Some("2022-04-09T19:42:30.000Z")
/// );
/// ```
pub fn normalize_date(value: &str) -> Option<String> {
    if is_numeric_string(value) {
        return None;
    }
    parse_date(value)
        .filter(|instant| is_valid_date(Some(*instant)))
        .map(|instant| to_iso_string(&instant))
}

const WEEKDAYS: [&str; 17] = [
    "sun", "sunday", "mon", "monday", "tue", "tues", "tuesday", "wed", "wednesday", "thu",
    "thur", "thurs", "thursday", "fri", "friday", "sat", "saturday",
];

const ZONED_FORMATS: [&str; 4] = [
    "%b %d %Y %H:%M:%S GMT%z",
    "%b %d %Y %H:%M GMT%z",
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M %z",
];

const NAIVE_DATE_TIME_FORMATS: [&str; 10] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%b %d %Y %H:%M:%S",
    "%b %d %Y %H:%M:%S GMT",
    "%d %b %Y %H:%M:%S GMT",
    "%d %b %Y %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%b %d %Y", "%d %b %Y", "%Y/%m/%d"];

/// Parse the date shapes a browser `Date` constructor accepts.
///
/// A leading weekday is ignored and never checked against the calendar date,
/// and a trailing parenthesised zone name is dropped. Strings without an
/// offset are read as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    let candidate = strip_weekday(strip_zone_name(trimmed));
    parse_zoned(candidate)
        .or_else(|| parse_naive_date_time(candidate))
        .or_else(|| parse_naive_date(candidate))
}

fn parse_zoned(value: &str) -> Option<DateTime<Utc>> {
    ZONED_FORMATS.iter().find_map(|format| {
        DateTime::<FixedOffset>::parse_from_str(value, format)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    })
}

fn parse_naive_date_time(value: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATE_TIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|parsed| parsed.and_utc())
    })
}

fn parse_naive_date(value: &str) -> Option<DateTime<Utc>> {
    NAIVE_DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(value, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    })
}

fn strip_zone_name(value: &str) -> &str {
    if !value.ends_with(')') {
        return value;
    }
    value
        .rsplit_once('(')
        .map_or(value, |(head, _zone)| head.trim_end())
}

fn strip_weekday(value: &str) -> &str {
    let Some((head, rest)) = value.split_once([' ', ',']) else {
        return value;
    };
    let lowered = head.to_ascii_lowercase();
    if WEEKDAYS.contains(&lowered.as_str()) {
        rest.trim_start_matches([' ', ','])
    } else {
        value
    }
}
