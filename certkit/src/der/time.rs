use core::fmt;
use core::time::Duration;

use pki_types::UnixTime;

use super::Tag;
use crate::error::{EncodingError, Error};

/// A point in time, as whole seconds relative to 1970-01-01T00:00:00Z.
///
/// Unlike [`UnixTime`] this reaches back before the epoch: UTCTime alone
/// covers 1950 onwards, and GeneralizedTime goes back to year 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Time(i64);

impl Time {
    /// The time `secs` seconds after the epoch; negative is before it.
    pub const fn from_unix_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Seconds since the epoch, negative before it.
    pub const fn unix_secs(self) -> i64 {
        self.0
    }

    /// Convert to a [`UnixTime`], which cannot express times before the epoch.
    pub fn to_unix_time(self) -> Option<UnixTime> {
        let secs = u64::try_from(self.0).ok()?;
        Some(UnixTime::since_unix_epoch(Duration::from_secs(secs)))
    }
}

impl From<UnixTime> for Time {
    fn from(time: UnixTime) -> Self {
        Self(i64::try_from(time.as_secs()).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Time {
    /// RFC 3339, for example `2049-12-31T23:59:59Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day, hour, minute, second) = split(*self);
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}Z"
        )
    }
}

/// `YYMMDDHHMMSSZ`, with years 50-99 meaning 1950-1999.
pub(super) fn parse_utc_time(value: &[u8]) -> Result<Time, Error> {
    let [y1, y2, rest @ .., b'Z'] = value else {
        return Err(EncodingError::InvalidTime.into());
    };
    if rest.len() != 10 {
        return Err(EncodingError::InvalidTime.into());
    }

    let yy = i64::from(digit(*y1)? * 10 + digit(*y2)?);
    let year = match yy {
        50.. => 1900 + yy,
        _ => 2000 + yy,
    };
    to_time(year, rest)
}

/// `YYYYMMDDHHMMSSZ`, without fractional seconds.
pub(super) fn parse_generalized_time(value: &[u8]) -> Result<Time, Error> {
    let [y1, y2, y3, y4, rest @ .., b'Z'] = value else {
        return Err(EncodingError::InvalidTime.into());
    };
    if rest.len() != 10 {
        return Err(EncodingError::InvalidTime.into());
    }

    let year = [y1, y2, y3, y4]
        .into_iter()
        .try_fold(0i64, |acc, d| Ok::<_, Error>(acc * 10 + i64::from(digit(*d)?)))?;
    to_time(year, rest)
}

/// Encodes `time` as an X.509 `Time`: UTCTime for 1950 through 2049 and
/// GeneralizedTime otherwise.
///
/// Times outside years 0 to 9999 are clamped to the nearest representable
/// second.
pub(super) fn encode(time: Time) -> (Tag, [u8; 15], usize) {
    let (year, month, day, hour, minute, second) = split(time);

    let mut out = [0u8; 15];
    let (tag, mut at) = match year {
        1950..=2049 => {
            put_two(&mut out[0..2], year % 100);
            (Tag::UTC_TIME, 2)
        }
        _ => {
            put_two(&mut out[0..2], year / 100);
            put_two(&mut out[2..4], year % 100);
            (Tag::GENERALIZED_TIME, 4)
        }
    };

    for field in [month, day, hour, minute, second] {
        put_two(&mut out[at..at + 2], field);
        at += 2;
    }
    out[at] = b'Z';
    (tag, out, at + 1)
}

/// Calendar fields of `time`, clamped to years 0 through 9999.
fn split(time: Time) -> (i64, i64, i64, i64, i64, i64) {
    let secs = time.unix_secs();
    let rem = secs.rem_euclid(86_400);
    match civil_from_days(secs.div_euclid(86_400)) {
        (year @ 0..=9999, month, day) => (year, month, day, rem / 3600, rem / 60 % 60, rem % 60),
        (..=-1, _, _) => (0, 1, 1, 0, 0, 0),
        _ => (9999, 12, 31, 23, 59, 59),
    }
}

fn put_two(out: &mut [u8], value: i64) {
    out[0] = b'0' + (value / 10) as u8;
    out[1] = b'0' + (value % 10) as u8;
}

/// `rest` is `MMDDHHMMSS`.
fn to_time(year: i64, rest: &[u8]) -> Result<Time, Error> {
    let mut fields = [0i64; 5];
    for (field, pair) in fields.iter_mut().zip(rest.chunks_exact(2)) {
        *field = i64::from(digit(pair[0])? * 10 + digit(pair[1])?);
    }
    let [month, day, hour, minute, second] = fields;

    if !(1..=12).contains(&month)
        || day < 1
        || day > days_in_month(year, month)
        || hour > 23
        || minute > 59
        || second > 59
    {
        return Err(EncodingError::InvalidTime.into());
    }

    let days = days_from_civil(year, month, day);
    Ok(Time(days * 86_400 + hour * 3600 + minute * 60 + second))
}

fn digit(b: u8) -> Result<u8, Error> {
    match b {
        b'0'..=b'9' => Ok(b - b'0'),
        _ => Err(EncodingError::InvalidTime.into()),
    }
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Days since 1970-01-01, negative before it.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    // count years from March so the leap day falls at the end
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of `days_from_civil`.
fn civil_from_days(days: i64) -> (i64, i64, i64) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use std::format;

    use super::*;

    fn secs(t: Time) -> i64 {
        t.unix_secs()
    }

    #[test]
    fn utc_time() {
        assert_eq!(secs(parse_utc_time(b"700101000000Z").unwrap()), 0);
        assert_eq!(
            secs(parse_utc_time(b"491231235959Z").unwrap()),
            2_524_607_999
        );
        // 2000-02-29 12:00:00
        assert_eq!(
            secs(parse_utc_time(b"000229120000Z").unwrap()),
            951_825_600
        );
    }

    #[test]
    fn utc_time_before_the_epoch() {
        assert_eq!(secs(parse_utc_time(b"691231235959Z").unwrap()), -1);
        assert_eq!(secs(parse_utc_time(b"690101000000Z").unwrap()), -31_536_000);
        assert_eq!(
            secs(parse_utc_time(b"500101000000Z").unwrap()),
            -631_152_000
        );
    }

    #[test]
    fn generalized_time() {
        assert_eq!(
            secs(parse_generalized_time(b"20500101000000Z").unwrap()),
            2_524_608_000
        );
        assert_eq!(
            secs(parse_generalized_time(b"99991231235959Z").unwrap()),
            253_402_300_799
        );
        assert_eq!(
            secs(parse_generalized_time(b"19000301000000Z").unwrap()),
            -2_203_891_200
        );
        assert_eq!(
            secs(parse_generalized_time(b"00000101000000Z").unwrap()),
            -62_167_219_200
        );
    }

    #[test]
    fn rejects_bad_times() {
        for bad in [
            &b"010229000000Z"[..], // 2001 is not a leap year
            b"011301000000Z",
            b"010101240000Z",
            b"010101000060Z",
            b"0101010000Z",
            b"010101000000",
            b"0101010000001Z",
            b"01010100000aZ",
            b"010101000000+0000",
        ] {
            assert!(parse_utc_time(bad).is_err(), "{:?}", core::str::from_utf8(bad));
        }

        for bad in [
            &b"20010101000000.5Z"[..],
            b"2001010100000Z",
            b"19000229000000Z",
        ] {
            assert!(parse_generalized_time(bad).is_err());
        }
    }

    #[test]
    fn encoding_picks_the_right_type() {
        let (tag, buf, len) = encode(Time::from_unix_secs(951_825_600));
        assert_eq!(tag, Tag::UTC_TIME);
        assert_eq!(&buf[..len], b"000229120000Z");

        let (tag, buf, len) = encode(Time::from_unix_secs(-1));
        assert_eq!(tag, Tag::UTC_TIME);
        assert_eq!(&buf[..len], b"691231235959Z");

        let (tag, buf, len) = encode(Time::from_unix_secs(2_524_608_000));
        assert_eq!(tag, Tag::GENERALIZED_TIME);
        assert_eq!(&buf[..len], b"20500101000000Z");

        let (tag, buf, len) = encode(Time::from_unix_secs(-631_152_001));
        assert_eq!(tag, Tag::GENERALIZED_TIME);
        assert_eq!(&buf[..len], b"19491231235959Z");

        let (_, buf, len) = encode(Time::from_unix_secs(i64::MAX));
        assert_eq!(&buf[..len], b"99991231235959Z");
        let (_, buf, len) = encode(Time::from_unix_secs(i64::MIN));
        assert_eq!(&buf[..len], b"00000101000000Z");
    }

    #[test]
    fn unix_time_conversions() {
        let unix = UnixTime::since_unix_epoch(Duration::from_secs(1_792_124_883));
        let time = Time::from(unix);
        assert_eq!(time.unix_secs(), 1_792_124_883);
        assert_eq!(time.to_unix_time(), Some(unix));
        assert_eq!(Time::from_unix_secs(-1).to_unix_time(), None);
    }

    #[test]
    fn display() {
        assert_eq!(
            format!("{}", Time::from_unix_secs(-1)),
            "1969-12-31T23:59:59Z"
        );
        assert_eq!(
            format!("{}", Time::from_unix_secs(951_825_600)),
            "2000-02-29T12:00:00Z"
        );
    }

    #[test]
    fn civil_round_trip() {
        for days in [-719_528, -25_508, -1, 0, 59, 365, 10_957, 11_016, 2_932_896] {
            let (y, m, d) = civil_from_days(days);
            assert_eq!(days_from_civil(y, m, d), days);
        }
    }
}
