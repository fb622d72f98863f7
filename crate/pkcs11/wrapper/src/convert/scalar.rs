//! Primitive scalars: booleans, words, dates, versions and character data.

use std::{borrow::Cow, fmt};

use cosmian_pkcs11_sys::{CK_BBOOL, CK_DATE, CK_FALSE, CK_TRUE, CK_ULONG, CK_VERSION};

use crate::{WResult, WrapperError, wrapper_ensure};

/// Text encoding used for labels, PINs and other character fields of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum CharEncoding {
    /// Characters are UTF-8 encoded on the native side.
    #[default]
    #[strum(serialize = "UTF-8")]
    Utf8,
    /// One byte per character; code points above `0xFF` are truncated.
    #[strum(serialize = "single-byte")]
    SingleByte,
}

#[must_use]
pub const fn bool_to_native(value: bool) -> CK_BBOOL {
    if value { CK_TRUE } else { CK_FALSE }
}

/// Any non-zero native value is `true`.
#[must_use]
pub const fn bool_from_native(value: CK_BBOOL) -> bool {
    value != CK_FALSE
}

/// Reinterpret a signed long as a native word; `-1` becomes `CK_UNAVAILABLE_INFORMATION`.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn ulong_to_native(value: i64) -> CK_ULONG {
    value as CK_ULONG
}

/// Reverse of [`ulong_to_native`].
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
pub const fn ulong_from_native(value: CK_ULONG) -> i64 {
    value as i64
}

/// A calendar date as carried by `CK_DATE` (`YYYYMMDD` in ASCII digits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Date {
    #[must_use]
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn write_digits(out: &mut [u8], mut value: u32) {
    for digit in out.iter_mut().rev() {
        #[allow(clippy::cast_possible_truncation)]
        let d = (value % 10) as u8;
        *digit = b'0' + d;
        value /= 10;
    }
}

fn read_digits(digits: &[u8]) -> WResult<u32> {
    digits.iter().try_fold(0_u32, |acc, d| {
        if d.is_ascii_digit() {
            Ok(acc * 10 + u32::from(d - b'0'))
        } else {
            Err(WrapperError::Conversion(format!(
                "invalid date digit 0x{d:02X} in CK_DATE"
            )))
        }
    })
}

/// Largest year a four-digit `CK_DATE` year can hold.
const MAX_YEAR: u16 = 9999;

/// Years above 9999 have no native encoding.
pub fn date_to_native(date: &Date) -> WResult<CK_DATE> {
    wrapper_ensure!(
        date.year <= MAX_YEAR,
        WrapperError::Conversion(format!("year {} does not fit a CK_DATE", date.year))
    );
    let mut native = CK_DATE::default();
    write_digits(&mut native.year, u32::from(date.year));
    write_digits(&mut native.month, u32::from(date.month));
    write_digits(&mut native.day, u32::from(date.day));
    Ok(native)
}

pub fn date_from_native(date: &CK_DATE) -> WResult<Date> {
    Ok(Date {
        year: u16::try_from(read_digits(&date.year)?)?,
        month: u8::try_from(read_digits(&date.month)?)?,
        day: u8::try_from(read_digits(&date.day)?)?,
    })
}

/// Decode an 8-byte `CK_DATE` attribute value.
pub fn date_from_bytes(bytes: &[u8]) -> WResult<Date> {
    let [y0, y1, y2, y3, m0, m1, d0, d1] = bytes else {
        return Err(WrapperError::Conversion(format!(
            "a CK_DATE is 8 bytes long, got {}",
            bytes.len()
        )));
    };
    date_from_native(&CK_DATE {
        year: [*y0, *y1, *y2, *y3],
        month: [*m0, *m1],
        day: [*d0, *d1],
    })
}

/// A `major.minor` version record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    #[must_use]
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl From<CK_VERSION> for Version {
    fn from(version: CK_VERSION) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
        }
    }
}

impl From<Version> for CK_VERSION {
    fn from(version: Version) -> Self {
        Self {
            major: version.major,
            minor: version.minor,
        }
    }
}

#[must_use]
pub fn version_to_native(version: &Version) -> CK_VERSION {
    (*version).into()
}

#[must_use]
pub fn version_from_native(version: &CK_VERSION) -> Version {
    (*version).into()
}

/// Encode characters for the native side.
pub fn chars_to_native(chars: &[char], encoding: CharEncoding) -> WResult<Vec<u8>> {
    let mut out = Vec::new();
    match encoding {
        CharEncoding::Utf8 => {
            out.try_reserve_exact(chars.iter().map(|c| c.len_utf8()).sum())?;
            let mut scratch = [0_u8; 4];
            for c in chars {
                out.extend_from_slice(c.encode_utf8(&mut scratch).as_bytes());
            }
        }
        CharEncoding::SingleByte => {
            out.try_reserve_exact(chars.len())?;
            out.extend(chars.iter().map(|c| (u32::from(*c) & 0xFF) as u8));
        }
    }
    Ok(out)
}

/// Encode a string; UTF-8 input is passed through without copying.
pub fn str_to_native(text: &str, encoding: CharEncoding) -> WResult<Cow<'_, [u8]>> {
    match encoding {
        CharEncoding::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
        CharEncoding::SingleByte => {
            let chars: Vec<char> = text.chars().collect();
            chars_to_native(&chars, encoding).map(Cow::Owned)
        }
    }
}

/// Decode native characters. Invalid UTF-8 sequences become `U+FFFD`.
pub fn chars_from_native(bytes: &[u8], encoding: CharEncoding) -> WResult<Vec<char>> {
    let mut out = Vec::new();
    match encoding {
        CharEncoding::Utf8 => {
            let text = String::from_utf8_lossy(bytes);
            out.try_reserve_exact(text.chars().count())?;
            out.extend(text.chars());
        }
        CharEncoding::SingleByte => {
            out.try_reserve_exact(bytes.len())?;
            out.extend(bytes.iter().map(|b| char::from(*b)));
        }
    }
    Ok(out)
}

pub fn text_from_native(bytes: &[u8], encoding: CharEncoding) -> WResult<String> {
    Ok(chars_from_native(bytes, encoding)?.into_iter().collect())
}

/// Decode a fixed-width info field, dropping the trailing blank and NUL padding.
pub fn padded_text_from_native(bytes: &[u8], encoding: CharEncoding) -> WResult<String> {
    let end = bytes
        .iter()
        .rposition(|b| *b != b' ' && *b != 0)
        .map_or(0, |i| i + 1);
    text_from_native(bytes.get(..end).unwrap_or_default(), encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_round_trip() {
        for b in [true, false] {
            assert_eq!(bool_from_native(bool_to_native(b)), b);
        }
        assert!(bool_from_native(0x7F));
    }

    #[test]
    fn words_round_trip() {
        for v in [0_i64, 1, 0x1234_5678, i64::from(u32::MAX), -1, i64::MIN, i64::MAX] {
            assert_eq!(ulong_from_native(ulong_to_native(v)), v);
        }
        assert_eq!(
            ulong_to_native(-1),
            cosmian_pkcs11_sys::CK_UNAVAILABLE_INFORMATION
        );
    }

    #[test]
    fn dates_round_trip() {
        for date in [
            Date::new(2024, 2, 29),
            Date::new(1, 1, 1),
            Date::new(9999, 12, 31),
            Date::default(),
        ] {
            let native = date_to_native(&date).unwrap();
            assert_eq!(date_from_native(&native).unwrap(), date);
        }
        let native = date_to_native(&Date::new(2025, 7, 4)).unwrap();
        assert_eq!(&native.year, b"2025");
        assert_eq!(&native.month, b"07");
        assert_eq!(&native.day, b"04");
        assert_eq!(Date::new(2025, 7, 4).to_string(), "2025-07-04");
    }

    #[test]
    fn five_digit_years_are_rejected() {
        for year in [10_000, u16::MAX] {
            assert!(matches!(
                date_to_native(&Date::new(year, 1, 1)),
                Err(WrapperError::Conversion(_))
            ));
        }
    }

    #[test]
    fn dates_reject_non_digits() {
        assert!(date_from_bytes(b"        ").is_err());
        assert!(date_from_bytes(b"2024").is_err());
        assert_eq!(date_from_bytes(b"20240131").unwrap(), Date::new(2024, 1, 31));
    }

    #[test]
    fn versions_round_trip() {
        let v = Version::new(2, 40);
        assert_eq!(version_from_native(&version_to_native(&v)), v);
        assert_eq!(v.to_string(), "2.40");
    }

    #[test]
    fn character_encodings() {
        let chars: Vec<char> = "Ça va".chars().collect();
        let utf8 = chars_to_native(&chars, CharEncoding::Utf8).unwrap();
        assert_eq!(utf8, "Ça va".as_bytes());
        assert_eq!(chars_from_native(&utf8, CharEncoding::Utf8).unwrap(), chars);

        let single = chars_to_native(&chars, CharEncoding::SingleByte).unwrap();
        assert_eq!(single, vec![0xC7, b'a', b' ', b'v', b'a']);
        assert_eq!(
            chars_from_native(&single, CharEncoding::SingleByte).unwrap(),
            chars
        );

        // truncated to the low byte
        assert_eq!(
            chars_to_native(&['\u{20AC}'], CharEncoding::SingleByte).unwrap(),
            vec![0xAC]
        );
        assert!(matches!(
            str_to_native("label", CharEncoding::Utf8).unwrap(),
            Cow::Borrowed(_)
        ));
        assert_eq!(CharEncoding::Utf8.to_string(), "UTF-8");
    }

    #[test]
    fn padded_text_is_trimmed() {
        let mut field = [b' '; 32];
        field[..9].copy_from_slice(b"SoftToken");
        assert_eq!(
            padded_text_from_native(&field, CharEncoding::Utf8).unwrap(),
            "SoftToken"
        );
        assert_eq!(
            padded_text_from_native(&[b' '; 16], CharEncoding::Utf8).unwrap(),
            ""
        );
        assert_eq!(
            padded_text_from_native(b"a b\0\0", CharEncoding::SingleByte).unwrap(),
            "a b"
        );
    }
}
