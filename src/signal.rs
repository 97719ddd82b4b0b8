//! Decoders for the `+CSQ` signal report and the `+CCLK` timestamp.

use heapless::String;

use crate::error::Error;

/// Signal level reported for RSSI code 0.
pub const MINIMUM_SIGNAL_DBM: i16 = -113;

/// Code used by the module for "not known or not detectable".
const UNKNOWN_CODE: u8 = 99;

/// Length of a `YY/MM/DD,HH:MM:SS±QQ` timestamp.
pub const TIMESTAMP_LEN: usize = 20;

/// Converts an RSSI code in `0..=31` to dBm.
pub fn rssi_to_dbm(code: u8) -> Option<i16> {
    match code {
        0..=31 => Some(i16::from(code) * 2 + MINIMUM_SIGNAL_DBM),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalStrength {
    Dbm(i16),
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitErrorRate {
    /// RXQUAL class `0..=7`
    Class(u8),
    Unknown,
}

/// Decoded `+CSQ: <rssi>,<ber>` report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalQuality {
    pub strength: SignalStrength,
    pub ber: BitErrorRate,
}

impl SignalQuality {
    /// Parses the `<rssi>,<ber>` part of a `+CSQ` line.
    ///
    /// The RSSI code has one or two digits and must be `0..=31` or `99`. The
    /// BER must be a single digit `0..=7` or `99`.
    pub fn parse(field: &[u8]) -> Result<Self, Error> {
        let comma = field
            .iter()
            .position(|&b| b == b',')
            .ok_or(Error::Unparseable)?;
        let (rssi, ber) = (&field[..comma], &field[comma + 1..]);

        if rssi.is_empty() || rssi.len() > 2 {
            return Err(Error::Unparseable);
        }
        let strength = match parse_digits(rssi)? {
            UNKNOWN_CODE => SignalStrength::Unknown,
            code => SignalStrength::Dbm(rssi_to_dbm(code).ok_or(Error::Unparseable)?),
        };

        let ber = match ber {
            [d @ b'0'..=b'7'] => BitErrorRate::Class(d - b'0'),
            b"99" => BitErrorRate::Unknown,
            _ => return Err(Error::Unparseable),
        };

        Ok(Self { strength, ber })
    }

    /// The signal level in dBm, `None` when the module does not know it.
    pub fn dbm(&self) -> Option<i16> {
        match self.strength {
            SignalStrength::Dbm(dbm) => Some(dbm),
            SignalStrength::Unknown => None,
        }
    }
}

fn parse_digits(digits: &[u8]) -> Result<u8, Error> {
    digits.iter().try_fold(0u8, |acc, &b| {
        if b.is_ascii_digit() {
            Ok(acc * 10 + (b - b'0'))
        } else {
            Err(Error::Unparseable)
        }
    })
}

/// Decoded module clock, `YY/MM/DD,HH:MM:SS±QQ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in quarters of an hour, `-48..=48`
    pub utc_offset_quarters: i8,
}

impl Timestamp {
    pub fn parse(s: &str) -> Result<Self, Error> {
        let b = s.as_bytes();
        if b.len() != TIMESTAMP_LEN {
            return Err(Error::InvalidClock);
        }
        let separators = [(2, b'/'), (5, b'/'), (8, b','), (11, b':'), (14, b':')];
        if separators.iter().any(|&(i, c)| b[i] != c) {
            return Err(Error::InvalidClock);
        }
        let field = |i: usize| parse_digits(&b[i..i + 2]).map_err(|_| Error::InvalidClock);

        let offset = field(18)?;
        let utc_offset_quarters = match b[17] {
            b'+' => offset as i8,
            b'-' => -(offset as i8),
            _ => return Err(Error::InvalidClock),
        };

        let ts = Self {
            year: field(0)?,
            month: field(3)?,
            day: field(6)?,
            hour: field(9)?,
            minute: field(12)?,
            second: field(15)?,
            utc_offset_quarters,
        };

        if !(1..=12).contains(&ts.month)
            || !(1..=31).contains(&ts.day)
            || ts.hour > 23
            || ts.minute > 59
            || ts.second > 59
            || !(-48..=48).contains(&ts.utc_offset_quarters)
        {
            return Err(Error::InvalidClock);
        }
        Ok(ts)
    }

    /// Formats the timestamp the way `+CCLK` expects it.
    pub fn to_clock_string(&self) -> String<TIMESTAMP_LEN> {
        use core::fmt::Write;
        let mut s = String::new();
        let sign = if self.utc_offset_quarters < 0 { '-' } else { '+' };
        // 20 bytes always fit
        let _ = write!(
            s,
            "{:02}/{:02}/{:02},{:02}:{:02}:{:02}{}{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            self.utc_offset_quarters.unsigned_abs()
        );
        s
    }
}
