//! Temporal scalars used by dataset indices and their canonical text forms.
//!
//! - instants: `YYYY-MM-DD HH:MM:SS[.fff]`
//! - periods: `YYYY`, `YYYYQn`, `YYYY-MM`, `YYYY-MM-DD`
//! - durations: `D days HH:MM:SS[.ffffff]`, negative as `-D days +HH:MM:SS`

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::TemporalParseError;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

// ---------------------------------------------------------------------------
// Instants
// ---------------------------------------------------------------------------

/// Render an instant; the fraction is omitted when zero.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, TemporalParseError> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TemporalParseError::Timestamp(s.to_string()))
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

fn total_nanos(delta: &TimeDelta) -> i128 {
    delta.num_seconds() as i128 * NANOS_PER_SECOND + delta.subsec_nanos() as i128
}

fn from_total_nanos(total: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(total.div_euclid(NANOS_PER_SECOND)).ok()?;
    let nanos = total.rem_euclid(NANOS_PER_SECOND) as u32;
    TimeDelta::new(secs, nanos)
}

pub fn format_timedelta(delta: &TimeDelta) -> String {
    let total = total_nanos(delta);
    let days = total.div_euclid(NANOS_PER_DAY);
    let rem = total.rem_euclid(NANOS_PER_DAY);

    let secs = rem / NANOS_PER_SECOND;
    let frac = rem % NANOS_PER_SECOND;
    let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);

    let sign = if days < 0 { "+" } else { "" };
    let mut out = format!("{} days {}{:02}:{:02}:{:02}", days, sign, h, m, s);
    if frac != 0 {
        if frac % 1000 == 0 {
            out.push_str(&format!(".{:06}", frac / 1000));
        } else {
            out.push_str(&format!(".{:09}", frac));
        }
    }
    out
}

pub fn parse_timedelta(s: &str) -> Result<TimeDelta, TemporalParseError> {
    let err = || TemporalParseError::Timedelta(s.to_string());
    let mut parts = s.split_whitespace();

    let days: i128 = parts.next().ok_or_else(err)?.parse().map_err(|_| err())?;
    match parts.next() {
        Some("days") | Some("day") => {}
        _ => return Err(err()),
    }
    let clock = parts.next().ok_or_else(err)?;
    if parts.next().is_some() {
        return Err(err());
    }

    let clock = clock.strip_prefix('+').unwrap_or(clock);
    let (hms, frac) = match clock.split_once('.') {
        Some((hms, frac)) => (hms, Some(frac)),
        None => (clock, None),
    };
    let fields: Vec<&str> = hms.split(':').collect();
    if fields.len() != 3 {
        return Err(err());
    }
    let mut secs: i128 = 0;
    for field in fields {
        let n: i128 = field.parse().map_err(|_| err())?;
        secs = secs * 60 + n;
    }

    let nanos: i128 = match frac {
        Some(f) if !f.is_empty() && f.len() <= 9 && f.bytes().all(|b| b.is_ascii_digit()) => {
            let padded = format!("{:0<9}", f);
            padded.parse().map_err(|_| err())?
        }
        Some(_) => return Err(err()),
        None => 0,
    };

    from_total_nanos(days * NANOS_PER_DAY + secs * NANOS_PER_SECOND + nanos).ok_or_else(err)
}

// ---------------------------------------------------------------------------
// Periods
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PeriodFreq {
    Annual,
    Quarterly,
    Monthly,
    Daily,
}

/// A calendar span identified by its frequency and first day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    start: NaiveDate,
    freq: PeriodFreq,
}

impl Period {
    pub fn annual(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            freq: PeriodFreq::Annual,
        })
    }

    pub fn quarterly(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1)?,
            freq: PeriodFreq::Quarterly,
        })
    }

    pub fn monthly(year: i32, month: u32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, month, 1)?,
            freq: PeriodFreq::Monthly,
        })
    }

    pub fn daily(date: NaiveDate) -> Self {
        Self {
            start: date,
            freq: PeriodFreq::Daily,
        }
    }

    pub fn freq(&self) -> PeriodFreq {
        self.freq
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.start;
        match self.freq {
            PeriodFreq::Annual => write!(f, "{:04}", d.year()),
            PeriodFreq::Quarterly => write!(f, "{:04}Q{}", d.year(), (d.month() - 1) / 3 + 1),
            PeriodFreq::Monthly => write!(f, "{:04}-{:02}", d.year(), d.month()),
            PeriodFreq::Daily => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl FromStr for Period {
    type Err = TemporalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TemporalParseError::Period(s.to_string());
        let s = s.trim();

        if let Some((year, quarter)) = s.split_once('Q') {
            let year: i32 = year.parse().map_err(|_| err())?;
            let quarter: u32 = quarter.parse().map_err(|_| err())?;
            return Period::quarterly(year, quarter).ok_or_else(err);
        }

        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year] => Period::annual(year.parse().map_err(|_| err())?).ok_or_else(err),
            [year, month] => Period::monthly(
                year.parse().map_err(|_| err())?,
                month.parse().map_err(|_| err())?,
            )
            .ok_or_else(err),
            [_, _, _] => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Period::daily)
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }
}
