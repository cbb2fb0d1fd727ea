use crate::domain::{ConfigError, Period};
use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Weekday,
};
use serde::{Deserialize, Serialize};

/// Day the reporting week begins on, as an offset from Sunday (0..=6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct WeekStart(u8);

impl WeekStart {
    pub const SUNDAY: WeekStart = WeekStart(0);
    pub const MONDAY: WeekStart = WeekStart(1);

    pub fn new(offset: i64) -> Result<Self, ConfigError> {
        match u8::try_from(offset) {
            Ok(value) if value <= 6 => Ok(Self(value)),
            _ => Err(ConfigError::InvalidWeekStart(offset)),
        }
    }

    pub fn offset(&self) -> u8 {
        self.0
    }

    pub fn weekday(&self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl TryFrom<i64> for WeekStart {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeekStart> for i64 {
    fn from(value: WeekStart) -> Self {
        i64::from(value.0)
    }
}

impl From<Weekday> for WeekStart {
    fn from(weekday: Weekday) -> Self {
        Self(weekday.num_days_from_sunday() as u8)
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    last_day_of_month(year, month).map(|date| date.day())
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((start, last_day_of_month(year, month)?))
}

/// First month (1, 4, 7 or 10) of the quarter containing `month`
pub fn quarter_start_month(month: u32) -> u32 {
    (month - 1) / 3 * 3 + 1
}

pub fn quarter_bounds(year: i32, first_month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, first_month, 1)?;
    Some((start, last_day_of_month(year, first_month + 2)?))
}

pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// The most recent `week_start` day on or before `date`
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> Option<NaiveDate> {
    let weekday = date.weekday().num_days_from_sunday();
    let back = (weekday + 7 - u32::from(week_start.offset())) % 7;
    date.checked_sub_days(Days::new(u64::from(back)))
}

pub fn week_bounds(date: NaiveDate, week_start: WeekStart) -> Option<(NaiveDate, NaiveDate)> {
    let start = start_of_week(date, week_start)?;
    Some((start, start.checked_add_days(Days::new(6))?))
}

/// Map a wall-clock time in `tz` to an instant.
///
/// Ambiguous times take the earlier mapping. Times inside a DST gap move
/// forward to the first wall-clock quarter hour that exists.
pub fn local_instant<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(instant) => Some(instant),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=96).find_map(|step| {
            let shifted = naive.checked_add_signed(Duration::minutes(15 * step))?;
            tz.from_local_datetime(&shifted).earliest()
        }),
    }
}

/// Calendar dates of the first and last day of `period`, seen from `today`.
///
/// Returns `None` only when the arithmetic leaves chrono's date range.
pub fn period_dates(
    period: Period,
    today: NaiveDate,
    week_start: WeekStart,
) -> Option<(NaiveDate, NaiveDate)> {
    match period {
        Period::Today => Some((today, today)),
        Period::Yesterday => {
            let yesterday = today.pred_opt()?;
            Some((yesterday, yesterday))
        }
        Period::ThisWeek => week_bounds(today, week_start),
        Period::LastWeek => week_bounds(today.checked_sub_days(Days::new(7))?, week_start),
        Period::ThisMonth => month_bounds(today.year(), today.month()),
        Period::LastMonth => {
            if today.month() == 1 {
                month_bounds(today.year().checked_sub(1)?, 12)
            } else {
                month_bounds(today.year(), today.month() - 1)
            }
        }
        Period::ThisQuarter => quarter_bounds(today.year(), quarter_start_month(today.month())),
        Period::LastQuarter => {
            let first = quarter_start_month(today.month());
            if first == 1 {
                quarter_bounds(today.year().checked_sub(1)?, 10)
            } else {
                quarter_bounds(today.year(), first - 3)
            }
        }
        Period::ThisYear => year_bounds(today.year()),
        Period::LastYear => year_bounds(today.year().checked_sub(1)?),
    }
}
