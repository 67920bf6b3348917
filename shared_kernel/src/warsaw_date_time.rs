use chrono::{
    DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone,
    Utc,
};
use chrono_tz::Europe::Warsaw;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const QUERY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
/// WarsawTZDateTime stores the time as `DateTime<UTC>` for easier serialization
/// and deserialization. Every calendar operation happens in Europe/Warsaw,
/// independent of the host timezone.
pub struct WarsawTZDateTime(DateTime<Utc>);

impl WarsawTZDateTime {
    pub fn now() -> Self {
        WarsawTZDateTime(Utc::now())
    }

    pub fn date(&self) -> NaiveDate {
        self.to_date_time().date_naive()
    }

    pub fn to_date_time(&self) -> DateTime<Tz> {
        Warsaw.from_utc_datetime(&self.0.naive_utc())
    }

    /// 23:59:59.999 of the current Warsaw calendar day.
    pub fn end_of_day(&self) -> Self {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .map(|last_millisecond| self.date().and_time(last_millisecond))
            .and_then(|end| Self::from_warsaw_local(&end))
            .unwrap_or(*self)
    }

    /// `YYYY-MM-DD HH:MM:SS` in Warsaw wall-clock time.
    pub fn format_query(&self) -> String {
        self.to_date_time().format(QUERY_FORMAT).to_string()
    }

    /// RFC 3339 with the Warsaw offset, e.g. `2024-01-10T10:00:00.000+01:00`.
    pub fn to_rfc3339(&self) -> String {
        self.to_date_time().to_rfc3339_opts(SecondsFormat::Millis, false)
    }

    /// RFC 3339 in UTC, e.g. `2024-01-10T09:00:00.000Z`.
    pub fn to_utc_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn signed_duration_since(&self, other: &WarsawTZDateTime) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Accepts RFC 3339 timestamps with an offset, or offset-less timestamps
    /// which are read as Warsaw wall-clock time.
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(date_time.with_timezone(&Utc)));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .ok_or_else(|| format!("Unrecognised timestamp {value}"))
            .and_then(Self::try_from)
    }

    fn from_warsaw_local(value: &NaiveDateTime) -> Option<Self> {
        match Warsaw.from_local_datetime(value) {
            LocalResult::Single(date_time) => Some(date_time),
            // Autumn change: the earlier of the two repeated wall-clock times.
            LocalResult::Ambiguous(earliest, _) => Some(earliest),
            LocalResult::None => None,
        }
        .map(|date_time| Self(date_time.with_timezone(&Utc)))
    }
}

impl From<DateTime<Utc>> for WarsawTZDateTime {
    fn from(data: DateTime<Utc>) -> WarsawTZDateTime {
        WarsawTZDateTime(data)
    }
}

impl TryFrom<NaiveDateTime> for WarsawTZDateTime {
    type Error = String;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::from_warsaw_local(&value)
            .ok_or_else(|| format!("Failed to convert {value} to Warsaw timezone"))
    }
}
