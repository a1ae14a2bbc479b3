//! Shared types for the CyberCab estimator.
//!
//! These types form the data model used across all modules: the calendar
//! and weather enumerations, the per-call input contexts, the prediction
//! result, and the domain error type. All of them are plain values with a
//! lifetime of a single prediction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Month
// ---------------------------------------------------------------------------

/// Calendar month, used for seasonal demand adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its 1-based calendar number.
    pub fn from_number(n: u32) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }

    /// 1-based calendar number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Three-letter label ("Jan", "Feb", ...) used on chart axes.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Fail-soft parse: unrecognised input means "no month", which applies
    /// no seasonal adjustment.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; accepts full names and three-letter abbreviations.
impl FromStr for Month {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Month::ALL
            .iter()
            .find(|m| {
                let name = m.name().to_lowercase();
                name == needle || &name[..3] == needle
            })
            .copied()
            .ok_or_else(|| PredictError::InvalidArgument(format!("unknown month: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Day of week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Monday through Friday. Rush-hour boosts only apply on these days.
    pub fn is_weekday(self) -> bool {
        !matches!(self, DayOfWeek::Saturday | DayOfWeek::Sunday)
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Fail-soft parse: unrecognised input means "unknown day", which
    /// applies no time-of-day adjustment.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.parse().ok()
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(w: chrono::Weekday) -> Self {
        DayOfWeek::ALL[w.num_days_from_monday() as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        DayOfWeek::ALL
            .iter()
            .find(|d| {
                let name = d.name().to_lowercase();
                name == needle || &name[..3] == needle
            })
            .copied()
            .ok_or_else(|| PredictError::InvalidArgument(format!("unknown day: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather condition for the scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Snowstorm,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Clear, Weather::Rain, Weather::Snowstorm];

    /// Fail-soft parse: unrecognised input is treated as `Clear`, which has
    /// no effect on demand.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Weather the operator is most likely planning for in a given month.
    /// Deep winter defaults to a snowstorm scenario.
    pub fn suggested_for(month: Option<Month>) -> Self {
        match month {
            Some(Month::January | Month::February) => Weather::Snowstorm,
            _ => Weather::Clear,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Weather::Clear => write!(f, "Clear"),
            Weather::Rain => write!(f, "Rain"),
            Weather::Snowstorm => write!(f, "Snowstorm"),
        }
    }
}

impl FromStr for Weather {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clear" | "sunny" => Ok(Weather::Clear),
            "rain" | "rainy" => Ok(Weather::Rain),
            "snowstorm" | "snow" => Ok(Weather::Snowstorm),
            _ => Err(PredictError::InvalidArgument(format!("unknown weather: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Input contexts
// ---------------------------------------------------------------------------

/// When the prediction is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeContext {
    /// `None` disables the seasonality stage.
    pub month: Option<Month>,
    /// `None` (an unrecognised day) disables the time-of-day stage.
    pub day: Option<DayOfWeek>,
    /// Hour of day, 0–23. Validated by the estimator, not here.
    pub hour: u8,
}

impl TimeContext {
    pub fn new(month: Option<Month>, day: DayOfWeek, hour: u8) -> Self {
        Self {
            month,
            day: Some(day),
            hour,
        }
    }
}

impl fmt::Display for TimeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.map(Month::name).unwrap_or("any month");
        let day = self.day.map(DayOfWeek::name).unwrap_or("unknown day");
        write!(f, "{day} {:02}:00 ({month})", self.hour)
    }
}

/// Operating conditions for the prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioContext {
    pub weather: Weather,
    /// Surge pricing multiplier applied to the base fare.
    pub surge: f64,
}

impl ScenarioContext {
    pub fn new(weather: Weather, surge: f64) -> Self {
        Self { weather, surge }
    }
}

impl fmt::Display for ScenarioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {:.2}x surge", self.weather, self.surge)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The three numbers produced by a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted trip requests for the hour.
    pub demand: u32,
    pub gross_revenue: f64,
    pub net_profit: f64,
}

impl PredictionResult {
    /// Average fare actually charged per trip, `None` when there are no trips.
    pub fn revenue_per_trip(&self) -> Option<f64> {
        (self.demand > 0).then(|| self.gross_revenue / f64::from(self.demand))
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "demand={} gross=${:.2} net=${:.2}",
            self.demand, self.gross_revenue, self.net_profit,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for CyberCab.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Month tests --

    #[test]
    fn test_month_from_str_full_and_short() {
        assert_eq!("July".parse::<Month>().unwrap(), Month::July);
        assert_eq!("dec".parse::<Month>().unwrap(), Month::December);
        assert_eq!("  MARCH ".parse::<Month>().unwrap(), Month::March);
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_lenient_unknown_is_none() {
        assert_eq!(Month::parse_lenient("Smarch"), None);
        assert_eq!(Month::parse_lenient("aug"), Some(Month::August));
    }

    #[test]
    fn test_month_numbering() {
        assert_eq!(Month::from_number(1), Some(Month::January));
        assert_eq!(Month::from_number(12), Some(Month::December));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        assert_eq!(Month::November.number(), 11);
    }

    #[test]
    fn test_month_abbreviation() {
        assert_eq!(Month::September.abbreviation(), "Sep");
        assert_eq!(Month::May.abbreviation(), "May");
    }

    // -- DayOfWeek tests --

    #[test]
    fn test_weekday_classification() {
        assert!(DayOfWeek::Monday.is_weekday());
        assert!(DayOfWeek::Friday.is_weekday());
        assert!(!DayOfWeek::Saturday.is_weekday());
        assert!(!DayOfWeek::Sunday.is_weekday());
    }

    #[test]
    fn test_day_from_str() {
        assert_eq!("wednesday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Wednesday);
        assert_eq!("Sat".parse::<DayOfWeek>().unwrap(), DayOfWeek::Saturday);
        assert!("Funday".parse::<DayOfWeek>().is_err());
        assert_eq!(DayOfWeek::parse_lenient("Funday"), None);
    }

    #[test]
    fn test_day_from_chrono_weekday() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }

    // -- Weather tests --

    #[test]
    fn test_weather_from_str() {
        assert_eq!("rain".parse::<Weather>().unwrap(), Weather::Rain);
        assert_eq!("Snowstorm".parse::<Weather>().unwrap(), Weather::Snowstorm);
        assert!("hail".parse::<Weather>().is_err());
    }

    #[test]
    fn test_weather_lenient_defaults_to_clear() {
        assert_eq!(Weather::parse_lenient("hail"), Weather::Clear);
        assert_eq!(Weather::parse_lenient("RAIN"), Weather::Rain);
    }

    #[test]
    fn test_weather_suggestion() {
        assert_eq!(Weather::suggested_for(Some(Month::January)), Weather::Snowstorm);
        assert_eq!(Weather::suggested_for(Some(Month::February)), Weather::Snowstorm);
        assert_eq!(Weather::suggested_for(Some(Month::March)), Weather::Clear);
        assert_eq!(Weather::suggested_for(None), Weather::Clear);
    }

    #[test]
    fn test_weather_serialization_roundtrip() {
        let json = serde_json::to_string(&Weather::Snowstorm).unwrap();
        assert_eq!(json, "\"Snowstorm\"");
        let back: Weather = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Weather::Snowstorm);
    }

    // -- Context / result tests --

    #[test]
    fn test_time_context_display() {
        let t = TimeContext::new(Some(Month::August), DayOfWeek::Friday, 7);
        assert_eq!(format!("{t}"), "Friday 07:00 (August)");

        let unknown = TimeContext { month: None, day: None, hour: 22 };
        assert_eq!(format!("{unknown}"), "unknown day 22:00 (any month)");
    }

    #[test]
    fn test_revenue_per_trip() {
        let r = PredictionResult { demand: 10, gross_revenue: 330.0, net_profit: 285.0 };
        assert_eq!(r.revenue_per_trip(), Some(33.0));

        let empty = PredictionResult { demand: 0, gross_revenue: 0.0, net_profit: 0.0 };
        assert_eq!(empty.revenue_per_trip(), None);
    }

    #[test]
    fn test_error_display() {
        let e = PredictError::InvalidArgument("hour 25 out of range".into());
        assert_eq!(e.to_string(), "Invalid argument: hour 25 out of range");
    }
}
