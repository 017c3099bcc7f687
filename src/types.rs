//! Core alert types shared by the engine, the gateway and the front-end.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AlertDeskError, Result};

/// Device firmware version an alert was measured with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Version {
    V1,
    V2,
}

impl Version {
    pub const ALL: [Version; 2] = [Version::V1, Version::V2];

    pub fn as_u8(self) -> u8 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
        }
    }
}

impl From<Version> for u8 {
    fn from(version: Version) -> Self {
        version.as_u8()
    }
}

impl TryFrom<u8> for Version {
    type Error = AlertDeskError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Version::V1),
            2 => Ok(Version::V2),
            other => Err(AlertDeskError::invalid_version(other.to_string())),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for Version {
    type Err = AlertDeskError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| AlertDeskError::invalid_version(s.to_string()))
            .and_then(Version::try_from)
    }
}

/// Alert severity. Serialized with the backend's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "ALTA", alias = "HIGH")]
    High,
    #[serde(rename = "MEDIA", alias = "MEDIUM")]
    Medium,
    #[serde(rename = "BAJA", alias = "LOW")]
    Low,
}

impl AlertType {
    pub const ALL: [AlertType; 3] = [AlertType::High, AlertType::Medium, AlertType::Low];

    /// Backend label, also used as the sort key
    pub fn label(self) -> &'static str {
        match self {
            AlertType::High => "ALTA",
            AlertType::Medium => "MEDIA",
            AlertType::Low => "BAJA",
        }
    }

    /// Severity the backend assigns to a measurement.
    ///
    /// Version 1 devices report higher values for worse conditions, version 2
    /// devices the opposite. Values outside the bands are not alerts.
    pub fn classify(version: Version, value: f64) -> Option<AlertType> {
        match version {
            Version::V1 => {
                if value > 200.0 && value <= 500.0 {
                    Some(AlertType::Low)
                } else if value > 500.0 && value <= 800.0 {
                    Some(AlertType::Medium)
                } else if value > 800.0 && value < 1000.0 {
                    Some(AlertType::High)
                } else {
                    None
                }
            }
            Version::V2 => {
                if (0.0..200.0).contains(&value) {
                    Some(AlertType::High)
                } else if (200.0..500.0).contains(&value) {
                    Some(AlertType::Medium)
                } else if (500.0..800.0).contains(&value) {
                    Some(AlertType::Low)
                } else {
                    None
                }
            }
        }
    }
}

enum_display_fromstr!(
    AlertType,
    AlertDeskError::invalid_alert_type,
    {
        High => "ALTA" | "high",
        Medium => "MEDIA" | "medium",
        Low => "BAJA" | "low",
    }
);

/// An alert record as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Backend identifier, absent on backends that do not expose it
    #[serde(rename = "id_alerta", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Local timestamp formatted as `YYYY-MM-DD HH:MM:SS`
    pub datetime: String,
    #[serde(deserialize_with = "deserialize_value")]
    pub value: f64,
    pub version: Version,
    #[serde(rename = "type", default)]
    pub alert_type: Option<AlertType>,
    #[serde(default)]
    pub sended: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueInput {
    Number(f64),
    Text(String),
}

/// Decimal columns may come back as JSON strings
fn deserialize_value<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match ValueInput::deserialize(deserializer)? {
        ValueInput::Number(number) => number,
        ValueInput::Text(text) => text.trim().parse::<f64>().map_err(DeError::custom)?,
    };
    if !value.is_finite() {
        return Err(DeError::custom(format!("alert value must be finite, got {value}")));
    }
    Ok(value)
}

/// A filter dimension that is either unrestricted or pinned to one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T: Copy> Selection<T> {
    pub fn value(&self) -> Option<T> {
        self.as_option().copied()
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Selection::Only(value),
            None => Selection::All,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Only(value) => write!(f, "{value}"),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = AlertDeskError>,
{
    type Err = AlertDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if ["all", "todos", "todas"]
            .iter()
            .any(|label| trimmed.eq_ignore_ascii_case(label))
        {
            return Ok(Selection::All);
        }
        trimmed.parse().map(Selection::Only)
    }
}

/// Three-valued "was it sent" filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SendedFilter {
    #[default]
    All,
    Sent,
    Unsent,
}

impl SendedFilter {
    /// Wire value: `null` for all, otherwise the boolean
    pub fn as_query_value(self) -> Option<bool> {
        match self {
            SendedFilter::All => None,
            SendedFilter::Sent => Some(true),
            SendedFilter::Unsent => Some(false),
        }
    }
}

enum_display_fromstr!(
    SendedFilter,
    AlertDeskError::invalid_sended_filter,
    {
        All => "todos" | "all",
        Sent => "si" | "sí" | "yes" | "true",
        Unsent => "no" | "false",
    }
);

/// Largest window the backend processes synchronously
pub const MAX_SYNC_WINDOW_DAYS: u64 = 30;

static WINDOW_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)([mhd])$").expect("window pattern is valid"));

/// Unit of a processing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowUnit {
    Minutes,
    Hours,
    Days,
}

impl WindowUnit {
    fn suffix(self) -> char {
        match self {
            WindowUnit::Minutes => 'm',
            WindowUnit::Hours => 'h',
            WindowUnit::Days => 'd',
        }
    }

    fn minutes(self) -> u64 {
        match self {
            WindowUnit::Minutes => 1,
            WindowUnit::Hours => 60,
            WindowUnit::Days => 60 * 24,
        }
    }
}

/// Look-back window for processing, written like `15m`, `3h` or `30d`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeWindow {
    amount: u64,
    unit: WindowUnit,
}

impl TimeWindow {
    pub fn new(amount: u64, unit: WindowUnit) -> Self {
        Self { amount, unit }
    }

    pub fn days(amount: u64) -> Self {
        Self::new(amount, WindowUnit::Days)
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn unit(&self) -> WindowUnit {
        self.unit
    }

    pub fn total_minutes(&self) -> u64 {
        self.amount.saturating_mul(self.unit.minutes())
    }

    /// Whether the backend will process this window inside the request
    pub fn is_sync_eligible(&self) -> bool {
        self.total_minutes() <= MAX_SYNC_WINDOW_DAYS * WindowUnit::Days.minutes()
    }

    /// Fails for windows only the async endpoint accepts
    pub fn ensure_sync(self) -> Result<Self> {
        if self.is_sync_eligible() {
            Ok(self)
        } else {
            Err(AlertDeskError::InvalidTimeWindow(
                self.to_string(),
                format!("synchronous processing is limited to {MAX_SYNC_WINDOW_DAYS} days"),
            ))
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::days(MAX_SYNC_WINDOW_DAYS)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for TimeWindow {
    type Err = AlertDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = WINDOW_PATTERN.captures(s).ok_or_else(|| {
            AlertDeskError::InvalidTimeWindow(
                s.to_string(),
                "expected a number followed by m, h or d".to_string(),
            )
        })?;

        let amount = caps[1].parse::<u64>().map_err(|_| {
            AlertDeskError::InvalidTimeWindow(s.to_string(), "amount is too large".to_string())
        })?;
        let unit = match &caps[2] {
            "m" => WindowUnit::Minutes,
            "h" => WindowUnit::Hours,
            _ => WindowUnit::Days,
        };

        Ok(TimeWindow { amount, unit })
    }
}

impl From<TimeWindow> for String {
    fn from(window: TimeWindow) -> Self {
        window.to_string()
    }
}

impl TryFrom<String> for TimeWindow {
    type Error = AlertDeskError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
