use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Panel input limits for duration timers.
pub const MAX_HOURS: u64 = 999;
pub const MAX_MINUTES: u64 = 59;
pub const MAX_SECONDS: u64 = 59;

/// Repeating interval `R/PT<N><H|M|S>`, searched anywhere in the value.
static ISO8601_CYCLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)R/PT(\d+)([HMS])").unwrap());

/// Timer variant. Unrecognized values are kept as written.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TimerType {
    #[default]
    Duration,
    Date,
    Cycle,
    Other(String),
}

impl TimerType {
    pub fn as_str(&self) -> &str {
        match self {
            TimerType::Duration => "duration",
            TimerType::Date => "date",
            TimerType::Cycle => "cycle",
            TimerType::Other(s) => s,
        }
    }
}

impl From<String> for TimerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "duration" => TimerType::Duration,
            "date" => TimerType::Date,
            "cycle" => TimerType::Cycle,
            _ => TimerType::Other(s),
        }
    }
}

impl From<TimerType> for String {
    fn from(t: TimerType) -> Self {
        t.as_str().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u64>,
}

impl DurationConfig {
    pub fn new(
        hours: u64,
        minutes: u64,
        seconds: u64,
    ) -> Self {
        Self {
            hours: Some(hours),
            minutes: Some(minutes),
            seconds: Some(seconds),
        }
    }

    pub fn hours(&self) -> u64 {
        self.hours.unwrap_or(0)
    }

    pub fn minutes(&self) -> u64 {
        self.minutes.unwrap_or(0)
    }

    pub fn seconds(&self) -> u64 {
        self.seconds.unwrap_or(0)
    }

    /// Total wait in milliseconds, saturating on overflow.
    pub fn total_millis(&self) -> u64 {
        self.hours()
            .saturating_mul(3600)
            .saturating_add(self.minutes().saturating_mul(60))
            .saturating_add(self.seconds())
            .saturating_mul(1000)
    }

    /// Human readable form, e.g. `1h 30m 0s`.
    pub fn formatted(&self) -> String {
        format!("{}h {}m {}s", self.hours(), self.minutes(), self.seconds())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct DateConfig {
    /// calendar date, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// wall clock time, `HH:MM`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl DateConfig {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            date: Some(date.into()),
            time: Some(time.into()),
        }
    }

    /// Local date-time the timer fires at, `None` unless both parts are set.
    pub fn target(&self) -> Option<String> {
        match (non_empty(&self.date), non_empty(&self.time)) {
            (Some(date), Some(time)) => Some(format!("{}T{}:00", date, time)),
            _ => None,
        }
    }
}

/// Cycle expression flavour. Unrecognized values are kept as written.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum CycleType {
    Iso8601,
    Cron,
    Other(String),
}

impl CycleType {
    pub fn as_str(&self) -> &str {
        match self {
            CycleType::Iso8601 => "iso8601",
            CycleType::Cron => "cron",
            CycleType::Other(s) => s,
        }
    }
}

impl From<String> for CycleType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "iso8601" => CycleType::Iso8601,
            "cron" => CycleType::Cron,
            _ => CycleType::Other(s),
        }
    }
}

impl From<CycleType> for String {
    fn from(t: CycleType) -> Self {
        t.as_str().to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleConfig {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CycleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl CycleConfig {
    pub fn new(
        kind: CycleType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind),
            value: Some(value.into()),
        }
    }

    /// Type and value, `None` when either is missing or empty.
    pub fn parts(&self) -> Option<(&CycleType, &str)> {
        let kind = self.kind.as_ref().filter(|k| !k.as_str().is_empty())?;
        let value = non_empty(&self.value)?;
        Some((kind, value))
    }
}

/// Parse an ISO 8601 repeating interval into its period in milliseconds.
///
/// The first `R/PT<N><H|M|S>` in `value` wins, so `R/PT5M30S` is a five
/// minute period. Returns `None` when there is no such part or the period
/// does not fit in a `u64`.
pub fn parse_iso8601_interval(value: &str) -> Option<u64> {
    let caps = ISO8601_CYCLE.captures(value)?;

    let amount = caps[1].parse::<u64>().ok()?;
    let unit_ms = match caps[2].to_ascii_uppercase().as_str() {
        "H" => 60 * 60 * 1000,
        "M" => 60 * 1000,
        _ => 1000,
    };
    amount.checked_mul(unit_ms)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    #[default]
    Start,
    Intermediate,
    Boundary,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub event_type: EventType,
    /// boundary events only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupting: Option<bool>,
    /// boundary events only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_action: Option<String>,
}

impl EventConfig {
    pub fn boundary(
        interrupting: bool,
        escalation_action: impl Into<String>,
    ) -> Self {
        Self {
            event_type: EventType::Boundary,
            interrupting: Some(interrupting),
            escalation_action: Some(escalation_action.into()),
        }
    }

    pub fn is_interrupting(&self) -> bool {
        self.interrupting.unwrap_or(false)
    }

    /// Escalation action of a boundary event, if one is set.
    pub fn escalation(&self) -> Option<&str> {
        if self.event_type != EventType::Boundary {
            return None;
        }
        non_empty(&self.escalation_action)
    }
}

/// Content of a timer node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerConfig {
    pub timer_type: TimerType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_config: Option<DurationConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_config: Option<DateConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_config: Option<CycleConfig>,
    #[serde(default)]
    pub event_config: EventConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            timer_type: TimerType::Duration,
            duration_config: Some(DurationConfig::new(0, 0, 0)),
            date_config: None,
            cycle_config: None,
            event_config: EventConfig::default(),
            description: Some(String::new()),
        }
    }
}

impl TimerConfig {
    pub fn duration(config: DurationConfig) -> Self {
        Self {
            duration_config: Some(config),
            ..Default::default()
        }
    }

    pub fn date(config: DateConfig) -> Self {
        Self {
            timer_type: TimerType::Date,
            duration_config: None,
            date_config: Some(config),
            ..Default::default()
        }
    }

    pub fn cycle(config: CycleConfig) -> Self {
        Self {
            timer_type: TimerType::Cycle,
            duration_config: None,
            cycle_config: Some(config),
            ..Default::default()
        }
    }

    pub fn with_event(
        mut self,
        event_config: EventConfig,
    ) -> Self {
        self.event_config = event_config;
        self
    }

    pub fn with_description(
        mut self,
        description: impl Into<String>,
    ) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description if set, `Timer Event` otherwise.
    pub fn label(&self) -> &str {
        non_empty(&self.description).unwrap_or("Timer Event")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_content() {
        let config: TimerConfig = serde_json::from_value(json!({
            "timerType": "cycle",
            "cycleConfig": { "type": "iso8601", "value": "R/PT5M" },
            "eventConfig": { "eventType": "boundary", "interrupting": true, "escalationAction": "Notify manager" },
            "description": "Reminder"
        }))
        .unwrap();

        assert_eq!(config.timer_type, TimerType::Cycle);
        assert_eq!(config.cycle_config.as_ref().unwrap().parts(), Some((&CycleType::Iso8601, "R/PT5M")));
        assert_eq!(config.event_config.escalation(), Some("Notify manager"));
        assert!(config.event_config.is_interrupting());
        assert_eq!(config.label(), "Reminder");
    }

    #[test]
    fn test_unknown_types_are_preserved() {
        let config: TimerConfig = serde_json::from_value(json!({
            "timerType": "weekly",
            "cycleConfig": { "type": "rrule", "value": "FREQ=DAILY" },
            "eventConfig": { "eventType": "start" }
        }))
        .unwrap();

        assert_eq!(config.timer_type, TimerType::Other("weekly".to_string()));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["timerType"], json!("weekly"));
        assert_eq!(value["cycleConfig"]["type"], json!("rrule"));
    }

    #[test]
    fn test_duration_totals() {
        let duration = DurationConfig {
            minutes: Some(10),
            ..Default::default()
        };
        assert_eq!(duration.total_millis(), 600_000);
        assert_eq!(duration.formatted(), "0h 10m 0s");
        assert_eq!(DurationConfig::new(1, 1, 1).total_millis(), 3_661_000);
        assert_eq!(DurationConfig::new(u64::MAX, 0, 0).total_millis(), u64::MAX);
    }

    #[test]
    fn test_date_target() {
        assert_eq!(DateConfig::new("2025-03-01", "09:30").target(), Some("2025-03-01T09:30:00".to_string()));
        assert_eq!(
            DateConfig {
                date: Some("2025-03-01".to_string()),
                time: None,
            }
            .target(),
            None
        );
        assert_eq!(DateConfig::new("", "09:30").target(), None);
    }

    #[test]
    fn test_parse_iso8601_interval() {
        assert_eq!(parse_iso8601_interval("R/PT5M"), Some(300_000));
        assert_eq!(parse_iso8601_interval("R/PT2H"), Some(7_200_000));
        assert_eq!(parse_iso8601_interval("R/PT30S"), Some(30_000));
        assert_eq!(parse_iso8601_interval("r/pt5m"), Some(300_000));
        assert_eq!(parse_iso8601_interval("R/PT5D"), None);
        assert_eq!(parse_iso8601_interval("R5/PT5M"), None);
        assert_eq!(parse_iso8601_interval("R/PTM"), None);
        assert_eq!(parse_iso8601_interval("R/PT99999999999999999999H"), None);
    }

    #[test]
    fn test_parse_iso8601_interval_takes_first_period() {
        assert_eq!(parse_iso8601_interval("R/PT5M30S"), Some(300_000));
        assert_eq!(parse_iso8601_interval("R/PT10M/2025-01-01T00:00:00Z"), Some(600_000));
        assert_eq!(parse_iso8601_interval(" R/PT1h "), Some(3_600_000));
        assert_eq!(parse_iso8601_interval("every R/PT2S"), Some(2_000));
    }

    #[test]
    fn test_cycle_parts_require_both() {
        let cycle = CycleConfig {
            kind: Some(CycleType::Iso8601),
            value: None,
        };
        assert_eq!(cycle.parts(), None);
        assert_eq!(CycleConfig::new(CycleType::Cron, "").parts(), None);
    }

    #[test]
    fn test_escalation_only_for_boundary() {
        let mut event = EventConfig::boundary(false, "Notify");
        assert_eq!(event.escalation(), Some("Notify"));
        event.event_type = EventType::Intermediate;
        assert_eq!(event.escalation(), None);
    }
}
