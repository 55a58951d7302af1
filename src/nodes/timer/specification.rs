use chrono::{NaiveDate, NaiveTime};
use serde_json::Value as JsonValue;

use super::{
    codegen,
    models::{CycleType, EventType, MAX_HOURS, MAX_MINUTES, MAX_SECONDS, TimerConfig, TimerType, parse_iso8601_interval},
};
use crate::{
    CodegenOptions, NodeKind,
    nodes::{Diagnostic, NodeSpecification},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

impl NodeSpecification for TimerConfig {
    const KIND: NodeKind = NodeKind::TimerNode;
    const LABEL: &'static str = "Timer";

    fn display_name() -> &'static str {
        "Timer"
    }

    fn short_description() -> &'static str {
        "Configure timer events"
    }

    fn schema() -> JsonValue {
        let count = serde_json::json!({ "type": ["integer", "null"], "minimum": 0 });
        let text = serde_json::json!({ "type": ["string", "null"] });

        serde_json::json!({
            "type": "object",
            "required": ["timerType", "eventConfig"],
            "properties": {
                "timerType": {
                    "type": "string",
                    "description": "duration, date or cycle, other values generate no timer logic"
                },
                "durationConfig": {
                    "type": ["object", "null"],
                    "properties": {
                        "hours": count.clone(),
                        "minutes": count.clone(),
                        "seconds": count
                    }
                },
                "dateConfig": {
                    "type": ["object", "null"],
                    "properties": {
                        "date": text.clone(),
                        "time": text.clone()
                    }
                },
                "cycleConfig": {
                    "type": ["object", "null"],
                    "properties": {
                        "type": text.clone(),
                        "value": text.clone()
                    }
                },
                "eventConfig": {
                    "type": "object",
                    "required": ["eventType"],
                    "properties": {
                        "eventType": {
                            "type": "string",
                            "enum": ["start", "intermediate", "boundary"]
                        },
                        "interrupting": { "type": ["boolean", "null"] },
                        "escalationAction": text.clone()
                    }
                },
                "description": text
            }
        })
    }

    fn default_name(index: usize) -> String {
        format!("timer{}", index)
    }

    fn helpers(&self) -> Vec<String> {
        let event = match self.event_config.event_type {
            EventType::Start => "Start Event".to_string(),
            EventType::Intermediate => "Intermediate Event".to_string(),
            EventType::Boundary => format!(
                "Boundary Event {}",
                if self.event_config.is_interrupting() { "(Interrupting)" } else { "(Non-interrupting)" }
            ),
        };

        vec![event, self.summary()]
    }

    fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match &self.timer_type {
            TimerType::Duration => {
                let duration = self.duration_config.clone().unwrap_or_default();
                for (field, value, max) in [
                    ("durationConfig.hours", duration.hours(), MAX_HOURS),
                    ("durationConfig.minutes", duration.minutes(), MAX_MINUTES),
                    ("durationConfig.seconds", duration.seconds(), MAX_SECONDS),
                ] {
                    if value > max {
                        diagnostics.push(Diagnostic::warning(field, format!("value exceeds the maximum of {}", max)));
                    }
                }
                if duration.total_millis() == 0 {
                    diagnostics.push(Diagnostic::warning("durationConfig", "duration is zero, the timer fires immediately"));
                }
            }
            TimerType::Date => {
                let date = self.date_config.clone().unwrap_or_default();
                match date.date.as_deref().filter(|d| !d.is_empty()) {
                    None => diagnostics.push(Diagnostic::error("dateConfig.date", "date is required")),
                    Some(d) if NaiveDate::parse_from_str(d, DATE_FORMAT).is_err() => {
                        diagnostics.push(Diagnostic::error("dateConfig.date", format!("'{}' is not a YYYY-MM-DD date", d)))
                    }
                    Some(_) => {}
                }
                match date.time.as_deref().filter(|t| !t.is_empty()) {
                    None => diagnostics.push(Diagnostic::error("dateConfig.time", "time is required")),
                    Some(t) if NaiveTime::parse_from_str(t, TIME_FORMAT).is_err() => {
                        diagnostics.push(Diagnostic::error("dateConfig.time", format!("'{}' is not a HH:MM time", t)))
                    }
                    Some(_) => {}
                }
            }
            TimerType::Cycle => match self.cycle_config.as_ref().and_then(|c| c.parts()) {
                None => diagnostics.push(Diagnostic::error("cycleConfig", "cycle type and value are required")),
                Some((CycleType::Iso8601, value)) => {
                    if parse_iso8601_interval(value).is_none() {
                        diagnostics.push(Diagnostic::error("cycleConfig.value", format!("'{}' does not match R/PT<n><H|M|S>", value)));
                    }
                }
                Some((CycleType::Cron, value)) => {
                    let fields = value.split_whitespace().count();
                    if fields != 5 && fields != 6 {
                        diagnostics.push(Diagnostic::warning(
                            "cycleConfig.value",
                            format!("CRON expressions have 5 or 6 fields, found {}", fields),
                        ));
                    }
                }
                Some((CycleType::Other(other), _)) => {
                    diagnostics.push(Diagnostic::error("cycleConfig.type", format!("unsupported cycle type '{}'", other)))
                }
            },
            TimerType::Other(other) => {
                diagnostics.push(Diagnostic::warning("timerType", format!("unrecognized timer type '{}' generates no timer logic", other)));
            }
        }

        let has_escalation = self.event_config.escalation_action.as_deref().is_some_and(|a| !a.is_empty());
        if has_escalation && self.event_config.event_type != EventType::Boundary {
            diagnostics.push(Diagnostic::warning(
                "eventConfig.escalationAction",
                "escalation actions only apply to boundary events",
            ));
        }

        diagnostics
    }

    fn generate_source(
        &self,
        options: &CodegenOptions,
    ) -> String {
        codegen::generate(self, options)
    }
}

impl TimerConfig {
    /// One-line summary shown on the node.
    pub fn summary(&self) -> String {
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            return description.to_string();
        }

        match &self.timer_type {
            TimerType::Duration => {
                let duration = self.duration_config.clone().unwrap_or_default();
                format!("Duration: {}", duration.formatted())
            }
            TimerType::Date => match self.date_config.as_ref().map(|d| (d.date.as_deref(), d.time.as_deref())) {
                Some((Some(date), Some(time))) if !date.is_empty() && !time.is_empty() => format!("Date: {} {}", date, time),
                _ => "Date Timer".to_string(),
            },
            TimerType::Cycle => match self.cycle_config.as_ref().and_then(|c| c.value.as_deref()).filter(|v| !v.is_empty()) {
                Some(value) => format!("Cycle: {}", value),
                None => "Cycle Timer".to_string(),
            },
            TimerType::Other(_) => "Timer".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::{
        NodeKind, NodecodeError,
        nodes::{CycleConfig, CycleType, DateConfig, DurationConfig, EventConfig, EventType, NodeSpecification, Severity, TimerConfig, TimerType},
    };

    #[test]
    fn test_create_validates_schema() {
        let config = TimerConfig::create(json!({
            "timerType": "duration",
            "durationConfig": { "hours": 1, "minutes": null },
            "eventConfig": { "eventType": "intermediate" }
        }))
        .unwrap();
        assert_eq!(config.event_config.event_type, EventType::Intermediate);
        assert_eq!(config.duration_config.unwrap().total_millis(), 3_600_000);

        let config = TimerConfig::create(json!({ "timerType": "weekly", "eventConfig": { "eventType": "start" } })).unwrap();
        assert_eq!(config.timer_type, TimerType::Other("weekly".to_string()));

        let err = TimerConfig::create(json!({ "timerType": "duration", "eventConfig": { "eventType": "end" } })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));

        let err = TimerConfig::create(json!({ "timerType": "duration", "durationConfig": { "hours": -2 }, "eventConfig": { "eventType": "start" } })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));

        let err = TimerConfig::create(json!({ "eventConfig": { "eventType": "start" } })).unwrap_err();
        assert!(matches!(err, NodecodeError::Schema(_)));
    }

    #[test]
    fn test_generate_node() {
        let node = TimerConfig::generate_node(1).unwrap();
        assert_eq!(node.name, "timer1");
        assert_eq!(node.kind, NodeKind::TimerNode);
        assert_eq!(
            node.content,
            Some(json!({
                "timerType": "duration",
                "durationConfig": { "hours": 0, "minutes": 0, "seconds": 0 },
                "eventConfig": { "eventType": "start" },
                "description": ""
            }))
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(TimerConfig::default().helpers(), vec!["Start Event".to_string(), "Duration: 0h 0m 0s".to_string()]);

        let config = TimerConfig::date(DateConfig::new("2030-01-02", "08:00")).with_event(EventConfig::boundary(true, ""));
        assert_eq!(config.helpers(), vec!["Boundary Event (Interrupting)".to_string(), "Date: 2030-01-02 08:00".to_string()]);

        let config = TimerConfig::cycle(CycleConfig::new(CycleType::Cron, "0 0 * * *")).with_event(EventConfig::boundary(false, ""));
        assert_eq!(config.helpers(), vec!["Boundary Event (Non-interrupting)".to_string(), "Cycle: 0 0 * * *".to_string()]);

        let config = TimerConfig::cycle(CycleConfig::default()).with_description("Nightly");
        assert_eq!(config.summary(), "Nightly");

        assert_eq!(TimerConfig::cycle(CycleConfig::default()).summary(), "Cycle Timer");
        assert_eq!(TimerConfig::date(DateConfig::default()).summary(), "Date Timer");
        let config = TimerConfig {
            timer_type: TimerType::Other("weekly".to_string()),
            ..Default::default()
        };
        assert_eq!(config.summary(), "Timer");
    }

    #[test]
    fn test_duration_diagnostics() {
        let config = TimerConfig::duration(DurationConfig::new(1000, 75, 0));
        let fields = config.diagnostics().into_iter().map(|d| d.field).collect::<Vec<_>>();
        assert_eq!(fields, vec!["durationConfig.hours", "durationConfig.minutes"]);

        let diagnostics = TimerConfig::default().diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, "durationConfig");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_date_diagnostics() {
        assert!(TimerConfig::date(DateConfig::new("2030-12-31", "23:59")).diagnostics().is_empty());

        let diagnostics = TimerConfig::date(DateConfig::new("31/12/2030", "25:00")).diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.is_error()));
        assert_eq!(diagnostics[0].message, "'31/12/2030' is not a YYYY-MM-DD date");
        assert_eq!(diagnostics[1].message, "'25:00' is not a HH:MM time");

        let diagnostics = TimerConfig::date(DateConfig::default()).diagnostics();
        assert_eq!(diagnostics.iter().map(|d| d.message.as_str()).collect::<Vec<_>>(), vec!["date is required", "time is required"]);
    }

    #[test]
    fn test_cycle_diagnostics() {
        assert!(TimerConfig::cycle(CycleConfig::new(CycleType::Iso8601, "R/PT5M")).diagnostics().is_empty());
        assert!(TimerConfig::cycle(CycleConfig::new(CycleType::Cron, "0 0 12 * * ?")).diagnostics().is_empty());

        let diagnostics = TimerConfig::cycle(CycleConfig::new(CycleType::Iso8601, "PT5M")).diagnostics();
        assert_eq!(diagnostics[0].field, "cycleConfig.value");
        assert!(diagnostics[0].is_error());

        let diagnostics = TimerConfig::cycle(CycleConfig::new(CycleType::Cron, "* *")).diagnostics();
        assert_eq!(diagnostics[0].message, "CRON expressions have 5 or 6 fields, found 2");

        let diagnostics = TimerConfig::cycle(CycleConfig::default()).diagnostics();
        assert_eq!(diagnostics[0].field, "cycleConfig");

        let diagnostics = TimerConfig::cycle(CycleConfig::new(CycleType::Other("rrule".to_string()), "x")).diagnostics();
        assert_eq!(diagnostics[0].field, "cycleConfig.type");
    }

    #[test]
    fn test_escalation_outside_boundary() {
        let config = TimerConfig::duration(DurationConfig::new(0, 1, 0)).with_event(EventConfig {
            event_type: EventType::Start,
            interrupting: None,
            escalation_action: Some("Notify".to_string()),
        });
        let diagnostics = config.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].field, "eventConfig.escalationAction");
    }
}
