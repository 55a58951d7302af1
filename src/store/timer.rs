use super::PanelStore;
use crate::nodes::{CycleConfig, DateConfig, DurationConfig, EventConfig, TimerConfig, TimerType};

impl PanelStore<TimerConfig> {
    pub fn set_timer_type(
        &self,
        timer_type: TimerType,
    ) {
        self.update(|s| s.timer_type = timer_type);
    }

    pub fn set_duration_config(
        &self,
        config: DurationConfig,
    ) {
        self.update(|s| s.duration_config = Some(config));
    }

    pub fn set_date_config(
        &self,
        config: DateConfig,
    ) {
        self.update(|s| s.date_config = Some(config));
    }

    pub fn set_cycle_config(
        &self,
        config: CycleConfig,
    ) {
        self.update(|s| s.cycle_config = Some(config));
    }

    pub fn set_event_config(
        &self,
        config: EventConfig,
    ) {
        self.update(|s| s.event_config = config);
    }

    pub fn set_description(
        &self,
        description: impl Into<String>,
    ) {
        let description = description.into();
        self.update(|s| s.description = Some(description));
    }
}
