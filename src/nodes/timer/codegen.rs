//! Renders a timer configuration into the source of a function node.
//!
//! Invalid sub-configurations do not fail generation. The emitted code throws
//! a descriptive error when it runs instead.

use super::models::{CycleConfig, CycleType, DateConfig, DurationConfig, EventConfig, TimerConfig, TimerType, parse_iso8601_interval};
use crate::{CodegenOptions, utils::js};

/// Generate the handler source for `config`.
pub(crate) fn generate(
    config: &TimerConfig,
    options: &CodegenOptions,
) -> String {
    let implementation = match &config.timer_type {
        TimerType::Duration => duration_code(config.duration_config.as_ref(), &config.event_config),
        TimerType::Date => date_code(config.date_config.as_ref()),
        TimerType::Cycle => cycle_code(config.cycle_config.as_ref(), options),
        TimerType::Other(_) => String::new(),
    };

    let label = config.label();
    let timer_type = js::string_literal(config.timer_type.as_str());
    let event_type = js::string_literal(config.event_config.event_type.as_ref());

    let mut code = String::new();
    code.push_str(&format!("import zen from {};\n\n", js::single_quoted(&options.zen_module)));
    code.push_str("/**\n");
    code.push_str(" * Auto-generated Timer Function\n");
    code.push_str(&format!(" * {}\n", js::block_comment(label)));
    code.push_str(" *\n");
    code.push_str(&format!(" * Timer Type: {}\n", js::block_comment(config.timer_type.as_str())));
    code.push_str(&format!(" * Event Type: {}\n", config.event_config.event_type.as_ref()));
    code.push_str(" *\n");
    code.push_str(" * @param {Object} input - The input object\n");
    code.push_str(" * @returns {Promise<any>} The timer result\n");
    code.push_str(" */\n");
    code.push_str("export const handler = async (input) => {\n");
    code.push_str(&format!("  console.log({});\n\n", js::string_literal(&format!("Timer event started: {}", label))));
    code.push_str("  try {\n");
    code.push_str(&implementation);
    code.push_str(&format!(
        "

    // Return the result
    return {{
      status: \"completed\",
      timerType: {timer_type},
      eventType: {event_type},
      input: input,
      timestamp: new Date().toISOString()
    }};
  }} catch (error) {{
    console.error(\"Timer error:\", error);
    return {{
      status: \"error\",
      error: error.message,
      timerType: {timer_type},
      eventType: {event_type},
      input: input,
      timestamp: new Date().toISOString()
    }};
  }}
}};"
    ));
    code
}

/// Code that throws `message` when run.
fn failure_code(
    comment: &str,
    message: &str,
) -> String {
    let message = js::string_literal(message);
    format!(
        "    // {}
    console.log({message});
    throw new Error({message});",
        js::line_comment(comment)
    )
}

fn duration_code(
    duration: Option<&DurationConfig>,
    event: &EventConfig,
) -> String {
    let duration = duration.cloned().unwrap_or_default();
    let formatted = duration.formatted();
    let total_ms = duration.total_millis();

    let mut code = format!(
        "    // Duration timer: {formatted}
    console.log(\"Waiting for {formatted}...\");
    await new Promise(resolve => setTimeout(resolve, {total_ms}));
    console.log(\"Duration timer completed after {formatted}\");"
    );

    if let Some(action) = event.escalation() {
        let note = if event.is_interrupting() {
            "// This is an interrupting boundary event - the original task will be stopped"
        } else {
            "// This is a non-interrupting boundary event - the original task will continue"
        };
        code.push_str(&format!(
            "

    // Boundary event escalation
    console.log({});
    {note}",
            js::string_literal(&format!("Executing escalation action: {}", action))
        ));
    }

    code
}

fn date_code(date: Option<&DateConfig>) -> String {
    let Some(target) = date.and_then(DateConfig::target) else {
        return failure_code("Invalid date configuration", "Invalid date configuration");
    };

    format!(
        "    // Date timer: {comment}
    const targetDate = new Date({literal});
    const now = new Date();

    if (now >= targetDate) {{
      console.log(\"Target date already passed\");
    }} else {{
      const timeToWait = targetDate.getTime() - now.getTime();
      console.log({waiting} + \" (approximately \" + Math.round(timeToWait / 1000 / 60) + \" minutes)...\");

      await new Promise(resolve => setTimeout(resolve, timeToWait));
      console.log(\"Date timer triggered at\", new Date().toISOString());
    }}",
        comment = js::line_comment(&target),
        literal = js::string_literal(&target),
        waiting = js::string_literal(&format!("Waiting until {}", target)),
    )
}

fn cycle_code(
    cycle: Option<&CycleConfig>,
    options: &CodegenOptions,
) -> String {
    let Some((kind, value)) = cycle.and_then(CycleConfig::parts) else {
        return failure_code("Invalid cycle configuration", "Invalid cycle configuration");
    };

    match kind {
        CycleType::Iso8601 => iso8601_code(value, options),
        CycleType::Cron => cron_code(value, options),
        CycleType::Other(other) => failure_code(&format!("Unsupported cycle type: {}", other), "Unsupported cycle type"),
    }
}

fn iso8601_code(
    value: &str,
    options: &CodegenOptions,
) -> String {
    let period = parse_iso8601_interval(value).and_then(|ms| ms.checked_mul(options.cycle_iterations).map(|total| (ms, total)));
    let Some((interval_ms, total_ms)) = period else {
        return failure_code(&format!("Invalid ISO 8601 format: {}", value), "Invalid ISO 8601 format");
    };

    format!(
        "    // Cycle timer (ISO 8601): {comment}
    console.log({setup});

    // In a real environment, you would use a proper scheduler
    // This is a simplified implementation for demonstration
    let iteration = 0;
    const interval = setInterval(() => {{
      iteration++;
      console.log(`Cycle timer triggered (iteration ${{iteration}})`);

      // Process the timer event
      // In a real implementation, this would trigger a new process instance

    }}, {interval_ms});

    // For demonstration purposes, run for a few iterations then clear
    await new Promise(resolve => setTimeout(resolve, {total_ms}));
    clearInterval(interval);
    console.log(\"Cycle timer demonstration completed\");",
        comment = js::line_comment(value),
        setup = js::string_literal(&format!("Setting up cycle timer for {}", value)),
    )
}

fn cron_code(
    value: &str,
    options: &CodegenOptions,
) -> String {
    format!(
        "    // Cycle timer (CRON): {comment}
    console.log({setup});

    // In a real environment, you would use a proper CRON scheduler
    // This is a simplified implementation for demonstration
    console.log(\"CRON scheduling is not implemented in this demo\");
    console.log({schedule});

    // Simulate a few executions
    for (let i = 1; i <= {iterations}; i++) {{
      console.log(`Simulating CRON execution #${{i}}`);
      await new Promise(resolve => setTimeout(resolve, {interval}));
    }}",
        comment = js::line_comment(value),
        setup = js::string_literal(&format!("Setting up cycle timer with CRON expression: {}", value)),
        schedule = js::string_literal(&format!("In a production environment, this would schedule: {}", value)),
        iterations = options.cycle_iterations,
        interval = options.cron_interval_ms,
    )
}
