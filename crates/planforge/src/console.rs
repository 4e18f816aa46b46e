//! Colorful console output for search events.
//!
//! Provides a custom `tracing` layer that formats planner events with colors.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVE: &str = "planforge_solver=info";

/// Initializes the planner console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// directives are honored on top of `planforge_solver=info`, which shows
/// `solve_start`, the once-a-second `progress` line and `solve_end`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = DEFAULT_DIRECTIVE.parse() {
            filter = filter.add_directive(directive);
        }

        // Another subscriber may already be installed by the host program.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(PlannerConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "PlanForge v{} - bit-vector forward planner",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout);
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = writeln!(stdout);
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct PlannerConsoleLayer;

impl<S: Subscriber> Layer<S> for PlannerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Only handle planforge_solver events
        if !event.metadata().target().starts_with("planforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    domain: Option<String>,
    outcome: Option<String>,
    propositions: Option<u64>,
    actions: Option<u64>,
    plan_length: Option<u64>,
    plan_cost: Option<u64>,
    expansions: Option<u64>,
    generated: Option<u64>,
    duration_ms: Option<u64>,
    frontier: Option<u64>,
    depth: Option<u64>,
    speed: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "event" => self.event = Some(value),
            "strategy" => self.strategy = Some(value),
            "domain" => self.domain = Some(value),
            "outcome" => self.outcome = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "propositions" => self.propositions = Some(value),
            "actions" => self.actions = Some(value),
            "plan_length" => self.plan_length = Some(value),
            "plan_cost" => self.plan_cost = Some(value),
            "expansions" => self.expansions = Some(value),
            "generated" => self.generated = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "frontier" => self.frontier = Some(value),
            "depth" => self.depth = Some(value),
            "speed" => self.speed = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "progress" => format_progress(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    let strategy = v.strategy.as_deref().unwrap_or("unknown");
    let mut line = format!(
        "{} {} {} Search started: strategy ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Planner]".bright_cyan(),
        strategy.white().bold(),
    );
    if let Some(domain) = v.domain.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(
            ", domain ({}), propositions ({})",
            domain.bright_white(),
            count(v.propositions).bright_yellow(),
        ));
    }
    line.push_str(&format!(", actions ({})", count(v.actions).bright_yellow()));
    line
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "    {} Expanded {:>9} | frontier {:>9} | depth {:>4} | {}/sec",
        "->".bright_blue(),
        count(v.expansions).white(),
        count(v.frontier).white(),
        v.depth.unwrap_or(0).to_string().yellow(),
        count(v.speed).bright_magenta(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let outcome = v.outcome.as_deref().unwrap_or("unknown");
    let found = outcome == "plan_found";

    let mut output = format!(
        "{} {} {} Search ended: time spent ({}), expansions ({}), generated ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Planner]".bright_cyan(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        count(v.expansions).bright_magenta().bold(),
        count(v.generated).white(),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = if found { "PLAN FOUND" } else { "NO PLAN" };
    let status_colored = if found {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_red().bold().to_string()
    };
    let status_padding = 56 - status_text.len() - 4;
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    let rows: Vec<(&str, String)> = if found {
        vec![
            ("Plan length:", count(v.plan_length)),
            ("Plan cost:", count(v.plan_cost)),
        ]
    } else {
        vec![("Outcome:", outcome.to_string())]
    };
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<18}{:>36}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_solver::scope::PROGRESS_LEVEL;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let v = EventVisitor {
            event: Some("domain_built".into()),
            ..Default::default()
        };
        assert!(format_event(&v).is_empty());
        assert!(format_event(&EventVisitor::default()).is_empty());
    }

    #[test]
    fn test_solve_end_summary() {
        let found = EventVisitor {
            event: Some("solve_end".into()),
            outcome: Some("plan_found".into()),
            plan_length: Some(3),
            plan_cost: Some(1200),
            expansions: Some(12_345),
            ..Default::default()
        };
        let out = format_event(&found);
        assert!(out.contains("PLAN FOUND"));
        assert!(out.contains("1,200"));
        assert!(out.contains("12,345"));

        let failed = EventVisitor {
            event: Some("solve_end".into()),
            outcome: Some("no plan exists".into()),
            ..Default::default()
        };
        let out = format_event(&failed);
        assert!(out.contains("NO PLAN"));
        assert!(out.contains("no plan exists"));
    }

    #[test]
    fn test_solve_start_omits_empty_domain() {
        let v = EventVisitor {
            event: Some("solve_start".into()),
            strategy: Some("breadth_first".into()),
            domain: Some(String::new()),
            actions: Some(3),
            ..Default::default()
        };
        let out = format_event(&v);
        assert!(out.contains("breadth_first"));
        assert!(!out.contains("domain"));
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<String>>>);

    impl<S: Subscriber> Layer<S> for Captured {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = EventVisitor::default();
            event.record(&mut visitor);
            if let Some(name) = visitor.event {
                self.0.lock().unwrap().push(name);
            }
        }
    }

    #[test]
    fn test_default_filter_passes_progress() {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_DIRECTIVE))
            .with(captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::event!(
                target: "planforge_solver::scope",
                PROGRESS_LEVEL,
                event = "progress",
                expansions = 5u64,
            );
            tracing::trace!(target: "planforge_solver::search", event = "expand");
        });

        assert_eq!(*captured.0.lock().unwrap(), vec!["progress".to_string()]);
    }

    #[test]
    fn test_progress_line() {
        let v = EventVisitor {
            event: Some("progress".into()),
            expansions: Some(1_234_567),
            frontier: Some(890),
            depth: Some(7),
            speed: Some(50_000),
            ..Default::default()
        };
        let out = format_event(&v);
        assert!(out.contains("1,234,567"));
        assert!(out.contains("50,000"));
    }

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }
}
