use opentelemetry::metrics::{Counter, Histogram};
use opentelemetry::{global, KeyValue};
use std::sync::OnceLock;
use std::time::Instant;

/// OpenTelemetry metrics for list command observability.
///
/// Singleton instance accessed via `Metrics::get()`.
pub struct Metrics {
    pub commands_total: Counter<u64>,
    pub command_duration: Histogram<f64>,
    pub errors_total: Counter<u64>,

    // Item flow through the store
    pub items_pushed_total: Counter<u64>,
    pub items_removed_total: Counter<u64>,
}

static METRICS: OnceLock<Metrics> = OnceLock::new();

impl Metrics {
    pub fn init() -> &'static Self {
        METRICS.get_or_init(|| {
            let meter = global::meter("coral-list");

            Metrics {
                commands_total: meter
                    .u64_counter("coral_list_commands_total")
                    .with_description("Total number of list commands executed")
                    .init(),

                command_duration: meter
                    .f64_histogram("coral_list_command_duration_seconds")
                    .with_description("Command execution duration in seconds")
                    .init(),

                errors_total: meter
                    .u64_counter("coral_list_errors_total")
                    .with_description("Total number of failed commands")
                    .init(),

                items_pushed_total: meter
                    .u64_counter("coral_list_items_pushed_total")
                    .with_description("Total number of items pushed onto lists")
                    .init(),

                items_removed_total: meter
                    .u64_counter("coral_list_items_removed_total")
                    .with_description("Total number of items popped, removed or trimmed")
                    .init(),
            }
        })
    }

    pub fn get() -> &'static Self {
        METRICS.get().unwrap_or_else(Self::init)
    }

    pub fn record_command(&self, command: &str, duration: f64) {
        let labels = &[KeyValue::new("command", command.to_string())];
        self.commands_total.add(1, labels);
        self.command_duration.record(duration, labels);
    }

    pub fn record_error(&self, error_type: &str, command: Option<&str>) {
        let mut labels = vec![KeyValue::new("error_type", error_type.to_string())];
        if let Some(cmd) = command {
            labels.push(KeyValue::new("command", cmd.to_string()));
        }
        self.errors_total.add(1, &labels);
    }

    pub fn record_pushed(&self, count: u64) {
        self.items_pushed_total.add(count, &[]);
    }

    pub fn record_removed(&self, count: u64) {
        self.items_removed_total.add(count, &[]);
    }
}

/// Timer utility for measuring durations.
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
