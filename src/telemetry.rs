use crate::config::TelemetrySettings;
use opentelemetry::global;
use opentelemetry_sdk::metrics::MeterProvider;
use tracing::info;

/// Installs the global meter provider used by [`crate::metrics::Metrics`].
pub struct TelemetryService {
    enabled: bool,
}

impl TelemetryService {
    pub fn new(settings: &TelemetrySettings) -> Self {
        if settings.enable_metrics {
            let provider = MeterProvider::builder().build();
            global::set_meter_provider(provider);
        }

        Self {
            enabled: settings.enable_metrics,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Initialize telemetry from settings and register the list metrics.
pub fn init_telemetry(settings: &TelemetrySettings) -> TelemetryService {
    let service = TelemetryService::new(settings);

    if !service.is_enabled() {
        info!("Metrics collection disabled");
        return service;
    }

    crate::metrics::Metrics::init();
    info!("OpenTelemetry metrics initialized");
    service
}
