//! Resolução dos thresholds efetivos de cada métrica.
//!
//! Cada métrica tem overrides independentes de warning e critical. Quando
//! um override está vazio, o range vem dos alarmes do próprio dispositivo
//! (`lowalarm:highalarm`), o mesmo para warning e critical.

use crate::config::ThresholdConfig;
use crate::context::Context;
use crate::device::{DeviceValues, HUMIDITY, SensorRecord, TEMPERATURE};
use crate::error::Result;
use tracing::debug;

/// Spec efetivo: override explícito ou range de alarme do dispositivo.
pub fn resolve(explicit: &str, record: &SensorRecord) -> String {
    if explicit.trim().is_empty() {
        record.alarm_range()
    } else {
        explicit.trim().to_string()
    }
}

/// Monta os contextos de temperatura e umidade, nesta ordem.
pub fn build_contexts(overrides: &ThresholdConfig, values: &DeviceValues) -> Result<Vec<Context>> {
    let specs = [
        (
            TEMPERATURE,
            &values.temperature,
            &overrides.temperature_warning,
            &overrides.temperature_critical,
        ),
        (
            HUMIDITY,
            &values.humidity,
            &overrides.humidity_warning,
            &overrides.humidity_critical,
        ),
    ];

    specs
        .into_iter()
        .map(|(name, record, warning, critical)| {
            let warning = resolve(warning, record);
            let critical = resolve(critical, record);
            debug!("{name}: warning={warning} critical={critical}");
            Context::from_specs(name, Some(&warning), Some(&critical))
        })
        .collect()
}
