//! Fontes de métricas para o check.

use crate::device::{DeviceValues, HUMIDITY, TEMPERATURE};
use crate::error::Result;
use crate::metric::Metric;

/// Produz as métricas de uma execução.
pub trait Resource {
    /// Nome exibido no início da linha de saída (ex: `NEON`).
    fn name(&self) -> &str;

    fn probe(&self) -> Result<Vec<Metric>>;
}

/// Sensor ambiental NEON: temperatura e umidade.
#[derive(Debug, Clone)]
pub struct NeonResource {
    name: String,
    values: DeviceValues,
}

impl NeonResource {
    pub fn new(name: impl Into<String>, values: DeviceValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

impl Resource for NeonResource {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> Result<Vec<Metric>> {
        let temperature = &self.values.temperature;
        let humidity = &self.values.humidity;
        Ok(vec![
            Metric::new(TEMPERATURE, temperature.reading(TEMPERATURE)?, &temperature.unit),
            Metric::new(HUMIDITY, humidity.reading(HUMIDITY)?, &humidity.unit),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::SensorRecord;
    use crate::error::CheckError;

    fn record(value: &str, unit: &str) -> SensorRecord {
        SensorRecord {
            value: value.into(),
            unit: unit.into(),
            low_alarm: "0".into(),
            high_alarm: "100".into(),
        }
    }

    #[test]
    fn probes_temperature_then_humidity() {
        let resource = NeonResource::new(
            "NEON",
            DeviceValues {
                temperature: record("22.5", "°C"),
                humidity: record(" 45 ", "%"),
            },
        );
        let metrics = resource.probe().unwrap();
        assert_eq!(
            metrics,
            vec![
                Metric::new("temperature", 22.5, "°C"),
                Metric::new("humidity", 45.0, "%"),
            ]
        );
        assert_eq!(resource.name(), "NEON");
    }

    #[test]
    fn bad_reading_fails_probe() {
        let resource = NeonResource::new(
            "NEON",
            DeviceValues {
                temperature: record("22.5", "°C"),
                humidity: record("---", "%"),
            },
        );
        assert!(matches!(
            resource.probe(),
            Err(CheckError::InvalidValue { sensor, .. }) if sensor == "humidity"
        ));
    }

    #[test]
    fn nan_reading_is_rejected_by_resource() {
        let resource = NeonResource::new(
            "NEON",
            DeviceValues {
                temperature: record("NaN", "°C"),
                humidity: record("45", "%"),
            },
        );
        assert!(matches!(
            resource.probe(),
            Err(CheckError::InvalidValue { sensor, .. }) if sensor == "temperature"
        ));
    }
}
