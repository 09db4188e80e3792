//! Agregação dos resultados e renderização da saída do plugin.
//!
//! ```text
//! NEON OK - 22.5 °C, 45 % | temperature=22.5;10:30;10:30 humidity=45;20:60;20:60
//! ```

use crate::context::{Context, EvaluationResult, Performance};
use crate::error::{CheckError, Result};
use crate::metric::Metric;
use crate::resource::Resource;
use crate::status::Status;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Avalia cada métrica contra seu contexto.
///
/// Toda métrica precisa de um contexto e todo contexto de uma métrica.
/// Os resultados seguem a ordem de declaração dos contextos.
pub fn run(metrics: &[Metric], contexts: &[Context]) -> Result<(Status, Vec<EvaluationResult>)> {
    let pairs = match_pairs(metrics, contexts)?;
    let results: Vec<EvaluationResult> = pairs
        .iter()
        .map(|(metric, context)| context.evaluate(metric))
        .collect();
    let overall = Status::worst(results.iter().map(|r| r.status));
    Ok((overall, results))
}

fn match_pairs<'a>(
    metrics: &'a [Metric],
    contexts: &'a [Context],
) -> Result<Vec<(&'a Metric, &'a Context)>> {
    let mut seen = HashSet::new();
    for metric in metrics {
        if !seen.insert(metric.name.as_str()) {
            return Err(CheckError::DuplicateMetric(metric.name.clone()));
        }
        if !contexts.iter().any(|c| c.metric_name == metric.name) {
            return Err(CheckError::UnknownMetric(metric.name.clone()));
        }
    }

    contexts
        .iter()
        .map(|context| {
            metrics
                .iter()
                .find(|m| m.name == context.metric_name)
                .map(|metric| (metric, context))
                .ok_or_else(|| CheckError::UnknownMetric(context.metric_name.clone()))
        })
        .collect()
}

/// Check completo: um recurso avaliado contra um conjunto fixo de contextos.
#[derive(Debug, Clone)]
pub struct Check {
    contexts: Vec<Context>,
}

impl Check {
    pub fn new(contexts: Vec<Context>) -> Self {
        Self { contexts }
    }

    /// Coleta as métricas do recurso e produz o resultado final.
    pub fn evaluate(&self, resource: &dyn Resource) -> Result<Outcome> {
        let metrics = resource.probe()?;
        let (status, results) = run(&metrics, &self.contexts)?;
        let performance = self
            .contexts
            .iter()
            .zip(&results)
            .map(|(context, result)| context.performance(result.value))
            .collect();

        for r in &results {
            debug!("{} = {} → {}", r.metric_name, r.value, r.status);
        }

        Ok(Outcome {
            name: resource.name().to_string(),
            status,
            results,
            performance,
            message: None,
        })
    }
}

/// Resultado de uma execução, pronto para impressão.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub name: String,
    pub status: Status,
    pub results: Vec<EvaluationResult>,
    pub performance: Vec<Performance>,
    /// Mensagem de erro que substitui o resumo.
    pub message: Option<String>,
}

impl Outcome {
    /// Saída de falha: qualquer erro vira UNKNOWN com a mensagem como resumo.
    pub fn unknown(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Unknown,
            results: Vec::new(),
            performance: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status.exit_code()
    }

    /// Texto entre o status e a performance data.
    pub fn summary(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }

        if self.status == Status::Ok {
            return self
                .results
                .iter()
                .map(EvaluationResult::value_with_unit)
                .collect::<Vec<_>>()
                .join(", ");
        }

        self.results
            .iter()
            .filter(|r| r.status == self.status)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.status)?;
        let summary = self.summary();
        if !summary.is_empty() {
            write!(f, " - {summary}")?;
        }
        if !self.performance.is_empty() {
            let perf: Vec<String> = self.performance.iter().map(ToString::to_string).collect();
            write!(f, " | {}", perf.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceValues, SensorRecord};
    use crate::resource::NeonResource;

    fn contexts() -> Vec<Context> {
        vec![
            Context::from_specs("temperature", Some("18:26"), Some("10:30")).unwrap(),
            Context::from_specs("humidity", Some("30:70"), Some("20:90")).unwrap(),
        ]
    }

    fn metrics(temp: f64, hum: f64) -> Vec<Metric> {
        vec![
            Metric::new("temperature", temp, "°C"),
            Metric::new("humidity", hum, "%"),
        ]
    }

    fn record(value: &str, unit: &str) -> SensorRecord {
        SensorRecord {
            value: value.into(),
            unit: unit.into(),
            low_alarm: "10".into(),
            high_alarm: "30".into(),
        }
    }

    #[test]
    fn all_ok() {
        let (status, results) = run(&metrics(22.5, 50.0), &contexts()).unwrap();
        assert_eq!(status, Status::Ok);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn overall_is_worst_status() {
        let (status, results) = run(&metrics(22.5, 85.0), &contexts()).unwrap();
        assert_eq!(results[0].status, Status::Ok);
        assert_eq!(results[1].status, Status::Warning);
        assert_eq!(status, Status::Warning);

        let (status, _) = run(&metrics(35.0, 85.0), &contexts()).unwrap();
        assert_eq!(status, Status::Critical);
    }

    #[test]
    fn critical_temperature_with_ok_humidity() {
        let (status, results) = run(&metrics(35.0, 50.0), &contexts()).unwrap();
        assert_eq!(results[0].status, Status::Critical);
        assert_eq!(results[1].status, Status::Ok);
        assert_eq!(status, Status::Critical);
    }

    #[test]
    fn empty_run_is_unknown() {
        let (status, results) = run(&[], &[]).unwrap();
        assert_eq!(status, Status::Unknown);
        assert!(results.is_empty());
    }

    #[test]
    fn results_follow_context_order() {
        let mut reversed = metrics(22.5, 50.0);
        reversed.reverse();
        let (_, results) = run(&reversed, &contexts()).unwrap();
        assert_eq!(results[0].metric_name, "temperature");
        assert_eq!(results[1].metric_name, "humidity");
    }

    #[test]
    fn metric_without_context_fails() {
        let mut extra = metrics(22.5, 50.0);
        extra.push(Metric::new("pressure", 1013.0, "hPa"));
        assert!(matches!(
            run(&extra, &contexts()),
            Err(CheckError::UnknownMetric(name)) if name == "pressure"
        ));
    }

    #[test]
    fn context_without_metric_fails() {
        let only_temp = vec![Metric::new("temperature", 22.5, "°C")];
        assert!(matches!(
            run(&only_temp, &contexts()),
            Err(CheckError::UnknownMetric(name)) if name == "humidity"
        ));
    }

    #[test]
    fn duplicate_metric_fails() {
        let mut dup = metrics(22.5, 50.0);
        dup.push(Metric::new("humidity", 51.0, "%"));
        assert!(matches!(
            run(&dup, &contexts()),
            Err(CheckError::DuplicateMetric(name)) if name == "humidity"
        ));
    }

    #[test]
    fn renders_ok_line() {
        let resource = NeonResource::new(
            "NEON",
            DeviceValues {
                temperature: record("22.5", "°C"),
                humidity: record("45", "%"),
            },
        );
        let outcome = Check::new(contexts()).evaluate(&resource).unwrap();
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            outcome.to_string(),
            "NEON OK - 22.5 °C, 45 % | temperature=22.5;18:26;10:30 humidity=45;30:70;20:90"
        );
    }

    #[test]
    fn renders_problem_line() {
        let resource = NeonResource::new(
            "NEON",
            DeviceValues {
                temperature: record("35", "°C"),
                humidity: record("50", "%"),
            },
        );
        let outcome = Check::new(contexts()).evaluate(&resource).unwrap();
        assert_eq!(outcome.status, Status::Critical);
        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(
            outcome.to_string(),
            "NEON CRITICAL - temperature 35 °C (outside range 10:30) \
             | temperature=35;18:26;10:30 humidity=50;30:70;20:90"
        );
    }

    #[test]
    fn renders_unknown_line() {
        let outcome = Outcome::unknown("NEON", "Connection refused");
        assert_eq!(outcome.exit_code(), 3);
        assert_eq!(outcome.to_string(), "NEON UNKNOWN - Connection refused");
    }
}
