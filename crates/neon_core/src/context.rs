//! Contextos de avaliação – ligam uma métrica a seus ranges de warning/critical.

use crate::error::Result;
use crate::metric::Metric;
use crate::range::Range;
use crate::status::Status;
use std::fmt;

/// Thresholds configurados para uma métrica.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    pub metric_name: String,
    /// `None` = sem checagem de warning
    pub warning: Option<Range>,
    /// `None` = sem checagem de critical
    pub critical: Option<Range>,
}

/// Resultado da avaliação de uma métrica.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub metric_name: String,
    pub value: f64,
    pub unit: String,
    pub status: Status,
    /// Range violado, quando o status não é OK.
    pub hint: Option<String>,
}

impl Context {
    pub fn new(
        metric_name: impl Into<String>,
        warning: Option<Range>,
        critical: Option<Range>,
    ) -> Self {
        Self {
            metric_name: metric_name.into(),
            warning,
            critical,
        }
    }

    /// Cria o contexto a partir de specs textuais. Spec ausente ou vazio desativa o nível.
    pub fn from_specs(
        metric_name: impl Into<String>,
        warning: Option<&str>,
        critical: Option<&str>,
    ) -> Result<Self> {
        Ok(Self::new(
            metric_name,
            parse_optional(warning)?,
            parse_optional(critical)?,
        ))
    }

    /// Avalia a métrica. Critical tem precedência sobre warning.
    pub fn evaluate(&self, metric: &Metric) -> EvaluationResult {
        let (status, hint) = match (&self.critical, &self.warning) {
            (Some(crit), _) if crit.evaluate(metric.value) => {
                (Status::Critical, Some(crit.violation()))
            }
            (_, Some(warn)) if warn.evaluate(metric.value) => {
                (Status::Warning, Some(warn.violation()))
            }
            _ => (Status::Ok, None),
        };

        EvaluationResult {
            metric_name: metric.name.clone(),
            value: metric.value,
            unit: metric.unit.clone(),
            status,
            hint,
        }
    }

    /// Performance data do valor com os ranges deste contexto.
    pub fn performance(&self, value: f64) -> Performance {
        Performance {
            label: self.metric_name.clone(),
            value,
            warning: self.warning,
            critical: self.critical,
        }
    }
}

fn parse_optional(spec: Option<&str>) -> Result<Option<Range>> {
    match spec.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Range::parse(s).map(Some),
    }
}

impl EvaluationResult {
    /// `22.5 °C`
    pub fn value_with_unit(&self) -> String {
        if self.unit.is_empty() {
            self.value.to_string()
        } else {
            format!("{} {}", self.value, self.unit)
        }
    }
}

impl fmt::Display for EvaluationResult {
    /// `temperature 35 °C (outside range 10:30)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.metric_name, self.value_with_unit())?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

/// Segmento de performance data: `label=value;warn;crit`.
#[derive(Debug, Clone, PartialEq)]
pub struct Performance {
    pub label: String,
    pub value: f64,
    pub warning: Option<Range>,
    pub critical: Option<Range>,
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label.contains([' ', '=', '\'']) {
            format!("'{}'", self.label.replace('\'', "''"))
        } else {
            self.label.clone()
        };

        let mut fields = vec![
            format!("{label}={}", self.value),
            self.warning.map(|r| r.to_string()).unwrap_or_default(),
            self.critical.map(|r| r.to_string()).unwrap_or_default(),
        ];
        // Campos vazios no final são omitidos
        while fields.len() > 1 && fields.last().is_some_and(|s| s.is_empty()) {
            fields.pop();
        }
        f.write_str(&fields.join(";"))
    }
}
