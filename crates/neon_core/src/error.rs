//! Erros do check – qualquer variante aborta a execução com UNKNOWN.

use std::path::PathBuf;

/// Erros possíveis entre o fetch e a renderização.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Range inválido '{spec}': {reason}")]
    Parse { spec: String, reason: String },

    #[error("{0}")]
    Fetch(String),

    #[error("Campo '{field}' ausente em <{sensor}>")]
    MissingField { sensor: String, field: String },

    #[error("Leitura inválida de {sensor}: '{value}'")]
    InvalidValue { sensor: String, value: String },

    #[error("Métrica sem contexto correspondente: {0}")]
    UnknownMetric(String),

    #[error("Métrica duplicada: {0}")]
    DuplicateMetric(String),

    #[error("Erro de configuração em {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl CheckError {
    pub(crate) fn parse(spec: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
