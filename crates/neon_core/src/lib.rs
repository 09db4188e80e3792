//! # Neon Core
//!
//! Motor de avaliação de thresholds do check_neon: ranges no formato
//! Nagios, contextos de warning/critical, agregação de status e
//! renderização da linha de saída do plugin.
//!
//! ## Módulos
//! - [`range`] – Parse e avaliação de specs de threshold (`10:30`, `@5`, `~:40`)
//! - [`status`] – OK/WARNING/CRITICAL/UNKNOWN e exit codes
//! - [`metric`] – Medições nomeadas
//! - [`context`] – Ranges por métrica e performance data
//! - [`resource`] – Fontes de métricas
//! - [`check`] – Agregação e saída final
//! - [`device`] – Decodificação do `values.xml` do dispositivo
//! - [`thresholds`] – Overrides vs. alarmes do dispositivo
//! - [`config`] – Configuração via TOML
//! - [`error`] – Erros do check

pub mod range;
pub mod status;
pub mod metric;
pub mod context;
pub mod resource;
pub mod check;
pub mod device;
pub mod thresholds;
pub mod config;
pub mod error;

// Re-exports convenientes
pub use check::{Check, Outcome};
pub use config::CheckConfig;
pub use context::{Context, EvaluationResult};
pub use error::{CheckError, Result};
pub use metric::Metric;
pub use range::Range;
pub use status::Status;
