//! Argumentos de linha de comando.

use clap::{ArgAction, Parser};
use neon_core::config::ThresholdConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "check_neon")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check Nagios/Icinga para sensores de temperatura e umidade NEON", long_about = None)]
pub struct Cli {
    /// Hostname ou IP do dispositivo
    #[arg(short = 'H', long = "host", value_name = "HOST")]
    pub host: String,

    /// Mostra as informações do dispositivo e sai (exit 3)
    #[arg(short = 'I', long)]
    pub info: bool,

    /// Threshold de warning da temperatura
    #[arg(short = 'w', long, value_name = "RANGE")]
    pub warning: Option<String>,

    /// Threshold de critical da temperatura
    #[arg(short = 'c', long, value_name = "RANGE")]
    pub critical: Option<String>,

    /// Threshold de warning da umidade
    #[arg(short = 'x', long = "humiditywarning", value_name = "RANGE")]
    pub humidity_warning: Option<String>,

    /// Threshold de critical da umidade
    #[arg(short = 'd', long = "humiditycritical", value_name = "RANGE")]
    pub humidity_critical: Option<String>,

    /// Timeout da requisição HTTP em segundos [padrão: 4]
    #[arg(short = 'T', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Arquivo de configuração TOML
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Aumenta o nível de log em stderr (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Overrides passados na linha de comando (vazio = não informado).
    pub fn thresholds(&self) -> ThresholdConfig {
        ThresholdConfig {
            temperature_warning: self.warning.clone().unwrap_or_default(),
            temperature_critical: self.critical.clone().unwrap_or_default(),
            humidity_warning: self.humidity_warning.clone().unwrap_or_default(),
            humidity_critical: self.humidity_critical.clone().unwrap_or_default(),
        }
    }

    /// Filtro de log padrão quando `RUST_LOG` não está definido.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
