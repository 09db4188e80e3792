//! Configuração via TOML.
//!
//! Todos os campos são opcionais; o que não estiver no arquivo usa o padrão.
//! Flags da linha de comando têm precedência sobre o arquivo.

use crate::error::{CheckError, Result};
use crate::range::Range;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Nome do arquivo procurado ao lado do executável.
pub const CONFIG_FILE_NAME: &str = "check_neon.toml";

/// Acesso ao dispositivo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Timeout da requisição HTTP (segundos)
    pub timeout_secs: u64,
    /// Prefixo da linha de saída do plugin
    pub check_name: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 4,
            check_name: "NEON".into(),
        }
    }
}

/// Overrides de threshold por métrica. Vazio = alarmes configurados no dispositivo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    pub temperature_warning: String,
    pub temperature_critical: String,
    pub humidity_warning: String,
    pub humidity_critical: String,
}

impl ThresholdConfig {
    /// Campo a campo, usa `self` quando preenchido e `fallback` caso contrário.
    pub fn or(&self, fallback: &ThresholdConfig) -> ThresholdConfig {
        let pick = |a: &String, b: &String| if a.trim().is_empty() { b.clone() } else { a.clone() };
        ThresholdConfig {
            temperature_warning: pick(&self.temperature_warning, &fallback.temperature_warning),
            temperature_critical: pick(&self.temperature_critical, &fallback.temperature_critical),
            humidity_warning: pick(&self.humidity_warning, &fallback.humidity_warning),
            humidity_critical: pick(&self.humidity_critical, &fallback.humidity_critical),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("temperature_warning", self.temperature_warning.as_str()),
            ("temperature_critical", self.temperature_critical.as_str()),
            ("humidity_warning", self.humidity_warning.as_str()),
            ("humidity_critical", self.humidity_critical.as_str()),
        ]
    }
}

/// Configuração raiz do check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub device: DeviceConfig,
    pub thresholds: ThresholdConfig,
}

impl CheckConfig {
    /// Carrega configuração de um arquivo TOML, caindo para o padrão em caso de erro.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match Self::load_strict(path) {
                Ok(config) => return config,
                Err(e) => warn!("{e}"),
            }
        }

        info!("Usando configuração padrão");
        CheckConfig::default()
    }

    /// Carrega um arquivo pedido explicitamente; qualquer falha é erro.
    pub fn load_strict(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CheckError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config = toml::from_str::<CheckConfig>(&content).map_err(|e| CheckError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!("Configuração carregada de {}", path.display());
        Ok(config)
    }

    /// Retorna o caminho padrão do `check_neon.toml`.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join(CONFIG_FILE_NAME)
    }

    /// Aplica o timeout da linha de comando, se informado.
    ///
    /// Deve ser chamado antes de [`CheckConfig::validate`], que valida o
    /// timeout efetivo.
    pub fn with_timeout(mut self, timeout_secs: Option<u64>) -> Self {
        if let Some(secs) = timeout_secs {
            self.device.timeout_secs = secs;
        }
        self
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.device.timeout_secs == 0 {
            errors.push("Timeout não pode ser 0".into());
        }
        if self.device.check_name.trim().is_empty() {
            errors.push("check_name não pode ser vazio".into());
        }
        for (key, spec) in self.thresholds.entries() {
            if let Err(e) = Range::parse(spec) {
                errors.push(format!("{key}: {e}"));
            }
        }

        errors
    }
}
