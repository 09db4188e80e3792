//! # check_neon
//!
//! Plugin Nagios/Icinga para sensores ambientais NEON. Lê o `values.xml`
//! do dispositivo e avalia temperatura e umidade contra thresholds.
//!
//! ## Uso
//! ```bash
//! check_neon -H 10.0.0.5                         # Alarmes configurados no dispositivo
//! check_neon -H 10.0.0.5 -w 18:26 -c 10:30       # Override da temperatura
//! check_neon -H 10.0.0.5 -x 30:70 -d 20:90       # Override da umidade
//! check_neon -H 10.0.0.5 --info                  # Dump dos valores (exit 3)
//! ```
//!
//! Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN, 2 em erro de uso.

mod cli;
mod fetch;
mod info;

use clap::Parser;
use cli::Cli;
use fetch::DeviceClient;
use neon_core::config::{CheckConfig, ThresholdConfig};
use neon_core::device::DeviceValues;
use neon_core::resource::NeonResource;
use neon_core::thresholds::build_contexts;
use neon_core::{Check, CheckError, Outcome, Status};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

fn main() -> ExitCode {
    // Erro de uso: clap imprime o usage em stderr e sai com 2
    let cli = Cli::parse();

    // ── Logging (stderr; stdout é a saída do plugin) ──
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level().into()),
        )
        .init();

    let (output, code) = execute(&cli);
    print!("{output}");
    ExitCode::from(code)
}

/// Executa o plugin: texto para stdout e exit code.
fn execute(cli: &Cli) -> (String, u8) {
    // ── Config ──
    let config = match &cli.config {
        Some(path) => match CheckConfig::load_strict(path) {
            Ok(config) => config,
            Err(e) => {
                let name = CheckConfig::default().device.check_name;
                return report(Outcome::unknown(name, e.to_string()));
            }
        },
        None => CheckConfig::load(&CheckConfig::default_path()),
    }
    .with_timeout(cli.timeout);
    let name = config.device.check_name.clone();

    let errors = config.validate();
    if !errors.is_empty() {
        return report(Outcome::unknown(
            name,
            format!("Configuração inválida: {}", errors.join("; ")),
        ));
    }

    // ── Dispositivo ──
    let timeout = Duration::from_secs(config.device.timeout_secs);
    let client = match DeviceClient::new(&cli.host, timeout) {
        Ok(client) => client,
        Err(e) => return report(Outcome::unknown(name, e.to_string())),
    };

    if cli.info {
        return (info_dump(&name, &client), Status::Unknown.exit_code());
    }

    let overrides = cli.thresholds().or(&config.thresholds);
    report(run_check(&name, &client, &overrides))
}

/// Modo `--info`: dump da árvore, ou a linha UNKNOWN se a leitura falhar.
fn info_dump(name: &str, client: &DeviceClient) -> String {
    match client.tree() {
        Ok(tree) => info::render(&tree),
        Err(e) => {
            error!("{} falhou: {e}", client.url());
            format!("{}\n", Outcome::unknown(name, e.to_string()))
        }
    }
}

/// Busca, avalia e converte qualquer falha em UNKNOWN.
fn run_check(name: &str, client: &DeviceClient, overrides: &ThresholdConfig) -> Outcome {
    client
        .values()
        .and_then(|values| evaluate(name, values, overrides))
        .unwrap_or_else(|e| {
            error!("{} falhou: {e}", client.url());
            Outcome::unknown(name, e.to_string())
        })
}

/// Resolve thresholds, avalia as métricas e agrega o resultado.
fn evaluate(
    name: &str,
    values: DeviceValues,
    overrides: &ThresholdConfig,
) -> Result<Outcome, CheckError> {
    let contexts = build_contexts(overrides, &values)?;
    let resource = NeonResource::new(name, values);
    let outcome = Check::new(contexts).evaluate(&resource)?;
    info!("Status final: {}", outcome.status);
    Ok(outcome)
}

fn report(outcome: Outcome) -> (String, u8) {
    (format!("{outcome}\n"), outcome.exit_code())
}
