//! Cliente HTTP do dispositivo – um GET em `http://<host>/values.xml`, sem retry.

use neon_core::device::{self, DeviceTree, DeviceValues};
use neon_core::error::{CheckError, Result};
use reqwest::blocking::Client;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, info};

/// Conexão com um dispositivo NEON.
pub struct DeviceClient {
    client: Client,
    url: String,
}

impl DeviceClient {
    pub fn new(host: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("check_neon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CheckError::Fetch(describe(&e)))?;

        Ok(Self {
            client,
            url: format!("http://{host}/values.xml"),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Corpo do `values.xml`. Status HTTP fora de 2xx é erro.
    pub fn fetch(&self) -> Result<String> {
        info!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CheckError::Fetch(describe(&e)))?;

        let body = response
            .text()
            .map_err(|e| CheckError::Fetch(describe(&e)))?;
        debug!("{} bytes recebidos de {}", body.len(), self.url);
        Ok(body)
    }

    pub fn values(&self) -> Result<DeviceValues> {
        device::parse_values(&self.fetch()?)
    }

    pub fn tree(&self) -> Result<DeviceTree> {
        device::parse_tree(&self.fetch()?)
    }
}

/// Mensagem do erro com a cadeia de causas (ex: `connection refused`).
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
