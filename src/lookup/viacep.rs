// ==========================================
// Prospect Intake - ViaCEP-compatible HTTP Client
// ==========================================
// GET {base_url}/{cep}/json/
// - 200 + address body        → Some(address)
// - 200 + {"erro": true}      → None
// - 4xx                       → None
// - anything else / transport → Err
// ==========================================

use crate::domain::PostalAddress;
use crate::lookup::error::{LookupError, LookupResult};
use crate::lookup::PostalLookup;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    // older API answers {"erro": true}, newer {"erro": "true"}
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Decode a 200 response body
pub(crate) fn decode_body(body: &[u8]) -> LookupResult<Option<PostalAddress>> {
    let response: ViaCepResponse = serde_json::from_slice(body)?;
    if response.is_not_found() {
        return Ok(None);
    }
    Ok(Some(PostalAddress {
        street: response.logradouro,
        district: response.bairro,
        city: response.localidade,
        region: response.uf,
    }))
}

pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: &str, timeout: Duration) -> LookupResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(LookupError::Url(base_url));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Use a pre-built client (custom proxy/TLS settings)
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url, postal_code)
    }
}

#[async_trait]
impl PostalLookup for ViaCepClient {
    #[instrument(skip(self), level = "debug")]
    async fn lookup(&self, postal_code: &str) -> LookupResult<Option<PostalAddress>> {
        let resp = self.client.get(self.url_for(postal_code)).send().await?;
        let status = resp.status();

        if status.is_client_error() {
            debug!(status = status.as_u16(), "postal code rejected by lookup service");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                postal_code: postal_code.to_string(),
            });
        }

        let body = resp.bytes().await?;
        decode_body(&body)
    }
}
