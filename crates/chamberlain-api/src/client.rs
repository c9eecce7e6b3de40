// MyQ device-attribute HTTP client
//
// Wraps `reqwest::Client` with MyQ URL construction, credential
// attachment, and `ReturnCode` envelope unwrapping. Credentials are
// passed through opaquely on every request; there is no session.

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{AckResponse, AttributeResponse, PutAttributeRequest, RETURN_CODE_OK};
use crate::transport::TransportConfig;

const GET_ATTRIBUTE_PATH: &str = "api/v4/deviceattribute/getdeviceattribute";
const PUT_ATTRIBUTE_PATH: &str = "api/v4/DeviceAttribute/PutDeviceAttribute";

/// Everything needed to talk to one remote device.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root (e.g. `https://myqexternal.myqdevice.com`).
    pub base_url: Url,
    pub device_id: String,
    pub username: String,
    pub password: SecretString,
    pub transport: TransportConfig,
}

/// HTTP client for a single MyQ device.
///
/// All methods return unwrapped payloads -- the envelope is checked and
/// stripped before the caller sees it.
#[derive(Clone)]
pub struct MyQClient {
    http: reqwest::Client,
    base_url: Url,
    device_id: String,
    username: String,
    password: SecretString,
}

impl MyQClient {
    /// Create a new client from a `ClientConfig`.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client()?;
        Ok(Self::with_client(http, config))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
            device_id: config.device_id,
            username: config.username,
            password: config.password,
        }
    }

    /// The device this client addresses.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Device attributes ────────────────────────────────────────────

    /// Read a device attribute as its integer code.
    pub async fn get_device_attribute(&self, name: &str) -> Result<i64, Error> {
        let url = self.api_url(GET_ATTRIBUTE_PATH)?;
        debug!(attribute = name, "GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .query(&[
                ("myQDeviceId", self.device_id.as_str()),
                ("attributeName", name),
            ])
            .send()
            .await?;

        let body: AttributeResponse = Self::parse_body(resp).await?;
        check_return_code(&body.return_code, body.error_message)?;

        let raw = body.attribute_value.unwrap_or_default();
        let value = raw.trim().parse::<i64>().map_err(|e| Error::Deserialization {
            message: format!("attribute {name} is not an integer: {e}"),
            body: raw.clone(),
        })?;
        trace!(attribute = name, value, "attribute read");
        Ok(value)
    }

    /// Write a device attribute.
    pub async fn set_device_attribute(&self, name: &str, value: i64) -> Result<(), Error> {
        let url = self.api_url(PUT_ATTRIBUTE_PATH)?;
        debug!(attribute = name, value, "PUT {}", url);

        let request = PutAttributeRequest {
            device_id: &self.device_id,
            attribute_name: name,
            attribute_value: value.to_string(),
        };

        let resp = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(&request)
            .send()
            .await?;

        let body: AckResponse = Self::parse_body(resp).await?;
        check_return_code(&body.return_code, body.error_message)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a trailing slash on the base.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    /// Map HTTP status to errors and deserialize the envelope.
    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "credentials rejected (HTTP 401)".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!("HTTP {status}: {}", preview(&body)),
                code: None,
                status: Some(status.as_u16()),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", preview(&body)),
            body: body.clone(),
        })
    }
}

fn check_return_code(code: &str, message: Option<String>) -> Result<(), Error> {
    if code == RETURN_CODE_OK {
        return Ok(());
    }
    Err(Error::Api {
        message: message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("ReturnCode={code}")),
        code: Some(code.to_owned()),
        status: None,
    })
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
