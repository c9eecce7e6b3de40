// Wire types for the MyQ device-attribute endpoints.
//
// The service wraps every response in a `ReturnCode` / `ErrorMessage`
// envelope. Attribute values travel as strings on both directions.

use serde::{Deserialize, Serialize};

/// Return code the service uses for success.
pub const RETURN_CODE_OK: &str = "0";

/// Response envelope for `getdeviceattribute`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeResponse {
    pub return_code: String,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub attribute_value: Option<String>,
}

/// Response envelope for `PutDeviceAttribute`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AckResponse {
    pub return_code: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Request body for `PutDeviceAttribute`.
#[derive(Debug, Serialize)]
pub struct PutAttributeRequest<'a> {
    #[serde(rename = "MyQDeviceId")]
    pub device_id: &'a str,
    #[serde(rename = "AttributeName")]
    pub attribute_name: &'a str,
    #[serde(rename = "AttributeValue")]
    pub attribute_value: String,
}
