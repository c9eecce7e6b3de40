// ── Remote device seam ──
//
// The accessory only needs to read and write named integer attributes.
// `MyQClient` is the production implementation; tests supply fakes.

use async_trait::async_trait;
use chamberlain_api::MyQClient;

use crate::error::CoreError;

#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Read a named attribute as its remote integer code.
    async fn get_device_attribute(&self, name: &str) -> Result<i64, CoreError>;

    /// Write a named attribute.
    async fn set_device_attribute(&self, name: &str, value: i64) -> Result<(), CoreError>;
}

#[async_trait]
impl DeviceApi for MyQClient {
    async fn get_device_attribute(&self, name: &str) -> Result<i64, CoreError> {
        Ok(MyQClient::get_device_attribute(self, name).await?)
    }

    async fn set_device_attribute(&self, name: &str, value: i64) -> Result<(), CoreError> {
        Ok(MyQClient::set_device_attribute(self, name, value).await?)
    }
}
