//! Device level operations under `ISAPI/System`.

use reqwest::Method;

use crate::{Client, Error, ResponseFormat};

impl Client {
    /// Restart the device.
    ///
    /// The device answers before it goes down, so a successful return only means that the
    /// request was accepted.
    pub async fn reboot(&self) -> Result<(), Error> {
        self.request(Method::PUT, "System/reboot", ResponseFormat::Xml, None)
            .await
            .map(|_| ())
    }

    /// Fetch the `DeviceInfo` document.
    pub async fn device_info(&self) -> Result<String, Error> {
        self.request(Method::GET, "System/deviceInfo", ResponseFormat::Xml, None)
            .await
    }
}
