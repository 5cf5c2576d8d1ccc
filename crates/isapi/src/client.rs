use std::env;

use base64::Engine;
use log::{debug, trace};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use url::{Host, Url};

use crate::{error::check_status, Error};

pub fn authorization_headers(username: &str, password: &str) -> HeaderMap {
    let credentials = format!("{username}:{password}");
    let auth_header = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(credentials)
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::try_from(auth_header).expect("Base64 is always a valid header value"),
    );
    headers
}

/// Connection details of one device.
pub struct ClientBuilder {
    host: Host,
    scheme: Scheme,
    port: Option<u16>,
    inner: reqwest::ClientBuilder,
}

impl ClientBuilder {
    /// Plain HTTP on the default port, without credentials.
    pub fn new(host: Host) -> Self {
        Self {
            host,
            scheme: Scheme::Plain,
            port: None,
            inner: reqwest::Client::builder(),
        }
    }

    /// Read the device from `HIKVISION_DEVICE_{IP,USER,PASS}` and, if set,
    /// `HIKVISION_DEVICE_PORT` and `HIKVISION_DEVICE_HTTPS`.
    ///
    /// HTTPS devices are assumed to present self-signed certificates.
    pub fn from_env() -> anyhow::Result<Self> {
        let username = env::var("HIKVISION_DEVICE_USER")?;
        let password = env::var("HIKVISION_DEVICE_PASS")?;
        let host = Host::parse(&env::var("HIKVISION_DEVICE_IP")?)?;
        let port = env::var("HIKVISION_DEVICE_PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()?;
        let https = env::var_os("HIKVISION_DEVICE_HTTPS").is_some_and(|v| v == "1");

        debug!("Building client for {host} using username {username} from env");
        Ok(ClientBuilder::new(host)
            .scheme(if https { Scheme::Secure } else { Scheme::Plain })
            .port(port)
            .accept_invalid_certs(https)
            .basic_authentication(&username, &password))
    }

    pub fn basic_authentication(mut self, username: &str, password: &str) -> Self {
        self.inner = self
            .inner
            .default_headers(authorization_headers(username, password));
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// The port to connect to, if not the default of the scheme.
    pub fn port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.inner = self.inner.danger_accept_invalid_certs(accept);
        self
    }

    pub fn build(self) -> anyhow::Result<Client> {
        let Self {
            host,
            scheme,
            port,
            inner,
        } = self;
        Ok(Client {
            scheme,
            host,
            port,
            client: inner.build()?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// HTTPS
    Secure,
    /// HTTP
    #[default]
    Plain,
}

impl Scheme {
    const fn http(self) -> &'static str {
        match self {
            Scheme::Secure => "https",
            Scheme::Plain => "http",
        }
    }
}

/// How the device should present its response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    /// The native XML documents, returned verbatim.
    #[default]
    Xml,
    /// JSON, requested with the `format=json` query parameter.
    Json,
}

/// A handle to one configured device.
#[derive(Clone, Debug)]
pub struct Client {
    scheme: Scheme,
    host: Host,
    port: Option<u16>,
    client: reqwest::Client,
}

impl Client {
    pub fn builder(host: Host) -> ClientBuilder {
        ClientBuilder::new(host)
    }

    /// Send `body` to `ISAPI/{path}` and return the response text.
    ///
    /// Responses with a status outside of `200..300` are returned as errors that carry the
    /// response body. Bodies that are not UTF-8 are decoded lossily either way.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        format: ResponseFormat,
        body: Option<String>,
    ) -> Result<String, Error> {
        let url = self.isapi_url(path).map_err(Error::Transport)?;
        debug!("Sending {method} to {url}");
        let mut builder = self.client.request(method, url);
        match format {
            ResponseFormat::Xml => {
                if body.is_some() {
                    builder = builder.header(CONTENT_TYPE, "application/xml; charset=utf-8");
                }
            }
            ResponseFormat::Json => builder = builder.query(&[("format", "json")]),
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let content = response.bytes().await?.to_vec();
        if cfg!(debug_assertions) {
            trace!("Received {status}: {}", String::from_utf8_lossy(&content));
        }
        check_status(status, content)
    }

    fn isapi_url(&self, path: &str) -> anyhow::Result<Url> {
        let path = path.trim_start_matches('/');
        Ok(self.url().join(&format!("ISAPI/{path}"))?)
    }

    fn url(&self) -> Url {
        let Self {
            scheme, host, port, ..
        } = self;
        let scheme = scheme.http();
        if let Some(port) = port {
            Url::parse(&format!("{scheme}://{host}:{port}"))
        } else {
            Url::parse(&format!("{scheme}://{host}"))
        }
        .expect("Restricted types are known to combine into a valid URL")
    }
}
