//! Bindings for the Hikvision ISAPI, limited to what is needed to reboot devices, pass requests
//! through and steer pan-tilt-zoom channels.
mod client;
mod error;
mod ptz_ctrl;
mod system;

pub use client::{authorization_headers, Client, ClientBuilder, ResponseFormat, Scheme};
pub use error::{Error, ErrorResponse};
pub use ptz_ctrl::PtzCommand;
pub use reqwest::{Method, StatusCode};
