//! The actions exposed to the host.
//!
//! Every action is available both as a typed function and through [`call`], which interprets a
//! loosely typed parameter mapping the way the host delivers it.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use hikctl_isapi::{Method, PtzCommand, ResponseFormat};
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    channel::resolve,
    ptz::{ContinuousMoveParams, MoveParams, PtzRequest},
    registry::{Device, Registry},
    ActionError, Error,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Reboot,
    IsapiRequest,
    PtzMove,
    PtzStop,
    Ptz,
}

impl Action {
    pub const ALL: [Self; 5] = [
        Self::Reboot,
        Self::IsapiRequest,
        Self::PtzMove,
        Self::PtzStop,
        Self::Ptz,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reboot => "reboot",
            Self::IsapiRequest => "isapi_request",
            Self::PtzMove => "ptz_move",
            Self::PtzStop => "ptz_stop",
            Self::Ptz => "ptz",
        }
    }

    /// Whether a successful call returns a value.
    pub const fn supports_response(self) -> bool {
        matches!(self, Self::IsapiRequest)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| Error::InvalidParameter(format!("Unknown action: {s}")))
    }
}

/// Invoke `action` with the parameters in `data`.
///
/// Returns `Some({"data": ...})` for [`Action::IsapiRequest`] and `None` for all other actions.
pub async fn call<R: Registry>(
    registry: &R,
    action: Action,
    data: &Value,
) -> Result<Option<Value>, ActionError> {
    debug!("Calling {action} with {data}");
    match action {
        Action::Reboot => {
            let RebootCall { config_entry_id } = parse::<RebootCall>(action, data)?;
            let config_entry_id = config_entry_id.ok_or_else(|| {
                Error::MissingParameter("No config_entry_id provided".to_string())
            })?;
            reboot(registry, &config_entry_id).await?;
            Ok(None)
        }
        Action::IsapiRequest => {
            let request = IsapiRequest::try_from(parse::<IsapiRequestCall>(action, data)?)?;
            let text = isapi_request(registry, &request).await?;
            Ok(Some(json!({ "data": text })))
        }
        Action::PtzMove | Action::PtzStop | Action::Ptz => {
            let TargetsCall { entity_id } = parse::<TargetsCall>(action, data)?;
            let entity_ids = entity_id.into_vec();
            require_targets(&entity_ids)?;
            let request = match action {
                Action::PtzMove => PtzRequest::Move(parse(action, data)?),
                Action::Ptz => PtzRequest::ContinuousMove(parse(action, data)?),
                _ => PtzRequest::Stop,
            };
            ptz_request(registry, &entity_ids, &request).await?;
            Ok(None)
        }
    }
}

fn parse<T>(action: Action, data: &Value) -> Result<T, Error>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(data)
        .map_err(|e| Error::InvalidParameter(format!("Invalid parameters for {action}: {e}")))
}

#[derive(Debug, Deserialize)]
struct RebootCall {
    #[serde(default)]
    config_entry_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum EntityIds {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl EntityIds {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::One(id) if id.is_empty() => Vec::new(),
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TargetsCall {
    #[serde(default)]
    entity_id: EntityIds,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IsapiRequestCall {
    #[serde(default)]
    config_entry_id: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    payload: Option<String>,
}

/// A request passed through to the device as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IsapiRequest {
    pub config_entry_id: String,
    pub method: String,
    pub path: String,
    pub payload: Option<String>,
}

impl IsapiRequest {
    /// A `POST` to `path` without payload.
    pub fn new(config_entry_id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            config_entry_id: config_entry_id.into(),
            method: "POST".to_string(),
            path: path.into(),
            payload: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }
}

impl TryFrom<IsapiRequestCall> for IsapiRequest {
    type Error = Error;

    fn try_from(value: IsapiRequestCall) -> Result<Self, Self::Error> {
        let IsapiRequestCall {
            config_entry_id,
            method,
            path,
            payload,
        } = value;
        let required = |value: Option<String>, name: &str| {
            value.ok_or_else(|| Error::MissingParameter(format!("No {name} provided")))
        };
        Ok(Self {
            config_entry_id: required(config_entry_id, "config_entry_id")?,
            method: required(method, "method")?,
            path: required(path, "path")?,
            payload,
        })
    }
}

fn entry_device<'r, R: Registry>(
    registry: &'r R,
    config_entry_id: &str,
) -> Result<&'r R::Device, Error> {
    registry
        .device(config_entry_id)
        .ok_or_else(|| Error::NotFound(format!("Config entry {config_entry_id} not found")))
}

/// Restart the device of a configuration entry.
pub async fn reboot<R: Registry>(registry: &R, config_entry_id: &str) -> Result<(), ActionError> {
    let device = entry_device(registry, config_entry_id)?;
    device.reboot().await.map_err(|e| {
        let message = match e.response() {
            Some(response) => response.text().into_owned(),
            None => e.to_string(),
        };
        ActionError::new(message, Error::Device(e))
    })
}

/// Pass a request through to the device and return the body with carriage returns removed.
///
/// Bodies of unsuccessful responses are returned as data rather than as errors.
pub async fn isapi_request<R: Registry>(
    registry: &R,
    request: &IsapiRequest,
) -> Result<String, ActionError> {
    let IsapiRequest {
        config_entry_id,
        method,
        path,
        payload,
    } = request;
    let device = entry_device(registry, config_entry_id)?;
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .map_err(|_| Error::InvalidParameter(format!("Invalid method: {method}")))?;
    let path = path.trim_matches('/');
    let text = match device
        .request(method, path, ResponseFormat::Xml, payload.clone())
        .await
    {
        Ok(text) => text,
        Err(e) => match e.response() {
            Some(response) => {
                debug!("Returning body of {} response", response.status);
                response.text().into_owned()
            }
            None => return Err(Error::Device(e).into()),
        },
    };
    Ok(text.replace('\r', ""))
}

fn require_targets(entity_ids: &[String]) -> Result<(), Error> {
    if entity_ids.is_empty() {
        return Err(Error::MissingParameter("No entity_id provided".to_string()));
    }
    Ok(())
}

async fn send_to<R: Registry>(
    registry: &R,
    entity_id: &str,
    command: PtzCommand,
) -> Result<(), Error> {
    let (device, channel) = resolve(registry, entity_id)?;
    device.ptz_control(channel, command).await?;
    Ok(())
}

/// Send `command` to each entity in turn, stopping at the first failure.
async fn for_each_entity<R: Registry>(
    registry: &R,
    entity_ids: &[String],
    command: PtzCommand,
    operation: &str,
) -> Result<(), ActionError> {
    for entity_id in entity_ids {
        if let Err(cause) = send_to(registry, entity_id, command).await {
            return Err(ActionError::new(
                format!("{operation} failed for {entity_id}: {cause}"),
                cause,
            ));
        }
    }
    Ok(())
}

/// Translate `request` once and send it to each entity.
pub async fn ptz_request<R: Registry>(
    registry: &R,
    entity_ids: &[String],
    request: &PtzRequest,
) -> Result<(), ActionError> {
    require_targets(entity_ids)?;
    let command = request.translate()?;
    let operation = match request {
        PtzRequest::Stop => "PTZ stop",
        PtzRequest::Move(_) | PtzRequest::ContinuousMove(_) => "PTZ control",
    };
    for_each_entity(registry, entity_ids, command, operation).await
}

/// Move by named direction or by explicit speeds.
pub async fn ptz_move<R: Registry>(
    registry: &R,
    entity_ids: &[String],
    params: &MoveParams,
) -> Result<(), ActionError> {
    ptz_request(registry, entity_ids, &PtzRequest::Move(params.clone())).await
}

/// Halt any movement.
pub async fn ptz_stop<R: Registry>(registry: &R, entity_ids: &[String]) -> Result<(), ActionError> {
    ptz_request(registry, entity_ids, &PtzRequest::Stop).await
}

/// Move using ONVIF style tokens.
pub async fn ptz<R: Registry>(
    registry: &R,
    entity_ids: &[String],
    params: &ContinuousMoveParams,
) -> Result<(), ActionError> {
    ptz_request(registry, entity_ids, &PtzRequest::ContinuousMove(params.clone())).await
}
