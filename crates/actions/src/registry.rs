//! The view of the host that actions need: which entities exist, and which device serves them.

use std::{collections::HashMap, future::Future};

use hikctl_isapi::{Client, Method, PtzCommand, ResponseFormat};
use serde::{Deserialize, Serialize};

/// What the host knows about a user facing entity.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntityEntry {
    pub config_entry_id: String,
    /// `{serial number}_{stream id}`, see [`crate::channel::channel_id`].
    pub unique_id: String,
}

/// The operations that actions invoke on a device.
pub trait Device {
    fn reboot(&self) -> impl Future<Output = Result<(), hikctl_isapi::Error>> + Send;

    fn request(
        &self,
        method: Method,
        path: &str,
        format: ResponseFormat,
        body: Option<String>,
    ) -> impl Future<Output = Result<String, hikctl_isapi::Error>> + Send;

    fn ptz_control(
        &self,
        channel: u32,
        command: PtzCommand,
    ) -> impl Future<Output = Result<(), hikctl_isapi::Error>> + Send;
}

impl Device for Client {
    fn reboot(&self) -> impl Future<Output = Result<(), hikctl_isapi::Error>> + Send {
        Client::reboot(self)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        format: ResponseFormat,
        body: Option<String>,
    ) -> impl Future<Output = Result<String, hikctl_isapi::Error>> + Send {
        Client::request(self, method, path, format, body)
    }

    fn ptz_control(
        &self,
        channel: u32,
        command: PtzCommand,
    ) -> impl Future<Output = Result<(), hikctl_isapi::Error>> + Send {
        Client::ptz_control(self, channel, command)
    }
}

/// Lookups into the entity registry and into the runtime state of configuration entries.
///
/// Implementations must not default; a missing entity or entry is `None`.
pub trait Registry {
    type Device: Device;

    fn entity(&self, entity_id: &str) -> Option<&EntityEntry>;

    fn device(&self, config_entry_id: &str) -> Option<&Self::Device>;
}

#[derive(Debug)]
pub struct MemoryRegistry<D> {
    entities: HashMap<String, EntityEntry>,
    devices: HashMap<String, D>,
}

impl<D> Default for MemoryRegistry<D> {
    fn default() -> Self {
        Self {
            entities: HashMap::new(),
            devices: HashMap::new(),
        }
    }
}

impl<D> MemoryRegistry<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_device(&mut self, config_entry_id: impl Into<String>, device: D) -> &mut Self {
        self.devices.insert(config_entry_id.into(), device);
        self
    }

    pub fn insert_entity(&mut self, entity_id: impl Into<String>, entry: EntityEntry) -> &mut Self {
        self.entities.insert(entity_id.into(), entry);
        self
    }
}

impl<D: Device> Registry for MemoryRegistry<D> {
    type Device = D;

    fn entity(&self, entity_id: &str) -> Option<&EntityEntry> {
        self.entities.get(entity_id)
    }

    fn device(&self, config_entry_id: &str) -> Option<&D> {
        self.devices.get(config_entry_id)
    }
}
