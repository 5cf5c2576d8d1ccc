//! The configuration entries and entities that the actions operate on.
use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context};
use hikctl_actions::{EntityEntry, MemoryRegistry};
use hikctl_isapi::{Client, ClientBuilder, Scheme};
use log::debug;
use url::Host;

use crate::psst::Password;

/// The connection details of one device.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Entry {
    /// IP address or hostname.
    pub host: String,
    pub username: String,
    pub password: Password,
    /// Defaults to 80, or 443 with `https`.
    pub port: Option<u16>,
    /// Connect over HTTPS instead of HTTP.
    #[serde(default)]
    pub https: bool,
    /// Accept certificates that cannot be verified.
    #[serde(default)]
    pub self_signed: bool,
}

impl Entry {
    fn client(&self) -> anyhow::Result<Client> {
        let Self {
            host,
            username,
            password,
            port,
            https,
            self_signed,
        } = self;
        let scheme = if *https {
            Scheme::Secure
        } else {
            Scheme::Plain
        };
        let host = Host::parse(host).with_context(|| format!("Invalid host {host}"))?;
        ClientBuilder::new(host)
            .scheme(scheme)
            .port(*port)
            .basic_authentication(username, password.dangerous_reveal())
            .accept_invalid_certs(*self_signed)
            .build()
    }
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub entries: HashMap<String, Entry>,
    #[serde(default)]
    pub entities: HashMap<String, EntityEntry>,
}

impl Inventory {
    pub fn read(file: &Path) -> anyhow::Result<Self> {
        match fs::read_to_string(file) {
            Ok(t) => serde_json::from_str(&t)
                .with_context(|| format!("Failed to deserialize inventory {file:?}")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("{file:?} not found, returning an empty inventory");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow!(e)),
        }
    }

    /// Connect a client for every entry.
    ///
    /// No requests are sent until an action needs one.
    pub fn into_registry(self) -> anyhow::Result<MemoryRegistry<Client>> {
        let Self { entries, entities } = self;
        let mut registry = MemoryRegistry::new();
        for (config_entry_id, entry) in entries {
            let client = entry
                .client()
                .with_context(|| format!("Failed to build client for {config_entry_id}"))?;
            registry.insert_device(config_entry_id, client);
        }
        for (entity_id, entity) in entities {
            registry.insert_entity(entity_id, entity);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use hikctl_actions::Registry;

    use super::*;

    const INVENTORY: &str = r#"{
        "entries": {
            "nvr": {
                "host": "192.168.1.64",
                "username": "admin",
                "password": "hunter2",
                "port": 8080
            }
        },
        "entities": {
            "camera.driveway": {"config_entry_id": "nvr", "unique_id": "DS7608_101"}
        }
    }"#;

    #[test]
    fn can_deserialize_inventory() {
        let inventory: Inventory = serde_json::from_str(INVENTORY).unwrap();
        let entry = &inventory.entries["nvr"];
        assert_eq!(entry.host, "192.168.1.64");
        assert_eq!(entry.port, Some(8080));
        assert!(!entry.https);
        assert_eq!(
            inventory.entities["camera.driveway"].unique_id,
            "DS7608_101"
        );
    }

    #[test]
    fn debug_output_redacts_password() {
        let inventory: Inventory = serde_json::from_str(INVENTORY).unwrap();
        let debug = format!("{inventory:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn registry_contains_entries_and_entities() {
        let inventory: Inventory = serde_json::from_str(INVENTORY).unwrap();
        let registry = inventory.into_registry().unwrap();
        assert!(registry.device("nvr").is_some());
        assert_eq!(
            registry.entity("camera.driveway").unwrap().config_entry_id,
            "nvr"
        );
        assert!(registry.entity("camera.garden").is_none());
    }

    #[test]
    fn invalid_host_is_rejected() {
        let inventory: Inventory = serde_json::from_str(
            r#"{"entries": {"nvr": {"host": "bad host", "username": "a", "password": "b"}}}"#,
        )
        .unwrap();
        let error = inventory.into_registry().unwrap_err();
        assert_eq!(error.to_string(), "Failed to build client for nvr");
    }

    #[test]
    fn missing_file_is_empty_inventory() {
        let inventory = Inventory::read(Path::new("/nonexistent/inventory.json")).unwrap();
        assert!(inventory.entries.is_empty());
        assert!(inventory.entities.is_empty());
    }
}
