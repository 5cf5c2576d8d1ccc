//! Resolution of entities to the device and channel that serve them.

use log::debug;

use crate::{registry::Registry, Error};

/// Extract the channel from a unique ID of the form `{serial number}_{stream id}`.
///
/// The last two digits of the stream ID select the stream type and the leading digits are the
/// channel, so `801` is channel 8 and `1201` is channel 12. Stream IDs of one or two digits are
/// taken to be the first digit.
pub fn channel_id(unique_id: &str) -> Result<u32, Error> {
    let malformed = || Error::MalformedIdentifier {
        unique_id: unique_id.to_string(),
    };
    let (_, stream_id) = unique_id.rsplit_once('_').ok_or_else(malformed)?;
    if !stream_id.is_ascii() {
        return Err(malformed());
    }
    let channel = match stream_id.len() {
        0 => return Err(malformed()),
        1 | 2 => &stream_id[..1],
        n => &stream_id[..n - 2],
    };
    channel.parse().map_err(|_| malformed())
}

/// Find the device serving `entity_id` and the channel of that device.
pub fn resolve<'r, R: Registry>(
    registry: &'r R,
    entity_id: &str,
) -> Result<(&'r R::Device, u32), Error> {
    let entity = registry
        .entity(entity_id)
        .ok_or_else(|| Error::NotFound(format!("Entity {entity_id} not found")))?;
    let device = registry
        .device(&entity.config_entry_id)
        .ok_or_else(|| Error::NotFound(format!("Config entry for {entity_id} not found")))?;
    let channel = channel_id(&entity.unique_id)?;
    debug!(
        "Resolved {entity_id} to channel {channel} of {}",
        entity.config_entry_id
    );
    Ok((device, channel))
}

#[cfg(test)]
mod tests {
    use hikctl_isapi::{Method, PtzCommand, ResponseFormat};

    use super::*;
    use crate::{registry::Device, EntityEntry, MemoryRegistry};

    struct Unreachable;

    impl Device for Unreachable {
        async fn reboot(&self) -> Result<(), hikctl_isapi::Error> {
            unreachable!()
        }

        async fn request(
            &self,
            _: Method,
            _: &str,
            _: ResponseFormat,
            _: Option<String>,
        ) -> Result<String, hikctl_isapi::Error> {
            unreachable!()
        }

        async fn ptz_control(&self, _: u32, _: PtzCommand) -> Result<(), hikctl_isapi::Error> {
            unreachable!()
        }
    }

    fn entry(config_entry_id: &str, unique_id: &str) -> EntityEntry {
        EntityEntry {
            config_entry_id: config_entry_id.to_string(),
            unique_id: unique_id.to_string(),
        }
    }

    #[test]
    fn channel_is_stream_id_without_stream_type() {
        assert_eq!(channel_id("12345678_801").unwrap(), 8);
        assert_eq!(channel_id("12345678_1201").unwrap(), 12);
        assert_eq!(channel_id("12345678_101").unwrap(), 1);
    }

    #[test]
    fn short_stream_id_uses_first_digit() {
        assert_eq!(channel_id("12345678_3").unwrap(), 3);
        assert_eq!(channel_id("12345678_42").unwrap(), 4);
    }

    #[test]
    fn only_last_separator_counts() {
        assert_eq!(channel_id("DS_2CD_1601").unwrap(), 16);
    }

    #[test]
    fn missing_separator_is_malformed() {
        let error = channel_id("12345678").unwrap_err();
        assert!(matches!(error, Error::MalformedIdentifier { unique_id } if unique_id == "12345678"));
    }

    #[test]
    fn unparsable_stream_id_is_malformed() {
        assert!(matches!(
            channel_id("12345678_"),
            Err(Error::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            channel_id("12345678_ab01"),
            Err(Error::MalformedIdentifier { .. })
        ));
        assert!(matches!(
            channel_id("12345678_ä01"),
            Err(Error::MalformedIdentifier { .. })
        ));
    }

    #[test]
    fn resolve_returns_device_and_channel() {
        let mut registry = MemoryRegistry::new();
        registry
            .insert_device("nvr", Unreachable)
            .insert_entity("camera.driveway", entry("nvr", "DS123_401"));
        let (_, channel) = resolve(&registry, "camera.driveway").unwrap();
        assert_eq!(channel, 4);
    }

    #[test]
    fn resolve_unknown_entity_is_not_found() {
        let registry = MemoryRegistry::<Unreachable>::new();
        let Err(error) = resolve(&registry, "camera.nowhere") else {
            panic!("expected an error");
        };
        assert!(matches!(error, Error::NotFound(_)));
        assert_eq!(error.to_string(), "Entity camera.nowhere not found");
    }

    #[test]
    fn resolve_entity_without_config_entry_is_not_found() {
        let mut registry = MemoryRegistry::<Unreachable>::new();
        registry.insert_entity("camera.orphan", entry("removed", "DS123_101"));
        let Err(error) = resolve(&registry, "camera.orphan") else {
            panic!("expected an error");
        };
        assert_eq!(error.to_string(), "Config entry for camera.orphan not found");
    }

    #[test]
    fn resolve_entity_with_malformed_unique_id_fails() {
        let mut registry = MemoryRegistry::new();
        registry
            .insert_device("nvr", Unreachable)
            .insert_entity("camera.odd", entry("nvr", "DS123"));
        assert!(matches!(
            resolve(&registry, "camera.odd"),
            Err(Error::MalformedIdentifier { .. })
        ));
    }
}
