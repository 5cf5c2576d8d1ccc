//! User invocable actions for Hikvision devices managed by a host application.
//!
//! The host owns the devices and the registry of entities; this crate resolves entities to device
//! channels, translates the supported movement vocabularies into [`PtzCommand`]s and reports
//! failures uniformly as [`ActionError`]s.
pub mod actions;
pub mod channel;
mod error;
pub mod ptz;
pub mod registry;

pub use actions::{call, Action};
pub use error::{ActionError, Error};
pub use hikctl_isapi::PtzCommand;
pub use registry::{Device, EntityEntry, MemoryRegistry, Registry};
