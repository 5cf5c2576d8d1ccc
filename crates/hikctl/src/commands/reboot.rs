use hikctl_actions::{actions, Registry};

#[derive(Clone, Debug, clap::Parser)]
pub struct RebootCommand {
    /// The configuration entry of the device to restart.
    config_entry_id: String,
}

impl RebootCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self { config_entry_id } = self;
        actions::reboot(registry, &config_entry_id).await?;
        Ok(())
    }
}
