use hikctl_actions::{actions, Registry};

#[derive(Clone, Debug, clap::Parser)]
pub struct PtzStopCommand {
    /// Entities to stop, in order.
    #[arg(required = true)]
    entity_ids: Vec<String>,
}

impl PtzStopCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self { entity_ids } = self;
        actions::ptz_stop(registry, &entity_ids).await?;
        Ok(())
    }
}
