use anyhow::Context;
use hikctl_actions::{Action, Registry};
use serde_json::Value;

#[derive(Clone, Debug, clap::Parser)]
pub struct CallCommand {
    /// Name of the action, e.g. `ptz_move`.
    action: String,
    /// Parameters as a JSON object, e.g. `{"entity_id": "camera.driveway", "direction": "up"}`.
    #[arg(default_value = "{}")]
    data: String,
}

impl CallCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self { action, data } = self;
        let action: Action = action.parse()?;
        let data: Value = serde_json::from_str(&data).context("Parameters are not valid JSON")?;
        if let Some(response) = hikctl_actions::call(registry, action, &data).await? {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Ok(())
    }
}
