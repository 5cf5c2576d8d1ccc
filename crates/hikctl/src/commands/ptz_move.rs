use hikctl_actions::{actions, ptz::MoveParams, Registry};

#[derive(Clone, Debug, clap::Parser)]
pub struct PtzMoveCommand {
    /// Entities to move, in order.
    #[arg(required = true)]
    entity_ids: Vec<String>,
    /// One of `up`, `down`, `left`, `right`, `up_left`, `up_right`, `down_left`, `down_right`,
    /// `zoom_in`, `zoom_out` or `stop`.
    #[clap(long)]
    direction: Option<String>,
    /// Pan speed, overrides `--direction`.
    #[clap(long, allow_negative_numbers = true)]
    pan: Option<i32>,
    /// Tilt speed, overrides `--direction`.
    #[clap(long, allow_negative_numbers = true)]
    tilt: Option<i32>,
    /// Zoom speed, overrides `--direction`.
    #[clap(long, allow_negative_numbers = true)]
    zoom: Option<i32>,
    /// Milliseconds until the movement stops.
    #[clap(long, default_value_t = 1000)]
    duration: u32,
    /// Keep moving until stopped.
    #[clap(long)]
    continuous: bool,
}

impl PtzMoveCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self {
            entity_ids,
            direction,
            pan,
            tilt,
            zoom,
            duration,
            continuous,
        } = self;
        let params = MoveParams {
            direction,
            pan,
            tilt,
            zoom,
            duration,
            continuous,
        };
        actions::ptz_move(registry, &entity_ids, &params).await?;
        Ok(())
    }
}
