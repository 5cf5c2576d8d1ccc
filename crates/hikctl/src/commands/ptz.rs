use hikctl_actions::{
    actions,
    ptz::{ContinuousMoveParams, MoveMode},
    Registry,
};

#[derive(Clone, Debug, clap::Parser)]
pub struct PtzCommand {
    /// Entities to move, in order.
    #[arg(required = true)]
    entity_ids: Vec<String>,
    /// `LEFT` or `RIGHT`.
    #[clap(long)]
    pan: Option<String>,
    /// `UP` or `DOWN`.
    #[clap(long)]
    tilt: Option<String>,
    /// `ZOOM_IN` or `ZOOM_OUT`.
    #[clap(long)]
    zoom: Option<String>,
    /// `ContinuousMove` or `Stop`.
    #[clap(long, default_value = "ContinuousMove")]
    move_mode: String,
    /// Seconds until the movement stops, `0` to keep moving until stopped.
    #[clap(long, default_value_t = 2.0)]
    continuous_duration: f64,
}

impl PtzCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self {
            entity_ids,
            pan,
            tilt,
            zoom,
            move_mode,
            continuous_duration,
        } = self;
        let params = ContinuousMoveParams {
            pan,
            tilt,
            zoom,
            move_mode: MoveMode::from(move_mode.as_str()),
            continuous_duration,
        };
        actions::ptz(registry, &entity_ids, &params).await?;
        Ok(())
    }
}
