use hikctl_actions::{actions, actions::IsapiRequest, Registry};

#[derive(Clone, Debug, clap::Parser)]
pub struct RequestCommand {
    /// The configuration entry of the device to send the request to.
    config_entry_id: String,
    /// Path relative to `/ISAPI/`, e.g. `System/deviceInfo`.
    path: String,
    #[clap(long, short = 'X', default_value = "POST")]
    method: String,
    /// Request body.
    #[clap(long)]
    payload: Option<String>,
}

impl RequestCommand {
    pub async fn exec(self, registry: &impl Registry) -> anyhow::Result<()> {
        let Self {
            config_entry_id,
            path,
            method,
            payload,
        } = self;
        let mut request = IsapiRequest::new(config_entry_id, path).method(method);
        if let Some(payload) = payload {
            request = request.payload(payload);
        }
        let text = actions::isapi_request(registry, &request).await?;
        println!("{text}");
        Ok(())
    }
}
