use anyhow::{Error, anyhow};
use kaizen::{PlatformClient, PublicClient};
use kaizen_config::ClientConfig;
use kaizen_model::status::ComponentState;

pub(crate) async fn status(config: &ClientConfig) -> Result<(), Error> {
    let client = PlatformClient::from_api_config(&config.api)?;
    let status = client.get_status().await?;

    for component in status.components.keys() {
        let state = match status.component_state(component) {
            Some(ComponentState::Ok) => "ok",
            _ => "error",
        };
        println!("{component}: {state}");
    }

    if status.is_ok() {
        Ok(())
    } else {
        Err(anyhow!("The platform reports failing components"))
    }
}
