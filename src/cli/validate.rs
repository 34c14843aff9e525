use crate::core::settings::Settings;
use crate::providers::{DeliverooClient, SetupError};
use anyhow::Result;

pub async fn run(settings: Settings) -> Result<()> {
    settings.validate()?;

    let client = DeliverooClient::new(&settings);
    match client.check_credentials().await {
        Ok(()) => {
            println!("Token accepted by the Deliveroo API");
            Ok(())
        }
        Err(err) => {
            match &err {
                SetupError::CannotConnect(_) => {
                    tracing::error!(error = %err, "Failed to connect to the Deliveroo API")
                }
                SetupError::InvalidAuth(status) => {
                    tracing::error!(%status, "Deliveroo API rejected the token")
                }
            }
            Err(err.into())
        }
    }
}
