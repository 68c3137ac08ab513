use std::io;

use exotel::{
    AppId, CallerId, CampaignOptions, CampaignSource, CreateCampaign, ExotelClient, Name,
    validate_numbers,
};

mod logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let caller_id = std::env::var("EXOTEL_CALLER_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EXOTEL_CALLER_ID environment variable is required",
        )
    })?;
    let app_id = std::env::var("EXOTEL_APP_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EXOTEL_APP_ID environment variable is required",
        )
    })?;
    let numbers = std::env::var("EXOTEL_NUMBERS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EXOTEL_NUMBERS environment variable is required (comma separated)",
        )
    })?;

    let client = ExotelClient::from_env()?;
    let numbers = validate_numbers(numbers.split(','))?;
    let options = CampaignOptions {
        name: Some(Name::new("exotel demo campaign")?),
        ..Default::default()
    };
    let request = CreateCampaign::new(
        CallerId::new(caller_id)?,
        AppId::new(app_id)?,
        CampaignSource::Numbers(numbers),
        options,
    )?;

    let response = client.create_campaign(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
