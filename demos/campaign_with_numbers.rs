use std::io;

use exotel::{
    AppId, CallerId, CampaignOptions, ExotelClient, Name, NewList, Retry, RetryStatus,
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
    let list_name =
        std::env::var("EXOTEL_LIST_NAME").unwrap_or_else(|_| "exotel-demo-list".to_owned());

    let client = ExotelClient::from_env()?;
    let numbers = validate_numbers(numbers.split(','))?;
    let options = CampaignOptions {
        retry: Some(Retry::new(2, 10, [RetryStatus::Busy, RetryStatus::NoAnswer])?),
        ..Default::default()
    };

    // The list and its contacts are removed again if the campaign is rejected.
    let response = client
        .create_campaign_with_numbers(
            &NewList::new(Name::new(list_name)?),
            &numbers,
            CallerId::new(caller_id)?,
            AppId::new(app_id)?,
            options,
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
