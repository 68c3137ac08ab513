use std::io;

use exotel::{BulkSmsOptions, ExotelClient, MessageText, SendBulkSms, SenderId, validate_numbers};

mod logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let sender_id = std::env::var("EXOTEL_SENDER_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EXOTEL_SENDER_ID environment variable is required",
        )
    })?;
    let numbers = std::env::var("EXOTEL_NUMBERS").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EXOTEL_NUMBERS environment variable is required (comma separated)",
        )
    })?;
    let message = std::env::var("EXOTEL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the exotel demo.".to_owned());

    let client = ExotelClient::from_env()?;
    let request = SendBulkSms::new(
        SenderId::new(sender_id)?,
        validate_numbers(numbers.split(','))?,
        MessageText::new(message)?,
        BulkSmsOptions::default(),
    )?;

    let response = client.send_bulk_sms(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
