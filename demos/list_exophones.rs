use exotel::{ExophoneSid, ExotelClient};

mod logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let client = ExotelClient::from_env()?;

    let exophones = client.get_all_exophones().await?;
    println!("{}", serde_json::to_string_pretty(&exophones)?);

    if let Ok(sid) = std::env::var("EXOTEL_EXOPHONE_SID") {
        let heartbeat = client
            .get_exophone_heartbeat(&ExophoneSid::new(sid)?)
            .await?;
        println!("{}", serde_json::to_string_pretty(&heartbeat)?);
    }

    Ok(())
}
