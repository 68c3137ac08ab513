use serde_json::Value;

use super::{ApiVersion, ExotelClient, ExotelError};
use crate::domain::ExophoneSid;

impl ExotelClient {
    /// All ExoPhones assigned to the account.
    pub async fn get_all_exophones(&self) -> Result<Value, ExotelError> {
        self.get(ApiVersion::V2Beta, &["IncomingPhoneNumbers"], &[])
            .await
    }

    pub async fn get_exophone_details(
        &self,
        exophone_sid: &ExophoneSid,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2Beta,
            &["IncomingPhoneNumbers", exophone_sid.as_str()],
            &[],
        )
        .await
    }

    /// Health of an ExoPhone as reported by the v2 heartbeat endpoint.
    pub async fn get_exophone_heartbeat(
        &self,
        exophone_sid: &ExophoneSid,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["incoming-phone-numbers", exophone_sid.as_str()],
            &[],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::HttpMethod;
    use super::super::fake::{FakeTransport, client_with};
    use super::*;

    #[tokio::test]
    async fn exophone_reads_use_expected_roots() {
        let transport = FakeTransport::new();
        transport
            .respond(200, r#"{"IncomingPhoneNumbers":[]}"#)
            .respond(200, "{}")
            .respond(200, "{}");
        let client = client_with(transport.clone());
        let sid = ExophoneSid::new("ph-1").unwrap();

        let all = client.get_all_exophones().await.unwrap();
        assert!(all["IncomingPhoneNumbers"].as_array().unwrap().is_empty());
        client.get_exophone_details(&sid).await.unwrap();
        client.get_exophone_heartbeat(&sid).await.unwrap();

        assert_eq!(
            transport.paths(),
            vec![
                (HttpMethod::Get, "/v2_beta/Accounts/acme1/IncomingPhoneNumbers".to_owned()),
                (
                    HttpMethod::Get,
                    "/v2_beta/Accounts/acme1/IncomingPhoneNumbers/ph-1".to_owned()
                ),
                (
                    HttpMethod::Get,
                    "/v2/accounts/acme1/incoming-phone-numbers/ph-1".to_owned()
                ),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_exophone_is_not_found() {
        let transport = FakeTransport::new();
        transport.respond(
            404,
            r#"{"RestException":{"Status":404,"Message":"Incoming phone number not found"}}"#,
        );
        let client = client_with(transport);

        let err = client
            .get_exophone_details(&ExophoneSid::new("ph-9").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ExotelError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            "not found: Incoming phone number not found"
        );
    }
}
