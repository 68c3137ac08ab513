use serde_json::Value;

use super::{ApiVersion, ExotelClient, ExotelError, HttpMethod, RequestBody, parse_error};
use crate::domain::{CONTACTS_BATCH_SIZE, ContactSid, CreatedItems, E164Number, ValidationError};
use crate::transport;

impl ExotelClient {
    /// Create contacts for `numbers`, in batches of at most 5000 per request.
    ///
    /// Batch envelopes are merged in request order.
    pub async fn create_contacts(
        &self,
        numbers: &[E164Number],
    ) -> Result<CreatedItems, ExotelError> {
        if numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: E164Number::FIELD,
            }
            .into());
        }

        let mut created = CreatedItems::default();
        for chunk in numbers.chunks(CONTACTS_BATCH_SIZE) {
            let body = self
                .call(
                    HttpMethod::Post,
                    ApiVersion::V2,
                    &["contacts"],
                    &[],
                    RequestBody::Json(transport::encode_create_contacts(chunk)),
                )
                .await?;
            created.merge(transport::decode_created_items(&body).map_err(parse_error)?);
        }
        Ok(created)
    }

    pub async fn get_contact_details(
        &self,
        contact_sid: &ContactSid,
    ) -> Result<Value, ExotelError> {
        self.get(ApiVersion::V2, &["contacts", contact_sid.as_str()], &[])
            .await
    }

    pub async fn delete_contact(&self, contact_sid: &ContactSid) -> Result<Value, ExotelError> {
        self.delete(&["contacts", contact_sid.as_str()]).await
    }

    /// Delete each contact in turn, stopping at the first failure.
    pub async fn delete_contacts(
        &self,
        contact_sids: &[ContactSid],
    ) -> Result<Vec<Value>, ExotelError> {
        let mut responses = Vec::with_capacity(contact_sids.len());
        for sid in contact_sids {
            responses.push(self.delete_contact(sid).await?);
        }
        Ok(responses)
    }
}
