use serde_json::Value;
use tracing::warn;

use super::{ApiVersion, ExotelClient, ExotelError, HttpMethod, RequestBody, parse_error};
use crate::domain::{
    CONTACTS_BATCH_SIZE, ContactSid, CreatedItems, E164Number, ListId, ListQuery,
    ListWithContacts, NewList, Page, ValidationError,
};
use crate::transport;

const CONFLICT: u16 = 409;

impl ExotelClient {
    /// Create one list. A 409 item code means the name is taken and becomes
    /// [`ExotelError::UniqueViolation`], whether it arrives in a 2xx batch or a 409 reply.
    pub async fn create_list(&self, list: &NewList) -> Result<CreatedItems, ExotelError> {
        let result = self
            .call(
                HttpMethod::Post,
                ApiVersion::V2,
                &["lists"],
                &[],
                RequestBody::Json(transport::encode_create_list(list)),
            )
            .await;
        let body = match result {
            Ok(body) => body,
            Err(ExotelError::HttpStatus {
                status: CONFLICT,
                body: Some(body),
            }) => {
                let conflict = transport::decode_created_items(&body)
                    .ok()
                    .and_then(|created| unique_violation(&created, list));
                return Err(conflict.unwrap_or(ExotelError::HttpStatus {
                    status: CONFLICT,
                    body: Some(body),
                }));
            }
            Err(err) => return Err(err),
        };
        let created = transport::decode_created_items(&body).map_err(parse_error)?;

        match unique_violation(&created, list) {
            Some(err) => Err(err),
            None => Ok(created),
        }
    }

    pub async fn get_list_details(&self, list_id: &ListId) -> Result<Value, ExotelError> {
        self.get(ApiVersion::V2, &["lists", list_id.as_str()], &[])
            .await
    }

    pub async fn get_bulk_lists(&self, query: &ListQuery) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["lists"],
            &transport::encode_list_query(query),
        )
        .await
    }

    pub async fn get_list_contacts(
        &self,
        list_id: &ListId,
        page: Page,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["lists", list_id.as_str(), "contacts"],
            &transport::encode_page(page),
        )
        .await
    }

    pub async fn delete_list(&self, list_id: &ListId) -> Result<Value, ExotelError> {
        self.delete(&["lists", list_id.as_str()]).await
    }

    /// Attach existing contacts to a list.
    pub async fn add_contacts_to_list(
        &self,
        list_id: &ListId,
        contact_sids: &[ContactSid],
    ) -> Result<CreatedItems, ExotelError> {
        if contact_sids.is_empty() {
            return Err(ValidationError::Empty {
                field: ContactSid::FIELD,
            }
            .into());
        }

        let body = self
            .call(
                HttpMethod::Post,
                ApiVersion::V2,
                &["lists", list_id.as_str(), "contacts"],
                &[],
                RequestBody::Json(transport::encode_contact_references(contact_sids)),
            )
            .await?;
        transport::decode_created_items(&body).map_err(parse_error)
    }

    /// Create a list, create a contact per number, and attach the contacts to the list.
    ///
    /// Works in batches of 5000 numbers. Nothing is rolled back here; callers that need
    /// cleanup get the ids back in [`ListWithContacts`].
    pub async fn create_list_with_numbers(
        &self,
        list: &NewList,
        numbers: &[E164Number],
    ) -> Result<ListWithContacts, ExotelError> {
        if numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: E164Number::FIELD,
            }
            .into());
        }

        let created = self.create_list(list).await?;
        let list_id = created.sids().next().ok_or_else(|| {
            ExotelError::Parse("list creation response carries no list sid".into())
        })?;
        let list_id = ListId::new(list_id)?;

        let mut contact_sids = Vec::with_capacity(numbers.len());
        let mut added = CreatedItems::default();
        for chunk in numbers.chunks(CONTACTS_BATCH_SIZE) {
            let contacts = self.create_contacts(chunk).await?;
            let sids = contacts
                .sids()
                .map(ContactSid::new)
                .collect::<Result<Vec<_>, _>>()?;
            if sids.is_empty() {
                warn!(
                    list_id = %list_id,
                    "no contacts created for batch, skipping list attachment"
                );
                continue;
            }
            added.merge(self.add_contacts_to_list(&list_id, &sids).await?);
            contact_sids.extend(sids);
        }

        Ok(ListWithContacts {
            list_id,
            contact_sids,
            added,
        })
    }

    /// Best-effort cleanup after a campaign built on `created` was rejected.
    ///
    /// Deletes the list, then every contact. Failures are logged and never replace `cause`.
    pub(super) async fn roll_back_list(&self, created: &ListWithContacts, cause: &ExotelError) {
        warn!(
            list_id = %created.list_id,
            contacts = created.contact_sids.len(),
            error = %cause,
            "campaign creation failed, reverting list and contact creation"
        );

        if let Err(err) = self.delete_list(&created.list_id).await {
            warn!(
                list_id = %created.list_id,
                error = %err,
                "failed to delete list during rollback"
            );
        }
        for sid in &created.contact_sids {
            if let Err(err) = self.delete_contact(sid).await {
                warn!(
                    contact_sid = %sid,
                    error = %err,
                    "failed to delete contact during rollback"
                );
            }
        }
    }
}

fn unique_violation(created: &CreatedItems, list: &NewList) -> Option<ExotelError> {
    let conflict = created.items.iter().find(|item| item.code == CONFLICT)?;
    Some(ExotelError::UniqueViolation {
        description: conflict
            .error_description
            .clone()
            .unwrap_or_else(|| format!("a list named {} already exists", list.name.as_str())),
    })
}
