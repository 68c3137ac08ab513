use serde_json::Value;

use super::{ApiVersion, ExotelClient, ExotelError, HttpMethod, RequestBody};
use crate::domain::{
    AppId, CallDetailsQuery, CallerId, CampaignId, CampaignOptions, CampaignQuery,
    CampaignSource, CreateCampaign, E164Number, NewList,
};
use crate::transport;

impl ExotelClient {
    /// Create a voice campaign that connects each callee to the flow `app_id`.
    pub async fn create_campaign(&self, request: &CreateCampaign) -> Result<Value, ExotelError> {
        let body = transport::encode_create_campaign(self.credentials.sid(), request);
        self.call_json(
            HttpMethod::Post,
            ApiVersion::V2,
            &["campaigns"],
            &[],
            RequestBody::Json(body),
        )
        .await
    }

    /// Create a list holding `numbers`, then a voice campaign targeting that list.
    ///
    /// If Exotel rejects the campaign with 400 or 402, the list and its contacts are
    /// deleted before the original error is returned.
    pub async fn create_campaign_with_numbers(
        &self,
        list: &NewList,
        numbers: &[E164Number],
        caller_id: CallerId,
        app_id: AppId,
        options: CampaignOptions,
    ) -> Result<Value, ExotelError> {
        let created = self.create_list_with_numbers(list, numbers).await?;
        let request = CreateCampaign::new(
            caller_id,
            app_id,
            CampaignSource::Lists(vec![created.list_id.clone()]),
            options,
        )?;

        match self.create_campaign(&request).await {
            Err(
                err @ (ExotelError::Validation { .. } | ExotelError::PaymentRequired { .. }),
            ) => {
                self.roll_back_list(&created, &err).await;
                Err(err)
            }
            other => other,
        }
    }

    pub async fn get_campaign_details(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Value, ExotelError> {
        self.get(ApiVersion::V2, &["campaigns", campaign_id.as_str()], &[])
            .await
    }

    pub async fn get_bulk_campaign_details(
        &self,
        query: &CampaignQuery,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["campaigns"],
            &transport::encode_campaign_query(query),
        )
        .await
    }

    /// Per-call details of one campaign.
    pub async fn get_campaign_call_details(
        &self,
        campaign_id: &CampaignId,
        query: &CallDetailsQuery,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["campaigns", campaign_id.as_str(), "call-details"],
            &transport::encode_call_details_query(query),
        )
        .await
    }

    pub async fn delete_campaign(&self, campaign_id: &CampaignId) -> Result<Value, ExotelError> {
        self.delete(&["campaigns", campaign_id.as_str()]).await
    }
}
