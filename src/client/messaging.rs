use serde_json::Value;

use super::{ApiVersion, ExotelClient, ExotelError, HttpMethod, RequestBody};
use crate::domain::{
    CampaignId, CampaignQuery, CreateMessageCampaign, CreateSmsCampaign, E164Number,
    MessageCampaign, NewList, SendBulkSms, SmsCampaign, SmsDetailsQuery, SmsSid,
};
use crate::transport;

impl ExotelClient {
    pub async fn create_sms_campaign(
        &self,
        request: &CreateSmsCampaign,
    ) -> Result<Value, ExotelError> {
        self.call_json(
            HttpMethod::Post,
            ApiVersion::V2,
            &["sms-campaigns"],
            &[],
            RequestBody::Json(transport::encode_create_sms_campaign(request)),
        )
        .await
    }

    pub async fn create_message_campaign(
        &self,
        request: &CreateMessageCampaign,
    ) -> Result<Value, ExotelError> {
        self.call_json(
            HttpMethod::Post,
            ApiVersion::V2,
            &["message-campaigns"],
            &[],
            RequestBody::Json(transport::encode_create_message_campaign(request)),
        )
        .await
    }

    /// Create a list holding `numbers`, then an SMS campaign targeting it.
    ///
    /// A 400 on campaign creation deletes the list and its contacts again.
    pub async fn create_sms_campaign_with_numbers(
        &self,
        list: &NewList,
        numbers: &[E164Number],
        campaign: SmsCampaign,
    ) -> Result<Value, ExotelError> {
        let created = self.create_list_with_numbers(list, numbers).await?;
        let request = CreateSmsCampaign::new(vec![created.list_id.clone()], campaign)?;

        match self.create_sms_campaign(&request).await {
            Err(err @ ExotelError::Validation { .. }) => {
                self.roll_back_list(&created, &err).await;
                Err(err)
            }
            other => other,
        }
    }

    /// Create a list holding `numbers`, then an SMS or WhatsApp message campaign targeting it.
    ///
    /// A 400 on campaign creation deletes the list and its contacts again.
    pub async fn create_message_campaign_with_numbers(
        &self,
        list: &NewList,
        numbers: &[E164Number],
        campaign: MessageCampaign,
    ) -> Result<Value, ExotelError> {
        let created = self.create_list_with_numbers(list, numbers).await?;
        let request = CreateMessageCampaign::new(vec![created.list_id.clone()], campaign)?;

        match self.create_message_campaign(&request).await {
            Err(err @ ExotelError::Validation { .. }) => {
                self.roll_back_list(&created, &err).await;
                Err(err)
            }
            other => other,
        }
    }

    pub async fn get_sms_campaign_details(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["sms-campaigns", campaign_id.as_str()],
            &[],
        )
        .await
    }

    pub async fn get_bulk_sms_campaign_details(
        &self,
        query: &CampaignQuery,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["sms-campaigns"],
            &transport::encode_campaign_query(query),
        )
        .await
    }

    /// Per-message delivery details of one SMS campaign.
    pub async fn get_sms_campaign_sms_details(
        &self,
        campaign_id: &CampaignId,
        query: &SmsDetailsQuery,
    ) -> Result<Value, ExotelError> {
        self.get(
            ApiVersion::V2,
            &["sms-campaigns", campaign_id.as_str(), "sms-details"],
            &transport::encode_sms_details_query(query),
        )
        .await
    }

    /// Details of one SMS sent through the v1 API.
    pub async fn get_sms_details(&self, sms_sid: &SmsSid) -> Result<Value, ExotelError> {
        let resource = format!("{sms_sid}.json");
        self.get(ApiVersion::V1, &["SMS", "Messages", &resource], &[])
            .await
    }

    /// Send one text to up to 100 recipients through the v1 form API.
    pub async fn send_bulk_sms(&self, request: &SendBulkSms) -> Result<Value, ExotelError> {
        self.call_json(
            HttpMethod::Post,
            ApiVersion::V1,
            &["Sms", "send.json"],
            &[],
            RequestBody::Form(transport::encode_bulk_sms_form(request)),
        )
        .await
    }
}
