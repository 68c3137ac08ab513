use serde_json::{Map, Value};

use super::campaign::{ScheduleKeys, encode_schedule};
use super::{push_query, put};
use crate::domain::{
    CreateMessageCampaign, CreateSmsCampaign, ListId, SendBulkSms, SmsDetailsQuery,
};

fn list_ids(lists: &[ListId]) -> Vec<&str> {
    lists.iter().map(ListId::as_str).collect()
}

pub fn encode_create_sms_campaign(request: &CreateSmsCampaign) -> Value {
    let campaign = request.campaign();
    let mut body = Map::new();

    put(&mut body, "content_type", campaign.content_type.as_str());
    put(&mut body, "lists", list_ids(request.lists()));
    put(&mut body, "dlt_entity_id", campaign.dlt_entity_id.value());
    put(
        &mut body,
        "dlt_template_id",
        campaign.dlt_template_id.value(),
    );
    put(&mut body, "sender_id", campaign.sender_id.as_str());
    put(&mut body, "template", campaign.template.as_str());
    put(&mut body, "sms_type", campaign.sms_type.as_str());

    if let Some(name) = campaign.name.as_ref() {
        put(&mut body, "name", name.as_str());
    }
    if let Some(schedule) = campaign.schedule.as_ref() {
        put(
            &mut body,
            "schedule",
            encode_schedule(schedule, ScheduleKeys::Message),
        );
    }
    if let Some(url) = campaign.status_callback.as_ref() {
        put(&mut body, "status_callback", url.as_str());
    }
    if let Some(url) = campaign.sms_status_callback.as_ref() {
        put(&mut body, "sms_status_callback", url.as_str());
    }

    Value::Object(body)
}

pub fn encode_create_message_campaign(request: &CreateMessageCampaign) -> Value {
    let campaign = request.campaign();
    let mut body = Map::new();

    put(&mut body, "content_type", campaign.content_type.as_str());
    put(&mut body, "lists", list_ids(request.lists()));
    put(&mut body, "dlt_entity_id", campaign.dlt_entity_id.value());
    put(&mut body, "template_id", campaign.template_id.value());
    put(&mut body, "from", campaign.sender_id.as_str());
    put(&mut body, "message_type", campaign.message_type.as_str());
    put(&mut body, "template", campaign.template.as_str());
    put(&mut body, "name", campaign.name.as_str());
    put(&mut body, "channel", campaign.channel.as_str());

    if let Some(schedule) = campaign.schedule.as_ref() {
        put(
            &mut body,
            "schedule",
            encode_schedule(schedule, ScheduleKeys::Message),
        );
    }
    if let Some(url) = campaign.status_callback.as_ref() {
        put(&mut body, "status_callback", url.as_str());
    }
    if let Some(url) = campaign.message_status_callback.as_ref() {
        put(&mut body, "message_status_callback", url.as_str());
    }

    Value::Object(body)
}

/// Form body of the v1 bulk SMS endpoint. Each recipient is a separate `To` field.
pub fn encode_bulk_sms_form(request: &SendBulkSms) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    params.push(("From".to_owned(), request.from().as_str().to_owned()));
    for number in request.to() {
        params.push(("To".to_owned(), number.as_str().to_owned()));
    }
    params.push(("Body".to_owned(), request.body().as_str().to_owned()));

    let options = request.options();
    if let Some(encoding) = options.encoding_type {
        params.push(("EncodingType".to_owned(), encoding.as_str().to_owned()));
    }
    if let Some(priority) = options.priority {
        params.push(("Priority".to_owned(), priority.as_str().to_owned()));
    }
    if let Some(url) = options.status_callback.as_ref() {
        params.push(("StatusCallback".to_owned(), url.as_str().to_owned()));
    }
    if let Some(entity) = options.dlt_entity_id {
        params.push(("DltEntityId".to_owned(), entity.value().to_string()));
    }
    if let Some(template) = options.dlt_template_id {
        params.push(("DltTemplateId".to_owned(), template.value().to_string()));
    }
    if let Some(sms_type) = options.sms_type {
        params.push(("SmsType".to_owned(), sms_type.as_str().to_owned()));
    }
    params
}

pub fn encode_sms_details_query(query: &SmsDetailsQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_query(&mut params, "offset", query.offset);
    push_query(&mut params, "limit", query.limit);
    push_query(&mut params, "sort_by", query.sort_by.as_deref());
    params
}
