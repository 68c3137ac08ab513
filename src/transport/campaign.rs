use chrono::SecondsFormat;
use serde_json::{Map, Value, json};

use super::{push_query, put};
use crate::domain::{
    AccountSid, AppId, CallDetailsQuery, CampaignQuery, CampaignSource, CreateCampaign, Retry,
    Schedule,
};

/// Key pair a schedule is serialized under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKeys {
    /// Voice campaigns: `send_at` / `end_at`.
    Call,
    /// SMS and message campaigns: `start_time` / `end_time`.
    Message,
}

pub fn encode_schedule(schedule: &Schedule, keys: ScheduleKeys) -> Value {
    let (start, end) = match keys {
        ScheduleKeys::Call => ("send_at", "end_at"),
        ScheduleKeys::Message => ("start_time", "end_time"),
    };

    let mut output = Map::new();
    put(
        &mut output,
        start,
        schedule.send_at().to_rfc3339_opts(SecondsFormat::Secs, false),
    );
    if let Some(end_at) = schedule.end_at() {
        put(
            &mut output,
            end,
            end_at.to_rfc3339_opts(SecondsFormat::Secs, false),
        );
    }
    Value::Object(output)
}

pub fn encode_retry(retry: &Retry) -> Value {
    json!({
        "mechanism": retry.mechanism().as_str(),
        "on_status": retry.on_status().iter().map(|status| status.as_str()).collect::<Vec<_>>(),
        "number_of_retries": retry.number_of_retries(),
        "interval_mins": retry.interval_mins(),
    })
}

/// Flow URL Exotel dials into once the callee picks up.
pub fn flow_url(account: &AccountSid, app_id: &AppId) -> String {
    format!(
        "http://my.exotel.com/{}/exoml/start_voice/{}",
        account.as_str(),
        app_id.as_str()
    )
}

pub fn encode_create_campaign(account: &AccountSid, request: &CreateCampaign) -> Value {
    let options = request.options();
    let mut campaign = Map::new();

    put(&mut campaign, "caller_id", request.caller_id().as_str());
    put(
        &mut campaign,
        "campaign_type",
        options.campaign_type.as_str(),
    );
    put(&mut campaign, "url", flow_url(account, request.app_id()));

    match request.source() {
        CampaignSource::Numbers(numbers) => put(
            &mut campaign,
            "from",
            numbers.iter().map(|n| n.as_str()).collect::<Vec<_>>(),
        ),
        CampaignSource::Lists(lists) => put(
            &mut campaign,
            "lists",
            lists.iter().map(|l| l.as_str()).collect::<Vec<_>>(),
        ),
    }

    if let Some(call_duplicate_numbers) = options.call_duplicate_numbers {
        put(
            &mut campaign,
            "call_duplicate_numbers",
            call_duplicate_numbers,
        );
    }
    if let Some(name) = options.name.as_ref() {
        put(&mut campaign, "name", name.as_str());
    }
    if let Some(schedule) = options.schedule.as_ref() {
        put(
            &mut campaign,
            "schedule",
            encode_schedule(schedule, ScheduleKeys::Call),
        );
    }
    if let Some(url) = options.call_status_callback.as_ref() {
        put(&mut campaign, "call_status_callback", url.as_str());
    }
    if let Some(url) = options.call_schedule_callback.as_ref() {
        put(&mut campaign, "call_schedule_callback", url.as_str());
    }
    if let Some(url) = options.status_callback.as_ref() {
        put(&mut campaign, "status_callback", url.as_str());
    }
    if let Some(retry) = options.retry.as_ref() {
        put(&mut campaign, "retries", encode_retry(retry));
    }

    json!({ "campaigns": [Value::Object(campaign)] })
}

pub fn encode_campaign_query(query: &CampaignQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_query(&mut params, "offset", query.offset);
    push_query(&mut params, "limit", query.limit);
    push_query(&mut params, "name", query.name.as_deref());
    push_query(&mut params, "status", query.status.as_deref());
    push_query(&mut params, "sort_by", query.sort_by.as_deref());
    params
}

pub fn encode_call_details_query(query: &CallDetailsQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_query(&mut params, "offset", query.offset);
    push_query(&mut params, "limit", query.limit);
    push_query(&mut params, "status", query.status.as_deref());
    push_query(&mut params, "sort_by", query.sort_by.as_deref());
    params
}
