use serde_json::{Value, json};

use super::push_query;
use crate::domain::{ContactSid, E164Number, ListQuery, NewList, Page};

pub fn encode_create_contacts(numbers: &[E164Number]) -> Value {
    let contacts = numbers
        .iter()
        .map(|number| json!({ "number": number.as_str() }))
        .collect::<Vec<_>>();
    json!({ "contacts": contacts })
}

pub fn encode_contact_references(sids: &[ContactSid]) -> Value {
    let references = sids
        .iter()
        .map(|sid| json!({ "contact_sid": sid.as_str() }))
        .collect::<Vec<_>>();
    json!({ "contact_references": references })
}

pub fn encode_create_list(list: &NewList) -> Value {
    json!({
        "lists": [
            { "name": list.name.as_str(), "tag": list.tag }
        ]
    })
}

pub fn encode_list_query(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_query(&mut params, "offset", query.offset);
    push_query(&mut params, "limit", query.limit);
    push_query(&mut params, "name", query.name.as_deref());
    push_query(&mut params, "sort_by", query.sort_by.as_deref());
    params
}

pub fn encode_page(page: Page) -> Vec<(String, String)> {
    let mut params = Vec::new();
    push_query(&mut params, "offset", page.offset);
    push_query(&mut params, "limit", page.limit);
    params
}
