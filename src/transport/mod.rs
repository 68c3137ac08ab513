//! Transport layer: wire-format details (JSON bodies, form bodies, query strings, decoding).

mod campaign;
mod contacts;
mod envelope;
mod messaging;

use serde_json::{Map, Value};

pub use campaign::{encode_call_details_query, encode_campaign_query, encode_create_campaign};
pub use contacts::{
    encode_contact_references, encode_create_contacts, encode_create_list, encode_list_query,
    encode_page,
};
pub use envelope::{decode_created_items, decode_error_description};
pub use messaging::{
    encode_bulk_sms_form, encode_create_message_campaign, encode_create_sms_campaign,
    encode_sms_details_query,
};

fn put(map: &mut Map<String, Value>, key: &str, value: impl Into<Value>) {
    map.insert(key.to_owned(), value.into());
}

fn push_query<T: ToString>(params: &mut Vec<(String, String)>, key: &str, value: Option<T>) {
    if let Some(value) = value {
        params.push((key.to_owned(), value.to_string()));
    }
}
