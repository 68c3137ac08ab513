//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BULK_SMS_MAX_RECIPIENTS, BulkSmsOptions, CONTACTS_BATCH_SIZE, CallDetailsQuery,
    CampaignOptions, CampaignQuery, CampaignSource, Channel, ContentType, CreateCampaign,
    CreateMessageCampaign, CreateSmsCampaign, DEFAULT_LIST_TAG, EncodingType, ListQuery,
    MessageCampaign, MessageType, NewList, Page, Priority, Retry, RetryMechanism, RetryStatus,
    Schedule, SendBulkSms, SmsCampaign, SmsDetailsQuery,
};
pub use response::{BatchMetadata, CreatedItem, CreatedItems, ListWithContacts};
pub use validation::ValidationError;
pub use value::{
    AccountSid, ApiKey, ApiToken, AppId, CallbackUrl, CallerId, CampaignId, ContactSid,
    DltEntityId, DltTemplateId, E164Number, ExophoneSid, ListId, MessageText, Name, SenderId,
    SmsSid, validate_numbers,
};
