use std::str::FromStr;

use chrono::{DateTime, FixedOffset};

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    AppId, CallbackUrl, CallerId, DltEntityId, DltTemplateId, E164Number, ListId, MessageText,
    Name, SenderId,
};

/// Maximum number of recipients accepted by one bulk SMS request.
pub const BULK_SMS_MAX_RECIPIENTS: usize = 100;

/// Maximum number of contacts created by one contacts request; larger inputs are chunked.
pub const CONTACTS_BATCH_SIZE: usize = 5000;

/// Tag applied to lists created without an explicit tag.
pub const DEFAULT_LIST_TAG: &str = "demo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Call outcome that makes a campaign retry the number.
pub enum RetryStatus {
    Busy,
    Failed,
    NoAnswer,
}

impl RetryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Busy => "busy",
            Self::Failed => "failed",
            Self::NoAnswer => "no-answer",
        }
    }
}

impl FromStr for RetryStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "busy" => Ok(Self::Busy),
            "failed" => Ok(Self::Failed),
            "no-answer" => Ok(Self::NoAnswer),
            other => Err(ValidationError::UnknownRetryStatus {
                input: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Spacing between retry attempts.
pub enum RetryMechanism {
    #[default]
    Linear,
    Exponential,
}

impl RetryMechanism {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Exponential => "Exponential",
        }
    }
}

impl FromStr for RetryMechanism {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Linear" => Ok(Self::Linear),
            "Exponential" => Ok(Self::Exponential),
            other => Err(ValidationError::UnknownRetryMechanism {
                input: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Retry policy forwarded to Exotel with a voice campaign.
///
/// The library never retries on its own; this is only declarative campaign configuration.
pub struct Retry {
    number_of_retries: u32,
    interval_mins: u32,
    on_status: Vec<RetryStatus>,
    mechanism: RetryMechanism,
}

impl Retry {
    /// Create a linear retry policy.
    ///
    /// `on_status` must contain at least one status; duplicates are dropped, order is kept.
    pub fn new(
        number_of_retries: u32,
        interval_mins: u32,
        on_status: impl IntoIterator<Item = RetryStatus>,
    ) -> Result<Self, ValidationError> {
        let mut statuses = Vec::new();
        for status in on_status {
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
        if statuses.is_empty() {
            return Err(ValidationError::EmptyRetryStatuses);
        }
        Ok(Self {
            number_of_retries,
            interval_mins,
            on_status: statuses,
            mechanism: RetryMechanism::default(),
        })
    }

    pub fn with_mechanism(mut self, mechanism: RetryMechanism) -> Self {
        self.mechanism = mechanism;
        self
    }

    pub fn number_of_retries(&self) -> u32 {
        self.number_of_retries
    }

    pub fn interval_mins(&self) -> u32 {
        self.interval_mins
    }

    pub fn on_status(&self) -> &[RetryStatus] {
        &self.on_status
    }

    pub fn mechanism(&self) -> RetryMechanism {
        self.mechanism
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// When a campaign starts and, optionally, when it stops.
///
/// Timestamps always carry an offset, so naive local times cannot be sent by accident.
pub struct Schedule {
    send_at: DateTime<FixedOffset>,
    end_at: Option<DateTime<FixedOffset>>,
}

impl Schedule {
    pub fn starting_at(send_at: impl Into<DateTime<FixedOffset>>) -> Self {
        Self {
            send_at: send_at.into(),
            end_at: None,
        }
    }

    /// Schedule with an end time. Fails when `end_at` precedes `send_at`.
    pub fn between(
        send_at: impl Into<DateTime<FixedOffset>>,
        end_at: impl Into<DateTime<FixedOffset>>,
    ) -> Result<Self, ValidationError> {
        let send_at = send_at.into();
        let end_at = end_at.into();
        if end_at < send_at {
            return Err(ValidationError::ScheduleEndsBeforeStart);
        }
        Ok(Self {
            send_at,
            end_at: Some(end_at),
        })
    }

    pub fn send_at(&self) -> DateTime<FixedOffset> {
        self.send_at
    }

    pub fn end_at(&self) -> Option<DateTime<FixedOffset>> {
        self.end_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Whether campaign content is the same for every recipient or filled per contact.
pub enum ContentType {
    #[default]
    Static,
    Dynamic,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Who a voice campaign calls: explicit numbers or existing contact lists.
pub enum CampaignSource {
    Numbers(Vec<E164Number>),
    Lists(Vec<ListId>),
}

#[derive(Debug, Clone, Default)]
pub struct CampaignOptions {
    pub name: Option<Name>,
    pub campaign_type: ContentType,
    pub call_duplicate_numbers: Option<bool>,
    pub schedule: Option<Schedule>,
    pub call_status_callback: Option<CallbackUrl>,
    pub call_schedule_callback: Option<CallbackUrl>,
    pub status_callback: Option<CallbackUrl>,
    pub retry: Option<Retry>,
}

#[derive(Debug, Clone)]
/// Voice call campaign creation request.
pub struct CreateCampaign {
    caller_id: CallerId,
    app_id: AppId,
    source: CampaignSource,
    options: CampaignOptions,
}

impl CreateCampaign {
    pub fn new(
        caller_id: CallerId,
        app_id: AppId,
        source: CampaignSource,
        options: CampaignOptions,
    ) -> Result<Self, ValidationError> {
        let empty = match &source {
            CampaignSource::Numbers(numbers) => numbers.is_empty(),
            CampaignSource::Lists(lists) => lists.is_empty(),
        };
        if empty {
            return Err(ValidationError::MissingCampaignSource);
        }
        Ok(Self {
            caller_id,
            app_id,
            source,
            options,
        })
    }

    /// Build a request from optional `from` numbers and optional list ids.
    ///
    /// Exactly one of them must be given.
    pub fn from_parts(
        caller_id: CallerId,
        app_id: AppId,
        from: Option<Vec<E164Number>>,
        lists: Option<Vec<ListId>>,
        options: CampaignOptions,
    ) -> Result<Self, ValidationError> {
        let source = match (from, lists) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingCampaignSource),
            (None, None) => return Err(ValidationError::MissingCampaignSource),
            (Some(numbers), None) => CampaignSource::Numbers(numbers),
            (None, Some(lists)) => CampaignSource::Lists(lists),
        };
        Self::new(caller_id, app_id, source, options)
    }

    pub fn caller_id(&self) -> &CallerId {
        &self.caller_id
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn source(&self) -> &CampaignSource {
        &self.source
    }

    pub fn options(&self) -> &CampaignOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Regulatory category of an SMS.
pub enum MessageType {
    Transactional,
    TransactionalOptIn,
    Promotional,
}

impl MessageType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transactional => "transactional",
            Self::TransactionalOptIn => "transactional_opt_in",
            Self::Promotional => "promotional",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    Whatsapp,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Clone)]
/// Content and settings of a legacy SMS campaign (`sms-campaigns`).
pub struct SmsCampaign {
    pub content_type: ContentType,
    pub dlt_entity_id: DltEntityId,
    pub dlt_template_id: DltTemplateId,
    pub sender_id: SenderId,
    pub sms_type: MessageType,
    pub template: MessageText,
    pub name: Option<Name>,
    pub schedule: Option<Schedule>,
    pub status_callback: Option<CallbackUrl>,
    pub sms_status_callback: Option<CallbackUrl>,
}

#[derive(Debug, Clone)]
pub struct CreateSmsCampaign {
    lists: Vec<ListId>,
    campaign: SmsCampaign,
}

impl CreateSmsCampaign {
    pub fn new(lists: Vec<ListId>, campaign: SmsCampaign) -> Result<Self, ValidationError> {
        if lists.is_empty() {
            return Err(ValidationError::Empty {
                field: ListId::FIELD,
            });
        }
        Ok(Self { lists, campaign })
    }

    pub fn lists(&self) -> &[ListId] {
        &self.lists
    }

    pub fn campaign(&self) -> &SmsCampaign {
        &self.campaign
    }
}

#[derive(Debug, Clone)]
/// Content and settings of a message campaign (`message-campaigns`), SMS or WhatsApp.
pub struct MessageCampaign {
    pub content_type: ContentType,
    pub dlt_entity_id: DltEntityId,
    pub template_id: DltTemplateId,
    pub sender_id: SenderId,
    pub message_type: MessageType,
    pub template: MessageText,
    pub name: Name,
    pub channel: Channel,
    pub schedule: Option<Schedule>,
    pub status_callback: Option<CallbackUrl>,
    pub message_status_callback: Option<CallbackUrl>,
}

#[derive(Debug, Clone)]
pub struct CreateMessageCampaign {
    lists: Vec<ListId>,
    campaign: MessageCampaign,
}

impl CreateMessageCampaign {
    pub fn new(lists: Vec<ListId>, campaign: MessageCampaign) -> Result<Self, ValidationError> {
        if lists.is_empty() {
            return Err(ValidationError::Empty {
                field: ListId::FIELD,
            });
        }
        Ok(Self { lists, campaign })
    }

    pub fn lists(&self) -> &[ListId] {
        &self.lists
    }

    pub fn campaign(&self) -> &MessageCampaign {
        &self.campaign
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingType {
    Plain,
    Unicode,
}

impl EncodingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Unicode => "unicode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BulkSmsOptions {
    pub encoding_type: Option<EncodingType>,
    pub priority: Option<Priority>,
    pub status_callback: Option<CallbackUrl>,
    pub dlt_entity_id: Option<DltEntityId>,
    pub dlt_template_id: Option<DltTemplateId>,
    pub sms_type: Option<MessageType>,
}

#[derive(Debug, Clone)]
/// Same static SMS to many recipients through the v1 API.
pub struct SendBulkSms {
    from: SenderId,
    to: Vec<E164Number>,
    body: MessageText,
    options: BulkSmsOptions,
}

impl SendBulkSms {
    pub fn new(
        from: SenderId,
        to: Vec<E164Number>,
        body: MessageText,
        options: BulkSmsOptions,
    ) -> Result<Self, ValidationError> {
        if to.is_empty() {
            return Err(ValidationError::Empty {
                field: E164Number::FIELD,
            });
        }
        if to.len() > BULK_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: BULK_SMS_MAX_RECIPIENTS,
                actual: to.len(),
            });
        }
        Ok(Self {
            from,
            to,
            body,
            options,
        })
    }

    pub fn from(&self) -> &SenderId {
        &self.from
    }

    pub fn to(&self) -> &[E164Number] {
        &self.to
    }

    pub fn body(&self) -> &MessageText {
        &self.body
    }

    pub fn options(&self) -> &BulkSmsOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// A contact list to create.
pub struct NewList {
    pub name: Name,
    pub tag: String,
}

impl NewList {
    /// List with the default `demo` tag.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            tag: DEFAULT_LIST_TAG.to_owned(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

/// Filters for bulk campaign and SMS campaign listings. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallDetailsQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub name: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsDetailsQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}
