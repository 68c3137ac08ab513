//! Typed Rust client for the Exotel voice campaign, SMS, contacts and ExoPhone APIs.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format details, and a small client layer orchestrating requests. Inputs are
//! validated before anything goes over the network; HTTP failures come back as
//! [`ExotelError`] variants keyed by status code.
//!
//! ```rust,no_run
//! use exotel::{
//!     AppId, CallerId, CampaignOptions, CampaignSource, CreateCampaign, ExotelClient,
//!     validate_numbers,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), exotel::ExotelError> {
//!     let client = ExotelClient::from_env()?;
//!     let numbers = validate_numbers(["+919876543210", "+919876543211"])?;
//!     let request = CreateCampaign::new(
//!         CallerId::new("08047091234")?,
//!         AppId::new("2345")?,
//!         CampaignSource::Numbers(numbers),
//!         CampaignOptions::default(),
//!     )?;
//!     let _resp = client.create_campaign(&request).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, ExotelClient, ExotelClientBuilder, ExotelError};
pub use domain::{
    AppId, BulkSmsOptions, CallDetailsQuery, CallbackUrl, CallerId, CampaignId, CampaignOptions,
    CampaignQuery, CampaignSource, Channel, ContactSid, ContentType, CreateCampaign,
    CreateMessageCampaign, CreateSmsCampaign, CreatedItems, DltEntityId, DltTemplateId,
    E164Number, ExophoneSid, ListId, ListQuery, ListWithContacts, MessageCampaign, MessageText,
    MessageType, Name, NewList, Page, Retry, RetryMechanism, RetryStatus, Schedule, SendBulkSms,
    SenderId, SmsCampaign, SmsDetailsQuery, SmsSid, ValidationError, validate_numbers,
};
