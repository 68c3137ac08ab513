use std::fmt;
use std::sync::LazyLock;

use phonenumber::country;
use regex::Regex;

use crate::domain::validation::ValidationError;

static E164_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+[1-9][0-9]{10,14}$").expect("E.164 pattern compiles")
});

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:http|ftp)s?://",
        r"(?:(?:[A-Z0-9](?:[A-Z0-9-]{0,61}[A-Z0-9])?\.)+(?:[A-Z]{2,6}\.?|[A-Z0-9-]{2,}\.?)",
        r"|localhost",
        r"|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})",
        r"(?::[0-9]+)?",
        r"(?:/?|[/?]\S+)$",
    ))
    .expect("url pattern compiles")
});

// Newtype over a string that must be non-empty after trimming. The trimmed value is kept.
macro_rules! trimmed_string {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub const FIELD: &'static str = $field;

            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: Self::FIELD });
                }
                Ok(Self(trimmed.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

trimmed_string!(
    /// Exotel account SID, part of every account-scoped API path.
    AccountSid,
    "sid"
);
trimmed_string!(
    /// Exotel API key, sent as the HTTP Basic auth user name.
    ApiKey,
    "api_key"
);

#[derive(Clone, PartialEq, Eq, Hash)]
/// Exotel API token, sent as the HTTP Basic auth password.
///
/// Invariant: must not be empty (whitespace is preserved). `Debug` never prints the value.
pub struct ApiToken(String);

impl ApiToken {
    pub const FIELD: &'static str = "api_token";

    /// Create a validated [`ApiToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

trimmed_string!(
    /// Identifier of a voice, SMS or message campaign.
    CampaignId,
    "campaign_id"
);
trimmed_string!(
    /// Identifier of a contact created through the contacts API.
    ContactSid,
    "contact_sid"
);
trimmed_string!(
    /// Identifier of a contact list.
    ListId,
    "list_id"
);
trimmed_string!(
    /// Identifier of an ExoPhone assigned to the account.
    ExophoneSid,
    "exophone_sid"
);
trimmed_string!(
    /// Identifier of a single SMS sent through the v1 API.
    SmsSid,
    "sms_sid"
);
trimmed_string!(
    /// Identifier of the call flow a campaign connects to.
    AppId,
    "app_id"
);
trimmed_string!(
    /// ExoPhone used as the caller id of a voice campaign (`caller_id`).
    ///
    /// ExoPhones may be landline formatted, so no E.164 check is applied.
    CallerId,
    "caller_id"
);
trimmed_string!(
    /// SMS sender id (`From` / `sender_id`). Must be approved for the account.
    SenderId,
    "sender_id"
);
trimmed_string!(
    /// Human-readable name of a campaign or contact list.
    Name,
    "name"
);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message body or campaign template.
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    pub const FIELD: &'static str = "template";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// DLT registered entity id, required for commercial SMS in India.
pub struct DltEntityId(u64);

impl DltEntityId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// DLT registered template id.
pub struct DltTemplateId(u64);

impl DltTemplateId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in strict E.164 format (`+` followed by 11 to 15 digits, no leading zero).
///
/// Use [`E164Number::parse`] to normalize loosely formatted input first.
pub struct E164Number(String);

impl E164Number {
    pub const FIELD: &'static str = "number";

    /// Validate an already E.164 formatted number. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !E164_PATTERN.is_match(trimmed) {
            return Err(ValidationError::InvalidPhoneNumbers {
                invalid: vec![trimmed.to_owned()],
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse a number such as `"+91 98765-43210"` or a national number with
    /// `default_region`, normalize it into E.164, then validate it.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumbers {
                invalid: vec![raw.to_owned()],
            }
        })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Self::new(e164).map_err(|_| ValidationError::InvalidPhoneNumbers {
            invalid: vec![raw.to_owned()],
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for E164Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate a batch of numbers, reporting every invalid input at once.
///
/// An empty batch is rejected with [`ValidationError::Empty`], since every endpoint taking
/// numbers needs at least one.
pub fn validate_numbers<I, S>(numbers: I) -> Result<Vec<E164Number>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    for number in numbers {
        let number = number.into();
        match E164Number::new(number.as_str()) {
            Ok(parsed) => valid.push(parsed),
            Err(_) => invalid.push(number),
        }
    }

    if !invalid.is_empty() {
        return Err(ValidationError::InvalidPhoneNumbers { invalid });
    }
    if valid.is_empty() {
        return Err(ValidationError::Empty {
            field: E164Number::FIELD,
        });
    }
    Ok(valid)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Callback URL Exotel posts status updates to.
///
/// Accepts `http`, `https`, `ftp` and `ftps` URLs whose host is a dotted domain name,
/// `localhost` or an IPv4 address, with optional port and path. Matching is case-insensitive.
pub struct CallbackUrl(String);

impl CallbackUrl {
    pub const FIELD: &'static str = "status_callback";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !URL_PATTERN.is_match(&value) {
            return Err(ValidationError::InvalidUrl { input: value });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
