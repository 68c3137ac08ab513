use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooManyRecipients { max: usize, actual: usize },
    InvalidPhoneNumbers { invalid: Vec<String> },
    InvalidUrl { input: String },
    ConflictingCampaignSource,
    MissingCampaignSource,
    EmptyRetryStatuses,
    UnknownRetryStatus { input: String },
    UnknownRetryMechanism { input: String },
    ScheduleEndsBeforeStart,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooManyRecipients { max, actual } => {
                write!(f, "too many recipients: {actual} (max {max})")
            }
            Self::InvalidPhoneNumbers { invalid } => write!(
                f,
                "not valid E.164 phone numbers: {}",
                invalid.join(", ")
            ),
            Self::InvalidUrl { input } => write!(f, "{input} is not a valid url"),
            Self::ConflictingCampaignSource => {
                write!(f, "campaign accepts either from numbers or lists, not both")
            }
            Self::MissingCampaignSource => {
                write!(f, "campaign needs either from numbers or lists")
            }
            Self::EmptyRetryStatuses => write!(f, "retry on_status must not be empty"),
            Self::UnknownRetryStatus { input } => {
                write!(f, "{input} is not a valid value for retry status")
            }
            Self::UnknownRetryMechanism { input } => {
                write!(f, "{input} is not a valid value for retry mechanism")
            }
            Self::ScheduleEndsBeforeStart => write!(f, "schedule end_at is before send_at"),
        }
    }
}

impl std::error::Error for ValidationError {}
