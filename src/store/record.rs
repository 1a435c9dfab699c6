use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// When the record was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timestamp {
    /// Filled in by the store at write time.
    #[default]
    Server,
    /// Milliseconds since the Unix epoch.
    At(i64),
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Server => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(".sv", "timestamp")?;
                map.end()
            }
            Self::At(millis) => serializer.serialize_i64(*millis),
        }
    }
}

/// One contact-form submission as sent to the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRecord {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl FormRecord {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
            timestamp: Timestamp::Server,
        }
    }
}
