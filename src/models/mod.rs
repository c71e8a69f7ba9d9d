pub mod message;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use message::{Conversation, Message, Role};

/// Listing platform a property can be imported from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Platform {
    #[serde(rename = "Booking.com")]
    Booking,
    Airbnb,
    #[serde(rename = "VRBO")]
    Vrbo,
    Expedia,
}

impl Platform {
    /// Classification order; the first match wins.
    pub const ALL: [Platform; 4] = [
        Platform::Booking,
        Platform::Airbnb,
        Platform::Vrbo,
        Platform::Expedia,
    ];

    /// Canonical display name, e.g. "Booking.com"
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Booking => "Booking.com",
            Platform::Airbnb => "Airbnb",
            Platform::Vrbo => "VRBO",
            Platform::Expedia => "Expedia",
        }
    }

    /// Host fragment used to recognise the platform
    pub fn identifier(&self) -> &'static str {
        match self {
            Platform::Booking => "booking.com",
            Platform::Airbnb => "airbnb.com",
            Platform::Vrbo => "vrbo.com",
            Platform::Expedia => "expedia.com",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Nightly base price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub base: f64,
    pub currency: String,
}

/// Rental property produced by a successful import
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub name: String,
    pub address: String,
    pub description: String,
    pub check_in_time: String,
    pub check_out_time: String,
    pub wifi: String,
    pub parking: bool,
    pub max_guests: u32,
    pub rules: Vec<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub price: Price,
    pub platform: Platform,
    pub original_url: String,
    pub imported_at: DateTime<Utc>,
}

impl Property {
    /// Compare two imports of the same listing, ignoring when they happened.
    pub fn same_listing(&self, other: &Property) -> bool {
        Property {
            imported_at: other.imported_at,
            ..self.clone()
        } == *other
    }
}

/// Result of an import: either a full record or a user-facing reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum ImportOutcome {
    Success(Property),
    Failure(String),
}

impl ImportOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ImportOutcome::Success(_))
    }

    pub fn property(&self) -> Option<&Property> {
        match self {
            ImportOutcome::Success(property) => Some(property),
            ImportOutcome::Failure(_) => None,
        }
    }

    pub fn into_property(self) -> Option<Property> {
        match self {
            ImportOutcome::Success(property) => Some(property),
            ImportOutcome::Failure(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            ImportOutcome::Success(_) => None,
            ImportOutcome::Failure(reason) => Some(reason),
        }
    }
}
