use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Name given to a child created with a blank name
pub const DEFAULT_CHILD_NAME: &str = "New Child";

/// Theme color tag used to tint a child's card and detail screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeColor {
    PastelPink,
    #[default]
    PastelBlue,
    PastelGreen,
    PastelYellow,
    PastelOrange,
    PastelPurple,
    PastelMint,
    PastelCoral,
    PastelLavender,
    PastelSky,
}

impl ThemeColor {
    pub const ALL: [ThemeColor; 10] = [
        ThemeColor::PastelPink,
        ThemeColor::PastelBlue,
        ThemeColor::PastelGreen,
        ThemeColor::PastelYellow,
        ThemeColor::PastelOrange,
        ThemeColor::PastelPurple,
        ThemeColor::PastelMint,
        ThemeColor::PastelCoral,
        ThemeColor::PastelLavender,
        ThemeColor::PastelSky,
    ];

    /// Tag used in the persisted document
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeColor::PastelPink => "pastelPink",
            ThemeColor::PastelBlue => "pastelBlue",
            ThemeColor::PastelGreen => "pastelGreen",
            ThemeColor::PastelYellow => "pastelYellow",
            ThemeColor::PastelOrange => "pastelOrange",
            ThemeColor::PastelPurple => "pastelPurple",
            ThemeColor::PastelMint => "pastelMint",
            ThemeColor::PastelCoral => "pastelCoral",
            ThemeColor::PastelLavender => "pastelLavender",
            ThemeColor::PastelSky => "pastelSky",
        }
    }

    /// RGB components in the 0.0..=1.0 range
    pub fn rgb(&self) -> (f32, f32, f32) {
        match self {
            ThemeColor::PastelPink => (1.0, 0.6, 0.8),
            ThemeColor::PastelBlue => (0.4, 0.8, 1.0),
            ThemeColor::PastelGreen => (0.6, 0.95, 0.6),
            ThemeColor::PastelYellow => (1.0, 0.95, 0.5),
            ThemeColor::PastelOrange => (1.0, 0.7, 0.5),
            ThemeColor::PastelPurple => (0.8, 0.6, 1.0),
            ThemeColor::PastelMint => (0.5, 1.0, 0.8),
            ThemeColor::PastelCoral => (1.0, 0.6, 0.6),
            ThemeColor::PastelLavender => (0.7, 0.7, 1.0),
            ThemeColor::PastelSky => (0.5, 0.9, 1.0),
        }
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock avatar shown when no custom image has been picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Avatar {
    #[default]
    Boy,
    Girl,
}

impl Avatar {
    pub const ALL: [Avatar; 2] = [Avatar::Boy, Avatar::Girl];

    pub fn image_name(&self) -> &'static str {
        match self {
            Avatar::Boy => "avatar_boy",
            Avatar::Girl => "avatar_girl",
        }
    }
}

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received (allowance, gifts, chores)
    #[default]
    Income,
    /// Money spent
    Outcome,
}

/// A single dated income or outcome entry belonging to one child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    /// Always non-negative; the direction comes from `transaction_type`
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Create a transaction with a freshly generated id
    pub fn new(
        amount: f64,
        description: impl Into<String>,
        date: DateTime<Utc>,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description: description.into(),
            date,
            transaction_type,
        }
    }

    /// Amount with the sign of its direction applied
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Outcome => -self.amount,
        }
    }
}

/// A child profile with display attributes and its own transaction history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub theme_color: ThemeColor,
    #[serde(default)]
    pub avatar: Avatar,
    /// Custom avatar image, overrides the stock avatar when present
    #[serde(default, with = "avatar_data", skip_serializing_if = "Option::is_none")]
    pub avatar_data: Option<Vec<u8>>,
    /// Newest first
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Child {
    /// Create a child with a freshly generated id and no transactions.
    /// The name is stored as given; blank-name defaulting is a registry rule.
    pub fn new(
        name: impl Into<String>,
        theme_color: ThemeColor,
        avatar: Avatar,
        avatar_data: Option<Vec<u8>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            theme_color,
            avatar,
            avatar_data,
            transactions: Vec::new(),
        }
    }

    /// Income minus outcome over the whole history
    pub fn balance(&self) -> f64 {
        self.transactions
            .iter()
            .fold(0.0, |balance, t| balance + t.signed_amount())
    }

    pub fn transaction(&self, transaction_id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == transaction_id)
    }

    pub fn has_custom_avatar(&self) -> bool {
        self.avatar_data.is_some()
    }
}

/// Request for creating a new child
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
    pub theme_color: ThemeColor,
    pub avatar: Avatar,
    pub avatar_data: Option<Vec<u8>>,
}

/// Request for updating an existing child; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChildRequest {
    pub name: Option<String>,
    pub theme_color: Option<ThemeColor>,
    pub avatar: Option<Avatar>,
    /// `Some(None)` clears the custom avatar
    pub avatar_data: Option<Option<Vec<u8>>>,
}

impl UpdateChildRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.theme_color.is_none()
            && self.avatar.is_none()
            && self.avatar_data.is_none()
    }
}

/// Request for recording a new transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub transaction_type: TransactionType,
}

impl From<CreateTransactionRequest> for Transaction {
    fn from(request: CreateTransactionRequest) -> Self {
        Transaction::new(
            request.amount,
            request.description,
            request.date,
            request.transaction_type,
        )
    }
}

/// Base64 encoding of the custom avatar bytes
mod avatar_data {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        data: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|value| STANDARD.decode(value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
