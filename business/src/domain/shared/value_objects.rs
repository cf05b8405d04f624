use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque product identifier, kept exactly as the upstream listing sent it.
///
/// A JSON string and a JSON number are different identifiers even when their
/// text matches (`"17"` vs `17`). Only the empty string is not an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductId {
    Text(String),
    /// Decimal text of a JSON number.
    Number(String),
}

impl ProductId {
    /// Wraps a textual identifier, returning `None` for the empty string.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        Some(ProductId::Text(raw.to_string()))
    }

    /// Reads an identifier out of an arbitrary JSON value (string or number).
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Self::parse(s),
            serde_json::Value::Number(n) => Some(ProductId::Number(n.to_string())),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProductId::Text(raw) | ProductId::Number(raw) => raw,
        }
    }

    /// The identifier in its original JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ProductId::Text(raw) => serde_json::Value::String(raw.clone()),
            ProductId::Number(raw) => raw
                .parse::<serde_json::Number>()
                .map(serde_json::Value::Number)
                .unwrap_or_else(|_| serde_json::Value::String(raw.clone())),
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ProductId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("product id must be a non-empty string or a number"))
    }
}
