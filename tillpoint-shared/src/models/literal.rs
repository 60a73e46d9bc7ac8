use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Scalar text exactly as it was typed into a form or the authoring tool.
///
/// Prices, multipliers and inventory amounts are stored as text rather than
/// binary floats. The authoring tool is not consistent about quoting, so a
/// JSON number or `null` is accepted too and kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Literal(pub String);

impl Literal {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl<'de> Deserialize<'de> for Literal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            serde_json::Value::Bool(b) => Ok(Self(b.to_string())),
            serde_json::Value::Null => Ok(Self::default()),
            other => Err(serde::de::Error::custom(format!(
                "expected a scalar literal, found {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for Literal {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Literal {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
