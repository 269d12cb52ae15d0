use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};

/// A single quote. `text` is the identity key: two entries with the same text are the same quote.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub text: String,
    pub category: String,
}

impl Entry {
    /// Builds an entry from user input, trimming both fields.
    pub fn parse(text: &str, category: &str) -> QuoteResult<Self> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() {
            return Err(QuoteError::Validation("quote text is empty".to_string()));
        }
        if category.is_empty() {
            return Err(QuoteError::Validation("category is empty".to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }

    /// Schema check for one element of an import payload.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, RejectReason> {
        let obj = value.as_object().ok_or(RejectReason::NotAnObject)?;
        let text = string_field(obj, "text")?;
        let category = string_field(obj, "category")?;
        Ok(Self {
            text: text.to_string(),
            category: category.to_string(),
        })
    }
}

fn string_field<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    field: &'static str,
) -> Result<&'a str, RejectReason> {
    let value = obj.get(field).ok_or(RejectReason::Missing(field))?;
    let s = value.as_str().ok_or(RejectReason::NotAString(field))?;
    let s = s.trim();
    if s.is_empty() {
        return Err(RejectReason::Empty(field));
    }
    Ok(s)
}

/// Why an import element was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    Missing(&'static str),
    NotAString(&'static str),
    Empty(&'static str),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotAnObject => write!(f, "not an object"),
            RejectReason::Missing(field) => write!(f, "missing `{}`", field),
            RejectReason::NotAString(field) => write!(f, "`{}` is not a string", field),
            RejectReason::Empty(field) => write!(f, "`{}` is empty", field),
        }
    }
}

/// Same text on both sides of a merge with different categories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub text: String,
    pub local_category: String,
    pub server_category: String,
}

/// Seed list used when nothing has been persisted yet.
pub fn default_entries() -> Vec<Entry> {
    [
        (
            "The only way to do great work is to love what you do.",
            "Inspiration",
        ),
        (
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
        (
            "In the middle of difficulty lies opportunity.",
            "Inspiration",
        ),
        (
            "The future belongs to those who believe in the beauty of their dreams.",
            "Dreams",
        ),
        ("Simplicity is the ultimate sophistication.", "Wisdom"),
        ("You miss 100% of the shots you don't take.", "Motivation"),
    ]
    .into_iter()
    .map(|(text, category)| Entry {
        text: text.to_string(),
        category: category.to_string(),
    })
    .collect()
}

#[cfg(test)]
#[path = "../tests/model/entry_tests.rs"]
mod tests;
