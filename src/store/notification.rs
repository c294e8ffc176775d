//! Change-notification payloads from the dynamic configuration store.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One change notification as delivered by the configuration store.
///
/// Every logical change arrives as two notifications carrying the same
/// property name: one with `is_before_update` set while the old value is
/// still active, then one with the new value in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    pub property_name: String,
    pub property_value: String,
    pub is_before_update: bool,
}

/// A payload that does not match the expected notification shape.
#[derive(Debug, Error)]
#[error("malformed change notification: {0}")]
pub struct NotificationError(#[from] serde_json::Error);

impl ChangeNotification {
    /// Parse a raw store payload. This is the single gate for malformed
    /// notifications: missing or null values, wrong field types, and
    /// non-object payloads all fail here.
    pub fn from_raw(raw: &Value) -> Result<Self, NotificationError> {
        Ok(serde_json::from_value(raw.clone())?)
    }

    /// A before-phase notification carrying the still-active value.
    pub fn before(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: name.into(),
            property_value: value.into(),
            is_before_update: true,
        }
    }

    /// An after-phase notification carrying the new value.
    pub fn after(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property_name: name.into(),
            property_value: value.into(),
            is_before_update: false,
        }
    }

    /// Raw payload form, as pushed on the subscription channel.
    pub fn into_raw(self) -> Value {
        serde_json::json!({
            "propertyName": self.property_name,
            "propertyValue": self.property_value,
            "isBeforeUpdate": self.is_before_update,
        })
    }
}
