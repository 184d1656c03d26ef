// src/models/customer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::coerce;

// =============================================================================
//  ENTITY
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,

    #[schema(example = "Ayşe")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "111")]
    pub phone: String,
    #[schema(example = "@ayse")]
    pub instagram: String,
    #[schema(example = "retail")]
    pub sector: String,

    pub is_new_user: bool,
    pub is_contracted: bool,
    pub mail_opened: bool,
    pub replied: bool,
    pub priority: bool,

    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
//  PAYLOADS
// =============================================================================

// Missing or null strings deserialize to "" so they are reported by
// `validate()` as a 400 instead of being rejected by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[serde(default, deserialize_with = "coerce::string")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ayşe")]
    pub name: String,

    #[serde(default, deserialize_with = "coerce::string")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "a@x.com")]
    pub email: String,

    #[serde(default, deserialize_with = "coerce::string")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "111")]
    pub phone: String,

    #[serde(default, deserialize_with = "coerce::string")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "@ayse")]
    pub instagram: String,

    #[serde(default, deserialize_with = "coerce::string")]
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "retail")]
    pub sector: String,

    #[serde(default, deserialize_with = "coerce::optional_string")]
    pub note: Option<String>,
}

/// Full replacement body for PUT. Every omitted field is overwritten with its
/// empty value; nothing is merged with the stored record.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerUpdate {
    #[serde(deserialize_with = "coerce::string")]
    pub name: String,
    #[serde(deserialize_with = "coerce::string")]
    pub email: String,
    #[serde(deserialize_with = "coerce::string")]
    pub phone: String,
    #[serde(deserialize_with = "coerce::string")]
    pub instagram: String,
    #[serde(deserialize_with = "coerce::string")]
    pub sector: String,
    #[serde(deserialize_with = "coerce::optional_string")]
    pub note: Option<String>,
    #[serde(deserialize_with = "coerce::boolean")]
    pub is_contracted: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    pub mail_opened: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    pub replied: bool,
    #[serde(deserialize_with = "coerce::boolean")]
    pub priority: bool,
}

// =============================================================================
//  QUERY STRINGS
// =============================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContractFilter {
    /// "true" selects contracted customers; any other value selects the rest.
    pub is_contracted: Option<String>,
}

impl ContractFilter {
    /// `None` when the parameter is absent.
    pub fn flag(&self) -> Option<bool> {
        self.is_contracted.as_deref().map(|raw| raw == "true")
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring matched against name, email, phone and instagram.
    pub query: Option<String>,
}

// =============================================================================
//  RESPONSES
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TotalResponse {
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contract_filter_only_accepts_literal_true() {
        let filter = |raw: Option<&str>| ContractFilter {
            is_contracted: raw.map(str::to_string),
        };

        assert_eq!(filter(None).flag(), None);
        assert_eq!(filter(Some("true")).flag(), Some(true));
        assert_eq!(filter(Some("false")).flag(), Some(false));
        assert_eq!(filter(Some("TRUE")).flag(), Some(false));
        assert_eq!(filter(Some("1")).flag(), Some(false));
    }

    #[test]
    fn new_customer_reports_every_missing_field() {
        let payload: NewCustomer = serde_json::from_value(json!({ "name": "Ayşe" })).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(!fields.contains_key("name"));
        for field in ["email", "phone", "instagram", "sector"] {
            assert!(fields.contains_key(field), "{field} should be required");
        }
    }

    #[test]
    fn new_customer_note_is_optional() {
        let payload: NewCustomer = serde_json::from_value(json!({
            "name": "Ayşe",
            "email": "a@x.com",
            "phone": "111",
            "instagram": "@ayse",
            "sector": "retail",
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.note, None);
    }

    #[test]
    fn update_defaults_omitted_fields_to_empty() {
        let payload: CustomerUpdate = serde_json::from_value(json!({
            "name": "Ayşe",
            "isContracted": true,
        }))
        .unwrap();

        assert_eq!(payload.name, "Ayşe");
        assert!(payload.is_contracted);
        assert_eq!(payload.email, "");
        assert_eq!(payload.note, None);
        assert!(!payload.priority);
    }

    #[test]
    fn update_coerces_loosely_typed_values() {
        let payload: CustomerUpdate = serde_json::from_value(json!({
            "name": "Ayşe",
            "phone": 5551234,
            "isContracted": "true",
            "replied": 1,
            "note": null,
        }))
        .unwrap();

        assert_eq!(payload.phone, "5551234");
        assert!(payload.is_contracted);
        assert!(payload.replied);
        assert_eq!(payload.note, None);
    }

    #[test]
    fn new_customer_accepts_numeric_fields() {
        let payload: NewCustomer = serde_json::from_value(json!({
            "name": 123,
            "email": "a@x.com",
            "phone": 111,
            "instagram": "@ayse",
            "sector": "retail",
        }))
        .unwrap();

        assert_eq!(payload.name, "123");
        assert_eq!(payload.phone, "111");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn customer_serializes_camel_case() {
        let customer = Customer {
            id: Uuid::nil(),
            name: "Ayşe".into(),
            email: "a@x.com".into(),
            phone: "111".into(),
            instagram: "@ayse".into(),
            sector: "retail".into(),
            is_new_user: false,
            is_contracted: true,
            mail_opened: false,
            replied: false,
            priority: false,
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&customer).unwrap();
        assert_eq!(value["isContracted"], json!(true));
        assert_eq!(value["isNewUser"], json!(false));
        assert!(value.get("is_contracted").is_none());
    }
}
