//! Request DTOs for the extras API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::models::BindingPatch;

/// Query parameters for the catalog listing
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub role: Option<String>,
}

/// Request to attach a catalog extra to a provider
#[derive(Debug, Deserialize)]
pub struct AttachExtraRequest {
    pub extra_id: Uuid,
}

/// Request to configure an existing binding.
///
/// A field omitted from the JSON body is left unchanged; a field sent as
/// an explicit `null` clears the override so the template value applies
/// again. The outer/inner `Option` pair keeps those two cases apart.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigureBindingRequest {
    #[serde(default)]
    pub included: Option<bool>,
    #[serde(default)]
    pub is_obligatory: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub price_override: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deposit_amount: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    pub max_units: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

impl From<ConfigureBindingRequest> for BindingPatch {
    fn from(req: ConfigureBindingRequest) -> Self {
        BindingPatch {
            included: req.included,
            is_obligatory: req.is_obligatory,
            price_override: req.price_override,
            deposit_amount: req.deposit_amount,
            max_units: req.max_units,
            image_url: req.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_omitted_field_vs_explicit_null() {
        let req: ConfigureBindingRequest =
            serde_json::from_str(r#"{"price_override": null}"#).unwrap();
        assert_eq!(req.price_override, Some(None));
        assert_eq!(req.deposit_amount, None);
        assert_eq!(req.included, None);
    }

    #[test]
    fn test_set_value_deserializes() {
        let req: ConfigureBindingRequest =
            serde_json::from_str(r#"{"price_override": "40", "included": false}"#).unwrap();
        assert_eq!(req.price_override, Some(Some(dec!(40))));
        assert_eq!(req.included, Some(false));
    }

    #[test]
    fn test_empty_body_is_empty_patch() {
        let req: ConfigureBindingRequest = serde_json::from_str("{}").unwrap();
        let patch = BindingPatch::from(req);
        assert!(patch.is_empty());
    }
}
