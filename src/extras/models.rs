//! Database models for the extras catalog and provider bindings.
//!
//! These models use sqlx's FromRow derive for direct database deserialization.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

/// Which kind of listing offers an extra.
///
/// Each variant maps to its own binding table; the mapping lives here so
/// adding a fourth provider type touches exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    Boat,
    Patron,
    Service,
}

impl ProviderType {
    pub const ALL: [ProviderType; 3] = [
        ProviderType::Boat,
        ProviderType::Patron,
        ProviderType::Service,
    ];

    /// Binding table for this provider type
    pub fn table(self) -> &'static str {
        match self {
            ProviderType::Boat => "boat_extras",
            ProviderType::Patron => "patron_extras",
            ProviderType::Service => "service_extras",
        }
    }

    /// Foreign-key column referencing the provider row
    pub fn provider_column(self) -> &'static str {
        match self {
            ProviderType::Boat => "boat_id",
            ProviderType::Patron => "patron_id",
            ProviderType::Service => "service_id",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderType::Boat => "boat",
            ProviderType::Patron => "patron",
            ProviderType::Service => "service",
        }
    }

    /// Parse a provider type from its URL/wire form.
    ///
    /// There is no fallback for unknown values: the table mapping is a pure
    /// lookup, so anything else must be rejected before touching the store.
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "boat" => Ok(ProviderType::Boat),
            "patron" => Ok(ProviderType::Patron),
            "service" => Ok(ProviderType::Service),
            other => Err(AppError::InvalidProviderType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog extra template from the `extras` table.
///
/// Created and edited by marketplace administrators, read-only here.
/// `pricing_model` is one of "fixed", "per_day", "per_slot".
#[derive(Debug, Clone, FromRow)]
pub struct ExtraTemplate {
    pub id: Uuid,
    pub name: String,
    pub recommended_price: Decimal,
    pub pricing_model: String,
    pub is_obligatory: bool,
    pub deposit_amount: Option<Decimal>,
    pub max_units: Option<i32>,
    pub image_url: Option<String>,
    pub applicable_to_role: Option<String>,
}

impl ExtraTemplate {
    /// Whether a provider with the given role may offer this extra.
    /// A null role tag means any role.
    pub fn applies_to(&self, role: ProviderType) -> bool {
        match &self.applicable_to_role {
            Some(tag) => tag == role.as_str(),
            None => true,
        }
    }
}

/// Per-provider extra configuration from one of the binding tables.
///
/// At most one binding exists per (provider, extra) pair; the unique
/// constraint lives in each binding table. Null override fields fall back
/// to the template at resolution time.
#[derive(Debug, Clone, FromRow)]
pub struct ProviderExtraBinding {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub extra_id: Uuid,
    pub included: bool,
    pub is_obligatory: bool,
    pub price_override: Option<Decimal>,
    pub deposit_amount: Option<Decimal>,
    pub max_units: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProviderExtraBinding {
    /// Build the binding created when a provider attaches a catalog extra.
    ///
    /// Override fields are seeded by copying the template's current values.
    /// This is a one-time copy, not a live reference: later template edits
    /// do not follow, and the provider edits the copy.
    pub fn seeded_from(provider_id: Uuid, template: &ExtraTemplate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            provider_id,
            extra_id: template.id,
            included: false,
            is_obligatory: template.is_obligatory,
            price_override: Some(template.recommended_price),
            deposit_amount: template.deposit_amount,
            max_units: template.max_units,
            image_url: template.image_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a configuration patch in memory, then validate the result.
    ///
    /// Errors leave `self` in the patched state; callers discard it on
    /// failure rather than persisting.
    pub fn apply(&mut self, patch: &BindingPatch) -> Result<(), AppError> {
        if let Some(included) = patch.included {
            self.included = included;
        }
        if let Some(obligatory) = patch.is_obligatory {
            self.is_obligatory = obligatory;
        }
        if let Some(price) = &patch.price_override {
            self.price_override = *price;
        }
        if let Some(deposit) = &patch.deposit_amount {
            self.deposit_amount = *deposit;
        }
        if let Some(units) = &patch.max_units {
            self.max_units = *units;
        }
        if let Some(url) = &patch.image_url {
            self.image_url = url.clone();
        }
        self.updated_at = Utc::now();
        self.validate()
    }

    /// Range checks on the override fields.
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.included {
            if let Some(price) = self.price_override {
                if price < Decimal::ZERO {
                    return Err(AppError::Validation(
                        "price_override must not be negative".to_string(),
                    ));
                }
            }
        }
        if let Some(deposit) = self.deposit_amount {
            if deposit < Decimal::ZERO {
                return Err(AppError::Validation(
                    "deposit_amount must not be negative".to_string(),
                ));
            }
        }
        if let Some(units) = self.max_units {
            if units <= 0 {
                return Err(AppError::Validation(
                    "max_units must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Partial update to a binding's configuration.
///
/// Outer `None` leaves the field unchanged; for the nullable override
/// fields, `Some(None)` clears the override so the template value applies
/// again.
#[derive(Debug, Clone, Default)]
pub struct BindingPatch {
    pub included: Option<bool>,
    pub is_obligatory: Option<bool>,
    pub price_override: Option<Option<Decimal>>,
    pub deposit_amount: Option<Option<Decimal>>,
    pub max_units: Option<Option<i32>>,
    pub image_url: Option<Option<String>>,
}

impl BindingPatch {
    pub fn is_empty(&self) -> bool {
        self.included.is_none()
            && self.is_obligatory.is_none()
            && self.price_override.is_none()
            && self.deposit_amount.is_none()
            && self.max_units.is_none()
            && self.image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn template(price: Decimal) -> ExtraTemplate {
        ExtraTemplate {
            id: Uuid::new_v4(),
            name: "Paddleboard".to_string(),
            recommended_price: price,
            pricing_model: "per_day".to_string(),
            is_obligatory: false,
            deposit_amount: Some(dec!(20)),
            max_units: Some(4),
            image_url: None,
            applicable_to_role: None,
        }
    }

    #[test]
    fn test_provider_type_parse_round_trip() {
        for pt in ProviderType::ALL {
            assert_eq!(ProviderType::parse(pt.as_str()).unwrap(), pt);
        }
    }

    #[test]
    fn test_provider_type_parse_rejects_unknown() {
        let err = ProviderType::parse("captain").unwrap_err();
        assert!(matches!(err, AppError::InvalidProviderType(_)));
    }

    #[test]
    fn test_table_mapping_is_distinct_per_type() {
        let tables: Vec<_> = ProviderType::ALL.iter().map(|p| p.table()).collect();
        assert_eq!(tables, vec!["boat_extras", "patron_extras", "service_extras"]);
        let columns: Vec<_> = ProviderType::ALL
            .iter()
            .map(|p| p.provider_column())
            .collect();
        assert_eq!(columns, vec!["boat_id", "patron_id", "service_id"]);
    }

    #[test]
    fn test_applies_to_null_role_matches_any() {
        let t = template(dec!(50));
        assert!(t.applies_to(ProviderType::Boat));
        assert!(t.applies_to(ProviderType::Service));
    }

    #[test]
    fn test_applies_to_tagged_role() {
        let mut t = template(dec!(50));
        t.applicable_to_role = Some("patron".to_string());
        assert!(t.applies_to(ProviderType::Patron));
        assert!(!t.applies_to(ProviderType::Boat));
    }

    #[test]
    fn test_seeded_binding_copies_template_defaults() {
        let t = template(dec!(50));
        let provider = Uuid::new_v4();
        let b = ProviderExtraBinding::seeded_from(provider, &t);

        assert_eq!(b.provider_id, provider);
        assert_eq!(b.extra_id, t.id);
        assert!(!b.included);
        assert_eq!(b.is_obligatory, t.is_obligatory);
        assert_eq!(b.price_override, Some(dec!(50)));
        assert_eq!(b.deposit_amount, Some(dec!(20)));
        assert_eq!(b.max_units, Some(4));
        assert_eq!(b.image_url, None);
    }

    #[test]
    fn test_patch_leaves_omitted_fields_unchanged() {
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let patch = BindingPatch {
            price_override: Some(Some(dec!(40))),
            ..Default::default()
        };
        b.apply(&patch).unwrap();

        assert_eq!(b.price_override, Some(dec!(40)));
        assert_eq!(b.deposit_amount, Some(dec!(20)));
        assert_eq!(b.max_units, Some(4));
        assert!(!b.included);
    }

    #[test]
    fn test_patch_explicit_null_clears_override() {
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let patch = BindingPatch {
            price_override: Some(None),
            max_units: Some(None),
            ..Default::default()
        };
        b.apply(&patch).unwrap();

        assert_eq!(b.price_override, None);
        assert_eq!(b.max_units, None);
    }

    #[test]
    fn test_patch_rejects_negative_price() {
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let patch = BindingPatch {
            price_override: Some(Some(dec!(-1))),
            ..Default::default()
        };
        let err = b.apply(&patch).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_patch_rejects_non_positive_max_units() {
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let patch = BindingPatch {
            max_units: Some(Some(0)),
            ..Default::default()
        };
        assert!(b.apply(&patch).is_err());
    }

    #[test]
    fn test_patch_rejects_negative_deposit() {
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let patch = BindingPatch {
            deposit_amount: Some(Some(dec!(-5))),
            ..Default::default()
        };
        assert!(b.apply(&patch).is_err());
    }

    #[test]
    fn test_empty_patch_detection() {
        assert!(BindingPatch::default().is_empty());
        let patch = BindingPatch {
            included: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
