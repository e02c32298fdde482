//! Response DTOs for the extras API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::{ExtraTemplate, ProviderExtraBinding};
use super::resolver::EffectiveExtra;

/// Catalog template as seen by the configuration UI
#[derive(Debug, Clone, Serialize)]
pub struct ExtraTemplateResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub recommended_price: Decimal,
    pub pricing_model: String,
    pub is_obligatory: bool,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub deposit_amount: Option<Decimal>,
    pub max_units: Option<i32>,
    pub image_url: Option<String>,
    pub applicable_to_role: Option<String>,
}

impl From<ExtraTemplate> for ExtraTemplateResponse {
    fn from(t: ExtraTemplate) -> Self {
        Self {
            id: t.id,
            name: t.name,
            recommended_price: t.recommended_price,
            pricing_model: t.pricing_model,
            is_obligatory: t.is_obligatory,
            deposit_amount: t.deposit_amount,
            max_units: t.max_units,
            image_url: t.image_url,
            applicable_to_role: t.applicable_to_role,
        }
    }
}

/// A provider's stored binding, overrides as persisted
#[derive(Debug, Clone, Serialize)]
pub struct BindingResponse {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub extra_id: Uuid,
    pub included: bool,
    pub is_obligatory: bool,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub price_override: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub deposit_amount: Option<Decimal>,
    pub max_units: Option<i32>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProviderExtraBinding> for BindingResponse {
    fn from(b: ProviderExtraBinding) -> Self {
        Self {
            id: b.id,
            provider_id: b.provider_id,
            extra_id: b.extra_id,
            included: b.included,
            is_obligatory: b.is_obligatory,
            price_override: b.price_override,
            deposit_amount: b.deposit_amount,
            max_units: b.max_units,
            image_url: b.image_url,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Resolved effective values, ready to display and to charge
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveExtraResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub included: bool,
    pub obligatory: bool,
    pub max_units: Option<i32>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub deposit_amount: Option<Decimal>,
    pub image_url: Option<String>,
    pub pricing_model: String,
}

impl From<EffectiveExtra> for EffectiveExtraResponse {
    fn from(e: EffectiveExtra) -> Self {
        Self {
            price: e.price,
            included: e.included,
            obligatory: e.obligatory,
            max_units: e.max_units,
            deposit_amount: e.deposit_amount,
            image_url: e.image_url,
            pricing_model: e.pricing_model,
        }
    }
}

/// One configured extra: template, stored binding, and the resolved view
#[derive(Debug, Serialize)]
pub struct ProviderExtraResponse {
    pub template: ExtraTemplateResponse,
    pub binding: BindingResponse,
    pub effective: EffectiveExtraResponse,
}
