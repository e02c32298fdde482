//! Effective-price resolution for provider extras.
//!
//! Pure functions only - no database access. The resolver is the single
//! place that decides what an extra costs for a given provider.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::{ExtraTemplate, ProviderExtraBinding};

/// The effective, chargeable view of an extra for one provider.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveExtra {
    pub price: Decimal,
    pub included: bool,
    pub obligatory: bool,
    pub max_units: Option<i32>,
    pub deposit_amount: Option<Decimal>,
    pub image_url: Option<String>,
    /// Carried from the template, never overridden by a binding. Feeds the
    /// downstream invoice line-item computation.
    pub pricing_model: String,
}

/// Resolve the effective values for an extra given its catalog template and
/// the provider's optional binding.
///
/// Each field falls back independently: a null binding field takes the
/// template's value, a non-null one wins. Zero is a real value, never a
/// trigger for fallback. When the binding marks the extra as included in the
/// base price, the price is forced to zero regardless of any stored
/// override - "included" and "priced" are mutually exclusive, and this is
/// enforced here rather than trusting the stored override to be null.
pub fn resolve(template: &ExtraTemplate, binding: Option<&ProviderExtraBinding>) -> EffectiveExtra {
    let Some(binding) = binding else {
        return EffectiveExtra {
            price: template.recommended_price,
            included: false,
            obligatory: template.is_obligatory,
            max_units: template.max_units,
            deposit_amount: template.deposit_amount,
            image_url: template.image_url.clone(),
            pricing_model: template.pricing_model.clone(),
        };
    };

    let price = if binding.included {
        Decimal::ZERO
    } else {
        binding.price_override.unwrap_or(template.recommended_price)
    };

    EffectiveExtra {
        price,
        included: binding.included,
        obligatory: binding.is_obligatory,
        max_units: binding.max_units.or(template.max_units),
        deposit_amount: binding.deposit_amount.or(template.deposit_amount),
        image_url: binding
            .image_url
            .clone()
            .or_else(|| template.image_url.clone()),
        pricing_model: template.pricing_model.clone(),
    }
}

/// Round to specified decimal places using banker's rounding
/// (ROUND_HALF_EVEN). Used only for display-time formatting; amounts are
/// stored and compared at full precision.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extras::models::BindingPatch;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn template(price: Decimal) -> ExtraTemplate {
        ExtraTemplate {
            id: Uuid::new_v4(),
            name: "Snorkel set".to_string(),
            recommended_price: price,
            pricing_model: "fixed".to_string(),
            is_obligatory: false,
            deposit_amount: Some(dec!(20)),
            max_units: Some(6),
            image_url: Some("https://cdn.example.com/snorkel.jpg".to_string()),
            applicable_to_role: None,
        }
    }

    fn binding(template: &ExtraTemplate) -> ProviderExtraBinding {
        ProviderExtraBinding::seeded_from(Uuid::new_v4(), template)
    }

    // ==================== no-binding fallback ====================

    #[test]
    fn test_resolve_without_binding_uses_template() {
        let t = template(dec!(50));
        let eff = resolve(&t, None);

        assert_eq!(eff.price, dec!(50));
        assert!(!eff.included);
        assert!(!eff.obligatory);
        assert_eq!(eff.max_units, Some(6));
        assert_eq!(eff.deposit_amount, Some(dec!(20)));
        assert_eq!(eff.pricing_model, "fixed");
    }

    #[test]
    fn test_resolve_free_template_price_is_not_absent() {
        // A recommended price of 0 is a real price, not a fallback trigger
        let t = template(dec!(0));
        assert_eq!(resolve(&t, None).price, dec!(0));

        let mut b = binding(&t);
        b.price_override = Some(dec!(0));
        assert_eq!(resolve(&t, Some(&b)).price, dec!(0));
    }

    // ==================== included suppresses price ====================

    #[test]
    fn test_resolve_included_forces_zero_price() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.included = true;
        b.price_override = Some(dec!(999));

        let eff = resolve(&t, Some(&b));
        assert!(eff.included);
        assert_eq!(eff.price, dec!(0));
    }

    #[test]
    fn test_resolve_not_included_null_override_falls_back() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.price_override = None;

        let eff = resolve(&t, Some(&b));
        assert!(!eff.included);
        assert_eq!(eff.price, dec!(50));
    }

    #[test]
    fn test_resolve_not_included_override_wins() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.price_override = Some(dec!(40));

        assert_eq!(resolve(&t, Some(&b)).price, dec!(40));
    }

    // ==================== field-level independence ====================

    #[test]
    fn test_resolve_price_overridden_in_isolation() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.price_override = Some(dec!(35));
        b.deposit_amount = None;
        b.max_units = None;
        b.image_url = None;

        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.price, dec!(35));
        assert_eq!(eff.deposit_amount, Some(dec!(20)));
        assert_eq!(eff.max_units, Some(6));
        assert_eq!(eff.image_url, t.image_url);
    }

    #[test]
    fn test_resolve_max_units_overridden_in_isolation() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.price_override = None;
        b.deposit_amount = None;
        b.max_units = Some(2);

        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.max_units, Some(2));
        assert_eq!(eff.price, dec!(50));
        assert_eq!(eff.deposit_amount, Some(dec!(20)));
    }

    #[test]
    fn test_resolve_deposit_overridden_in_isolation() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.price_override = None;
        b.deposit_amount = Some(dec!(75));
        b.max_units = None;

        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.deposit_amount, Some(dec!(75)));
        assert_eq!(eff.price, dec!(50));
        assert_eq!(eff.max_units, Some(6));
    }

    #[test]
    fn test_resolve_obligatory_taken_from_binding() {
        let t = template(dec!(50));
        let mut b = binding(&t);
        b.is_obligatory = true;

        assert!(resolve(&t, Some(&b)).obligatory);
    }

    #[test]
    fn test_resolve_pricing_model_never_overridden() {
        let t = template(dec!(50));
        let b = binding(&t);
        assert_eq!(resolve(&t, Some(&b)).pricing_model, "fixed");
    }

    // ==================== attach/configure/resolve scenario ====================

    #[test]
    fn test_attach_then_configure_scenario() {
        // Attach an extra with recommended_price=50, deposit=20 to a boat
        let t = template(dec!(50));
        let mut b = ProviderExtraBinding::seeded_from(Uuid::new_v4(), &t);

        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.price, dec!(50));
        assert!(!eff.included);
        assert_eq!(eff.deposit_amount, Some(dec!(20)));

        // Override the price; deposit untouched
        b.apply(&BindingPatch {
            price_override: Some(Some(dec!(40))),
            ..Default::default()
        })
        .unwrap();
        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.price, dec!(40));
        assert_eq!(eff.deposit_amount, Some(dec!(20)));

        // Bundle it into the base price
        b.apply(&BindingPatch {
            included: Some(true),
            ..Default::default()
        })
        .unwrap();
        let eff = resolve(&t, Some(&b));
        assert_eq!(eff.price, dec!(0));
        assert!(eff.included);
    }

    // ==================== round_money ====================

    #[test]
    fn test_round_money_bankers_rounding() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
        assert_eq!(round_money(dec!(1.245), 2), dec!(1.24));
    }
}
