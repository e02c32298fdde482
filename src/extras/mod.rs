//! Provider extras: catalog access, per-provider bindings, and effective
//! price resolution.
//!
//! An "extra" is a purchasable add-on (equipment, a service) offered
//! alongside a boat, patron, or service listing. Providers attach catalog
//! extras and configure per-provider overrides; the resolver computes the
//! effective chargeable view from template plus binding.

pub mod models;
pub mod queries;
pub mod requests;
pub mod resolver;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use models::{BindingPatch, ExtraTemplate, ProviderExtraBinding, ProviderType};
pub use resolver::{resolve, round_money, EffectiveExtra};
pub use routes::router;
