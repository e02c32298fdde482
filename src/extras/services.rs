//! Binding manager: attach, configure, detach, and list extras for a
//! provider. Database access plus the catalog cache; all price math lives
//! in the resolver.

use std::collections::HashSet;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::{AppError, Result};

use super::models::{BindingPatch, ExtraTemplate, ProviderExtraBinding, ProviderType};
use super::queries;

/// Catalog entries a provider with the given role may offer.
///
/// The catalog is small and admin-edited, so it is served from the cache
/// when warm.
pub async fn list_available_extras(
    pool: &PgPool,
    cache: &AppCache,
    role: Option<ProviderType>,
) -> Result<Vec<ExtraTemplate>> {
    let key = AppCache::catalog_key(role.map(ProviderType::as_str));

    if let Some(cached) = cache.catalog.get(&key).await {
        tracing::debug!("Cache HIT for catalog: {}", key);
        return Ok((*cached).clone());
    }

    tracing::debug!("Cache MISS for catalog: {}", key);
    let extras = queries::list_catalog(pool, role).await?;
    cache.catalog.insert(key, Arc::new(extras.clone())).await;

    Ok(extras)
}

/// A provider's configured extras joined with their catalog templates.
pub async fn list_bindings(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
) -> Result<Vec<(ExtraTemplate, ProviderExtraBinding)>> {
    queries::list_bindings_with_templates(pool, provider_type, provider_id).await
}

/// Attach a catalog extra to a provider.
///
/// The new binding's override fields are seeded by copying the template's
/// current values; the provider then edits the copy. A binding that already
/// exists for the pair surfaces as a conflict from the table's unique
/// constraint, so two racing attach calls cannot both insert.
pub async fn attach(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
    extra_id: Uuid,
) -> Result<(ExtraTemplate, ProviderExtraBinding)> {
    let template = queries::get_template(pool, extra_id).await?;

    if !template.applies_to(provider_type) {
        return Err(AppError::Validation(format!(
            "extra '{}' is not offered to {} providers",
            template.name, provider_type
        )));
    }

    let seeded = ProviderExtraBinding::seeded_from(provider_id, &template);
    let created = queries::insert_binding(pool, provider_type, &seeded).await?;

    tracing::info!(
        "Attached extra {} to {} {}",
        extra_id,
        provider_type,
        provider_id
    );
    Ok((template, created))
}

/// Apply a configuration patch to an existing binding.
///
/// The row is loaded, patched in memory, validated, and written back as a
/// single UPDATE; a validation failure leaves the stored row untouched.
/// The catalog template is never altered.
pub async fn configure(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
    extra_id: Uuid,
    patch: &BindingPatch,
) -> Result<(ExtraTemplate, ProviderExtraBinding)> {
    let template = queries::get_template(pool, extra_id).await?;

    let mut binding = queries::get_binding(pool, provider_type, provider_id, extra_id)
        .await?
        .ok_or(AppError::NotFound)?;

    binding.apply(patch)?;
    let updated = queries::update_binding(pool, provider_type, &binding).await?;

    Ok((template, updated))
}

/// Remove an extra from a provider.
///
/// Idempotent by design: detaching a binding that does not exist is a
/// success, not an error.
pub async fn detach(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
    extra_id: Uuid,
) -> Result<()> {
    let removed = queries::delete_binding(pool, provider_type, provider_id, extra_id).await?;
    if removed == 0 {
        tracing::debug!(
            "Detach of extra {} from {} {} matched no binding",
            extra_id,
            provider_type,
            provider_id
        );
    }
    Ok(())
}

/// Catalog extras the provider has not attached yet; drives the
/// "add extra" picker.
pub async fn available_to_attach(
    pool: &PgPool,
    cache: &AppCache,
    provider_type: ProviderType,
    provider_id: Uuid,
) -> Result<Vec<ExtraTemplate>> {
    let catalog = list_available_extras(pool, cache, Some(provider_type)).await?;
    let bound: HashSet<Uuid> = queries::list_bindings_with_templates(pool, provider_type, provider_id)
        .await?
        .into_iter()
        .map(|(template, _)| template.id)
        .collect();

    Ok(catalog
        .into_iter()
        .filter(|extra| !bound.contains(&extra.id))
        .collect())
}
