//! HTTP routes for the extras API.
//!
//! Handlers are thin: extract, call a service function, convert to a
//! response DTO. Provider types are parsed once at this boundary.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::models::ProviderType;
use super::requests::{AttachExtraRequest, CatalogQuery, ConfigureBindingRequest};
use super::resolver;
use super::responses::{ExtraTemplateResponse, ProviderExtraResponse};
use super::services;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extras/catalog", get(catalog))
        .route(
            "/providers/:provider_type/:provider_id/extras",
            get(list).post(attach),
        )
        .route(
            "/providers/:provider_type/:provider_id/extras/available",
            get(available),
        )
        .route(
            "/providers/:provider_type/:provider_id/extras/:extra_id",
            axum::routing::patch(configure).delete(detach),
        )
}

/// Catalog listing, optionally filtered by provider role
async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<ExtraTemplateResponse>>> {
    let role = query
        .role
        .as_deref()
        .map(ProviderType::parse)
        .transpose()?;

    let extras = services::list_available_extras(&state.db, &state.cache, role).await?;
    Ok(Json(extras.into_iter().map(Into::into).collect()))
}

/// A provider's configured extras with their resolved effective values
async fn list(
    State(state): State<AppState>,
    Path((provider_type, provider_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<ProviderExtraResponse>>> {
    let provider_type = ProviderType::parse(&provider_type)?;

    let pairs = services::list_bindings(&state.db, provider_type, provider_id).await?;
    let body = pairs
        .into_iter()
        .map(|(template, binding)| {
            let effective = resolver::resolve(&template, Some(&binding));
            ProviderExtraResponse {
                template: template.into(),
                binding: binding.into(),
                effective: effective.into(),
            }
        })
        .collect();

    Ok(Json(body))
}

/// Catalog extras the provider has not attached yet
async fn available(
    State(state): State<AppState>,
    Path((provider_type, provider_id)): Path<(String, Uuid)>,
) -> Result<Json<Vec<ExtraTemplateResponse>>> {
    let provider_type = ProviderType::parse(&provider_type)?;

    let extras =
        services::available_to_attach(&state.db, &state.cache, provider_type, provider_id).await?;
    Ok(Json(extras.into_iter().map(Into::into).collect()))
}

/// Attach a catalog extra; 409 if the pair is already bound
async fn attach(
    State(state): State<AppState>,
    Path((provider_type, provider_id)): Path<(String, Uuid)>,
    Json(request): Json<AttachExtraRequest>,
) -> Result<(StatusCode, Json<ProviderExtraResponse>)> {
    let provider_type = ProviderType::parse(&provider_type)?;

    let (template, binding) =
        services::attach(&state.db, provider_type, provider_id, request.extra_id).await?;
    let effective = resolver::resolve(&template, Some(&binding));

    Ok((
        StatusCode::CREATED,
        Json(ProviderExtraResponse {
            template: template.into(),
            binding: binding.into(),
            effective: effective.into(),
        }),
    ))
}

/// Patch a binding's configuration
async fn configure(
    State(state): State<AppState>,
    Path((provider_type, provider_id, extra_id)): Path<(String, Uuid, Uuid)>,
    Json(request): Json<ConfigureBindingRequest>,
) -> Result<Json<ProviderExtraResponse>> {
    let provider_type = ProviderType::parse(&provider_type)?;
    let patch = request.into();

    let (template, binding) =
        services::configure(&state.db, provider_type, provider_id, extra_id, &patch).await?;
    let effective = resolver::resolve(&template, Some(&binding));

    Ok(Json(ProviderExtraResponse {
        template: template.into(),
        binding: binding.into(),
        effective: effective.into(),
    }))
}

/// Remove an extra from a provider; 204 whether or not it was bound
async fn detach(
    State(state): State<AppState>,
    Path((provider_type, provider_id, extra_id)): Path<(String, Uuid, Uuid)>,
) -> Result<StatusCode> {
    let provider_type = ProviderType::parse(&provider_type)?;

    services::detach(&state.db, provider_type, provider_id, extra_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
