//! HTTP routes for the collaborator commission dashboard.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::extras::round_money;
use crate::AppState;

use super::calculator::{self, DEFAULT_COMMISSION_RATE};
use super::queries;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/collaborators/:collaborator_id/commission-summary",
        get(summary),
    )
}

/// Commission summary for a collaborator's dashboard.
///
/// Amounts are full precision; `total_commission_display` is the 2-decimal
/// presentation value.
#[derive(Debug, Serialize)]
pub struct CommissionSummaryResponse {
    pub collaborator_id: Uuid,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub rate_is_default: bool,
    pub booking_count: usize,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_booked: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_commission: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_commission_display: Decimal,
}

async fn summary(
    State(state): State<AppState>,
    Path(collaborator_id): Path<Uuid>,
) -> Result<Json<CommissionSummaryResponse>> {
    let rate = if let Some(cached) = state.cache.commission_rates.get(&collaborator_id).await {
        tracing::debug!("Cache HIT for commission rate: {}", collaborator_id);
        *cached
    } else {
        let rate = queries::get_collaborator_rate(&state.db, collaborator_id).await?;
        state
            .cache
            .commission_rates
            .insert(collaborator_id, Arc::new(rate))
            .await;
        rate
    };

    let bookings = queries::list_bookings_for_collaborator(&state.db, collaborator_id).await?;

    let total_booked: Decimal = bookings.iter().map(|b| b.total_price).sum();
    let total_commission = calculator::total_commission(&bookings, rate);

    Ok(Json(CommissionSummaryResponse {
        collaborator_id,
        rate: rate.unwrap_or(DEFAULT_COMMISSION_RATE),
        rate_is_default: rate.is_none(),
        booking_count: bookings.len(),
        total_booked,
        total_commission,
        total_commission_display: round_money(total_commission, 2),
    }))
}
