//! Database queries for the commission dashboard.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;

use super::models::{Booking, CollaboratorProfile};

/// A collaborator's configured commission rate.
///
/// Returns `None` when the profile is missing or has no rate set; the
/// caller applies the default in either case.
pub async fn get_collaborator_rate(pool: &PgPool, collaborator_id: Uuid) -> Result<Option<Decimal>> {
    let profile = sqlx::query_as::<_, CollaboratorProfile>(
        r#"
        SELECT id, commission_rate
        FROM collaborator_profiles
        WHERE id = $1
        "#,
    )
    .bind(collaborator_id)
    .fetch_optional(pool)
    .await?;

    Ok(profile.and_then(|p| p.commission_rate))
}

/// All bookings credited to a collaborator, newest first
pub async fn list_bookings_for_collaborator(
    pool: &PgPool,
    collaborator_id: Uuid,
) -> Result<Vec<Booking>> {
    let bookings = sqlx::query_as::<_, Booking>(
        r#"
        SELECT id, total_price, collaborator_id, created_at
        FROM bookings
        WHERE collaborator_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(collaborator_id)
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}
