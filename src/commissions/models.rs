//! Database models for bookings and collaborator profiles.
//!
//! Both tables are owned by the booking subsystem and are read-only here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Booking from the `bookings` table
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub total_price: Decimal,
    pub collaborator_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Collaborator profile from `collaborator_profiles`.
///
/// `commission_rate` is a decimal in [0, 1]; null means the default rate
/// applies.
#[derive(Debug, Clone, FromRow)]
pub struct CollaboratorProfile {
    pub id: Uuid,
    pub commission_rate: Option<Decimal>,
}
