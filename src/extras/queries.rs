//! Database queries for the extras catalog and binding tables.
//!
//! The binding table and provider column are picked through the closed
//! `ProviderType` lookup, never from caller input, so interpolating them
//! into the SQL text is safe. All values go through bind parameters.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, Result};

use super::models::{ExtraTemplate, ProviderExtraBinding, ProviderType};

const TEMPLATE_COLUMNS: &str = r#"
    id, name, recommended_price, pricing_model, is_obligatory,
    deposit_amount, max_units, image_url, applicable_to_role
"#;

/// Catalog entries a provider with the given role may offer.
pub async fn list_catalog(pool: &PgPool, role: Option<ProviderType>) -> Result<Vec<ExtraTemplate>> {
    let extras = match role {
        Some(role) => {
            sqlx::query_as::<_, ExtraTemplate>(&format!(
                r#"
                SELECT {TEMPLATE_COLUMNS}
                FROM extras
                WHERE applicable_to_role IS NULL OR applicable_to_role = $1
                ORDER BY name
                "#
            ))
            .bind(role.as_str())
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ExtraTemplate>(&format!(
                r#"
                SELECT {TEMPLATE_COLUMNS}
                FROM extras
                ORDER BY name
                "#
            ))
            .fetch_all(pool)
            .await?
        }
    };

    Ok(extras)
}

/// Get a single catalog template by id
pub async fn get_template(pool: &PgPool, extra_id: Uuid) -> Result<ExtraTemplate> {
    sqlx::query_as::<_, ExtraTemplate>(&format!(
        r#"
        SELECT {TEMPLATE_COLUMNS}
        FROM extras
        WHERE id = $1
        "#
    ))
    .bind(extra_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Flat row for the binding-plus-template join; template columns are
/// aliased to avoid clashing with the binding's override columns.
#[derive(Debug, FromRow)]
struct BindingJoinRow {
    template_id: Uuid,
    name: String,
    recommended_price: rust_decimal::Decimal,
    pricing_model: String,
    template_obligatory: bool,
    template_deposit: Option<rust_decimal::Decimal>,
    template_max_units: Option<i32>,
    template_image_url: Option<String>,
    applicable_to_role: Option<String>,
    binding_id: Uuid,
    provider_id: Uuid,
    extra_id: Uuid,
    included: bool,
    is_obligatory: bool,
    price_override: Option<rust_decimal::Decimal>,
    deposit_amount: Option<rust_decimal::Decimal>,
    max_units: Option<i32>,
    image_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl BindingJoinRow {
    fn split(self) -> (ExtraTemplate, ProviderExtraBinding) {
        (
            ExtraTemplate {
                id: self.template_id,
                name: self.name,
                recommended_price: self.recommended_price,
                pricing_model: self.pricing_model,
                is_obligatory: self.template_obligatory,
                deposit_amount: self.template_deposit,
                max_units: self.template_max_units,
                image_url: self.template_image_url,
                applicable_to_role: self.applicable_to_role,
            },
            ProviderExtraBinding {
                id: self.binding_id,
                provider_id: self.provider_id,
                extra_id: self.extra_id,
                included: self.included,
                is_obligatory: self.is_obligatory,
                price_override: self.price_override,
                deposit_amount: self.deposit_amount,
                max_units: self.max_units,
                image_url: self.image_url,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        )
    }
}

/// All of a provider's bindings joined with their catalog templates,
/// ordered by extra name.
pub async fn list_bindings_with_templates(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
) -> Result<Vec<(ExtraTemplate, ProviderExtraBinding)>> {
    let table = provider_type.table();
    let column = provider_type.provider_column();

    let rows = sqlx::query_as::<_, BindingJoinRow>(&format!(
        r#"
        SELECT
            e.id AS template_id,
            e.name,
            e.recommended_price,
            e.pricing_model,
            e.is_obligatory AS template_obligatory,
            e.deposit_amount AS template_deposit,
            e.max_units AS template_max_units,
            e.image_url AS template_image_url,
            e.applicable_to_role,
            b.id AS binding_id,
            b.{column} AS provider_id,
            b.extra_id,
            b.included,
            b.is_obligatory,
            b.price_override,
            b.deposit_amount,
            b.max_units,
            b.image_url,
            b.created_at,
            b.updated_at
        FROM {table} b
        JOIN extras e ON e.id = b.extra_id
        WHERE b.{column} = $1
        ORDER BY e.name
        "#
    ))
    .bind(provider_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(BindingJoinRow::split).collect())
}

fn binding_columns(provider_type: ProviderType) -> String {
    format!(
        r#"
        id, {column} AS provider_id, extra_id, included, is_obligatory,
        price_override, deposit_amount, max_units, image_url,
        created_at, updated_at
        "#,
        column = provider_type.provider_column()
    )
}

/// Look up one binding by its (provider, extra) pair
pub async fn get_binding(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
    extra_id: Uuid,
) -> Result<Option<ProviderExtraBinding>> {
    let binding = sqlx::query_as::<_, ProviderExtraBinding>(&format!(
        r#"
        SELECT {columns}
        FROM {table}
        WHERE {column} = $1 AND extra_id = $2
        "#,
        columns = binding_columns(provider_type),
        table = provider_type.table(),
        column = provider_type.provider_column(),
    ))
    .bind(provider_id)
    .bind(extra_id)
    .fetch_optional(pool)
    .await?;

    Ok(binding)
}

/// Insert a newly seeded binding.
///
/// The (provider, extra) uniqueness invariant is the table's unique
/// constraint; a concurrent attach losing the race surfaces here as a
/// unique violation, reported as a conflict.
pub async fn insert_binding(
    pool: &PgPool,
    provider_type: ProviderType,
    binding: &ProviderExtraBinding,
) -> Result<ProviderExtraBinding> {
    let created = sqlx::query_as::<_, ProviderExtraBinding>(&format!(
        r#"
        INSERT INTO {table} (
            id, {column}, extra_id, included, is_obligatory,
            price_override, deposit_amount, max_units, image_url,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING {columns}
        "#,
        table = provider_type.table(),
        column = provider_type.provider_column(),
        columns = binding_columns(provider_type),
    ))
    .bind(binding.id)
    .bind(binding.provider_id)
    .bind(binding.extra_id)
    .bind(binding.included)
    .bind(binding.is_obligatory)
    .bind(binding.price_override)
    .bind(binding.deposit_amount)
    .bind(binding.max_units)
    .bind(binding.image_url.as_deref())
    .bind(binding.created_at)
    .bind(binding.updated_at)
    .fetch_one(pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict,
        _ => AppError::from(e),
    })?;

    Ok(created)
}

/// Persist a configured binding in one atomic write
pub async fn update_binding(
    pool: &PgPool,
    provider_type: ProviderType,
    binding: &ProviderExtraBinding,
) -> Result<ProviderExtraBinding> {
    sqlx::query_as::<_, ProviderExtraBinding>(&format!(
        r#"
        UPDATE {table}
        SET included = $2,
            is_obligatory = $3,
            price_override = $4,
            deposit_amount = $5,
            max_units = $6,
            image_url = $7,
            updated_at = $8
        WHERE id = $1
        RETURNING {columns}
        "#,
        table = provider_type.table(),
        columns = binding_columns(provider_type),
    ))
    .bind(binding.id)
    .bind(binding.included)
    .bind(binding.is_obligatory)
    .bind(binding.price_override)
    .bind(binding.deposit_amount)
    .bind(binding.max_units)
    .bind(binding.image_url.as_deref())
    .bind(binding.updated_at)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)
}

/// Delete a binding. Returns the number of rows removed; deleting a
/// binding that does not exist removes zero rows and is not an error.
pub async fn delete_binding(
    pool: &PgPool,
    provider_type: ProviderType,
    provider_id: Uuid,
    extra_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(&format!(
        r#"
        DELETE FROM {table}
        WHERE {column} = $1 AND extra_id = $2
        "#,
        table = provider_type.table(),
        column = provider_type.provider_column(),
    ))
    .bind(provider_id)
    .bind(extra_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
