// src/db/customer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::contains_pattern, error::AppError},
    models::customer::{Customer, CustomerUpdate, NewCustomer},
};

const CUSTOMER_COLUMNS: &str = r#"
    id, name, email, phone, instagram, sector,
    is_new_user, is_contracted, mail_opened, replied, priority,
    note, created_at, updated_at
"#;

/// All SQL touching the `customers` table. Query methods take the executor
/// explicitly so callers choose between the pool and an open transaction.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Takes one transaction-scoped advisory lock per identity value of
    /// `candidate`, so only creates sharing a name, email, phone or instagram
    /// wait on each other. Keys are locked in ascending order.
    pub async fn lock_identities<'e, E>(
        &self,
        executor: E,
        candidate: &NewCustomer,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(keys.key)
            FROM (
                SELECT DISTINCT hashtext(identity)::BIGINT AS key
                FROM UNNEST($1::TEXT[]) AS identity
                ORDER BY key
            ) AS keys
            "#,
        )
        .bind(identity_lock_values(candidate))
        .execute(executor)
        .await?;

        Ok(())
    }

    /// First customer sharing any identity field with `candidate`.
    pub async fn find_duplicate<'e, E>(
        &self,
        executor: E,
        candidate: &NewCustomer,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE name = $1 OR email = $2 OR phone = $3 OR instagram = $4
            LIMIT 1
            "#
        );

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(&candidate.name)
            .bind(&candidate.email)
            .bind(&candidate.phone)
            .bind(&candidate.instagram)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }

    pub async fn insert<'e, E>(&self, executor: E, input: &NewCustomer) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            INSERT INTO customers (id, name, email, phone, instagram, sector, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(Uuid::new_v4())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.instagram)
            .bind(&input.sector)
            .bind(input.note.as_deref())
            .fetch_one(executor)
            .await?;

        Ok(customer)
    }

    /// Oldest first; `is_contracted = None` lists everything.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        is_contracted: Option<bool>,
        limit: i64,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE ($1::BOOLEAN IS NULL OR is_contracted = $1)
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(is_contracted)
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(customers)
    }

    pub async fn count_all<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(executor)
            .await?;

        Ok(total)
    }

    pub async fn count_by_contract_status<'e, E>(
        &self,
        executor: E,
        is_contracted: bool,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM customers WHERE is_contracted = $1")
                .bind(is_contracted)
                .fetch_one(executor)
                .await?;

        Ok(count)
    }

    /// Case-insensitive literal substring search over the identity fields.
    pub async fn search<'e, E>(
        &self,
        executor: E,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            SELECT {CUSTOMER_COLUMNS}
            FROM customers
            WHERE name ILIKE $1 ESCAPE '\'
               OR email ILIKE $1 ESCAPE '\'
               OR phone ILIKE $1 ESCAPE '\'
               OR instagram ILIKE $1 ESCAPE '\'
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#
        );

        let customers = sqlx::query_as::<_, Customer>(&sql)
            .bind(contains_pattern(term))
            .bind(limit)
            .fetch_all(executor)
            .await?;

        Ok(customers)
    }

    /// Overwrites every updatable column. `None` when no row has `id`.
    pub async fn replace<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &CustomerUpdate,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            r#"
            UPDATE customers
            SET name = $2,
                email = $3,
                phone = $4,
                instagram = $5,
                sector = $6,
                note = $7,
                is_contracted = $8,
                mail_opened = $9,
                replied = $10,
                priority = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        );

        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.instagram)
            .bind(&input.sector)
            .bind(input.note.as_deref())
            .bind(input.is_contracted)
            .bind(input.mail_opened)
            .bind(input.replied)
            .bind(input.priority)
            .fetch_optional(executor)
            .await?;

        Ok(customer)
    }
}

// Prefixed so equal text in different columns maps to different locks.
fn identity_lock_values(candidate: &NewCustomer) -> Vec<String> {
    vec![
        format!("customers.name:{}", candidate.name),
        format!("customers.email:{}", candidate.email),
        format!("customers.phone:{}", candidate.phone),
        format!("customers.instagram:{}", candidate.instagram),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_locks_are_scoped_per_column() {
        let candidate = NewCustomer {
            name: "x".into(),
            email: "x".into(),
            phone: "x".into(),
            instagram: "x".into(),
            sector: "retail".into(),
            note: None,
        };

        let values = identity_lock_values(&candidate);
        assert_eq!(values.len(), 4);
        let unique: std::collections::HashSet<_> = values.iter().collect();
        assert_eq!(unique.len(), 4);
    }
}
