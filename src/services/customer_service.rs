// src/services/customer_service.rs

use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::CustomerRepository,
    models::customer::{Customer, CustomerUpdate, NewCustomer},
};

#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
    page_size: i64,
}

impl CustomerService {
    pub fn new(repo: CustomerRepository, page_size: i64) -> Self {
        Self { repo, page_size }
    }

    /// Validates, rejects duplicates on name/email/phone/instagram and inserts.
    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        input: &NewCustomer,
    ) -> Result<Customer, AppError>
    where
        E: Acquire<'e, Database = Postgres>,
    {
        input.validate()?;

        let mut tx = executor.begin().await?;

        self.repo.lock_identities(&mut *tx, input).await?;

        if self.repo.find_duplicate(&mut *tx, input).await?.is_some() {
            return Err(AppError::DuplicateCustomer);
        }

        let customer = self.repo.insert(&mut *tx, input).await?;

        tx.commit().await?;

        tracing::info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.repo.ping().await
    }

    pub async fn list_customers<'e, E>(
        &self,
        executor: E,
        is_contracted: Option<bool>,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list(executor, is_contracted, self.page_size).await
    }

    pub async fn count_total<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.count_all(executor).await
    }

    pub async fn count_by_contract_status<'e, E>(
        &self,
        executor: E,
        is_contracted: bool,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.count_by_contract_status(executor, is_contracted).await
    }

    pub async fn search_customers<'e, E>(
        &self,
        executor: E,
        term: &str,
    ) -> Result<Vec<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.search(executor, term, self.page_size).await
    }

    /// `raw_id` comes straight from the path; an unparsable id is a storage
    /// failure, not a missing record.
    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        raw_id: &str,
        input: &CustomerUpdate,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let id = Uuid::parse_str(raw_id)
            .map_err(|e| anyhow::anyhow!("invalid customer id {raw_id:?}: {e}"))?;

        let customer = self
            .repo
            .replace(executor, id, input)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        tracing::info!(customer_id = %customer.id, "customer updated");
        Ok(customer)
    }
}
