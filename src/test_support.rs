// src/test_support.rs

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Executor, PgPool,
};
use uuid::Uuid;

/// A throwaway database created from `TEST_DATABASE_URL`, migrated and ready.
/// `create` returns `None` (and the calling test returns early) when the
/// variable is unset or the server is unreachable.
pub struct TestDatabase {
    pub pool: PgPool,
    admin: PgPool,
    name: String,
}

impl TestDatabase {
    pub async fn create() -> Option<Self> {
        let url = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("skipping Postgres test: TEST_DATABASE_URL not set");
                return None;
            }
        };

        let base: PgConnectOptions = url.parse().ok()?;
        let admin = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(base.clone().database("postgres"))
            .await
            .ok()?;

        let name = format!("lead_tracker_test_{}", Uuid::new_v4().simple());
        admin
            .execute(format!("CREATE DATABASE \"{name}\"").as_str())
            .await
            .ok()?;

        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect_with(base.database(&name))
            .await
            .ok()?;
        sqlx::migrate!().run(&pool).await.ok()?;

        Some(Self { pool, admin, name })
    }

    pub async fn cleanup(self) {
        let Self { pool, admin, name } = self;
        pool.close().await;
        let _ = admin
            .execute(format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)").as_str())
            .await;
    }
}
