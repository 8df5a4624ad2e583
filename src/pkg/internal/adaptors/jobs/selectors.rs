use sqlx::PgPool;

use crate::{
    pkg::internal::adaptors::jobs::spec::JobEntry,
    pkg::internal::filters::{self, JobFilter},
    prelude::{Error, Result},
};

pub struct JobSelector<'a> {
    pool: &'a PgPool,
}

impl<'a> JobSelector<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobSelector { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.ok_or_else(|| Error::NotFound(format!("job {id}")))
    }

    pub async fn get_all(&self) -> Result<Vec<JobEntry>> {
        let rows = sqlx::query_as::<_, JobEntry>(
            "SELECT id, title, salary, equity, company_handle
             FROM jobs ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Pure narrowing of an already materialized collection, no store access.
    pub fn filter(options: &JobFilter, jobs: Vec<JobEntry>) -> Vec<JobEntry> {
        filters::apply(options, jobs)
    }
}
