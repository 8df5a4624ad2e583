use sqlx::PgPool;
use sqlx::query::QueryAs;
use sqlx::{Postgres, postgres::PgArguments};

use crate::pkg::internal::adaptors::jobs::spec::{JOB_FIELD_MAP, JobEntry};
use crate::pkg::internal::sqlgen::{SqlArg, UpdateRequest, partial_update};
use crate::pkg::server::handlers::jobs::CreateJobInput;
use crate::prelude::{Error, Result};

pub struct JobMutator<'a> {
    pool: &'a PgPool,
}

impl<'a> JobMutator<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        JobMutator { pool }
    }

    pub async fn create(&self, job: &CreateJobInput) -> Result<JobEntry> {
        let row = sqlx::query_as::<_, JobEntry>(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, salary, equity, company_handle
            "#,
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(&job.equity)
        .bind(&job.company_handle)
        .fetch_one(self.pool)
        .await?;
        Ok(row)
    }

    /// Applies a sparse update to the single matching row. The generated
    /// assignment clause binds $1..$n, the row id rides along as $n+1.
    pub async fn update(&self, id: i32, patch: UpdateRequest) -> Result<JobEntry> {
        let set = partial_update(patch, &JOB_FIELD_MAP)?;
        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} \
             RETURNING id, title, salary, equity, company_handle",
            set.clause,
            set.next_index(),
        );

        let mut q = sqlx::query_as::<_, JobEntry>(&query);
        for arg in set.args {
            q = bind_arg(q, arg);
        }
        let row = q.bind(id).fetch_optional(self.pool).await?;
        row.ok_or_else(|| Error::NotFound(format!("job {id}")))
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("job {id}")));
        }
        Ok(())
    }
}

fn bind_arg<'q>(
    query: QueryAs<'q, Postgres, JobEntry, PgArguments>,
    arg: SqlArg,
) -> QueryAs<'q, Postgres, JobEntry, PgArguments> {
    match arg {
        SqlArg::Text(value) => query.bind(value),
        SqlArg::Int(value) => query.bind(value),
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
    use crate::pkg::server::state::AppState;

    async fn seed_job(state: &AppState, title: &str, equity: Option<&str>) -> Result<JobEntry> {
        let input = CreateJobInput {
            title: title.into(),
            salary: Some(100),
            equity: equity.map(Into::into),
            company_handle: "c1".into(),
        };
        JobMutator::new(&state.db_pool).create(&input).await
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations and a c1 company row"]
    async fn test_create_read_update_delete_roundtrip() -> Result<()> {
        let state = AppState::new().await?;
        let mutator = JobMutator::new(&state.db_pool);
        let selector = JobSelector::new(&state.db_pool);

        let job = seed_job(&state, "J2", Some("0.085")).await?;
        assert_eq!(job.equity.as_deref(), Some("0.085"));

        let mut patch = UpdateRequest::new();
        patch.set("salary", SqlArg::Int(300));
        let updated = mutator.update(job.id, patch).await?;
        assert_eq!(updated.salary, Some(300));
        assert_eq!(updated.title, "J2");
        assert_eq!(updated.equity.as_deref(), Some("0.085"));
        assert_eq!(selector.get_by_id(job.id).await?.salary, Some(300));

        mutator.delete(job.id).await?;
        assert!(matches!(
            selector.get_by_id(job.id).await,
            Err(Error::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running postgres with migrations and a c1 company row"]
    async fn test_update_missing_row_is_not_found() -> Result<()> {
        let state = AppState::new().await?;
        let mutator = JobMutator::new(&state.db_pool);
        let mut patch = UpdateRequest::new();
        patch.set("salary", SqlArg::Int(300));
        assert!(matches!(
            mutator.update(9999, patch).await,
            Err(Error::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn test_empty_patch_fails_before_store_access() -> Result<()> {
        // connect_lazy means no connection is ever attempted here
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/joblite_test")?;
        let mutator = JobMutator::new(&pool);
        assert!(matches!(
            mutator.update(1, UpdateRequest::new()).await,
            Err(Error::Validation(_))
        ));
        Ok(())
    }
}
