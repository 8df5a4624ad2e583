use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    pkg::{
        internal::{
            adaptors::jobs::{mutators::JobMutator, selectors::JobSelector, spec::JobEntry},
            auth::User,
            filters::JobFilter,
            sqlgen::{SqlArg, UpdateRequest},
        },
        server::state::AppState,
    },
    prelude::{Error, Result},
};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobInput {
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company_handle: String,
}

impl CreateJobInput {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title must not be empty".into()));
        }
        if self.company_handle.trim().is_empty() {
            return Err(Error::Validation("companyHandle must not be empty".into()));
        }
        check_salary(self.salary)?;
        if let Some(equity) = &self.equity {
            check_equity(equity)?;
        }
        Ok(())
    }
}

// id and companyHandle are deliberately absent; deny_unknown_fields turns an
// attempt to patch them into a 400 before the repository is reached
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct PatchJobInput {
    pub title: Option<String>,
    pub salary: Option<i64>,
    pub equity: Option<String>,
}

impl PatchJobInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(Error::Validation("title must not be empty".into()));
            }
        }
        check_salary(self.salary)?;
        if let Some(equity) = &self.equity {
            check_equity(equity)?;
        }
        Ok(())
    }

    /// Present fields become ordered pairs; the declaration order here fixes
    /// their positional-parameter order.
    pub fn into_update(self) -> UpdateRequest {
        let mut request = UpdateRequest::new();
        if let Some(title) = self.title {
            request.set("title", SqlArg::Text(title));
        }
        if let Some(salary) = self.salary {
            request.set("salary", SqlArg::Int(salary));
        }
        if let Some(equity) = self.equity {
            request.set("equity", SqlArg::Text(equity));
        }
        request
    }
}

fn check_salary(salary: Option<i64>) -> Result<()> {
    match salary {
        Some(salary) if salary < 0 => {
            Err(Error::Validation("salary must not be negative".into()))
        }
        _ => Ok(()),
    }
}

fn check_equity(raw: &str) -> Result<()> {
    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(()),
        _ => Err(Error::Validation(format!(
            "equity must be a decimal between 0 and 1, got {raw}"
        ))),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Json(input): Json<CreateJobInput>,
) -> Result<Json<Value>> {
    input.validate()?;
    let job = JobMutator::new(&state.db_pool).create(&input).await?;
    tracing::info!("user {} created job {}", &user.user_id, job.id);
    Ok(Json(json!({ "job": job })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(options): Query<JobFilter>,
) -> Result<Json<Vec<JobEntry>>> {
    let jobs = JobSelector::new(&state.db_pool).get_all().await?;
    Ok(Json(JobSelector::filter(&options, jobs)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let job = JobSelector::new(&state.db_pool).get_by_id(id).await?;
    Ok(Json(json!({ "job": job })))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
    Json(input): Json<PatchJobInput>,
) -> Result<Json<Value>> {
    input.validate()?;
    let job = JobMutator::new(&state.db_pool)
        .update(id, input.into_update())
        .await?;
    tracing::info!("user {} updated job {}", &user.user_id, id);
    Ok(Json(json!({ "job": job })))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(user): Extension<Arc<User>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    JobMutator::new(&state.db_pool).delete(id).await?;
    tracing::info!("user {} deleted job {}", &user.user_id, id);
    Ok(Json(json!({ "deleted": id })))
}
