use sqlx::PgPool;
use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::sync::Arc;

use crate::{
    conf::settings,
    pkg::internal::adaptors::jobs::spec::{JOB_FIELD_MAP, JOB_FIELDS},
    prelude::Result,
};

pub fn db_pool() -> Result<Pool<Postgres>> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.database_pool_max_connections)
        .connect_lazy(&settings.database_url)?;
    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub db_pool: Arc<PgPool>,
}

impl AppState {
    pub async fn new() -> Result<AppState> {
        // field map tables are startup constants; an incomplete one is a
        // deployment bug, caught here rather than on the first patch request
        JOB_FIELD_MAP.check_complete(JOB_FIELDS)?;
        Ok(AppState {
            db_pool: Arc::new(db_pool()?),
        })
    }
}
