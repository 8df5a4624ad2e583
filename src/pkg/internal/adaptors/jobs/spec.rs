use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::pkg::internal::sqlgen::FieldMap;

/// A job row. Equity is carried as its exact decimal string, never a float.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    pub id: i32,
    pub title: String,
    pub salary: Option<i64>,
    pub equity: Option<String>,
    pub company_handle: String,
}

/// External field vocabulary of the job entity. `id` is store-assigned and
/// never part of it.
pub const JOB_FIELDS: &[&str] = &["title", "salary", "equity", "companyHandle"];

/// Fields a patch may target. `companyHandle` is immutable after create and
/// the patch input has no way to name it, so it is absent here.
pub const JOB_PATCH_FIELDS: &[&str] = &["title", "salary", "equity"];

pub static JOB_FIELD_MAP: FieldMap = FieldMap::new(&[
    ("title", "title"),
    ("salary", "salary"),
    ("equity", "equity"),
    ("companyHandle", "company_handle"),
]);
