use sqlx::prelude::FromRow;

use crate::{pkg::server::state::AppState, prelude::{Error, Result}};

#[derive(FromRow, Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

pub struct AuthToken;

impl AuthToken {
    /// Resolves a bearer token to its user. Expired or unknown tokens are
    /// indistinguishable to the caller, both come back `Unauthorized`.
    pub async fn check_token_validity(state: &AppState, token: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "select u.user_id, u.email, u.is_admin
             from auth_tokens t join users u on u.user_id = t.user_id
             where t.token = $1 and t.expiry > now()",
        )
        .bind(token)
        .fetch_optional(&*state.db_pool)
        .await?;

        user.ok_or(Error::Unauthorized)
    }
}
