use async_graphql::{Context, ErrorExtensions, ID, Object, SimpleObject};
use std::sync::Arc;

use crate::db::models::DbUser;
use crate::registry::ModelRegistry;

/// The public user type. The row's audit timestamps are a storage concern and
/// stay off the wire.
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        Self {
            id: ID(row.id.to_string()),
            name: row.name,
            email: row.email,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users, in insertion order.
    async fn users(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<User>> {
        let registry = ctx.data::<Arc<ModelRegistry>>()?;
        let rows = registry
            .store()
            .list_users()
            .await
            .map_err(|e| e.extend())?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates a user. A duplicate email fails with a `UNIQUE_VIOLATION`
    /// error extension and writes nothing.
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
    ) -> async_graphql::Result<User> {
        let registry = ctx.data::<Arc<ModelRegistry>>()?;
        let row = registry
            .store()
            .create_user(&name, &email)
            .await
            .map_err(|e| e.extend())?;
        Ok(User::from(row))
    }
}
