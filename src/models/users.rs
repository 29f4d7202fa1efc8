use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub email: String,
    pub name: String,
    pub password: Option<String>,
    pub created_at: String,
}

/// What the API exposes about a user. Never carries the password hash.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub email: String,
    pub name: String,
    pub created_at: String,
}

impl From<UserRow> for UserSummary {
    fn from(row: UserRow) -> Self {
        Self {
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
