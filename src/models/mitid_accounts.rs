#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MitidAccountRow {
    pub cpr: String,
    pub email: String,
    pub created_at: String,
}
