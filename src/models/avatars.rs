#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AvatarRow {
    pub data: String,
    pub updated_at: String,
}
