use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OwnedItemRow {
    pub item_name: String,
    pub source: String,
    pub price: i64,
    pub created_at: String,
}
