use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StoredEventRow {
    pub event_id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub name: String,
    pub city: Option<String>,
    pub date: Option<String>,
    pub raw_date: Option<String>,
    pub url: Option<String>,
}
