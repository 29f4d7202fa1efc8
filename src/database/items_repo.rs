use sqlx::{SqliteConnection, SqlitePool};

use crate::models::OwnedItemRow;

pub struct NewOwnedItem<'a> {
    pub email: &'a str,
    pub item_name: &'a str,
    pub source: &'a str,
    pub price: i64,
    pub created_at: &'a str,
}

const SQL_LIST_ITEMS: &str = r#"
SELECT item_name, source, price, created_at
FROM owned_items
WHERE email = ?1
ORDER BY id DESC
"#;

const SQL_INSERT_ITEM: &str = r#"
INSERT INTO owned_items (email, item_name, source, price, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub async fn list_items(pool: &SqlitePool, email: &str) -> sqlx::Result<Vec<OwnedItemRow>> {
    sqlx::query_as::<_, OwnedItemRow>(SQL_LIST_ITEMS)
        .bind(email)
        .fetch_all(pool)
        .await
}

pub async fn insert_item(conn: &mut SqliteConnection, item: NewOwnedItem<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_ITEM)
        .bind(item.email)
        .bind(item.item_name)
        .bind(item.source)
        .bind(item.price)
        .bind(item.created_at)
        .execute(conn)
        .await?;
    Ok(())
}
