use sqlx::SqlitePool;
use tracing::info;

const SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS users (
  email TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  password TEXT,
  created_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS avatars (
  email TEXT PRIMARY KEY,
  data TEXT NOT NULL,
  updated_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS friends (
  email TEXT NOT NULL,
  friend_email TEXT NOT NULL,
  PRIMARY KEY (email, friend_email)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS friend_requests (
  email TEXT NOT NULL,
  from_email TEXT NOT NULL,
  PRIMARY KEY (email, from_email)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS events (
  email TEXT NOT NULL,
  event_id TEXT NOT NULL,
  event_type TEXT NOT NULL,
  name TEXT NOT NULL,
  city TEXT,
  date TEXT,
  raw_date TEXT,
  url TEXT,
  created_at TEXT NOT NULL,
  PRIMARY KEY (email, event_id, event_type)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS locations (
  email TEXT PRIMARY KEY,
  lat REAL NOT NULL,
  lng REAL NOT NULL,
  updated_at INTEGER NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS mitid_accounts (
  cpr TEXT PRIMARY KEY,
  email TEXT NOT NULL,
  created_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS user_stats (
  email TEXT PRIMARY KEY,
  experience INTEGER NOT NULL DEFAULT 0,
  level INTEGER NOT NULL DEFAULT 1,
  points INTEGER NOT NULL DEFAULT 0,
  updated_at TEXT NOT NULL
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS owned_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  email TEXT NOT NULL,
  item_name TEXT NOT NULL,
  source TEXT NOT NULL,
  price INTEGER NOT NULL DEFAULT 0,
  created_at TEXT NOT NULL
)
"#,
];

/// Every table an account owns rows in, with the column holding the identity.
/// Rename and delete walk this list inside one transaction.
pub const OWNED_COLUMNS: &[(&str, &str)] = &[
    ("avatars", "email"),
    ("friends", "email"),
    ("friends", "friend_email"),
    ("friend_requests", "email"),
    ("friend_requests", "from_email"),
    ("events", "email"),
    ("locations", "email"),
    ("mitid_accounts", "email"),
    ("user_stats", "email"),
    ("owned_items", "email"),
];

pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("🗄️  Schema ready ({} tables)", SCHEMA.len());
    Ok(())
}
