use crate::engine::UserStats;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserStatsRow {
    pub experience: i64,
    pub level: i64,
    pub points: i64,
}

impl From<UserStatsRow> for UserStats {
    fn from(row: UserStatsRow) -> Self {
        Self {
            experience: u64::try_from(row.experience).unwrap_or(0),
            level: u32::try_from(row.level).unwrap_or(1).max(1),
            points: u64::try_from(row.points).unwrap_or(0),
        }
    }
}
