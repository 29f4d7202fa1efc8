use crate::engine::Location;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LocationRow {
    pub email: String,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: i64,
}

impl LocationRow {
    pub fn to_location(&self) -> Location {
        Location {
            latitude: self.lat,
            longitude: self.lng,
            updated_at: self.updated_at,
        }
    }
}
