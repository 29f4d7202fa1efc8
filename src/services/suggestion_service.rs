use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::user_repo;
use crate::engine;
use crate::services::{friendship_service, location_service, ServiceResult};
use crate::util::normalize_email;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub email: String,
    pub name: String,
    pub distance_km: Option<f64>,
    pub is_friend: bool,
    pub is_requested: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionPage {
    /// False means the list came from the social graph, not from distance.
    pub has_location: bool,
    pub suggestions: Vec<SuggestionView>,
}

/// Friend suggestions for `email`, built from a fresh snapshot of users,
/// locations and the requester's corner of the social graph.
pub async fn suggestions_for(pool: &SqlitePool, email: &str) -> ServiceResult<SuggestionPage> {
    let email = normalize_email(email);

    let users = user_repo::list_users_by_name(pool).await?;
    let names: HashMap<&str, &str> = users
        .iter()
        .map(|u| (u.email.as_str(), u.name.as_str()))
        .collect();
    let candidates: Vec<String> = users
        .iter()
        .filter(|u| u.email != email)
        .map(|u| u.email.clone())
        .collect();

    let locations = location_service::location_map(pool).await?;
    let graph = friendship_service::load_social_graph(pool, &email).await?;
    let has_location = locations.contains_key(&email);

    let ranked = engine::suggest(&email, &locations, &graph, &candidates)?;
    let pending = graph.requests_for(&email);

    let suggestions = ranked
        .into_iter()
        .map(|s| SuggestionView {
            name: names.get(s.identity.as_str()).copied().unwrap_or("").to_string(),
            is_friend: graph.is_friend(&email, &s.identity),
            is_requested: pending.contains(&s.identity),
            distance_km: s.distance_km,
            email: s.identity,
        })
        .collect();

    Ok(SuggestionPage {
        has_location,
        suggestions,
    })
}
