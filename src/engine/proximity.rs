use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::{EngineError, Result};

pub const MAX_SUGGESTIONS: usize = 8;
const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(EngineError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Last known position of one identity. `updated_at` is epoch millis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    pub updated_at: i64,
}

impl Location {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub type LocationMap = HashMap<String, Location>;

/// Friend and pending-request edges, keyed by owning identity.
///
/// Friend edges are directed (`owner -> friend`); a friendship is two edges.
/// Request edges are keyed by recipient and list senders.
#[derive(Debug, Clone, Default)]
pub struct SocialGraph {
    friends: HashMap<String, Vec<String>>,
    requests: HashMap<String, Vec<String>>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_friend_edge(&mut self, owner: &str, friend: &str) {
        let list = self.friends.entry(owner.to_string()).or_default();
        if !list.iter().any(|f| f == friend) {
            list.push(friend.to_string());
        }
    }

    pub fn add_request_edge(&mut self, recipient: &str, sender: &str) {
        let list = self.requests.entry(recipient.to_string()).or_default();
        if !list.iter().any(|s| s == sender) {
            list.push(sender.to_string());
        }
    }

    /// Makes `a` and `b` friends and drops any request between them.
    pub fn connect(&mut self, a: &str, b: &str) {
        self.add_friend_edge(a, b);
        self.add_friend_edge(b, a);
        if let Some(list) = self.requests.get_mut(a) {
            list.retain(|s| s != b);
        }
        if let Some(list) = self.requests.get_mut(b) {
            list.retain(|s| s != a);
        }
    }

    pub fn friends_of(&self, identity: &str) -> &[String] {
        self.friends
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn requests_for(&self, identity: &str) -> &[String] {
        self.requests
            .get(identity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_friend(&self, owner: &str, other: &str) -> bool {
        self.friends_of(owner).iter().any(|f| f == other)
    }

    /// Friends of `identity`'s friends, minus `identity` and its direct friends.
    pub fn friends_of_friends(&self, identity: &str) -> HashSet<&str> {
        let direct = self.friends_of(identity);
        direct
            .iter()
            .flat_map(|friend| self.friends_of(friend))
            .map(String::as_str)
            .filter(|fof| *fof != identity && !direct.iter().any(|d| d == fof))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub identity: String,
    pub distance_km: Option<f64>,
}

pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.min(1.0).sqrt().asin();
    Ok(EARTH_RADIUS_KM * c)
}

/// Orders candidates by distance from the requester's stored location.
///
/// Candidates without a location, or with a stored location that is out of
/// range, come after every located candidate. The sort is stable, so equal
/// distances and the unlocated tail keep input order. A requester with no
/// stored location gets the first candidates in input order.
pub fn rank_by_proximity(
    requester: &str,
    locations: &LocationMap,
    candidates: &[String],
) -> Result<Vec<Suggestion>> {
    let origin = match locations.get(requester) {
        Some(loc) => {
            let point = loc.point();
            point.validate()?;
            Some(point)
        }
        None => None,
    };

    let mut ranked: Vec<Suggestion> = candidates
        .iter()
        .filter(|c| c.as_str() != requester)
        .map(|candidate| {
            let distance_km = origin.and_then(|origin| {
                locations
                    .get(candidate)
                    .and_then(|loc| haversine_km(&origin, &loc.point()).ok())
            });
            Suggestion {
                identity: candidate.clone(),
                distance_km,
            }
        })
        .collect();

    ranked.sort_by(|a, b| match (a.distance_km, b.distance_km) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.truncate(MAX_SUGGESTIONS);
    Ok(ranked)
}

/// Suggestions for a requester with no known location.
///
/// Keeps candidates that are friends of the requester's friends. When there
/// are none, every candidate qualifies. Order follows `candidates`.
pub fn rank_by_friends_of_friends(
    requester: &str,
    graph: &SocialGraph,
    candidates: &[String],
) -> Vec<Suggestion> {
    let fof = graph.friends_of_friends(requester);
    let eligible = candidates.iter().filter(|c| c.as_str() != requester);

    let chosen: Vec<&String> = if fof.is_empty() {
        eligible.collect()
    } else {
        eligible.filter(|c| fof.contains(c.as_str())).collect()
    };

    chosen
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|identity| Suggestion {
            identity: identity.clone(),
            distance_km: None,
        })
        .collect()
}

pub fn suggest(
    requester: &str,
    locations: &LocationMap,
    graph: &SocialGraph,
    candidates: &[String],
) -> Result<Vec<Suggestion>> {
    if locations.contains_key(requester) {
        rank_by_proximity(requester, locations, candidates)
    } else {
        Ok(rank_by_friends_of_friends(requester, graph, candidates))
    }
}
