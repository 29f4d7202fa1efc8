//! Pure progression and friend-suggestion logic.
//!
//! Nothing in here touches storage. Callers load a snapshot, pass it in and
//! persist whatever comes back.

pub mod progression;
pub mod proximity;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("purchase amount must be positive")]
    InvalidAmount,

    #[error("purchase amount must not exceed {max}")]
    AmountTooLarge { max: f64 },

    #[error("guests cannot earn or spend points")]
    GuestNotEligible,

    #[error("invalid coordinate: lat={latitude}, lng={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("not enough points: have {available}, need {required}")]
    InsufficientPoints { available: u64, required: u64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;

pub use progression::{
    apply_experience, award_purchase, experience_threshold, purchase_bonus, spend_points,
    PurchaseAward, MAX_PURCHASE_AMOUNT, PurchaseBonus, UserStats,
};
pub use proximity::{
    haversine_km, rank_by_friends_of_friends, rank_by_proximity, suggest, GeoPoint, Location,
    LocationMap, SocialGraph, Suggestion, MAX_SUGGESTIONS,
};
