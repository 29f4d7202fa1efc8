use serde::{Deserialize, Serialize};

use super::{EngineError, Result};

const BASE_THRESHOLD: u64 = 100;
const THRESHOLD_STEP: u64 = 25;
const BONUS_BASE: u64 = 10;

/// Largest single purchase, in DKK, that earns points.
pub const MAX_PURCHASE_AMOUNT: f64 = 1_000_000.0;

/// Experience, level and spendable points for one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(rename = "xp")]
    pub experience: u64,
    pub level: u32,
    pub points: u64,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            experience: 0,
            level: 1,
            points: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PurchaseBonus {
    pub base: u64,
    pub bonus: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseAward {
    pub stats: UserStats,
    pub rounded_amount: u64,
    pub total_xp: u64,
    pub levels_gained: u32,
}

impl PurchaseAward {
    pub fn summary(&self, event_name: Option<&str>) -> String {
        let suffix = event_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!(" for {}", s))
            .unwrap_or_default();
        format!(
            "Purchase completed{}. +{} points and +{} xp.",
            suffix, self.rounded_amount, self.total_xp
        )
    }
}

/// Experience needed to leave `level`. Levels below 1 are treated as 1.
pub fn experience_threshold(level: u32) -> u64 {
    let level = u64::from(level.max(1));
    BASE_THRESHOLD + (level - 1) * THRESHOLD_STEP
}

pub fn apply_experience(stats: &UserStats, gained_xp: u64) -> UserStats {
    let mut experience = stats.experience.saturating_add(gained_xp);
    let mut level = stats.level.max(1);
    let mut needed = experience_threshold(level);
    while experience >= needed {
        experience -= needed;
        level += 1;
        needed = experience_threshold(level);
    }

    UserStats {
        experience,
        level,
        points: stats.points,
    }
}

pub fn purchase_bonus(level: u32) -> PurchaseBonus {
    let base = BONUS_BASE + u64::from(level);
    let percent = match level {
        0..=15 => 0.5,
        16..=30 => 0.25,
        _ => 0.01,
    };
    let bonus = (base as f64 * percent).round() as u64;
    PurchaseBonus {
        base,
        bonus,
        percent,
    }
}

/// Converts a paid amount into points and experience.
///
/// Guests are rejected before the amount is looked at, so a guest never sees
/// `InvalidAmount`. `NaN` counts as a non-positive amount, and anything above
/// [`MAX_PURCHASE_AMOUNT`] is rejected with `AmountTooLarge`.
pub fn award_purchase(stats: &UserStats, amount: f64, is_guest: bool) -> Result<PurchaseAward> {
    if is_guest {
        return Err(EngineError::GuestNotEligible);
    }
    if !(amount > 0.0) {
        return Err(EngineError::InvalidAmount);
    }
    if amount > MAX_PURCHASE_AMOUNT {
        return Err(EngineError::AmountTooLarge {
            max: MAX_PURCHASE_AMOUNT,
        });
    }

    let rounded_amount = amount.round() as u64;
    let bonus = purchase_bonus(stats.level);
    let total_xp = rounded_amount
        .saturating_add(bonus.base)
        .saturating_add(bonus.bonus);

    let with_points = UserStats {
        points: stats.points.saturating_add(rounded_amount),
        ..*stats
    };
    let updated = apply_experience(&with_points, total_xp);

    Ok(PurchaseAward {
        stats: updated,
        rounded_amount,
        total_xp,
        levels_gained: updated.level.saturating_sub(stats.level.max(1)),
    })
}

/// Spends points in the point shop. Experience and level are untouched.
pub fn spend_points(stats: &UserStats, price: u64, is_guest: bool) -> Result<UserStats> {
    if is_guest {
        return Err(EngineError::GuestNotEligible);
    }
    if stats.points < price {
        return Err(EngineError::InsufficientPoints {
            available: stats.points,
            required: price,
        });
    }
    Ok(UserStats {
        points: stats.points - price,
        ..*stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_starts_at_100_and_increases() {
        assert_eq!(experience_threshold(1), 100);
        assert_eq!(experience_threshold(2), 125);
        for level in 1..200 {
            assert!(experience_threshold(level + 1) > experience_threshold(level));
        }
    }

    #[test]
    fn apply_experience_never_leaves_overflowing_xp() {
        let starts = [
            UserStats::default(),
            UserStats {
                experience: 99,
                level: 1,
                points: 7,
            },
            UserStats {
                experience: 10_000,
                level: 3,
                points: 0,
            },
        ];
        for start in starts {
            for gained in [0, 1, 99, 100, 101, 124, 125, 1_000, 123_456] {
                let result = apply_experience(&start, gained);
                assert!(
                    result.experience < experience_threshold(result.level),
                    "start={:?} gained={} result={:?}",
                    start,
                    gained,
                    result
                );
                assert_eq!(result.points, start.points);
                assert!(result.level >= start.level);
            }
        }
    }

    #[test]
    fn apply_experience_crosses_several_levels() {
        // 100 + 125 + 150 = 375
        let result = apply_experience(&UserStats::default(), 380);
        assert_eq!(result.level, 4);
        assert_eq!(result.experience, 5);
    }

    #[test]
    fn bonus_percent_boundaries() {
        assert_eq!(purchase_bonus(1).percent, 0.5);
        assert_eq!(purchase_bonus(15).percent, 0.5);
        assert_eq!(purchase_bonus(16).percent, 0.25);
        assert_eq!(purchase_bonus(30).percent, 0.25);
        assert_eq!(purchase_bonus(31).percent, 0.01);
    }

    #[test]
    fn bonus_values() {
        assert_eq!(
            purchase_bonus(1),
            PurchaseBonus {
                base: 11,
                bonus: 6,
                percent: 0.5
            }
        );
        // 26 * 0.25 = 6.5
        assert_eq!(purchase_bonus(16).bonus, 7);
        // 41 * 0.01 = 0.41
        assert_eq!(purchase_bonus(31).bonus, 0);
    }

    #[test]
    fn award_purchase_for_new_user() {
        let award = award_purchase(&UserStats::default(), 100.0, false).unwrap();
        assert_eq!(award.rounded_amount, 100);
        assert_eq!(award.total_xp, 117);
        assert_eq!(
            award.stats,
            UserStats {
                experience: 17,
                level: 2,
                points: 100
            }
        );
        assert_eq!(award.levels_gained, 1);
    }

    #[test]
    fn award_purchase_rounds_amount() {
        let award = award_purchase(&UserStats::default(), 49.5, false).unwrap();
        assert_eq!(award.rounded_amount, 50);
        assert_eq!(award.stats.points, 50);
        assert_eq!(award.total_xp, 67);
    }

    #[test]
    fn award_purchase_rejects_non_positive_amounts() {
        let stats = UserStats::default();
        assert_eq!(
            award_purchase(&stats, 0.0, false),
            Err(EngineError::InvalidAmount)
        );
        assert_eq!(
            award_purchase(&stats, -5.0, false),
            Err(EngineError::InvalidAmount)
        );
        assert_eq!(
            award_purchase(&stats, f64::NAN, false),
            Err(EngineError::InvalidAmount)
        );
    }

    #[test]
    fn award_purchase_caps_the_amount() {
        let stats = UserStats::default();
        let too_large = Err(EngineError::AmountTooLarge {
            max: MAX_PURCHASE_AMOUNT,
        });
        assert_eq!(award_purchase(&stats, 1e300, false), too_large);
        assert_eq!(award_purchase(&stats, f64::INFINITY, false), too_large);
        assert_eq!(
            award_purchase(&stats, MAX_PURCHASE_AMOUNT + 0.5, false),
            too_large
        );

        let award = award_purchase(&stats, MAX_PURCHASE_AMOUNT, false).unwrap();
        assert_eq!(award.rounded_amount, 1_000_000);
        assert_eq!(award.total_xp, 1_000_017);
        assert_eq!(award.stats.points, 1_000_000);
        assert!(award.stats.experience < experience_threshold(award.stats.level));
    }

    #[test]
    fn award_purchase_saturates_on_huge_balances() {
        let stats = UserStats {
            experience: 0,
            level: 1,
            points: u64::MAX - 10,
        };
        let award = award_purchase(&stats, 100.0, false).unwrap();
        assert_eq!(award.stats.points, u64::MAX);
    }

    #[test]
    fn guests_get_nothing() {
        let stats = UserStats {
            experience: 40,
            level: 3,
            points: 12,
        };
        assert_eq!(
            award_purchase(&stats, 100.0, true),
            Err(EngineError::GuestNotEligible)
        );
        assert_eq!(
            award_purchase(&stats, -1.0, true),
            Err(EngineError::GuestNotEligible)
        );
        assert_eq!(
            spend_points(&stats, 1, true),
            Err(EngineError::GuestNotEligible)
        );
    }

    #[test]
    fn spend_points_checks_balance() {
        let stats = UserStats {
            experience: 3,
            level: 2,
            points: 200,
        };
        let after = spend_points(&stats, 180, false).unwrap();
        assert_eq!(after.points, 20);
        assert_eq!(after.level, 2);
        assert_eq!(after.experience, 3);

        assert_eq!(
            spend_points(&stats, 350, false),
            Err(EngineError::InsufficientPoints {
                available: 200,
                required: 350
            })
        );
    }

    #[test]
    fn summary_mentions_event_when_named() {
        let award = award_purchase(&UserStats::default(), 100.0, false).unwrap();
        assert_eq!(
            award.summary(Some("Roskilde")),
            "Purchase completed for Roskilde. +100 points and +117 xp."
        );
        assert_eq!(
            award.summary(None),
            "Purchase completed. +100 points and +117 xp."
        );
    }

    #[test]
    fn stats_serialize_with_short_xp_key() {
        let json = serde_json::to_value(UserStats::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "xp": 0, "level": 1, "points": 0 }));
    }
}
