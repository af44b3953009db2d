//! Targeting-driven audience reach.
//!
//! The estimate starts from a fixed floor and is scaled stage by stage:
//! location, interests, age groups, behaviors, then an over-targeting
//! penalty. Stage order is part of the contract because every stage
//! multiplies the running value.

use crate::domain::catalog::Catalog;
use crate::domain::model::TargetingCriteria;

/// Reach with no targeting at all.
pub const BASE_REACH: f64 = 100_000.0;

const WORLDWIDE_MULTIPLIER: f64 = 50.0;
/// Share of a location's population assumed active on the platform.
const LOCATION_ACTIVE_SHARE: f64 = 0.1;
const LOCATION_SCALE: f64 = 0.001;

const INTEREST_BASE: f64 = 0.3;
const INTEREST_STEP: f64 = 0.1;
const AGE_GROUP_BASE: f64 = 0.5;
const AGE_GROUP_STEP: f64 = 0.1;
const BEHAVIOR_BASE: f64 = 0.7;
const BEHAVIOR_STEP: f64 = 0.05;

const MAX_INTERESTS_BEFORE_PENALTY: usize = 5;
const MAX_BEHAVIORS_BEFORE_PENALTY: usize = 3;
const OVER_TARGETING_PENALTY: f64 = 0.6;

/// Projects how many users a targeting selection can reach.
///
/// Unknown location ids contribute nothing to the location sum. A real
/// location selection can raise the floor but never lowers it.
pub fn estimate_reach(criteria: &TargetingCriteria, catalog: &Catalog) -> u64 {
    let mut reach = BASE_REACH;

    if criteria.is_worldwide() {
        reach *= WORLDWIDE_MULTIPLIER;
    } else if !criteria.locations.is_empty() {
        let location_reach: f64 = criteria
            .locations
            .iter()
            .filter_map(|id| catalog.location(id))
            .map(|entry| entry.population as f64 * LOCATION_ACTIVE_SHARE)
            .sum();
        reach = reach.max(location_reach * LOCATION_SCALE);
    }
    tracing::debug!(reach, locations = criteria.locations.len(), "location stage");

    if !criteria.interests.is_empty() {
        reach *= INTEREST_BASE + INTEREST_STEP * criteria.interests.len() as f64;
    }
    if !criteria.age_groups.is_empty() {
        reach *= AGE_GROUP_BASE + AGE_GROUP_STEP * criteria.age_groups.len() as f64;
    }
    if !criteria.behaviors.is_empty() {
        reach *= BEHAVIOR_BASE + BEHAVIOR_STEP * criteria.behaviors.len() as f64;
    }

    if is_over_targeted(criteria) {
        reach *= OVER_TARGETING_PENALTY;
        tracing::debug!(reach, "over-targeting penalty applied");
    }

    reach.round().max(0.0) as u64
}

pub fn is_over_targeted(criteria: &TargetingCriteria) -> bool {
    criteria.interests.len() > MAX_INTERESTS_BEFORE_PENALTY
        || criteria.behaviors.len() > MAX_BEHAVIORS_BEFORE_PENALTY
}
