use crate::domain::model::{Gender, Specificity, SpecificityLevel, TargetingCriteria};

/// Number of targeting dimensions narrowed away from their default.
pub fn factor_count(criteria: &TargetingCriteria) -> usize {
    [
        !criteria.locations.is_empty(),
        !criteria.interests.is_empty(),
        !criteria.age_groups.is_empty(),
        !criteria.behaviors.is_empty(),
        criteria.gender != Gender::All,
        !criteria.device_types.is_empty(),
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

pub fn classify(criteria: &TargetingCriteria) -> Specificity {
    let level = match factor_count(criteria) {
        0..=2 => SpecificityLevel::Broad,
        3..=4 => SpecificityLevel::Balanced,
        _ => SpecificityLevel::Specific,
    };
    Specificity {
        level,
        description: level.description().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_broad() {
        let specificity = classify(&TargetingCriteria::default());
        assert_eq!(specificity.level, SpecificityLevel::Broad);
        assert_eq!(specificity.description, "Maximum reach");
    }

    #[test]
    fn test_three_factors_balanced() {
        let criteria = TargetingCriteria::default()
            .with_locations(["ng"])
            .with_interests(["tech"])
            .with_age_groups(["18-24"]);
        assert_eq!(classify(&criteria).level, SpecificityLevel::Balanced);
    }

    #[test]
    fn test_five_factors_specific() {
        let criteria = TargetingCriteria {
            gender: Gender::Female,
            ..TargetingCriteria::default()
        }
        .with_locations(["ng"])
        .with_interests(["tech"])
        .with_age_groups(["18-24"])
        .with_behaviors(["shoppers"]);
        assert_eq!(factor_count(&criteria), 5);

        let specificity = classify(&criteria);
        assert_eq!(specificity.level, SpecificityLevel::Specific);
        assert_eq!(specificity.description, "Highly targeted");
    }

    #[test]
    fn test_languages_do_not_count() {
        let mut criteria = TargetingCriteria::default().with_device_types(["mobile"]);
        criteria.languages.insert("en".to_string());
        assert_eq!(factor_count(&criteria), 1);
    }
}
