use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Gender, Lifter};

/// Bodyweight-coefficient constants for one gender, in the Sinclair form
/// 10^(A·X²) with X = log10(bodyweight / b) for lifters under the class
/// reference weight b.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientConstants {
    pub a: Decimal,
    pub b: Decimal,
}

/// Competition configuration supplied by the rules collaborator: category
/// definitions with their qualifying minimums, the ranking scope selector,
/// and coefficient constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionRules {
    /// Rank within registration categories instead of weigh-in ones.
    #[serde(default)]
    pub use_registration_category: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub men_coefficients: CoefficientConstants,
    pub women_coefficients: CoefficientConstants,
}

impl Default for CompetitionRules {
    fn default() -> Self {
        // 2024 Sinclair constants.
        Self {
            use_registration_category: false,
            categories: Vec::new(),
            men_coefficients: CoefficientConstants {
                a: Decimal::new(722762521, 9),
                b: Decimal::new(193609, 3),
            },
            women_coefficients: CoefficientConstants {
                a: Decimal::new(787004341, 9),
                b: Decimal::new(153757, 3),
            },
        }
    }
}

impl CompetitionRules {
    pub fn constants_for_gender(&self, gender: Gender) -> CoefficientConstants {
        match gender {
            Gender::Male => self.men_coefficients,
            Gender::Female => self.women_coefficients,
        }
    }

    /// The weigh-in category a lifter falls into, if any is configured.
    pub fn category_for(&self, gender: Gender, body_weight: Decimal) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.matches(gender, body_weight))
    }

    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// The category label used to scope this lifter's ranking, honoring
    /// the registration/weigh-in selector. None when the lifter cannot be
    /// placed (no registration entry, or no weigh-in weight).
    pub fn category_label(&self, lifter: &Lifter) -> Option<String> {
        if self.use_registration_category {
            if let Some(label) = &lifter.registration_category {
                return Some(label.clone());
            }
        }
        let body_weight = lifter.body_weight?;
        self.category_for(lifter.gender, body_weight)
            .map(|c| c.name.clone())
    }

    /// The lifter's bodyweight coefficient. One for lifters at or above
    /// the reference weight; missing bodyweight yields no coefficient.
    pub fn coefficient(&self, lifter: &Lifter) -> Option<Decimal> {
        let body_weight = lifter.body_weight?;
        let constants = self.constants_for_gender(lifter.gender);
        if body_weight >= constants.b {
            return Some(Decimal::ONE);
        }
        let x = decimal_to_f64(body_weight / constants.b).log10();
        let a = decimal_to_f64(constants.a);
        let coefficient = 10f64.powf(a * x * x);
        Some(Decimal::from_f64_retain(coefficient).unwrap_or(Decimal::ONE))
    }
}

fn decimal_to_f64(x: Decimal) -> f64 {
    x.to_string().parse().unwrap_or(0.0)
}
