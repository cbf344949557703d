use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// A bodyweight category as configured by the rules collaborator. Open
/// bounds cover the lightest ("up to") and heaviest ("over") classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub gender: Gender,
    pub weight_class_min: Option<Decimal>,
    pub weight_class_max: Option<Decimal>,
    /// Minimum qualifying total for entries in this category, when the
    /// federation enforces one.
    pub minimum_qualifying_total: Option<Decimal>,
}

impl Category {
    /// Whether a weighed-in lifter falls into this category. The lower
    /// bound is exclusive, the upper bound inclusive, matching how
    /// weight classes are printed (e.g. ">69kg-77kg").
    pub fn matches(&self, gender: Gender, body_weight: Decimal) -> bool {
        if gender != self.gender {
            return false;
        }
        if let Some(min) = self.weight_class_min {
            if body_weight <= min {
                return false;
            }
        }
        if let Some(max) = self.weight_class_max {
            if body_weight > max {
                return false;
            }
        }
        true
    }
}
