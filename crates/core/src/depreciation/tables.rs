//! Statutory depreciation tables.
//!
//! Each version applies to assets acquired from its first year until the
//! next version starts. A (year, group) pair with no entry has no rule.

use super::types::DepreciationMethod;

/// Coefficients of the accelerated method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceleratedCoefficients {
    /// Divisor of the first year.
    pub first_year: u32,
    /// Base divisor of later years.
    pub later_years: u32,
}

/// Statutory rule for one depreciation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRule {
    /// Depreciation group.
    pub group: u8,
    /// Prescribed life in years.
    pub life_years: u32,
    /// Coefficients, if the group may use the accelerated method.
    pub accelerated: Option<AcceleratedCoefficients>,
}

impl GroupRule {
    /// Returns true if the group allows `method`.
    #[must_use]
    pub fn allows(&self, method: DepreciationMethod) -> bool {
        match method {
            DepreciationMethod::StraightLine => true,
            DepreciationMethod::Accelerated => self.accelerated.is_some(),
        }
    }
}

struct TableVersion {
    valid_from_year: i32,
    rules: &'static [GroupRule],
}

const fn straight(group: u8, life_years: u32) -> GroupRule {
    GroupRule {
        group,
        life_years,
        accelerated: None,
    }
}

const fn accelerated(group: u8, life_years: u32, first_year: u32, later_years: u32) -> GroupRule {
    GroupRule {
        group,
        life_years,
        accelerated: Some(AcceleratedCoefficients {
            first_year,
            later_years,
        }),
    }
}

const RULES_2015: &[GroupRule] = &[
    straight(1, 4),
    accelerated(2, 6, 6, 7),
    accelerated(3, 8, 8, 9),
    straight(4, 12),
    straight(5, 20),
    straight(6, 40),
];

const RULES_2020: &[GroupRule] = &[
    straight(0, 2),
    straight(1, 4),
    accelerated(2, 6, 6, 7),
    accelerated(3, 8, 8, 9),
    straight(4, 12),
    straight(5, 20),
    straight(6, 40),
];

// Ordered by `valid_from_year`.
const TABLES: &[TableVersion] = &[
    TableVersion {
        valid_from_year: 2015,
        rules: RULES_2015,
    },
    TableVersion {
        valid_from_year: 2020,
        rules: RULES_2020,
    },
];

/// Looks up the rule for a group as of an acquisition year.
#[must_use]
pub fn group_rule(acquisition_year: i32, group: u8) -> Option<&'static GroupRule> {
    TABLES
        .iter()
        .rev()
        .find(|version| version.valid_from_year <= acquisition_year)?
        .rules
        .iter()
        .find(|rule| rule.group == group)
}
