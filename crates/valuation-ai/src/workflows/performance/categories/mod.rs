//! Job-category profiles and the role-title resolver.
//!
//! The table is validated once when it is built and is read-only afterwards, so a
//! single `Arc<CategoryTable>` can be shared across request handlers without locking.

mod builtin;
mod loader;

pub use loader::CategoryTableFile;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::Metric;

/// Non-negative weight per metric. Metrics missing from the map are ignored by the
/// calculator rather than treated as zero-weighted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(BTreeMap<Metric, f64>);

impl WeightVector {
    pub fn new(weights: BTreeMap<Metric, f64>) -> Self {
        Self(weights)
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.0.get(&metric).copied()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(metric, weight)| (*metric, weight * factor))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.0.iter().map(|(metric, weight)| (*metric, *weight))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Metric, f64)> for WeightVector {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A named job category, the role titles that belong to it, and its weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryProfile {
    pub name: String,
    pub roles: BTreeSet<String>,
    pub weights: WeightVector,
}

impl CategoryProfile {
    pub fn new<I, S>(name: impl Into<String>, roles: I, weights: WeightVector) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
            weights,
        }
    }

    pub fn contains_role(&self, role_title: &str) -> bool {
        self.roles.contains(role_title)
    }
}

/// Configuration errors detected while building a category table.
#[derive(Debug, thiserror::Error)]
pub enum CategoryTableError {
    #[error("category table has no profiles")]
    Empty,
    #[error("category '{category}' has invalid weight {value} for {metric:?}")]
    InvalidWeight {
        category: String,
        metric: Metric,
        value: f64,
    },
    #[error("category '{category}' has a total weight of zero")]
    ZeroTotalWeight { category: String },
    #[error("category '{category}' has a total weight that is not finite")]
    NonFiniteTotalWeight { category: String },
    #[error("category '{category}' is declared more than once")]
    DuplicateCategory { category: String },
    #[error("default category '{name}' is not declared in the table")]
    MissingDefault { name: String },
    #[error("failed to read category table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid category table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of resolving a role title against the table.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCategory<'a> {
    pub profile: &'a CategoryProfile,
    /// `false` when the role matched nothing and the default profile was used.
    pub matched: bool,
}

impl<'a> ResolvedCategory<'a> {
    pub fn weights(&self) -> &'a WeightVector {
        &self.profile.weights
    }

    pub fn name(&self) -> &'a str {
        &self.profile.name
    }
}

/// Ordered, validated category profiles with a designated fallback.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    profiles: Vec<CategoryProfile>,
    default_index: usize,
}

impl CategoryTable {
    pub const DEFAULT_CATEGORY: &'static str = "Professional Services";

    pub fn new(
        profiles: Vec<CategoryProfile>,
        default_category: &str,
    ) -> Result<Self, CategoryTableError> {
        if profiles.is_empty() {
            return Err(CategoryTableError::Empty);
        }

        let mut seen = HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.name.as_str()) {
                return Err(CategoryTableError::DuplicateCategory {
                    category: profile.name.clone(),
                });
            }

            for (metric, value) in profile.weights.iter() {
                if !value.is_finite() || value < 0.0 {
                    return Err(CategoryTableError::InvalidWeight {
                        category: profile.name.clone(),
                        metric,
                        value,
                    });
                }
            }

            let total = profile.weights.total();
            if !total.is_finite() {
                return Err(CategoryTableError::NonFiniteTotalWeight {
                    category: profile.name.clone(),
                });
            }
            if total <= 0.0 {
                return Err(CategoryTableError::ZeroTotalWeight {
                    category: profile.name.clone(),
                });
            }
        }

        let default_index = profiles
            .iter()
            .position(|profile| profile.name == default_category)
            .ok_or_else(|| CategoryTableError::MissingDefault {
                name: default_category.to_string(),
            })?;

        Ok(Self {
            profiles,
            default_index,
        })
    }

    /// The standard valuation-practice categories.
    pub fn builtin() -> Self {
        let profiles = builtin::profiles();
        let default_index = profiles.len() - 1;
        Self {
            profiles,
            default_index,
        }
    }

    pub fn profiles(&self) -> &[CategoryProfile] {
        &self.profiles
    }

    pub fn default_profile(&self) -> &CategoryProfile {
        &self.profiles[self.default_index]
    }

    pub fn get(&self, name: &str) -> Option<&CategoryProfile> {
        self.profiles.iter().find(|profile| profile.name == name)
    }

    /// First profile, in declaration order, whose role set contains `role_title`
    /// exactly (case-sensitive). Falls back to the default profile.
    pub fn resolve(&self, role_title: &str) -> ResolvedCategory<'_> {
        match self
            .profiles
            .iter()
            .find(|profile| profile.contains_role(role_title))
        {
            Some(profile) => ResolvedCategory {
                profile,
                matched: true,
            },
            None => {
                let profile = self.default_profile();
                debug!(
                    role_title,
                    category = %profile.name,
                    "role title not mapped, using default category"
                );
                ResolvedCategory {
                    profile,
                    matched: false,
                }
            }
        }
    }

    pub fn weights_for(&self, role_title: &str) -> &WeightVector {
        self.resolve(role_title).weights()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(pairs: &[(Metric, f64)]) -> WeightVector {
        pairs.iter().copied().collect()
    }

    fn profile(name: &str, roles: &[&str], pairs: &[(Metric, f64)]) -> CategoryProfile {
        CategoryProfile::new(name, roles.iter().copied(), weights(pairs))
    }

    #[test]
    fn builtin_table_declares_default_and_valuation_first() {
        let table = CategoryTable::builtin();
        assert_eq!(table.profiles()[0].name, "Property Valuation");
        assert_eq!(table.default_profile().name, "Professional Services");
        for profile in table.profiles() {
            assert_eq!(profile.weights.len(), Metric::ALL.len(), "{}", profile.name);
            assert!((profile.weights.total() - 1.0).abs() < 1e-9, "{}", profile.name);
        }
    }

    #[test]
    fn builtin_table_passes_startup_validation() {
        let validated = CategoryTable::new(builtin::profiles(), CategoryTable::DEFAULT_CATEGORY)
            .expect("builtin table validates");
        let builtin = CategoryTable::builtin();
        assert_eq!(validated.profiles(), builtin.profiles());
        assert_eq!(validated.default_profile(), builtin.default_profile());
    }

    #[test]
    fn resolve_matches_exact_role_titles() {
        let table = CategoryTable::builtin();
        let resolved = table.resolve("Senior Valuer");
        assert!(resolved.matched);
        assert_eq!(resolved.name(), "Property Valuation");

        let resolved = table.resolve("Leasing Consultant");
        assert_eq!(resolved.name(), "Sales & Leasing");
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let table = CategoryTable::builtin();
        let resolved = table.resolve("senior valuer");
        assert!(!resolved.matched);
        assert_eq!(resolved.name(), CategoryTable::DEFAULT_CATEGORY);
    }

    #[test]
    fn unmatched_role_silently_falls_back_to_professional_services() {
        let table = CategoryTable::builtin();
        let first = table.weights_for("Nonexistent Role").clone();
        for _ in 0..5 {
            assert_eq!(table.weights_for("Nonexistent Role"), &first);
        }
        assert_eq!(&first, &table.default_profile().weights);
        assert_eq!(
            table.resolve("Nonexistent Role").name(),
            "Professional Services"
        );
    }

    #[test]
    fn earlier_declaration_wins_when_roles_overlap() {
        let table = CategoryTable::new(
            vec![
                profile("First", &["Analyst"], &[(Metric::Quality, 1.0)]),
                profile("Second", &["Analyst"], &[(Metric::Innovation, 1.0)]),
            ],
            "Second",
        )
        .expect("valid table");

        assert_eq!(table.resolve("Analyst").name(), "First");
    }

    #[test]
    fn zero_total_weight_is_a_configuration_error() {
        let err = CategoryTable::new(
            vec![profile("Idle", &["Intern"], &[(Metric::Quality, 0.0)])],
            "Idle",
        )
        .expect_err("zero weights rejected");
        assert!(matches!(err, CategoryTableError::ZeroTotalWeight { category } if category == "Idle"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = CategoryTable::new(
            vec![profile(
                "Broken",
                &["Intern"],
                &[(Metric::Quality, 1.0), (Metric::Leadership, -0.5)],
            )],
            "Broken",
        )
        .expect_err("negative weight rejected");
        assert!(matches!(
            err,
            CategoryTableError::InvalidWeight {
                metric: Metric::Leadership,
                ..
            }
        ));
    }

    #[test]
    fn missing_default_is_rejected() {
        let err = CategoryTable::new(
            vec![profile("Only", &["Intern"], &[(Metric::Quality, 1.0)])],
            "Professional Services",
        )
        .expect_err("default must exist");
        assert!(matches!(err, CategoryTableError::MissingDefault { .. }));
    }

    #[test]
    fn duplicate_and_empty_tables_are_rejected() {
        assert!(matches!(
            CategoryTable::new(Vec::new(), "Any"),
            Err(CategoryTableError::Empty)
        ));

        let err = CategoryTable::new(
            vec![
                profile("Twice", &["A"], &[(Metric::Quality, 1.0)]),
                profile("Twice", &["B"], &[(Metric::Quality, 1.0)]),
            ],
            "Twice",
        )
        .expect_err("duplicate rejected");
        assert!(matches!(err, CategoryTableError::DuplicateCategory { .. }));
    }
}
