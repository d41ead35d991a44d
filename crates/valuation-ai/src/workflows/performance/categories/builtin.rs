use super::{CategoryProfile, WeightVector};
use crate::workflows::performance::domain::Metric;

/// Weights listed in `Metric::ALL` order.
fn weights(values: [f64; 16]) -> WeightVector {
    Metric::ALL.into_iter().zip(values).collect()
}

/// Declaration order is resolution priority. The default category is last.
pub(super) fn profiles() -> Vec<CategoryProfile> {
    vec![
        CategoryProfile::new(
            "Property Valuation",
            [
                "Senior Valuer",
                "Valuer",
                "Graduate Valuer",
                "Certified Practising Valuer",
                "Valuation Manager",
                "Director of Valuations",
            ],
            weights([
                0.06, 0.12, 0.05, 0.08, 0.06, 0.04, 0.03, 0.04, 0.05, 0.08, 0.04, 0.05, 0.10,
                0.10, 0.06, 0.04,
            ]),
        ),
        CategoryProfile::new(
            "Sales & Leasing",
            [
                "Sales Agent",
                "Leasing Consultant",
                "Business Development Manager",
                "Property Sales Manager",
            ],
            weights([
                0.10, 0.05, 0.05, 0.05, 0.10, 0.04, 0.03, 0.05, 0.18, 0.12, 0.04, 0.03, 0.03,
                0.10, 0.02, 0.01,
            ]),
        ),
        CategoryProfile::new(
            "Property Management",
            [
                "Property Manager",
                "Senior Property Manager",
                "Asset Manager",
                "Facilities Manager",
            ],
            weights([
                0.08, 0.07, 0.08, 0.10, 0.10, 0.05, 0.02, 0.06, 0.05, 0.12, 0.06, 0.03, 0.04,
                0.04, 0.06, 0.04,
            ]),
        ),
        CategoryProfile::new(
            "Research & Analytics",
            ["Research Analyst", "Data Analyst", "Market Analyst"],
            weights([
                0.07, 0.12, 0.06, 0.06, 0.05, 0.02, 0.10, 0.05, 0.02, 0.04, 0.05, 0.06, 0.15,
                0.10, 0.02, 0.03,
            ]),
        ),
        CategoryProfile::new(
            "Finance & Compliance",
            [
                "Accountant",
                "Financial Controller",
                "Compliance Officer",
                "Risk Manager",
            ],
            weights([
                0.06, 0.10, 0.07, 0.10, 0.05, 0.04, 0.02, 0.03, 0.03, 0.04, 0.04, 0.04, 0.08,
                0.03, 0.15, 0.12,
            ]),
        ),
        CategoryProfile::new(
            "Professional Services",
            [
                "Administrator",
                "Executive Assistant",
                "Office Manager",
                "Client Services Officer",
            ],
            weights([
                0.08, 0.08, 0.07, 0.08, 0.08, 0.06, 0.05, 0.06, 0.06, 0.08, 0.07, 0.05, 0.06,
                0.04, 0.04, 0.04,
            ]),
        ),
    ]
}
