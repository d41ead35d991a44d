use super::super::categories::WeightVector;
use super::super::domain::MetricSet;
use super::config::ScoringPolicy;
use super::MetricContribution;

/// Weighted mean of the metrics the weight vector covers.
pub(crate) fn performance_score(
    metrics: &MetricSet,
    weights: &WeightVector,
) -> (f64, Vec<MetricContribution>) {
    let mut contributions = Vec::with_capacity(weights.len());
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (metric, weight) in weights.iter() {
        let value = metrics.get(metric);
        let weighted = value * weight;
        weighted_sum += weighted;
        total_weight += weight;
        contributions.push(MetricContribution {
            metric,
            value,
            weight,
            weighted,
        });
    }

    // Category tables reject zero totals at construction.
    let score = if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    };

    (score, contributions)
}

pub(crate) fn value_score(
    performance: f64,
    years_experience: f64,
    annual_compensation: f64,
    policy: &ScoringPolicy,
) -> f64 {
    let salary_normalized =
        (annual_compensation / policy.reference_salary).min(policy.salary_cap_multiple);
    let experience_bonus = (years_experience / policy.reference_experience_years).min(1.0)
        * policy.max_experience_bonus;

    performance * (1.0 + experience_bonus) / (salary_normalized + 1.0)
}

pub(crate) fn composite_score(performance: f64, value: f64, policy: &ScoringPolicy) -> f64 {
    performance * policy.performance_blend + value * policy.value_blend
}
