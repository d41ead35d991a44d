use super::common::*;
use crate::workflows::performance::categories::{CategoryTable, WeightVector};
use crate::workflows::performance::domain::{Metric, MetricSet};
use crate::workflows::performance::scoring::{PerformanceRating, ScoreCalculator, ScoringPolicy};

#[test]
fn senior_valuer_with_uniform_sevens_scores_seven() {
    let table = table();
    let subject = subject("sv", "Senior Valuer", MetricSet::uniform(7.0));
    let resolved = table.resolve(&subject.role_title);
    assert_eq!(resolved.name(), "Property Valuation");

    let scores = calculator().score(&subject, resolved.weights());

    assert_close(scores.performance_score, 7.0);
    assert_close(scores.value_score, 7.7 / 1.5);
    assert!((scores.value_score - 5.133).abs() < 1e-3);
    assert_close(
        scores.composite_score,
        7.0 * 0.7 + (7.7 / 1.5) * 0.3,
    );
    assert_eq!(scores.rating(), PerformanceRating::MeetsExpectations);
}

#[test]
fn unknown_title_with_perfect_metrics_scores_ten() {
    let table = table();
    let subject = subject("unk", "Unknown Title", MetricSet::uniform(10.0));
    let resolved = table.resolve(&subject.role_title);
    assert!(!resolved.matched);
    assert_eq!(resolved.name(), "Professional Services");

    let scores = calculator().score(&subject, resolved.weights());

    assert_close(scores.performance_score, 10.0);
    assert_eq!(scores.rating(), PerformanceRating::Exceptional);
}

#[test]
fn performance_stays_within_metric_bounds() {
    let table = table();
    let calculator = calculator();
    for profile in table.profiles() {
        for seed in 0..50 {
            let subject = subject("b", "Valuer", varied_metrics(seed));
            let scores = calculator.score(&subject, &profile.weights);
            assert!(
                scores.performance_score >= 1.0 - EPSILON
                    && scores.performance_score <= 10.0 + EPSILON,
                "{} seed {seed}: {}",
                profile.name,
                scores.performance_score
            );
        }
    }

    let floor = subject("min", "Valuer", MetricSet::uniform(1.0));
    let weights = table.weights_for("Valuer");
    assert_close(calculator.score(&floor, weights).performance_score, 1.0);
}

#[test]
fn raising_a_weighted_metric_never_lowers_performance() {
    let table = table();
    let calculator = calculator();
    for profile in table.profiles() {
        let base = subject("m", "Valuer", varied_metrics(7));
        let baseline = calculator.score(&base, &profile.weights).performance_score;

        for metric in Metric::ALL {
            let current = base.metrics.get(metric);
            let mut raised = base.clone();
            raised.metrics.set(metric, (current + 1.0).min(10.0));
            let score = calculator.score(&raised, &profile.weights).performance_score;
            assert!(
                score >= baseline,
                "{} {:?}: {score} < {baseline}",
                profile.name,
                metric
            );
        }
    }
}

#[test]
fn scaling_weights_leaves_performance_unchanged() {
    let table = table();
    let calculator = calculator();
    let subject = subject("w", "Market Analyst", varied_metrics(3));
    let weights = table.weights_for(&subject.role_title);

    let base = calculator.score(&subject, weights).performance_score;
    for factor in [0.5, 3.5, 120.0] {
        let scaled = calculator
            .score(&subject, &weights.scaled(factor))
            .performance_score;
        assert_close(scaled, base);
    }
}

#[test]
fn absent_metrics_are_excluded_from_both_sums() {
    let weights: WeightVector = [(Metric::Quality, 2.0), (Metric::Compliance, 1.0)]
        .into_iter()
        .collect();
    let metrics = MetricSet::uniform(1.0)
        .with(Metric::Quality, 9.0)
        .with(Metric::Compliance, 3.0);
    let subject = subject("p", "Valuer", metrics);

    let scores = calculator().score(&subject, &weights);

    assert_close(scores.performance_score, (9.0 * 2.0 + 3.0) / 3.0);
    assert_eq!(scores.contributions.len(), 2);
    assert!(scores
        .contributions
        .iter()
        .any(|c| c.metric == Metric::Quality && c.weighted == 18.0));
}

#[test]
fn higher_salary_never_raises_value() {
    let table = table();
    let calculator = calculator();
    let weights = table.weights_for("Valuer");
    let mut previous = f64::INFINITY;

    for salary in [20_000.0, 80_000.0, 150_000.0, 200_000.0, 399_999.0, 400_000.0, 2_000_000.0] {
        let mut subject = subject("s", "Valuer", varied_metrics(11));
        subject.annual_compensation = salary;
        let value = calculator.score(&subject, weights).value_score;
        assert!(value <= previous, "salary {salary}: {value} > {previous}");
        previous = value;
    }
}

#[test]
fn salaries_beyond_the_cap_share_a_value_score() {
    let table = table();
    let calculator = calculator();
    let weights = table.weights_for("Senior Valuer");

    let mut high = subject("h", "Senior Valuer", MetricSet::uniform(8.0));
    high.annual_compensation = 500_000.0;
    let mut higher = high.clone();
    higher.annual_compensation = 1_000_000.0;

    let high_value = calculator.score(&high, weights).value_score;
    let higher_value = calculator.score(&higher, weights).value_score;

    assert_eq!(high_value, higher_value);
    assert_close(high_value, 8.0 * 1.1 / 3.0);
}

#[test]
fn experience_bonus_caps_at_twenty_percent() {
    let table = table();
    let calculator = calculator();
    let weights = table.weights_for("Valuer");

    let mut veteran = subject("v", "Valuer", MetricSet::uniform(6.0));
    veteran.years_experience = 35.0;
    veteran.annual_compensation = 200_000.0;
    let mut novice = veteran.clone();
    novice.years_experience = 0.0;

    assert_close(calculator.score(&veteran, weights).value_score, 6.0 * 1.2 / 2.0);
    assert_close(calculator.score(&novice, weights).value_score, 6.0 / 2.0);
}

#[test]
fn custom_policy_changes_reference_salary() {
    let policy = ScoringPolicy {
        reference_salary: 100_000.0,
        ..ScoringPolicy::default()
    };
    let calculator = ScoreCalculator::new(policy);
    let table = CategoryTable::builtin();
    let subject = subject("c", "Senior Valuer", MetricSet::uniform(7.0));

    let scores = calculator.score(&subject, table.weights_for("Senior Valuer"));

    // salary normalised to 1.0 instead of 0.5
    assert_close(scores.value_score, 7.7 / 2.0);
}
