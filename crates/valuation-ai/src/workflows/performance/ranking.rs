use super::categories::CategoryTable;
use super::domain::{ScoredSubject, Subject};
use super::scoring::ScoreCalculator;
use super::validation::{SubjectValidator, ValidationError};

/// Scores an owned population snapshot and orders it best to worst.
///
/// Every subject is validated before anything is scored, so a single bad record
/// rejects the whole call. Ranks run 1..=N without gaps; equal composite scores
/// keep their input order.
pub fn rank_population(
    subjects: Vec<Subject>,
    table: &CategoryTable,
    calculator: &ScoreCalculator,
) -> Result<Vec<ScoredSubject>, ValidationError> {
    let validator = SubjectValidator;
    for subject in &subjects {
        validator.validate_subject(subject)?;
    }

    let mut scored: Vec<ScoredSubject> = subjects
        .into_iter()
        .map(|subject| score_one(subject, table, calculator))
        .collect();

    // `sort_by` is stable, which preserves input order among ties.
    scored.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index + 1;
    }

    Ok(scored)
}

/// Scores one validated subject; the rank is assigned once the population is sorted.
fn score_one(
    subject: Subject,
    table: &CategoryTable,
    calculator: &ScoreCalculator,
) -> ScoredSubject {
    let resolved = table.resolve(&subject.role_title);
    let scores = calculator.score(&subject, resolved.weights());
    let rating = scores.rating();

    ScoredSubject {
        category: resolved.name().to_string(),
        matched_role: resolved.matched,
        performance_score: scores.performance_score,
        value_score: scores.value_score,
        composite_score: scores.composite_score,
        rank: 0,
        rating,
        contributions: scores.contributions,
        subject,
    }
}
