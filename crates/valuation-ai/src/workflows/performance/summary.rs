use serde::Serialize;

use super::categories::CategoryTable;
use super::domain::{Metric, ScoredSubject, SubjectId};
use super::scoring::PerformanceRating;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHeadcount {
    pub category: String,
    pub headcount: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAverage {
    pub metric: Metric,
    pub label: &'static str,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub rating: PerformanceRating,
    pub label: &'static str,
    pub count: usize,
}

/// Aggregate view over a ranked population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub headcount: usize,
    pub mean_performance: f64,
    pub mean_value: f64,
    pub top_subject: Option<SubjectId>,
    pub category_headcount: Vec<CategoryHeadcount>,
    pub strongest_metric: Option<MetricAverage>,
    pub weakest_metric: Option<MetricAverage>,
    pub rating_distribution: Vec<RatingCount>,
}

impl PopulationSummary {
    /// Expects `rankings` in rank order, as returned by `rank_population`.
    pub fn from_rankings(rankings: &[ScoredSubject], table: &CategoryTable) -> Self {
        let headcount = rankings.len();

        let category_headcount = table
            .profiles()
            .iter()
            .map(|profile| CategoryHeadcount {
                category: profile.name.clone(),
                headcount: rankings
                    .iter()
                    .filter(|entry| entry.category == profile.name)
                    .count(),
            })
            .filter(|entry| entry.headcount > 0)
            .collect();

        let rating_distribution = PerformanceRating::ordered()
            .into_iter()
            .map(|rating| RatingCount {
                rating,
                label: rating.label(),
                count: rankings.iter().filter(|entry| entry.rating == rating).count(),
            })
            .collect();

        if headcount == 0 {
            return Self {
                headcount,
                mean_performance: 0.0,
                mean_value: 0.0,
                top_subject: None,
                category_headcount,
                strongest_metric: None,
                weakest_metric: None,
                rating_distribution,
            };
        }

        let count = headcount as f64;
        let mean_performance = rankings
            .iter()
            .map(|entry| entry.performance_score)
            .sum::<f64>()
            / count;
        let mean_value = rankings.iter().map(|entry| entry.value_score).sum::<f64>() / count;

        let averages: Vec<MetricAverage> = Metric::ALL
            .into_iter()
            .map(|metric| MetricAverage {
                metric,
                label: metric.label(),
                average: rankings
                    .iter()
                    .map(|entry| entry.subject.metrics.get(metric))
                    .sum::<f64>()
                    / count,
            })
            .collect();

        // First in canonical order wins on ties.
        let strongest_metric = averages
            .iter()
            .fold(None::<&MetricAverage>, |best, candidate| match best {
                Some(current) if current.average >= candidate.average => Some(current),
                _ => Some(candidate),
            })
            .cloned();
        let weakest_metric = averages
            .iter()
            .fold(None::<&MetricAverage>, |worst, candidate| match worst {
                Some(current) if current.average <= candidate.average => Some(current),
                _ => Some(candidate),
            })
            .cloned();

        Self {
            headcount,
            mean_performance,
            mean_value,
            top_subject: rankings.first().map(|entry| entry.subject.id.clone()),
            category_headcount,
            strongest_metric,
            weakest_metric,
            rating_distribution,
        }
    }
}
