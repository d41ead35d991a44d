use crate::infra::{load_category_table, InMemorySubjectRepository};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use valuation_ai::config::AppConfig;
use valuation_ai::error::AppError;
use valuation_ai::workflows::performance::{
    CategoryTable, Metric, MetricSet, PerformanceService, RankingSnapshot, ScoredSubject,
    ScoringPolicy, SubjectCsvImporter, SubjectDraft,
};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Assessment export with one subject per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the ranking snapshot as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
    /// Category table JSON file (overrides SCORING_CATEGORIES_PATH)
    #[arg(long)]
    pub(crate) categories: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print per-metric contributions for the top-ranked subject.
    #[arg(long)]
    pub(crate) contributions: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        csv,
        json,
        categories,
    } = args;

    let config = AppConfig::load()?;
    let table = load_category_table(categories.as_deref(), &config.scoring)?;
    let service = PerformanceService::new(
        Arc::new(InMemorySubjectRepository::default()),
        Arc::new(table),
        config.scoring.policy,
    );

    for subject in SubjectCsvImporter::from_path(&csv)? {
        service.register(subject)?;
    }

    let snapshot = service.rankings()?;
    if json {
        let payload = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        println!("{}", payload);
    } else {
        println!("Ranking for {}", csv.display());
        render_snapshot(&snapshot);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = PerformanceService::new(
        Arc::new(InMemorySubjectRepository::default()),
        Arc::new(CategoryTable::builtin()),
        ScoringPolicy::default(),
    );

    println!("Workforce scoring demo");
    for draft in sample_team() {
        match service.submit(draft) {
            Ok(subject) => println!(
                "  Registered {} ({}) as {}",
                subject.display_name, subject.role_title, subject.id
            ),
            Err(err) => println!("  Submission rejected: {}", err),
        }
    }

    let snapshot = service.rankings()?;
    render_snapshot(&snapshot);

    if args.contributions {
        if let Some(top) = snapshot.rankings.first() {
            render_contributions(top);
        }
    }

    let candidate = SubjectDraft {
        display_name: "Prospective Hire".to_string(),
        role_title: "Graduate Valuer".to_string(),
        years_experience: 1.0,
        annual_compensation: 68_000.0,
        metrics: MetricSet::uniform(6.5)
            .with(Metric::TechnicalSkills, 7.5)
            .with(Metric::Leadership, 4.0),
    };
    let preview = service.score(&candidate)?;
    println!(
        "\nWhat-if score for {} ({}): performance {:.2}, value {:.2}, composite {:.2} [{}]",
        candidate.display_name,
        preview.category,
        preview.scores.performance_score,
        preview.scores.value_score,
        preview.scores.composite_score,
        preview.rating.label()
    );

    Ok(())
}

fn render_snapshot(snapshot: &RankingSnapshot) {
    println!(
        "Generated at {}",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    if snapshot.rankings.is_empty() {
        println!("\nNo subjects to rank");
        return;
    }

    println!(
        "\n{:>4}  {:<22} {:<24} {:<22} {:>6} {:>6} {:>6}  Rating",
        "Rank", "Name", "Role", "Category", "Perf", "Value", "Comp"
    );
    for entry in &snapshot.rankings {
        // '*' marks a role that fell back to the default category.
        let marker = if entry.matched_role { ' ' } else { '*' };
        println!(
            "{:>4}  {:<22} {:<24} {:<21}{} {:>6.2} {:>6.2} {:>6.2}  {}",
            entry.rank,
            entry.subject.display_name,
            entry.subject.role_title,
            entry.category,
            marker,
            entry.performance_score,
            entry.value_score,
            entry.composite_score,
            entry.rating.label()
        );
    }

    let summary = &snapshot.summary;
    println!(
        "\nHeadcount {} | mean performance {:.2} | mean value {:.2}",
        summary.headcount, summary.mean_performance, summary.mean_value
    );

    println!("\nCategory mix:");
    for entry in &summary.category_headcount {
        println!("  - {}: {}", entry.category, entry.headcount);
    }

    if let (Some(strongest), Some(weakest)) = (&summary.strongest_metric, &summary.weakest_metric)
    {
        println!(
            "\nStrongest metric: {} ({:.2}); weakest metric: {} ({:.2})",
            strongest.label, strongest.average, weakest.label, weakest.average
        );
    }

    println!("\nRating distribution:");
    for bucket in &summary.rating_distribution {
        println!("  - {}: {}", bucket.label, bucket.count);
    }
}

fn render_contributions(entry: &ScoredSubject) {
    println!(
        "\nContribution breakdown for {} ({})",
        entry.subject.display_name, entry.category
    );
    for contribution in &entry.contributions {
        println!(
            "  - {:<26} score {:>4.1} x weight {:.3} = {:.3}",
            contribution.metric.label(),
            contribution.value,
            contribution.weight,
            contribution.weighted
        );
    }
}

fn sample_team() -> Vec<SubjectDraft> {
    vec![
        SubjectDraft {
            display_name: "Avery Chen".to_string(),
            role_title: "Senior Valuer".to_string(),
            years_experience: 12.0,
            annual_compensation: 145_000.0,
            metrics: MetricSet::uniform(8.0)
                .with(Metric::Quality, 9.0)
                .with(Metric::MarketKnowledge, 9.5)
                .with(Metric::Innovation, 6.0),
        },
        SubjectDraft {
            display_name: "Sam Patel".to_string(),
            role_title: "Leasing Consultant".to_string(),
            years_experience: 3.0,
            annual_compensation: 72_000.0,
            metrics: MetricSet::uniform(7.0)
                .with(Metric::RevenueGeneration, 9.0)
                .with(Metric::ClientSatisfaction, 8.5),
        },
        SubjectDraft {
            display_name: "Jordan Okafor".to_string(),
            role_title: "Property Manager".to_string(),
            years_experience: 7.0,
            annual_compensation: 98_000.0,
            metrics: MetricSet::uniform(7.5).with(Metric::Reliability, 9.0),
        },
        SubjectDraft {
            display_name: "Morgan Diaz".to_string(),
            role_title: "Research Analyst".to_string(),
            years_experience: 5.0,
            annual_compensation: 88_000.0,
            metrics: MetricSet::uniform(7.0)
                .with(Metric::TechnicalSkills, 9.0)
                .with(Metric::Leadership, 5.0),
        },
        SubjectDraft {
            display_name: "Riley Ng".to_string(),
            role_title: "Office Coordinator".to_string(),
            years_experience: 2.0,
            annual_compensation: 60_000.0,
            metrics: MetricSet::uniform(6.0).with(Metric::TeamCollaboration, 8.0),
        },
    ]
}
