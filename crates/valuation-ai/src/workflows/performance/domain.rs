use serde::{Deserialize, Serialize};

use super::scoring::{MetricContribution, PerformanceRating};

/// The sixteen assessed dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Productivity,
    Quality,
    Efficiency,
    Reliability,
    Communication,
    Leadership,
    Innovation,
    Adaptability,
    RevenueGeneration,
    ClientSatisfaction,
    TeamCollaboration,
    ProfessionalDevelopment,
    TechnicalSkills,
    MarketKnowledge,
    Compliance,
    RiskManagement,
}

impl Metric {
    pub const ALL: [Metric; 16] = [
        Metric::Productivity,
        Metric::Quality,
        Metric::Efficiency,
        Metric::Reliability,
        Metric::Communication,
        Metric::Leadership,
        Metric::Innovation,
        Metric::Adaptability,
        Metric::RevenueGeneration,
        Metric::ClientSatisfaction,
        Metric::TeamCollaboration,
        Metric::ProfessionalDevelopment,
        Metric::TechnicalSkills,
        Metric::MarketKnowledge,
        Metric::Compliance,
        Metric::RiskManagement,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Metric::Productivity => "Productivity",
            Metric::Quality => "Quality",
            Metric::Efficiency => "Efficiency",
            Metric::Reliability => "Reliability",
            Metric::Communication => "Communication",
            Metric::Leadership => "Leadership",
            Metric::Innovation => "Innovation",
            Metric::Adaptability => "Adaptability",
            Metric::RevenueGeneration => "Revenue Generation",
            Metric::ClientSatisfaction => "Client Satisfaction",
            Metric::TeamCollaboration => "Team Collaboration",
            Metric::ProfessionalDevelopment => "Professional Development",
            Metric::TechnicalSkills => "Technical Skills",
            Metric::MarketKnowledge => "Market Knowledge",
            Metric::Compliance => "Compliance",
            Metric::RiskManagement => "Risk Management",
        }
    }

    /// Field name used in JSON payloads and CSV headers.
    pub const fn key(self) -> &'static str {
        match self {
            Metric::Productivity => "productivity",
            Metric::Quality => "quality",
            Metric::Efficiency => "efficiency",
            Metric::Reliability => "reliability",
            Metric::Communication => "communication",
            Metric::Leadership => "leadership",
            Metric::Innovation => "innovation",
            Metric::Adaptability => "adaptability",
            Metric::RevenueGeneration => "revenue_generation",
            Metric::ClientSatisfaction => "client_satisfaction",
            Metric::TeamCollaboration => "team_collaboration",
            Metric::ProfessionalDevelopment => "professional_development",
            Metric::TechnicalSkills => "technical_skills",
            Metric::MarketKnowledge => "market_knowledge",
            Metric::Compliance => "compliance",
            Metric::RiskManagement => "risk_management",
        }
    }
}

/// Assessed scores on a 1-10 scale. Every field is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub productivity: f64,
    pub quality: f64,
    pub efficiency: f64,
    pub reliability: f64,
    pub communication: f64,
    pub leadership: f64,
    pub innovation: f64,
    pub adaptability: f64,
    pub revenue_generation: f64,
    pub client_satisfaction: f64,
    pub team_collaboration: f64,
    pub professional_development: f64,
    pub technical_skills: f64,
    pub market_knowledge: f64,
    pub compliance: f64,
    pub risk_management: f64,
}

impl MetricSet {
    pub const MIN_SCORE: f64 = 1.0;
    pub const MAX_SCORE: f64 = 10.0;

    /// Every metric set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self {
            productivity: value,
            quality: value,
            efficiency: value,
            reliability: value,
            communication: value,
            leadership: value,
            innovation: value,
            adaptability: value,
            revenue_generation: value,
            client_satisfaction: value,
            team_collaboration: value,
            professional_development: value,
            technical_skills: value,
            market_knowledge: value,
            compliance: value,
            risk_management: value,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Productivity => self.productivity,
            Metric::Quality => self.quality,
            Metric::Efficiency => self.efficiency,
            Metric::Reliability => self.reliability,
            Metric::Communication => self.communication,
            Metric::Leadership => self.leadership,
            Metric::Innovation => self.innovation,
            Metric::Adaptability => self.adaptability,
            Metric::RevenueGeneration => self.revenue_generation,
            Metric::ClientSatisfaction => self.client_satisfaction,
            Metric::TeamCollaboration => self.team_collaboration,
            Metric::ProfessionalDevelopment => self.professional_development,
            Metric::TechnicalSkills => self.technical_skills,
            Metric::MarketKnowledge => self.market_knowledge,
            Metric::Compliance => self.compliance,
            Metric::RiskManagement => self.risk_management,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        let slot = match metric {
            Metric::Productivity => &mut self.productivity,
            Metric::Quality => &mut self.quality,
            Metric::Efficiency => &mut self.efficiency,
            Metric::Reliability => &mut self.reliability,
            Metric::Communication => &mut self.communication,
            Metric::Leadership => &mut self.leadership,
            Metric::Innovation => &mut self.innovation,
            Metric::Adaptability => &mut self.adaptability,
            Metric::RevenueGeneration => &mut self.revenue_generation,
            Metric::ClientSatisfaction => &mut self.client_satisfaction,
            Metric::TeamCollaboration => &mut self.team_collaboration,
            Metric::ProfessionalDevelopment => &mut self.professional_development,
            Metric::TechnicalSkills => &mut self.technical_skills,
            Metric::MarketKnowledge => &mut self.market_knowledge,
            Metric::Compliance => &mut self.compliance,
            Metric::RiskManagement => &mut self.risk_management,
        };
        *slot = value;
    }

    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |metric| (metric, self.get(metric)))
    }
}

/// Identifier wrapper for assessed staff members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inbound assessment before the service assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectDraft {
    pub display_name: String,
    pub role_title: String,
    pub years_experience: f64,
    pub annual_compensation: f64,
    pub metrics: MetricSet,
}

impl SubjectDraft {
    pub fn into_subject(self, id: SubjectId) -> Subject {
        Subject {
            id,
            display_name: self.display_name,
            role_title: self.role_title,
            years_experience: self.years_experience,
            annual_compensation: self.annual_compensation,
            metrics: self.metrics,
        }
    }
}

/// A staff member being scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub display_name: String,
    pub role_title: String,
    pub years_experience: f64,
    pub annual_compensation: f64,
    pub metrics: MetricSet,
}

/// Population-relative view of a subject. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSubject {
    pub subject: Subject,
    pub category: String,
    pub matched_role: bool,
    pub performance_score: f64,
    pub value_score: f64,
    pub composite_score: f64,
    pub rank: usize,
    pub rating: PerformanceRating,
    pub contributions: Vec<MetricContribution>,
}
