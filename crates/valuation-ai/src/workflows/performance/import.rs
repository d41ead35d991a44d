//! CSV import for assessment exports.
//!
//! Expected headers: `id, display_name, role_title, years_experience,
//! annual_compensation` followed by one column per metric key (see `Metric::key`).

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{MetricSet, Subject, SubjectId};
use super::service::next_subject_id;
use super::validation::{SubjectValidator, ValidationError};

#[derive(Debug)]
pub enum SubjectImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Validation { row: usize, source: ValidationError },
}

impl std::fmt::Display for SubjectImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectImportError::Io(err) => write!(f, "failed to read assessment export: {}", err),
            SubjectImportError::Csv(err) => write!(f, "invalid assessment CSV data: {}", err),
            SubjectImportError::Validation { row, source } => {
                write!(f, "row {} rejected: {}", row, source)
            }
        }
    }
}

impl std::error::Error for SubjectImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubjectImportError::Io(err) => Some(err),
            SubjectImportError::Csv(err) => Some(err),
            SubjectImportError::Validation { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for SubjectImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SubjectImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct SubjectCsvImporter;

impl SubjectCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Subject>, SubjectImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses and validates every row. Row numbers in errors are 1-based and
    /// exclude the header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Subject>, SubjectImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let validator = SubjectValidator;
        let mut subjects = Vec::new();

        for (index, record) in csv_reader.deserialize::<SubjectRow>().enumerate() {
            let subject = record?.into_subject();
            validator
                .validate_subject(&subject)
                .map_err(|source| SubjectImportError::Validation {
                    row: index + 1,
                    source,
                })?;
            subjects.push(subject);
        }

        Ok(subjects)
    }
}

// Metric columns stay flat: csv hands flattened fields over as strings, which
// would break the numeric deserialisation.
#[derive(Debug, Deserialize)]
struct SubjectRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    display_name: String,
    role_title: String,
    years_experience: f64,
    annual_compensation: f64,
    productivity: f64,
    quality: f64,
    efficiency: f64,
    reliability: f64,
    communication: f64,
    leadership: f64,
    innovation: f64,
    adaptability: f64,
    revenue_generation: f64,
    client_satisfaction: f64,
    team_collaboration: f64,
    professional_development: f64,
    technical_skills: f64,
    market_knowledge: f64,
    compliance: f64,
    risk_management: f64,
}

impl SubjectRow {
    fn into_subject(self) -> Subject {
        let id = self.id.map(SubjectId).unwrap_or_else(next_subject_id);
        Subject {
            id,
            display_name: self.display_name,
            role_title: self.role_title,
            years_experience: self.years_experience,
            annual_compensation: self.annual_compensation,
            metrics: MetricSet {
                productivity: self.productivity,
                quality: self.quality,
                efficiency: self.efficiency,
                reliability: self.reliability,
                communication: self.communication,
                leadership: self.leadership,
                innovation: self.innovation,
                adaptability: self.adaptability,
                revenue_generation: self.revenue_generation,
                client_satisfaction: self.client_satisfaction,
                team_collaboration: self.team_collaboration,
                professional_development: self.professional_development,
                technical_skills: self.technical_skills,
                market_knowledge: self.market_knowledge,
                compliance: self.compliance,
                risk_management: self.risk_management,
            },
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
