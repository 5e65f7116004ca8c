use clap::ValueEnum;
use foreboard_core::{
    AccuracyCategory, AccuracyCount, FilterOptions, RegulationCount, RoundSummary,
};
use serde::Serialize;

/// What the dashboard is showing. Each maps to one pipeline call plus a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Scores,
    ScoreToPar,
    Accuracy,
    InRegulation,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Scores => "Scores",
            Metric::ScoreToPar => "ScoreToPar",
            Metric::Accuracy => "Accuracy",
            Metric::InRegulation => "In Regulation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParScore {
    pub par: i64,
    pub mean_score_to_par: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyRow {
    pub shot: &'static str,
    pub category: AccuracyCategory,
    pub par: i64,
    pub count: usize,
}

impl AccuracyRow {
    pub fn from_counts(shot: &'static str, counts: Vec<AccuracyCount>) -> Vec<Self> {
        counts
            .into_iter()
            .map(|entry| AccuracyRow {
                shot,
                category: entry.category,
                par: entry.par,
                count: entry.count,
            })
            .collect()
    }
}

/// Rendered output of one interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Most recent round first.
    Rounds(Vec<RoundSummary>),
    ScoreToPar(Vec<ParScore>),
    Accuracy(Vec<AccuracyRow>),
    InRegulation(Vec<RegulationCount>),
    Options(FilterOptions),
}
