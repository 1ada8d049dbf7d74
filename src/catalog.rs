//! Fixed sample content shown by the assistant.
//!
//! Nothing here is computed. The [`Catalog`] is built once and handed to the
//! workflow and the chat session, so neither carries literals of its own.
//! A replacement catalog can be loaded from a TOML file.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MaestroError;

/// Tone of an insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Warning,
    Neutral,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
            Polarity::Warning => write!(f, "warning"),
            Polarity::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub polarity: Polarity,
}

/// A supplementary document listed next to the session's uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleFile {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialMetric {
    pub category: String,
    pub value: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default = "default_trend")]
    pub trend: Trend,
}

fn default_trend() -> Trend {
    Trend::Neutral
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedQuery {
    pub title: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Cards shown once summarization finishes.
    pub summary_insights: Vec<Insight>,
    /// Supplementary files appended to the processed-file list.
    pub sample_files: Vec<SampleFile>,
    /// Metrics returned for every chat query.
    pub metrics: Vec<FinancialMetric>,
    /// Insights shown beside a chat metrics result.
    pub related_insights: Vec<Insight>,
    pub suggested_queries: Vec<SuggestedQuery>,
}

impl Catalog {
    pub fn from_toml_str(contents: &str) -> Result<Self, MaestroError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load(path: &Path) -> Result<Self, MaestroError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

fn insight(title: &str, description: &str, polarity: Polarity) -> Insight {
    Insight {
        title: title.to_string(),
        description: description.to_string(),
        polarity,
    }
}

fn metric(category: &str, value: &str, details: &str, trend: Trend) -> FinancialMetric {
    FinancialMetric {
        category: category.to_string(),
        value: value.to_string(),
        details: Some(details.to_string()),
        trend,
    }
}

fn sample(name: &str, size_label: &str) -> SampleFile {
    SampleFile {
        name: name.to_string(),
        size_label: size_label.to_string(),
    }
}

fn suggestion(title: &str, query: &str) -> SuggestedQuery {
    SuggestedQuery {
        title: title.to_string(),
        query: query.to_string(),
    }
}

fn banking_insights() -> Vec<Insight> {
    vec![
        insight(
            "Strong Noninterest Income Growth",
            "Noninterest income up 12% YoY indicates successful fee-based revenue diversification",
            Polarity::Positive,
        ),
        insight(
            "Net Interest Income Pressure",
            "Consider strategies to mitigate 11% YoY decline in net interest income",
            Polarity::Negative,
        ),
        insight(
            "Credit Quality Watch",
            "Monitor CRE exposure given increased net charge-offs",
            Polarity::Warning,
        ),
        insight(
            "Capital Position",
            "Strong CET1 ratio at 11.3% provides flexibility for growth initiatives",
            Polarity::Neutral,
        ),
    ]
}

impl Default for Catalog {
    fn default() -> Self {
        let mut related_insights = banking_insights();
        related_insights.extend([
            insight(
                "Premium Growth Analysis",
                "Written premium growth at 8.5% shows strong market penetration",
                Polarity::Positive,
            ),
            insight(
                "Catastrophe Impact",
                "Catastrophe losses of $850M require risk mitigation review",
                Polarity::Warning,
            ),
            insight(
                "Reserve Development",
                "Favorable reserve development of $220M indicates strong underwriting",
                Polarity::Positive,
            ),
        ]);

        Self {
            summary_insights: banking_insights(),
            sample_files: vec![
                sample("q3-2024-earnings-report.pdf", "2.8 MB"),
                sample("market-trend-analysis-2024.pdf", "3.2 MB"),
                sample("competitor-performance-q3.pdf", "2.5 MB"),
                sample("industry-outlook-2024.pdf", "4.1 MB"),
                sample("risk-assessment-q3-2024.pdf", "1.9 MB"),
            ],
            metrics: vec![
                metric(
                    "Financial Performance",
                    "Net Income: $5.1 billion",
                    "$1.42 per share",
                    Trend::Up,
                ),
                metric(
                    "Financial Performance",
                    "Revenue: $20.4 billion",
                    "2% YoY decline",
                    Trend::Down,
                ),
                metric(
                    "Financial Performance",
                    "Net Interest Income",
                    "Decreased by 11%",
                    Trend::Down,
                ),
                metric(
                    "Financial Performance",
                    "Noninterest Income",
                    "Increased by 12%",
                    Trend::Up,
                ),
                metric(
                    "Credit Quality",
                    "Credit Loss Provisions",
                    "$1.1 billion set aside",
                    Trend::Neutral,
                ),
                metric(
                    "Credit Quality",
                    "Net Loan Charge-Offs",
                    "Rose to 0.49% of average loans",
                    Trend::Up,
                ),
                metric(
                    "Loans and Deposits",
                    "Average Loans",
                    "$910.3 billion (down 3% YoY)",
                    Trend::Down,
                ),
                metric(
                    "Loans and Deposits",
                    "Average Deposits",
                    "Stable at $1.3 trillion",
                    Trend::Neutral,
                ),
            ],
            related_insights,
            suggested_queries: vec![
                suggestion("Revenue Analysis", "What was the total revenue in Q3 2024?"),
                suggestion("Interest Income", "How did net interest income perform?"),
                suggestion("Segment Performance", "Show segment performance metrics"),
                suggestion("Credit Quality", "What are the credit quality indicators?"),
                suggestion("Premium Growth", "Show written premium growth trends"),
                suggestion("Catastrophe Impact", "Detail catastrophe losses for Q3"),
                suggestion("Reserve Development", "Explain reserve development trends"),
            ],
        }
    }
}
