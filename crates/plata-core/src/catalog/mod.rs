//! Read-only catalog models: method listings, scam audit entries and
//! blog posts. The catalog is static display content; the entitlement
//! gate and the deep-link mechanism index it by id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MethodCategory {
    Surveys,
    Crypto,
    Affiliate,
    Freelance,
    Tasks,
    Ecommerce,
    HighTicket,
}

impl MethodCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Surveys => "Encuestas",
            Self::Crypto => "Trading y Cripto",
            Self::Affiliate => "Marketing de Afiliados",
            Self::Freelance => "Freelancing",
            Self::Tasks => "Micro-Tareas",
            Self::Ecommerce => "E-Commerce",
            Self::HighTicket => "High Ticket Closing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Principiante",
            Self::Intermediate => "Intermedio",
            Self::Advanced => "Avanzado",
            Self::Expert => "Solo Expertos",
        }
    }
}

/// A curated money-making method listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: MethodCategory,
    pub difficulty: Difficulty,
    pub verified: bool,
    pub investment_required: bool,
    /// 1–5 community rating.
    pub rating: u8,
    pub premium: bool,
    pub potential_earnings: Option<String>,
    pub link: Option<String>,
    /// Full guide body, present for entries with a detail page.
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Safe,
    Warning,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScamStatus {
    Scam,
    Legit,
    Suspicious,
    Warning,
}

/// One crowd-audited scam/legitimacy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScamEntry {
    pub id: String,
    pub name: String,
    /// Free-form classification, e.g. "Ponzi Scheme", "Exchange".
    pub kind: String,
    pub risk_level: RiskLevel,
    pub status: ScamStatus,
    pub reason: String,
    pub date_reported: Option<String>,
}

/// A blog article, optionally premium-gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub read_time: String,
    pub date: NaiveDate,
    pub premium: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_distinct() {
        let labels = [
            MethodCategory::Surveys,
            MethodCategory::Crypto,
            MethodCategory::Affiliate,
            MethodCategory::Freelance,
            MethodCategory::Tasks,
            MethodCategory::Ecommerce,
            MethodCategory::HighTicket,
        ]
        .map(MethodCategory::label);
        let mut deduped = labels.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }

    #[test]
    fn test_risk_levels_order_by_severity() {
        assert!(RiskLevel::Safe < RiskLevel::Warning);
        assert!(RiskLevel::Warning < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }
}
