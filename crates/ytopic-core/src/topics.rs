//! Topic and category value types.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Short-form (≤ 60 s) or long-form (> 60 s) content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Short,
    Long,
}

impl ContentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Short => "short",
            ContentType::Long => "long",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(ContentType::Short),
            "long" => Ok(ContentType::Long),
            other => Err(format!("content type must be 'short' or 'long', got '{other}'")),
        }
    }
}

/// Three-tier competition heuristic. `Unknown` is only produced when a
/// keyword search returned no videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl CompetitionLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CompetitionLevel::Low => "low",
            CompetitionLevel::Medium => "medium",
            CompetitionLevel::High => "high",
            CompetitionLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A topic row ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTopic {
    pub title: String,
    pub category: String,
    pub content_type: ContentType,
    pub revenue_score: Decimal,
    pub competition_level: CompetitionLevel,
    pub avg_views: i64,
    pub estimated_cpm: Decimal,
    pub trending_keywords: Vec<String>,
    /// Suggested video length bounds, in seconds.
    pub video_length_min: i32,
    pub video_length_max: i32,
}

/// A category row ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub display_name: String,
    pub avg_cpm: Decimal,
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// The two sample topics inserted by the monthly rotation for `month` (1-12).
#[must_use]
pub fn seasonal_topics(month: u32) -> Vec<NewTopic> {
    vec![
        NewTopic {
            title: format!("{month}월 트렌드 숏폼"),
            category: "entertainment".to_string(),
            content_type: ContentType::Short,
            revenue_score: Decimal::new(7, 0),
            competition_level: CompetitionLevel::Medium,
            avg_views: 150_000,
            estimated_cpm: Decimal::new(600, 2),
            trending_keywords: vec![
                "트렌드".to_string(),
                "숏폼".to_string(),
                format!("{month}월"),
                "인기".to_string(),
            ],
            video_length_min: 30,
            video_length_max: 60,
        },
        NewTopic {
            title: format!("{month}월 주목할 투자 전략"),
            category: "finance".to_string(),
            content_type: ContentType::Long,
            revenue_score: Decimal::new(9, 0),
            competition_level: CompetitionLevel::Low,
            avg_views: 90_000,
            estimated_cpm: Decimal::new(1600, 2),
            trending_keywords: vec![
                "투자".to_string(),
                "전략".to_string(),
                format!("{month}월"),
                "재테크".to_string(),
            ],
            video_length_min: 1200,
            video_length_max: 1800,
        },
    ]
}
