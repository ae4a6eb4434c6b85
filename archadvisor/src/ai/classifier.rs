//! Architecture Category Classifier
//!
//! Maps a free-text system description to one of six architecture
//! categories using case-insensitive keyword matching.
//!
//! Input: arbitrary user text
//! Output: Category (e.g., RealTime, ECommerce, Monolith)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Architecture archetypes the advisor knows how to talk about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RealTime,
    ECommerce,
    MachineLearning,
    Fintech,
    IoT,
    /// Nothing matched
    Monolith,
}

/// A single keyword rule. Matches when any keyword occurs in the lowercased input.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

impl Rule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

impl Category {
    /// Rules in priority order. The first matching rule wins.
    pub const RULES: &'static [Rule] = &[
        Rule { keywords: &["real-time", "chat"], category: Category::RealTime },
        Rule { keywords: &["ecommerce", "payment"], category: Category::ECommerce },
        Rule { keywords: &["ai", "ml"], category: Category::MachineLearning },
        Rule { keywords: &["fintech"], category: Category::Fintech },
        Rule { keywords: &["iot"], category: Category::IoT },
    ];

    pub const DEFAULT: Category = Category::Monolith;

    /// Human-readable label embedded in prompts and fallback reports
    pub fn label(&self) -> &'static str {
        match self {
            Category::RealTime => "Real-time event-driven architecture with WebSockets",
            Category::ECommerce => "Scalable e-commerce architecture with transactional DB",
            Category::MachineLearning => "ML-enabled system with async inference pipelines",
            Category::Fintech => "Secure fintech architecture with compliance & auditing",
            Category::IoT => "IoT architecture with message brokers and stream processing",
            Category::Monolith => "Modular monolithic architecture suitable for MVP",
        }
    }

    pub fn all() -> [Category; 6] {
        [
            Category::RealTime,
            Category::ECommerce,
            Category::MachineLearning,
            Category::Fintech,
            Category::IoT,
            Category::Monolith,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a system description. Total over all strings.
pub fn classify(text: &str) -> Category {
    let lowered = text.to_lowercase();
    Category::RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.category)
        .unwrap_or(Category::DEFAULT)
}
