//! Index builder: categorized, alphabetically stable corpus summary.
//!
//! The index is recomputed from scratch on every run. Nothing is merged
//! with previous index content, so renames and removals can never leave
//! stale entries behind.

use crate::document::AgentDocument;
use serde::Serialize;

/// Index categories in fixed output order. A document matching no keyword
/// rule falls into `Uncategorized` rather than being dropped; dropping an
/// agent from the index is never acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    CoreArchitecture,
    DevelopmentPatterns,
    QualityOptimization,
    Uncategorized,
}

impl Category {
    pub const ORDER: [Category; 4] = [
        Category::CoreArchitecture,
        Category::DevelopmentPatterns,
        Category::QualityOptimization,
        Category::Uncategorized,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::CoreArchitecture => "Core Architecture",
            Category::DevelopmentPatterns => "Development Patterns",
            Category::QualityOptimization => "Quality & Optimization",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

/// Keyword-bucket rules. First matching rule wins, scanned in category
/// order, keywords in declaration order within a rule.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::CoreArchitecture,
        &[
            "setup",
            "event",
            "subscription",
            "effects",
            "architecture",
            "lifecycle",
            "state",
        ],
    ),
    (
        Category::DevelopmentPatterns,
        &[
            "pattern",
            "integration",
            "workflow",
            "api",
            "data",
            "component",
        ],
    ),
    (
        Category::QualityOptimization,
        &[
            "quality",
            "optimization",
            "performance",
            "review",
            "test",
            "audit",
            "lint",
        ],
    ),
];

/// Bucket a document id into exactly one category.
pub fn categorize(id: &str) -> Category {
    for (category, keywords) in RULES {
        if keywords.iter().any(|kw| id.contains(kw)) {
            return *category;
        }
    }
    Category::Uncategorized
}

/// One derived index entry. Never persisted independently.
#[derive(Debug, Clone, Serialize)]
pub struct IndexEntry {
    pub id: String,
    pub description: String,
    pub category: Category,
}

impl IndexEntry {
    pub fn from_document(doc: &AgentDocument) -> Self {
        IndexEntry {
            id: doc.id.clone(),
            description: doc.index_description(),
            category: categorize(&doc.id),
        }
    }
}

/// Render the full index text for a corpus.
///
/// Entries are sorted by id within each category; empty categories are
/// omitted. The output is a deterministic function of the entry set.
pub fn build_index(entries: &[IndexEntry]) -> String {
    let mut out = String::from("# Agent Index\n\nGenerated; do not edit by hand.\n");
    for category in Category::ORDER {
        let mut bucket: Vec<&IndexEntry> =
            entries.iter().filter(|e| e.category == category).collect();
        if bucket.is_empty() {
            continue;
        }
        bucket.sort_by(|a, b| a.id.cmp(&b.id));
        out.push_str(&format!("\n## {}\n\n", category.title()));
        for entry in bucket {
            if entry.description.is_empty() {
                out.push_str(&format!("- **{}**\n", entry.id));
            } else {
                out.push_str(&format!("- **{}** - {}\n", entry.id, entry.description));
            }
        }
    }
    out
}
