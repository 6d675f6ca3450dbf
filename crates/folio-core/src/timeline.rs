// Timeline ordering
use crate::{registry::TimelineEntry, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which way the timeline runs - always chosen explicitly by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineOrder {
    /// Oldest first
    Chronological,
    /// Newest first
    MostRecentFirst,
}

impl TimelineOrder {
    pub fn label(&self) -> &'static str {
        match self {
            TimelineOrder::Chronological => "oldest first",
            TimelineOrder::MostRecentFirst => "newest first",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            TimelineOrder::Chronological => TimelineOrder::MostRecentFirst,
            TimelineOrder::MostRecentFirst => TimelineOrder::Chronological,
        }
    }
}

/// Sort key for a timeline entry: the year before any `-`
///
/// "2023" -> 2023, "2018-2020" -> 2018. Anything that isn't plain digits is
/// an error; we never fall back to 0.
pub fn start_year(year: &str) -> Result<u32> {
    let head = year.split('-').next().unwrap_or_default().trim();

    if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed(year, ""));
    }

    head.parse::<u32>().map_err(|_| malformed(year, ""))
}

fn malformed(year: &str, title: &str) -> Error {
    Error::MalformedYear {
        year: year.to_string(),
        title: title.to_string(),
    }
}

/// Entry that couldn't be placed on the timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry<'a> {
    pub entry: &'a TimelineEntry,
    pub reason: String,
}

/// Result of ordering: placed entries plus the ones we refused to guess about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTimeline<'a> {
    pub order: TimelineOrder,
    pub entries: Vec<&'a TimelineEntry>,
    pub rejected: Vec<RejectedEntry<'a>>,
}

/// Order timeline entries by start year
///
/// Equal years keep their configured order in both directions.
pub fn order_timeline(entries: &[TimelineEntry], order: TimelineOrder) -> OrderedTimeline<'_> {
    let mut keyed = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for entry in entries {
        match start_year(&entry.year) {
            Ok(key) => keyed.push((key, entry)),
            Err(_) => {
                let err = malformed(&entry.year, &entry.title);
                warn!("Skipping timeline entry: {}", err);
                rejected.push(RejectedEntry {
                    entry,
                    reason: err.to_string(),
                });
            }
        }
    }

    match order {
        TimelineOrder::Chronological => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        TimelineOrder::MostRecentFirst => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    OrderedTimeline {
        order,
        entries: keyed.into_iter().map(|(_, entry)| entry).collect(),
        rejected,
    }
}
