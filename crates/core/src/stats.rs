//! Aggregate statistics over the whole collection (never a single page).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Record;

/// Statuses with a dedicated bucket in [`StatusBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownStatus {
    Planned,
    Watching,
    Completed,
    Dropped,
}

impl KnownStatus {
    pub fn parse(status: &str) -> Option<Self> {
        match status {
            "Planned" => Some(KnownStatus::Planned),
            "Watching" => Some(KnownStatus::Watching),
            "Completed" => Some(KnownStatus::Completed),
            "Dropped" => Some(KnownStatus::Dropped),
            _ => None,
        }
    }
}

/// Fixed-shape per-status counts. Unknown statuses are not represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusBreakdown {
    pub planned: i64,
    pub watching: i64,
    pub completed: i64,
    pub dropped: i64,
}

impl StatusBreakdown {
    fn bump(&mut self, status: KnownStatus) {
        match status {
            KnownStatus::Planned => self.planned += 1,
            KnownStatus::Watching => self.watching += 1,
            KnownStatus::Completed => self.completed += 1,
            KnownStatus::Dropped => self.dropped += 1,
        }
    }

    pub fn sum(&self) -> i64 {
        self.planned + self.watching + self.completed + self.dropped
    }
}

/// Response body of `GET /api/stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStats {
    pub total_records: i64,
    pub completed_count: i64,
    pub avg_rating_completed: Option<f64>,
    pub top_genre: Option<String>,
    pub by_status: StatusBreakdown,
}

impl RecordStats {
    pub fn compute(records: &[Record]) -> Self {
        let mut by_status = StatusBreakdown::default();
        let mut genre_counts: BTreeMap<&str, i64> = BTreeMap::new();
        let mut rating_sum = 0i64;
        let mut rated_completed = 0i64;

        for record in records {
            let status = KnownStatus::parse(&record.status);
            if let Some(status) = status {
                by_status.bump(status);
            }
            if status == Some(KnownStatus::Completed) {
                if let Some(rating) = record.rating {
                    rating_sum += i64::from(rating);
                    rated_completed += 1;
                }
            }

            let genre = record.genre.trim();
            if !genre.is_empty() {
                *genre_counts.entry(genre).or_default() += 1;
            }
        }

        let avg_rating_completed = (rated_completed > 0)
            .then(|| round_one_decimal(rating_sum as f64 / rated_completed as f64));

        Self {
            total_records: records.len() as i64,
            completed_count: by_status.completed,
            avg_rating_completed,
            top_genre: top_genre(&genre_counts),
            by_status,
        }
    }
}

/// Highest count wins; among equal counts the alphabetically first name.
fn top_genre(counts: &BTreeMap<&str, i64>) -> Option<String> {
    let mut best: Option<(&str, i64)> = None;
    // BTreeMap iterates in ascending key order, so a strict `>` keeps the
    // smallest name on ties.
    for (&genre, &count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((genre, count));
        }
    }
    best.map(|(genre, _)| genre.to_string())
}

/// Round half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::new_record_id;

    fn record(genre: &str, rating: Option<i32>, status: &str) -> Record {
        Record {
            id: new_record_id(),
            title: "T".to_string(),
            record_type: "Show".to_string(),
            genre: genre.to_string(),
            year: 2015,
            rating,
            status: status.to_string(),
            notes: String::new(),
            image_url: None,
        }
    }

    #[test]
    fn empty_collection() {
        let stats = RecordStats::compute(&[]);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.completed_count, 0);
        assert_eq!(stats.avg_rating_completed, None);
        assert_eq!(stats.top_genre, None);
        assert_eq!(stats.by_status, StatusBreakdown::default());
    }

    #[test]
    fn average_is_null_without_rated_completed_records() {
        let records = vec![
            record("Drama", None, "Completed"),
            record("Drama", Some(9), "Watching"),
        ];
        let stats = RecordStats::compute(&records);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.avg_rating_completed, None);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        let records = vec![
            record("Drama", Some(9), "Completed"),
            record("Drama", Some(8), "Completed"),
            record("Drama", Some(8), "Completed"),
            record("Drama", None, "Completed"),
            record("Drama", Some(1), "Dropped"),
        ];
        let stats = RecordStats::compute(&records);
        // (9 + 8 + 8) / 3 = 8.333...
        assert_eq!(stats.avg_rating_completed, Some(8.3));
        assert_eq!(stats.completed_count, 4);
    }

    #[test]
    fn top_genre_ties_pick_smallest_name() {
        let records = vec![
            record("Sci-Fi", None, "Planned"),
            record("Drama", None, "Planned"),
            record("Sci-Fi", None, "Planned"),
            record("Drama", None, "Planned"),
            record("Action", None, "Planned"),
        ];
        assert_eq!(
            RecordStats::compute(&records).top_genre.as_deref(),
            Some("Drama")
        );
    }

    #[test]
    fn top_genre_prefers_higher_count() {
        let records = vec![
            record("Action", None, "Planned"),
            record("Western", None, "Planned"),
            record("Western", None, "Planned"),
        ];
        assert_eq!(
            RecordStats::compute(&records).top_genre.as_deref(),
            Some("Western")
        );
    }

    #[test]
    fn unknown_statuses_count_only_in_total() {
        let records = vec![
            record("Drama", None, "Planned"),
            record("Drama", None, "On Hold"),
            record("Drama", None, "completed"),
        ];
        let stats = RecordStats::compute(&records);
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.by_status.sum(), 1);
        assert_eq!(stats.completed_count, 0);
    }

    #[test]
    fn breakdown_sums_to_total_for_known_statuses() {
        let records: Vec<Record> = ["Planned", "Watching", "Completed", "Dropped", "Watching"]
            .iter()
            .map(|s| record("Drama", Some(5), s))
            .collect();
        let stats = RecordStats::compute(&records);
        assert_eq!(stats.by_status.sum(), stats.total_records);
        assert_eq!(stats.by_status.watching, 2);
    }

    #[test]
    fn serializes_wire_shape() {
        let stats = RecordStats::compute(&[record("Drama", Some(7), "Completed")]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalRecords"], 1);
        assert_eq!(json["completedCount"], 1);
        assert_eq!(json["avgRatingCompleted"], 7.0);
        assert_eq!(json["topGenre"], "Drama");
        assert_eq!(json["byStatus"]["Completed"], 1);
        assert_eq!(json["byStatus"]["Planned"], 0);
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_one_decimal(8.25), 8.3);
        assert_eq!(round_one_decimal(7.0), 7.0);
        assert_eq!(round_one_decimal(9.96), 10.0);
    }
}
