//! Counting and ranking answers

use crate::observation::observed_values;
use sheet_pulse_types::AggregatedEntry;
use std::collections::HashMap;

/// Count each distinct answer and rank by count, most frequent first.
///
/// Answers are keyed by exact trimmed text. Equal counts keep the order in
/// which the answers were first seen. The result does not depend on the
/// classifier verdict.
pub fn aggregate<S: AsRef<str>>(values: &[S]) -> Vec<AggregatedEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<AggregatedEntry> = Vec::new();

    for value in observed_values(values) {
        match positions.get(value) {
            Some(&pos) => entries[pos].count += 1,
            None => {
                positions.insert(value, entries.len());
                entries.push(AggregatedEntry::new(value, 1));
            }
        }
    }

    // sort_by is stable, so first-seen order survives ties
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// Sum of counts across all entries
pub fn total_count(entries: &[AggregatedEntry]) -> usize {
    entries.iter().map(|e| e.count).sum()
}
