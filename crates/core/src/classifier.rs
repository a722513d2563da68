//! Categorical vs free-text column classification

use crate::constants::CATEGORICAL_MAX_DISTINCT;
use crate::observation::observed_values;
use log::trace;
use sheet_pulse_types::Verdict;
use std::collections::HashSet;

/// Decide whether a column should be charted.
///
/// A column is categorical when it has at most [`CATEGORICAL_MAX_DISTINCT`]
/// distinct answers and at least one answer repeats. A column with no
/// answers at all is free text.
pub fn classify<S: AsRef<str>>(values: &[S]) -> Verdict {
    let mut observed = 0usize;
    let mut distinct = HashSet::new();

    for value in observed_values(values) {
        observed += 1;
        distinct.insert(value);
    }

    trace!("classify: {} observed, {} distinct", observed, distinct.len());

    if distinct.len() <= CATEGORICAL_MAX_DISTINCT && observed > distinct.len() {
        Verdict::Categorical
    } else {
        Verdict::FreeText
    }
}
