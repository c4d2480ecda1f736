use std::collections::HashMap;

use crate::ledger::{MonthId, Transaction};

/// Distinct months across the whole dataset, deduplicated by first occurrence
/// and sorted ascending on the `year * 100 + month` ordinal. Label text never
/// takes part in the ordering.
pub(crate) fn month_index(transactions: &[Transaction]) -> Vec<MonthId> {
    let mut months: Vec<MonthId> = vec![];
    for t in transactions {
        let month_id = t.month_id();
        if !months.contains(&month_id) {
            months.push(month_id);
        }
    }

    months.sort_by_key(|m| m.ordinal());
    months
}

/// Category -> summed amounts, one entry per month of the index, in
/// chronological order. Categories keep the order they first appear in the
/// ledger so bar stacking and palette assignment are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpendMatrix {
    entries: Vec<(String, Vec<f32>)>,
}

impl SpendMatrix {
    pub(crate) fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(category, _)| category.as_str())
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries.iter().map(|(category, series)| (category.as_str(), series.as_slice()))
    }

    pub(crate) fn series(&self, category: &str) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, series)| series.as_slice())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A new matrix holding only the given category's series. Value copy, the
    /// source matrix keeps every entry and shares no storage with the result.
    pub(crate) fn only(&self, category: &str) -> SpendMatrix {
        SpendMatrix {
            entries: self
                .series(category)
                .map(|series| (category.to_string(), series.to_vec()))
                .into_iter()
                .collect(),
        }
    }
}

/// Fold transactions into the category-month matrix. Amounts accumulate in
/// input order; months absent for a category densify to zero so every series
/// has the exact length and alignment of the month index.
pub(crate) fn build_matrix(transactions: &[Transaction], months: &[MonthId]) -> SpendMatrix {
    let mut order: Vec<&str> = vec![];
    let mut by_category: HashMap<&str, HashMap<MonthId, f32>> = HashMap::new();
    for t in transactions {
        if !by_category.contains_key(t.category.as_str()) {
            order.push(t.category.as_str());
        }
        let monthly = by_category.entry(t.category.as_str()).or_default();
        *monthly.entry(t.month_id()).or_insert(0.0) += t.amount;
    }

    let entries = order
        .into_iter()
        .map(|category| {
            let monthly = &by_category[category];
            let series = months
                .iter()
                .map(|m| monthly.get(m).copied().unwrap_or(0.0))
                .collect();
            (category.to_string(), series)
        })
        .collect();

    SpendMatrix { entries }
}
