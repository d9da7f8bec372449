//! FILENAME: core/chart-engine/src/ranking.rs
//! PURPOSE: Top-N reduction with a synthetic "Others" bucket.
//! CONTEXT: Long ranked lists (stations, complexes, channels) are cut to the
//! leading items; everything past the cutoff is folded into one tagged
//! entry. Summed fields add up; rate fields are re-derived as weighted
//! averages so the remainder stays consistent with the full list.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::palette::OTHERS_COLOR;
use crate::view::SlicePoint;

/// Base label of the synthetic remainder entry.
pub const OTHERS_NAME: &str = "Others";

// ============================================================================
// ITEMS
// ============================================================================

/// A named entry with a primary value and optional extra measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub name: String,
    pub value: f64,

    /// Extra measures, e.g. `liters` or `pricePerLiter`.
    #[serde(default)]
    pub fields: BTreeMap<String, f64>,

    #[serde(default)]
    pub is_others: bool,
}

impl RankedItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        RankedItem {
            name: name.into(),
            value,
            fields: BTreeMap::new(),
            is_others: false,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, value: f64) -> Self {
        self.fields.insert(field.into(), value);
        self
    }

    /// A field's value, 0 when absent.
    pub fn field(&self, field: &str) -> f64 {
        self.fields.get(field).copied().unwrap_or(0.0)
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// What the list is ranked by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Value,
    Field(String),
}

/// Weighting for a recomputed average.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Weight {
    /// Each item's primary value.
    Value,
    /// Another extra field, e.g. a liters or row count column.
    Field(String),
}

/// How an extra field folds into the Others entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoldRule {
    Sum,
    /// Σ(field × weight) / Σ(weight) over the folded items, 0 if Σ(weight) is 0.
    WeightedAverage { weight: Weight },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OthersLabel {
    /// "Others"
    Plain,
    /// "Others (N items)"
    WithCount,
}

impl Default for OthersLabel {
    fn default() -> Self {
        OthersLabel::Plain
    }
}

impl OthersLabel {
    pub fn render(self, folded: usize) -> String {
        match self {
            OthersLabel::Plain => OTHERS_NAME.to_string(),
            OthersLabel::WithCount => format!("{} ({} items)", OTHERS_NAME, folded),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopNOptions {
    pub limit: usize,
    pub sort_key: SortKey,
    pub others_label: OthersLabel,
    /// Fold rules per extra field. Fields without a rule are summed.
    pub rules: Vec<(String, FoldRule)>,
}

impl TopNOptions {
    pub fn new(limit: usize) -> Self {
        TopNOptions {
            limit,
            sort_key: SortKey::Value,
            others_label: OthersLabel::Plain,
            rules: Vec::new(),
        }
    }

    pub fn sort_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_label(mut self, others_label: OthersLabel) -> Self {
        self.others_label = others_label;
        self
    }

    pub fn with_rule(mut self, field: impl Into<String>, rule: FoldRule) -> Self {
        self.rules.push((field.into(), rule));
        self
    }

    fn rule_for(&self, field: &str) -> &FoldRule {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
            .unwrap_or(&FoldRule::Sum)
    }
}

// ============================================================================
// REDUCTION
// ============================================================================

/// NaN ranks below every number so it never displaces a real leader.
fn sort_value(item: &RankedItem, key: &SortKey) -> f64 {
    let value = match key {
        SortKey::Value => item.value,
        SortKey::Field(field) => item.field(field),
    };
    if value.is_nan() {
        f64::NEG_INFINITY
    } else {
        value
    }
}

fn weight_of(item: &RankedItem, weight: &Weight) -> f64 {
    match weight {
        Weight::Value => item.value,
        Weight::Field(field) => item.field(field),
    }
}

/// Folds the items past the cutoff into one tagged entry.
fn fold_others(rest: &[RankedItem], options: &TopNOptions) -> RankedItem {
    let mut others = RankedItem::new(
        options.others_label.render(rest.len()),
        rest.iter().map(|item| item.value).sum(),
    );
    others.is_others = true;

    let field_names: Vec<&String> = {
        let mut names: Vec<&String> = rest.iter().flat_map(|item| item.fields.keys()).collect();
        names.sort();
        names.dedup();
        names
    };

    for field in field_names {
        let folded: f64 = match options.rule_for(field) {
            FoldRule::Sum => rest.iter().map(|item| item.field(field)).sum(),
            FoldRule::WeightedAverage { weight } => {
                // Items without the field carry no rate and add no weight
                let (weighted, total_weight) = rest
                    .iter()
                    .filter_map(|item| Some((item.fields.get(field.as_str()).copied()?, item)))
                    .fold((0.0, 0.0), |(num, den), (rate, item)| {
                        let w = weight_of(item, weight);
                        (num + rate * w, den + w)
                    });
                if total_weight == 0.0 {
                    0.0
                } else {
                    weighted / total_weight
                }
            }
        };
        others.fields.insert(field.clone(), folded);
    }

    others
}

/// Sorts descending by the sort key and keeps the first `limit` items,
/// folding the rest into one `is_others` entry.
///
/// Lists no longer than `limit` come back sorted but otherwise untouched.
pub fn top_n_with_others(mut items: Vec<RankedItem>, options: &TopNOptions) -> Vec<RankedItem> {
    items.sort_by(|a, b| sort_value(b, &options.sort_key).total_cmp(&sort_value(a, &options.sort_key)));

    if items.len() <= options.limit {
        return items;
    }

    let rest = items.split_off(options.limit);
    items.push(fold_others(&rest, options));
    items
}

/// Ranks pie slices and folds the tail into a muted "Others" slice.
/// Leading slices keep their colors.
pub fn reduce_slices(slices: Vec<SlicePoint>, limit: usize, others_label: OthersLabel) -> Vec<SlicePoint> {
    let colors: FxHashMap<String, String> = slices
        .iter()
        .map(|s| (s.name.clone(), s.color.clone()))
        .collect();

    let items = slices
        .into_iter()
        .map(|s| RankedItem::new(s.name, s.value))
        .collect();
    let options = TopNOptions::new(limit).with_label(others_label);

    top_n_with_others(items, &options)
        .into_iter()
        .map(|item| {
            if item.is_others {
                let mut slice = SlicePoint::new(item.name, item.value, OTHERS_COLOR);
                slice.is_others = true;
                slice
            } else {
                let color = colors.get(&item.name).cloned().unwrap_or_default();
                SlicePoint::new(item.name, item.value, color)
            }
        })
        .collect()
}
