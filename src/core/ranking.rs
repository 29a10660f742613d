//! Composite relevance scoring and the composed search pipeline.
//!
//! Every surviving candidate gets a score that is the sum of independent
//! signal contributions (exact, prefix, substring, per-token, fuzzy) across
//! the weighted searchable fields. Signals are additive, never mutually
//! exclusive: an exact match also earns the prefix and substring bonuses,
//! since each probes a different condition. Candidates that earn nothing are
//! absent from the output, not ranked last.
//!
//! The absolute weight magnitudes are empirically tuned; the contract is
//! their relative ordering (exact > prefix/substring > token > fuzzy) and
//! the hard fuzzy cutoffs, which downstream ordering expectations depend on.

use serde::{Deserialize, Serialize};

use crate::core::filters::{AvailabilityMode, FilterState};
use crate::core::similarity::EditBuffer;
use crate::core::tokenizer::{normalize, tokenize, MIN_TOKEN_LEN};
use crate::record::Item;

/// Number of scored fields: name plus six secondary fields.
pub const FIELD_COUNT: usize = 7;

/// Per-signal weight table, indexed by field position (0 = name, then
/// brand, piece type, location, condition, notes, raw identifier in
/// decreasing weight).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingWeights {
    pub exact: [u32; FIELD_COUNT],
    pub starts_with: [u32; FIELD_COUNT],
    pub contains: [u32; FIELD_COUNT],
    pub token_exact: [u32; FIELD_COUNT],
    pub token_starts_with: [u32; FIELD_COUNT],
    pub token_contains: [u32; FIELD_COUNT],

    /// Whole-field fuzzy bonus is `similarity × scale`, gated by
    /// `field_fuzzy_threshold`.
    pub field_fuzzy_scale: [f32; FIELD_COUNT],

    /// Flat per-token fuzzy bonus, gated by `token_fuzzy_threshold`.
    pub token_fuzzy: [u32; FIELD_COUNT],

    /// Minimum whole-field similarity (0-100) for any fuzzy bonus.
    pub field_fuzzy_threshold: u8,

    /// Minimum token similarity (0-100) for the per-token fuzzy bonus.
    pub token_fuzzy_threshold: u8,

    /// Query tokens shorter than this skip the fuzzy comparison.
    pub token_fuzzy_min_len: usize,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            exact: [1000, 900, 800, 800, 800, 800, 800],
            starts_with: [400, 350, 250, 250, 250, 250, 250],
            contains: [500, 400, 300, 200, 150, 100, 50],
            token_exact: [200, 180, 180, 180, 180, 180, 180],
            token_starts_with: [150, 130, 130, 130, 130, 130, 130],
            token_contains: [80, 70, 60, 40, 30, 30, 30],
            field_fuzzy_scale: [2.0, 1.5, 1.0, 1.0, 1.0, 1.0, 1.0],
            token_fuzzy: [100, 80, 80, 80, 80, 80, 80],
            field_fuzzy_threshold: 60,
            token_fuzzy_threshold: 70,
            token_fuzzy_min_len: 3,
        }
    }
}

/// A search query with its derived lowercase form and token sequence.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    normalized: String,
    tokens: Vec<String>,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
            tokens: tokenize(raw),
        }
    }

    /// True when nothing remains after trimming; ranking is bypassed.
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// A candidate that earned a positive composite score.
#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub item: &'a Item,
    pub score: u32,
}

/// Compute the composite relevance score for one item.
///
/// Public so call sites can explain a ranking; `rank` is the usual entry
/// point. The caller provides the [`EditBuffer`] so distance scratch space
/// is shared across a whole pass.
pub fn score_item(item: &Item, query: &Query, w: &RankingWeights, buf: &mut EditBuffer) -> u32 {
    let q = query.normalized();
    let mut score: u32 = 0;

    for (idx, raw_field) in item.searchable_fields().iter().enumerate() {
        if raw_field.is_empty() {
            continue;
        }
        let field = normalize(raw_field);
        if field.is_empty() {
            continue;
        }

        if field == q {
            score += w.exact[idx];
        }
        if field.starts_with(q) {
            score += w.starts_with[idx];
        }
        if field.contains(q) {
            score += w.contains[idx];
        }

        for token in query.tokens() {
            if token.chars().count() < MIN_TOKEN_LEN {
                continue;
            }

            let mut whole_token = false;
            let mut token_prefix = false;
            for field_token in field.split(' ') {
                if field_token == token.as_str() {
                    whole_token = true;
                }
                if field_token.starts_with(token.as_str()) {
                    token_prefix = true;
                }
            }
            if whole_token {
                score += w.token_exact[idx];
            }
            if token_prefix {
                score += w.token_starts_with[idx];
            }
            if field.contains(token.as_str()) {
                score += w.token_contains[idx];
            }

            if token.chars().count() >= w.token_fuzzy_min_len {
                let fuzzy_hit = field
                    .split(' ')
                    .any(|ft| buf.similarity(token, ft) >= w.token_fuzzy_threshold);
                if fuzzy_hit {
                    score += w.token_fuzzy[idx];
                }
            }
        }

        let sim = buf.similarity(&field, q);
        if sim >= w.field_fuzzy_threshold {
            score += (f32::from(sim) * w.field_fuzzy_scale[idx]).round() as u32;
        }
    }

    score
}

/// Score the candidates and return the survivors ordered by descending
/// score. Equal scores keep their input order (stable sort). An empty query
/// returns the candidates untouched.
pub fn rank<'a>(candidates: &[&'a Item], query: &Query, weights: &RankingWeights) -> Vec<&'a Item> {
    if query.is_empty() {
        return candidates.to_vec();
    }

    let mut buf = EditBuffer::new();
    let mut scored: Vec<ScoredCandidate<'a>> = candidates
        .iter()
        .copied()
        .filter_map(|item| {
            let score = score_item(item, query, weights, &mut buf);
            (score > 0).then_some(ScoredCandidate { item, score })
        })
        .collect();

    // Vec::sort_by is stable; ties keep filter-pass order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.into_iter().map(|c| c.item).collect()
}

/// The composed filter + rank pipeline shared by the POS picker and the
/// global search page.
pub fn search<'a>(
    items: &'a [Item],
    filters: &FilterState,
    query: &str,
    availability: AvailabilityMode,
    weights: &RankingWeights,
) -> Vec<&'a Item> {
    let survivors: Vec<&Item> = items
        .iter()
        .filter(|item| filters.passes(item, availability))
        .collect();

    let query = Query::new(query);
    if query.is_empty() {
        return survivors;
    }
    rank(&survivors, &query, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, brand: &str, qty: u32, reserved: u32) -> Item {
        Item {
            name: name.into(),
            brand: brand.into(),
            quantity: qty,
            reserved_quantity: reserved,
            ..Default::default()
        }
    }

    fn names<'a>(results: &[&'a Item]) -> Vec<&'a str> {
        results.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_exact_match_dominates_prefix() {
        let items = vec![
            item("Batmobile Classic", "Hot Wheels", 1, 0),
            item("Batmobile", "Hot Wheels", 1, 0),
        ];
        let w = RankingWeights::default();
        let q = Query::new("batmobile");
        let mut buf = EditBuffer::new();

        let exact = score_item(&items[1], &q, &w, &mut buf);
        let prefix = score_item(&items[0], &q, &w, &mut buf);
        assert!(exact > prefix, "exact {} vs prefix {}", exact, prefix);

        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, &q, &w);
        assert_eq!(names(&ranked), vec!["Batmobile", "Batmobile Classic"]);
    }

    #[test]
    fn test_non_match_is_absent() {
        let items = vec![
            item("Ford Mustang", "Hot Wheels", 1, 0),
            item("Nissan Skyline", "Mini GT", 1, 0),
        ];
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, &Query::new("mustang"), &RankingWeights::default());
        assert_eq!(names(&ranked), vec!["Ford Mustang"]);
    }

    #[test]
    fn test_stable_tie_break() {
        // Identical items score identically; input order must survive.
        let items = vec![
            item("Ford GT", "Hot Wheels", 1, 0),
            item("Ford GT", "Hot Wheels", 2, 0),
            item("Ford GT", "Hot Wheels", 3, 0),
        ];
        let refs: Vec<&Item> = items.iter().collect();
        let ranked = rank(&refs, &Query::new("ford"), &RankingWeights::default());
        let quantities: Vec<u32> = ranked.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_query_bypasses_ranking() {
        let items = vec![
            item("Zebra", "M2", 1, 0),
            item("Alpha", "M2", 1, 0),
        ];
        let filters = FilterState::new();
        let results = search(
            &items,
            &filters,
            "   ",
            AvailabilityMode::Required,
            &RankingWeights::default(),
        );
        // Unranked, in filter-pass order.
        assert_eq!(names(&results), vec!["Zebra", "Alpha"]);
    }

    #[test]
    fn test_fuzzy_bonus_applies_above_threshold() {
        let items = vec![item("Camaro", "Hot Wheels", 1, 0)];
        let refs: Vec<&Item> = items.iter().collect();

        // Misspelled query earns only fuzzy signals but still matches.
        let ranked = rank(&refs, &Query::new("camro"), &RankingWeights::default());
        assert_eq!(names(&ranked), vec!["Camaro"]);

        // Unrelated query earns nothing at all.
        let ranked = rank(&refs, &Query::new("xyzxyz"), &RankingWeights::default());
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_short_tokens_skip_token_signals() {
        let w = RankingWeights::default();
        let mut buf = EditBuffer::new();
        let it = item("X Wing Carrier", "Hot Wheels", 1, 0);

        // "x" is below MIN_TOKEN_LEN; only whole-query signals apply.
        let q = Query::new("x");
        let score = score_item(&it, &q, &w, &mut buf);
        assert_eq!(score, w.starts_with[0] + w.contains[0]);
    }

    #[test]
    fn test_secondary_fields_weigh_less_than_name() {
        let w = RankingWeights::default();
        let mut buf = EditBuffer::new();
        let q = Query::new("premium");

        let by_name = item("Premium", "Hot Wheels", 1, 0);
        let mut by_type = item("Skyline", "Mini GT", 1, 0);
        by_type.piece_type = "Premium".into();

        let name_score = score_item(&by_name, &q, &w, &mut buf);
        let type_score = score_item(&by_type, &q, &w, &mut buf);
        assert!(name_score > type_score);
    }

    #[test]
    fn test_determinism() {
        let items: Vec<Item> = (0..50)
            .map(|i| item(&format!("Ford Model {}", i), "Hot Wheels", 1, 0))
            .collect();
        let filters = FilterState::new();
        let w = RankingWeights::default();

        let a = names(&search(&items, &filters, "ford", AvailabilityMode::Required, &w));
        let b = names(&search(&items, &filters, "ford", AvailabilityMode::Required, &w));
        assert_eq!(a, b);
    }

    #[test]
    fn test_end_to_end_pos_example() {
        let items = vec![
            item("Ford Mustang", "Hot Wheels", 5, 0),
            item("Nissan GT-R", "Hot Wheels", 0, 0),
            item("Ford Focus", "Mini GT", 2, 1),
        ];
        let filters = FilterState::new();
        let results = search(
            &items,
            &filters,
            "ford",
            AvailabilityMode::Required,
            &RankingWeights::default(),
        );
        // GT-R is excluded for zero availability; the Fords tie on signals
        // and keep their original relative order.
        assert_eq!(names(&results), vec!["Ford Mustang", "Ford Focus"]);
    }

    #[test]
    fn test_default_weights_preserve_signal_ordering() {
        let w = RankingWeights::default();
        // exact > contains > starts_with > token > fuzzy ceilings, per field 0.
        assert!(w.exact[0] > w.contains[0]);
        assert!(w.contains[0] > w.starts_with[0]);
        assert!(w.starts_with[0] > w.token_exact[0]);
        assert!(w.token_exact[0] > w.token_starts_with[0]);
        assert!(w.token_starts_with[0] > w.token_fuzzy[0]);
        assert!(w.token_fuzzy[0] > w.token_contains[0]);
        assert_eq!(w.field_fuzzy_threshold, 60);
        assert_eq!(w.token_fuzzy_threshold, 70);
    }
}
