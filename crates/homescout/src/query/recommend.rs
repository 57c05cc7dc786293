use crate::artifacts::{cosine_similarity, Listing, ModelContext};
use std::cmp::Ordering;

/// Number of listings returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 5;

/// A listing paired with its similarity score and original dataset index.
#[derive(Debug, Clone)]
pub struct RankedListing<'a> {
    pub listing: &'a Listing,
    pub score: f64,
    pub index: usize,
}

/// Rank every listing against free-text input and keep the best `top_n`.
///
/// Scores are cosine similarities between the vectorized input and the
/// precomputed document-term matrix. Ordering is score descending; equal
/// scores fall back to ascending dataset index so results are deterministic.
/// Empty or fully out-of-vocabulary text scores 0.0 everywhere and therefore
/// degenerates to dataset order.
pub fn recommend<'a>(context: &'a ModelContext, text: &str, top_n: usize) -> Vec<RankedListing<'a>> {
    let query = context.vectorizer().transform(text);

    let mut ranked: Vec<RankedListing<'a>> = context
        .matrix()
        .iter()
        .zip(context.listings())
        .enumerate()
        .map(|(index, (row, listing))| RankedListing {
            listing,
            score: cosine_similarity(&query, row),
            index,
        })
        .collect();

    ranked.sort_by(|a, b| match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.index.cmp(&b.index),
        order => order,
    });
    ranked.truncate(top_n.min(context.listings().len()));
    ranked
}
