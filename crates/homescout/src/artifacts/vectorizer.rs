use super::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fitted TF-IDF vectorizer restored from an offline training run.
///
/// The vocabulary maps each term to its column index and `idf` holds the
/// inverse-document-frequency weight for that column. Fitting happens
/// offline; this type only reproduces `transform` for incoming query text:
/// lowercase alphanumeric tokens of length >= 2, raw term counts scaled by
/// IDF, then L2-normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self, ArtifactError> {
        let vectorizer = Self { vocabulary, idf };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    pub(crate) fn validate(&self) -> Result<(), ArtifactError> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(ArtifactError::VocabularyWidth {
                vocabulary: self.vocabulary.len(),
                idf: self.idf.len(),
            });
        }
        if let Some((term, &column)) = self
            .vocabulary
            .iter()
            .find(|(_, &column)| column >= self.idf.len())
        {
            return Err(ArtifactError::ColumnOutOfRange {
                term: term.clone(),
                column,
                width: self.idf.len(),
            });
        }
        Ok(())
    }

    /// Number of columns in the vector space.
    pub fn width(&self) -> usize {
        self.idf.len()
    }

    /// Map free text into the fitted vector space.
    ///
    /// Unknown terms are dropped; text with no known terms (including empty
    /// text) yields the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.idf.len()];
        for token in tokenize(text) {
            if let Some(&column) = self.vocabulary.get(&token) {
                vector[column] += 1.0;
            }
        }
        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        l2_normalize(&mut vector);
        vector
    }
}

/// Lowercased alphanumeric runs of length >= 2, matching the tokenization
/// the offline vectorizer was fitted with.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_lowercase())
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}

/// Cosine similarity between two vectors of equal width.
///
/// A zero-norm operand scores 0.0 rather than NaN, so empty query text
/// compares as orthogonal to every document.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors must share the same width");
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
