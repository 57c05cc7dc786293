pub mod dataset;
pub mod regression;
pub mod vectorizer;

pub use dataset::{distinct_categories, Listing};
pub use regression::{HouseFeatures, PriceModel};
pub use vectorizer::{cosine_similarity, TfidfVectorizer};

use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const MATRIX_FILE: &str = "tfidf_matrix.json";
pub const PRICE_MODEL_FILE: &str = "price_model.json";
pub const DATASET_FILE: &str = "housing_data.csv";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("unable to open artifact {path}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("artifact {path} is not valid JSON")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("dataset {path} is not valid CSV")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("document-term matrix has {matrix} rows but the dataset has {dataset}")]
    RowCountMismatch { matrix: usize, dataset: usize },
    #[error("matrix row {row} has width {width} but the vocabulary has {expected} terms")]
    RowWidthMismatch {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("vectorizer has {vocabulary} vocabulary terms but {idf} idf weights")]
    VocabularyWidth { vocabulary: usize, idf: usize },
    #[error("vocabulary term '{term}' maps to column {column}, outside width {width}")]
    ColumnOutOfRange {
        term: String,
        column: usize,
        width: usize,
    },
}

#[derive(Debug, Deserialize)]
struct MatrixArtifact {
    rows: Vec<Vec<f64>>,
}

/// Immutable bundle of every artifact the query layer needs: the fitted
/// vectorizer, the precomputed document-term matrix, the price regression,
/// and the listing table. Constructed once at process start and shared
/// read-only; no query mutates it.
#[derive(Debug)]
pub struct ModelContext {
    vectorizer: TfidfVectorizer,
    matrix: Vec<Vec<f64>>,
    price_model: PriceModel,
    listings: Vec<Listing>,
}

impl ModelContext {
    /// Load all four artifacts from a directory. Any missing or corrupt
    /// file, or any cross-artifact inconsistency, fails here so the process
    /// never starts serving with a broken store.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;
        let matrix: MatrixArtifact = read_json(&dir.join(MATRIX_FILE))?;
        let price_model: PriceModel = read_json(&dir.join(PRICE_MODEL_FILE))?;

        let dataset_path = dir.join(DATASET_FILE);
        let file = File::open(&dataset_path).map_err(|source| ArtifactError::Open {
            path: dataset_path.clone(),
            source,
        })?;
        let listings =
            dataset::load_listings(BufReader::new(file)).map_err(|source| ArtifactError::Csv {
                path: dataset_path,
                source,
            })?;

        let context = Self::from_parts(vectorizer, matrix.rows, price_model, listings)?;
        info!(
            listings = context.listings.len(),
            vocabulary = context.vectorizer.width(),
            "artifact store loaded"
        );
        Ok(context)
    }

    /// Assemble a context from already-deserialized parts, running the same
    /// consistency checks as `load`. Used by tests and fixtures.
    pub fn from_parts(
        vectorizer: TfidfVectorizer,
        matrix: Vec<Vec<f64>>,
        price_model: PriceModel,
        listings: Vec<Listing>,
    ) -> Result<Self, ArtifactError> {
        vectorizer.validate()?;
        if matrix.len() != listings.len() {
            return Err(ArtifactError::RowCountMismatch {
                matrix: matrix.len(),
                dataset: listings.len(),
            });
        }
        if let Some((row, width)) = matrix
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != vectorizer.width())
            .map(|(index, row)| (index, row.len()))
        {
            return Err(ArtifactError::RowWidthMismatch {
                row,
                width,
                expected: vectorizer.width(),
            });
        }

        Ok(Self {
            vectorizer,
            matrix,
            price_model,
            listings,
        })
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn price_model(&self) -> &PriceModel {
        &self.price_model
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.listings)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}
