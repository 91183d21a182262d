//! Document clustering: k-means over the TF-IDF space.

use std::num::IntErrorKind;
use std::sync::Arc;

use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::analysis::Normalizer;
use crate::document::{Document, MatchedDocument};
use crate::error::{Result, TemuError};
use crate::ranking::tfidf::TfIdfVectorizer;

pub mod kmeans;

pub use kmeans::{KMeans, KMeansConfig, KMeansFit};

/// Documents grouped by cluster label, in order of first occurrence.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterGroups(pub Vec<(String, Vec<MatchedDocument>)>);

impl ClusterGroups {
    /// Group documents by label. The first document seen with a label
    /// decides the position of its group.
    pub fn from_labels(labels: &[usize], documents: &[Document]) -> Self {
        let mut groups: Vec<(usize, Vec<MatchedDocument>)> = Vec::new();

        for (i, (&label, doc)) in labels.iter().zip(documents).enumerate() {
            let matched = MatchedDocument::new(i, doc);
            match groups.iter_mut().find(|(l, _)| *l == label) {
                Some((_, members)) => members.push(matched),
                None => groups.push((label, vec![matched])),
            }
        }

        ClusterGroups(
            groups
                .into_iter()
                .map(|(label, members)| (label.to_string(), members))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members of the cluster labelled `label`.
    pub fn get(&self, label: &str) -> Option<&[MatchedDocument]> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, members)| members.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MatchedDocument])> {
        self.0.iter().map(|(l, m)| (l.as_str(), m.as_slice()))
    }
}

impl Serialize for ClusterGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, members) in &self.0 {
            map.serialize_entry(label, members)?;
        }
        map.end()
    }
}

/// Result of clustering a request's documents.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResult {
    pub clusters: ClusterGroups,

    /// The requested `k`; some labels may end up without members
    pub num_clusters: usize,
    pub inertia: f64,
}

/// Parse a textual cluster count.
///
/// Surrounding whitespace is allowed; anything that is not a positive
/// integer is an [`TemuError::InvalidClusterCount`]. A count too large to
/// represent saturates to `usize::MAX`, so it fails the document-count
/// check instead.
pub fn parse_cluster_count(raw: &str) -> Result<usize> {
    let k = match raw.trim().parse::<i64>() {
        Ok(k) => k,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        Err(_) => {
            return Err(TemuError::invalid_cluster_count(format!(
                "invalid literal for cluster count: {raw:?}"
            )));
        }
    };

    if k <= 0 {
        return Err(TemuError::invalid_cluster_count(
            "number of clusters must be a positive integer",
        ));
    }

    Ok(usize::try_from(k).unwrap_or(usize::MAX))
}

/// Groups documents into `k` topical clusters.
#[derive(Debug, Clone)]
pub struct ClusterEngine {
    normalizer: Arc<Normalizer>,
    kmeans: KMeans,
}

impl ClusterEngine {
    pub fn new(normalizer: Arc<Normalizer>, config: KMeansConfig) -> Self {
        ClusterEngine {
            normalizer,
            kmeans: KMeans::new(config),
        }
    }

    /// Cluster `documents` into the number of groups given by `k`.
    pub fn cluster(&self, k: &str, documents: &[Document]) -> Result<ClusterResult> {
        let k = parse_cluster_count(k)?;
        self.cluster_k(k, documents)
    }

    /// Cluster `documents` into `k` groups.
    pub fn cluster_k(&self, k: usize, documents: &[Document]) -> Result<ClusterResult> {
        if k == 0 {
            return Err(TemuError::invalid_cluster_count(
                "number of clusters must be a positive integer",
            ));
        }
        if documents.len() < k {
            warn!("{} clusters requested for {} documents", k, documents.len());
            return Err(TemuError::NotEnoughDocuments {
                documents: documents.len(),
                clusters: k,
            });
        }

        let contents: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let matrix = TfIdfVectorizer::new(Arc::clone(&self.normalizer)).fit_transform(&contents)?;
        let fit = self.kmeans.fit(&matrix.rows, k)?;

        Ok(ClusterResult {
            clusters: ClusterGroups::from_labels(&fit.labels, documents),
            num_clusters: k,
            inertia: fit.inertia,
        })
    }
}
