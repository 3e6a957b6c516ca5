use std::collections::{HashMap, HashSet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimilarityError {
    /// No document in the set produced a single token, so there is no vector
    /// space to compare in.
    #[error("empty vocabulary: no document contained a token of two or more alphanumeric characters")]
    EmptyVocabulary,
}

/// Per-pool-item cosine similarities for one candidate, plus their mean.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilaritySet {
    pub scores: Vec<f64>,
    pub average: f64,
}

/// Cosine similarity of `candidate` against every text in `pool_texts`.
///
/// The vector space is refit on every call from exactly this document set
/// (pool texts in order, candidate last). That is deliberate: virality is
/// relative to the current local cluster of recent messages, not to a global
/// corpus, so there is no persistent vocabulary across calls.
///
/// Term weights follow the usual vectorizer defaults: lowercased tokens of
/// two or more alphanumeric characters, raw term counts, smoothed inverse
/// document frequency `ln((1 + n) / (1 + df)) + 1`, and L2-normalized
/// document vectors, which makes cosine similarity a plain dot product.
/// A document with no tokens is the zero vector and scores 0.0 against
/// everything. All scores land in [0, 1].
///
/// Callers must not pass an empty pool; the windowed helpers short-circuit
/// before reaching this point.
pub fn pairwise_similarities(
    candidate: &str,
    pool_texts: &[&str],
) -> Result<SimilaritySet, SimilarityError> {
    debug_assert!(
        !pool_texts.is_empty(),
        "similarity engine invoked with an empty pool"
    );

    let pool_docs: Vec<Vec<String>> = pool_texts.iter().map(|text| tokenize(text)).collect();
    let candidate_doc = tokenize(candidate);
    let doc_count = (pool_docs.len() + 1) as f64;

    let mut vocabulary: HashMap<String, usize> = HashMap::new();
    for doc in pool_docs.iter().chain(std::iter::once(&candidate_doc)) {
        for token in doc {
            let next_index = vocabulary.len();
            vocabulary.entry(token.clone()).or_insert(next_index);
        }
    }
    if vocabulary.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let mut document_frequency = vec![0usize; vocabulary.len()];
    for doc in pool_docs.iter().chain(std::iter::once(&candidate_doc)) {
        let mut seen: HashSet<usize> = HashSet::new();
        for token in doc {
            let index = vocabulary[token.as_str()];
            if seen.insert(index) {
                document_frequency[index] += 1;
            }
        }
    }

    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1.0 + doc_count) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let candidate_vector = weighted_vector(&candidate_doc, &vocabulary, &idf);
    let scores: Vec<f64> = pool_docs
        .iter()
        .map(|doc| {
            let pool_vector = weighted_vector(doc, &vocabulary, &idf);
            sparse_dot(&candidate_vector, &pool_vector).clamp(0.0, 1.0)
        })
        .collect();

    let average = scores.iter().sum::<f64>() / scores.len() as f64;
    Ok(SimilaritySet { scores, average })
}

/// Lowercased runs of alphanumeric characters, keeping only tokens of two or
/// more characters (single characters carry no clustering signal and the
/// reference vectorizer dropped them too).
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            current.extend(ch.to_lowercase());
        } else {
            flush_token(&mut current, &mut tokens);
        }
    }
    flush_token(&mut current, &mut tokens);
    tokens
}

fn flush_token(current: &mut String, tokens: &mut Vec<String>) {
    if current.chars().count() >= 2 {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Sparse L2-normalized tf-idf vector, sorted by term index.
fn weighted_vector(
    doc: &[String],
    vocabulary: &HashMap<String, usize>,
    idf: &[f64],
) -> Vec<(usize, f64)> {
    let mut term_counts: HashMap<usize, f64> = HashMap::new();
    for token in doc {
        if let Some(&index) = vocabulary.get(token.as_str()) {
            *term_counts.entry(index).or_insert(0.0) += 1.0;
        }
    }

    let mut weights: Vec<(usize, f64)> = term_counts
        .into_iter()
        .map(|(index, tf)| (index, tf * idf[index]))
        .collect();
    let norm = weights
        .iter()
        .map(|(_, weight)| weight * weight)
        .sum::<f64>()
        .sqrt();
    if norm > 0.0 {
        for (_, weight) in &mut weights {
            *weight /= norm;
        }
    }
    weights.sort_unstable_by_key(|(index, _)| *index);
    weights
}

fn sparse_dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let mut sum = 0.0;
    let mut ai = 0;
    let mut bi = 0;
    while ai < a.len() && bi < b.len() {
        match a[ai].0.cmp(&b[bi].0) {
            std::cmp::Ordering::Less => ai += 1,
            std::cmp::Ordering::Greater => bi += 1,
            std::cmp::Ordering::Equal => {
                sum += a[ai].1 * b[bi].1;
                ai += 1;
                bi += 1;
            }
        }
    }
    sum
}
