//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;

use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical direction
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
///
/// If either vector has zero magnitude the pair has no direction to compare,
/// and the similarity is `f32::NEG_INFINITY` so it can never win a
/// [`best_match`] against a real score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    let dot = dot_product(a, b)?;
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(f32::NEG_INFINITY);
    }

    Ok(dot / (magnitude_a * magnitude_b))
}

/// Compute the dot product between two embeddings.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Euclidean norm of an embedding.
pub fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Find the candidate most similar to `query`.
///
/// Returns the candidate's position and its cosine similarity, or `None`
/// when there are no candidates. Equal scores resolve to the earliest
/// candidate. NaN scores rank as `NEG_INFINITY`.
pub fn best_match<'a, I>(query: &[f32], candidates: I) -> Result<Option<(usize, f32)>>
where
    I: IntoIterator<Item = &'a [f32]>,
{
    let mut best: Option<(usize, OrderedFloat<f32>)> = None;

    for (position, candidate) in candidates.into_iter().enumerate() {
        let score = cosine_similarity(query, candidate)?;
        let score = OrderedFloat(if score.is_nan() {
            f32::NEG_INFINITY
        } else {
            score
        });

        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((position, score)),
        }
    }

    Ok(best.map(|(position, score)| (position, score.into_inner())))
}
