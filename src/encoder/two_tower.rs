use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::{debug, error};

use crate::constants::NORM_EPSILON;
use crate::profile::Profile;
use crate::vocabulary::{CategorySet, Vocabulary};

use super::config::EncoderConfig;
use super::error::{EncoderError, EncoderResult};
use super::types::{Embedding, FeatureLayout, FeatureVector, SCALAR_FEATURES, SimilarityHit};

/// Deterministic two-tower encoder.
///
/// Both towers share the same weights: a profile is encoded into a fixed-length
/// feature vector and projected into an `embedding_dim` space by bucket hashing
/// (`index mod dim`). Similarity is cosine similarity in that space.
#[derive(Debug, Clone)]
pub struct TwoTowerEncoder {
    vocabulary: Vocabulary,
    config: EncoderConfig,
    layout: FeatureLayout,
}

impl Default for TwoTowerEncoder {
    fn default() -> Self {
        Self::new(Vocabulary::default(), EncoderConfig::default())
    }
}

impl TwoTowerEncoder {
    pub fn new(vocabulary: Vocabulary, config: EncoderConfig) -> Self {
        let layout = FeatureLayout::from_lengths([
            vocabulary.intentions.len(),
            vocabulary.experience_levels.len(),
            vocabulary.career_stages.len(),
            vocabulary.industries.len(),
            vocabulary.skills.len(),
            vocabulary.hobbies.len(),
            vocabulary.values.len(),
            vocabulary.skills.len(),
            vocabulary.skills.len(),
            SCALAR_FEATURES,
        ]);

        Self {
            vocabulary,
            config,
            layout,
        }
    }

    /// Builds an encoder after validating `config`.
    pub fn try_new(vocabulary: Vocabulary, config: EncoderConfig) -> EncoderResult<Self> {
        config.validate()?;
        Ok(Self::new(vocabulary, config))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    #[inline]
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Encodes a profile into its feature vector.
    ///
    /// Values missing from the vocabulary are skipped and counted in
    /// [`FeatureVector::dropped`].
    pub fn encode(&self, profile: &Profile) -> FeatureVector {
        let mut values = Vec::with_capacity(self.layout.len());
        let mut dropped = 0;
        let vocab = &self.vocabulary;

        dropped += push_one_hot(
            &mut values,
            &vocab.intentions,
            profile.intention.as_deref(),
            "intention",
        );
        dropped += push_one_hot(
            &mut values,
            &vocab.experience_levels,
            profile.experience_level.as_deref(),
            "experience_level",
        );
        dropped += push_one_hot(
            &mut values,
            &vocab.career_stages,
            profile.career_stage.as_deref(),
            "career_stage",
        );
        dropped += push_one_hot(
            &mut values,
            &vocab.industries,
            profile.industry.as_deref(),
            "industry",
        );

        dropped += push_multi_hot(&mut values, &vocab.skills, &profile.skills, "skills");
        dropped += push_multi_hot(&mut values, &vocab.hobbies, &profile.hobbies, "hobbies");
        dropped += push_multi_hot(&mut values, &vocab.values, &profile.values, "values");
        dropped += push_multi_hot(
            &mut values,
            &vocab.skills,
            &profile.skills_to_learn,
            "skills_to_learn",
        );
        dropped += push_multi_hot(
            &mut values,
            &vocab.skills,
            &profile.skills_to_teach,
            "skills_to_teach",
        );

        values.push(years_feature(profile.years_of_experience, self.config.years_of_experience_cap));
        values.push(finite_or_zero(profile.profile_completion).clamp(0.0, 1.0));
        values.push(if profile.is_verified { 1.0 } else { 0.0 });

        debug_assert_eq!(values.len(), self.layout.len());

        if dropped > 0 {
            debug!(
                profile_id = %profile.id,
                dropped,
                "Ignored profile values outside the vocabulary"
            );
        }

        FeatureVector::new(values, dropped)
    }

    /// Projects a feature vector into the embedding space.
    ///
    /// Feature `i` lands in bucket `i mod dim`; collisions accumulate. The result is
    /// L2-normalized unless its norm is below [`NORM_EPSILON`], in which case the raw
    /// (zero) vector is returned.
    pub fn embed(&self, vector: &FeatureVector) -> Embedding {
        let dim = self.config.embedding_dim.max(1);
        let mut buckets = vec![0f32; dim];

        for (i, value) in vector.as_slice().iter().enumerate() {
            buckets[i % dim] += value;
        }

        let norm = buckets.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm < NORM_EPSILON {
            return Embedding::new(buckets);
        }

        for v in &mut buckets {
            *v /= norm;
        }

        Embedding::new(buckets)
    }

    /// `embed(encode(profile))`.
    pub fn encode_and_embed(&self, profile: &Profile) -> Embedding {
        self.embed(&self.encode(profile))
    }

    /// Cosine similarity clamped to `[0, 1]`.
    ///
    /// A dimension mismatch is a caller bug: it is logged and scores 0.
    pub fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        match try_cosine_similarity(a.as_slice(), b.as_slice()) {
            Ok(score) => score,
            Err(err) => {
                error!(error = %err, "Similarity requested for mismatched embeddings");
                0.0
            }
        }
    }

    /// Checked variant of [`similarity`](Self::similarity).
    pub fn try_similarity(&self, a: &Embedding, b: &Embedding) -> EncoderResult<f32> {
        try_cosine_similarity(a.as_slice(), b.as_slice())
    }

    /// Scores every candidate against `query` and returns the best `k`.
    ///
    /// Sorting is stable, so equal scores keep their input order.
    pub fn top_k(
        &self,
        query: &Embedding,
        candidates: &[Embedding],
        k: usize,
    ) -> Vec<SimilarityHit> {
        if k == 0 || candidates.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SimilarityHit> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| SimilarityHit {
                index,
                score: self.similarity(query, candidate),
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(k);
        hits
    }
}

/// Cosine similarity with the denominator floored at [`NORM_EPSILON`], clamped to `[0, 1]`.
#[inline]
pub fn try_cosine_similarity(a: &[f32], b: &[f32]) -> EncoderResult<f32> {
    if a.len() != b.len() {
        return Err(EncoderError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let denominator = (norm_a_sq.sqrt() * norm_b_sq.sqrt()).max(NORM_EPSILON);
    Ok((dot / denominator).clamp(0.0, 1.0))
}

fn push_one_hot(
    out: &mut Vec<f32>,
    set: &CategorySet,
    value: Option<&str>,
    segment: &'static str,
) -> usize {
    let start = out.len();
    out.resize(start + set.len(), 0.0);

    let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
        return 0;
    };

    match set.position(raw) {
        Some(pos) => {
            out[start + pos] = 1.0;
            0
        }
        None => {
            debug!(segment, value = raw, "Unknown categorical value");
            1
        }
    }
}

fn push_multi_hot(
    out: &mut Vec<f32>,
    set: &CategorySet,
    values: &[String],
    segment: &'static str,
) -> usize {
    let start = out.len();
    out.resize(start + set.len(), 0.0);

    let mut hits = BTreeSet::new();
    let mut dropped = 0;

    for raw in values {
        if raw.trim().is_empty() {
            continue;
        }
        match set.position(raw) {
            Some(pos) => {
                hits.insert(pos);
            }
            None => {
                debug!(segment, value = %raw, "Unknown list value");
                dropped += 1;
            }
        }
    }

    if !hits.is_empty() {
        let weight = 1.0 / hits.len() as f32;
        for pos in hits {
            out[start + pos] = weight;
        }
    }

    dropped
}

#[inline]
fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Years scaled into [0, 1]. An unusable cap encodes as 0.
fn years_feature(years: f32, cap: f32) -> f32 {
    if !cap.is_finite() || cap <= 0.0 {
        return 0.0;
    }
    finite_or_zero(years).clamp(0.0, cap) / cap
}
