use serde::Serialize;

/// Segment names in encoding order.
pub const SEGMENT_ORDER: [&str; 10] = [
    "intention",
    "experience_level",
    "career_stage",
    "industry",
    "skills",
    "hobbies",
    "values",
    "skills_to_learn",
    "skills_to_teach",
    "scalars",
];

/// Number of trailing scalar features: years, completion, verified.
pub const SCALAR_FEATURES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Position of one segment inside a [`FeatureVector`].
pub struct SegmentSpan {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

impl SegmentSpan {
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Segment layout of every vector produced by one encoder.
pub struct FeatureLayout {
    spans: Vec<SegmentSpan>,
    total_len: usize,
}

impl FeatureLayout {
    pub(crate) fn from_lengths(lengths: [usize; 10]) -> Self {
        let mut spans = Vec::with_capacity(SEGMENT_ORDER.len());
        let mut offset = 0;

        for (name, len) in SEGMENT_ORDER.iter().zip(lengths) {
            spans.push(SegmentSpan {
                name: *name,
                offset,
                len,
            });
            offset += len;
        }

        Self {
            spans,
            total_len: offset,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.total_len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    pub fn spans(&self) -> &[SegmentSpan] {
        &self.spans
    }

    pub fn span(&self, name: &str) -> Option<&SegmentSpan> {
        self.spans.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Deterministic numeric encoding of a profile.
pub struct FeatureVector {
    values: Vec<f32>,
    dropped: usize,
}

impl FeatureVector {
    pub(crate) fn new(values: Vec<f32>, dropped: usize) -> Self {
        Self { values, dropped }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Count of categorical values that were not in the vocabulary.
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Sum of the values inside `span`.
    pub fn segment_sum(&self, span: &SegmentSpan) -> f32 {
        self.values[span.range()].iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Fixed-dimension, L2-normalized projection of a [`FeatureVector`].
pub struct Embedding {
    values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    pub fn norm(&self) -> f32 {
        self.values.iter().map(|v| v * v).sum::<f32>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// One result of [`TwoTowerEncoder::top_k`](super::TwoTowerEncoder::top_k).
pub struct SimilarityHit {
    /// Position of the candidate in the input slice.
    pub index: usize,
    pub score: f32,
}
