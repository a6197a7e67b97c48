//! Bone assignment accumulation and weight normalization
//!
//! Each vertex has four (bone, weight) slots. Assignments fill the first slot
//! whose weight is still zero; a fifth influence is dropped. When the block
//! ends, weights are rescaled so they sum to one.

use crate::buffer::{BufferData, BufferKind, TypedBuffer, Usage};
use crate::error::ParseError;

/// Influences supported per vertex
pub const MAX_WEIGHTS_PER_VERTEX: usize = 4;

/// Per-vertex bone slots of one mesh, zero-filled
#[derive(Debug, Clone)]
pub struct SkinningAccumulator {
    indices: Vec<[u8; MAX_WEIGHTS_PER_VERTEX]>,
    weights: Vec<[f32; MAX_WEIGHTS_PER_VERTEX]>,
}

/// Finished skinning data of one mesh
#[derive(Debug, Clone)]
pub struct SkinningData {
    pub indices: Vec<[u8; MAX_WEIGHTS_PER_VERTEX]>,
    pub weights: Vec<[f32; MAX_WEIGHTS_PER_VERTEX]>,
    /// Largest influence count over all vertices
    pub max_weights_per_vertex: u8,
    /// Vertices whose weights summed to zero and were normalized to non-finite values
    pub zero_weight_vertices: usize,
}

impl SkinningAccumulator {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            indices: vec![[0; MAX_WEIGHTS_PER_VERTEX]; vertex_count],
            weights: vec![[0.0; MAX_WEIGHTS_PER_VERTEX]; vertex_count],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.weights.len()
    }

    /// Record one influence
    ///
    /// Returns `false` when all four slots of the vertex are taken and the
    /// assignment was dropped.
    pub fn push(&mut self, vertex: i32, bone: i32, weight: f32) -> Result<bool, ParseError> {
        let bone = u8::try_from(bone).map_err(|_| ParseError::BoneIndexOutOfRange(bone))?;
        let slot = usize::try_from(vertex)
            .ok()
            .filter(|&v| v < self.vertex_count())
            .ok_or(ParseError::VertexIndexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })?;

        let weights = &mut self.weights[slot];
        let Some(free) = weights.iter().position(|&w| w == 0.0) else {
            return Ok(false);
        };
        weights[free] = weight;
        self.indices[slot][free] = bone;
        Ok(true)
    }

    /// Normalize every vertex and report the largest influence count
    pub fn finish(mut self) -> SkinningData {
        let mut max_weights_per_vertex = 0u8;
        let mut zero_weight_vertices = 0;
        for weights in &mut self.weights {
            max_weights_per_vertex = max_weights_per_vertex.max(influence_count(weights));
            if weights.iter().sum::<f32>() == 0.0 {
                zero_weight_vertices += 1;
            }
            normalize_weights(weights);
        }

        SkinningData {
            indices: self.indices,
            weights: self.weights,
            max_weights_per_vertex,
            zero_weight_vertices,
        }
    }
}

impl SkinningData {
    /// Bone weight buffer (4 × f32 per vertex), closed
    pub fn weight_buffer(&self, usage: Usage) -> TypedBuffer {
        let data = self.weights.iter().flatten().copied().collect();
        TypedBuffer::from_data(
            BufferKind::BoneWeight,
            MAX_WEIGHTS_PER_VERTEX,
            usage,
            BufferData::Float(data),
        )
    }

    /// Bone index buffer (4 × u8 per vertex), closed
    pub fn index_buffer(&self, usage: Usage) -> TypedBuffer {
        let data = self.indices.iter().flatten().copied().collect();
        TypedBuffer::from_data(
            BufferKind::BoneIndex,
            MAX_WEIGHTS_PER_VERTEX,
            usage,
            BufferData::UnsignedByte(data),
        )
    }
}

/// Number of slots up to and including the last non-zero weight
pub fn influence_count(weights: &[f32; MAX_WEIGHTS_PER_VERTEX]) -> u8 {
    weights
        .iter()
        .rposition(|&w| w != 0.0)
        .map_or(0, |last| last as u8 + 1)
}

/// Rescale weights to sum to one unless they already do exactly
///
/// The comparison is exact. A zero sum produces NaN weights.
pub fn normalize_weights(weights: &mut [f32; MAX_WEIGHTS_PER_VERTEX]) {
    let sum = weights[0] + weights[1] + weights[2] + weights[3];
    if sum != 1.0 {
        let scale = 1.0 / sum;
        for w in weights.iter_mut() {
            *w *= scale;
        }
    }
}
