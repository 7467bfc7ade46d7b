//! Skin binding: per-point, per-influence weight ratios.
//!
//! Normally a rigid/soft skinning structure; the transfer procedure
//! repurposes a two-influence binding as the vehicle the resampling solver
//! understands.

use crate::error::SceneError;
use crate::ids::NodeId;

#[derive(Clone, Debug)]
pub struct SkinBinding {
    pub mesh: NodeId,
    pub influences: Vec<NodeId>,
    /// `weights[point][influence]`.
    pub weights: Vec<Vec<f32>>,
    pub normalize: bool,
}

impl SkinBinding {
    /// Fresh binding: every point fully bound to influence 0, normalization
    /// enabled.
    pub fn bind(mesh: NodeId, influences: &[NodeId], point_count: usize) -> Result<Self, SceneError> {
        if influences.is_empty() {
            return Err(SceneError::NoInfluences);
        }
        let mut row = vec![0.0; influences.len()];
        row[0] = 1.0;
        Ok(Self {
            mesh,
            influences: influences.to_vec(),
            weights: vec![row; point_count],
            normalize: true,
        })
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn influence_count(&self) -> usize {
        self.influences.len()
    }

    fn check_point(&self, point: usize) -> Result<(), SceneError> {
        if point >= self.weights.len() {
            return Err(SceneError::PointOutOfRange {
                point,
                count: self.weights.len(),
            });
        }
        Ok(())
    }

    fn check_influence(&self, influence: usize) -> Result<(), SceneError> {
        if influence >= self.influences.len() {
            return Err(SceneError::InfluenceOutOfRange {
                influence,
                count: self.influences.len(),
            });
        }
        Ok(())
    }

    pub fn set_weight(&mut self, point: usize, influence: usize, weight: f32) -> Result<(), SceneError> {
        self.check_point(point)?;
        self.check_influence(influence)?;
        self.weights[point][influence] = weight;
        Ok(())
    }

    /// All weight onto one influence, everything else zeroed.
    pub fn reset_to_influence(&mut self, influence: usize) -> Result<(), SceneError> {
        self.check_influence(influence)?;
        for row in &mut self.weights {
            row.fill(0.0);
            row[influence] = 1.0;
        }
        Ok(())
    }

    /// One influence's weight across all points, in point index order.
    pub fn influence_weights(&self, influence: usize) -> Result<Vec<f32>, SceneError> {
        self.check_influence(influence)?;
        Ok(self.weights.iter().map(|row| row[influence]).collect())
    }

    /// Renormalize every row to sum 1. Zero rows collapse onto influence 0.
    pub fn normalize_all(&mut self) {
        for row in &mut self.weights {
            let sum: f32 = row.iter().sum();
            if sum > f32::EPSILON {
                for w in row.iter_mut() {
                    *w /= sum;
                }
            } else {
                row.fill(0.0);
                row[0] = 1.0;
            }
        }
    }
}
