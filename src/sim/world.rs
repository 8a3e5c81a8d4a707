//! Scrolling ground
//!
//! A handful of ground segments leapfrog each other as the world moves
//! toward the player, giving an endless track from a fixed set of pieces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ground {
    segment_length: f32,
    /// z of each segment's center; segment 0 starts under the player
    segments: Vec<f32>,
}

impl Ground {
    pub fn new(segment_count: usize, segment_length: f32) -> Self {
        let mut ground = Self {
            segment_length,
            segments: vec![0.0; segment_count],
        };
        ground.reset();
        ground
    }

    /// Lay the segments back out end to end ahead of the player
    pub fn reset(&mut self) {
        for (i, z) in self.segments.iter_mut().enumerate() {
            *z = -(i as f32) * self.segment_length;
        }
    }

    pub fn segments(&self) -> &[f32] {
        &self.segments
    }

    /// Scroll by `distance`; a segment that has fully passed the player is
    /// moved to the far end of the track.
    pub fn advance(&mut self, distance: f32) {
        for z in &mut self.segments {
            *z += distance;
        }
        for i in 0..self.segments.len() {
            if self.segments[i] > self.segment_length {
                let furthest = self.segments.iter().copied().fold(0.0_f32, f32::min);
                self.segments[i] = furthest - self.segment_length;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let ground = Ground::new(3, 50.0);
        assert_eq!(ground.segments(), &[0.0, -50.0, -100.0]);
    }

    #[test]
    fn test_passed_segment_leapfrogs_to_back() {
        let mut ground = Ground::new(3, 50.0);
        ground.advance(51.0);
        assert_eq!(ground.segments(), &[-99.0, 1.0, -49.0]);
    }

    #[test]
    fn test_track_stays_contiguous() {
        let mut ground = Ground::new(3, 50.0);
        for _ in 0..1000 {
            ground.advance(0.7);
        }
        let mut z: Vec<f32> = ground.segments().to_vec();
        z.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in z.windows(2) {
            assert!((pair[1] - pair[0] - 50.0).abs() < 0.1);
        }
    }
}
