//! Piecewise cubic Bezier path used by enemy ships
//!
//! The curve is defined in offsets from the enemy's spawn point and is
//! flattened once into a polyline with cumulative lengths, so followers move
//! at constant speed along it.

use glam::Vec2;

/// Polyline samples per cubic segment
const SAMPLES_PER_SEGMENT: usize = 32;

/// One cubic Bezier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

impl CubicSegment {
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.from * (u * u * u)
            + self.ctrl1 * (3.0 * u * u * t)
            + self.ctrl2 * (3.0 * u * t * t)
            + self.to * (t * t * t)
    }
}

/// Arc-length parameterized path
#[derive(Debug, Clone)]
pub struct BezierPath {
    segments: Vec<CubicSegment>,
    samples: Vec<Vec2>,
    /// `lengths[i]` is the distance along the path to `samples[i]`
    lengths: Vec<f32>,
}

impl BezierPath {
    /// Build from a start point and `(ctrl1, ctrl2, to)` triples
    pub fn new(start: Vec2, curves: &[(Vec2, Vec2, Vec2)]) -> Self {
        let mut segments = Vec::with_capacity(curves.len());
        let mut from = start;
        for &(ctrl1, ctrl2, to) in curves {
            segments.push(CubicSegment {
                from,
                ctrl1,
                ctrl2,
                to,
            });
            from = to;
        }

        let mut samples = Vec::with_capacity(segments.len() * SAMPLES_PER_SEGMENT + 1);
        samples.push(start);
        for segment in &segments {
            for i in 1..=SAMPLES_PER_SEGMENT {
                samples.push(segment.point(i as f32 / SAMPLES_PER_SEGMENT as f32));
            }
        }

        let mut lengths = Vec::with_capacity(samples.len());
        let mut total = 0.0;
        lengths.push(0.0);
        for pair in samples.windows(2) {
            total += pair[0].distance(pair[1]);
            lengths.push(total);
        }

        Self {
            segments,
            samples,
            lengths,
        }
    }

    /// The swooping dive enemy ships fly, ending one field height below the spawn point
    pub fn enemy_dive(field_height: f32) -> Self {
        let y_max = -field_height;
        let v = Vec2::new;
        Self::new(
            v(0.5, -0.5),
            &[
                (v(0.5, -0.5), v(4.55, -29.48), v(-2.5, -59.5)),
                (v(-9.55, -89.52), v(-43.32, -115.43), v(-27.5, -154.5)),
                (v(-11.68, -193.57), v(17.28, -186.95), v(30.5, -243.5)),
                (v(43.72, -300.05), v(-47.71, -335.76), v(-52.5, -379.5)),
                (v(-57.29, -423.24), v(-8.14, -482.45), v(54.5, -449.5)),
                (v(117.14, -416.55), v(52.25, -308.62), v(-5.5, -348.5)),
                (v(-63.25, -388.38), v(-14.48, -457.43), v(10.5, -494.5)),
                (v(23.74, -514.16), v(6.93, -537.57), v(0.5, -559.5)),
                (v(-5.2, y_max), v(-2.5, y_max), v(-2.5, y_max)),
            ],
        )
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Vec2 {
        self.samples.first().copied().unwrap_or(Vec2::ZERO)
    }

    /// Index of the polyline span containing `distance`
    fn span_at(&self, distance: f32) -> usize {
        let idx = self.lengths.partition_point(|&len| len <= distance);
        idx.clamp(1, self.samples.len().saturating_sub(1).max(1))
    }

    /// Offset at `fraction` (0..=1) of the path's length
    pub fn point_at(&self, fraction: f32) -> Vec2 {
        if self.samples.len() < 2 {
            return self.start();
        }
        let distance = fraction.clamp(0.0, 1.0) * self.length();
        let i = self.span_at(distance);
        let (d0, d1) = (self.lengths[i - 1], self.lengths[i]);
        let t = if d1 > d0 { (distance - d0) / (d1 - d0) } else { 0.0 };
        self.samples[i - 1].lerp(self.samples[i], t.clamp(0.0, 1.0))
    }

    /// Heading (radians) of the path at `fraction`
    pub fn heading_at(&self, fraction: f32) -> f32 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        let i = self.span_at(fraction.clamp(0.0, 1.0) * self.length());
        let dir = self.samples[i] - self.samples[i - 1];
        dir.y.atan2(dir.x)
    }
}
