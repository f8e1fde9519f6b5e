//! Replayable step sequence recorded by each recomputation.
//!
//! A `StepTrace` is fully materialised before anyone sees it and is replaced
//! wholesale by the next recomputation. Clones share one `Arc<[Step]>`, so a
//! renderer on another thread can own a snapshot without copying the steps.

use std::sync::Arc;

use crate::geom::Point;
use crate::layer::Layer;

/// One stage of a peeling run: the points still present before the peel and
/// the hull taken from them.
///
/// `remaining` is always in storage order. For the final 1–2 point tail the
/// hull holds the same points sorted lexicographically.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub remaining: Vec<Point>,
    pub hull: Layer,
}

/// Ordered steps of one recomputation (one per produced layer).
#[derive(Clone, Debug, PartialEq)]
pub struct StepTrace {
    steps: Arc<[Step]>,
}

impl Default for StepTrace {
    fn default() -> Self {
        Self {
            steps: Arc::from(Vec::new()),
        }
    }
}

impl From<Vec<Step>> for StepTrace {
    fn from(steps: Vec<Step>) -> Self {
        Self {
            steps: Arc::from(steps),
        }
    }
}

impl StepTrace {
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Owning iterator from the first step. Call again to restart.
    pub fn replay(&self) -> Replay {
        Replay {
            steps: Arc::clone(&self.steps),
            pos: 0,
        }
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning cursor over a `StepTrace` snapshot; yields cloned steps.
#[derive(Clone, Debug)]
pub struct Replay {
    steps: Arc<[Step]>,
    pos: usize,
}

impl Iterator for Replay {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let step = self.steps.get(self.pos)?.clone();
        self.pos += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps.len() - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Replay {}

/// Uniform scale plus offset that centres every point of a trace in a
/// `width × height` viewport, leaving `margin` on each side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewFit {
    pub scale: f64,
    pub offset: Point,
}

impl ViewFit {
    /// Zero data extents are treated as 1 so single points and axis-aligned
    /// segments still get a finite scale. An empty trace maps identically.
    pub fn fit(trace: &StepTrace, width: f64, height: f64, margin: f64) -> Self {
        let mut pts = trace.iter().flat_map(|s| s.remaining.iter());
        let Some(first) = pts.next() else {
            return Self {
                scale: 1.0,
                offset: Point::zeros(),
            };
        };
        let (mut min, mut max) = (*first, *first);
        for p in pts {
            min = min.inf(p);
            max = max.sup(p);
        }
        let extent = max - min;
        let data_w = if extent.x != 0.0 { extent.x } else { 1.0 };
        let data_h = if extent.y != 0.0 { extent.y } else { 1.0 };
        let scale = ((width - 2.0 * margin) / data_w).min((height - 2.0 * margin) / data_h);
        let center = (min + max) * 0.5;
        Self {
            scale,
            offset: -center * scale,
        }
    }

    #[inline]
    pub fn to_screen(&self, p: Point) -> Point {
        p * self.scale + self.offset
    }
}
