//! Corner-seeded flood fill segmentation
//!
//! The reference color is sampled once from the top-left pixel before
//! anything is modified. Each corner whose color is within tolerance of the
//! reference becomes a seed, and a breadth-first search then erases every
//! pixel 4-connected to a seed through a chain of pixels that are all within
//! tolerance of that same reference. Similarity is never measured against a
//! neighbor, so the fill cannot drift along a gradient.
//!
//! Erased pixels are written as (0,0,0,0): the original color is discarded,
//! not just hidden behind a cleared alpha.
//!
//! The reference comes strictly from (0,0). A logo that touches the top-left
//! corner therefore seeds against the logo's own color; callers that know
//! better can supply the reference explicitly with
//! [`FloodFillSegmenter::with_reference_color`].

use crate::{
    config::RemovalMode,
    error::Result,
    segmenter::BackgroundSegmenter,
    types::{PixelBuffer, TRANSPARENT},
    utils::{is_similar, rgb_of},
};
use image::Rgb;
use std::collections::VecDeque;
use tracing::{debug, instrument, trace};

/// A 4-connected neighbor direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Default neighbor visiting order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Neighbor of (x, y) in this direction, if it lies inside a
    /// `width`×`height` grid
    #[must_use]
    pub fn step(self, x: u32, y: u32, width: u32, height: u32) -> Option<(u32, u32)> {
        match self {
            Direction::Left => x.checked_sub(1).map(|nx| (nx, y)),
            Direction::Right => x.checked_add(1).filter(|&nx| nx < width).map(|nx| (nx, y)),
            Direction::Up => y.checked_sub(1).map(|ny| (x, ny)),
            Direction::Down => y.checked_add(1).filter(|&ny| ny < height).map(|ny| (x, ny)),
        }
    }
}

/// Coordinates already classified as background during one run
///
/// Backed by one flag per pixel; it only ever grows.
#[derive(Debug, Clone)]
pub struct VisitedSet {
    width: u32,
    flags: Vec<bool>,
    len: usize,
}

impl VisitedSet {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            flags: vec![false; width as usize * height as usize],
            len: 0,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Mark (x, y); returns `false` if it was already present
    pub fn insert(&mut self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        match self.flags.get_mut(idx) {
            Some(flag) if !*flag => {
                *flag = true;
                self.len += 1;
                true
            },
            _ => false,
        }
    }

    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.flags.get(self.index(x, y)).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The four corners of a `width`×`height` grid, without duplicates
///
/// Degenerate shapes (single row, single column, 1×1) share corners.
#[must_use]
pub fn corner_seeds(width: u32, height: u32) -> Vec<(u32, u32)> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let (right, bottom) = (width - 1, height - 1);
    let mut corners = Vec::with_capacity(4);
    for corner in [(0, 0), (right, 0), (0, bottom), (right, bottom)] {
        if !corners.contains(&corner) {
            corners.push(corner);
        }
    }
    corners
}

/// Flood fill segmenter parameterized by its color tolerance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloodFillSegmenter {
    tolerance: u8,
    reference: Option<Rgb<u8>>,
    neighbor_order: [Direction; 4],
}

impl FloodFillSegmenter {
    #[must_use]
    pub fn new(tolerance: u8) -> Self {
        Self {
            tolerance,
            reference: None,
            neighbor_order: Direction::ALL,
        }
    }

    /// Match against a fixed color instead of sampling pixel (0, 0)
    #[must_use]
    pub fn with_reference_color(mut self, reference: Rgb<u8>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Visit neighbors in the given order
    ///
    /// The set of erased pixels does not depend on this order; it only
    /// changes the sequence in which they are reached.
    #[must_use]
    pub fn with_neighbor_order(mut self, order: [Direction; 4]) -> Self {
        self.neighbor_order = order;
        self
    }

    #[must_use]
    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Reference color this run would match against
    pub fn reference_color(&self, buffer: &PixelBuffer) -> Result<Rgb<u8>> {
        match self.reference {
            Some(color) => Ok(color),
            None => Ok(rgb_of(buffer.get(0, 0)?)),
        }
    }

    /// Corners that qualify as seeds against `reference`
    pub fn active_seeds(&self, buffer: &PixelBuffer, reference: Rgb<u8>) -> Result<Vec<(u32, u32)>> {
        let (width, height) = buffer.dimensions();
        let mut seeds = Vec::new();
        for (x, y) in corner_seeds(width, height) {
            if is_similar(rgb_of(buffer.get(x, y)?), reference, self.tolerance) {
                seeds.push((x, y));
            }
        }
        Ok(seeds)
    }

    /// Run the fill and return the set of erased coordinates
    #[instrument(skip(self, buffer), fields(tolerance = self.tolerance))]
    pub fn fill(&self, buffer: &mut PixelBuffer) -> Result<VisitedSet> {
        let (width, height) = buffer.dimensions();
        let mut visited = VisitedSet::new(width, height);
        if width == 0 || height == 0 {
            return Ok(visited);
        }

        let reference = self.reference_color(buffer)?;
        let mut queue = VecDeque::new();
        for (x, y) in self.active_seeds(buffer, reference)? {
            if visited.insert(x, y) {
                queue.push_back((x, y));
            }
        }

        debug!(
            reference = ?reference.0,
            seeds = queue.len(),
            width,
            height,
            "flood fill seeded"
        );

        if queue.is_empty() {
            return Ok(visited);
        }

        // Only visited pixels are ever overwritten, so an unvisited neighbor
        // still holds its original color when it is tested.
        while let Some((x, y)) = queue.pop_front() {
            buffer.set(x, y, TRANSPARENT)?;

            for direction in self.neighbor_order {
                let Some((nx, ny)) = direction.step(x, y, width, height) else {
                    continue;
                };
                if visited.contains(nx, ny) {
                    continue;
                }
                if is_similar(rgb_of(buffer.get(nx, ny)?), reference, self.tolerance) {
                    visited.insert(nx, ny);
                    queue.push_back((nx, ny));
                }
            }
        }

        trace!(erased = visited.len(), "flood fill queue drained");
        Ok(visited)
    }
}

impl BackgroundSegmenter for FloodFillSegmenter {
    fn mode(&self) -> RemovalMode {
        RemovalMode::Flood
    }

    fn segment(&self, buffer: &mut PixelBuffer) -> Result<usize> {
        self.fill(buffer).map(|visited| visited.len())
    }
}
