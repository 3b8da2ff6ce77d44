//! Sampling without replacement from catalog lists.
//!
//! Each draw removes the chosen item from the pool, so later draws in the
//! same generation can never repeat it.

use rand::Rng;
use rand::rngs::StdRng;

/// A shrinking pool of candidates.
#[derive(Debug, Clone)]
pub struct CandidatePool<T> {
    items: Vec<T>,
}

impl<T> CandidatePool<T> {
    /// Pool over `items`.
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Candidates not yet drawn.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether every candidate has been drawn.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop candidates failing `keep` without drawing them.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    /// Remove and return one uniformly chosen candidate.
    pub fn draw(&mut self, rng: &mut StdRng) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.items.len());
        Some(self.items.swap_remove(index))
    }

    /// Draw up to `count` candidates; fewer if the pool runs dry.
    pub fn draw_up_to(&mut self, rng: &mut StdRng, count: usize) -> Vec<T> {
        let mut drawn = Vec::with_capacity(count.min(self.items.len()));
        while drawn.len() < count {
            match self.draw(rng) {
                Some(item) => drawn.push(item),
                None => break,
            }
        }
        drawn
    }
}

impl<T> FromIterator<T> for CandidatePool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
