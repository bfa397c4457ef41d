//! Group-and-count over fetched catalog pages.
//!
//! A movie contributes iff its director is non-blank after trimming. What it
//! contributes *to* depends on the `DirectorKeyPolicy`.

use std::collections::HashMap;

use catalog::{Movie, MoviesPage};
use rayon::prelude::*;

/// How a director string becomes a group key.
///
/// `Raw` keeps the upstream string exactly, so `"Nolan"` and `" Nolan"`
/// are two groups. `Trimmed` folds surrounding whitespace away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DirectorKeyPolicy {
    #[default]
    Raw,
    Trimmed,
}

impl DirectorKeyPolicy {
    /// Group key for `movie`, or `None` if it does not contribute.
    pub fn key<'a>(&self, movie: &'a Movie) -> Option<&'a str> {
        let name = movie.director_name()?;
        Some(match self {
            DirectorKeyPolicy::Raw => name,
            DirectorKeyPolicy::Trimmed => name.trim(),
        })
    }
}

/// Movie count per director across a set of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorTally {
    counts: HashMap<String, u64>,
}

impl DirectorTally {
    /// Count every contributing movie in `pages`.
    ///
    /// Pages are folded in parallel with Rayon and the partial maps merged,
    /// so the result is independent of page order.
    pub fn from_pages(pages: &[MoviesPage], policy: DirectorKeyPolicy) -> Self {
        let counts = pages
            .par_iter()
            .flat_map_iter(|page| page.data.iter())
            .filter_map(|movie| policy.key(movie))
            .fold(HashMap::new, |mut counts: HashMap<String, u64>, key| {
                match counts.get_mut(key) {
                    Some(count) => *count += 1,
                    None => {
                        counts.insert(key.to_owned(), 1);
                    }
                }
                counts
            })
            .reduce(HashMap::new, merge_counts);

        Self { counts }
    }

    /// Movies attributed to `director` (0 if unknown).
    pub fn count(&self, director: &str) -> u64 {
        self.counts.get(director).copied().unwrap_or(0)
    }

    /// Number of distinct directors seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Directors with strictly more than `threshold` movies, ascending.
    pub fn above(&self, threshold: u64) -> Vec<String> {
        let mut directors: Vec<String> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count > threshold)
            .map(|(director, _)| director.clone())
            .collect();

        directors.sort_unstable();
        directors
    }
}

fn merge_counts(
    mut left: HashMap<String, u64>,
    right: HashMap<String, u64>,
) -> HashMap<String, u64> {
    // Keep the larger map as the accumulator
    if left.len() < right.len() {
        return merge_counts(right, left);
    }
    for (director, count) in right {
        *left.entry(director).or_insert(0) += count;
    }
    left
}
