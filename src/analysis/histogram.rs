use std::collections::BTreeMap;

/// Frequency of each distinct count value.
///
/// Maps a number of cell classes to how many sources were cited by exactly that
/// many classes. Keys iterate in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountHistogram {
    frequencies: BTreeMap<u64, usize>,
}

impl CountHistogram {
    /// Builds the histogram of `counts`.
    pub fn from_counts(counts: &[u64]) -> Self {
        let mut frequencies = BTreeMap::new();
        for &count in counts {
            *frequencies.entry(count).or_insert(0) += 1;
        }

        Self { frequencies }
    }

    /// Number of distinct count values
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Total number of sources the histogram was built from.
    pub fn total_sources(&self) -> usize {
        self.frequencies.values().sum()
    }

    /// Iterates `(count, sources)` pairs in ascending count order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, usize)> + '_ {
        self.frequencies
            .iter()
            .map(|(&count, &sources)| (count, sources))
    }

    /// Plot points for the distribution panel: `(sources, count)`.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.iter()
            .map(|(count, sources)| (sources as f64, count as f64))
    }
}
