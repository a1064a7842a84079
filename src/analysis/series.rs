use crate::query::SourceRow;

/// Source labels and their cell class counts, aligned by position.
///
/// Position `i` of the labels and of [`SourceSeries::counts`] always refers to
/// the same source. Order is whatever the rows arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSeries {
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl SourceSeries {
    /// Extracts the label and count columns from query rows.
    pub fn from_rows(rows: &[SourceRow]) -> Self {
        let (labels, counts) = rows
            .iter()
            .map(|row| (row.label.clone(), row.count))
            .unzip();

        Self { labels, counts }
    }

    /// Number of sources in the series
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if the series holds no sources
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Returns true if counts never increase from one position to the next.
    ///
    /// The ranking in [`SourceSeries::top`] is only meaningful when this holds.
    pub fn is_descending(&self) -> bool {
        self.counts.windows(2).all(|pair| pair[0] >= pair[1])
    }

    /// Reorders the series by descending count.
    ///
    /// The sort is stable: sources with equal counts keep their relative order.
    pub fn sorted_descending(self) -> Self {
        let mut pairs: Vec<(String, u64)> = self.labels.into_iter().zip(self.counts).collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));

        let (labels, counts) = pairs.into_iter().unzip();
        Self { labels, counts }
    }

    /// Takes the first `n` sources, or all of them if there are fewer.
    ///
    /// No sorting happens here; callers wanting a ranking must pass a descending series.
    pub fn top(&self, n: usize) -> TopSources<'_> {
        let len = n.min(self.len());
        TopSources {
            labels: &self.labels[..len],
            counts: &self.counts[..len],
        }
    }
}

/// Borrowed view over the leading entries of a [`SourceSeries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopSources<'a> {
    labels: &'a [String],
    counts: &'a [u64],
}

impl<'a> TopSources<'a> {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn labels(&self) -> &'a [String] {
        self.labels
    }

    pub fn counts(&self) -> &'a [u64] {
        self.counts
    }

    /// Iterates `(label, count)` pairs in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        let (labels, counts) = (self.labels, self.counts);
        labels
            .iter()
            .map(String::as_str)
            .zip(counts.iter().copied())
    }
}
