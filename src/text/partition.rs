//! Contiguous partitioning of lists into work chunks
//!
//! Splits a list into `num_chunks` equally sized, contiguous chunks for batch or
//! parallel downstream processing. Chunk boundaries depend only on the list
//! length and the chunk count.

use serde::Deserialize;
use std::ops::Range;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Invalid partition count: number of chunks must be at least 1")]
    InvalidPartitionCount,
}

pub type Result<T> = std::result::Result<T, PartitionError>;

/// Where the chunk walk stops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartitionBoundary {
    /// Chunk starts must be `< len - 1`.
    ///
    /// A trailing chunk that would start on the very last element is never
    /// produced, so that element is dropped (e.g. 7 items in 3 chunks yields
    /// `[0,1] [2,3] [4,5]`, and 3 items in 3 chunks yields `[0] [1]`).
    #[default]
    Legacy,
    /// Chunk starts must be `< len`, every element is covered.
    Exclusive,
}

impl PartitionBoundary {
    fn walk_end(&self, len: usize) -> usize {
        match self {
            Self::Legacy => len.saturating_sub(1),
            Self::Exclusive => len,
        }
    }
}

/// Calculate chunk index ranges for a list of `len` items
///
/// `chunk_size = len / num_chunks`; chunks start at multiples of `chunk_size`
/// and the last one is clamped to `len`, so there may be one more chunk than
/// requested when `len` is not a multiple of `num_chunks`.
/// When `chunk_size` is 0 (more chunks than items) the walk is degenerate and
/// no chunk is produced.
pub fn chunk_ranges(
    len: usize,
    num_chunks: usize,
    boundary: PartitionBoundary,
) -> Result<Vec<Range<usize>>> {
    if num_chunks == 0 {
        return Err(PartitionError::InvalidPartitionCount);
    }
    let chunk_size = len / num_chunks;
    if chunk_size == 0 {
        tracing::warn!(
            "degenerate partition: {} chunks requested for {} items",
            num_chunks,
            len
        );
        return Ok(Vec::new());
    }
    let ranges = (0..boundary.walk_end(len))
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(len))
        .collect::<Vec<_>>();
    tracing::debug!(
        "partitioned {} items into {} chunks of size {} ({:?})",
        len,
        ranges.len(),
        chunk_size,
        boundary
    );
    Ok(ranges)
}

/// Partition `items` into contiguous chunks using the [`PartitionBoundary::Legacy`] walk
pub fn partition<T>(items: &[T], num_chunks: usize) -> Result<Vec<&[T]>> {
    partition_with(items, num_chunks, PartitionBoundary::Legacy)
}

/// Partition `items` into contiguous chunks with the given walk boundary
pub fn partition_with<T>(
    items: &[T],
    num_chunks: usize,
    boundary: PartitionBoundary,
) -> Result<Vec<&[T]>> {
    Ok(chunk_ranges(items.len(), num_chunks, boundary)?
        .into_iter()
        .map(|r| &items[r])
        .collect())
}
