use std::cmp::Ordering;
use std::ops::Range;
use std::thread::available_parallelism;

use eyre::Result;

fn _normalize(requested: isize, max: isize) -> usize {
    match requested.cmp(&0) {
        Ordering::Less => (max + requested + 1).max(1) as usize,
        Ordering::Equal => 1,
        Ordering::Greater => requested.min(max) as usize,
    }
}

/// Number of threads to use for the requested value.
/// Negative values are counted back from the number of available cores, e.g. -1 means "all of them".
pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(_normalize(requested, max))
}

/// Split `total` items into consecutive, disjoint shards of at most `size` items each.
/// The shards cover 0..total in order. A zero `size` is treated as 1.
pub fn shards(total: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..total.div_ceil(size))
        .map(|ind| {
            let start = ind * size;
            start..(start + size).min(total)
        })
        .collect()
}
