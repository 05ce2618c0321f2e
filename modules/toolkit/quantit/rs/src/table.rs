use std::collections::BTreeMap;

#[cfg(feature = "bitcode")]
use bitcode::{Decode, Encode};
use derive_getters::{Dissolve, Getters};
use itertools::izip;

use crate::classify::{EditKind, Label};
use crate::error::{Error, Result};
use crate::reference::ReferenceSet;

/// Read counts per outcome label
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Getters, Dissolve)]
pub struct Counters {
    total: u64,
    unmodified: u64,
    modified_in_window: u64,
    modified_outside_window: u64,
    ambiguous: u64,
    unaligned: u64,
}

impl Counters {
    pub fn get(&self, label: Label) -> u64 {
        match label {
            Label::Unmodified => self.unmodified,
            Label::ModifiedInWindow => self.modified_in_window,
            Label::ModifiedOutsideWindow => self.modified_outside_window,
            Label::Ambiguous => self.ambiguous,
            Label::Unaligned => self.unaligned,
        }
    }

    /// Reads with at least one edit, inside or outside of the window
    pub fn modified(&self) -> u64 {
        self.modified_in_window + self.modified_outside_window
    }

    pub(crate) fn add(&mut self, label: Label) {
        self.total += 1;
        let counter = match label {
            Label::Unmodified => &mut self.unmodified,
            Label::ModifiedInWindow => &mut self.modified_in_window,
            Label::ModifiedOutsideWindow => &mut self.modified_outside_window,
            Label::Ambiguous => &mut self.ambiguous,
            Label::Unaligned => &mut self.unaligned,
        };
        *counter += 1;
    }

    pub(crate) fn merge(&mut self, other: &Self) {
        self.total += other.total;
        self.unmodified += other.unmodified;
        self.modified_in_window += other.modified_in_window;
        self.modified_outside_window += other.modified_outside_window;
        self.ambiguous += other.ambiguous;
        self.unaligned += other.unaligned;
    }
}

/// Counters of a single reference.
/// Per-position vectors count reads with an event of the given kind starting at the position.
/// Size histograms map the event size to the number of events.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Eq, PartialEq, Debug, Default, Getters, Dissolve)]
pub struct ReferenceCounts {
    name: String,
    counters: Counters,
    insertions: Vec<u64>,
    deletions: Vec<u64>,
    substitutions: Vec<u64>,
    insertion_sizes: BTreeMap<usize, u64>,
    deletion_sizes: BTreeMap<usize, u64>,
}

impl ReferenceCounts {
    pub fn new(name: String, len: usize) -> Self {
        Self {
            name,
            counters: Counters::default(),
            insertions: vec![0; len],
            deletions: vec![0; len],
            substitutions: vec![0; len],
            insertion_sizes: BTreeMap::new(),
            deletion_sizes: BTreeMap::new(),
        }
    }

    /// Number of reference positions covered by the per-position counters
    pub fn len(&self) -> usize {
        self.insertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertions.is_empty()
    }

    pub fn positions(&self, kind: EditKind) -> &[u64] {
        match kind {
            EditKind::Insertion => &self.insertions,
            EditKind::Deletion => &self.deletions,
            EditKind::Substitution => &self.substitutions,
        }
    }

    pub(crate) fn counters_mut(&mut self) -> &mut Counters {
        &mut self.counters
    }

    pub(crate) fn add_event(&mut self, kind: EditKind, start: usize, size: usize) {
        match kind {
            EditKind::Insertion => {
                self.insertions[start] += 1;
                *self.insertion_sizes.entry(size).or_default() += 1;
            }
            EditKind::Deletion => {
                self.deletions[start] += 1;
                *self.deletion_sizes.entry(size).or_default() += 1;
            }
            EditKind::Substitution => self.substitutions[start] += 1,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.counters = Counters::default();
        for counts in [
            &mut self.insertions,
            &mut self.deletions,
            &mut self.substitutions,
        ] {
            counts.fill(0);
        }
        self.insertion_sizes.clear();
        self.deletion_sizes.clear();
    }

    fn merge(&mut self, other: &Self) -> Result<()> {
        if self.name != other.name || self.len() != other.len() {
            return Err(Error::invalid_input(format!(
                "Can't merge counts of different references: {} (length {}) and {} (length {})",
                self.name,
                self.len(),
                other.name,
                other.len()
            )));
        }

        self.counters.merge(&other.counters);
        for (dst, src) in [
            (&mut self.insertions, &other.insertions),
            (&mut self.deletions, &other.deletions),
            (&mut self.substitutions, &other.substitutions),
        ] {
            for (d, s) in izip!(dst.iter_mut(), src.iter()) {
                *d += *s;
            }
        }
        for (dst, src) in [
            (&mut self.insertion_sizes, &other.insertion_sizes),
            (&mut self.deletion_sizes, &other.deletion_sizes),
        ] {
            for (size, count) in src {
                *dst.entry(*size).or_default() += *count;
            }
        }
        Ok(())
    }
}

/// Frequency tables for all references of a read set.
#[cfg_attr(feature = "bitcode", derive(Encode, Decode))]
#[derive(Clone, Eq, PartialEq, Debug, Default, Getters, Dissolve)]
pub struct AggregateTable {
    references: Vec<ReferenceCounts>,
}

impl AggregateTable {
    pub fn new(references: &ReferenceSet) -> Self {
        Self {
            references: references
                .iter()
                .map(|x| ReferenceCounts::new(x.name().clone(), x.len()))
                .collect(),
        }
    }

    pub fn get(&self, ind: usize) -> Option<&ReferenceCounts> {
        self.references.get(ind)
    }

    pub fn find(&self, name: &str) -> Option<&ReferenceCounts> {
        self.references.iter().find(|x| x.name == name)
    }

    pub(crate) fn get_mut(&mut self, ind: usize) -> Option<&mut ReferenceCounts> {
        self.references.get_mut(ind)
    }

    /// Counters summed over all references
    pub fn totals(&self) -> Counters {
        let mut totals = Counters::default();
        for reference in &self.references {
            totals.merge(&reference.counters);
        }
        totals
    }

    /// Per-cell addition of another table built for the same references.
    /// The table is left untouched if the shapes differ.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        let compatible = self.references.len() == other.references.len()
            && izip!(&self.references, &other.references)
                .all(|(a, b)| a.name == b.name && a.len() == b.len());
        if !compatible {
            return Err(Error::invalid_input(
                "Can't merge aggregate tables built for different references",
            ));
        }

        for (dst, src) in izip!(self.references.iter_mut(), &other.references) {
            dst.merge(src)?;
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        for reference in &mut self.references {
            reference.clear();
        }
    }
}
