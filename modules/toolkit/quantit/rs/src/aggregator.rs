use crate::classify::{Label, ReadOutcome};
use crate::error::{Error, Result};
use crate::reference::ReferenceSet;
use crate::table::AggregateTable;

/// Running frequency tables for a read set.
///
/// Accumulation is commutative: the final table doesn't depend on the order of reads,
/// and partial aggregators over disjoint shards can be merged in any order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Aggregator {
    table: AggregateTable,
}

impl Aggregator {
    pub fn new(references: &ReferenceSet) -> Self {
        Self {
            table: AggregateTable::new(references),
        }
    }

    pub fn table(&self) -> &AggregateTable {
        &self.table
    }

    /// Count the read outcome. Nothing is recorded if the outcome doesn't fit the table.
    pub fn accumulate(&mut self, outcome: &ReadOutcome) -> Result<()> {
        let ind = *outcome.reference();
        let counts = self.table.get_mut(ind).ok_or_else(|| {
            Error::invalid_input(format!("Outcome refers to an unknown reference {ind}"))
        })?;

        let label = *outcome.label();
        let events = match label {
            // Only the label is counted for reads without a trusted reference assignment
            Label::Ambiguous | Label::Unaligned => &[][..],
            Label::Unmodified | Label::ModifiedInWindow | Label::ModifiedOutsideWindow => {
                let events = outcome.events().as_slice();
                if label.is_modified() == events.is_empty() {
                    return Err(Error::invalid_input(format!(
                        "Outcome label {label:?} is inconsistent with {} edit event(s)",
                        events.len()
                    )));
                }
                events
            }
        };
        if let Some(event) = events.iter().find(|x| *x.start() >= counts.len()) {
            return Err(Error::invalid_input(format!(
                "Edit event at {} is outside of the reference {} (length {})",
                event.start(),
                counts.name(),
                counts.len()
            )));
        }

        counts.counters_mut().add(label);
        for event in events {
            counts.add_event(*event.kind(), *event.start(), event.size());
        }
        Ok(())
    }

    /// Immutable copy of the current state.
    pub fn snapshot(&self) -> AggregateTable {
        self.table.clone()
    }

    pub fn merge(&mut self, other: &Aggregator) -> Result<()> {
        self.table.merge(&other.table)
    }

    /// Zero all counters, keeping the table shape.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    pub fn into_table(self) -> AggregateTable {
        self.table
    }
}
