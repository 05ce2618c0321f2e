use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::table::AggregateTable;

#[derive(Clone, PartialEq, Debug, Constructor, Dissolve, Getters)]
pub struct Quantification {
    table: AggregateTable,
    // Reads excluded from the table because they couldn't be parsed or processed
    failed: u64,
    // The run was cancelled before all reads were processed
    cancelled: bool,
    // Wall time of the run
    time_s: f64,
}
