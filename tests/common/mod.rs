#![allow(dead_code)]

pub use officedag_test_utils::builders;
pub use officedag_test_utils::{init_tracing, with_timeout};

/// Sorted copy of a list of ids, for order-insensitive comparisons.
pub fn sorted(ids: &[String]) -> Vec<String> {
    let mut v = ids.to_vec();
    v.sort();
    v
}

pub fn ids_of(tasks: &[officedag::Task]) -> Vec<String> {
    tasks.iter().map(|t| t.id.clone()).collect()
}
