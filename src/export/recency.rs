//! Recency ordering for exported resources.
//!
//! Resources are sorted by `last_access`, most recent first. The sort is
//! stable: resources with equal timestamps keep their accumulation order.

use std::cmp::Ordering;

use crate::report::ReportResource;

/// Sorts resources by `last_access` descending, preserving input order for
/// ties.
pub fn sort_by_recency(resources: &mut [ReportResource]) {
    resources.sort_by(compare_recency);
}

fn compare_recency(a: &ReportResource, b: &ReportResource) -> Ordering {
    b.last_access.cmp(&a.last_access)
}
