//! Internal implementation details.

pub(crate) mod circular;
