//! Fixed constants of the order core.

/// Number of items included in the list-view preview.
pub const ITEMS_PREVIEW_LIMIT: usize = 3;

/// Length of the random suffix in generated order numbers.
pub const ORDER_NUMBER_SUFFIX_LEN: usize = 6;
