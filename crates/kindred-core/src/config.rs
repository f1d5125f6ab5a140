//! Production configuration constants.
//!
//! These values define the default query parameters shared by every
//! front-end (CLI, HTTP, tests) so that all consumers of the engine
//! agree on the same defaults.

/// Default number of recommendations returned by `recommend`.
///
/// The engine caps the result at `N - 1` (the query item itself is never
/// returned), so catalogs smaller than this constant simply return fewer
/// titles.
pub const DEFAULT_TOP_K: usize = 5;

/// Default maximum number of matches returned by substring search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default page size for listing titles in record order.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// zstd compression level used when writing artifact containers.
///
/// Level 3 is the zstd default: fast to decompress and small enough for
/// catalogs in the tens of thousands of items. The loader accepts any
/// level, so this only matters to tooling that produces artifacts.
pub const ARTIFACT_COMPRESSION_LEVEL: i32 = 3;
