/// Data layer: core types, loading, and caching.
///
/// Architecture:
/// ```text
///   ladybug_final.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → CommuteTable (schema checked against ModeCatalog)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  load once, hand out Arc<CommuteTable>
///   └──────────┘
///        │
///        ▼
///   aggregate / chart / layout
/// ```

pub mod cache;
pub mod loader;
pub mod mode;
pub mod model;
