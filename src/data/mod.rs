/// Data layer: core types, loading, filtering, and statistics.
///
/// Architecture:
/// ```text
///  tabla_integral_criticos_2024.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate columns → Dataset (memoized by mtime)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<School>, comuna index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  comuna/category predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  Pearson correlation over the filtered view
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
