/// Data layer: pair names, file conventions, loading and discovery.
///
/// Architecture:
/// ```text
///  <dir>/a_b.hm + a_b.ref   (or a_b__heatmap.txt + a_b__refFrames.txt)
///        │
///        ▼
///   ┌───────────┐
///   │ discovery  │  list dir → distinct stems
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  naming convention → parse → validate → MotionPairDataset
///   └──────────┘
/// ```

pub mod discovery;
pub mod loader;
pub mod model;
pub mod naming;
