pub mod curves;
pub mod overall;
pub mod subscores;

pub use curves::{CategoryWeight, CurveDirection, CurveSpec, ScoringPolicy};
pub use overall::compute_overall;
pub use subscores::{compute_sub_scores, SubScoreSet};
