pub mod keyword;
pub mod normalize;
pub mod scorer;

pub use keyword::pick_keyword;
pub use normalize::{MIN_QUERY_CHARS, NormalizedQuery, is_searchable};
pub use scorer::{MAX_RESULTS, Scorer, ScoringWeights, search};
