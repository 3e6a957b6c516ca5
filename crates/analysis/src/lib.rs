pub mod pool;
pub mod service;
pub mod similarity;
pub mod virality;

pub use pool::{Message, TweetPool};
pub use service::{ViralityAnalyzer, ViralityAssessment};
pub use similarity::{pairwise_similarities, SimilarityError, SimilaritySet};
pub use virality::{
    is_viral_ad, is_viral_hate, windowed_similarities, AdVerdict, HateVerdict, ViralReason,
    ViralityParams,
};
