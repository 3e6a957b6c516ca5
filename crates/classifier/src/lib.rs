pub mod adapter;
pub mod lexicon;

pub use adapter::{is_ad, AdClassifier, HateClassifier, HateLabel, HateScore, AD_PROBABILITY_CUTOFF};
pub use lexicon::{LexiconAdClassifier, LexiconHateClassifier};
