use async_trait::async_trait;

use crate::adapter::{AdClassifier, HateClassifier, HateLabel, HateScore};

// Weighted term lists. These back the standalone deployment; swapping in a
// model-backed implementation only requires another HateClassifier /
// AdClassifier impl.
//
// Multi-word ASCII phrases match as substrings, single ASCII words match
// whole tokens only (so "free" does not hit "freedom"), and Korean terms
// match as substrings since particles attach directly to the stem.

const HATE_TERMS: &[(&str, f64)] = &[
    ("죽어버려", 2.0),
    ("꺼져", 1.25),
    ("벌레만도", 1.5),
    ("기생충같은", 1.5),
    ("틀딱", 1.5),
    ("급식충", 1.5),
    ("한남충", 2.0),
    ("김치녀", 2.0),
    ("go die", 2.0),
    ("kill yourself", 2.0),
    ("subhuman", 2.0),
    ("vermin", 1.5),
    ("scum", 1.25),
];

const AD_TERMS: &[(&str, f64)] = &[
    ("광고", 1.5),
    ("할인", 1.0),
    ("무료", 1.0),
    ("이벤트", 0.75),
    ("쿠폰", 1.0),
    ("구매링크", 1.5),
    ("클릭", 1.0),
    ("문의주세요", 0.75),
    ("buy now", 1.5),
    ("click here", 1.5),
    ("limited offer", 1.5),
    ("discount", 1.0),
    ("free", 0.75),
    ("telegram", 1.0),
    ("whatsapp", 1.0),
];

fn lexicon_score(text: &str, terms: &[(&str, f64)]) -> f64 {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    terms
        .iter()
        .filter(|(term, _)| hits(&lowered, &tokens, term))
        .map(|(_, weight)| weight)
        .sum()
}

fn hits(lowered: &str, tokens: &[&str], term: &str) -> bool {
    if term.is_ascii() && !term.contains(' ') {
        tokens.iter().any(|token| *token == term)
    } else {
        lowered.contains(term)
    }
}

/// Squash an unbounded additive score into a probability. A single
/// full-weight hit (1.0) lands exactly on the decision boundary.
fn squash(score: f64) -> f64 {
    score / (score + 1.0)
}

/// Term-list hate classifier. Stands in for an external pretrained model;
/// deterministic and dependency-free, which also makes it the test backend.
#[derive(Debug, Default)]
pub struct LexiconHateClassifier;

#[async_trait]
impl HateClassifier for LexiconHateClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<HateScore> {
        let hate_prob = squash(lexicon_score(text, HATE_TERMS));
        let label = if hate_prob >= 0.5 {
            HateLabel::Hate
        } else {
            HateLabel::Clean
        };
        Ok(HateScore {
            label,
            confidence: hate_prob.max(1.0 - hate_prob),
            hate_prob,
        })
    }
}

/// Term-list advertisement classifier.
#[derive(Debug, Default)]
pub struct LexiconAdClassifier;

#[async_trait]
impl AdClassifier for LexiconAdClassifier {
    async fn classify(&self, text: &str) -> anyhow::Result<f64> {
        Ok(squash(lexicon_score(text, AD_TERMS)))
    }
}
