use async_trait::async_trait;

/// Ads are anything at or above this probability.
pub const AD_PROBABILITY_CUTOFF: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HateLabel {
    Hate,
    Clean,
}

/// Raw output of a hate-speech classifier backend: the predicted label, the
/// probability of that label, and the probability of the hate class
/// specifically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HateScore {
    pub label: HateLabel,
    pub confidence: f64,
    pub hate_prob: f64,
}

impl HateScore {
    /// Low-confidence predictions fall back to the non-hate label.
    pub fn effective_label(&self) -> HateLabel {
        if self.confidence < 0.5 {
            HateLabel::Clean
        } else {
            self.label
        }
    }
}

/// Hate-speech classification capability. Backends are expected to be
/// deterministic for a given input; everything else (model choice, device,
/// remote vs local inference) is the implementation's business.
#[async_trait]
pub trait HateClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<HateScore>;
}

/// Advertisement classification capability: the probability in [0, 1] that
/// the message is ad copy.
#[async_trait]
pub trait AdClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> anyhow::Result<f64>;
}

pub fn is_ad(ad_prob: f64) -> bool {
    ad_prob >= AD_PROBABILITY_CUTOFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_confidence_forces_clean_label() {
        let score = HateScore {
            label: HateLabel::Hate,
            confidence: 0.49,
            hate_prob: 0.49,
        };
        assert_eq!(score.effective_label(), HateLabel::Clean);

        let confident = HateScore {
            confidence: 0.5,
            ..score
        };
        assert_eq!(confident.effective_label(), HateLabel::Hate);
    }

    #[test]
    fn ad_cutoff_is_inclusive() {
        assert!(is_ad(0.5));
        assert!(!is_ad(0.4999));
    }
}
