use serde::{Deserialize, Serialize};

use analysis::{ViralReason, ViralityAssessment};
use classifier::{is_ad, HateLabel, HateScore};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// A missing field scores as the empty string rather than being
    /// rejected.
    #[serde(default)]
    pub text: String,
}

const HATE_LABEL: &str = "혐오";
const CLEAN_LABEL: &str = "비혐오";
const AD_LABEL: &str = "광고";
const NOT_AD_LABEL: &str = "비광고";

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub label: &'static str,
    pub hate_prob: f64,
    pub viral_hate: bool,
    pub viral_score: f64,
    pub ad_label: &'static str,
    pub ad_prob: f64,
    pub viral_ad: bool,
    pub viral_reason_ad: ViralReason,
}

impl AnalyzeResponse {
    /// The single reported `viral_score` is the ad score when the ad policy
    /// fired, otherwise the hate score.
    pub fn assemble(hate: &HateScore, ad_prob: f64, assessment: &ViralityAssessment) -> Self {
        let viral_score = if assessment.ad.viral {
            assessment.ad.score
        } else {
            assessment.hate.score
        };
        Self {
            label: match hate.effective_label() {
                HateLabel::Hate => HATE_LABEL,
                HateLabel::Clean => CLEAN_LABEL,
            },
            hate_prob: round4(hate.hate_prob),
            viral_hate: assessment.hate.viral,
            viral_score: round4(viral_score),
            ad_label: if is_ad(ad_prob) { AD_LABEL } else { NOT_AD_LABEL },
            ad_prob: round4(ad_prob),
            viral_ad: assessment.ad.viral,
            viral_reason_ad: assessment.ad.reason,
        }
    }
}

pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
