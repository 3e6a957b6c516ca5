use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter_vec, register_int_gauge, Histogram, IntCounterVec,
    IntGauge,
};

use analysis::{ViralReason, ViralityAssessment};

pub static ANALYZE_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "analyze_requests_total",
        "Analyze requests grouped by outcome",
        &["outcome"]
    )
    .expect("analyze requests counter")
});

pub static ANALYZE_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "analyze_request_duration_seconds",
        "End-to-end latency of analyze requests in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("analyze duration histogram")
});

pub static POOL_MESSAGES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "tweet_pool_messages",
        "Messages currently retained in the tweet pool"
    )
    .expect("tweet pool gauge")
});

pub static VIRAL_VERDICTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "viral_verdicts_total",
        "Positive viral verdicts grouped by policy and reason",
        &["policy", "reason"]
    )
    .expect("viral verdicts counter")
});

pub fn record_verdicts(assessment: &ViralityAssessment) {
    if assessment.hate.viral {
        VIRAL_VERDICTS_TOTAL
            .with_label_values(&["hate", "average"])
            .inc();
    }
    if assessment.ad.viral {
        let reason = match assessment.ad.reason {
            ViralReason::Count => "count",
            ViralReason::Average => "average",
            ViralReason::None => "none",
        };
        VIRAL_VERDICTS_TOTAL.with_label_values(&["ad", reason]).inc();
    }
}
