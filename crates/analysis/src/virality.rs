use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::pool::TweetPool;
use crate::similarity::{pairwise_similarities, SimilarityError, SimilaritySet};

pub const DEFAULT_WINDOW_HOURS: i64 = 12;
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.25;
pub const DEFAULT_HIGH_SIMILARITY_COUNT: usize = 2;

/// Shared knobs for both policies: one retention window, one similarity
/// threshold. The high-similarity count only participates in the ad policy.
#[derive(Debug, Clone)]
pub struct ViralityParams {
    pub window: Duration,
    pub similarity_threshold: f64,
    pub high_similarity_count: usize,
}

impl Default for ViralityParams {
    fn default() -> Self {
        Self {
            window: Duration::hours(DEFAULT_WINDOW_HOURS),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            high_similarity_count: DEFAULT_HIGH_SIMILARITY_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HateVerdict {
    pub viral: bool,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdVerdict {
    pub viral: bool,
    pub score: f64,
    pub reason: ViralReason,
}

/// Why the ad policy flagged (or declined to flag) a message. Kept separate
/// downstream so operators can tune the count and average rules
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViralReason {
    None,
    Count,
    Average,
}

/// Window-filter plus similarity computation, shared by both policies.
///
/// Returns `Ok(None)` when no pooled message survives the window filter; the
/// engine is not invoked in that case.
pub fn windowed_similarities(
    text: &str,
    now: DateTime<Utc>,
    pool: &TweetPool,
    window: Duration,
) -> Result<Option<SimilaritySet>, SimilarityError> {
    let recent = pool.window(now, window);
    if recent.is_empty() {
        return Ok(None);
    }
    let texts: Vec<&str> = recent.iter().map(|message| message.text.as_str()).collect();
    pairwise_similarities(text, &texts).map(Some)
}

/// Hate virality: coordinated pile-ons converge on broadly similar phrasing
/// across many messages, so a single average-similarity threshold is enough.
/// No count rule here.
pub fn is_viral_hate(
    text: &str,
    now: DateTime<Utc>,
    pool: &TweetPool,
    params: &ViralityParams,
) -> Result<HateVerdict, SimilarityError> {
    let Some(set) = windowed_similarities(text, now, pool, params.window)? else {
        return Ok(HateVerdict {
            viral: false,
            score: 0.0,
        });
    };
    let verdict = hate_decision(&set, params.similarity_threshold);
    debug!(
        avg_similarity = set.average,
        viral = verdict.viral,
        "hate virality check"
    );
    Ok(verdict)
}

/// Ad virality: the count rule catches exact or near-exact repeated spam copy
/// even when it is a minority of the pool; the average rule catches pools
/// saturated with similar-but-not-identical ad variants. The count rule wins
/// when both apply.
pub fn is_viral_ad(
    text: &str,
    now: DateTime<Utc>,
    pool: &TweetPool,
    params: &ViralityParams,
) -> Result<AdVerdict, SimilarityError> {
    let Some(set) = windowed_similarities(text, now, pool, params.window)? else {
        return Ok(AdVerdict {
            viral: false,
            score: 0.0,
            reason: ViralReason::None,
        });
    };
    let verdict = ad_decision(&set, params.similarity_threshold, params.high_similarity_count);
    debug!(
        high_sim_count = high_similarity_count(&set, params.similarity_threshold),
        avg_similarity = set.average,
        reason = ?verdict.reason,
        "ad virality check"
    );
    Ok(verdict)
}

// Both thresholds compare with strict `>`: a value of exactly 0.25 is not
// viral and does not count as a high-similarity item.

fn hate_decision(set: &SimilaritySet, threshold: f64) -> HateVerdict {
    HateVerdict {
        viral: set.average > threshold,
        score: set.average,
    }
}

fn ad_decision(set: &SimilaritySet, threshold: f64, high_count: usize) -> AdVerdict {
    if high_similarity_count(set, threshold) >= high_count {
        AdVerdict {
            viral: true,
            score: set.average,
            reason: ViralReason::Count,
        }
    } else if set.average > threshold {
        AdVerdict {
            viral: true,
            score: set.average,
            reason: ViralReason::Average,
        }
    } else {
        AdVerdict {
            viral: false,
            score: set.average,
            reason: ViralReason::None,
        }
    }
}

fn high_similarity_count(set: &SimilaritySet, threshold: f64) -> usize {
    set.scores.iter().filter(|&&score| score > threshold).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(scores: Vec<f64>) -> SimilaritySet {
        let average = scores.iter().sum::<f64>() / scores.len() as f64;
        SimilaritySet { scores, average }
    }

    #[test]
    fn empty_pool_is_not_viral() {
        let pool = TweetPool::new();
        let params = ViralityParams::default();
        let now = Utc::now();

        let hate = is_viral_hate("아무 내용", now, &pool, &params).expect("hate verdict");
        assert_eq!(
            hate,
            HateVerdict {
                viral: false,
                score: 0.0
            }
        );

        let ad = is_viral_ad("buy cheap watches now", now, &pool, &params).expect("ad verdict");
        assert_eq!(
            ad,
            AdVerdict {
                viral: false,
                score: 0.0,
                reason: ViralReason::None
            }
        );
    }

    #[test]
    fn fully_aged_out_pool_is_not_viral() {
        let params = ViralityParams::default();
        let now = Utc::now();
        let mut pool = TweetPool::new();
        // stamped exactly at the cutoff, so the strict filter drops it
        pool.append("옛날 메시지", now - params.window);

        let hate = is_viral_hate("옛날 메시지", now, &pool, &params).expect("hate verdict");
        assert!(!hate.viral);
        assert_eq!(hate.score, 0.0);

        let ad = is_viral_ad("옛날 메시지", now, &pool, &params).expect("ad verdict");
        assert_eq!(ad.reason, ViralReason::None);
    }

    #[test]
    fn identical_recent_messages_trip_both_policies() {
        let params = ViralityParams::default();
        let now = Utc::now();
        let text = "신규 코인 에어드랍 지금 참여하세요";
        let mut pool = TweetPool::new();
        for _ in 0..3 {
            pool.append(text, now - Duration::minutes(1));
        }

        let hate = is_viral_hate(text, now, &pool, &params).expect("hate verdict");
        assert!(hate.viral);
        assert!((hate.score - 1.0).abs() < 1e-9);

        let ad = is_viral_ad(text, now, &pool, &params).expect("ad verdict");
        assert!(ad.viral);
        assert_eq!(ad.reason, ViralReason::Count);
        assert!((ad.score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn count_rule_takes_priority_over_average() {
        // two items barely above the threshold, average well below it
        let set = set(vec![0.26, 0.26, 0.0, 0.0, 0.0, 0.0]);
        assert!(set.average < 0.25);
        let verdict = ad_decision(&set, 0.25, 2);
        assert!(verdict.viral);
        assert_eq!(verdict.reason, ViralReason::Count);
    }

    #[test]
    fn average_rule_applies_when_count_is_short() {
        // one strong match, average still above the threshold
        let set = set(vec![0.9, 0.0, 0.0]);
        assert!(set.average > 0.25);
        let verdict = ad_decision(&set, 0.25, 2);
        assert!(verdict.viral);
        assert_eq!(verdict.reason, ViralReason::Average);
    }

    #[test]
    fn exactly_threshold_is_not_viral() {
        let set = set(vec![0.25, 0.25, 0.25]);
        assert_eq!(set.average, 0.25);

        let hate = hate_decision(&set, 0.25);
        assert!(!hate.viral);

        let ad = ad_decision(&set, 0.25, 2);
        assert!(!ad.viral);
        assert_eq!(ad.reason, ViralReason::None);
    }

    #[test]
    fn reason_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ViralReason::None).unwrap(), "\"none\"");
        assert_eq!(serde_json::to_string(&ViralReason::Count).unwrap(), "\"count\"");
        assert_eq!(
            serde_json::to_string(&ViralReason::Average).unwrap(),
            "\"average\""
        );
    }
}
