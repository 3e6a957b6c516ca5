use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::pool::TweetPool;
use crate::similarity::SimilarityError;
use crate::virality::{is_viral_ad, is_viral_hate, AdVerdict, HateVerdict, ViralityParams};

/// Both policy verdicts for one recorded message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViralityAssessment {
    pub hate: HateVerdict,
    pub ad: AdVerdict,
}

/// Process-wide owner of the tweet pool.
///
/// Append and window-read run as one critical section per request, so two
/// concurrent requests can never interleave between one request's append and
/// its own similarity query. The pool itself has no other access path.
pub struct ViralityAnalyzer {
    pool: Mutex<TweetPool>,
    params: ViralityParams,
}

impl ViralityAnalyzer {
    pub fn new(params: ViralityParams) -> Self {
        Self {
            pool: Mutex::new(TweetPool::new()),
            params,
        }
    }

    /// Records the message, then runs both virality policies against the
    /// updated pool. Recording first matches the reference pipeline
    /// (normalize, classify, record, check), so a message takes part in its
    /// own virality check.
    ///
    /// Records older than the retention window are evicted up front; the
    /// eviction cutoff equals the window itself, which keeps observable
    /// window results unchanged while bounding memory over long uptimes.
    pub fn record_and_assess(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<ViralityAssessment, SimilarityError> {
        let mut pool = self.pool.lock().expect("tweet pool lock poisoned");
        pool.evict_older_than(now - self.params.window);
        pool.append(text, now);
        let hate = is_viral_hate(text, now, &pool, &self.params)?;
        let ad = is_viral_ad(text, now, &pool, &self.params)?;
        Ok(ViralityAssessment { hate, ad })
    }

    pub fn pool_len(&self) -> usize {
        self.pool.lock().expect("tweet pool lock poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::virality::ViralReason;

    #[test]
    fn own_message_joins_its_own_check() {
        let analyzer = ViralityAnalyzer::new(ViralityParams::default());
        let now = Utc::now();

        // first ever message: the pool holds only the message itself, which
        // scores 1.0 against itself
        let first = analyzer
            .record_and_assess("오늘 점심 추천 부탁", now)
            .expect("assessment");
        assert!(first.hate.viral);
        assert!((first.hate.score - 1.0).abs() < 1e-9);
        assert_eq!(first.ad.reason, ViralReason::Average);

        // the repeat sees two exact copies and trips the count rule
        let second = analyzer
            .record_and_assess("오늘 점심 추천 부탁", now + Duration::seconds(1))
            .expect("assessment");
        assert_eq!(second.ad.reason, ViralReason::Count);
        assert_eq!(analyzer.pool_len(), 2);
    }

    #[test]
    fn eviction_bounds_the_pool() {
        let analyzer = ViralityAnalyzer::new(ViralityParams::default());
        let start = Utc::now();
        analyzer
            .record_and_assess("아주 오래된 이야기", start)
            .expect("assessment");

        // thirteen hours later the first record is outside the window and
        // gets evicted during the next request
        let later = start + Duration::hours(13);
        analyzer
            .record_and_assess("완전히 새로운 이야기", later)
            .expect("assessment");
        assert_eq!(analyzer.pool_len(), 1);
    }

    #[test]
    fn assessments_are_serialized_across_threads() {
        use std::sync::Arc;

        let analyzer = Arc::new(ViralityAnalyzer::new(ViralityParams::default()));
        let now = Utc::now();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let analyzer = Arc::clone(&analyzer);
                std::thread::spawn(move || {
                    analyzer
                        .record_and_assess(&format!("동시 요청 메시지 {i}호"), now)
                        .expect("assessment")
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread");
        }
        assert_eq!(analyzer.pool_len(), 8);
    }
}
