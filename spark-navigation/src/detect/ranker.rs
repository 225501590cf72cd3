use crate::detect::priority::PriorityScorer;
use crate::detect::property::geometry::{DetectedObject, FrameContext};
use crate::detect::property::risk::ObjectTypeCatalog;
use crate::detect::{DEFAULT_TOP_K, SCORE_TIE_EPSILON};
use crate::error::NavigationError;
use log::warn;

/// A detection together with its priority score. Borrows the detection it was computed for.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScoredObject<'a> {
    pub object: &'a DetectedObject,
    /// Position of the detection in the frame's input sequence.
    pub index: usize,
    pub priority_score: f32,
}

/// Every valid detection of a frame in priority order, plus the detections that failed scoring.
#[derive(Debug)]
pub struct Ranking<'a> {
    pub scored: Vec<ScoredObject<'a>>,
    pub rejected: Vec<(usize, NavigationError)>,
}

impl<'a> Ranking<'a> {
    pub fn top(&self, k: usize) -> &[ScoredObject<'a>] {
        &self.scored[..k.min(self.scored.len())]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectRanker {
    scorer: PriorityScorer,
    catalog: ObjectTypeCatalog,
}

impl ObjectRanker {
    pub fn new(scorer: PriorityScorer, catalog: ObjectTypeCatalog) -> Self {
        Self { scorer, catalog }
    }

    pub fn catalog(&self) -> &ObjectTypeCatalog {
        &self.catalog
    }

    pub fn scorer(&self) -> &PriorityScorer {
        &self.scorer
    }

    /// Scores all detections and sorts them by descending priority.
    ///
    /// Ties keep their input order. A detection that cannot be scored is dropped from the
    /// ranking and reported in `rejected`; it never aborts the frame.
    pub fn rank<'a>(&self, objects: &'a [DetectedObject], frame: &FrameContext) -> Ranking<'a> {
        let mut scored = Vec::with_capacity(objects.len());
        let mut rejected = Vec::new();

        for (index, object) in objects.iter().enumerate() {
            match self.scorer.score(object, frame, &self.catalog) {
                Ok(priority_score) => scored.push(ScoredObject {
                    object,
                    index,
                    priority_score,
                }),
                Err(e) => {
                    warn!("Dropping detection {} ('{}'): {}", index, object.label, e);
                    rejected.push((index, e));
                }
            }
        }

        scored.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        Self::restore_tie_order(&mut scored);

        Ranking { scored, rejected }
    }

    /// Puts runs of near-equal scores back into input order.
    ///
    /// A run starts at its highest score and takes every following entry less than
    /// `SCORE_TIE_EPSILON` below it, so reordering never moves a score more than the
    /// tolerance out of place.
    fn restore_tie_order(scored: &mut [ScoredObject<'_>]) {
        let mut start = 0;
        while start < scored.len() {
            let head = scored[start].priority_score;
            let end = scored[start..]
                .iter()
                .position(|s| head - s.priority_score >= SCORE_TIE_EPSILON)
                .map_or(scored.len(), |offset| start + offset);
            scored[start..end].sort_by_key(|s| s.index);
            start = end;
        }
    }

    /// The `k` highest-priority detections, best first. Fewer when the frame has fewer valid
    /// detections; empty for an empty frame.
    pub fn select_top_k<'a>(
        &self,
        objects: &'a [DetectedObject],
        frame: &FrameContext,
        k: usize,
    ) -> Vec<ScoredObject<'a>> {
        let mut ranking = self.rank(objects, frame);
        ranking.scored.truncate(k);
        ranking.scored
    }

    /// [`select_top_k`](Self::select_top_k) with the default of three objects.
    pub fn select_top<'a>(
        &self,
        objects: &'a [DetectedObject],
        frame: &FrameContext,
    ) -> Vec<ScoredObject<'a>> {
        self.select_top_k(objects, frame, DEFAULT_TOP_K)
    }
}
