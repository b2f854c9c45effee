use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    submits: AtomicU64,
    submit_errors: AtomicU64,
    transitions: AtomicU64,
    candidates: AtomicU64,
    resolutions: AtomicU64,
}

impl Metrics {
    pub fn record_submit(&self) {
        self.submits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submit_error(&self) {
        self.submit_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_candidate(&self) {
        self.candidates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let submits = self.submits.load(Ordering::Relaxed);
        let submit_errors = self.submit_errors.load(Ordering::Relaxed);
        let transitions = self.transitions.load(Ordering::Relaxed);
        let candidates = self.candidates.load(Ordering::Relaxed);
        let resolutions = self.resolutions.load(Ordering::Relaxed);

        format!(
            "# TYPE reclaim_submits_total counter\n\
reclaim_submits_total {}\n\
# TYPE reclaim_submit_errors_total counter\n\
reclaim_submit_errors_total {}\n\
# TYPE reclaim_transitions_total counter\n\
reclaim_transitions_total {}\n\
# TYPE reclaim_match_candidates_total counter\n\
reclaim_match_candidates_total {}\n\
# TYPE reclaim_match_resolutions_total counter\n\
reclaim_match_resolutions_total {}\n",
            submits, submit_errors, transitions, candidates, resolutions
        )
    }
}
