use lazy_static::lazy_static;
use prometheus::{
    CounterVec, GaugeVec, HistogramVec, register_counter_vec, register_gauge_vec,
    register_histogram_vec,
};

lazy_static! {
    pub static ref SUBMISSIONS_TOTAL: CounterVec = register_counter_vec!(
        "copygen_submissions_total",
        "Total number of submissions, valid or not",
        &["feature"]
    )
    .expect("register copygen_submissions_total");
    pub static ref OUTCOMES_TOTAL: CounterVec = register_counter_vec!(
        "copygen_outcomes_total",
        "Settled submissions by outcome",
        &["feature", "outcome"]
    )
    .expect("register copygen_outcomes_total");
    pub static ref GENERATION_LATENCY: HistogramVec = register_histogram_vec!(
        "copygen_generation_latency_seconds",
        "Latency of the outbound generation call in seconds",
        &["feature"]
    )
    .expect("register copygen_generation_latency_seconds");
    pub static ref IN_FLIGHT: GaugeVec = register_gauge_vec!(
        "copygen_in_flight",
        "Outbound generation calls not yet settled",
        &["feature"]
    )
    .expect("register copygen_in_flight");
}
