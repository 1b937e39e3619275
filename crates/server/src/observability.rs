use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static POSTS_CREATED_TOTAL: Lazy<Option<IntCounter>> = Lazy::new(|| {
    register_int_counter!("kv_blog_posts_created_total", "Total posts created").ok()
});

pub static SLUG_CONFLICTS_TOTAL: Lazy<Option<IntCounter>> = Lazy::new(|| {
    register_int_counter!("kv_blog_slug_conflicts_total", "Writes rejected because the slug was taken").ok()
});

pub static ERROR_RESPONSES_TOTAL: Lazy<Option<IntCounterVec>> = Lazy::new(|| {
    register_int_counter_vec!(
        "kv_blog_error_responses_total",
        "Failure envelopes sent, by status class",
        &["class"]
    )
    .ok()
});

pub fn record_post_created() {
    if let Some(c) = POSTS_CREATED_TOTAL.as_ref() { c.inc(); }
}

pub fn record_slug_conflict() {
    if let Some(c) = SLUG_CONFLICTS_TOTAL.as_ref() { c.inc(); }
}

pub fn record_error_response(status: u16) {
    let class = if status >= 500 { "5xx" } else { "4xx" };
    if let Some(c) = ERROR_RESPONSES_TOTAL.as_ref() {
        c.with_label_values(&[class]).inc();
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
