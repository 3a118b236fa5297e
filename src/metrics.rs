/// Service metrics
use actix_web::{HttpResponse, Responder};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, TextEncoder};

/// Handler that serialises Prometheus metrics in text format.
pub async fn metrics_handler() -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(buffer),
        Err(err) => HttpResponse::InternalServerError().body(err.to_string()),
    }
}

fn register_counter(name: &str, help: &str) -> IntCounter {
    IntCounter::new(name, help)
        .and_then(|c| {
            prometheus::default_registry().register(Box::new(c.clone()))?;
            Ok(c)
        })
        .unwrap_or_else(|e| {
            tracing::error!("failed to create {} counter: {}", name, e);
            IntCounter::new(format!("dummy_{name}"), "dummy").expect("dummy counter")
        })
}

static REGISTER_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "register_requests_total",
        "Total number of registration attempts",
    )
});

static LOGIN_REQUESTS_TOTAL: Lazy<IntCounter> =
    Lazy::new(|| register_counter("login_requests_total", "Total number of login attempts"));

static LOGIN_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_counter(
        "login_failures_total",
        "Total number of failed login attempts (unknown email or wrong password)",
    )
});

/// Increment register requests counter
#[inline]
pub fn inc_register_requests() {
    REGISTER_REQUESTS_TOTAL.inc();
}

/// Increment login requests counter
#[inline]
pub fn inc_login_requests() {
    LOGIN_REQUESTS_TOTAL.inc();
}

/// Increment login failures counter
#[inline]
pub fn inc_login_failures() {
    LOGIN_FAILURES_TOTAL.inc();
}
