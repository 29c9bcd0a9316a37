use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref REGISTRATIONS_CNTR: Counter = register_counter!(
        "forum_registrations_total",
        "Number of registered users"
    )
    .unwrap();
    pub static ref LOGINS_CNTR: CounterVec = register_counter_vec!(
        "forum_logins_total",
        "Number of login attempts",
        &["result"]
    )
    .unwrap();
    pub static ref QUESTIONS_CNTR: Counter = register_counter!(
        "forum_questions_posted_total",
        "Number of posted questions"
    )
    .unwrap();
    pub static ref ANSWERS_CNTR: Counter = register_counter!(
        "forum_answers_posted_total",
        "Number of posted answers"
    )
    .unwrap();
}

pub fn init_tracing() {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new("info,sqlx=warn"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
