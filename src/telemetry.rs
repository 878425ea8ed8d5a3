use prometheus::register_int_counter_vec;
use prometheus::IntCounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of questions handed out by the quiz endpoint",
        &["category"]
    )
    .unwrap();
    pub static ref QUESTION_MUTATIONS: IntCounterVec = register_int_counter_vec!(
        "trivia_question_mutations_total",
        "Number of questions created or deleted through the API",
        &["operation"]
    )
    .unwrap();
}

/// Used when `LOG_LEVEL` is unset or unparsable. sqlx logs every statement at
/// info, which drowns the request logs.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn span_events(flag: Option<&str>) -> FmtSpan {
    match flag {
        Some(value) if value.trim().eq_ignore_ascii_case("true") => {
            FmtSpan::ENTER | FmtSpan::EXIT
        }
        _ => FmtSpan::NONE,
    }
}

/// Installs the global subscriber, configured by `LOG_LEVEL` and
/// `INCLUDE_SPAN_EVENTS`.
pub fn init_tracing() -> anyhow::Result<()> {
    let level = std::env::var("LOG_LEVEL").ok();
    let spans = std::env::var("INCLUDE_SPAN_EVENTS").ok();

    let fmt_layer = fmt::layer().with_span_events(span_events(spans.as_deref()));
    tracing_subscriber::registry()
        .with(log_filter(level.as_deref()))
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn log_level_falls_back_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            log_filter(Some("trivia_api=shout")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn log_level_takes_directives() {
        assert_eq!(
            log_filter(Some("trivia_api=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn span_events_only_when_enabled() {
        assert_eq!(span_events(None), FmtSpan::NONE);
        assert_eq!(span_events(Some("1")), FmtSpan::NONE);
        assert_eq!(span_events(Some("TRUE")), FmtSpan::ENTER | FmtSpan::EXIT);
    }
}
