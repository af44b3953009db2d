use crate::domain::model::EstimateRequest;
use tracing::{Span, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "campaign_estimator=debug,info"
    } else {
        "campaign_estimator=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// One JSON object per line on stderr. Each line carries the fields of the
/// enclosing [`estimate_span`], so lines from one request can be grouped.
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(json_layer(std::io::stderr))
        .init();
}

fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

/// Span wrapping the work done for one estimate request.
pub fn estimate_span(request: &EstimateRequest) -> Span {
    tracing::info_span!(
        "estimate",
        payment_method = request.payment_method_id.as_deref().unwrap_or("none"),
        budget_type = ?request.budget.budget_type,
        boost_speed = ?request.budget.boost_speed,
        currency = %request.budget.currency,
        locations = request.criteria.locations.len(),
        interests = request.criteria.interests.len(),
    )
}
