//! Prometheus metrics.
//!
//! Handlers time themselves with a [`CallTimer`], which records a single
//! sample into a histogram when it goes out of scope. Samples go through the
//! [`metrics`] facade, so recording never fails and is a no-op when no
//! recorder is installed.

use super::error::{ApiResult, ClientError};
use crate::infra::state::AppState;
use axum::extract::State;
use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// A timing metric with a human readable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedMetric {
    /// The exported metric name.
    pub name: &'static str,
    /// A short human readable name.
    pub display_name: &'static str,
    /// What is being measured.
    pub description: &'static str,
}

impl TimedMetric {
    fn describe(&self) {
        metrics::describe_histogram!(
            self.name,
            Unit::Seconds,
            format!("{}: {}", self.display_name, self.description)
        );
    }
}

/// Duration of calls to the hello endpoint.
pub const SAY_HELLO_TIME: TimedMetric = TimedMetric {
    name: "sayHelloTime",
    display_name: "Call duration",
    description: "Time spent in call",
};

/// All timing metrics exported by the service.
const TIMED_METRICS: &[TimedMetric] = &[SAY_HELLO_TIME];

/// Installs the global Prometheus recorder and describes our metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    for metric in TIMED_METRICS {
        metric.describe();
    }
    tracing::debug!("Installed prometheus recorder");
    Ok(handle)
}

/// Records the time until it is dropped into a [`TimedMetric`].
#[derive(Debug)]
#[must_use = "the duration is recorded when the timer is dropped"]
pub struct CallTimer {
    metric: &'static TimedMetric,
    start: Instant,
}

impl CallTimer {
    /// Starts timing a call.
    pub fn start(metric: &'static TimedMetric) -> Self {
        Self {
            metric,
            start: Instant::now(),
        }
    }
}

impl Drop for CallTimer {
    fn drop(&mut self) {
        metrics::histogram!(self.metric.name).record(self.start.elapsed().as_secs_f64());
    }
}

/// Renders all metrics in the Prometheus text format.
pub async fn metrics_handler(State(state): State<AppState>) -> ApiResult<String> {
    let handle = state.metrics().ok_or(ClientError::NotFound)?;
    Ok(handle.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_line(rendered: &str) -> Option<&str> {
        rendered
            .lines()
            .find(|line| line.starts_with("sayHelloTime_count"))
    }

    #[test]
    fn timer_records_once_on_drop() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            let _timer = CallTimer::start(&SAY_HELLO_TIME);
        });
        assert_eq!(Some("sayHelloTime_count 1"), count_line(&handle.render()));
    }

    #[test]
    fn timer_records_when_unwinding() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            metrics::with_local_recorder(&recorder, || {
                let _timer = CallTimer::start(&SAY_HELLO_TIME);
                panic!("handler failed");
            })
        }));
        assert!(result.is_err());
        assert_eq!(Some("sayHelloTime_count 1"), count_line(&handle.render()));
    }

    #[test]
    fn nothing_is_recorded_before_a_call() {
        let recorder = PrometheusBuilder::new().build_recorder();
        assert_eq!(None, count_line(&recorder.handle().render()));
    }

    #[test]
    fn description_includes_display_name() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, || {
            SAY_HELLO_TIME.describe();
            let _timer = CallTimer::start(&SAY_HELLO_TIME);
        });
        let rendered = handle.render();
        assert!(rendered.contains("# HELP sayHelloTime Call duration: Time spent in call"));
    }
}
