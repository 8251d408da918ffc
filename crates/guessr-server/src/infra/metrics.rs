use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, Opts, TextEncoder};
use std::sync::LazyLock;
use tracing::warn;

use guessr_core::UsernameVerdict;

fn counter_vec_or_fallback(name: &str, help: &str, labels: &[&str]) -> IntCounterVec {
    match register_int_counter_vec!(name, help, labels) {
        Ok(metric) => metric,
        Err(err) => {
            warn!(event = "metrics_register_failed", metric = name, error = %err);
            IntCounterVec::new(Opts::new(name, help), labels).unwrap_or_else(|err| {
                warn!(event = "metrics_fallback_failed", metric = name, error = %err);
                IntCounterVec::new(
                    Opts::new("guessr_metrics_fallback", "metrics fallback"),
                    &["name"],
                )
                .expect("fallback metric")
            })
        }
    }
}

static USERNAME_CHECKS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    counter_vec_or_fallback(
        "guessr_username_checks_total",
        "Username validations by outcome and deciding rule",
        &["outcome", "rule"],
    )
});

static STORE_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    counter_vec_or_fallback(
        "guessr_store_failures_total",
        "Store reads that failed and were replaced by a safe default",
        &["operation"],
    )
});

static AVATAR_UNLOCK_CHECKS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    counter_vec_or_fallback(
        "guessr_avatar_unlock_checks_total",
        "Avatar unlock checks by result",
        &["unlocked"],
    )
});

pub fn username_checked(verdict: &UsernameVerdict, bypassed: bool) {
    let (outcome, rule) = match verdict {
        UsernameVerdict::Accepted if bypassed => ("accepted", "bypass"),
        UsernameVerdict::Accepted => ("accepted", "none"),
        UsernameVerdict::Rejected(reason) => ("rejected", reason.rule()),
    };
    USERNAME_CHECKS.with_label_values(&[outcome, rule]).inc();
}

pub fn store_failure(operation: &str) {
    STORE_FAILURES.with_label_values(&[operation]).inc();
}

pub fn avatar_unlock_checked(unlocked: bool) {
    let label = if unlocked { "true" } else { "false" };
    AVATAR_UNLOCK_CHECKS.with_label_values(&[label]).inc();
}

pub fn username_check_count(outcome: &str, rule: &str) -> u64 {
    USERNAME_CHECKS.with_label_values(&[outcome, rule]).get()
}

pub fn store_failure_count(operation: &str) -> u64 {
    STORE_FAILURES.with_label_values(&[operation]).get()
}

pub fn init_registry(enabled: bool) {
    if !enabled {
        return;
    }
    #[cfg(target_os = "linux")]
    {
        let process_collector = prometheus::process_collector::ProcessCollector::for_self();
        if prometheus::default_registry()
            .register(Box::new(process_collector))
            .is_err()
        {
            warn!("failed to register process metrics");
        }
    }
}

/// Text exposition of the default registry.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        warn!(event = "metrics_encode_failed", error = %err);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Writes to a sibling temp file first so a collector never reads a
/// partial file.
pub fn write_textfile(path: &str) -> std::io::Result<()> {
    let tmp = format!("{path}.tmp");
    std::fs::write(&tmp, render())?;
    std::fs::rename(&tmp, path)
}
