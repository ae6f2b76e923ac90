use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, IntCounterVec};
use tonic::Status;

// Prometheus metrics (default registry)
pub static RPC_TOTAL: Lazy<Option<IntCounterVec>> = Lazy::new(|| {
    register_int_counter_vec!(
        "movies_catalog_rpc_total",
        "Catalog RPCs handled, by method and status code",
        &["method", "code"]
    )
    .map_err(|e| tracing::warn!(error = %e, "catalog rpc counter not registered"))
    .ok()
});

pub fn record<T>(method: &str, result: &Result<T, Status>) {
    let code = match result {
        Ok(_) => tonic::Code::Ok,
        Err(status) => status.code(),
    };
    if let Some(counter) = RPC_TOTAL.as_ref() {
        counter.with_label_values(&[method, &format!("{code:?}")]).inc();
    }
}
