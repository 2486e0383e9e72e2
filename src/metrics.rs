//! Application-level Prometheus counters, exported through the `/metrics`
//! endpoint alongside the HTTP middleware metrics.

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    pub static ref DOCUMENTS_GENERATED: IntCounterVec = register_int_counter_vec!(
        "documents_generated_total",
        "PDF documents generated, by kind",
        &["kind"]
    )
    .expect("register documents_generated_total");
    pub static ref SUBMISSION_ROLLBACKS: IntCounter = register_int_counter!(
        "submission_upload_rollbacks_total",
        "Compensating delete passes run after a failed submission"
    )
    .expect("register submission_upload_rollbacks_total");
}
