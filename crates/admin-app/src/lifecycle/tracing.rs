//! # Tracing Setup
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG`. Module paths are hidden (`with_target(false)`);
//! the structured fields say which operation and resource a line belongs to.
//!
//! ## What Gets Traced
//!
//! | Source | Level | Event |
//! |---|---|---|
//! | Data provider | `DEBUG` | `Request operation=... method=... url=... body=...` |
//! | Data provider | `INFO` | `Response operation=... status=... elapsed_ms=...` |
//! | Data provider | `WARN` | `Failed operation=... ids=... error=...` |
//! | Clients | `DEBUG`/`INFO` | Spans per client call, `Created` with the new id |
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Connecting data provider base_url=http://localhost:3000/api create_policy=EchoInput
//! INFO customer_setup:register: Response operation="create" resource="customers" status=200 elapsed_ms=8
//! INFO customer_setup:register: Created customer_id=customer_1
//! INFO order_processing:place_order: Response operation="get-one" resource="customers" status=200 elapsed_ms=3
//! INFO order_processing:place_order: Response operation="get-one" resource="products" status=200 elapsed_ms=2
//! INFO order_processing:place_order: Sending order to backend
//! INFO order_processing:place_order: Created order_id=order_1
//! ```
//!
//! Use `debug` to see the full request URLs, with the encoded `filter`,
//! `range` and `sort` parameters, and request bodies.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
