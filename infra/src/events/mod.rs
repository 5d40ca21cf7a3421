//! Event sinks for OTP domain events

pub mod broadcast;
pub mod tracing_sink;

pub use broadcast::BroadcastEventSink;
pub use tracing_sink::TracingEventSink;
