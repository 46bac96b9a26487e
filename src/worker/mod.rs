//! Background worker for catalogue storage.
//!
//! The worker runs on a Zellij worker thread and performs all key-value store
//! I/O so the plugin thread only renders and handles input.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::PickerWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
