//! Catalogue worker running on a Zellij worker thread.
//!
//! The worker owns the key-value store and answers [`WorkerMessage`]s with
//! [`WorkerResponse`]s, so catalogue I/O never blocks rendering. The store is
//! injected: Zellij builds the worker through `Default` and the JSON file store
//! is opened lazily on the first message, while tests hand in a
//! [`crate::storage::MemoryStore`] through [`PickerWorker::with_store`].

use crate::domain::error::{PickerError, Result};
use crate::domain::OptionValue;
use crate::infrastructure::paths;
use crate::storage::{catalog, JsonFileStore, KeyValueStore};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// File name of the catalogue store inside the plugin data directory.
pub const STORE_FILE_NAME: &str = "catalogs.json";

/// Worker thread state.
#[derive(Serialize, Deserialize, Default)]
pub struct PickerWorker {
    #[serde(skip)]
    store: Option<Box<dyn KeyValueStore>>,
}

impl PickerWorker {
    /// Creates a worker backed by the JSON file store in the plugin data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be opened.
    pub fn new() -> Result<Self> {
        let path = paths::get_data_dir().join(STORE_FILE_NAME);
        Ok(Self::with_store(Box::new(JsonFileStore::new(path)?)))
    }

    /// Creates a worker over an already opened store.
    #[must_use]
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self { store: Some(store) }
    }

    fn store(&mut self) -> Result<&mut (dyn KeyValueStore + 'static)> {
        self.store
            .as_deref_mut()
            .ok_or_else(|| PickerError::Worker("store not initialized".to_string()))
    }

    /// Converts a storage result into a response, logging either outcome.
    fn respond<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "catalogue operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "catalogue operation failed");
                WorkerResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    fn handle_load_options(&mut self, catalog_name: &str) -> WorkerResponse {
        let result = self.store().and_then(|store| {
            let options = catalog::load_options(store, catalog_name)?;
            let selection = catalog::load_selection(&*store, catalog_name)?;
            Ok((options, selection))
        });

        Self::respond("load options", result, |(options, selection)| {
            tracing::debug!(option_count = options.len(), selected = selection.len(), "catalogue loaded");
            WorkerResponse::OptionsLoaded { options, selection }
        })
    }

    fn handle_create_option(&mut self, catalog_name: &str, label: &str) -> WorkerResponse {
        let result = self
            .store()
            .and_then(|store| catalog::create_option(store, catalog_name, label));

        Self::respond("create option", result, |(option, options)| WorkerResponse::OptionCreated {
            option,
            options,
        })
    }

    fn handle_save_selection(&mut self, catalog_name: &str, values: &[OptionValue]) -> WorkerResponse {
        let result = self
            .store()
            .and_then(|store| catalog::save_selection(store, catalog_name, values));

        Self::respond("save selection", result, |()| WorkerResponse::SelectionSaved { count: values.len() })
    }

    /// Re-parents the worker's spans under the sender's span.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        Some(opentelemetry::Context::current().with_remote_span_context(remote).attach())
    }

    /// Processes one request.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::LoadOptions { catalog, .. } => self.handle_load_options(&catalog),
            WorkerMessage::CreateOption { catalog, label, .. } => self.handle_create_option(&catalog, &label),
            WorkerMessage::SaveSelection { catalog, values, .. } => self.handle_save_selection(&catalog, &values),
        }
    }
}

/// Set once the worker thread has installed its tracing subscriber.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

fn post_response(name: String, response: &WorkerResponse) {
    match serde_json::to_string(response) {
        Ok(payload) => post_message_to_plugin(PluginMessage {
            name,
            payload,
            worker_name: None,
        }),
        Err(e) => tracing::error!(error = %e, "failed to serialize worker response"),
    }
}

impl ZellijWorker<'_> for PickerWorker {
    /// Entry point for messages from the plugin thread.
    ///
    /// `message` is echoed back as the response name; `payload` is a JSON
    /// [`WorkerMessage`].
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            crate::observability::init_tracing(&crate::Config::default());
        }

        if self.store.is_none() {
            match Self::new() {
                Ok(worker) => self.store = worker.store,
                Err(e) => {
                    tracing::error!(error = %e, "failed to open catalogue store");
                    let response = WorkerResponse::Error {
                        message: format!("failed to open catalogue store: {e}"),
                    };
                    post_response(message, &response);
                    return;
                }
            }
        }

        let request: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(request);
        post_response(message, &response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn worker() -> PickerWorker {
        PickerWorker::with_store(Box::new(MemoryStore::new()))
    }

    #[test]
    fn load_seeds_catalogue_and_returns_empty_selection() {
        let mut worker = worker();
        let response = worker.handle_message(WorkerMessage::load_options("categories".to_string()));

        match response {
            WorkerResponse::OptionsLoaded { options, selection } => {
                assert!(!options.is_empty());
                assert!(selection.is_empty());
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn saved_selection_is_returned_by_next_load() {
        let mut worker = worker();
        let values = vec![OptionValue::from("prints")];

        let saved = worker.handle_message(WorkerMessage::save_selection("categories".to_string(), values.clone()));
        assert_eq!(saved, WorkerResponse::SelectionSaved { count: 1 });

        match worker.handle_message(WorkerMessage::load_options("categories".to_string())) {
            WorkerResponse::OptionsLoaded { selection, .. } => assert_eq!(selection, values),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn create_returns_new_option_and_catalogue() {
        let mut worker = worker();
        let response =
            worker.handle_message(WorkerMessage::create_option("categories".to_string(), "Macramé".to_string()));

        match response {
            WorkerResponse::OptionCreated { option, options } => {
                assert_eq!(option.value.as_str(), "macramé");
                assert!(options.contains(&option));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[test]
    fn failures_become_error_responses() {
        let mut worker = worker();
        let response = worker.handle_message(WorkerMessage::create_option("tags".to_string(), " ".to_string()));
        assert!(matches!(response, WorkerResponse::Error { .. }));

        let mut uninitialized = PickerWorker::default();
        let response = uninitialized.handle_message(WorkerMessage::load_options("tags".to_string()));
        assert!(matches!(response, WorkerResponse::Error { message } if message.contains("not initialized")));
    }

    #[test]
    fn messages_survive_json_transport() {
        let message = WorkerMessage::SaveSelection {
            catalog: "tags".to_string(),
            values: vec!["raku".into()],
            trace_context: None,
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(!json.contains("trace_context"));
        assert_eq!(serde_json::from_str::<WorkerMessage>(&json).unwrap(), message);
    }
}
