//! Worker protocol between the plugin thread and the catalogue worker.
//!
//! Requests ask the worker to read or write a catalogue; responses carry the
//! results back. Both travel as JSON strings through Zellij's worker channel.
//! Every request carries the caller's OpenTelemetry span so work done on the
//! worker thread shows up in the same trace.

use crate::domain::{ComboOption, OptionValue};
use serde::{Deserialize, Serialize};

/// Serialized span identity used to re-parent worker spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID, 32 hex digits.
    pub trace_id: String,

    /// OpenTelemetry span ID of the sender, 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the active span, or `None` when it carries no valid context
    /// (for example when tracing was never initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let context = tracing::Span::current().context();
        let span = context.span();
        let span_context = span.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to propagate");
            return None;
        }

        let captured = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %captured.trace_id, "captured trace context");
        Some(captured)
    }
}

/// Generates `WorkerMessage` constructors that stamp the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Builds a `", stringify!($variant), "` request carrying the current trace context.")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_options(LoadOptions { catalog: String }),
    create_option(CreateOption { catalog: String, label: String }),
    save_selection(SaveSelection { catalog: String, values: Vec<OptionValue> }),
}

/// Requests from the plugin thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Load a catalogue's options and its saved selection.
    LoadOptions {
        catalog: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Add an option to a catalogue from a user-typed label.
    CreateOption {
        catalog: String,
        label: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist the current selection of a catalogue.
    SaveSelection {
        catalog: String,
        values: Vec<OptionValue>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadOptions { trace_context, .. }
            | Self::CreateOption { trace_context, .. }
            | Self::SaveSelection { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses from the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    OptionsLoaded {
        options: Vec<ComboOption>,
        /// Saved selection, in selection order.
        selection: Vec<OptionValue>,
    },

    /// An option was created, or an existing one with the same label found.
    OptionCreated {
        option: ComboOption,
        /// The catalogue after creation.
        options: Vec<ComboOption>,
    },

    SelectionSaved {
        count: usize,
    },

    /// The request failed.
    Error {
        message: String,
    },
}
