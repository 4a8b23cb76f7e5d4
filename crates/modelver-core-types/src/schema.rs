//! Field names and event values shared by every structured log line
//!
//! The `log_op_*` macros emit `component`, `op` and `event` on every line;
//! the remaining names are the conventional keys for model context.

/// Emitting module path
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, e.g. `run_cycle` or `load_snapshot`
pub const FIELD_OP: &str = "op";
/// One of [`LIFECYCLE_EVENTS`]
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_CYCLE_ID: &str = "cycle_id";

pub const FIELD_MODEL_KIND: &str = "model_kind";
pub const FIELD_ELEMENT_KIND: &str = "element_kind";
pub const FIELD_SNAPSHOT_ID: &str = "snapshot_id";

// per-collection merge counts
pub const FIELD_ADDED: &str = "added";
pub const FIELD_REMOVED: &str = "removed";
pub const FIELD_DROPPED: &str = "dropped";

pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Every value `event` can take, in emission order
pub const LIFECYCLE_EVENTS: [&str; 3] = [EVENT_START, EVENT_END, EVENT_END_ERROR];
