//! Engine commands
//!
//! Each command wraps its implementation with the standard
//! `log_op_start!`/`log_op_end!`/`log_op_error!` envelope.

pub mod cycle;
