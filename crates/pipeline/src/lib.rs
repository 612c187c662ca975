//! chabatch Pipeline
//!
//! Sequential batch orchestration around an external transcript analysis
//! tool (batchalign):
//! - Transcript discovery (`discover`)
//! - The tool invocation contract (`tool`)
//! - Two-stage batch sessions (`session`)
//! - Run summaries (`summary`)
//! - Environment capability checks (`doctor`)
//!
//! The tool itself is an opaque collaborator: the pipeline sequences
//! invocations, checks exit codes, captures logs, and reports tallies.
//! It never inspects transcript contents.

pub mod discover;
pub mod doctor;
pub mod session;
pub mod summary;
pub mod tool;
