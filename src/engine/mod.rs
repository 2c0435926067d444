pub mod control;
pub mod report;
pub mod scheduler;
pub mod work_queue;
#[cfg(test)]
pub mod integration_tests;

pub use control::{Control, Effects, Issue, IssueKind};
pub use report::{Diagnostic, Execution, ExecutionStats, Outcome};
pub use scheduler::Engine;
