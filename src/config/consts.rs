/// Default cap on pending work items before an execution is aborted
pub const DEFAULT_MAX_QUEUE_LEN: usize = 1000;
/// Default cap on search depth (guards linear recursion, which never grows the queue)
pub const DEFAULT_MAX_DEPTH: usize = 10_000;
