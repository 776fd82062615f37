//! Debugging feature flags.

pub struct LogFlags {
    /// Log every pivot appended or replaced by the engine.
    pub log_pivots: bool,

    /// Log folding decisions when deriving higher levels.
    pub log_folding: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,

    pub log_snapshots: bool,
}

pub const DF: LogFlags = LogFlags {
    log_pivots: false,
    log_folding: false,
    log_performance: false,
    log_snapshots: true,
};
