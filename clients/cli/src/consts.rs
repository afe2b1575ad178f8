pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events from background fetch tasks
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // CARD CONFIGURATION
    // =============================================================================

    /// Number of trailing points treated as "this week" for the delta.
    pub const WEEK_WINDOW: usize = 7;

    /// Widest grid the dashboard lays out.
    pub const MAX_GRID_COLUMNS: usize = 3;

    /// Minimum terminal rows a card cell needs to render its chart.
    pub const MIN_CARD_HEIGHT: u16 = 10;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    pub mod http {
        use std::time::Duration;

        /// Default whole-request timeout (seconds), overridable from config.
        pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

        /// TCP connect timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 5;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }
    }
}
