//! Logging targets.
//!
//! Horizon Dialog uses the `tracing` crate for instrumentation. Install a
//! subscriber in the application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_dialog=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Dialog facade target.
    pub const DIALOG: &str = "horizon_dialog::dialog";
    /// Subprocess execution target.
    pub const PROCESS: &str = "horizon_dialog::process";
    /// Window close watcher target.
    pub const WATCHER: &str = "horizon_dialog::watcher";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_dialog::config";
    /// Unix (zenity) backend target.
    pub const UNIX: &str = "horizon_dialog::unix";
    /// macOS (osascript) backend target.
    pub const MACOS: &str = "horizon_dialog::macos";
    /// Windows backend target.
    pub const WINDOWS: &str = "horizon_dialog::windows";
}
