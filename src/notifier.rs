//! User-facing notification capability

/// How the validator talks to the user.
///
/// `warn` is blocking in spirit: the host must not let the user continue
/// until the message is acknowledged. `info` is passive.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Raise a blocking warning
    fn warn(&mut self, message: &str);

    /// Show a passive informational message
    fn info(&mut self, message: &str);
}
