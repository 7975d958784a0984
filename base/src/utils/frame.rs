
/// The action the main loop should take after draining the pending window events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FrameAction {
    /// Nothing happened; keep polling.
    Idle,
    /// The window (or the user) asked the program to quit.
    Terminal,
}
