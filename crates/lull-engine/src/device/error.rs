/// What the runtime should do after a failed frame acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface reconfigured; the frame is retried on the next iteration.
    Reconfigured,
    /// Transient; drop this frame and retry later.
    SkipFrame,
    /// Out of memory. Exit.
    Fatal,
}
