/// What the render loop should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; try again next tick.
    Reconfigured,
    /// Transient; drop this tick.
    SkipFrame,
    /// Unrecoverable (out of memory); shut down.
    Fatal,
}
