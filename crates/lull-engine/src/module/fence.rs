/// Blocks until the GPU has consumed everything submitted so far.
pub trait FrameFence {
    fn wait_idle(&mut self);
}
