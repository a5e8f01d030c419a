/// Host primitive that calls [`crate::engine::animation::AnimationEngine::on_frame`] once
/// before the next repaint.
///
/// The engine keeps at most one request outstanding at a time.
pub trait FrameScheduler {
    /// Queue one frame callback.
    fn request_frame(&mut self);

    /// Drop the outstanding request, if the host supports it.
    fn cancel_frame(&mut self) {}
}
