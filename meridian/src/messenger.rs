use maybe_sync::{MaybeSend, MaybeSync};

/// Callback into the hosting UI.
///
/// The map view calls [`Messenger::request_redraw`] whenever the picture on the screen
/// should change: after a gesture moved the window, and after the render worker produced a
/// new bitmap. The host is expected to call
/// [`MapView::process_updates`](crate::MapView::process_updates) and then
/// [`MapView::on_draw`](crate::MapView::on_draw) from its UI thread in response.
///
/// The method may be called from the render worker thread. It must not panic: a panic stops
/// the render worker, and [`RenderWorker::submit`](crate::render::RenderWorker::submit)
/// returns `false` afterwards.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Asks the host to repaint the view.
    fn request_redraw(&self);
}

/// Messenger that does nothing. Useful for headless views.
#[derive(Debug, Default, Copy, Clone)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
