//! Background rasterization of viewport snapshots.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Runtime;
use tokio::sync::{mpsc, watch};

use crate::config::RENDER_THREAD_NAME;
use crate::error::MeridianError;
use crate::map::MapContents;
use crate::messenger::Messenger;
use crate::render::{Bitmap, MapState, Renderer};
use crate::viewport::Viewport;

pub(crate) type SharedMessenger = Arc<RwLock<Option<Box<dyn Messenger>>>>;

/// Immutable viewport snapshot waiting to be rendered.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    generation: u64,
    viewport: Viewport,
}

impl RenderRequest {
    /// Sequence number of the request. Later submissions have larger numbers.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The snapshot to render.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}

/// Result of a render request.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Generation of the request the bitmap was rendered for.
    pub generation: u64,
    /// Rendered image. Its size equals the pixel size of the requested viewport.
    pub bitmap: Bitmap,
}

/// Single background thread that renders the latest submitted viewport.
///
/// Requests are kept in a latest-value slot: submitting while a render is running replaces
/// any request that has not started yet, so intermediate states of a gesture are skipped
/// but the last one is always rendered. Finished frames are sent to the delivery queue in
/// submission order, followed by [`Messenger::request_redraw`].
pub struct RenderWorker {
    sender: Mutex<Option<watch::Sender<Option<RenderRequest>>>>,
    runtime: Mutex<Option<Runtime>>,
    next_generation: AtomicU64,
    running: Arc<AtomicBool>,
}

impl RenderWorker {
    /// Starts the worker thread.
    pub(crate) fn spawn(
        contents: Arc<RwLock<MapContents>>,
        renderer: Arc<dyn Renderer>,
        frames: mpsc::UnboundedSender<RenderedFrame>,
        messenger: SharedMessenger,
    ) -> Result<Self, MeridianError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(1)
            .thread_name(RENDER_THREAD_NAME)
            .build()?;

        let (sender, receiver) = watch::channel(None);
        let job = Arc::new(RenderJob { contents, renderer });
        let running = Arc::new(AtomicBool::new(true));
        let guard = RunningGuard(running.clone());
        runtime.spawn(render_loop(receiver, job, frames, messenger, guard));

        log::debug!("Render worker started");

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            runtime: Mutex::new(Some(runtime)),
            next_generation: AtomicU64::new(0),
            running,
        })
    }

    /// Queues the viewport for rendering, replacing any request that has not started yet.
    ///
    /// Returns `false` if the worker was shut down.
    pub fn submit(&self, viewport: Viewport) -> bool {
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            log::warn!("Render request rejected: the render worker is shut down");
            return false;
        };
        if !self.running.load(Ordering::SeqCst) {
            log::warn!("Render request rejected: the render loop has stopped");
            return false;
        }

        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        sender.send_replace(Some(RenderRequest {
            generation,
            viewport,
        }));
        log::trace!("Render request {generation} submitted");

        true
    }

    /// Renders the most recently submitted viewport again under a new generation.
    ///
    /// Used when something the renderer reads besides the viewport (layers, style) changed.
    /// Returns `false` if nothing was submitted yet or the worker was shut down.
    pub fn resubmit(&self) -> bool {
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            return false;
        };
        if !self.running.load(Ordering::SeqCst) {
            return false;
        }

        sender.send_if_modified(|slot| match slot {
            Some(request) => {
                request.generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
                true
            }
            None => false,
        })
    }

    /// Generation of the most recent submission, or `0` if nothing was submitted.
    pub fn last_generation(&self) -> u64 {
        self.next_generation.load(Ordering::SeqCst)
    }

    /// Stops accepting requests and releases the worker thread.
    ///
    /// Does not wait for a render in progress; its result is discarded. Calling it more than
    /// once does nothing.
    pub fn shutdown(&self) {
        let sender = self.sender.lock().take();
        let runtime = self.runtime.lock().take();

        if sender.is_none() && runtime.is_none() {
            return;
        }

        drop(sender);
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }

        log::debug!("Render worker shut down");
    }

    /// Returns true if [`RenderWorker::shutdown`] was called or the render loop stopped, e.g.
    /// because the [`Messenger`] panicked.
    pub fn is_shutdown(&self) -> bool {
        self.sender.lock().is_none() || !self.running.load(Ordering::SeqCst)
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Clears the running flag when the render loop ends, normally or by unwinding.
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
        if std::thread::panicking() {
            log::error!("Render loop panicked, the render worker is stopped");
        }
    }
}

struct RenderJob {
    contents: Arc<RwLock<MapContents>>,
    renderer: Arc<dyn Renderer>,
}

impl RenderJob {
    fn render(&self, request: RenderRequest) -> Result<Option<RenderedFrame>, MeridianError> {
        let RenderRequest {
            generation,
            viewport,
        } = request;
        let (width, height) = (viewport.width(), viewport.height());
        if width == 0 || height == 0 {
            log::debug!("Skipping render request {generation} of zero size");
            return Ok(None);
        }

        let state = {
            let contents = self.contents.read();
            MapState::new(viewport, contents.layers.clone(), contents.style.clone())
        };

        let bitmap = self.renderer.render(&state, width, height)?;
        if bitmap.size() != (width, height) {
            return Err(MeridianError::Render(format!(
                "renderer returned a {}x{} bitmap for a {width}x{height} viewport",
                bitmap.width(),
                bitmap.height()
            )));
        }

        Ok(Some(RenderedFrame { generation, bitmap }))
    }
}

async fn render_loop(
    mut receiver: watch::Receiver<Option<RenderRequest>>,
    job: Arc<RenderJob>,
    frames: mpsc::UnboundedSender<RenderedFrame>,
    messenger: SharedMessenger,
    _running: RunningGuard,
) {
    let mut last_rendered = 0;

    while receiver.changed().await.is_ok() {
        let Some(request) = receiver.borrow_and_update().clone() else {
            continue;
        };

        let generation = request.generation;
        if generation > last_rendered + 1 {
            log::debug!(
                "Render requests {}..{generation} coalesced",
                last_rendered + 1
            );
        }
        last_rendered = generation;

        let job = job.clone();
        match tokio::task::spawn_blocking(move || job.render(request)).await {
            Ok(Ok(Some(frame))) => {
                if frames.send(frame).is_err() {
                    log::debug!("Delivery queue is closed, stopping the render worker");
                    break;
                }

                if let Some(messenger) = &*messenger.read() {
                    messenger.request_redraw();
                }
            }
            Ok(Ok(None)) => {}
            Ok(Err(err)) => log::warn!("Render request {generation} failed: {err}"),
            Err(err) if err.is_panic() => {
                log::error!("Renderer panicked while rendering request {generation}")
            }
            Err(err) => log::debug!("Render request {generation} cancelled: {err}"),
        }
    }

    log::debug!("Render loop finished");
}
