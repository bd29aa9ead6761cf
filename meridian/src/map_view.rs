use std::sync::Arc;

use meridian_types::{Crs, Rect, Size};
use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;

use crate::config::MapViewConfig;
use crate::control::{MapControl, TouchEvent};
use crate::error::MeridianError;
use crate::map::{Dataset, Layer, Map, MapListener, Style};
use crate::messenger::Messenger;
use crate::render::worker::SharedMessenger;
use crate::render::{Bitmap, Canvas, RenderWorker, RenderedFrame, Renderer};
use crate::transform::TransformPipeline;
use crate::viewport::{Viewport, ViewportListener};
use crate::window::Window;

/// Interactive view of a [`Map`].
///
/// The view owns a detached clone of the map viewport, the [`Window`] the last rendered
/// bitmap is shown in, the [`TransformPipeline`] of the current viewport, a [`RenderWorker`]
/// and the list of gesture [`MapControl`]s. It is the only entry point for the host UI:
///
/// * touch input goes to [`MapView::on_touch_event`];
/// * size changes go to [`MapView::on_size_changed`];
/// * on every repaint the host calls [`MapView::process_updates`] and then
///   [`MapView::on_draw`].
///
/// Every change of the viewport (from a gesture or from [`MapView::viewport_mut`])
/// synchronously recomputes the transform and submits a render request. Rendered bitmaps are
/// committed by [`MapView::process_updates`] in the order they were requested; the host is
/// told to repaint through the [`Messenger`] set with [`MapView::set_messenger`].
pub struct MapView {
    map: Map,
    viewport: Viewport,
    window: Window,
    transform: Arc<RwLock<TransformPipeline>>,
    image: Bitmap,
    committed_generation: u64,
    controls: Vec<MapControl>,
    config: MapViewConfig,
    worker: Arc<RenderWorker>,
    frames: mpsc::UnboundedReceiver<RenderedFrame>,
    messenger: SharedMessenger,
    destroyed: bool,
}

impl MapView {
    /// Creates a view with the default configuration.
    pub fn new(map: Map, renderer: impl Renderer + 'static) -> Result<Self, MeridianError> {
        Self::with_config(map, renderer, MapViewConfig::default())
    }

    /// Creates a view and starts its render worker.
    ///
    /// Fails if the worker thread cannot be started.
    pub fn with_config(
        mut map: Map,
        renderer: impl Renderer + 'static,
        config: MapViewConfig,
    ) -> Result<Self, MeridianError> {
        let messenger: SharedMessenger = Arc::new(RwLock::new(None));
        let (sender, frames) = mpsc::unbounded_channel();
        let worker = Arc::new(RenderWorker::spawn(
            map.contents(),
            Arc::new(renderer),
            sender,
            messenger.clone(),
        )?);

        let mut viewport = map.view().clone();
        let transform = Arc::new(RwLock::new(TransformPipeline::new(&viewport)));
        let binding = ViewBinding {
            transform: transform.clone(),
            snapshot: Arc::new(Mutex::new(viewport.clone())),
            worker: worker.clone(),
        };
        viewport.bind(binding.clone());
        map.bind(binding);

        let mut window = Window::new();
        window.resize(viewport.width(), viewport.height());
        let image = Bitmap::new(viewport.width(), viewport.height());

        let mut view = Self {
            map,
            viewport,
            window,
            transform,
            image,
            committed_generation: 0,
            controls: vec![],
            config,
            worker,
            frames,
            messenger,
            destroyed: false,
        };
        view.set_controls(MapControl::defaults());

        Ok(view)
    }

    /// The map shown by the view.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable access to the map.
    ///
    /// Changing the style re-renders the view. After changing the layer list call
    /// [`MapView::redraw`].
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Current viewport of the view.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport. Every setter called on it submits a render.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Screen-space state of the shown bitmap.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Mutable access to the window. Call [`MapView::invalidate`] after changing it.
    pub fn window_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    /// Transformations of the current viewport.
    pub fn transform(&self) -> TransformPipeline {
        *self.transform.read()
    }

    /// The last committed bitmap.
    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    /// Generation of the last committed bitmap.
    pub fn committed_generation(&self) -> u64 {
        self.committed_generation
    }

    /// The render worker of the view.
    pub fn render_worker(&self) -> &RenderWorker {
        &self.worker
    }

    /// Gesture configuration.
    pub fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// Replaces the gesture configuration and re-initializes the controls.
    pub fn set_config(&mut self, config: MapViewConfig) {
        self.config = config;
        let controls = std::mem::take(&mut self.controls);
        self.set_controls(controls);
    }

    /// Gesture controls in the order they receive events.
    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }

    /// Replaces the gesture controls.
    pub fn set_controls(&mut self, mut controls: Vec<MapControl>) {
        for control in &mut controls {
            control.init(self);
        }
        self.controls = controls;
    }

    /// Sets the callback used to ask the host for a repaint.
    pub fn set_messenger(&mut self, messenger: impl Messenger + 'static) {
        *self.messenger.write() = Some(Box::new(messenger));
    }

    /// Asks the host to repaint the view.
    pub fn invalidate(&self) {
        if let Some(messenger) = &*self.messenger.read() {
            messenger.request_redraw();
        }
    }

    /// Submits a render of the current viewport. Returns `false` if the view is destroyed.
    pub fn redraw(&self) -> bool {
        self.worker.submit(self.viewport.clone())
    }

    /// Adds a layer for every dataset, in order.
    ///
    /// If the map has no layers yet, the viewport is set to the bounds and CRS of the first
    /// dataset. Those are read before anything is changed, so on error neither the layers
    /// nor the viewport are modified. Adding an empty list does nothing.
    pub fn add_layers(
        &mut self,
        datasets: impl IntoIterator<Item = Arc<dyn Dataset>>,
    ) -> Result<(), MeridianError> {
        let datasets: Vec<_> = datasets.into_iter().collect();
        let Some(first) = datasets.first() else {
            return Ok(());
        };

        let extent = if self.map.has_layers() {
            None
        } else {
            Some((first.bounds()?, first.crs()?))
        };

        for dataset in datasets {
            log::debug!("Adding layer {}", dataset.name());
            self.map.add_layer(Layer::new(dataset));
        }

        match extent {
            Some((bounds, crs)) => {
                self.map.view_mut().set_bounds_and_crs(bounds, crs.clone());
                self.viewport.set_bounds_and_crs(bounds, crs);
            }
            None => {
                self.redraw();
            }
        }

        Ok(())
    }

    /// Handles a touch event. Every control sees the event; returns true if any of them
    /// recognized it as part of its gesture.
    pub fn on_touch_event(&mut self, event: &TouchEvent) -> bool {
        let mut controls = std::mem::take(&mut self.controls);
        let mut consumed = false;
        for control in &mut controls {
            consumed |= control.handle_touch(event, self);
        }
        self.controls = controls;

        consumed
    }

    /// Handles a change of the view size in pixels.
    ///
    /// The shown bitmap is replaced with a blank one, and bitmaps requested for the old size
    /// are discarded when they arrive.
    pub fn on_size_changed(&mut self, width: u32, height: u32) {
        self.image = Bitmap::new(width, height);
        self.window.resize(width, height);
        self.committed_generation = self.worker.last_generation();
        self.viewport.resize(width, height);
    }

    /// Paints the committed bitmap.
    pub fn on_draw(&self, canvas: &mut dyn Canvas) {
        canvas.draw_bitmap(&self.image, self.window.window(), self.window.canvas());
    }

    /// Commits rendered bitmaps that arrived since the last call. Must be called from the
    /// thread that owns the view, before [`MapView::on_draw`].
    ///
    /// All queued frames are drained; only the newest one is committed. Returns true if a
    /// new bitmap was committed.
    pub fn process_updates(&mut self) -> bool {
        let mut latest: Option<RenderedFrame> = None;
        while let Ok(frame) = self.frames.try_recv() {
            if frame.generation <= self.committed_generation {
                log::debug!("Dropping outdated frame {}", frame.generation);
                continue;
            }

            if let Some(skipped) = latest.replace(frame) {
                log::trace!("Frame {} superseded before commit", skipped.generation);
            }
        }

        let Some(frame) = latest else {
            return false;
        };

        self.committed_generation = frame.generation;
        self.update(frame.bitmap);
        true
    }

    fn update(&mut self, bitmap: Bitmap) {
        self.image = bitmap;
        self.window.reinit();
        self.invalidate();
    }

    /// Closes the map and stops the render worker. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        self.worker.shutdown();
        self.map.close();
    }

    /// Returns true if [`MapView::destroy`] was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Connects the viewport and the map of a view to its transform and render worker.
#[derive(Clone)]
struct ViewBinding {
    transform: Arc<RwLock<TransformPipeline>>,
    /// Latest state of the view's viewport, for re-renders not caused by the viewport.
    snapshot: Arc<Mutex<Viewport>>,
    worker: Arc<RenderWorker>,
}

impl ViewBinding {
    fn viewport_changed(&self, viewport: &Viewport) {
        *self.transform.write() = TransformPipeline::new(viewport);
        *self.snapshot.lock() = viewport.clone();
        self.worker.submit(viewport.clone());
    }
}

impl ViewportListener for ViewBinding {
    fn on_bounds_changed(&self, viewport: &Viewport, _bounds: Rect, _old: Rect) {
        self.viewport_changed(viewport);
    }

    fn on_size_changed(&self, viewport: &Viewport, _size: Size<u32>, _old: Size<u32>) {
        self.viewport_changed(viewport);
    }

    fn on_crs_changed(&self, viewport: &Viewport, _crs: &Crs, _old: &Crs) {
        self.viewport_changed(viewport);
    }
}

impl MapListener for ViewBinding {
    fn on_style_changed(&self, _map: &Map, style: &Style, _old: &Style) {
        log::debug!("Map style changed to {:?}", style.name());
        if !self.worker.resubmit() {
            self.worker.submit(self.snapshot.lock().clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc as std_mpsc;
    use std::time::{Duration, Instant};

    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    use super::*;
    use crate::color::Color;
    use crate::config::PanCommit;
    use crate::control::{Pointer, TouchAction};
    use crate::map::tests::TestDataset;
    use crate::render::MapState;

    const WAIT: Duration = Duration::from_secs(5);

    struct SolidRenderer;

    impl Renderer for SolidRenderer {
        fn render(
            &self,
            state: &MapState,
            width: u32,
            height: u32,
        ) -> Result<Bitmap, MeridianError> {
            Ok(Bitmap::filled(width, height, state.style().background()))
        }
    }

    /// Renderer that waits for a permit before every render.
    struct GatedRenderer {
        started: Mutex<std_mpsc::Sender<(u32, u32)>>,
        gate: Mutex<std_mpsc::Receiver<()>>,
    }

    impl Renderer for GatedRenderer {
        fn render(
            &self,
            _state: &MapState,
            width: u32,
            height: u32,
        ) -> Result<Bitmap, MeridianError> {
            let _ = self.started.lock().send((width, height));
            let _ = self.gate.lock().recv_timeout(WAIT);
            Ok(Bitmap::filled(width, height, Color::WHITE))
        }
    }

    #[derive(Clone, Default)]
    struct CountingMessenger(Arc<AtomicUsize>);

    impl Messenger for CountingMessenger {
        fn request_redraw(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingCanvas(Vec<(Rect, Rect, (u32, u32))>);

    impl Canvas for RecordingCanvas {
        fn draw_bitmap(&mut self, bitmap: &Bitmap, src: Rect, dst: Rect) {
            self.0.push((src, dst, bitmap.size()));
        }
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    /// 100x100 px view showing [`bounds`] at one world unit per pixel.
    fn view() -> MapView {
        let mut view = MapView::new(Map::new(), SolidRenderer).expect("view is created");
        view.on_size_changed(100, 100);
        view.viewport_mut().set_bounds_and_crs(bounds(), Crs::EPSG3857);
        view
    }

    fn submissions(view: &MapView) -> u64 {
        view.render_worker().last_generation()
    }

    fn wait_for(view: &mut MapView, generation: u64) -> bool {
        let deadline = Instant::now() + WAIT;
        while Instant::now() < deadline {
            view.process_updates();
            if view.committed_generation() >= generation {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn touch(view: &mut MapView, action: TouchAction, x: f64, y: f64, ms: u64) -> bool {
        view.on_touch_event(&TouchEvent::single(action, x, y, Duration::from_millis(ms)))
    }

    #[test]
    fn add_layers_initializes_viewport_from_first_dataset() {
        let mut view = MapView::new(Map::new(), SolidRenderer).expect("view is created");
        view.on_size_changed(100, 100);
        let before = submissions(&view);

        let d1 = TestDataset::new("d1", Rect::new(10.0, 20.0, 30.0, 40.0), Crs::WGS84);
        let d2 = TestDataset::new("d2", Rect::new(-1.0, -1.0, 1.0, 1.0), Crs::EPSG3857);
        view.add_layers([d1 as Arc<dyn Dataset>, d2 as Arc<dyn Dataset>])
            .expect("datasets are readable");

        assert_eq!(view.viewport().bounds(), Rect::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(view.viewport().crs(), &Crs::WGS84);
        assert_eq!(view.map().view().crs(), &Crs::WGS84);

        let titles: Vec<_> = view
            .map()
            .layers()
            .iter()
            .map(|l| l.title().to_string())
            .collect();
        assert_eq!(titles, ["d1", "d2"]);
        assert_eq!(submissions(&view), before + 1);
    }

    #[test]
    fn add_layers_to_populated_map_keeps_viewport() {
        let mut view = view();
        let first = TestDataset::new("first", Rect::new(1.0, 1.0, 2.0, 2.0), Crs::WGS84);
        view.add_layers([first as Arc<dyn Dataset>]).expect("readable");
        let viewport = view.viewport().clone();
        let before = submissions(&view);

        let second = TestDataset::new("second", Rect::new(5.0, 5.0, 6.0, 6.0), Crs::EPSG3857);
        view.add_layers([second as Arc<dyn Dataset>]).expect("readable");

        assert_eq!(*view.viewport(), viewport);
        assert_eq!(view.map().layer_count(), 2);
        assert_eq!(submissions(&view), before + 1);
    }

    #[test]
    fn add_empty_layer_list_does_nothing() {
        let mut view = view();
        let before = submissions(&view);

        view.add_layers(Vec::<Arc<dyn Dataset>>::new())
            .expect("nothing to read");

        assert_eq!(view.viewport().bounds(), bounds());
        assert!(!view.map().has_layers());
        assert_eq!(submissions(&view), before);
    }

    #[test]
    fn failed_add_layers_changes_nothing() {
        let mut view = view();
        let before = submissions(&view);

        let broken = TestDataset::broken("broken");
        let good = TestDataset::new("good", Rect::new(1.0, 1.0, 2.0, 2.0), Crs::WGS84);
        let result = view.add_layers([broken as Arc<dyn Dataset>, good as Arc<dyn Dataset>]);

        assert_matches!(result, Err(MeridianError::DataAccess(_)));
        assert!(!view.map().has_layers());
        assert_eq!(view.viewport().bounds(), bounds());
        assert_eq!(view.viewport().crs(), &Crs::EPSG3857);
        assert_eq!(submissions(&view), before);
    }

    #[test]
    fn every_viewport_change_submits_one_render() {
        let mut view = view();
        let start = submissions(&view);

        view.viewport_mut().set_bounds(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(submissions(&view), start + 1);
        view.viewport_mut().zoom_to(bounds());
        assert_eq!(submissions(&view), start + 2);
        view.viewport_mut().set_crs(Crs::WGS84);
        assert_eq!(submissions(&view), start + 3);
        view.on_size_changed(200, 100);
        assert_eq!(submissions(&view), start + 4);

        assert_abs_diff_eq!(view.transform().scale(), 1.0);
    }

    #[test]
    fn destroy_twice() {
        let mut view = view();
        let dataset = TestDataset::new("d", bounds(), Crs::EPSG3857);
        view.add_layers([dataset.clone() as Arc<dyn Dataset>]).expect("readable");

        view.destroy();
        view.destroy();

        assert!(view.is_destroyed());
        assert!(view.render_worker().is_shutdown());
        assert!(!view.redraw());
        assert_eq!(dataset.close_count(), 1);

        drop(view);
        assert_eq!(dataset.close_count(), 1);
    }

    #[test]
    fn delivered_frame_resets_window() {
        let mut view = view();
        let messenger = CountingMessenger::default();
        view.set_messenger(messenger.clone());

        view.window_mut().translate(10.0, 10.0);
        assert!(view.redraw());
        let generation = submissions(&view);
        assert!(wait_for(&mut view, generation));

        assert!(!view.window().is_transformed());
        assert_eq!(view.image().size(), (100, 100));
        assert_eq!(view.image().pixel(50, 50), Some(Color::TRANSPARENT));
        assert!(messenger.0.load(Ordering::SeqCst) > 0);

        view.map_mut().set_style(Style::new(Color::BLACK));
        let generation = submissions(&view);
        assert!(wait_for(&mut view, generation));
        assert_eq!(view.image().pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn style_change_renders_fresh_view() {
        let viewport = Viewport::new(bounds(), Crs::EPSG3857).with_size(100, 100);
        let mut view =
            MapView::new(Map::with_view(viewport), SolidRenderer).expect("view is created");
        assert_eq!(submissions(&view), 0);

        view.map_mut().set_style(Style::new(Color::BLACK));

        assert_eq!(submissions(&view), 1);
        assert!(wait_for(&mut view, 1));
        assert_eq!(view.image().size(), (100, 100));
        assert_eq!(view.image().pixel(99, 99), Some(Color::BLACK));
    }

    #[test]
    fn only_newest_queued_frame_is_committed() {
        let viewport = Viewport::new(bounds(), Crs::EPSG3857).with_size(100, 100);
        let mut view =
            MapView::new(Map::with_view(viewport), SolidRenderer).expect("view is created");
        let messenger = CountingMessenger::default();
        view.set_messenger(messenger.clone());

        let wait_redraws = |count: usize| {
            let deadline = Instant::now() + WAIT;
            while messenger.0.load(Ordering::SeqCst) < count && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(5));
            }
            messenger.0.load(Ordering::SeqCst)
        };

        // The worker asks for a repaint after queueing a frame. Waiting for it before the
        // next redraw keeps the requests from being coalesced.
        for count in 1..=3 {
            assert!(view.redraw());
            assert_eq!(wait_redraws(count), count);
        }

        assert!(view.process_updates());
        assert_eq!(view.committed_generation(), 3);
        // A single commit adds a single repaint request.
        assert_eq!(messenger.0.load(Ordering::SeqCst), 4);
        assert!(!view.process_updates());
    }

    #[test]
    fn frames_of_old_size_are_dropped() {
        let (started_tx, started) = std_mpsc::channel();
        let (gate, gate_rx) = std_mpsc::channel();
        let renderer = GatedRenderer {
            started: Mutex::new(started_tx),
            gate: Mutex::new(gate_rx),
        };

        let mut map = Map::new();
        map.view_mut().set_bounds_and_crs(bounds(), Crs::EPSG3857);
        let mut view = MapView::new(map, renderer).expect("view is created");

        view.on_size_changed(100, 100);
        assert_eq!(started.recv_timeout(WAIT), Ok((100, 100)));
        let old = submissions(&view);

        view.on_size_changed(50, 50);
        gate.send(()).expect("renderer is waiting");
        // The second render starts after the first frame was queued.
        assert_eq!(started.recv_timeout(WAIT), Ok((50, 50)));

        assert!(!view.process_updates());
        assert_eq!(view.committed_generation(), old);
        assert_eq!(view.image(), &Bitmap::new(50, 50));

        gate.send(()).expect("renderer is waiting");
        assert!(wait_for(&mut view, old + 1));
        assert_eq!(view.image(), &Bitmap::filled(50, 50, Color::WHITE));
    }

    #[test]
    fn on_draw_blits_buffer_into_display_rect() {
        let mut view = view();
        view.window_mut().translate(5.0, -5.0);

        let mut canvas = RecordingCanvas::default();
        view.on_draw(&mut canvas);

        assert_eq!(
            canvas.0,
            vec![(bounds(), Rect::new(5.0, -5.0, 105.0, 95.0), (100, 100))]
        );
    }

    #[test]
    fn pan_commits_on_gesture_end() {
        let mut view = view();
        let start = submissions(&view);

        assert!(!touch(&mut view, TouchAction::Down, 50.0, 50.0, 0));
        assert!(touch(&mut view, TouchAction::Move, 60.0, 50.0, 10));
        assert!(touch(&mut view, TouchAction::Move, 70.0, 40.0, 20));

        assert_eq!(view.window().canvas(), Rect::new(20.0, -10.0, 120.0, 90.0));
        assert_eq!(view.viewport().bounds(), bounds());
        assert_eq!(submissions(&view), start);

        assert!(touch(&mut view, TouchAction::Up, 70.0, 40.0, 30));

        assert_abs_diff_eq!(view.viewport().bounds(), Rect::new(-20.0, -10.0, 80.0, 90.0));
        assert_eq!(submissions(&view), start + 1);
    }

    #[test]
    fn continuous_pan_commits_every_step() {
        let mut view = view();
        view.set_config(MapViewConfig::default().with_pan_commit(PanCommit::Continuous));
        let start = submissions(&view);

        touch(&mut view, TouchAction::Down, 50.0, 50.0, 0);
        touch(&mut view, TouchAction::Move, 60.0, 50.0, 10);
        touch(&mut view, TouchAction::Move, 70.0, 40.0, 20);
        assert_eq!(submissions(&view), start + 2);

        touch(&mut view, TouchAction::Up, 70.0, 40.0, 30);
        assert_eq!(submissions(&view), start + 2);
        assert_abs_diff_eq!(view.viewport().bounds(), Rect::new(-20.0, -10.0, 80.0, 90.0));
    }

    #[test]
    fn cancelled_pan_restores_window() {
        let mut view = view();

        touch(&mut view, TouchAction::Down, 50.0, 50.0, 0);
        touch(&mut view, TouchAction::Move, 80.0, 50.0, 10);
        touch(&mut view, TouchAction::Cancel, 80.0, 50.0, 20);

        assert!(!view.window().is_transformed());
        assert_eq!(view.viewport().bounds(), bounds());
    }

    #[test]
    fn double_tap_zooms_in_about_tap() {
        let mut view = view();
        let start = submissions(&view);

        touch(&mut view, TouchAction::Down, 25.0, 25.0, 0);
        touch(&mut view, TouchAction::Up, 25.0, 25.0, 50);
        touch(&mut view, TouchAction::Down, 25.0, 25.0, 150);
        assert!(touch(&mut view, TouchAction::Up, 25.0, 25.0, 200));

        // Screen (25, 25) is world (25, 75): the y axis points north.
        assert_abs_diff_eq!(view.viewport().bounds(), Rect::new(12.5, 37.5, 62.5, 87.5));
        assert_abs_diff_eq!(view.window().canvas(), Rect::new(-25.0, -25.0, 175.0, 175.0));
        assert_eq!(submissions(&view), start + 1);
    }

    #[test]
    fn pinch_zooms_about_focus() {
        let mut view = view();
        let start = submissions(&view);
        let at = |action, index, a: f64, b: f64| {
            TouchEvent::new(
                action,
                index,
                vec![Pointer::new(1, a, 50.0), Pointer::new(2, b, 50.0)],
                Duration::ZERO,
            )
        };

        view.on_touch_event(&TouchEvent::new(
            TouchAction::Down,
            0,
            vec![Pointer::new(1, 40.0, 50.0)],
            Duration::ZERO,
        ));
        assert!(view.on_touch_event(&at(TouchAction::PointerDown, 1, 40.0, 60.0)));
        assert!(view.on_touch_event(&at(TouchAction::Move, 0, 30.0, 70.0)));

        assert_abs_diff_eq!(view.viewport().bounds(), Rect::new(25.0, 25.0, 75.0, 75.0));
        assert_abs_diff_eq!(view.window().canvas(), Rect::new(-50.0, -50.0, 150.0, 150.0));
        assert_eq!(submissions(&view), start + 1);

        assert!(!view.on_touch_event(&at(TouchAction::PointerUp, 1, 30.0, 70.0)));
        assert_eq!(view.viewport().bounds(), Rect::new(25.0, 25.0, 75.0, 75.0));
    }
}
