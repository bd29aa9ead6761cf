//! Meridian is the core of an interactive map view. It keeps the world coordinates of a map,
//! the pixels of the widget that shows it and the bitmap rendered for it consistent while the
//! user drags and pinches the map and a background thread renders new frames.
//!
//! # Main components
//!
//! * [`Viewport`]: the authoritative map state, i.e. the world bounds, their CRS and the
//!   pixel size of the view. Every change is reported synchronously to the bound
//!   [`ViewportListener`]s.
//! * [`TransformPipeline`]: world to canvas and canvas to world transformations computed from
//!   a viewport.
//! * [`Window`]: where the last rendered bitmap is drawn on the screen. Gestures move and
//!   scale it for immediate feedback until a new bitmap arrives.
//! * [`RenderWorker`](render::RenderWorker): a single background thread that renders the
//!   latest viewport snapshot with a [`Renderer`](render::Renderer), skipping snapshots that
//!   became outdated while it was busy.
//! * [`controls`](control): pan, double-tap zoom and pinch zoom.
//! * [`MapView`]: puts everything together and is the only entry point for the host UI.
//!
//! The data model ([`Map`], [`Dataset`](map::Dataset), [`Style`](map::Style)) and the
//! drawing backend are defined here only as the interfaces the view needs.
//!
//! # Host integration
//!
//! ```ignore
//! let mut view = MapView::new(Map::new(), MyRenderer)?;
//! view.set_messenger(my_messenger);
//! view.add_layers(registry.get("roads")?)?;
//!
//! // Platform callbacks:
//! view.on_size_changed(width, height);
//! view.on_touch_event(&touch_event);
//!
//! // On every repaint:
//! view.process_updates();
//! view.on_draw(&mut canvas);
//!
//! // When the widget goes away:
//! view.destroy();
//! ```

pub mod app;
mod color;
pub mod config;
pub mod control;
pub mod error;
mod listener;
pub mod map;
mod map_view;
mod messenger;
pub mod render;
mod transform;
mod viewport;
mod window;

#[cfg(feature = "winit")]
pub mod winit;

pub use color::Color;
pub use config::MapViewConfig;
pub use listener::ListenerId;
pub use map::Map;
pub use map_view::MapView;
pub use messenger::{DummyMessenger, Messenger};
pub use meridian_types;
pub use transform::{AffineTransform, TransformPipeline};
pub use viewport::{Viewport, ViewportListener};
pub use window::Window;
