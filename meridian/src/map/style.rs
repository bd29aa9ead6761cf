use crate::color::Color;

/// Map-wide rendering style.
///
/// The style is opaque to the map view: it is handed to the [`Renderer`](crate::render::Renderer)
/// together with the layers. Changing the style of a [`Map`](crate::Map) triggers a redraw.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    name: Option<String>,
    background: Color,
}

impl Style {
    /// Creates a style with the given background color.
    pub fn new(background: Color) -> Self {
        Self {
            name: None,
            background,
        }
    }

    /// Sets the name of the style.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name of the style, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Color the bitmap is cleared with before layers are drawn.
    pub fn background(&self) -> Color {
        self.background
    }
}
