/// RGBA color with 8 bits per channel, not premultiplied.
///
/// This is the pixel format of a [`Bitmap`](crate::render::Bitmap). In serialized form a color
/// is a `#RRGGBB` or `#RRGGBBAA` string.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Fully transparent black. Fresh bitmaps are cleared with it.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);

    /// Color from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from the four bytes of an RGBA pixel.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// The four bytes of an RGBA pixel.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Red.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Alpha.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#RRGGBBAA` representation.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_bytes();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`. Colors without alpha are opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return None;
        }

        let mut bytes = [255u8; 4];
        for (byte, chunk) in bytes.iter_mut().zip(digits.as_bytes().chunks(2)) {
            let chunk = std::str::from_utf8(chunk).ok()?;
            *byte = u8::from_str_radix(chunk, 16).ok()?;
        }

        Some(Self::from_bytes(bytes))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("not a hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
