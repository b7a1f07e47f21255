use serde::{Deserialize, Serialize};

use crate::common::error::{QraftError, QraftResult};

// Style configuration
//------------------------------------------------------------------------------

/// Fallback destination encoded whenever the configured text is empty or
/// rejected by the symbol encoder. Keeps the renderer total: a matrix always
/// exists.
pub const FALLBACK_TEXT: &str = "https://example.com";

pub const MIN_RENDER_SIZE: u32 = 100;
pub const MAX_RENDER_SIZE: u32 = 1000;
pub const DEFAULT_RENDER_SIZE: u32 = 280;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, self.a])
    }

    /// CSS-style hex triplet, used by the flat vector export.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(ecl: EcLevel) -> Self {
        match ecl {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum ModulePattern {
    Square,
    Rounded,
    Dot,
    Classy,
    ClassyRounded,
    ExtraRounded,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum GradientDirection {
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

/// Two-stop gradient, stops fixed at positions 0 and 1.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub direction: GradientDirection,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Fill {
    Solid(Color),
    Gradient(Gradient),
}

impl Fill {
    /// The color representing this fill when a single color is needed, such
    /// as the logo separation ring or the flat vector export.
    pub fn primary(&self) -> Color {
        match self {
            Fill::Solid(c) => *c,
            Fill::Gradient(g) => g.start,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Background {
    Solid(Color),
    Transparent,
    Gradient(Gradient),
}

impl Background {
    pub fn primary(&self) -> Color {
        match self {
            Background::Solid(c) => *c,
            Background::Transparent => Color::WHITE,
            Background::Gradient(g) => g.start,
        }
    }
}

/// Outer-ring shape of the three finder corners. `None` affects shape choice
/// only; the structural ring is always rendered (as a square) to keep the
/// symbol scannable.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum RingShape {
    None,
    Square,
    Rounded,
    Circle,
    Outpoint,
    Inpoint,
}

/// Center-dot shape of the three finder corners, with the same `None`
/// substitution rule as [`RingShape`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum DotShape {
    None,
    Square,
    Rounded,
    Circle,
    Diamond,
    Star,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum FrameKind {
    None,
    Simple,
    Rounded,
    BannerBottom,
    BadgeTop,
    Ticket,
    CircleBadge,
    BoldBottom,
}

/// An uploaded logo: original file name plus the raw, size-checked bytes.
/// Decoding happens asynchronously in the pipeline, not here.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct LogoData {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Immutable, value-compared description of every visual axis of a styled
/// symbol. Updates go through the `with_*` methods, which consume the old
/// value and return a new one; no field is ever mutated in place.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub text: String,
    pub label: String,
    pub pattern: ModulePattern,
    pub module_fill: Fill,
    pub background: Background,
    pub ring_shape: RingShape,
    pub ring_color: Color,
    pub dot_shape: DotShape,
    pub dot_color: Color,
    pub logo: Option<LogoData>,
    pub frame: FrameKind,
    pub frame_color: Color,
    pub caption: String,
    pub caption_color: Color,
    pub size: u32,
    pub ec_level: EcLevel,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text: FALLBACK_TEXT.to_string(),
            label: String::new(),
            pattern: ModulePattern::Square,
            module_fill: Fill::Solid(Color::BLACK),
            background: Background::Solid(Color::WHITE),
            ring_shape: RingShape::Square,
            ring_color: Color::BLACK,
            dot_shape: DotShape::Square,
            dot_color: Color::BLACK,
            logo: None,
            frame: FrameKind::None,
            frame_color: Color::BLACK,
            caption: String::new(),
            caption_color: Color::WHITE,
            size: DEFAULT_RENDER_SIZE,
            ec_level: EcLevel::M,
        }
    }
}

impl StyleConfig {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_pattern(mut self, pattern: ModulePattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn with_module_fill(mut self, fill: Fill) -> Self {
        self.module_fill = fill;
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_ring(mut self, shape: RingShape, color: Color) -> Self {
        self.ring_shape = shape;
        self.ring_color = color;
        self
    }

    pub fn with_dot(mut self, shape: DotShape, color: Color) -> Self {
        self.dot_shape = shape;
        self.dot_color = color;
        self
    }

    pub fn with_logo(mut self, logo: Option<LogoData>) -> Self {
        self.logo = logo;
        self
    }

    /// Selecting `FrameKind::None` clears the caption: a caption is never
    /// drawn without a frame to carry it.
    pub fn with_frame(mut self, frame: FrameKind, color: Color) -> Self {
        self.frame = frame;
        self.frame_color = color;
        if frame == FrameKind::None {
            self.caption.clear();
        }
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>, color: Color) -> Self {
        self.caption = caption.into();
        self.caption_color = color;
        self
    }

    /// Render size is clamped into the supported range, keeping the value
    /// invariant regardless of caller input.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.clamp(MIN_RENDER_SIZE, MAX_RENDER_SIZE);
        self
    }

    pub fn with_ec_level(mut self, ec_level: EcLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Checks invariants on configurations coming from outside the `with_*`
    /// surface, e.g. deserialized gallery entries. Logo presence is
    /// deliberately not coupled to the EC level.
    pub fn validate(&self) -> QraftResult<()> {
        if self.size < MIN_RENDER_SIZE || self.size > MAX_RENDER_SIZE {
            return Err(QraftError::InvalidRenderSize(self.size));
        }
        Ok(())
    }
}
