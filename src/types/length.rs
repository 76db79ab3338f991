//! Length - a magnitude tagged with a CSS-style unit.

// =============================================================================
// LengthUnit
// =============================================================================

/// Units for [`Length`].
///
/// Bit 0 separates the two families: 0 = absolute, 1 = relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LengthUnit {
    // Absolute
    #[default]
    Pixels = 0b0000_0000,
    Centimeters = 0b0000_0010,
    Millimeters = 0b0000_0100,
    Inches = 0b0000_0110,
    Points = 0b0000_1000,
    Picas = 0b0000_1010,

    // Relative
    ElementSize = 0b0000_0001,
    XHeight = 0b0000_0011,
    ZeroWidth = 0b0000_0101,
    RootElementSize = 0b0000_0111,
    ViewportWidth = 0b0000_1001,
    ViewportHeight = 0b0000_1011,
    ViewportMin = 0b0000_1101,
    ViewportMax = 0b0000_1111,
    Percentage = 0b0001_0001,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 15] = [
        Self::Pixels,
        Self::Centimeters,
        Self::Millimeters,
        Self::Inches,
        Self::Points,
        Self::Picas,
        Self::ElementSize,
        Self::XHeight,
        Self::ZeroWidth,
        Self::RootElementSize,
        Self::ViewportWidth,
        Self::ViewportHeight,
        Self::ViewportMin,
        Self::ViewportMax,
        Self::Percentage,
    ];

    /// Parse a unit tag. Unknown tags return `None`.
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0b0000_0000 => Self::Pixels,
            0b0000_0010 => Self::Centimeters,
            0b0000_0100 => Self::Millimeters,
            0b0000_0110 => Self::Inches,
            0b0000_1000 => Self::Points,
            0b0000_1010 => Self::Picas,
            0b0000_0001 => Self::ElementSize,
            0b0000_0011 => Self::XHeight,
            0b0000_0101 => Self::ZeroWidth,
            0b0000_0111 => Self::RootElementSize,
            0b0000_1001 => Self::ViewportWidth,
            0b0000_1011 => Self::ViewportHeight,
            0b0000_1101 => Self::ViewportMin,
            0b0000_1111 => Self::ViewportMax,
            0b0001_0001 => Self::Percentage,
            _ => return None,
        })
    }

    #[inline]
    pub const fn is_relative(self) -> bool {
        (self as u8) & 1 != 0
    }

    #[inline]
    pub const fn is_absolute(self) -> bool {
        (self as u8) & 1 == 0
    }

    /// CSS suffix for this unit (`px`, `em`, `%`, ...).
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::Centimeters => "cm",
            Self::Millimeters => "mm",
            Self::Inches => "in",
            Self::Points => "pt",
            Self::Picas => "pc",
            Self::ElementSize => "em",
            Self::XHeight => "ex",
            Self::ZeroWidth => "ch",
            Self::RootElementSize => "rem",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
            Self::ViewportMin => "vmin",
            Self::ViewportMax => "vmax",
            Self::Percentage => "%",
        }
    }
}

// =============================================================================
// Length
// =============================================================================

/// A length value. Immutable once constructed; no rounding or validation
/// beyond storing the unit tag.
///
/// ```
/// use spark_nodebuf::types::{Length, LengthExt, LengthUnit};
///
/// let gutter = 12_i32.px();
/// let half = 50.0_f32.perc();
/// assert_eq!(gutter, Length::new(12.0, LengthUnit::Pixels));
/// assert!(half.is_relative());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length {
    value: f32,
    unit: LengthUnit,
}

impl Length {
    pub const ZERO: Self = Self::new(0.0, LengthUnit::Pixels);

    pub const fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    #[inline]
    pub const fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub const fn unit(&self) -> LengthUnit {
        self.unit
    }

    #[inline]
    pub const fn is_relative(&self) -> bool {
        self.unit.is_relative()
    }

    #[inline]
    pub const fn is_absolute(&self) -> bool {
        self.unit.is_absolute()
    }

    pub const fn px(value: f32) -> Self { Self::new(value, LengthUnit::Pixels) }
    pub const fn cm(value: f32) -> Self { Self::new(value, LengthUnit::Centimeters) }
    pub const fn mm(value: f32) -> Self { Self::new(value, LengthUnit::Millimeters) }
    pub const fn inch(value: f32) -> Self { Self::new(value, LengthUnit::Inches) }
    pub const fn pt(value: f32) -> Self { Self::new(value, LengthUnit::Points) }
    pub const fn pc(value: f32) -> Self { Self::new(value, LengthUnit::Picas) }
    pub const fn em(value: f32) -> Self { Self::new(value, LengthUnit::ElementSize) }
    pub const fn ex(value: f32) -> Self { Self::new(value, LengthUnit::XHeight) }
    pub const fn ch(value: f32) -> Self { Self::new(value, LengthUnit::ZeroWidth) }
    pub const fn rem(value: f32) -> Self { Self::new(value, LengthUnit::RootElementSize) }
    pub const fn vw(value: f32) -> Self { Self::new(value, LengthUnit::ViewportWidth) }
    pub const fn vh(value: f32) -> Self { Self::new(value, LengthUnit::ViewportHeight) }
    pub const fn vmin(value: f32) -> Self { Self::new(value, LengthUnit::ViewportMin) }
    pub const fn vmax(value: f32) -> Self { Self::new(value, LengthUnit::ViewportMax) }
    pub const fn perc(value: f32) -> Self { Self::new(value, LengthUnit::Percentage) }

    /// Resolve to pixels.
    ///
    /// Absolute units use the CSS reference ratios (1in = 96px = 2.54cm =
    /// 72pt = 6pc). Font and viewport units read `ctx`; percentages are taken
    /// of `basis`.
    pub fn resolve(&self, ctx: &LengthContext, basis: f32) -> f32 {
        let v = self.value;
        match self.unit {
            LengthUnit::Pixels => v,
            LengthUnit::Centimeters => v * PX_PER_INCH / 2.54,
            LengthUnit::Millimeters => v * PX_PER_INCH / 25.4,
            LengthUnit::Inches => v * PX_PER_INCH,
            LengthUnit::Points => v * PX_PER_INCH / 72.0,
            LengthUnit::Picas => v * PX_PER_INCH / 6.0,
            LengthUnit::ElementSize => v * ctx.font_size,
            LengthUnit::XHeight => v * ctx.x_height,
            LengthUnit::ZeroWidth => v * ctx.zero_width,
            LengthUnit::RootElementSize => v * ctx.root_font_size,
            LengthUnit::ViewportWidth => v * ctx.viewport_width / 100.0,
            LengthUnit::ViewportHeight => v * ctx.viewport_height / 100.0,
            LengthUnit::ViewportMin => v * ctx.viewport_width.min(ctx.viewport_height) / 100.0,
            LengthUnit::ViewportMax => v * ctx.viewport_width.max(ctx.viewport_height) / 100.0,
            LengthUnit::Percentage => v * basis / 100.0,
        }
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

const PX_PER_INCH: f32 = 96.0;

// =============================================================================
// Literal conversions
// =============================================================================

/// `12_i32.px()`, `1.5_f32.em()` and friends.
pub trait LengthExt: Sized {
    fn to_length(self, unit: LengthUnit) -> Length;

    #[inline] fn px(self) -> Length { self.to_length(LengthUnit::Pixels) }
    #[inline] fn cm(self) -> Length { self.to_length(LengthUnit::Centimeters) }
    #[inline] fn mm(self) -> Length { self.to_length(LengthUnit::Millimeters) }
    #[inline] fn inch(self) -> Length { self.to_length(LengthUnit::Inches) }
    #[inline] fn pt(self) -> Length { self.to_length(LengthUnit::Points) }
    #[inline] fn pc(self) -> Length { self.to_length(LengthUnit::Picas) }
    #[inline] fn em(self) -> Length { self.to_length(LengthUnit::ElementSize) }
    #[inline] fn ex(self) -> Length { self.to_length(LengthUnit::XHeight) }
    #[inline] fn ch(self) -> Length { self.to_length(LengthUnit::ZeroWidth) }
    #[inline] fn rem(self) -> Length { self.to_length(LengthUnit::RootElementSize) }
    #[inline] fn vw(self) -> Length { self.to_length(LengthUnit::ViewportWidth) }
    #[inline] fn vh(self) -> Length { self.to_length(LengthUnit::ViewportHeight) }
    #[inline] fn vmin(self) -> Length { self.to_length(LengthUnit::ViewportMin) }
    #[inline] fn vmax(self) -> Length { self.to_length(LengthUnit::ViewportMax) }
    #[inline] fn perc(self) -> Length { self.to_length(LengthUnit::Percentage) }
}

impl LengthExt for f32 {
    #[inline]
    fn to_length(self, unit: LengthUnit) -> Length {
        Length::new(self, unit)
    }
}

impl LengthExt for i32 {
    #[inline]
    fn to_length(self, unit: LengthUnit) -> Length {
        Length::new(self as f32, unit)
    }
}

// =============================================================================
// LengthContext
// =============================================================================

/// Sizes that relative units resolve against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    /// Font size of the element (`em`).
    pub font_size: f32,
    /// Font size of the root element (`rem`).
    pub root_font_size: f32,
    /// Height of a lowercase x (`ex`).
    pub x_height: f32,
    /// Advance of the `0` glyph (`ch`).
    pub zero_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Advance of one text column; text measurement multiplies display
    /// width by this.
    pub cell_width: f32,
    /// Height of one text line.
    pub line_height: f32,
}

impl LengthContext {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Self::default()
        }
    }

    /// Override the text cell size.
    pub fn with_cell(mut self, cell_width: f32, line_height: f32) -> Self {
        self.cell_width = cell_width;
        self.line_height = line_height;
        self
    }
}

impl Default for LengthContext {
    fn default() -> Self {
        // Browser defaults: 16px font, x-height and `0` advance ~0.5em.
        Self {
            font_size: 16.0,
            root_font_size: 16.0,
            x_height: 8.0,
            zero_width: 8.0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            cell_width: 8.0,
            line_height: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_families() {
        for unit in LengthUnit::ALL {
            assert_ne!(unit.is_relative(), unit.is_absolute(), "{unit:?}");
        }
        assert!(LengthUnit::Pixels.is_absolute());
        assert!(LengthUnit::Picas.is_absolute());
        assert!(LengthUnit::Percentage.is_relative());
        assert!(LengthUnit::ViewportMax.is_relative());
    }

    #[test]
    fn test_unit_from_u8() {
        for unit in LengthUnit::ALL {
            assert_eq!(LengthUnit::from_u8(unit as u8), Some(unit));
        }
        assert_eq!(LengthUnit::from_u8(0b0000_1100), None);
        assert_eq!(LengthUnit::from_u8(255), None);
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(3_i32.px(), Length::px(3.0));
        assert_eq!(2.5_f32.cm().unit(), LengthUnit::Centimeters);
        assert_eq!(1_i32.inch().unit(), LengthUnit::Inches);
        assert_eq!(7_i32.rem().value(), 7.0);
        assert_eq!(100_i32.perc().unit(), LengthUnit::Percentage);
        assert_eq!(4_i32.vmin(), Length::vmin(4.0));
    }

    #[test]
    fn test_resolve_absolute() {
        let ctx = LengthContext::default();
        assert_eq!(1_i32.inch().resolve(&ctx, 0.0), 96.0);
        assert_eq!(72_i32.pt().resolve(&ctx, 0.0), 96.0);
        assert_eq!(6_i32.pc().resolve(&ctx, 0.0), 96.0);
        assert!((2.54_f32.cm().resolve(&ctx, 0.0) - 96.0).abs() < 1e-3);
        assert!((25.4_f32.mm().resolve(&ctx, 0.0) - 96.0).abs() < 1e-3);
    }

    #[test]
    fn test_resolve_relative() {
        let ctx = LengthContext::new(800.0, 600.0);
        assert_eq!(2_i32.em().resolve(&ctx, 0.0), 32.0);
        assert_eq!(1_i32.rem().resolve(&ctx, 0.0), 16.0);
        assert_eq!(10_i32.vw().resolve(&ctx, 0.0), 80.0);
        assert_eq!(10_i32.vh().resolve(&ctx, 0.0), 60.0);
        assert_eq!(10_i32.vmin().resolve(&ctx, 0.0), 60.0);
        assert_eq!(10_i32.vmax().resolve(&ctx, 0.0), 80.0);
        assert_eq!(25_i32.perc().resolve(&ctx, 200.0), 50.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(12_i32.px().to_string(), "12px");
        assert_eq!(50_i32.perc().to_string(), "50%");
    }
}
