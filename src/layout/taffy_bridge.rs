//! Taffy Bridge - property blocks to Taffy styles
//!
//! Converts a box or text node's blocks into a `taffy::Style`, and measures
//! text for Taffy's measure callback. Layout itself is computed by the
//! caller; results go back into the buffer through
//! [`NodeBufferMut`](crate::node::NodeBufferMut).

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, Rect, Size, Style,
};

use crate::blocks::{BoxLayout, BoxLayoutDirection, BoxModel, BoxNode, BoxProperties, TextNode};
use crate::error::Result;
use crate::node::NodeHandle;
use crate::text::measure::{display_width, measure_text_height};
use crate::types::{Composite4, HorizontalAlignment, Length, LengthContext, LengthUnit, VerticalAlignment};

// =============================================================================
// LENGTH CONVERSION
// =============================================================================

/// Non-finite lengths mean "unset".
fn to_taffy_dimension(len: Length, ctx: &LengthContext) -> TaffyDimension {
    match len.unit() {
        _ if !len.value().is_finite() => TaffyDimension::Auto,
        LengthUnit::Percentage => TaffyDimension::Percent(len.value() / 100.0),
        _ => TaffyDimension::Length(len.resolve(ctx, 0.0)),
    }
}

fn to_taffy_lp(len: Length, ctx: &LengthContext) -> LengthPercentage {
    match len.unit() {
        LengthUnit::Percentage => LengthPercentage::Percent(len.value() / 100.0),
        _ => LengthPercentage::Length(len.resolve(ctx, 0.0)),
    }
}

fn to_taffy_lpa(len: Length, ctx: &LengthContext) -> LengthPercentageAuto {
    match len.unit() {
        _ if !len.value().is_finite() => LengthPercentageAuto::Auto,
        LengthUnit::Percentage => LengthPercentageAuto::Percent(len.value() / 100.0),
        _ => LengthPercentageAuto::Length(len.resolve(ctx, 0.0)),
    }
}

fn to_rect<T>(sides: Composite4<Length>, f: impl Fn(Length) -> T) -> Rect<T> {
    Rect { top: f(sides.top()), right: f(sides.right()), bottom: f(sides.bottom()), left: f(sides.left()) }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: BoxLayoutDirection) -> TaffyFlexDirection {
    match dir {
        BoxLayoutDirection::Row => TaffyFlexDirection::Row,
        BoxLayoutDirection::RowReverse => TaffyFlexDirection::RowReverse,
        BoxLayoutDirection::Column => TaffyFlexDirection::Column,
        BoxLayoutDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
    }
}

/// Position along one axis, independent of which axis it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisAlign {
    Start,
    Center,
    End,
    Stretch,
}

impl From<HorizontalAlignment> for AxisAlign {
    fn from(h: HorizontalAlignment) -> Self {
        match h {
            HorizontalAlignment::Left => Self::Start,
            HorizontalAlignment::Center => Self::Center,
            HorizontalAlignment::Right => Self::End,
            HorizontalAlignment::Stretch => Self::Stretch,
        }
    }
}

impl From<VerticalAlignment> for AxisAlign {
    fn from(v: VerticalAlignment) -> Self {
        match v {
            VerticalAlignment::Top => Self::Start,
            VerticalAlignment::Center => Self::Center,
            VerticalAlignment::Bottom => Self::End,
            VerticalAlignment::Stretch => Self::Stretch,
        }
    }
}

fn to_taffy_justify_content(align: AxisAlign) -> Option<TaffyJustifyContent> {
    Some(match align {
        AxisAlign::Start => TaffyJustifyContent::Start,
        AxisAlign::Center => TaffyJustifyContent::Center,
        AxisAlign::End => TaffyJustifyContent::End,
        AxisAlign::Stretch => TaffyJustifyContent::Stretch,
    })
}

fn to_taffy_align_items(align: AxisAlign) -> Option<TaffyAlignItems> {
    Some(match align {
        AxisAlign::Start => TaffyAlignItems::Start,
        AxisAlign::Center => TaffyAlignItems::Center,
        AxisAlign::End => TaffyAlignItems::End,
        AxisAlign::Stretch => TaffyAlignItems::Stretch,
    })
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn apply_flow(style: &mut Style, layout: &BoxLayout, ctx: &LengthContext) {
    let direction = layout.direction;
    let horizontal = AxisAlign::from(layout.alignment.horizontal());
    let vertical = AxisAlign::from(layout.alignment.vertical());
    let (main, cross) = if direction.is_row() { (horizontal, vertical) } else { (vertical, horizontal) };

    style.flex_direction = to_taffy_flex_direction(direction);
    style.justify_content = to_taffy_justify_content(main);
    style.align_items = to_taffy_align_items(cross);

    let spacing = to_taffy_lp(layout.spacing, ctx);
    style.gap = if direction.is_row() {
        Size { width: spacing, height: LengthPercentage::Length(0.0) }
    } else {
        Size { width: LengthPercentage::Length(0.0), height: spacing }
    };
}

fn apply_model(style: &mut Style, model: &BoxModel, ctx: &LengthContext) {
    style.padding = to_rect(model.padding, |l| to_taffy_lp(l, ctx));
    style.margin = to_rect(model.margin, |l| to_taffy_lpa(l, ctx));
}

/// Build a Taffy style from resolved box blocks. Missing blocks keep
/// Taffy's defaults.
pub fn to_taffy_style(props: &BoxProperties, ctx: &LengthContext) -> Style {
    let mut style = Style { display: Display::Flex, ..Default::default() };

    if let Some(c) = &props.constraints {
        style.min_size = Size {
            width: to_taffy_dimension(c.min_width, ctx),
            height: to_taffy_dimension(c.min_height, ctx),
        };
        style.max_size = Size {
            width: to_taffy_dimension(c.max_width, ctx),
            height: to_taffy_dimension(c.max_height, ctx),
        };
    }
    if let Some(layout) = &props.layout {
        apply_flow(&mut style, layout, ctx);
    }
    if let Some(model) = &props.model {
        apply_model(&mut style, model, ctx);
    }
    if let Some(border) = &props.border {
        style.border = to_rect(border.width, |l| to_taffy_lp(l, ctx));
    }
    style
}

/// Style for a node holding a [`BoxNode`].
pub fn box_style(node: NodeHandle<'_>, ctx: &LengthContext) -> Result<Style> {
    let kind: BoxNode = node.kind()?;
    let props = BoxProperties::load(&node.buffer(), &kind)?;
    Ok(to_taffy_style(&props, ctx))
}

/// Style for a node holding a [`TextNode`]. Size comes from
/// [`measure_text`], so only the box model applies.
pub fn text_style(node: NodeHandle<'_>, ctx: &LengthContext) -> Result<Style> {
    let kind: TextNode = node.kind()?;
    let mut style = Style::default();
    if let Some(model) = node.buffer().try_resolve(kind.model)? {
        apply_model(&mut style, &model, ctx);
    }
    Ok(style)
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for text content, in pixels.
///
/// Display width counts text columns; each column is `ctx.cell_width`
/// wide and each wrapped line `ctx.line_height` tall.
pub fn measure_text(
    content: &str,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    ctx: &LengthContext,
) -> Size<f32> {
    if content.is_empty() {
        return Size::ZERO;
    }

    let cell = ctx.cell_width.max(f32::MIN_POSITIVE);
    let text_cells = display_width(content);
    let avail_cells = match available_space.width {
        AvailableSpace::Definite(w) => (w.max(0.0) / cell).floor() as usize,
        AvailableSpace::MinContent => text_cells,
        AvailableSpace::MaxContent => usize::MAX,
    };
    let lines = measure_text_height(content, avail_cells.max(1));

    Size {
        width: known_dimensions.width.unwrap_or(text_cells.min(avail_cells) as f32 * cell),
        height: known_dimensions.height.unwrap_or(lines as f32 * ctx.line_height),
    }
}
