//! Coordinate conversion from raw pointer events to canvas-local pixels.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// Canvas-local pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for PointerPosition {
    type Output = PointerDelta;

    fn sub(self, rhs: Self) -> PointerDelta {
        PointerDelta::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Incremental pointer movement between two processed events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PointerDelta {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Raw event coordinates, as delivered by the browser.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Viewport coordinates (`clientX` / `clientY`).
    pub client_x: f64,
    pub client_y: f64,
    /// Document coordinates (`pageX` / `pageY`).
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerInput {
    /// Input whose viewport and document coordinates coincide (unscrolled page).
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            client_x: x,
            client_y: y,
            page_x: x,
            page_y: y,
        }
    }
}

/// Canvas element geometry sampled when the event is handled.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasGeometry {
    /// `getBoundingClientRect().left/top` (border box)
    pub rect_left: f64,
    pub rect_top: f64,
    /// `offsetLeft/offsetTop`
    pub offset_left: f64,
    pub offset_top: f64,
    /// `clientLeft/clientTop` (border widths)
    pub border_left: f64,
    pub border_top: f64,
}

/// Which origin the canvas-local coordinates are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginConvention {
    /// `client - (boundingRect + border)`; follows scroll and CSS transforms.
    #[default]
    BoundingRect,
    /// `page - (offset + border)`; ignores scroll.
    Offset,
}

/// Maps raw pointer input to canvas-local positions with one fixed convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinateMapper {
    convention: OriginConvention,
}

impl CoordinateMapper {
    pub const fn new(convention: OriginConvention) -> Self {
        Self { convention }
    }

    /// Both conventions measure from the canvas content box, inside the border.
    #[inline]
    pub fn map(&self, input: PointerInput, geometry: &CanvasGeometry) -> PointerPosition {
        match self.convention {
            OriginConvention::BoundingRect => PointerPosition::new(
                input.client_x - (geometry.rect_left + geometry.border_left),
                input.client_y - (geometry.rect_top + geometry.border_top),
            ),
            OriginConvention::Offset => PointerPosition::new(
                input.page_x - (geometry.offset_left + geometry.border_left),
                input.page_y - (geometry.offset_top + geometry.border_top),
            ),
        }
    }
}
