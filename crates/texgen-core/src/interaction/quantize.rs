//! Whole-pixel delta conversion for engines that only accept integers.
//!
//! The fractional part of each delta is carried to the next event, so slow drags
//! of less than a pixel per event still move the node.

use super::coords::PointerDelta;

/// Result of quantizing one delta; applied with [`DeltaQuantizer::commit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizedDelta {
    /// Whole-number delta to hand to the engine
    pub whole: PointerDelta,
    /// Fraction left over after this event
    pub remainder: PointerDelta,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaQuantizer {
    remainder: PointerDelta,
}

impl DeltaQuantizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remainder(&self) -> PointerDelta {
        self.remainder
    }

    /// Splits `delta` plus the carried remainder into whole pixels and a new remainder.
    /// Truncates toward zero, so `|remainder| < 1` on both axes.
    pub fn quantize(&self, delta: PointerDelta) -> QuantizedDelta {
        let total_x = self.remainder.dx + delta.dx;
        let total_y = self.remainder.dy + delta.dy;
        let whole = PointerDelta::new(total_x.trunc(), total_y.trunc());

        QuantizedDelta {
            whole,
            remainder: PointerDelta::new(total_x - whole.dx, total_y - whole.dy),
        }
    }

    pub fn commit(&mut self, quantized: &QuantizedDelta) {
        self.remainder = quantized.remainder;
    }

    pub fn reset(&mut self) {
        self.remainder = PointerDelta::ZERO;
    }
}
