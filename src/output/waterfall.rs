//! Geometry shared by the text and TUI waterfall charts.

use crate::scoring::WaterfallStep;

/// Horizontal extent of one bar, in character cells from the chart's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSpan {
    pub offset: usize,
    pub len: usize,
    pub negative: bool,
}

/// Maps score values onto `width` columns. The range always includes 0, so
/// the first bar starts at the axis.
#[derive(Debug, Clone, Copy)]
pub struct WaterfallScale {
    lo: i32,
    hi: i32,
    width: usize,
}

impl WaterfallScale {
    pub fn new(steps: &[WaterfallStep], width: usize) -> Self {
        let lo = steps
            .iter()
            .flat_map(|s| [s.start, s.end])
            .fold(0, i32::min);
        let hi = steps
            .iter()
            .flat_map(|s| [s.start, s.end])
            .fold(0, i32::max);
        let hi = if hi == lo { lo.saturating_add(1) } else { hi };

        Self { lo, hi, width }
    }

    pub fn column(&self, value: i32) -> usize {
        let (lo, hi) = (f64::from(self.lo), f64::from(self.hi));
        let ratio = (f64::from(value) - lo) / (hi - lo);
        let col = (ratio * self.width as f64).round() as usize;
        col.min(self.width)
    }

    pub fn span(&self, step: &WaterfallStep) -> BarSpan {
        let from = self.column(step.start.min(step.end));
        let to = self.column(step.start.max(step.end));
        let mut len = to - from;
        // Non-zero deltas stay visible even when they round to nothing
        if len == 0 && step.delta != 0 && self.width > 0 {
            len = 1;
        }
        let offset = from.min(self.width.saturating_sub(len));

        BarSpan {
            offset,
            len,
            negative: step.delta < 0,
        }
    }
}
