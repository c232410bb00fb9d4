/*
 * Range widgets: progress bars and sliders. Both keep an inclusive [min, max]
 * range and clamp every value written into it. A reversed range is stored
 * with its bounds swapped.
 */
use super::{TextCapable, ValueCapable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeModel {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

impl RangeModel {
    pub(crate) fn new(min: i32, max: i32, value: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    pub(crate) fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Position of the value within the range, 0.0 to 1.0.
    pub(crate) fn fraction(&self) -> f32 {
        if self.max == self.min {
            return 0.0;
        }
        let span = i64::from(self.max) - i64::from(self.min);
        ((i64::from(self.value) - i64::from(self.min)) as f64 / span as f64) as f32
    }

    pub(crate) fn percent(&self) -> i32 {
        (self.fraction() * 100.0).round() as i32
    }

    /// Value under `offset` pixels along a track `extent` pixels long.
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    pub(crate) fn value_at(&self, offset: i32, extent: i32) -> i32 {
        if extent <= 0 {
            return self.min;
        }
        let span = i64::from(self.max) - i64::from(self.min);
        let offset = i64::from(offset.clamp(0, extent));
        let value = i64::from(self.min) + span * offset / i64::from(extent);
        value.clamp(i64::from(self.min), i64::from(self.max)) as i32
    }

    /// Pixels of a track `extent` pixels long covered by the value.
    #[cfg_attr(not(target_os = "windows"), allow(dead_code))]
    pub(crate) fn filled(&self, extent: i32) -> i32 {
        let span = (i64::from(self.max) - i64::from(self.min)).max(1);
        let covered = i64::from(self.value) - i64::from(self.min);
        (i64::from(extent.max(0)) * covered / span) as i32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProgressBarState {
    pub range: RangeModel,
    pub show_text: bool,
    /// Overlay string; when absent and `show_text` is set, the percentage shows.
    pub text: Option<String>,
}

impl ProgressBarState {
    pub(crate) fn new(min: i32, max: i32, value: i32, show_text: bool) -> Self {
        Self {
            range: RangeModel::new(min, max, value),
            show_text,
            text: None,
        }
    }

    pub(crate) fn display_text(&self) -> Option<String> {
        if !self.show_text {
            return None;
        }
        Some(
            self.text
                .clone()
                .unwrap_or_else(|| format!("{}%", self.range.percent())),
        )
    }
}

impl TextCapable for ProgressBarState {
    fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }
}

impl ValueCapable for ProgressBarState {
    fn value(&self) -> i32 {
        self.range.value
    }

    fn set_value(&mut self, value: i32) {
        self.range.set(value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SliderState {
    pub range: RangeModel,
}

impl SliderState {
    pub(crate) fn new(min: i32, max: i32, value: i32) -> Self {
        Self {
            range: RangeModel::new(min, max, value),
        }
    }
}

impl ValueCapable for SliderState {
    fn value(&self) -> i32 {
        self.range.value
    }

    fn set_value(&mut self, value: i32) {
        self.range.set(value);
    }
}
