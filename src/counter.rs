//! Count-up tween for statistic figures.

/// Attribute carrying the final value.
pub const COUNT_ATTR: &str = "data-count-to";
/// Optional text appended after the number, e.g. `+` or `%`.
pub const SUFFIX_ATTR: &str = "data-suffix";

#[derive(Clone, Debug)]
pub struct CounterTween {
    target: u64,
    elapsed_ms: u32,
    duration_ms: u32,
    frame_ms: u32,
}

impl CounterTween {
    pub fn new(target: u64, duration_ms: u32, frame_ms: u32) -> Self {
        Self {
            target,
            elapsed_ms: 0,
            duration_ms: duration_ms.max(1),
            frame_ms: frame_ms.max(1),
        }
    }

    /// Parses a `data-count-to` value. Separators like `10,000` are allowed.
    pub fn parse_target(raw: &str) -> Option<u64> {
        let digits: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
        digits.trim().parse().ok()
    }

    pub fn value(&self) -> u64 {
        let t = (self.elapsed_ms as f64 / self.duration_ms as f64).min(1.0);
        (self.target as f64 * t).round() as u64
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Advances one frame. `None` once the final value has been emitted.
    pub fn tick(&mut self) -> Option<u64> {
        if self.is_done() {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.frame_ms);
        Some(self.value())
    }
}

pub fn format_count(value: u64, suffix: Option<&str>) -> String {
    format!("{value}{}", suffix.unwrap_or(""))
}
