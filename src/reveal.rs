//! One-way reveal state for scroll-animated elements.

/// Class marking an element for a scroll-triggered entrance.
pub const MARKER_CLASS: &str = "animate-on-scroll";
/// Class applied once an element has been revealed.
pub const REVEALED_CLASS: &str = "animated";

/// Scroll-mode rule: the element's top edge sits far enough inside the viewport.
pub fn in_view(top: f64, viewport_height: f64, offset: f64) -> bool {
    top < viewport_height - offset
}

/// CSS `animation` shorthand for a revealed element.
pub fn animation_value(name: &str, duration: &str, easing: &str) -> String {
    format!("{name} {duration} {easing} forwards")
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealTarget {
    revealed: bool,
    pub animation: Option<String>,
}

impl RevealTarget {
    pub fn new(animation: Option<String>) -> Self {
        Self {
            revealed: false,
            animation,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns `true` only on the call that flips the flag.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.revealed, true)
    }

    pub fn animation_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.animation.as_deref().unwrap_or(fallback)
    }
}

/// All targets found at scan time, indexed in document order.
#[derive(Debug, Default)]
pub struct RevealSet {
    targets: Vec<RevealTarget>,
}

impl RevealSet {
    pub fn new(targets: Vec<RevealTarget>) -> Self {
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RevealTarget> {
        self.targets.get(index)
    }

    pub fn reveal(&mut self, index: usize) -> bool {
        self.targets.get_mut(index).is_some_and(RevealTarget::reveal)
    }

    /// Scroll-mode pass. `tops[i]` is the current top of target `i`.
    /// Returns the indices revealed by this pass.
    pub fn scan(&mut self, tops: &[f64], viewport_height: f64, offset: f64) -> Vec<usize> {
        tops.iter()
            .enumerate()
            .filter(|&(_, &top)| in_view(top, viewport_height, offset))
            .filter_map(|(i, _)| self.reveal(i).then_some(i))
            .collect()
    }

    pub fn all_revealed(&self) -> bool {
        self.targets.iter().all(RevealTarget::is_revealed)
    }
}
