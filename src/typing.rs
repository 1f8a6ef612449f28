//! Type-and-erase headline.

pub const TYPE_DELAY_MS: u32 = 100;
pub const ERASE_DELAY_MS: u32 = 50;
pub const HOLD_DELAY_MS: u32 = 2000;
pub const NEXT_DELAY_MS: u32 = 500;

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    index: usize,
    shown: usize,
    erasing: bool,
}

/// One step of output: the text to display and how long to wait before the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Option<Self> {
        let phrases: Vec<Vec<char>> = phrases
            .iter()
            .map(|p| p.as_ref().chars().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            index: 0,
            shown: 0,
            erasing: false,
        })
    }

    pub fn next_frame(&mut self) -> Frame {
        let len = self.phrases[self.index].len();
        let delay_ms = if self.erasing {
            self.shown -= 1;
            if self.shown == 0 {
                self.erasing = false;
                self.index = (self.index + 1) % self.phrases.len();
                NEXT_DELAY_MS
            } else {
                ERASE_DELAY_MS
            }
        } else {
            self.shown += 1;
            if self.shown == len {
                self.erasing = true;
                HOLD_DELAY_MS
            } else {
                TYPE_DELAY_MS
            }
        };
        Frame {
            text: self.current_text(),
            delay_ms,
        }
    }

    fn current_text(&self) -> String {
        self.phrases[self.index][..self.shown].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_holds_erases_and_wraps() {
        let mut t = Typewriter::new(&["ab", "c"]).unwrap();
        let frames: Vec<Frame> = (0..8).map(|_| t.next_frame()).collect();
        let texts: Vec<&str> = frames.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["a", "ab", "a", "", "c", "", "a", "ab"]);
        let delays: Vec<u32> = frames.iter().map(|f| f.delay_ms).collect();
        assert_eq!(
            delays,
            [
                TYPE_DELAY_MS,
                HOLD_DELAY_MS,
                ERASE_DELAY_MS,
                NEXT_DELAY_MS,
                HOLD_DELAY_MS,
                NEXT_DELAY_MS,
                TYPE_DELAY_MS,
                HOLD_DELAY_MS
            ]
        );
    }

    #[test]
    fn handles_multibyte_text() {
        let mut t = Typewriter::new(&["é✓"]).unwrap();
        assert_eq!(t.next_frame().text, "é");
        assert_eq!(t.next_frame().text, "é✓");
    }

    #[test]
    fn empty_phrases_are_dropped() {
        assert!(Typewriter::new::<&str>(&[]).is_none());
        assert!(Typewriter::new(&["", ""]).is_none());
    }
}
