//! FAQ accordion state.

pub const ITEM_CLASS: &str = "faq-item";
pub const QUESTION_CLASS: &str = "faq-question";
pub const OPEN_CLASS: &str = "open";

#[derive(Clone, Debug)]
pub struct Accordion {
    open: Vec<bool>,
    exclusive: bool,
}

impl Accordion {
    pub fn new(len: usize, exclusive: bool) -> Self {
        Self {
            open: vec![false; len],
            exclusive,
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    /// Flips item `index`. Returns the open flag of every item afterwards.
    pub fn toggle(&mut self, index: usize) -> &[bool] {
        if let Some(was_open) = self.open.get(index).copied() {
            if self.exclusive {
                self.open.iter_mut().for_each(|o| *o = false);
            }
            self.open[index] = !was_open;
        }
        &self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusive_keeps_one_open() {
        let mut a = Accordion::new(3, true);
        assert_eq!(a.toggle(0), &[true, false, false]);
        assert_eq!(a.toggle(2), &[false, false, true]);
        assert_eq!(a.toggle(2), &[false, false, false]);
    }

    #[test]
    fn independent_mode() {
        let mut a = Accordion::new(2, false);
        a.toggle(0);
        a.toggle(1);
        assert!(a.is_open(0) && a.is_open(1));
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut a = Accordion::new(1, true);
        assert_eq!(a.toggle(4), &[false]);
        assert!(!a.is_open(4));
    }
}
