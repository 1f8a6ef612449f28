//! Menu visibility and active-link tracking.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    Narrow,
    Wide,
}

impl Layout {
    pub fn for_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            Layout::Narrow
        } else {
            Layout::Wide
        }
    }
}

/// What the DOM should show for the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuView {
    pub toggle_visible: bool,
    pub menu_visible: bool,
    /// Drives the `active` class on toggle and menu.
    pub active: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct MenuState {
    breakpoint: f64,
    layout: Layout,
    open: bool,
}

impl MenuState {
    pub fn new(breakpoint: f64, width: f64) -> Self {
        Self {
            breakpoint,
            layout: Layout::for_width(width, breakpoint),
            open: false,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn view(&self) -> MenuView {
        match self.layout {
            Layout::Narrow => MenuView {
                toggle_visible: true,
                menu_visible: self.open,
                active: self.open,
            },
            Layout::Wide => MenuView {
                toggle_visible: false,
                menu_visible: true,
                active: false,
            },
        }
    }

    pub fn resize(&mut self, width: f64) -> MenuView {
        self.layout = Layout::for_width(width, self.breakpoint);
        if self.layout == Layout::Wide {
            self.open = false;
        }
        self.view()
    }

    pub fn toggle(&mut self) -> MenuView {
        if self.layout == Layout::Narrow {
            self.open = !self.open;
        }
        self.view()
    }

    /// Outside click or link click.
    pub fn close(&mut self) -> MenuView {
        self.open = false;
        self.view()
    }
}

/// Vertical extent of a page section.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Id of the first section containing `scroll_y + header_offset`.
pub fn active_section(sections: &[SectionSpan], scroll_y: f64, header_offset: f64) -> Option<&str> {
    let pos = scroll_y + header_offset;
    sections
        .iter()
        .find(|s| pos >= s.top && pos < s.top + s.height)
        .map(|s| s.id.as_str())
}

/// Section id a nav `href` points at, if it is an in-page fragment.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}
