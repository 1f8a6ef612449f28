use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node, Window};

use super::dom;
use crate::config::NavConfig;
use crate::nav::{active_section, fragment_target, Layout, MenuState, MenuView, SectionSpan};

pub const TOGGLE_ID: &str = "menuToggle";
pub const MENU_ID: &str = "navMenu";
const ACTIVE_CLASS: &str = "active";

#[derive(Clone)]
struct Elements {
    toggle: HtmlElement,
    menu: HtmlElement,
    links: Vec<Element>,
}

impl Elements {
    fn apply(&self, view: MenuView) {
        let display = |visible: bool| if visible { "flex" } else { "none" };
        let applied = self
            .toggle
            .style()
            .set_property("display", display(view.toggle_visible))
            .and_then(|_| self.menu.style().set_property("display", display(view.menu_visible)))
            .and_then(|_| self.toggle.class_list().toggle_with_force(ACTIVE_CLASS, view.active))
            .and_then(|_| self.menu.class_list().toggle_with_force(ACTIVE_CLASS, view.active));
        if let Err(e) = applied {
            log::warn!("menu update failed: {e:?}");
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.menu.contains(target) || self.toggle.contains(target)
    }

    /// Highlights the first link pointing at `section`; any duplicates stay plain.
    fn mark_active(&self, section: Option<&str>) {
        let mut marked = false;
        for link in &self.links {
            let href = link.get_attribute("href");
            let current = !marked
                && section.is_some()
                && href.as_deref().and_then(fragment_target) == section;
            marked |= current;
            link.class_list().toggle_with_force(ACTIVE_CLASS, current).ok();
        }
    }
}

/// The single owner of menu state and its listeners.
pub struct NavController {
    state: Rc<RefCell<MenuState>>,
    _listeners: Vec<EventListener>,
}

impl NavController {
    pub fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    pub fn layout(&self) -> Layout {
        self.state.borrow().layout()
    }
}

pub fn start(
    window: &Window,
    document: &Document,
    config: &NavConfig,
) -> Result<Option<NavController>, JsValue> {
    let (Some(toggle), Some(menu)) = (
        dom::html_by_id(document, TOGGLE_ID),
        dom::html_by_id(document, MENU_ID),
    ) else {
        return Ok(None);
    };
    let links = dom::elements(menu.query_selector_all("a")?);
    let els = Elements { toggle, menu, links };

    let (width, _) = dom::viewport(window);
    let state = Rc::new(RefCell::new(MenuState::new(config.breakpoint, width)));
    els.apply(state.borrow().view());

    let mut listeners = Vec::new();

    listeners.push({
        let (els, state, win) = (els.clone(), state.clone(), window.clone());
        EventListener::new(window, "resize", move |_| {
            let (width, _) = dom::viewport(&win);
            els.apply(state.borrow_mut().resize(width));
        })
    });

    listeners.push({
        let (toggle, els, state) = (els.toggle.clone(), els.clone(), state.clone());
        EventListener::new(&toggle, "click", move |event| {
            event.stop_propagation();
            els.apply(state.borrow_mut().toggle());
        })
    });

    listeners.push({
        let (els, state) = (els.clone(), state.clone());
        EventListener::new(document, "click", move |event| {
            let target = event.target();
            let inside = els.contains(target.as_ref().and_then(|t| t.dyn_ref::<Node>()));
            let mut state = state.borrow_mut();
            if state.layout() == Layout::Narrow && state.is_open() && !inside {
                els.apply(state.close());
            }
        })
    });

    for link in &els.links {
        let (els, state) = (els.clone(), state.clone());
        listeners.push(EventListener::new(link, "click", move |_| {
            let mut state = state.borrow_mut();
            if state.layout() == Layout::Narrow {
                els.apply(state.close());
            }
        }));
    }

    // Active link follows the section under the header
    let sections = dom::query_all(document, "section[id]")?;
    if !sections.is_empty() {
        let track = {
            let (els, win, header_offset) = (els.clone(), window.clone(), config.header_offset);
            move || {
                let spans: Vec<SectionSpan> = sections
                    .iter()
                    .filter_map(|s| s.dyn_ref::<HtmlElement>())
                    .map(|s| SectionSpan {
                        id: s.id(),
                        top: s.offset_top() as f64,
                        height: s.offset_height() as f64,
                    })
                    .collect();
                let scroll_y = win.scroll_y().unwrap_or(0.0);
                els.mark_active(active_section(&spans, scroll_y, header_offset));
            }
        };
        track();
        listeners.push(EventListener::new(window, "scroll", move |_| track()));
    }

    Ok(Some(NavController {
        state,
        _listeners: listeners,
    }))
}
