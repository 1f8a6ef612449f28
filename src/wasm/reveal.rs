use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    Window,
};

use super::dom;
use crate::config::{RevealConfig, RevealMode};
use crate::reveal::{animation_value, RevealSet, RevealTarget, MARKER_CLASS, REVEALED_CLASS};

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct Targets {
    elements: Vec<Element>,
    set: RevealSet,
    config: RevealConfig,
}

impl Targets {
    fn reveal(&mut self, index: usize) {
        if self.set.reveal(index) {
            self.apply_styles(index);
        }
    }

    fn apply_styles(&self, index: usize) {
        let (Some(el), Some(target)) = (self.elements.get(index), self.set.get(index)) else {
            return;
        };
        let animation = animation_value(
            target.animation_or(&self.config.default_animation),
            &self.config.duration,
            &self.config.easing,
        );
        let applied = el
            .class_list()
            .add_1(REVEALED_CLASS)
            .and_then(|_| dom::set_style(el, "animation", &animation));
        if let Err(e) = applied {
            log::warn!("reveal styling failed: {e:?}");
        }
    }

    fn index_of(&self, el: &Element) -> Option<usize> {
        self.elements.iter().position(|e| e == el)
    }

    fn scan(&mut self, viewport_height: f64) {
        let tops: Vec<f64> = self
            .elements
            .iter()
            .map(|el| el.get_bounding_client_rect().top())
            .collect();
        let offset = self.config.offset;
        for index in self.set.scan(&tops, viewport_height, offset) {
            self.apply_styles(index);
        }
    }
}

/// Keeps the reveal mechanism alive; dropping it disconnects the observer.
pub struct RevealHandle {
    targets: Rc<RefCell<Targets>>,
    observer: Option<(IntersectionObserver, ObserverCallback)>,
    _scroll: Option<EventListener>,
}

impl RevealHandle {
    pub fn is_revealed(&self, index: usize) -> bool {
        self.targets
            .borrow()
            .set
            .get(index)
            .is_some_and(RevealTarget::is_revealed)
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        if let Some((observer, _)) = &self.observer {
            observer.disconnect();
        }
    }
}

pub fn start(
    window: &Window,
    document: &Document,
    config: &RevealConfig,
) -> Result<Option<RevealHandle>, JsValue> {
    let elements = dom::query_all(document, &format!(".{MARKER_CLASS}"))?;
    if elements.is_empty() {
        return Ok(None);
    }
    let targets: Vec<RevealTarget> = elements
        .iter()
        .map(|el| RevealTarget::new(el.get_attribute("data-animation")))
        .collect();
    for el in &elements {
        dom::set_style(el, "opacity", "0")?;
    }
    let targets = Rc::new(RefCell::new(Targets {
        elements,
        set: RevealSet::new(targets),
        config: config.clone(),
    }));

    let observer_available = js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver"))?;
    let handle = if config.mode == RevealMode::Intersect && observer_available {
        observe(targets, config)?
    } else {
        poll_on_scroll(window, targets)
    };
    Ok(Some(handle))
}

/// One-shot intersection observer; each element is unobserved after it first shows.
fn observe(targets: Rc<RefCell<Targets>>, config: &RevealConfig) -> Result<RevealHandle, JsValue> {
    let callback: ObserverCallback = {
        let targets = targets.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            let mut targets = targets.borrow_mut();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let el = entry.target();
                if let Some(index) = targets.index_of(&el) {
                    targets.reveal(index);
                }
                observer.unobserve(&el);
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>)
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    // The observer reports the initial state of every target, so content
    // already on screen is revealed without a scroll.
    for el in &targets.borrow().elements {
        observer.observe(el);
    }

    Ok(RevealHandle {
        targets,
        observer: Some((observer, callback)),
        _scroll: None,
    })
}

fn poll_on_scroll(window: &Window, targets: Rc<RefCell<Targets>>) -> RevealHandle {
    let (_, height) = dom::viewport(window);
    targets.borrow_mut().scan(height);

    let scroll = {
        let targets = targets.clone();
        let win = window.clone();
        EventListener::new(window, "scroll", move |_| {
            let (_, height) = dom::viewport(&win);
            targets.borrow_mut().scan(height);
        })
    };

    RevealHandle {
        targets,
        observer: None,
        _scroll: Some(scroll),
    }
}
