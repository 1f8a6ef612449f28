//! Counters, FAQ accordion and typing headline.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Window};

use super::dom::{self, StopFlag};
use crate::accordion::{Accordion, ITEM_CLASS, OPEN_CLASS, QUESTION_CLASS};
use crate::config::{CounterConfig, FaqConfig, TypingConfig};
use crate::counter::{format_count, CounterTween, COUNT_ATTR, SUFFIX_ATTR};
use crate::reveal::in_view;
use crate::typing::Typewriter;

pub const TYPING_ID: &str = "typing-text";

struct Counter {
    element: Element,
    target: u64,
    started: bool,
}

/// Running counters. Dropping it stops every tween and the scroll trigger.
pub struct CountersHandle {
    _stop: StopFlag,
    _scroll: EventListener,
}

pub fn start_counters(
    window: &Window,
    document: &Document,
    config: &CounterConfig,
    offset: f64,
) -> Result<Option<CountersHandle>, JsValue> {
    let counters: Vec<Counter> = dom::query_all(document, &format!("[{COUNT_ATTR}]"))?
        .into_iter()
        .filter_map(|element| {
            let raw = element.get_attribute(COUNT_ATTR)?;
            match CounterTween::parse_target(&raw) {
                Some(target) => Some(Counter {
                    element,
                    target,
                    started: false,
                }),
                None => {
                    log::warn!("ignoring {COUNT_ATTR}=\"{raw}\"");
                    None
                }
            }
        })
        .collect();
    if counters.is_empty() {
        return Ok(None);
    }

    let stop = StopFlag::new();
    let counters = Rc::new(RefCell::new(counters));
    let check = {
        let (win, config, live) = (window.clone(), config.clone(), stop.token());
        move || {
            let (_, height) = dom::viewport(&win);
            for counter in counters.borrow_mut().iter_mut().filter(|c| !c.started) {
                if !in_view(counter.element.get_bounding_client_rect().top(), height, offset) {
                    continue;
                }
                counter.started = true;
                let element = counter.element.clone();
                let suffix = element.get_attribute(SUFFIX_ATTR);
                let mut tween = CounterTween::new(counter.target, config.duration_ms, config.frame_ms);
                let (live, frame_ms) = (live.clone(), config.frame_ms);
                spawn_local(async move {
                    while live.get() {
                        let Some(value) = tween.tick() else { break };
                        element.set_text_content(Some(&format_count(value, suffix.as_deref())));
                        TimeoutFuture::new(frame_ms).await;
                    }
                });
            }
        }
    };
    check();
    let scroll = EventListener::new(window, "scroll", move |_| check());

    Ok(Some(CountersHandle {
        _stop: stop,
        _scroll: scroll,
    }))
}

pub struct FaqHandle {
    _listeners: Vec<EventListener>,
}

pub fn start_faq(document: &Document, config: &FaqConfig) -> Result<Option<FaqHandle>, JsValue> {
    let items = dom::query_all(document, &format!(".{ITEM_CLASS}"))?;
    if items.is_empty() {
        return Ok(None);
    }
    let items = Rc::new(items);
    let state = Rc::new(RefCell::new(Accordion::new(items.len(), config.exclusive)));

    let mut listeners = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let Some(question) = item.query_selector(&format!(".{QUESTION_CLASS}"))? else {
            continue;
        };
        let (items, state) = (items.clone(), state.clone());
        listeners.push(EventListener::new(&question, "click", move |_| {
            let mut state = state.borrow_mut();
            for (item, open) in items.iter().zip(state.toggle(index)) {
                item.class_list().toggle_with_force(OPEN_CLASS, *open).ok();
            }
        }));
    }
    Ok(Some(FaqHandle {
        _listeners: listeners,
    }))
}

pub struct TypingHandle {
    _stop: StopFlag,
}

pub fn start_typing(document: &Document, config: &TypingConfig) -> Result<Option<TypingHandle>, JsValue> {
    let Some(element) = document.get_element_by_id(TYPING_ID) else {
        return Ok(None);
    };
    let texts = match element.get_attribute("data-texts") {
        Some(raw) => serde_json::from_str::<Vec<String>>(&raw).unwrap_or_else(|e| {
            log::warn!("bad data-texts on #{TYPING_ID}: {e}");
            config.texts.clone()
        }),
        None => config.texts.clone(),
    };
    let Some(mut writer) = Typewriter::new(&texts) else {
        return Ok(None);
    };

    let stop = StopFlag::new();
    let live = stop.token();
    spawn_local(async move {
        while live.get() {
            let frame = writer.next_frame();
            element.set_text_content(Some(&frame.text));
            TimeoutFuture::new(frame.delay_ms).await;
        }
    });
    Ok(Some(TypingHandle { _stop: stop }))
}
