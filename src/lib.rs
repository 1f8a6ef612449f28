#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Client-side behavior for the GreenXguard marketing site.
//!
//! The state machines below compile on every target and are tested on the
//! host. The `wasm` module binds them to the page.

pub mod accordion;
pub mod config;
pub mod counter;
pub mod form;
pub mod nav;
pub mod particles;
pub mod reveal;
pub mod typing;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;

    use log::Level;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    use crate::config::SiteConfig;

    pub mod dom;
    pub mod form;
    pub mod nav;
    pub mod render;
    pub mod reveal;
    pub mod widgets;

    #[cfg(debug_assertions)]
    const LOG_LEVEL: Level = Level::Debug;
    #[cfg(not(debug_assertions))]
    const LOG_LEVEL: Level = Level::Info;

    thread_local! {
        static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    }

    /// Everything started for the current page. Dropping it stops every
    /// loop, timer and listener.
    struct Page {
        animators: Vec<render::AnimatorHandle>,
        reveal: Option<reveal::RevealHandle>,
        nav: Option<nav::NavController>,
        form: Option<form::FormHandle>,
        counters: Option<widgets::CountersHandle>,
        faq: Option<widgets::FaqHandle>,
        typing: Option<widgets::TypingHandle>,
    }

    /// Logs the outcome of one feature so a failure never reaches the others.
    fn isolate<T>(feature: &str, started: Result<Option<T>, JsValue>) -> Option<T> {
        match started {
            Ok(Some(handle)) => {
                log::debug!("{feature} started");
                Some(handle)
            }
            Ok(None) => {
                log::debug!("{feature} skipped, elements not on this page");
                None
            }
            Err(e) => {
                log::warn!("{feature} failed to start: {e:?}");
                None
            }
        }
    }

    impl Page {
        fn start(window: &Window, document: &Document, config: &SiteConfig) -> Self {
            let animators = config
                .animator
                .mounts
                .iter()
                .filter_map(|mount| {
                    isolate(
                        &format!("animator {}", mount.selector),
                        render::mount(document, mount, config.animator.link_distance),
                    )
                })
                .collect();

            Page {
                animators,
                reveal: isolate("scroll reveal", reveal::start(window, document, &config.reveal)),
                nav: isolate("navigation", nav::start(window, document, &config.nav)),
                form: isolate("assessment form", form::start(window, document, &config.form)),
                counters: isolate(
                    "counters",
                    widgets::start_counters(window, document, &config.counter, config.reveal.offset),
                ),
                faq: isolate("faq", widgets::start_faq(document, &config.faq)),
                typing: isolate("typing headline", widgets::start_typing(document, &config.typing)),
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(LOG_LEVEL).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let config = dom::load_config(&document);

        let page = Page::start(&window, &document, &config);
        log::info!(
            "page ready: {} animator(s), nav {}, form {}",
            page.animators.len(),
            page.nav.is_some(),
            page.form.is_some()
        );
        PAGE.with(|slot| *slot.borrow_mut() = Some(page));
        Ok(())
    }

    /// Stops all animation loops, timers and listeners started by [`main`].
    #[wasm_bindgen]
    pub fn teardown() {
        if PAGE.with(|slot| slot.borrow_mut().take()).is_some() {
            log::info!("page torn down");
        }
    }
}
