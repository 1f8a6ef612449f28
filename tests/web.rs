#![cfg(target_arch = "wasm32")]

use greenguard_site::config::{FormConfig, MountConfig, NavConfig, RevealConfig, RevealMode};
use greenguard_site::nav::Layout;
use greenguard_site::wasm::{form, nav, render, reveal};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append<T: JsCast>(parent: &web_sys::Node, tag: &str) -> T {
    let el = document().create_element(tag).unwrap();
    parent.append_child(&el).unwrap();
    el.dyn_into::<T>().unwrap()
}

fn fire(target: &web_sys::EventTarget, kind: &str, bubbles: bool) {
    let init = EventInit::new();
    init.set_bubbles(bubbles);
    let event = Event::new_with_event_init_dict(kind, &init).unwrap();
    target.dispatch_event(&event).unwrap();
}

fn error_count(form: &HtmlFormElement) -> u32 {
    form.query_selector_all(".field-error").unwrap().length()
}

#[wasm_bindgen_test]
fn invalid_email_gets_one_inline_error_until_edited() {
    let body = document().body().unwrap();
    let form: HtmlFormElement = append(&body, "form");
    let input: HtmlInputElement = append(&form, "input");
    input.set_name("email");
    let _listeners = form::attach_validation(&form).unwrap();

    input.set_value("not-an-email");
    fire(&input, "blur", false);
    fire(&input, "blur", false);
    assert_eq!(error_count(&form), 1);
    let sibling = input.next_element_sibling().unwrap();
    assert!(sibling.class_list().contains("field-error"));

    input.set_value("not-an-email2");
    fire(&input, "input", true);
    assert_eq!(error_count(&form), 0);

    input.set_value("a@b.com");
    fire(&input, "blur", false);
    assert_eq!(error_count(&form), 0);

    form.remove();
}

#[wasm_bindgen_test]
fn form_without_endpoint_still_validates() {
    let window = web_sys::window().unwrap();
    let body = document().body().unwrap();
    let form: HtmlFormElement = append(&body, "form");
    form.set_id(form::FORM_ID);
    let input: HtmlInputElement = append(&form, "input");
    input.set_name("email");

    let handle = form::start(&window, &document(), &FormConfig::default())
        .unwrap()
        .unwrap();

    input.set_value("not-an-email");
    fire(&input, "blur", false);
    assert_eq!(error_count(&form), 1);

    drop(handle);
    form.remove();
}

#[wasm_bindgen_test]
fn above_the_fold_target_revealed_without_scrolling() {
    let window = web_sys::window().unwrap();
    let body = document().body().unwrap();
    let target: HtmlElement = append(&body, "div");
    target.set_class_name("animate-on-scroll");
    target.set_attribute("data-animation", "slideInLeft").unwrap();
    body.prepend_with_node_1(&target).unwrap();

    let config = RevealConfig {
        mode: RevealMode::Scroll,
        ..RevealConfig::default()
    };
    let handle = reveal::start(&window, &document(), &config).unwrap().unwrap();

    assert!(handle.is_revealed(0));
    assert!(target.class_list().contains("animated"));
    let animation = target.style().get_property_value("animation").unwrap();
    assert!(animation.contains("slideInLeft"));

    drop(handle);
    target.remove();
}

#[wasm_bindgen_test]
fn narrow_menu_toggles_and_closes_on_outside_click() {
    let window = web_sys::window().unwrap();
    let body = document().body().unwrap();
    let toggle: HtmlElement = append(&body, "button");
    toggle.set_id(nav::TOGGLE_ID);
    let menu: HtmlElement = append(&body, "nav");
    menu.set_id(nav::MENU_ID);
    let outside: HtmlElement = append(&body, "p");

    let config = NavConfig {
        breakpoint: f64::MAX,
        ..NavConfig::default()
    };
    let controller = nav::start(&window, &document(), &config).unwrap().unwrap();
    assert_eq!(controller.layout(), Layout::Narrow);
    assert_eq!(toggle.style().get_property_value("display").unwrap(), "flex");
    assert_eq!(menu.style().get_property_value("display").unwrap(), "none");

    toggle.click();
    assert!(controller.is_open());
    assert_eq!(menu.style().get_property_value("display").unwrap(), "flex");
    assert!(menu.class_list().contains("active"));

    outside.click();
    assert!(!controller.is_open());
    assert_eq!(menu.style().get_property_value("display").unwrap(), "none");

    drop(controller);
    for el in [toggle, menu, outside] {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn duplicate_links_mark_only_the_first_active() {
    let window = web_sys::window().unwrap();
    let body = document().body().unwrap();
    let section: HtmlElement = append(&body, "section");
    section.set_id("dup-section");
    section.style().set_property("height", "2000px").unwrap();
    body.prepend_with_node_1(&section).unwrap();
    let toggle: HtmlElement = append(&body, "button");
    toggle.set_id(nav::TOGGLE_ID);
    let menu: HtmlElement = append(&body, "nav");
    menu.set_id(nav::MENU_ID);
    for _ in 0..2 {
        let link: HtmlElement = append(&menu, "a");
        link.set_attribute("href", "#dup-section").unwrap();
    }

    let controller = nav::start(&window, &document(), &NavConfig::default())
        .unwrap()
        .unwrap();
    let active = menu.query_selector_all("a.active").unwrap();
    assert_eq!(active.length(), 1);
    assert!(menu.first_element_child().unwrap().class_list().contains("active"));

    drop(controller);
    for el in [section, toggle, menu] {
        el.remove();
    }
}

#[wasm_bindgen_test]
fn animator_owns_its_canvas() {
    let body = document().body().unwrap();
    let container: HtmlElement = append(&body, "section");
    container.style().set_property("width", "320px").unwrap();
    container.style().set_property("height", "200px").unwrap();

    let handle = render::start(&document(), container.clone(), &MountConfig::default(), 100.0).unwrap();
    assert_eq!(handle.canvas().width(), 320);
    assert_eq!(handle.canvas().height(), 200);
    assert_eq!(container.query_selector_all("canvas").unwrap().length(), 1);

    drop(handle);
    assert_eq!(container.query_selector_all("canvas").unwrap().length(), 0);
    container.remove();
}
