use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::config::{Glyph, MountConfig};
use crate::particles::ParticleField;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Keeps a particle canvas running. Dropping it cancels the pending frame,
/// detaches the resize listener and removes the canvas.
pub struct AnimatorHandle {
    canvas: HtmlCanvasElement,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    frame: FrameSlot,
    _resize: EventListener,
}

impl AnimatorHandle {
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Drop for AnimatorHandle {
    fn drop(&mut self) {
        self.running.set(false);
        if let (Some(id), Some(win)) = (self.frame_id.take(), window()) {
            win.cancel_animation_frame(id).ok();
        }
        // breaks the closure's reference cycle with itself
        self.frame.borrow_mut().take();
        self.canvas.remove();
    }
}

/// Starts the effect on the first element matching `mount.selector`, if any.
pub fn mount(
    document: &Document,
    mount: &MountConfig,
    link_distance: f64,
) -> Result<Option<AnimatorHandle>, JsValue> {
    let Some(container) = document.query_selector(&mount.selector)? else {
        return Ok(None);
    };
    let container: HtmlElement = container.dyn_into()?;
    start(document, container, mount, link_distance).map(Some)
}

/// Appends a canvas to `container` and starts the frame loop.
pub fn start(
    document: &Document,
    container: HtmlElement,
    mount: &MountConfig,
    link_distance: f64,
) -> Result<AnimatorHandle, JsValue> {
    let win = window().ok_or("no window")?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let style = canvas.style();
    style.set_property("position", "absolute")?;
    style.set_property("inset", "0")?;
    style.set_property("pointer-events", "none")?;
    container.append_child(&canvas)?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2d canvas not supported")?
        .dyn_into()?;

    let (w, h) = fit(&canvas, &container);
    let field = Rc::new(RefCell::new(
        ParticleField::seed(mount.count, w, h, js_sys::Math::random).with_link_distance(link_distance),
    ));

    // Resize canvas to the container; particles keep their positions
    let resize = {
        let canvas = canvas.clone();
        let field = field.clone();
        EventListener::new(&win, "resize", move |_| {
            let (w, h) = fit(&canvas, &container);
            field.borrow_mut().resize(w, h);
        })
    };

    // Animation loop
    // `frame` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let frame: FrameSlot = Rc::new(RefCell::new(None));
    let running = Rc::new(Cell::new(true));
    let frame_id = Rc::new(Cell::new(None));
    {
        let next = frame.clone();
        let running = running.clone();
        let frame_id = frame_id.clone();
        let win = win.clone();
        let glyph = mount.glyph;
        let color = mount.color.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running.get() {
                return;
            }
            {
                let mut field = field.borrow_mut();
                field.step();
                if let Err(e) = draw(&ctx, &field, glyph, &color) {
                    log::warn!("particle frame failed: {e:?}");
                }
            }

            // schedule next
            let scheduled = match next.borrow().as_ref() {
                Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref()),
                None => return,
            };
            match scheduled {
                Ok(id) => frame_id.set(Some(id)),
                Err(e) => log::warn!("request_animation_frame failed: {e:?}"),
            }
        }) as Box<dyn FnMut()>));
    }

    let first = match frame.borrow().as_ref() {
        Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref())?,
        None => return Err("animation frame closure missing".into()),
    };
    frame_id.set(Some(first));

    Ok(AnimatorHandle {
        canvas,
        running,
        frame_id,
        frame,
        _resize: resize,
    })
}

fn fit(canvas: &HtmlCanvasElement, container: &HtmlElement) -> (f64, f64) {
    let w = container.client_width().max(0) as u32;
    let h = container.client_height().max(0) as u32;
    canvas.set_width(w);
    canvas.set_height(h);
    (w as f64, h as f64)
}

fn draw(
    ctx: &CanvasRenderingContext2d,
    field: &ParticleField,
    glyph: Glyph,
    color: &str,
) -> Result<(), JsValue> {
    let (w, h) = field.size();
    ctx.clear_rect(0.0, 0.0, w, h);

    let particles = field.particles();
    for p in particles {
        ctx.begin_path();
        match glyph {
            Glyph::Dot => ctx.arc(p.x, p.y, p.radius, 0.0, TAU)?,
            Glyph::Leaf => ctx.ellipse(p.x, p.y, p.radius * 2.0, p.radius, p.heading(), 0.0, TAU)?,
        }
        ctx.set_fill_style_str(&format!("rgba({color}, {})", p.opacity));
        ctx.fill();
    }

    ctx.set_line_width(0.5);
    for link in field.links() {
        let (a, b) = (&particles[link.a], &particles[link.b]);
        ctx.begin_path();
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.set_stroke_style_str(&format!("rgba({color}, {})", link.opacity));
        ctx.stroke();
    }
    Ok(())
}
