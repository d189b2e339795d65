use crate::app::use_settings;
use crate::scheduler::{browser_source, BrowserScheduler};
use gloo::events::EventListener;
use std::f64::consts::TAU;
use std::rc::Rc;
use suerte_core::{Backdrop, Starfield};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

fn viewport() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (size(window.inner_width()), size(window.inner_height()))
}

fn context(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn paint(ctx: &CanvasRenderingContext2d, field: &Starfield) {
    let (w, h) = field.size();
    ctx.set_fill_style(&JsValue::from_str(field.background()));
    ctx.fill_rect(0.0, 0.0, w, h);
    for star in field.stars() {
        ctx.begin_path();
        if ctx.arc(star.x, star.y, star.radius, 0.0, TAU).is_err() {
            continue;
        }
        let fill = format!("rgba(255, 255, 255, {})", star.opacity);
        ctx.set_fill_style(&JsValue::from_str(&fill));
        ctx.fill();
    }
}

/// Full-window twinkling canvas behind the panels.
#[function_component(StarryBackground)]
pub fn starry_background() -> Html {
    let node_ref = use_node_ref();
    let settings = use_settings();
    {
        let node_ref = node_ref.clone();
        let stars = settings.starfield.clone();
        use_effect_with((), move |_| {
            let mut teardown: Option<(Rc<Backdrop<BrowserScheduler>>, EventListener)> = None;
            if let Some(canvas) = node_ref.cast::<HtmlCanvasElement>() {
                if let (Some(ctx), Some(window)) = (context(&canvas), web_sys::window()) {
                    let (w, h) = viewport();
                    canvas.set_width(w as u32);
                    canvas.set_height(h as u32);
                    let mut rng = browser_source();
                    let field = Starfield::new(stars, w, h, &mut *rng);
                    let backdrop = Rc::new(Backdrop::start(field, &BrowserScheduler, move |f| {
                        paint(&ctx, f)
                    }));
                    let resize = {
                        let backdrop = backdrop.clone();
                        EventListener::new(&window, "resize", move |_| {
                            let (w, h) = viewport();
                            canvas.set_width(w as u32);
                            canvas.set_height(h as u32);
                            backdrop.resize(w, h);
                        })
                    };
                    teardown = Some((backdrop, resize));
                } else {
                    log::warn!("no 2d canvas context; starfield disabled");
                }
            }
            // listener first: it holds the other reference to the backdrop
            move || {
                if let Some((backdrop, resize)) = teardown {
                    drop(resize);
                    drop(backdrop);
                }
            }
        });
    }

    html! { <canvas ref={node_ref} class="starfield"></canvas> }
}
