use crate::app::use_settings;
use crate::hooks::{accepted, use_label_input, use_mounted};
use suerte_core::geometry::{caption, segments};
use suerte_core::{Wheel, WheelSettings};
use suerte_shared::RevealPhase;
use yew::prelude::*;

/// The CSS transition runs exactly as long as the reveal timer.
fn wheel_style(rotation_deg: f64, settings: &WheelSettings) -> String {
    format!(
        "transform: rotate({rotation_deg}deg); transition: transform {}ms ease-out;",
        settings.spin().as_millis()
    )
}

#[function_component(WheelPanel)]
pub fn wheel_panel() -> Html {
    let settings = use_settings();
    let wheel = {
        let wheel = settings.wheel.clone();
        use_mounted(move || Wheel::new(wheel))
    };
    let view = wheel.view;

    let spin = {
        let mounted = wheel.mounted.clone();
        Callback::from(move |_| {
            if let Err(why) = mounted.borrow_mut().trigger() {
                log::debug!("spin ignored: {why}");
            }
        })
    };
    let input = {
        let mounted = wheel.mounted.clone();
        use_label_input(Callback::from(move |label: String| {
            accepted("option", mounted.borrow_mut().edit(|w| w.add(&label)))
        }))
    };

    let n = view.options.len();
    let wedges = segments(n).zip(view.options.iter()).map(|(seg, label)| {
        let (x, y) = seg.caption_pos();
        let mid = seg.mid_deg();
        html! {
            <g key={seg.index.to_string()}>
                <path d={seg.svg_path()} fill={seg.color} />
                <text x={x.to_string()} y={y.to_string()} fill="white" font-size="10"
                    text-anchor="middle" dominant-baseline="middle"
                    transform={format!("rotate({mid}, {x}, {y})")}>
                    { caption(label) }
                </text>
            </g>
        }
    });

    let options = view.options.iter().enumerate().map(|(index, label)| {
        let remove = {
            let mounted = wheel.mounted.clone();
            Callback::from(move |_| {
                if let Err(why) = mounted.borrow_mut().edit(|w| w.remove(index)) {
                    log::debug!("remove ignored: {why}");
                }
            })
        };
        html! {
            <div class="entry" key={index.to_string()}>
                <span>{label}</span>
                if view.can_remove {
                    <button class="remove" onclick={remove}>{"✕"}</button>
                }
            </div>
        }
    });

    let spinning = view.phase == RevealPhase::Animating;
    let style = wheel_style(view.rotation_deg, &settings.wheel);

    html! {
        <div class="panel wheel-panel">
            <h2>{"Roulette wheel"}</h2>
            <p class="hint">{"Spin the wheel and see which option comes up"}</p>
            <div class="wheel">
                <div class="pointer"></div>
                <svg viewBox="0 0 200 200" style={style}>{ for wedges }</svg>
            </div>
            if let Some(winner) = &view.winner {
                <div class="result"><p>{"Winner!"}</p><p>{winner}</p></div>
            }
            <button onclick={spin} disabled={!view.can_trigger}>
                { if spinning { "Spinning..." } else { "Spin" } }
            </button>
            <div class="editor">
                <h3>{"Wheel options"}</h3>
                <input type="text" placeholder="New option..."
                    maxlength={settings.wheel.max_label_chars.to_string()}
                    value={input.value.clone()} oninput={input.oninput} onkeypress={input.onkeypress} />
                <button onclick={input.onclick}
                    disabled={input.value.trim().is_empty() || !view.can_add}>{"+"}</button>
                <div class="entries">{ for options }</div>
            </div>
        </div>
    }
}
