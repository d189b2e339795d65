use crate::app::use_settings;
use crate::hooks::{accepted, use_label_input, use_mounted};
use suerte_core::Picker;
use suerte_shared::RevealPhase;
use yew::prelude::*;

#[function_component(PickerPanel)]
pub fn picker_panel() -> Html {
    let settings = use_settings();
    let picker = {
        let picker = settings.picker.clone();
        use_mounted(move || Picker::new(picker))
    };
    let view = picker.view;

    let draw = {
        let mounted = picker.mounted.clone();
        Callback::from(move |_| {
            if let Err(why) = mounted.borrow_mut().trigger() {
                log::debug!("draw ignored: {why}");
            }
        })
    };
    let input = {
        let mounted = picker.mounted.clone();
        use_label_input(Callback::from(move |label: String| {
            accepted("participant", mounted.borrow_mut().edit(|p| p.add(&label)))
        }))
    };

    let drawing = view.phase == RevealPhase::Animating;
    let entries = view.participants.iter().enumerate().map(|(index, name)| {
        let highlighted = view.highlight.as_deref() == Some(name.as_str());
        let won = !drawing && view.winner.as_deref() == Some(name.as_str());
        let class = classes!(
            "entry",
            highlighted.then_some("highlight"),
            won.then_some("winner")
        );
        let remove = {
            let mounted = picker.mounted.clone();
            Callback::from(move |_| {
                if let Err(why) = mounted.borrow_mut().edit(|p| p.remove(index)) {
                    log::debug!("remove ignored: {why}");
                }
            })
        };
        html! {
            <div class={class} key={index.to_string()}>
                <span>{name}</span>
                if won {
                    <span class="badge">{"🍀"}</span>
                } else if !drawing {
                    <button class="remove" onclick={remove}>{"✕"}</button>
                }
            </div>
        }
    });

    html! {
        <div class="panel picker-panel">
            <h2>{"Lucky draw"}</h2>
            <p class="hint">{"Add participants and find out who gets lucky"}</p>
            <div class="editor">
                <input type="text" placeholder="Participant name..."
                    value={input.value.clone()} oninput={input.oninput} onkeypress={input.onkeypress} />
                <button onclick={input.onclick}
                    disabled={input.value.trim().is_empty() || drawing}>{"+"}</button>
            </div>
            if view.participants.is_empty() {
                <div class="empty">{"🍀"}<p>{"Add participants to start"}</p></div>
            } else {
                <div class="entries">{ for entries }</div>
            }
            if let Some(winner) = &view.winner {
                <div class="result"><p>{"The lucky one is"}</p><p>{winner}</p></div>
            }
            <button onclick={draw} disabled={!view.can_trigger}>
                { if drawing { "Drawing..." } else { "Draw" } }
            </button>
        </div>
    }
}
