use crate::app::use_settings;
use crate::hooks::use_mounted;
use suerte_core::CoinFlip;
use suerte_shared::{CoinFace, RevealPhase};
use yew::prelude::*;

#[function_component(CoinPanel)]
pub fn coin_panel() -> Html {
    let settings = use_settings();
    let coin = {
        let coin = settings.coin.clone();
        use_mounted(move || CoinFlip::new(coin))
    };
    let view = coin.view;

    let onclick = {
        let mounted = coin.mounted.clone();
        Callback::from(move |_| {
            if let Err(why) = mounted.borrow_mut().trigger() {
                log::debug!("flip ignored: {why}");
            }
        })
    };

    let flipping = view.phase == RevealPhase::Animating;
    let spin = format!("animation-duration: {}ms;", settings.coin.flip().as_millis());
    let (coin_class, caption) = match (view.phase, view.face) {
        (RevealPhase::Animating, _) => ("coin flipping", String::new()),
        (_, Some(face)) => (
            match face {
                CoinFace::Heads => "coin heads",
                CoinFace::Tails => "coin tails",
            },
            face.to_string(),
        ),
        _ => ("coin idle", String::new()),
    };

    html! {
        <div class="panel coin-panel">
            <h2>{"Flip a coin"}</h2>
            <p class="hint">{"Heads or tails: flip the coin and let fate decide"}</p>
            <div class={coin_class} style={spin}></div>
            if !caption.is_empty() {
                <div class="result">{caption}</div>
            }
            <button onclick={onclick} disabled={!view.can_trigger}>
                { if flipping { "Flipping..." } else { "Flip coin" } }
            </button>
        </div>
    }
}
