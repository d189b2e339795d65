use crate::coin::CoinPanel;
use crate::picker::PickerPanel;
use crate::starfield::StarryBackground;
use crate::wheel::WheelPanel;
use std::rc::Rc;
use suerte_core::Settings;
use suerte_shared::Tab;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub settings: Rc<Settings>,
}

/// Reads the settings every panel was mounted with.
#[hook]
pub fn use_settings() -> Rc<Settings> {
    use_context::<Rc<Settings>>().unwrap_or_default()
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let active = use_state(Tab::default);

    let tabs = Tab::ALL.iter().map(|&tab| {
        let onclick = {
            let active = active.clone();
            Callback::from(move |_| active.set(tab))
        };
        let class = classes!("tab", (*active == tab).then_some("active"));
        html! { <button class={class} onclick={onclick}>{tab.title()}</button> }
    });

    // only the active panel is mounted; switching unmounts the others
    let panel = match *active {
        Tab::Coin => html! { <CoinPanel /> },
        Tab::Wheel => html! { <WheelPanel /> },
        Tab::Picker => html! { <PickerPanel /> },
    };

    html! {
        <ContextProvider<Rc<Settings>> context={props.settings.clone()}>
        <div class="app">
            <StarryBackground />
            <main>
                <header>
                    <h1>{"Random Choices"}</h1>
                    <p>{"Let chance decide for you"}</p>
                </header>
                <nav class="tabs">{ for tabs }</nav>
                <section class="content">{panel}</section>
            </main>
        </div>
        </ContextProvider<Rc<Settings>>>
    }
}
