use crate::scheduler::{browser_source, BrowserScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use suerte_core::{Guarded, Mounted, Widget};
use yew::prelude::*;

pub type MountedRef<W> = Rc<RefCell<Mounted<W, BrowserScheduler>>>;

pub struct UseMounted<W: Widget + 'static> {
    pub mounted: MountedRef<W>,
    pub view: W::View,
}

/// Mounts a widget for the lifetime of the calling component. The latest view
/// is kept in component state so rendering never borrows the widget; the
/// widget (and its pending timer) is dropped when the component unmounts.
#[hook]
pub fn use_mounted<W, F>(init: F) -> UseMounted<W>
where
    W: Widget + 'static,
    W::View: Clone + 'static,
    F: FnOnce() -> W + 'static,
{
    let mounted = use_mut_ref(move || Mounted::new(init(), browser_source(), BrowserScheduler));
    let view = {
        let mounted = mounted.clone();
        use_state(move || mounted.borrow().view())
    };
    {
        let mounted = mounted.clone();
        let setter = view.setter();
        use_effect_with((), move |_| {
            mounted
                .borrow()
                .subscribe(move |w: &W| setter.set(w.view()));
            || ()
        });
    }
    UseMounted {
        mounted,
        view: (*view).clone(),
    }
}

/// True when an edit went through; a rejection is logged and the caller keeps
/// the typed text.
pub fn accepted<T>(what: &str, result: Guarded<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(why) => {
            log::debug!("{what} ignored: {why}");
            false
        }
    }
}

pub struct LabelInput {
    pub value: String,
    pub oninput: Callback<InputEvent>,
    pub onkeypress: Callback<KeyboardEvent>,
    pub onclick: Callback<MouseEvent>,
}

/// Text input state plus handlers. `submit` receives the raw text on Enter or
/// click and returns whether it was accepted; rejected text stays in the box.
#[hook]
pub fn use_label_input(submit: Callback<String, bool>) -> LabelInput {
    let value = use_state(String::new);
    let oninput = {
        let value = value.clone();
        Callback::from(move |e: InputEvent| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            value.set(input.value());
        })
    };
    let commit = {
        let value = value.clone();
        move || {
            if submit.emit((*value).clone()) {
                value.set(String::new());
            }
        }
    };
    let onkeypress = {
        let commit = commit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                commit();
            }
        })
    };
    let onclick = Callback::from(move |_| commit());
    LabelInput {
        value: (*value).clone(),
        oninput,
        onkeypress,
        onclick,
    }
}
