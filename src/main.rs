#![allow(non_snake_case)]

use dioxus::prelude::*;
use emojipicker::{EmojiPicker, PickerOptions};

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting emoji picker demo");

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let picks = use_signal(Vec::<String>::new);

    // Fields are in the DOM once the first render is committed
    use_effect(move || {
        let options = PickerOptions::default()
            .trigger_position([("top", "6px"), ("right", "6px")])
            .on_select(move |emoji, field| {
                let mut picks = picks;
                picks.write().push(format!("{} {} -> {:?}", emoji.glyph, emoji.code, field.value()));
            });

        for selector in ["#demo-title", ".demo-body"] {
            if let Err(e) = EmojiPicker::attach(selector, options.clone()) {
                log::error!("Failed to attach emoji picker to {}: {}", selector, e);
            }
        }
    });

    rsx! {
        main { class: "demo",
            h1 { "Emoji picker" }
            form {
                onsubmit: move |evt| evt.prevent_default(),
                label { "Title" }
                input { id: "demo-title", r#type: "text", placeholder: "Say hi" }
                label { "Message" }
                textarea { class: "demo-body", rows: "5" }
                label { "Email (no picker)" }
                input { class: "demo-body", r#type: "email" }
            }
            h2 { "Picked" }
            if picks.read().is_empty() {
                p { "Nothing yet" }
            } else {
                ul {
                    for (i, pick) in picks.read().iter().enumerate() {
                        li { key: "{i}", "{pick}" }
                    }
                }
            }
        }
    }
}
