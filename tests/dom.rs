#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use emojipicker::stores::picker_registry;
use emojipicker::{
    dataset_status, is_open, provide_dataset, teardown, EmojiDataset, EmojiPicker, PickerOptions,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

wasm_bindgen_test_configure!(run_in_browser);

const DATASET: &str = r#"{
    "Smileys & People": [
        {"emoji": "😉", "description": "Winking Face", "code": "U+1F609"},
        {"emoji": "😀", "description": "Grinning Face", "code": "U+1F600"}
    ],
    "Animals & Nature": [
        {"emoji": "🐶", "description": "Dog Face", "code": "U+1F436"}
    ]
}"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Fresh page state with `html` mounted and the dataset already available
fn mount(html: &str) -> HtmlElement {
    mount_with(html, EmojiDataset::from_json(DATASET).unwrap())
}

fn mount_with(html: &str, dataset: EmojiDataset) -> HtmlElement {
    let host = mount_without_dataset(html);
    assert!(provide_dataset(dataset));
    host
}

/// Fresh page state with `html` mounted and no dataset yet
fn mount_without_dataset(html: &str) -> HtmlElement {
    teardown();
    let host: HtmlElement = document().create_element("div").unwrap().unchecked_into();
    host.set_inner_html(html);
    document().body().unwrap().append_child(&host).unwrap();
    host
}

/// Three categories of 60 emojis each, tall enough to scroll
fn large_dataset() -> EmojiDataset {
    let mut body = serde_json::Map::new();
    for (label, base) in [
        ("Smileys & People", 0x1F600u32),
        ("Animals & Nature", 0x1F400),
        ("Travel & Places", 0x1F680),
    ] {
        let entries = (0..60)
            .map(|i| {
                serde_json::json!({
                    "emoji": char::from_u32(base + i).unwrap().to_string(),
                    "description": format!("{} {}", label, i),
                    "code": format!("U+{:X}", base + i),
                })
            })
            .collect();
        body.insert(label.to_string(), serde_json::Value::Array(entries));
    }
    EmojiDataset::from_json(&serde_json::Value::Object(body).to_string()).unwrap()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

/// Poll until the dataset reaches `status`, for at most ~5s
async fn wait_for_dataset(status: &str) {
    for _ in 0..100 {
        if dataset_status() == status {
            return;
        }
        sleep(50).await;
    }
    panic!("dataset stuck in {}, expected {}", dataset_status(), status);
}

fn unmount(host: HtmlElement) {
    teardown();
    host.remove();
}

fn by_id<T: JsCast>(id: &str) -> T {
    document().get_element_by_id(id).unwrap().unchecked_into()
}

fn query<T: JsCast>(selector: &str) -> T {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("nothing matches {}", selector))
        .unchecked_into()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

/// Trigger injected next to the field with `field_id`
fn trigger_of(field_id: &str) -> HtmlElement {
    let field: HtmlElement = by_id(field_id);
    field
        .parent_element()
        .unwrap()
        .query_selector(".lcep-trigger")
        .unwrap()
        .unwrap()
        .unchecked_into()
}

fn popup() -> HtmlElement {
    by_id("lc-emoji-picker")
}

fn popup_shown() -> bool {
    popup().class_list().contains("lcep-shown")
}

fn search(query_text: &str) {
    let input: HtmlInputElement = query("#lc-emoji-picker .lcep-search input");
    input.set_value(query_text);
    input.dispatch_event(&Event::new("keyup").unwrap()).unwrap();
}

fn tab(id: &str) -> HtmlElement {
    query(&format!(".lcep-categories li[data-index=\"{}\"]", id))
}

fn tab_active(id: &str) -> bool {
    tab(id).class_list().contains("lcep-active")
}

fn scroller() -> HtmlElement {
    query("#lc-emoji-picker .lcep-all-categories")
}

fn max_scroll() -> i32 {
    let scroller = scroller();
    (scroller.scroll_height() - scroller.client_height()).max(0)
}

fn item_hidden(name: &str) -> bool {
    let li: HtmlElement = query(&format!("#lc-emoji-picker li[data-name=\"{}\"]", name));
    li.style().get_property_value("display").unwrap() == "none"
}

#[wasm_bindgen_test]
fn test_attaches_to_text_fields_only() {
    let host = mount(
        r#"<input id="title" class="f" type="text">
           <textarea id="body" class="f"></textarea>
           <input id="mail" class="f" type="email">"#,
    );

    EmojiPicker::attach(".f", PickerOptions::default()).unwrap();

    assert_eq!(count(".lcep-trigger"), 2);
    assert_eq!(count(".lcep-el-wrap"), 2);
    let mail: HtmlElement = by_id("mail");
    assert!(mail.parent_element().unwrap().is_same_node(Some(host.as_ref())));
    assert_eq!(count("#lc-emoji-picker"), 1);
    assert!(!popup_shown());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_wrapping_keeps_value_and_sets_padding() {
    let host = mount(r#"<input id="title" type="text">"#);
    let input: HtmlInputElement = by_id("title");
    input.set_value("typed before init");

    EmojiPicker::attach("#title", PickerOptions::default().target_right_padding(40)).unwrap();

    assert_eq!(input.value(), "typed before init");
    assert_eq!(input.style().get_property_value("padding-right").unwrap(), "40px");
    assert!(input.parent_element().unwrap().class_list().contains("lcep-el-wrap"));

    unmount(host);
}

#[wasm_bindgen_test]
fn test_attaching_twice_does_not_double_wrap() {
    let host = mount(r#"<textarea id="body"></textarea>"#);

    EmojiPicker::attach("#body", PickerOptions::default()).unwrap();
    EmojiPicker::attach("textarea", PickerOptions::default()).unwrap();

    assert_eq!(count(".lcep-trigger"), 1);
    assert_eq!(count("#lc-emoji-picker"), 1);

    unmount(host);
}

#[wasm_bindgen_test]
fn test_trigger_toggles_popup() {
    let host = mount(r#"<input id="title" type="text">"#);
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();

    trigger_of("title").click();
    assert!(popup_shown());
    assert!(is_open());
    assert!(popup().get_attribute("style").unwrap().contains("top:"));

    trigger_of("title").click();
    assert!(!popup_shown());
    assert!(!is_open());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_other_trigger_moves_popup_without_closing() {
    let host = mount(
        r#"<input id="a" class="f" type="text">
           <textarea id="b" class="f"></textarea>"#,
    );
    EmojiPicker::attach(".f", PickerOptions::default()).unwrap();

    let a = trigger_of("a");
    let b = trigger_of("b");
    a.click();
    assert_eq!(picker_registry::active_trigger().unwrap().0, a.id());

    b.click();
    assert!(popup_shown());
    assert_eq!(picker_registry::active_trigger().unwrap().0, b.id());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_emoji_goes_to_field_of_active_trigger() {
    let host = mount(
        r#"<input id="a" class="f" type="text" value="left">
           <textarea id="b" class="f">hi</textarea>"#,
    );
    let picked = Rc::new(RefCell::new(Vec::new()));
    let log = picked.clone();
    EmojiPicker::attach(
        ".f",
        PickerOptions::default().on_select(move |emoji, field| {
            log.borrow_mut().push((emoji.glyph.clone(), field.value()));
        }),
    )
    .unwrap();

    trigger_of("b").click();
    let wink: HtmlElement = query("#lc-emoji-picker li[data-name=\"winking face\"]");
    wink.click();

    let a: HtmlInputElement = by_id("a");
    let b: HtmlTextAreaElement = by_id("b");
    assert_eq!(b.value(), "hi😉");
    assert_eq!(a.value(), "left");
    assert_eq!(*picked.borrow(), vec![("😉".to_string(), "hi😉".to_string())]);
    // selecting keeps the popup open
    assert!(popup_shown());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_outside_click_and_resize_close() {
    let host = mount(r#"<input id="title" type="text">"#);
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();

    trigger_of("title").click();
    query::<HtmlElement>("#lc-emoji-picker .lcep-categories").click();
    assert!(popup_shown());

    document().body().unwrap().click();
    assert!(!popup_shown());

    trigger_of("title").click();
    assert!(popup_shown());
    web_sys::window()
        .unwrap()
        .dispatch_event(&Event::new("resize").unwrap())
        .unwrap();
    assert!(!popup_shown());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_search_filters_and_clears() {
    let host = mount(r#"<input id="title" type="text">"#);
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();
    trigger_of("title").click();

    search("face");
    assert!(!item_hidden("winking face"));
    assert!(!item_hidden("dog face"));

    search("dog");
    assert!(item_hidden("winking face"));
    assert!(item_hidden("grinning face"));
    assert!(!item_hidden("dog face"));
    assert!(query::<HtmlElement>(".lcep-search").class_list().contains("lcep-searching"));

    // a single character shows everything
    search("w");
    assert!(!item_hidden("dog face"));
    assert!(!item_hidden("grinning face"));

    search("dog");
    query::<HtmlElement>(".lcep-search i").click();
    assert!(!item_hidden("winking face"));
    assert!(!query::<HtmlElement>(".lcep-search").class_list().contains("lcep-searching"));

    unmount(host);
}

#[wasm_bindgen_test]
fn test_reopening_resets_search() {
    let host = mount(r#"<input id="title" type="text">"#);
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();

    trigger_of("title").click();
    search("dog");
    trigger_of("title").click();
    trigger_of("title").click();

    let input: HtmlInputElement = query("#lc-emoji-picker .lcep-search input");
    assert_eq!(input.value(), "");
    assert!(!item_hidden("winking face"));
    let first_tab: HtmlElement = query(".lcep-categories li[data-index=\"smileys--people\"]");
    assert!(first_tab.class_list().contains("lcep-active"));

    unmount(host);
}

#[wasm_bindgen_test]
fn test_teardown_restores_fields() {
    let host = mount(r#"<textarea id="body">kept</textarea>"#);
    EmojiPicker::attach("#body", PickerOptions::default()).unwrap();
    assert_eq!(count(".lcep-trigger"), 1);

    teardown();

    assert_eq!(count(".lcep-trigger"), 0);
    assert_eq!(count("#lc-emoji-picker"), 0);
    assert_eq!(count("#lcep-style"), 0);
    let body: HtmlTextAreaElement = by_id("body");
    assert_eq!(body.value(), "kept");
    assert!(body.parent_element().unwrap().is_same_node(Some(host.as_ref())));

    host.remove();
}

#[wasm_bindgen_test]
fn test_js_constructor_never_throws() {
    let host = mount(r#"<input id="title" type="text">"#);

    assert!(!EmojiPicker::new(JsValue::UNDEFINED, JsValue::UNDEFINED).active());
    assert!(!EmojiPicker::new(JsValue::from_str("#title"), JsValue::from_f64(3.0)).active());
    assert_eq!(count(".lcep-trigger"), 0);

    let options = js_sys::JSON::parse(r#"{"target_r_padding": 12}"#).unwrap();
    let picker = EmojiPicker::new(JsValue::from_str("#title"), options);
    assert!(picker.active());
    let input: HtmlInputElement = by_id("title");
    assert_eq!(input.style().get_property_value("padding-right").unwrap(), "12px");

    unmount(host);
}

#[wasm_bindgen_test]
fn test_tab_click_scrolls_and_highlights() {
    let host = mount_with(r#"<input id="title" type="text">"#, large_dataset());
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();
    trigger_of("title").click();
    assert!(tab_active("smileys--people"));
    assert!(max_scroll() > 0);

    let link: HtmlElement = query(".lcep-categories li[data-index=\"animals--nature\"] a");
    link.click();

    let section: HtmlElement = query("ul.lcep-category[category-name=\"animals--nature\"]");
    let expected = (section.offset_top() - 90).clamp(0, max_scroll());
    assert!((scroller().scroll_top() - expected).abs() <= 1);
    assert!(tab_active("animals--nature"));
    assert!(!tab_active("smileys--people"));
    assert!(popup_shown());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_scrolling_moves_highlight() {
    let host = mount_with(r#"<input id="title" type="text">"#, large_dataset());
    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();
    trigger_of("title").click();

    // just past the point where the animals title reaches the header
    let title: HtmlElement =
        query("ul.lcep-category[category-name=\"animals--nature\"] .lcep-container-title");
    let target = title.offset_top() - 101 + 5;
    assert!(target > 0 && target < max_scroll());
    let scroller = scroller();
    scroller.set_scroll_top(target);
    scroller.dispatch_event(&Event::new("scroll").unwrap()).unwrap();

    assert!(tab_active("animals--nature"));
    assert!(!tab_active("smileys--people"));

    scroller.set_scroll_top(0);
    scroller.dispatch_event(&Event::new("scroll").unwrap()).unwrap();
    assert!(tab_active("smileys--people"));

    unmount(host);
}

#[wasm_bindgen_test]
async fn test_failed_dataset_leaves_page_untouched() {
    let host = mount_without_dataset(r#"<input id="title" type="text" value="as typed">"#);
    let options = PickerOptions::default().dataset_url("/no-such-emoji-dataset.json");

    EmojiPicker::attach("#title", options.clone()).unwrap();
    assert_eq!(dataset_status(), "loading");
    wait_for_dataset("failed").await;

    assert_eq!(count(".lcep-trigger"), 0);
    assert_eq!(count("#lc-emoji-picker"), 0);
    let input: HtmlInputElement = by_id("title");
    assert_eq!(input.value(), "as typed");
    assert!(input.parent_element().unwrap().is_same_node(Some(host.as_ref())));

    // later pickers stay inert without retrying
    EmojiPicker::attach("#title", options).unwrap();
    assert_eq!(dataset_status(), "failed");
    assert_eq!(count(".lcep-trigger"), 0);

    unmount(host);
}

#[wasm_bindgen_test]
async fn test_queued_pickers_attach_once_dataset_arrives() {
    let host = mount_without_dataset(
        r#"<input id="a" type="text">
           <textarea id="b"></textarea>"#,
    );
    let options = PickerOptions::default().dataset_url("/no-such-emoji-dataset.json");

    EmojiPicker::attach("#a", options.clone()).unwrap();
    EmojiPicker::attach("#b", options).unwrap();
    assert_eq!(dataset_status(), "loading");
    assert_eq!(count(".lcep-trigger"), 0);

    assert!(provide_dataset(EmojiDataset::from_json(DATASET).unwrap()));
    assert_eq!(dataset_status(), "loaded");
    assert_eq!(count(".lcep-trigger"), 2);
    assert_eq!(count("#lc-emoji-picker"), 1);

    // the failing request finishing later changes nothing
    sleep(500).await;
    assert_eq!(dataset_status(), "loaded");
    assert_eq!(count(".lcep-trigger"), 2);
    assert!(!provide_dataset(EmojiDataset::from_json(DATASET).unwrap()));

    unmount(host);
}

#[wasm_bindgen_test]
fn test_selection_into_removed_field_closes_popup() {
    let host = mount(
        r#"<input id="a" class="f" type="text" value="left">
           <textarea id="b" class="f"></textarea>"#,
    );
    let calls = Rc::new(RefCell::new(0));
    let counter = calls.clone();
    EmojiPicker::attach(
        ".f",
        PickerOptions::default().on_select(move |_, _| *counter.borrow_mut() += 1),
    )
    .unwrap();

    trigger_of("b").click();
    assert!(popup_shown());
    let b: HtmlTextAreaElement = by_id("b");
    b.parent_element().unwrap().remove();

    query::<HtmlElement>("#lc-emoji-picker li[data-name=\"winking face\"]").click();

    assert!(!popup_shown());
    assert!(!is_open());
    assert_eq!(b.value(), "");
    assert_eq!(by_id::<HtmlInputElement>("a").value(), "left");
    assert_eq!(*calls.borrow(), 0);
    assert_eq!(picker_registry::field_count(), 1);

    unmount(host);
}

#[wasm_bindgen_test]
fn test_removed_fields_are_released() {
    let host = mount(
        r#"<input id="a" class="f" type="text">
           <textarea id="b" class="f"></textarea>"#,
    );
    EmojiPicker::attach(".f", PickerOptions::default()).unwrap();
    assert_eq!(picker_registry::field_count(), 2);

    by_id::<HtmlElement>("a").parent_element().unwrap().remove();
    host.insert_adjacent_html("beforeend", r#"<input id="c" type="text">"#)
        .unwrap();
    EmojiPicker::attach("#c", PickerOptions::default()).unwrap();

    assert_eq!(picker_registry::field_count(), 2);
    assert_eq!(count(".lcep-trigger"), 2);

    trigger_of("c").click();
    assert!(popup_shown());

    unmount(host);
}

#[wasm_bindgen_test]
fn test_attach_keeps_host_logger_level() {
    let host = mount(r#"<input id="title" type="text">"#);
    log::set_max_level(log::LevelFilter::Trace);

    EmojiPicker::attach("#title", PickerOptions::default()).unwrap();

    assert_eq!(log::max_level(), log::LevelFilter::Trace);
    log::set_max_level(log::LevelFilter::Info);
    unmount(host);
}

#[wasm_bindgen_test]
fn test_js_options_with_numbers_attach() {
    let host = mount(r#"<input id="title" type="text">"#);

    let options =
        js_sys::JSON::parse(r#"{"triggerPosition": {"top": 0, "right": "3px"}, "targetRightPadding": "30"}"#)
            .unwrap();
    assert!(EmojiPicker::new(JsValue::from_str("#title"), options).active());

    let trigger = trigger_of("title");
    assert_eq!(trigger.style().get_property_value("top").unwrap(), "0px");
    assert_eq!(trigger.style().get_property_value("right").unwrap(), "3px");
    let input: HtmlInputElement = by_id("title");
    assert_eq!(input.style().get_property_value("padding-right").unwrap(), "30px");

    unmount(host);
}
