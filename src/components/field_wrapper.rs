use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::components::markup::TRIGGER_CLASS;
use crate::error::PickerError;
use crate::options::PickerOptions;
use crate::stores::picker_state::TriggerId;
use crate::utils::dom::generate_trigger_id;

pub const WRAP_CLASS: &str = "lcep-el-wrap";
const TRIGGER_TITLE: &str = "insert emoji";

/// A field that can receive emojis
#[derive(Clone, Debug, PartialEq)]
pub enum TargetField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl TargetField {
    /// `<textarea>` or `<input type="text">`, anything else is not eligible
    pub fn from_element(element: Element) -> Option<Self> {
        match element.tag_name().as_str() {
            "TEXTAREA" => element.dyn_into().ok().map(TargetField::TextArea),
            "INPUT" if element.get_attribute("type").as_deref() == Some("text") => {
                element.dyn_into().ok().map(TargetField::Input)
            }
            _ => None,
        }
    }

    pub fn value(&self) -> String {
        match self {
            TargetField::Input(input) => input.value(),
            TargetField::TextArea(area) => area.value(),
        }
    }

    pub fn set_value(&self, value: &str) {
        match self {
            TargetField::Input(input) => input.set_value(value),
            TargetField::TextArea(area) => area.set_value(value),
        }
    }

    /// Append without separator or length check
    pub fn append(&self, text: &str) {
        let mut value = self.value();
        value.push_str(text);
        self.set_value(&value);
    }

    pub fn element(&self) -> &HtmlElement {
        match self {
            TargetField::Input(input) => input.unchecked_ref(),
            TargetField::TextArea(area) => area.unchecked_ref(),
        }
    }
}

/// A wrapped field and its trigger
#[derive(Clone, Debug)]
pub struct WrappedField {
    pub trigger_id: TriggerId,
    pub trigger: HtmlElement,
    pub wrapper: HtmlElement,
    pub field: TargetField,
}

impl WrappedField {
    /// Both trigger and field are still in the page
    pub fn is_connected(&self) -> bool {
        self.trigger.is_connected() && self.field.element().is_connected()
    }

    /// Put the field back where the wrapper was and drop the wrapper
    pub fn unwrap(&self) {
        if let Some(parent) = self.wrapper.parent_node() {
            if let Err(e) = parent.insert_before(self.field.element(), Some(self.wrapper.as_ref())) {
                log::warn!("Failed to unwrap field: {:?}", e);
                return;
            }
        }
        self.wrapper.remove();
    }
}

/// Eligible, not yet wrapped fields matching `selector`
pub fn find_fields(document: &Document, selector: &str) -> Vec<TargetField> {
    let nodes = match document.query_selector_all(selector) {
        Ok(nodes) => nodes,
        Err(e) => {
            log::warn!("Invalid emoji picker target {:?}: {:?}", selector, e);
            return Vec::new();
        }
    };

    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter(|element| !is_wrapped(element))
        .filter_map(TargetField::from_element)
        .collect()
}

fn is_wrapped(element: &Element) -> bool {
    element
        .parent_element()
        .map(|parent| parent.class_list().contains(WRAP_CLASS))
        .unwrap_or(false)
}

/// Wrap `field` in a positioning container and inject the trigger before it
pub fn wrap_field(
    document: &Document,
    field: TargetField,
    options: &PickerOptions,
) -> Result<WrappedField, PickerError> {
    let element = field.element();
    let parent = element
        .parent_node()
        .ok_or_else(|| PickerError::Dom("target field has no parent".to_string()))?;

    let value = field.value();

    let wrapper: HtmlElement = document.create_element("div")?.unchecked_into();
    wrapper.set_class_name(WRAP_CLASS);

    let trigger_id = TriggerId(generate_trigger_id());
    let trigger: HtmlElement = document.create_element("span")?.unchecked_into();
    trigger.set_id(trigger_id.as_str());
    trigger.set_class_name(TRIGGER_CLASS);
    trigger.set_attribute("style", &options.trigger_css())?;
    trigger.set_attribute("title", TRIGGER_TITLE)?;
    trigger.set_inner_html(&options.trigger_markup);

    parent.insert_before(&wrapper, Some(element.as_ref()))?;
    wrapper.append_child(&trigger)?;
    wrapper.append_child(element)?;

    element.style().set_property("padding-right", &options.field_padding())?;
    // keep values changed before init
    field.set_value(&value);

    Ok(WrappedField {
        trigger_id,
        trigger,
        wrapper,
        field,
    })
}
