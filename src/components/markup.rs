//! Popup markup
//!
//! The dataset is first turned into a plain `PopupMarkup` description, then rendered
//! once into the page with web-sys. The attribute names (`data-index`, `data-name`,
//! `data-code`, `category-name`) are read back by the popup controller.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::error::PickerError;
use crate::stores::emoji_store::EmojiDataset;
use crate::utils::category::CategoryId;

pub const POPUP_ID: &str = "lc-emoji-picker";
pub const SHOWN_CLASS: &str = "lcep-shown";
pub const ACTIVE_CLASS: &str = "lcep-active";
pub const SEARCHING_CLASS: &str = "lcep-searching";
pub const TRIGGER_CLASS: &str = "lcep-trigger";

const SEARCH_PLACEHOLDER: &str = "Search emoji";
const CLEAR_ICON: &str = "×";
const NO_OP_HREF: &str = "javascript:void(0)";

const SEARCH_ICON: &str = r#"<svg version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" x="0px" y="0px" viewBox="0 0 512.005 512.005" xml:space="preserve"><g><g><path d="M505.749,475.587l-145.6-145.6c28.203-34.837,45.184-79.104,45.184-127.317c0-111.744-90.923-202.667-202.667-202.667S0,90.925,0,202.669s90.923,202.667,202.667,202.667c48.213,0,92.48-16.981,127.317-45.184l145.6,145.6c4.16,4.16,9.621,6.251,15.083,6.251s10.923-2.091,15.083-6.251C514.091,497.411,514.091,483.928,505.749,475.587z M202.667,362.669c-88.235,0-160-71.765-160-160s71.765-160,160-160s160,71.765,160,160S290.901,362.669,202.667,362.669z"/></g></g></svg>"#;

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTab {
    pub id: CategoryId,
    pub label: String,
    pub icon: Option<&'static str>,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmojiItem {
    pub glyph: String,
    /// Dataset description, shown as tooltip
    pub title: String,
    /// Lowercased description, matched by search
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategorySection {
    pub id: CategoryId,
    pub label: String,
    pub items: Vec<EmojiItem>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopupMarkup {
    pub tabs: Vec<CategoryTab>,
    pub sections: Vec<CategorySection>,
}

impl PopupMarkup {
    pub fn from_dataset(dataset: &EmojiDataset) -> Self {
        let mut markup = PopupMarkup::default();
        for (index, category) in dataset.categories().iter().enumerate() {
            markup.tabs.push(CategoryTab {
                id: category.id.clone(),
                label: category.label.clone(),
                icon: category.id.icon(),
                active: index == 0,
            });
            markup.sections.push(CategorySection {
                id: category.id.clone(),
                label: category.label.clone(),
                items: category
                    .entries
                    .iter()
                    .map(|entry| EmojiItem {
                        glyph: entry.glyph.clone(),
                        title: entry.description.clone(),
                        name: entry.search_label(),
                        code: entry.code.clone(),
                    })
                    .collect(),
            });
        }
        markup
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    /// Render into `document.body`. Returns `None` when the popup already exists.
    pub fn render(&self, document: &Document) -> Result<Option<PopupElements>, PickerError> {
        if document.get_element_by_id(POPUP_ID).is_some() {
            return Ok(None);
        }

        let root = create::<HtmlElement>(document, "div")?;
        root.set_id(POPUP_ID);

        // category bar + search
        let bar = create::<HtmlElement>(document, "div")?;
        bar.set_class_name("lcep-categories");
        let tab_list = document.create_element("ul")?;
        let mut tabs = Vec::with_capacity(self.tabs.len());
        for tab in &self.tabs {
            let li = create::<HtmlElement>(document, "li")?;
            if tab.active {
                li.set_class_name(ACTIVE_CLASS);
            }
            li.set_attribute("data-index", tab.id.as_str())?;
            li.set_attribute("title", &tab.label)?;
            let link = document.create_element("a")?;
            link.set_attribute("href", NO_OP_HREF)?;
            link.set_text_content(tab.icon);
            li.append_child(&link)?;
            tab_list.append_child(&li)?;
            tabs.push((tab.id.clone(), li));
        }
        bar.append_child(&tab_list)?;

        let search_box = create::<HtmlElement>(document, "div")?;
        search_box.set_class_name("lcep-search");
        let search_input = create::<HtmlInputElement>(document, "input")?;
        search_input.set_placeholder(SEARCH_PLACEHOLDER);
        search_box.append_child(&search_input)?;
        search_box.insert_adjacent_html("beforeend", SEARCH_ICON)?;
        let clear_icon = create::<HtmlElement>(document, "i")?;
        clear_icon.set_text_content(Some(CLEAR_ICON));
        search_box.append_child(&clear_icon)?;
        bar.append_child(&search_box)?;
        root.append_child(&bar)?;

        // emoji grids
        let grid_holder = document.create_element("div")?;
        let scroller = create::<HtmlElement>(document, "div")?;
        scroller.set_class_name("lcep-all-categories");
        let mut sections = Vec::with_capacity(self.sections.len());
        let mut items = Vec::with_capacity(self.item_count());
        for section in &self.sections {
            let list = create::<HtmlElement>(document, "ul")?;
            list.set_class_name("lcep-category");
            list.set_attribute("category-name", section.id.as_str())?;

            let title = create::<HtmlElement>(document, "div")?;
            title.set_class_name("lcep-container-title");
            title.set_text_content(Some(section.label.as_str()));
            list.append_child(&title)?;

            let grid = document.create_element("div")?;
            grid.set_class_name("lcep-grid");
            for item in &section.items {
                let li = create::<HtmlElement>(document, "li")?;
                li.set_attribute("data-name", &item.name)?;
                let link = document.create_element("a")?;
                link.set_class_name("lcep-item");
                link.set_attribute("title", &item.title)?;
                link.set_attribute("data-name", &item.name)?;
                link.set_attribute("data-code", &item.code)?;
                link.set_attribute("href", NO_OP_HREF)?;
                link.set_text_content(Some(item.glyph.as_str()));
                li.append_child(&link)?;
                grid.append_child(&li)?;
                items.push(RenderedItem {
                    name: item.name.clone(),
                    element: li,
                });
            }
            list.append_child(&grid)?;
            scroller.append_child(&list)?;
            sections.push(RenderedSection {
                id: section.id.clone(),
                list,
                title,
            });
        }
        grid_holder.append_child(&scroller)?;
        root.append_child(&grid_holder)?;

        let body = document.body().ok_or(PickerError::NoDocument)?;
        body.append_child(&root)?;
        log::debug!(
            "Emoji picker rendered with {} categories, {} emojis",
            sections.len(),
            items.len()
        );

        Ok(Some(PopupElements {
            root,
            tab_bar: bar,
            tabs,
            search_box,
            search_input,
            clear_icon,
            scroller,
            sections,
            items,
        }))
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, PickerError> {
    document
        .create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| PickerError::Dom(format!("<{}> has an unexpected element type", tag)))
}

/// Handles to the rendered popup, kept by the registry
pub struct PopupElements {
    pub root: HtmlElement,
    pub tab_bar: HtmlElement,
    pub tabs: Vec<(CategoryId, HtmlElement)>,
    pub search_box: HtmlElement,
    pub search_input: HtmlInputElement,
    pub clear_icon: HtmlElement,
    pub scroller: HtmlElement,
    pub sections: Vec<RenderedSection>,
    /// Every emoji `li`, in dataset order
    pub items: Vec<RenderedItem>,
}

pub struct RenderedSection {
    pub id: CategoryId,
    pub list: HtmlElement,
    pub title: HtmlElement,
}

pub struct RenderedItem {
    pub name: String,
    pub element: HtmlElement,
}

impl PopupElements {
    pub fn section(&self, id: &CategoryId) -> Option<&RenderedSection> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Flat dataset index of the emoji `li` containing `element`
    pub fn item_index(&self, element: &Element) -> Option<usize> {
        let li = element.closest("li[data-name]").ok().flatten()?;
        self.items
            .iter()
            .position(|item| item.element.is_same_node(Some(li.as_ref())))
    }

    /// Category of the tab containing `element`
    pub fn tab_id(&self, element: &Element) -> Option<CategoryId> {
        let li = element.closest("li[data-index]").ok().flatten()?;
        li.get_attribute("data-index").map(CategoryId::from_raw)
    }
}
