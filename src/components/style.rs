use web_sys::Document;

use crate::error::PickerError;

pub const STYLE_ID: &str = "lcep-style";

/// Inject the shared stylesheet into `<head>` unless it is already there
pub fn inject_style(document: &Document) -> Result<bool, PickerError> {
    if document.get_element_by_id(STYLE_ID).is_some() {
        return Ok(false);
    }

    let style = document.create_element("style")?;
    style.set_id(STYLE_ID);
    style.set_text_content(Some(STYLESHEET));

    let head = document.head().ok_or(PickerError::NoDocument)?;
    head.append_child(&style)?;
    log::debug!("Emoji picker stylesheet injected");
    Ok(true)
}

pub fn remove_style(document: &Document) {
    if let Some(style) = document.get_element_by_id(STYLE_ID) {
        style.remove();
    }
}

const STYLESHEET: &str = r#"
.lcep-el-wrap {
    position: relative;
}
.lcep-trigger {
    display: inline-block;
    position: absolute;
    width: 22px;
    height: 22px;
    cursor: pointer;
}
.lcep-trigger svg {
    width: 100%;
    height: 100%;
    border-radius: 50%;
    border: 2px solid transparent;
    opacity: 0.8;
    fill: #282828;
    transition: all .15s ease;
}
.lcep-trigger svg:hover {
    fill: #202020;
}
#lc-emoji-picker,
#lc-emoji-picker * {
    box-sizing: border-box;
}
#lc-emoji-picker {
    visibility: hidden;
    opacity: 0;
    position: absolute;
    top: -9999px;
    z-index: 999;
    width: 280px;
    min-height: 320px;
    background: #fff;
    box-shadow: 0px 2px 13px -2px rgba(0, 0, 0, 0.18);
    border-radius: 6px;
    overflow: hidden;
    border: 1px solid #ccc;
    transform: scale(0.85);
    transition: opacity .2s ease, transform .2s ease;
}
#lc-emoji-picker.lcep-shown {
    visibility: visible;
    z-index: 999;
    transform: none;
    opacity: 1;
}
#lc-emoji-picker .lcep-all-categories {
    height: 260px;
    overflow-y: auto;
    padding: 0 5px 20px 10px;
}
#lc-emoji-picker .lcep-category:not(:first-child) {
    margin-top: 22px;
}
#lc-emoji-picker .lcep-container-title {
    color: black;
    margin: 10px 0;
    text-indent: 10px;
    font-size: 13px;
    font-weight: bold;
}
#lc-emoji-picker * {
    margin: 0;
    padding: 0;
    text-decoration: none;
    color: #666;
    font-family: sans-serif;
    user-select: none;
    -webkit-tap-highlight-color: rgba(255, 255, 255, 0);
}
#lc-emoji-picker ul {
    list-style: none;
    margin: 0;
    padding: 0;
}
.lcep-grid {
    display: flex;
    flex-wrap: wrap;
}
.lcep-grid > li {
    cursor: pointer;
    flex: 0 0 calc(100% / 6);
    max-width: calc(100% / 6);
    height: 41px;
    min-width: 0;
    display: flex;
    justify-content: center;
    align-items: center;
    background: #fff;
    border-radius: 2px;
    transition: all .2s ease;
}
.lcep-grid > li:hover {
    background: #99c9ef;
}
.lcep-grid > li > a {
    display: block;
    font-size: 21px;
    margin: 0;
    padding: 22px 0px;
    line-height: 0;
}
.lcep-categories ul {
    display: flex;
    flex-wrap: wrap;
    list-style: none;
}
.lcep-categories li {
    transition: all .3s ease;
    flex: 0 0 calc(100% / 7);
    display: flex;
    max-width: calc(100% / 7);
}
.lcep-categories li.lcep-active {
    box-shadow: 0 -3px 0 #48a6f0 inset;
}
.lcep-categories a {
    padding: 7px !important;
    font-size: 19px;
    height: 42px;
    display: flex;
    text-align: center;
    justify-content: center;
    align-items: center;
    position: relative;
    filter: grayscale(100%) contrast(150%);
}
.lcep-categories a:before {
    content: "";
    position: absolute;
    top: 0;
    left: 0;
    right: 0;
    bottom: 0;
    background: rgba(255, 255, 255, .2);
    cursor: pointer;
    transition: background .25s ease;
}
.lcep-categories li:not(.lcep-active):hover a:before {
    background: rgba(255, 255, 255, .4);
}
.lcep-search {
    position: relative;
    border-top: 1px solid #ddd;
    padding: 10px 6px !important;
}
.lcep-search input {
    width: 100%;
    padding: 8px 30px 8px 10px !important;
    outline: none;
    background: #fff;
    font-size: 13px;
    color: #616161;
    border: 2px solid #ddd;
    height: 30px;
    border-radius: 25px;
    user-select: auto !important;
}
.lcep-search svg,
.lcep-search i {
    width: 14px;
    height: 14px;
    position: absolute;
    right: 16px;
    top: 18px;
    fill: #444;
    cursor: pointer;
}
.lcep-search i {
    color: #444;
    font-size: 22px;
    font-family: arial;
    font-style: normal;
    line-height: 14px;
    transition: opacity .15s ease;
}
.lcep-search i:hover {
    opacity: .8;
}
.lcep-searching svg,
.lcep-search:not(.lcep-searching) i {
    display: none;
}
"#;
