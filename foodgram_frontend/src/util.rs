use leptos::wasm_bindgen::JsCast;
use web_sys::HtmlMetaElement;

pub const RECIPE_PLACEHOLDER: &str = "/static/recipe-placeholder.svg";

pub fn image_or_placeholder(image: Option<&str>) -> String {
    image
        .filter(|image| !image.is_empty())
        .unwrap_or(RECIPE_PLACEHOLDER)
        .to_string()
}

pub fn cooking_time(minutes: u32) -> String {
    format!("{minutes} min.")
}

pub const DESCRIPTION_META: &str = "meta[name=description]";
pub const OG_TITLE_META: &str = "meta[property='og:title']";

/// Sets the document title along with the description and `og:title` meta tags.
pub fn set_page_meta(title: &str, description: &str) {
    let document = leptos::document();
    document.set_title(title);
    for (selector, content) in [(DESCRIPTION_META, description), (OG_TITLE_META, title)] {
        match document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlMetaElement>().ok())
        {
            Some(meta) => meta.set_content(content),
            None => log::debug!("no {selector} tag in the document"),
        }
    }
}
