use mdxblog_wasm::{render_location_js, render_mdx_js, resolve_href, route_paths};
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PageResult {
    html: String,
    location: String,
    matched: bool,
    title: Option<String>,
    headings: Vec<HeadingEntry>,
}

#[derive(Deserialize, Debug)]
struct HeadingEntry {
    depth: u8,
    slug: String,
    text: String,
}

#[derive(Deserialize, Debug)]
struct MdxResult {
    html: String,
    headings: Vec<HeadingEntry>,
}

#[derive(serde::Serialize)]
struct Config {
    history: &'static str,
}

#[wasm_bindgen_test]
fn renders_an_article_with_memory_history() {
    let page = render_location_js("/blog/jeremy/", JsValue::UNDEFINED).expect("render");
    let page: PageResult = serde_wasm_bindgen::from_value(page).expect("deserialize page");

    assert!(page.matched);
    assert!(page.html.starts_with("<!doctype html>\n<html"));
    assert_eq!(page.location, "/blog/jeremy/");
    assert_eq!(page.title.as_deref(), Some("Jeremy"));
    assert!(page.html.contains("<div class=\"flex flex-col jeremy\">"));
    assert_eq!(page.headings[0].depth, 1);
    assert_eq!(page.headings[0].slug, "jeremy");
}

#[wasm_bindgen_test]
fn renders_from_a_hash_fragment() {
    let config = serde_wasm_bindgen::to_value(&Config { history: "hash" }).unwrap();
    let page = render_location_js("#/blog/themesAndStyles/", config).expect("render");
    let page: PageResult = serde_wasm_bindgen::from_value(page).expect("deserialize page");

    assert!(page.matched);
    assert!(page.html.contains("<a href=\"#/\""));
}

#[wasm_bindgen_test]
fn unknown_location_is_not_found() {
    let page = render_location_js("/nope/", JsValue::UNDEFINED).expect("render");
    let page: PageResult = serde_wasm_bindgen::from_value(page).expect("deserialize page");
    assert!(!page.matched);
    assert!(page.html.contains("Not Found"));
}

#[wasm_bindgen_test]
fn lists_route_paths() {
    let paths = route_paths().expect("routes");
    assert_eq!(paths.length(), 5);
    assert_eq!(paths.get(0).as_string().as_deref(), Some("/"));
}

#[wasm_bindgen_test]
fn resolves_hrefs_per_history() {
    assert_eq!(resolve_href("/blog/jeremy/", "hash").unwrap(), "#/blog/jeremy/");
    assert_eq!(resolve_href("/blog/jeremy/", "memory").unwrap(), "/blog/jeremy/");
}

#[wasm_bindgen_test]
fn renders_standalone_mdx() {
    let result = render_mdx_js("# Hi\n\n<Row>\n\nx\n\n</Row>\n", JsValue::UNDEFINED).expect("render");
    let result: MdxResult = serde_wasm_bindgen::from_value(result).expect("deserialize");
    assert!(result.html.contains("data-component=\"row\""));
    assert_eq!(result.headings[0].text, "Hi");
}
