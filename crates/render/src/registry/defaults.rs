//! Layout primitives and the default provider registry.
//!
//! MDX articles arrange content with three wrappers: `Row` lays children out
//! horizontally, `Col` stacks them, and `Frame` draws a bordered box with an
//! optional floating title.

use super::types::{ComponentRegistry, Props, prop_text};

const ROW_CLASS: &str = "flex flex-row justify-stretch items-stretch flex-1 gap-5";
const COL_CLASS: &str = "flex flex-col grow flex-1 gap-5";
const FRAME_CLASS: &str = "relative border-1 border-white rounded-xl p-5 mt-6";
const FRAME_TITLE_CLASS: &str = "absolute -top-7 bg-black border-1 border-white rounded-md p-1";

/// Horizontal flex container.
pub fn row(_props: &Props, children: &str) -> String {
    format!(r#"<div class="{ROW_CLASS}" data-component="row">{children}</div>"#)
}

/// Vertical flex container.
pub fn col(_props: &Props, children: &str) -> String {
    format!(r#"<div class="{COL_CLASS}" data-component="column">{children}</div>"#)
}

/// Bordered box; a non-empty `title` prop floats above the top border.
pub fn frame(props: &Props, children: &str) -> String {
    let title = prop_text(props, "title");
    let mut html = format!(r#"<div class="{FRAME_CLASS}" data-component="frame">"#);
    if !title.is_empty() {
        html.push_str(&format!(
            r#"<p class="{FRAME_TITLE_CLASS}">{}</p>"#,
            html_escape::encode_text(&title)
        ));
    }
    html.push_str(children);
    html.push_str("</div>");
    html
}

/// The provider registry every article renders with: `Col`, `Row` and `Frame`.
///
/// ```
/// use mdxblog_render::registry::defaults::default_registry;
///
/// let registry = default_registry();
/// assert_eq!(registry.names().collect::<Vec<_>>(), ["Col", "Frame", "Row"]);
/// ```
pub fn default_registry() -> ComponentRegistry {
    ComponentRegistry::new()
        .with("Col", col)
        .with("Row", row)
        .with("Frame", frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::types::PropValue;

    #[test]
    fn registry_holds_exactly_the_layout_primitives() {
        let registry = default_registry();
        assert_eq!(registry.len(), 3);
        for name in ["Row", "Col", "Frame"] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert!(!registry.contains("row"));
    }

    #[test]
    fn each_primitive_renders_its_role() {
        let registry = default_registry();
        let props = Props::new();
        for (name, role) in [("Row", "row"), ("Col", "column"), ("Frame", "frame")] {
            let html = registry.render(name, &props, "<p>x</p>").unwrap();
            assert!(html.starts_with("<div "), "{name}: {html}");
            assert!(html.contains(&format!(r#"data-component="{role}""#)), "{name}: {html}");
            assert!(html.ends_with("<p>x</p></div>"), "{name}: {html}");
        }
    }

    #[test]
    fn row_markup() {
        insta::assert_snapshot!(
            row(&Props::new(), "a"),
            @r#"<div class="flex flex-row justify-stretch items-stretch flex-1 gap-5" data-component="row">a</div>"#
        );
    }

    #[test]
    fn frame_without_title_has_no_caption() {
        let html = frame(&Props::new(), "body");
        assert!(!html.contains("<p"));
    }

    #[test]
    fn frame_title_is_escaped() {
        let mut props = Props::new();
        props.insert("title".into(), PropValue::literal("Tom & <Jerry>"));
        let html = frame(&props, "body");
        assert!(html.contains(
            r#"<p class="absolute -top-7 bg-black border-1 border-white rounded-md p-1">Tom &amp; &lt;Jerry&gt;</p>body</div>"#
        ));
    }
}
