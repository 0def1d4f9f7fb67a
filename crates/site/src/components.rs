//! Components scoped to a single article.

use mdxblog_render::{ComponentRegistry, Props, prop_text};

/// `<MyCustomComponent name text />`: a heading over a line of text.
pub fn my_custom_component(props: &Props, _children: &str) -> String {
    let name = prop_text(props, "name");
    let text = prop_text(props, "text");
    format!(
        "<div class=\"flex flex-col\"><h3>{}</h3><p>{}</p></div>",
        html_escape::encode_text(&name),
        html_escape::encode_text(&text)
    )
}

/// Components imported by "Doing Cool Things (with Markdown)".
pub fn cool_things_components() -> ComponentRegistry {
    ComponentRegistry::new().with("MyCustomComponent", my_custom_component)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdxblog_render::PropValue;

    #[test]
    fn renders_name_and_text() {
        let mut props = Props::new();
        props.insert("name".into(), PropValue::literal("Ada <3"));
        props.insert("text".into(), PropValue::expression("\"hello\""));
        assert_eq!(
            my_custom_component(&props, ""),
            "<div class=\"flex flex-col\"><h3>Ada &lt;3</h3><p>hello</p></div>"
        );
    }

    #[test]
    fn missing_props_render_empty() {
        assert_eq!(
            my_custom_component(&Props::new(), "ignored"),
            "<div class=\"flex flex-col\"><h3></h3><p></p></div>"
        );
    }
}
