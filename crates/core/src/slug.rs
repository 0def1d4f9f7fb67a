use std::collections::HashMap;

/// Splits a trailing `{#custom-id}` off heading text.
///
/// ```
/// use mdxblog_core::slug::extract_custom_id;
///
/// assert_eq!(extract_custom_id("Colours {#colours}"), ("Colours", Some("colours")));
/// assert_eq!(extract_custom_id("Colours"), ("Colours", None));
/// ```
pub fn extract_custom_id(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    let Some(inner) = trimmed.strip_suffix('}') else {
        return (text, None);
    };
    let Some(open) = inner.rfind("{#") else {
        return (text, None);
    };

    let id = &inner[open + 2..];
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        (inner[..open].trim_end(), Some(id))
    } else {
        (text, None)
    }
}

/// github-slugger compatible heading id generator.
///
/// Repeated headings get `-1`, `-2`, ... suffixes in document order.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next unique slug for the given heading text.
    pub fn next_slug(&mut self, text: &str) -> String {
        slugify(text, &mut self.seen)
    }

    /// Reserves a slug (e.g. a `{#custom-id}`) so generated slugs won't collide with it.
    pub fn reserve(&mut self, slug: &str) {
        *self.seen.entry(slug.to_string()).or_insert(0) += 1;
    }
}

/// Unicode combining marks kept in slugs (diacritics, Indic viramas and nuktas, Thai vowels).
fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch as u32,
        0x0300..=0x036F
            | 0x0591..=0x05C7
            | 0x0610..=0x061A
            | 0x064B..=0x065F
            | 0x0900..=0x0903
            | 0x093A..=0x094F
            | 0x0951..=0x0957
            | 0x0962..=0x0963
            | 0x09BC..=0x09CD
            | 0x0E31..=0x0E3A
            | 0x0E47..=0x0E4E
            | 0x1AB0..=0x1AFF
            | 0x1DC0..=0x1DFF
            | 0x3099..=0x309A
            | 0xFE20..=0xFE2F
    )
}

/// Slugify `text`, recording it in `seen` so repeats get numeric suffixes.
///
/// Lowercases, keeps letters, digits, `-` and `_`, turns each space into `-`,
/// and drops everything else. Hyphens are neither collapsed nor trimmed.
pub fn slugify(text: &str, seen: &mut HashMap<String, usize>) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            ' ' => slug.push('-'),
            '-' | '_' => slug.push(ch),
            c if c.is_ascii_alphanumeric() => slug.push(c.to_ascii_lowercase()),
            c if !c.is_ascii() && (c.is_alphanumeric() || is_combining_mark(c)) => {
                slug.extend(c.to_lowercase());
            }
            _ => {}
        }
    }

    if slug.is_empty() {
        slug.push_str("heading");
    }

    let count = seen.entry(slug.clone()).or_insert(0);
    if *count > 0 {
        slug = format!("{slug}-{count}");
    }
    *count += 1;
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(text: &str) -> String {
        slugify(text, &mut HashMap::new())
    }

    #[test]
    fn matches_github_slugger() {
        let cases = [
            ("Themes and Styles", "themes-and-styles"),
            ("Doing Cool Things (with Markdown)", "doing-cool-things-with-markdown"),
            ("<Frame />", "frame-"),
            ("Row & Col", "row--col"),
            ("tailwind.config.js", "tailwindconfigjs"),
            ("snake_case stays", "snake_case-stays"),
            ("  padded  ", "--padded--"),
            ("Héllo Wörld", "héllo-wörld"),
            ("🚀 Launch", "-launch"),
            ("डिफ़ॉल्ट रूप", "डिफ़ॉल्ट-रूप"),
        ];
        for (input, expected) in cases {
            assert_eq!(slug(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn empty_text_falls_back() {
        assert_eq!(slug("!!!"), "heading");
    }

    #[test]
    fn repeats_are_numbered() {
        let mut slugger = Slugger::new();
        assert_eq!(slugger.next_slug("Jeremy"), "jeremy");
        assert_eq!(slugger.next_slug("Jeremy"), "jeremy-1");
        assert_eq!(slugger.next_slug("jeremy"), "jeremy-2");
    }

    #[test]
    fn reserved_ids_are_skipped() {
        let mut slugger = Slugger::new();
        slugger.reserve("intro");
        assert_eq!(slugger.next_slug("Intro"), "intro-1");
    }

    #[test]
    fn custom_id_rules() {
        assert_eq!(extract_custom_id("Title {#my_id}  "), ("Title", Some("my_id")));
        assert_eq!(extract_custom_id("Title {#bad id}"), ("Title {#bad id}", None));
        assert_eq!(extract_custom_id("Title {#}"), ("Title {#}", None));
        assert_eq!(extract_custom_id("見出し {#midashi}"), ("見出し", Some("midashi")));
    }
}
