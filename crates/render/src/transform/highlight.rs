//! Build-time syntax highlighting with Prism class names.
//!
//! Output mirrors what a Prism rehype plugin produces, so any Prism theme
//! stylesheet applies unchanged:
//!
//! ```text
//! <pre class="language-js"><code class="language-js code-highlight">
//!   <span class="code-line"><span class="token keyword">const</span> a ...
//! ```

use std::fmt::Write;

/// Token categories, named after Prism's `token` classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Line or block comment.
    Comment,
    /// Quoted string or template literal.
    String,
    /// Numeric literal, including suffixes and CSS units.
    Number,
    /// Reserved word.
    Keyword,
    /// `true` / `false` (and `null` in JSON).
    Boolean,
    /// Identifier directly followed by `(` (or `!(` for Rust macros).
    Function,
    /// Operator run such as `=>` or `&&`.
    Operator,
    /// Brackets, separators.
    Punctuation,
    /// CSS property or JSON key.
    Property,
    /// Shell `$VARIABLE`.
    Variable,
    /// Markup tag name.
    Tag,
    /// Markup attribute name.
    AttrName,
    /// Markup attribute value.
    AttrValue,
}

impl TokenKind {
    /// The Prism class suffix for this token.
    pub fn class(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Keyword => "keyword",
            TokenKind::Boolean => "boolean",
            TokenKind::Function => "function",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Property => "property",
            TokenKind::Variable => "variable",
            TokenKind::Tag => "tag",
            TokenKind::AttrName => "attr-name",
            TokenKind::AttrValue => "attr-value",
        }
    }
}

/// A slice of source text, with a kind unless it is plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Token category; `None` for plain text.
    pub kind: Option<TokenKind>,
    /// Source text of the token.
    pub text: &'a str,
}

struct Grammar {
    keywords: &'static [&'static str],
    booleans: &'static [&'static str],
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    quotes: &'static [char],
    /// Identifiers or strings followed by `:` are properties (CSS, JSON).
    properties: bool,
    /// `$NAME` is a variable (shell).
    dollar_variables: bool,
}

const JS_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
    "delete", "do", "else", "enum", "export", "extends", "finally", "for", "from", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "try", "type", "typeof", "undefined", "var",
    "void", "while", "with", "yield",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "type", "unsafe", "use",
    "where", "while",
];

const BASH_KEYWORDS: &[&str] = &[
    "case", "do", "done", "echo", "elif", "else", "esac", "export", "fi", "for", "function", "if",
    "in", "local", "return", "then", "until", "while",
];

const CSS_KEYWORDS: &[&str] = &["!important"];

const JS: Grammar = Grammar {
    keywords: JS_KEYWORDS,
    booleans: &["true", "false"],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\'', '`'],
    properties: false,
    dollar_variables: false,
};

const RUST: Grammar = Grammar {
    keywords: RUST_KEYWORDS,
    booleans: &["true", "false"],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    quotes: &['"'],
    properties: false,
    dollar_variables: false,
};

const CSS: Grammar = Grammar {
    keywords: CSS_KEYWORDS,
    booleans: &[],
    line_comment: None,
    block_comment: Some(("/*", "*/")),
    quotes: &['"', '\''],
    properties: true,
    dollar_variables: false,
};

const JSON: Grammar = Grammar {
    keywords: &[],
    booleans: &["true", "false", "null"],
    line_comment: None,
    block_comment: None,
    quotes: &['"'],
    properties: true,
    dollar_variables: false,
};

const BASH: Grammar = Grammar {
    keywords: BASH_KEYWORDS,
    booleans: &["true", "false"],
    line_comment: Some("#"),
    block_comment: None,
    quotes: &['"', '\''],
    properties: false,
    dollar_variables: true,
};

enum Language {
    Code(&'static Grammar),
    Markup,
}

fn language(lang: &str) -> Option<Language> {
    match lang {
        "js" | "jsx" | "ts" | "tsx" | "javascript" | "typescript" | "mjs" | "cjs" => {
            Some(Language::Code(&JS))
        }
        "rust" | "rs" => Some(Language::Code(&RUST)),
        "css" => Some(Language::Code(&CSS)),
        "json" | "jsonc" => Some(Language::Code(&JSON)),
        "bash" | "sh" | "shell" | "zsh" => Some(Language::Code(&BASH)),
        "html" | "xml" | "markup" | "svg" => Some(Language::Markup),
        _ => None,
    }
}

/// Splits `code` into tokens for `lang`, or `None` when the language is unsupported.
///
/// Concatenating the token texts always reproduces `code`.
pub fn tokenize<'a>(code: &'a str, lang: &str) -> Option<Vec<Token<'a>>> {
    match language(&lang.to_ascii_lowercase())? {
        Language::Code(grammar) => Some(tokenize_code(code, grammar)),
        Language::Markup => Some(tokenize_markup(code)),
    }
}

/// Renders a fenced code block to HTML.
///
/// With highlighting on and a supported language, every line is wrapped in
/// `<span class="code-line">` and tokens in `<span class="token KIND">`.
/// Otherwise the code is escaped verbatim.
pub fn render_code_block(code: &str, lang: Option<&str>, highlight: bool) -> String {
    let lang = lang.map(str::trim).filter(|l| !l.is_empty());
    let Some(lang) = lang else {
        return format!("<pre><code>{}</code></pre>", html_escape::encode_text(code));
    };
    let lang_attr = html_escape::encode_double_quoted_attribute(lang);

    let tokens = if highlight { tokenize(code, lang) } else { None };
    let Some(tokens) = tokens else {
        return format!(
            "<pre class=\"language-{lang_attr}\"><code class=\"language-{lang_attr}\">{}</code></pre>",
            html_escape::encode_text(code)
        );
    };

    let mut html = format!(
        "<pre class=\"language-{lang_attr}\"><code class=\"language-{lang_attr} code-highlight\">"
    );
    html.push_str(&render_lines(&tokens));
    html.push_str("</code></pre>");
    html
}

/// Emits tokens line by line; tokens spanning a newline are split so spans never cross lines.
fn render_lines(tokens: &[Token<'_>]) -> String {
    let mut html = String::from("<span class=\"code-line\">");
    for token in tokens {
        for (i, part) in token.text.split('\n').enumerate() {
            if i > 0 {
                html.push_str("\n</span><span class=\"code-line\">");
            }
            if part.is_empty() {
                continue;
            }
            match token.kind {
                Some(kind) => {
                    let _ = write!(
                        html,
                        "<span class=\"token {}\">{}</span>",
                        kind.class(),
                        html_escape::encode_text(part)
                    );
                }
                None => html.push_str(&html_escape::encode_text(part)),
            }
        }
    }
    html.push_str("</span>");
    html
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn done(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Emits `len` bytes from the cursor as one token, merging adjacent plain text.
    fn emit(&mut self, kind: Option<TokenKind>, len: usize) {
        let text = &self.src[self.pos..self.pos + len];
        self.pos += len;
        if let (None, Some(last)) = (kind, self.tokens.last_mut())
            && last.kind.is_none()
        {
            let start = self.pos - len - last.text.len();
            last.text = &self.src[start..self.pos];
            return;
        }
        self.tokens.push(Token { kind, text });
    }

    fn len_while(&self, pred: impl Fn(char) -> bool) -> usize {
        self.rest()
            .char_indices()
            .find(|(_, c)| !pred(*c))
            .map_or(self.rest().len(), |(i, _)| i)
    }

    /// Length of a quoted string starting at the cursor, honouring backslash escapes.
    fn string_len(&self, quote: char, multiline: bool) -> usize {
        let rest = self.rest();
        let mut escaped = false;
        for (i, c) in rest.char_indices().skip(1) {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return i + c.len_utf8();
            } else if c == '\n' && !multiline {
                return i;
            }
        }
        rest.len()
    }

    /// Next non-whitespace character after `len` bytes.
    fn next_significant(&self, len: usize) -> Option<char> {
        self.rest()[len..].chars().find(|c| !c.is_whitespace())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '-'
}

fn tokenize_code<'a>(code: &'a str, grammar: &Grammar) -> Vec<Token<'a>> {
    let mut s = Scanner::new(code);

    while let Some(c) = s.peek() {
        let rest = s.rest();

        if let Some(marker) = grammar.line_comment
            && rest.starts_with(marker)
        {
            let len = rest.find('\n').unwrap_or(rest.len());
            s.emit(Some(TokenKind::Comment), len);
            continue;
        }

        if let Some((open, close)) = grammar.block_comment
            && rest.starts_with(open)
        {
            let len = rest[open.len()..]
                .find(close)
                .map_or(rest.len(), |end| open.len() + end + close.len());
            s.emit(Some(TokenKind::Comment), len);
            continue;
        }

        if grammar.quotes.contains(&c) {
            let len = s.string_len(c, c == '`');
            let kind = if grammar.properties && s.next_significant(len) == Some(':') {
                TokenKind::Property
            } else {
                TokenKind::String
            };
            s.emit(Some(kind), len);
            continue;
        }

        if grammar.dollar_variables && c == '$' {
            let len = 1 + rest[1..]
                .char_indices()
                .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
                .map_or(rest.len() - 1, |(i, _)| i);
            if len > 1 {
                s.emit(Some(TokenKind::Variable), len);
            } else {
                s.emit(Some(TokenKind::Operator), 1);
            }
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.' && rest[1..].starts_with(|d: char| d.is_ascii_digit()));
        if starts_number {
            let len = s.len_while(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '%');
            s.emit(Some(TokenKind::Number), len);
            continue;
        }

        if is_ident_start(c) || (c == '!' && grammar.keywords.contains(&"!important")) {
            let len = if c == '!' {
                1 + rest[1..]
                    .char_indices()
                    .find(|(_, c)| !c.is_alphanumeric())
                    .map_or(rest.len() - 1, |(i, _)| i)
            } else {
                s.len_while(|c| is_ident_char(c) && (c != '-' || grammar.properties))
            };
            let word = &rest[..len];
            let next = s.next_significant(len);
            let kind = if grammar.keywords.contains(&word) {
                Some(TokenKind::Keyword)
            } else if grammar.booleans.contains(&word) {
                Some(TokenKind::Boolean)
            } else if grammar.properties && next == Some(':') {
                Some(TokenKind::Property)
            } else if next == Some('(') || (rest[len..].starts_with("!(")) {
                Some(TokenKind::Function)
            } else {
                None
            };
            s.emit(kind, len);
            continue;
        }

        if "+-*/%=&|^!<>?:~".contains(c) {
            let len = s.len_while(|c| "+-*/%=&|^!<>?:~".contains(c));
            s.emit(Some(TokenKind::Operator), len);
            continue;
        }

        if "{}[]();,.@#".contains(c) {
            s.emit(Some(TokenKind::Punctuation), c.len_utf8());
            continue;
        }

        s.emit(None, c.len_utf8());
    }

    s.tokens
}

fn tokenize_markup(code: &str) -> Vec<Token<'_>> {
    let mut s = Scanner::new(code);

    while !s.done() {
        let rest = s.rest();

        if rest.starts_with("<!--") {
            let len = rest.find("-->").map_or(rest.len(), |end| end + 3);
            s.emit(Some(TokenKind::Comment), len);
            continue;
        }

        let opener = if rest.starts_with("</") {
            2
        } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_alphabetic()) {
            1
        } else {
            0
        };
        if opener == 0 {
            // text runs to the next `<`; a stray `<` is plain text on its own
            let len = match rest.find('<') {
                Some(0) => 1,
                Some(i) => i,
                None => rest.len(),
            };
            s.emit(None, len);
            continue;
        }

        s.emit(Some(TokenKind::Punctuation), opener);
        let name = s.len_while(|c| c.is_alphanumeric() || c == '-' || c == ':' || c == '.');
        s.emit(Some(TokenKind::Tag), name);

        // attributes up to the closing `>`
        while let Some(c) = s.peek() {
            if c == '>' {
                s.emit(Some(TokenKind::Punctuation), 1);
                break;
            }
            if s.rest().starts_with("/>") {
                s.emit(Some(TokenKind::Punctuation), 2);
                break;
            }
            if c == '"' || c == '\'' {
                let len = s.string_len(c, true);
                s.emit(Some(TokenKind::AttrValue), len);
            } else if c == '=' {
                s.emit(Some(TokenKind::Punctuation), 1);
            } else if c.is_whitespace() {
                let len = s.len_while(char::is_whitespace);
                s.emit(None, len);
            } else {
                let len = s
                    .len_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\''));
                let len = len.max(c.len_utf8());
                s.emit(Some(TokenKind::AttrName), len);
            }
        }
    }

    s.tokens
}
