//! Removal of top-level `import`/`export` statements from MDX source.
//!
//! Components reach a document through the registry, so module statements only
//! need to disappear before parsing. Lines are blanked rather than removed so
//! parser positions keep pointing at the original source lines.

use crate::code_fence::{FenceState, advance_fence_state};
use std::borrow::Cow;

/// Blanks every top-level `import`/`export` statement outside fenced code.
///
/// A statement starts at column 0 with `import ` / `export ` (or `import'`,
/// `import"` for side-effect imports) and continues over following lines
/// until its braces balance.
pub fn strip_module_statements(input: &str) -> Cow<'_, str> {
    if !input.lines().any(starts_statement) {
        return Cow::Borrowed(input);
    }

    let mut output = String::with_capacity(input.len());
    let mut fence = FenceState::default();
    let mut open_braces: Option<i64> = None;

    for line in input.split_inclusive('\n') {
        let ending = if line.ends_with("\r\n") {
            "\r\n"
        } else if line.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        let content = &line[..line.len() - ending.len()];

        if let Some(depth) = open_braces {
            let depth = depth + brace_delta(content);
            open_braces = (depth > 0).then_some(depth);
            output.push_str(ending);
            continue;
        }

        let step = advance_fence_state(content, fence);
        fence = step.next;
        if !step.in_code && starts_statement(content) {
            let depth = brace_delta(content);
            open_braces = (depth > 0).then_some(depth);
            output.push_str(ending);
            continue;
        }

        output.push_str(line);
    }

    Cow::Owned(output)
}

fn starts_statement(line: &str) -> bool {
    ["import", "export"].iter().any(|keyword| {
        line.strip_prefix(keyword)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c == ' ' || c == '{' || c == '\'' || c == '"')
    })
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}
