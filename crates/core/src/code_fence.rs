//! Line-level code fence tracking.
//!
//! Text transforms that work on raw MDX lines use this to leave fenced code untouched.

/// Fence state carried from one line to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceState {
    /// Not inside a fence.
    #[default]
    Outside,
    /// Inside a fence opened with `length` repetitions of `marker`.
    Inside {
        /// Fence marker character (`` ` `` or `~`).
        marker: char,
        /// Length of the opening run.
        length: usize,
    },
}

/// Outcome of feeding a single line to [`advance_fence_state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceStep {
    /// State to carry into the next line.
    pub next: FenceState,
    /// Whether the line belongs to a fence (opener, body or closer).
    pub in_code: bool,
}

/// Advance fence state based on a single line of text.
pub fn advance_fence_state(line: &str, state: FenceState) -> FenceStep {
    let (columns, bytes) = leading_indent(line);
    let rest = &line[bytes..];
    // 4+ columns is indented code, never a fence marker.
    let run = if columns <= 3 { marker_run(rest) } else { None };

    match state {
        FenceState::Outside => match run {
            Some((marker, length)) => FenceStep {
                next: FenceState::Inside { marker, length },
                in_code: true,
            },
            None => FenceStep {
                next: FenceState::Outside,
                in_code: false,
            },
        },
        FenceState::Inside { marker, length } => {
            let closes = matches!(run, Some((m, len)) if m == marker && len >= length)
                && rest.trim_start_matches(marker).trim().is_empty();
            FenceStep {
                next: if closes { FenceState::Outside } else { state },
                in_code: true,
            }
        }
    }
}

/// Returns (visual columns, byte length) of leading whitespace; tabs advance to the next multiple of 4.
fn leading_indent(line: &str) -> (usize, usize) {
    let mut columns = 0;
    let mut bytes = 0;
    for b in line.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += 4 - (columns % 4),
            _ => break,
        }
        bytes += 1;
    }
    (columns, bytes)
}

fn marker_run(text: &str) -> Option<(char, usize)> {
    let first = text.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = text.chars().take_while(|c| *c == first).count();
    (length >= 3).then_some((first, length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(lines: &[&str]) -> Vec<bool> {
        let mut state = FenceState::default();
        lines
            .iter()
            .map(|line| {
                let step = advance_fence_state(line, state);
                state = step.next;
                step.in_code
            })
            .collect()
    }

    #[test]
    fn backtick_fence_round_trip() {
        assert_eq!(
            walk(&["text", "```tsx", "import x from 'y'", "```", "after"]),
            vec![false, true, true, true, false]
        );
    }

    #[test]
    fn info_string_does_not_close() {
        assert_eq!(
            walk(&["```", "```js", "still code", "```", "out"]),
            vec![true, true, true, true, false]
        );
    }

    #[test]
    fn longer_outer_fence_holds_inner_fence() {
        assert_eq!(
            walk(&["````md", "```", "```", "````", "out"]),
            vec![true, true, true, true, false]
        );
    }

    #[test]
    fn mismatched_marker_stays_inside() {
        let step = advance_fence_state("```", FenceState::Inside { marker: '~', length: 3 });
        assert_eq!(step.next, FenceState::Inside { marker: '~', length: 3 });
    }

    #[test]
    fn deep_indent_is_not_a_fence() {
        assert!(!advance_fence_state("    ```js", FenceState::Outside).in_code);
        assert!(!advance_fence_state("\t```js", FenceState::Outside).in_code);
        assert!(advance_fence_state("   ```js", FenceState::Outside).in_code);
    }

    #[test]
    fn two_markers_do_not_open() {
        assert!(!advance_fence_state("``", FenceState::Outside).in_code);
    }
}
