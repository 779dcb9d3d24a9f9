//! LaTeX-flavoured input to calculator notation.
//!
//! The rewrite runs in a fixed order, later steps rely on the earlier ones:
//! 1. `\operatorname{name}` → `name`
//! 2. `\sqrt{E}` → `sqrt(E)`, `\sqrt[n]{E}` → `(E)^(1/(n))`, `\frac{A}{B}` → `(A)/(B)`
//! 3. macro table (`\pi`, `\cdot`, `\left(`, `\left|..\right|`, functions, spacing)
//! 4. remaining `{` `}` dropped
//! 5. implicit multiplication: `2x`, `)(`, `)x` (but not `)sin(`)
//!
//! Unknown macros pass through unchanged, the parser reports them later.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_OPERATORNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\operatorname\*?\{([^{}]*)\}").expect("valid regex literal")
});
static RE_ABS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\left\|(.*?)\\right\|").expect("valid regex literal"));
static RE_DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").expect("valid regex literal"));
static RE_CLOSE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\(").expect("valid regex literal"));
static RE_CLOSE_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)([a-zA-Z]+)").expect("valid regex literal"));

/// Plain replacements of step 3, applied in this order. Longer macros sharing a prefix
/// with a shorter one come first.
const MACRO_TABLE: &[(&str, &str)] = &[
    ("\\left(", "("),
    ("\\right)", ")"),
    ("\\left[", "("),
    ("\\right]", ")"),
    ("\\cdot", "*"),
    ("\\times", "*"),
    ("\\div", "/"),
    ("\\pi", "pi"),
    ("\\hbar", "hbar"),
    ("\\infty", "inf"),
    ("\\int", "integrate"),
    ("\\rightarrow", "->"),
    ("\\to", "->"),
    ("\\arcsin", "arcsin"),
    ("\\arccos", "arccos"),
    ("\\arctan", "arctan"),
    ("\\sin", "sin"),
    ("\\cos", "cos"),
    ("\\tan", "tan"),
    ("\\cot", "cot"),
    ("\\ln", "ln"),
    ("\\log", "log"),
    ("\\exp", "exp"),
    ("\\quad", ""),
    ("\\,", ""),
    ("\\;", ""),
    ("\\!", ""),
];

/// Turns LaTeX-like text into calculator notation. Never fails.
pub fn normalize(raw: &str) -> String {
    // 1
    let text = RE_OPERATORNAME.replace_all(raw, "$1").into_owned();
    // 2
    let text = rewrite_roots_and_fractions(&text);
    // 3
    let mut text = RE_ABS.replace_all(&text, "abs($1)").into_owned();
    for (from, to) in MACRO_TABLE {
        text = text.replace(from, to);
    }
    // 4
    let text: String = text.chars().filter(|c| *c != '{' && *c != '}').collect();
    // 5
    insert_implicit_multiplication(&text)
}

fn insert_implicit_multiplication(text: &str) -> String {
    let text = RE_DIGIT_LETTER.replace_all(text, "$1*$2");
    let text = RE_CLOSE_OPEN.replace_all(&text, ")*(");
    let source = text.as_ref();
    RE_CLOSE_LETTERS
        .replace_all(source, |caps: &Captures| {
            let whole = &caps[0];
            let end = caps.get(0).map_or(source.len(), |m| m.end());
            // a letter run directly followed by '(' is a function name
            if source[end..].starts_with('(') {
                whole.to_string()
            } else {
                format!(")*{}", &caps[1])
            }
        })
        .into_owned()
}

/// Position of the `}` closing the `{` at `open`.
fn closing_brace(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, c) in text[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `{...}` group starting exactly at `open`: (content, index after the group)
fn brace_group(text: &str, open: usize) -> Option<(&str, usize)> {
    if !text[open..].starts_with('{') {
        return None;
    }
    let close = closing_brace(text, open)?;
    Some((&text[open + 1..close], close + 1))
}

/// Rewrites one `\frac` or `\sqrt` starting at `start`, `None` when it is malformed.
fn rewrite_macro_at(text: &str, start: usize) -> Option<String> {
    let (replacement, rest) = if text[start..].starts_with("\\frac") {
        let (numerator, after_num) = brace_group(text, start + "\\frac".len())?;
        let (denominator, after_den) = brace_group(text, after_num)?;
        (format!("({})/({})", numerator, denominator), after_den)
    } else {
        let after_name = start + "\\sqrt".len();
        if text[after_name..].starts_with('[') {
            let close = after_name + text[after_name..].find(']')?;
            let degree = &text[after_name + 1..close];
            let (radicand, after) = brace_group(text, close + 1)?;
            (format!("({})^(1/({}))", radicand, degree), after)
        } else {
            let (radicand, after) = brace_group(text, after_name)?;
            (format!("sqrt({})", radicand), after)
        }
    };
    Some(format!("{}{}{}", &text[..start], replacement, &text[rest..]))
}

/// Step 2, innermost first. Working from the rightmost macro leftwards guarantees the
/// arguments of the current macro contain no further `\frac` or `\sqrt`.
fn rewrite_roots_and_fractions(input: &str) -> String {
    let mut text = input.to_string();
    let mut search_end = text.len();
    loop {
        let head = &text[..search_end];
        let Some(start) = [head.rfind("\\frac"), head.rfind("\\sqrt")]
            .into_iter()
            .flatten()
            .max()
        else {
            break;
        };
        if let Some(rewritten) = rewrite_macro_at(&text, start) {
            text = rewritten;
        }
        search_end = start;
    }
    text
}
