//! Text-transform over chained text runs.
//!
//! [§ 7.17.6 "text-transform"](https://www.w3.org/TR/xsl11/)
//!
//! "capitalize: Converts the first character of each word to uppercase.
//! Otherwise, characters are unchanged."
//!
//! Whether a character starts a word depends on the characters before it,
//! which may sit in an earlier run of the same block. The runs of a block
//! are treated as one continuous string for that lookup.

use quire_properties::EnumValue;

use crate::node::NodeId;
use crate::tree::FoTree;

/// Whether a character belongs to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordChar {
    Yes,
    No,
    /// An apostrophe: a contraction or a closing quote, depending on what
    /// precedes it.
    Maybe,
}

fn classify(c: Option<char>) -> WordChar {
    let Some(c) = c else {
        return WordChar::No;
    };
    match c {
        '\'' | '\u{2019}' => WordChar::Maybe,
        '-' | '_' | '$' | '\u{a2}' | '\u{a3}' | '\u{a5}' | '\u{20ac}' => WordChar::Yes,
        c if c.is_alphanumeric() => WordChar::Yes,
        // Combining marks continue the word they modify.
        '\u{300}'..='\u{36f}' => WordChar::Yes,
        _ => WordChar::No,
    }
}

/// The character `back` positions before index `index` of `run`, looking
/// into earlier runs of the same block when needed.
fn char_before(
    tree: &FoTree,
    run: NodeId,
    chars: &[char],
    index: usize,
    back: usize,
) -> Option<char> {
    if let Some(position) = index.checked_sub(back) {
        return chars.get(position).copied();
    }

    let mut remaining = back - index;
    let mut current = tree.text_run(run).and_then(|r| r.prev_in_block);
    while let Some(id) = current {
        let prev = tree.text_run(id)?;
        let len = prev.char_len();
        if remaining <= len {
            return prev.text.chars().nth(len - remaining);
        }
        remaining -= len;
        current = prev.prev_in_block;
    }
    None
}

/// Returns true if the character at `index` of `run` begins a word.
fn is_start_of_word(tree: &FoTree, run: NodeId, chars: &[char], index: usize) -> bool {
    match classify(char_before(tree, run, chars, index, 1)) {
        WordChar::Yes => false,
        WordChar::No => true,
        WordChar::Maybe => match classify(char_before(tree, run, chars, index, 2)) {
            WordChar::Yes => false,
            WordChar::No | WordChar::Maybe => true,
        },
    }
}

/// Rewrite the text of `run` according to `transform`.
///
/// Runs must be transformed in document order: capitalization reads the
/// already transformed text of earlier runs in the block.
pub fn apply_text_transform(tree: &mut FoTree, run: NodeId, transform: EnumValue) {
    let Some(text) = tree.as_text(run) else {
        return;
    };

    let transformed = match transform {
        EnumValue::Uppercase => text.to_uppercase(),
        EnumValue::Lowercase => text.to_lowercase(),
        EnumValue::Capitalize => {
            let chars: Vec<char> = text.chars().collect();
            let mut out = String::with_capacity(text.len());
            for (index, &c) in chars.iter().enumerate() {
                if is_start_of_word(tree, run, &chars, index) {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
            }
            out
        }
        _ => return,
    };
    tree.set_text(run, transformed);
}
