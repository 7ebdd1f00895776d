//! Whitespace handling.
//!
//! [§ 7.16.7 "linefeed-treatment"](https://www.w3.org/TR/xsl11/),
//! [§ 7.16.8 "white-space-treatment"](https://www.w3.org/TR/xsl11/),
//! [§ 7.16.12 "white-space-collapse"](https://www.w3.org/TR/xsl11/)
//!
//! The text runs of one block are processed in segments. A segment ends
//! where a block-level child starts (a line boundary), where an atomic inline
//! child such as `fo:character` sits in the text, or where the block itself
//! ends. Each segment is handled as one string, so spaces collapse across
//! run boundaries, and the results are written back run by run. Runs that
//! lose all their characters stay in the tree with empty text.

use std::collections::HashMap;

use quire_fotree::{FoTree, NodeId, NodeKind};
use quire_properties::{EnumValue, PropertyId, PropertyList};

const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// The whitespace properties in effect for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Settings {
    linefeed: EnumValue,
    treatment: EnumValue,
    collapse: bool,
}

impl Settings {
    fn of(list: Option<&PropertyList>) -> Self {
        let keyword = |id: PropertyId, fallback: EnumValue| {
            list.and_then(|list| {
                list.get(id)
                    .inspect_err(|error| {
                        log::debug!(target: "quire::whitespace", "{id} falls back to its initial value: {error}");
                    })
                    .ok()
            })
            .and_then(|value| value.as_enum())
            .unwrap_or(fallback)
        };
        Self {
            linefeed: keyword(PropertyId::LinefeedTreatment, EnumValue::TreatAsSpace),
            treatment: keyword(
                PropertyId::WhiteSpaceTreatment,
                EnumValue::IgnoreIfSurroundingLinefeed,
            ),
            collapse: keyword(PropertyId::WhiteSpaceCollapse, EnumValue::True) == EnumValue::True,
        }
    }
}

/// What ends a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// A block-level child starts a new line.
    Block,
    /// An atomic inline child sits between two pieces of text.
    Inline,
    /// The block ends.
    End,
}

#[derive(Debug, Clone, Copy)]
struct BlockState {
    /// The last run already processed.
    processed: Option<NodeId>,
    /// Whether the next segment begins a line.
    at_line_start: bool,
}

impl Default for BlockState {
    fn default() -> Self {
        Self {
            processed: None,
            at_line_start: true,
        }
    }
}

/// Inline children that produce content of their own and so separate the
/// text around them.
const fn is_atomic_inline(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Character
            | NodeKind::ExternalGraphic
            | NodeKind::InstreamForeignObject
            | NodeKind::InlineContainer
            | NodeKind::Leader
            | NodeKind::PageNumber
            | NodeKind::PageNumberCitation
    )
}

/// Tracks the segment state of every open block.
#[derive(Debug, Default)]
pub struct WhitespaceHandler {
    blocks: HashMap<NodeId, BlockState>,
}

impl WhitespaceHandler {
    /// A handler with no open blocks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A child of kind `child` was appended to `parent`, after any pending
    /// text of `parent` was flushed.
    pub fn child_appended(&mut self, tree: &mut FoTree, parent: NodeId, child: NodeKind) {
        let Some(block) = tree.nearest_block(parent) else {
            return;
        };
        if child.is_block_level() {
            self.process(tree, block, Boundary::Block);
        } else if is_atomic_inline(child) {
            self.process(tree, block, Boundary::Inline);
        }
    }

    /// `node` ended after its final flush. Block-like nodes get their
    /// terminal pass.
    pub fn node_ended(&mut self, tree: &mut FoTree, node: NodeId) {
        if tree.kind(node).is_some_and(NodeKind::is_block_like) {
            self.process(tree, node, Boundary::End);
            let _ = self.blocks.remove(&node);
        }
    }

    fn process(&mut self, tree: &mut FoTree, block: NodeId, boundary: Boundary) {
        let state = self.blocks.entry(block).or_default();

        let first = match state.processed {
            Some(last) => tree.text_run(last).and_then(|run| run.next_in_block),
            None => tree.runs_in_block(block).next(),
        };
        let runs: Vec<NodeId> = first
            .map(|first| {
                core::iter::successors(Some(first), |&id| {
                    tree.text_run(id).and_then(|run| run.next_in_block)
                })
                .collect()
            })
            .unwrap_or_default();

        if let Some(&last) = runs.last() {
            let settings = Settings::of(tree.properties(block).map(AsRef::as_ref));
            let texts: Vec<String> = runs
                .iter()
                .map(|&id| tree.as_text(id).unwrap_or_default().to_string())
                .collect();
            let trim_trailing = boundary != Boundary::Inline;
            let rewritten = normalize_segment(&texts, settings, state.at_line_start, trim_trailing);
            for (&id, text) in runs.iter().zip(rewritten) {
                tree.set_text(id, text);
            }
            state.processed = Some(last);
        }

        state.at_line_start = boundary != Boundary::Inline;
    }
}

/// Apply the whitespace properties to the runs of one segment.
fn normalize_segment(
    texts: &[String],
    settings: Settings,
    trim_leading: bool,
    trim_trailing: bool,
) -> Vec<String> {
    let owners: Vec<usize> = texts
        .iter()
        .enumerate()
        .flat_map(|(index, text)| core::iter::repeat_n(index, text.chars().count()))
        .collect();
    let mut slots: Vec<Option<char>> = texts
        .iter()
        .flat_map(|text| text.chars())
        .map(|c| map_char(c, settings))
        .collect();

    apply_treatment(&mut slots, settings.treatment);
    if settings.collapse {
        collapse(&mut slots);
    }
    if settings.treatment != EnumValue::Preserve {
        if trim_leading {
            trim(slots.iter_mut());
        }
        if trim_trailing {
            trim(slots.iter_mut().rev());
        }
    }

    let mut out = vec![String::new(); texts.len()];
    for (owner, slot) in owners.into_iter().zip(slots) {
        if let Some(c) = slot {
            out[owner].push(c);
        }
    }
    out
}

/// Linefeeds per `linefeed-treatment`; other whitespace becomes a space
/// unless it is preserved.
fn map_char(c: char, settings: Settings) -> Option<char> {
    match c {
        '\n' => match settings.linefeed {
            EnumValue::Ignore => None,
            EnumValue::Preserve => Some('\n'),
            EnumValue::TreatAsZeroWidthSpace => Some(ZERO_WIDTH_SPACE),
            _ => Some(' '),
        },
        '\t' | '\r' if settings.treatment != EnumValue::Preserve => Some(' '),
        c => Some(c),
    }
}

/// For every slot, the nearest kept character that is not a space, looking
/// in one direction. Built in a single pass.
fn nearest_non_space<'a>(slots: impl Iterator<Item = &'a Option<char>>) -> Vec<Option<char>> {
    let mut seen = None;
    slots
        .map(|slot| {
            let nearest = seen;
            if let Some(c) = slot.filter(|&c| c != ' ') {
                seen = Some(c);
            }
            nearest
        })
        .collect()
}

fn apply_treatment(slots: &mut [Option<char>], treatment: EnumValue) {
    let (before, after) = match treatment {
        EnumValue::Ignore => {
            for slot in slots.iter_mut() {
                if *slot == Some(' ') {
                    *slot = None;
                }
            }
            return;
        }
        EnumValue::IgnoreIfBeforeLinefeed => (true, false),
        EnumValue::IgnoreIfAfterLinefeed => (false, true),
        EnumValue::IgnoreIfSurroundingLinefeed => (true, true),
        _ => return,
    };

    let left = nearest_non_space(slots.iter());
    let mut right = nearest_non_space(slots.iter().rev());
    right.reverse();

    for (i, slot) in slots.iter_mut().enumerate() {
        let removable = *slot == Some(' ')
            && ((before && right[i] == Some('\n')) || (after && left[i] == Some('\n')));
        if removable {
            *slot = None;
        }
    }
}

/// Collapse runs of spaces to one and drop spaces next to a linefeed.
fn collapse(slots: &mut [Option<char>]) {
    let mut previous = None;
    for slot in slots.iter_mut() {
        match *slot {
            Some(' ') if matches!(previous, Some(' ' | '\n')) => *slot = None,
            Some(c) => previous = Some(c),
            None => {}
        }
    }

    let mut next = None;
    for slot in slots.iter_mut().rev() {
        match *slot {
            Some(' ') if next == Some('\n') => *slot = None,
            Some(c) => next = Some(c),
            None => {}
        }
    }
}

/// Remove spaces until the first kept character that is not a space.
fn trim<'a>(slots: impl Iterator<Item = &'a mut Option<char>>) {
    for slot in slots {
        match *slot {
            Some(' ') => *slot = None,
            Some(_) => break,
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: Settings = Settings {
        linefeed: EnumValue::TreatAsSpace,
        treatment: EnumValue::IgnoreIfSurroundingLinefeed,
        collapse: true,
    };

    fn run(texts: &[&str], settings: Settings) -> Vec<String> {
        let texts: Vec<String> = texts.iter().map(ToString::to_string).collect();
        normalize_segment(&texts, settings, true, true)
    }

    #[test]
    fn test_default_collapses_and_trims() {
        assert_eq!(run(&["  Hello \n  world  "], DEFAULTS), ["Hello world"]);
    }

    #[test]
    fn test_collapse_across_runs() {
        assert_eq!(run(&["a  ", " b "], DEFAULTS), ["a ", "b"]);
        assert_eq!(run(&["a", "   ", "b"], DEFAULTS), ["a", " ", "b"]);
    }

    #[test]
    fn test_preserved_linefeeds_drop_surrounding_spaces() {
        let settings = Settings {
            linefeed: EnumValue::Preserve,
            ..DEFAULTS
        };
        assert_eq!(run(&["one  \n  two"], settings), ["one\ntwo"]);
    }

    #[test]
    fn test_preserve_everything() {
        let settings = Settings {
            linefeed: EnumValue::Preserve,
            treatment: EnumValue::Preserve,
            collapse: false,
        };
        assert_eq!(run(&[" a \t b \n"], settings), [" a \t b \n"]);
    }

    #[test]
    fn test_ignore_linefeeds_and_spaces() {
        let settings = Settings {
            linefeed: EnumValue::Ignore,
            treatment: EnumValue::Ignore,
            collapse: true,
        };
        assert_eq!(run(&["a b\nc"], settings), ["abc"]);
    }

    #[test]
    fn test_linefeed_neighbours_across_long_space_run() {
        let settings = Settings {
            linefeed: EnumValue::Preserve,
            collapse: false,
            ..DEFAULTS
        };
        let text = format!("a{}\n{}b", " ".repeat(50_000), " ".repeat(50_000));
        assert_eq!(run(&[&text], settings), ["a\nb"]);

        let text = format!("a{}b", " ".repeat(100_000));
        let kept = run(&[&text], Settings { collapse: false, ..DEFAULTS });
        assert_eq!(kept[0].len(), 100_002);
    }

    #[test]
    fn test_whitespace_only_segment_empties() {
        assert_eq!(run(&["   ", "\n"], DEFAULTS), ["", ""]);
    }
}
