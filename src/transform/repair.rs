//! SafetyRepair: protective separators between ambiguous neighbours
//!
//! One left-to-right scan over the fragment sequence. At each adjacent pair
//! (A = last emitted fragment, B = next fragment) the rules below are tried
//! in order; the first match inserts a separator fragment between A and B.
//!
//! | Rule | A | B | Separator |
//! |------|---|---|-----------|
//! | `command-call` | closes command | starts with `(` or `[` | `" "` |
//! | `command-chain` | closes command | opens command or starts with `#` | `" "` |
//! | `command-field` | closes command | starts with `.ident` | `" "` |
//! | `raw-chain` | closes inline raw | opens inline raw | `" "` |
//! | `marker-call` | closes marker | starts with `(` | `" "` |
//! | `marker-merge` | closes marker m | opens marker n | `"~"` if m = n, else `" "` |
//! | `marker-word` | marker between word characters | | `" "` |
//! | `marker-space-marker` | `m ` tail | opens m | `"#[]"` |
//!
//! Separator fragments never take part in a rule, neither as A nor as B.
//! A second pass therefore finds every repaired pair already split and
//! inserts nothing: `repair(repair(x)) == repair(x)`.

use crate::debug::{DebugRecord, DebugSink, NoopSink};
use crate::fragment::{Delim, Fragment, Marker};

/// Rule that fired for a repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairRule {
    CommandCall,
    CommandChain,
    CommandField,
    RawChain,
    MarkerCall,
    MarkerMerge,
    MarkerWord,
    MarkerSpaceMarker,
}

impl RepairRule {
    impl_variant_names!(
        CommandCall => "command-call",
        CommandChain => "command-chain",
        CommandField => "command-field",
        RawChain => "raw-chain",
        MarkerCall => "marker-call",
        MarkerMerge => "marker-merge",
        MarkerWord => "marker-word",
        MarkerSpaceMarker => "marker-space-marker",
    );

    /// Rules that guard bracketed commands
    pub fn is_command_rule(self) -> bool {
        matches!(self, Self::CommandCall | Self::CommandChain | Self::CommandField)
    }
}

/// Repair without recording decisions
pub fn repair(fragments: Vec<Fragment>) -> Vec<Fragment> {
    repair_with(fragments, &NoopSink)
}

/// Repair, reporting every inserted separator to `sink`.
///
/// Empty fragments are dropped; they carry no text and would hide
/// adjacency.
pub fn repair_with(fragments: Vec<Fragment>, sink: &dyn DebugSink) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::with_capacity(fragments.len() + fragments.len() / 8);
    let mut iter = fragments.into_iter().filter(|f| !f.is_empty()).peekable();

    while let Some(frag) = iter.next() {
        if let Some((rule, separator)) = check(&out, &frag, iter.peek()) {
            out.push(Fragment::separator(separator));
            if sink.is_enabled() {
                sink.record(DebugRecord::Repair { position: out.len() - 1, rule, separator });
            }
        }
        out.push(frag);
    }

    out
}

/// Rule and separator for the pair (`out.last()`, `b`), with `next` as
/// lookahead
fn check(out: &[Fragment], b: &Fragment, next: Option<&Fragment>) -> Option<(RepairRule, &'static str)> {
    let a = out.last()?;
    if a.is_separator() || b.is_separator() {
        return None;
    }
    let first = b.first_char()?;

    if a.closes_command() {
        if matches!(first, '(' | '[') {
            return Some((RepairRule::CommandCall, " "));
        }
        if b.opens_command() || first == '#' {
            return Some((RepairRule::CommandChain, " "));
        }
        if first == '.' && b.content[1..].chars().next().is_some_and(is_ident) {
            return Some((RepairRule::CommandField, " "));
        }
    }

    if a.closes == Some(Delim::Raw) && b.opens == Some(Delim::Raw) {
        return Some((RepairRule::RawChain, " "));
    }

    if let Some(closed) = a.closes_marker() {
        if first == '(' {
            return Some((RepairRule::MarkerCall, " "));
        }
        if let Some(opened) = b.opens_marker() {
            let separator = if closed == opened { "~" } else { " " };
            return Some((RepairRule::MarkerMerge, separator));
        }
        let before = out.len().checked_sub(2).and_then(|i| out[i].last_char());
        if before.is_some_and(is_word) && is_word(first) {
            return Some((RepairRule::MarkerWord, " "));
        }
    }

    if let Some(opened) = b.opens_marker() {
        let after = next.and_then(Fragment::first_char);
        if a.last_char().is_some_and(is_word) && after.is_some_and(is_word) {
            return Some((RepairRule::MarkerWord, " "));
        }
        if a.as_str() == " " && out.len() >= 2 && touches_marker(&out[out.len() - 2], opened) {
            return Some((RepairRule::MarkerSpaceMarker, "#[]"));
        }
    }

    None
}

fn touches_marker(frag: &Fragment, marker: Marker) -> bool {
    frag.opens_marker() == Some(marker) || frag.closes_marker() == Some(marker)
}

/// Characters that make a neighbouring marker literal
fn is_word(c: char) -> bool {
    c.is_alphanumeric()
}

fn is_ident(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::MemorySink;

    fn joined(frags: &[Fragment]) -> String {
        frags.iter().map(Fragment::as_str).collect()
    }

    fn strong(text: &str) -> [Fragment; 3] {
        [
            Fragment::marker_open(Marker::Strong),
            Fragment::text(text),
            Fragment::marker_close(Marker::Strong),
        ]
    }

    fn underline(text: &str) -> [Fragment; 3] {
        [Fragment::command_open("#underline["), Fragment::text(text), Fragment::command_close()]
    }

    #[test]
    fn test_command_followed_by_paren() {
        let mut frags = underline("x").to_vec();
        frags.push(Fragment::text("(note)"));
        assert_eq!(joined(&repair(frags)), "#underline[x] (note)");
    }

    #[test]
    fn test_command_chain() {
        let mut frags = underline("a").to_vec();
        frags.extend(underline("b"));
        assert_eq!(joined(&repair(frags)), "#underline[a] #underline[b]");
    }

    #[test]
    fn test_command_field() {
        let mut frags = underline("a").to_vec();
        frags.push(Fragment::text(".b"));
        assert_eq!(joined(&repair(frags.clone())), "#underline[a] .b");

        frags.pop();
        frags.push(Fragment::text(". b"));
        assert_eq!(joined(&repair(frags)), "#underline[a]. b");
    }

    #[test]
    fn test_command_before_word_untouched() {
        let mut frags = vec![Fragment::text("H")];
        frags.extend([Fragment::command_open("#sub["), Fragment::text("2"), Fragment::command_close()]);
        frags.push(Fragment::text("O"));
        assert_eq!(joined(&repair(frags)), "H#sub[2]O");
    }

    #[test]
    fn test_raw_chain() {
        let frags = vec![Fragment::raw_inline("`a`"), Fragment::raw_inline("`b`")];
        assert_eq!(joined(&repair(frags)), "`a` `b`");
    }

    #[test]
    fn test_marker_call() {
        let mut frags = vec![Fragment::text("Szczecinie")];
        frags.extend(strong("testtest"));
        frags.push(Fragment::text("(dalej)"));
        assert_eq!(joined(&repair(frags)), "Szczecinie *testtest* (dalej)");
    }

    #[test]
    fn test_marker_merge() {
        let mut frags = strong("text1").to_vec();
        frags.extend(strong("text2"));
        assert_eq!(joined(&repair(frags)), "*text1*~*text2*");

        let mut frags = strong("a").to_vec();
        frags.extend([
            Fragment::marker_open(Marker::Emph),
            Fragment::text("b"),
            Fragment::marker_close(Marker::Emph),
        ]);
        assert_eq!(joined(&repair(frags)), "*a* _b_");
    }

    #[test]
    fn test_marker_word() {
        let mut frags = vec![Fragment::text("foo")];
        frags.extend(strong("bar"));
        frags.push(Fragment::text("baz"));
        assert_eq!(joined(&repair(frags)), "foo *bar* baz");
    }

    #[test]
    fn test_marker_word_needs_word_on_both_sides() {
        let mut frags = vec![Fragment::text("foo ")];
        frags.extend(strong("bar"));
        frags.push(Fragment::text(", baz"));
        assert_eq!(joined(&repair(frags)), "foo *bar*, baz");

        // marker followed by whitespace content stays attached
        let mut frags = vec![Fragment::text("a")];
        frags.extend(strong(" b"));
        assert_eq!(joined(&repair(frags)), "a* b*");
    }

    #[test]
    fn test_marker_space_marker() {
        let mut frags = strong("a").to_vec();
        frags.push(Fragment::text(" "));
        frags.extend(strong("b"));
        assert_eq!(joined(&repair(frags)), "*a* #[]*b*");
    }

    #[test]
    fn test_idempotent() {
        let mut frags = vec![Fragment::text("x")];
        frags.extend(strong("a"));
        frags.extend(strong("b"));
        frags.extend(underline("c"));
        frags.push(Fragment::text("(d)"));
        frags.extend(strong("e"));
        frags.push(Fragment::text(" "));
        frags.extend(strong("f"));

        let once = repair(frags);
        let twice = repair(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_fragments_dropped() {
        let mut frags = underline("a").to_vec();
        frags.push(Fragment::text(""));
        frags.push(Fragment::text("(b)"));
        let repaired = repair(frags);
        assert!(repaired.iter().all(|f| !f.is_empty()));
        assert_eq!(joined(&repaired), "#underline[a] (b)");
    }

    #[test]
    fn test_records_repairs() {
        let sink = MemorySink::new();
        let mut frags = strong("a").to_vec();
        frags.push(Fragment::text("(b)"));
        let repaired = repair_with(frags, &sink);

        let records = sink.records();
        assert_eq!(
            records,
            vec![DebugRecord::Repair { position: 3, rule: RepairRule::MarkerCall, separator: " " }]
        );
        assert!(repaired[3].is_separator());
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(RepairRule::CommandCall.name(), "command-call");
        assert_eq!(RepairRule::MarkerSpaceMarker.name(), "marker-space-marker");
        assert!(RepairRule::CommandField.is_command_rule());
        assert!(!RepairRule::MarkerWord.is_command_rule());
    }
}
