/*!
 * Cloze rendering properties: every case-insensitive occurrence blanked,
 * user input never interpreted as a pattern.
 */

use tuvung::review::{CLOZE_BLANK, render_cloze};

#[test]
fn test_renderCloze_everyOccurrence_shouldBecomeExactlyOneBlank() {
    let cloze = render_cloze("Time after time after TIME.", "time");
    assert_eq!(cloze, "_____ after _____ after _____.");
    assert_eq!(cloze.matches(CLOZE_BLANK).count(), 3);
}

#[test]
fn test_renderCloze_shouldPreserveSurroundingPunctuation() {
    assert_eq!(render_cloze("\"apple\", she said.", "apple"), "\"_____\", she said.");
}

#[test]
fn test_renderCloze_regexMetacharacters_shouldNotBeInterpreted() {
    // A dot must not match arbitrary characters.
    assert_eq!(render_cloze("abc a.c", "a.c"), "abc _____");
    // Parens, plus, star, brackets must match themselves.
    assert_eq!(render_cloze("f(x)+1 [ok]*", "f(x)+1"), "_____ [ok]*");
    assert_eq!(render_cloze("f(x)+1 [ok]*", "[ok]*"), "f(x)+1 _____");
}

#[test]
fn test_renderCloze_wordAbsentFromContext_shouldLeaveContextUnchanged() {
    assert_eq!(render_cloze("Nothing to hide.", "apple"), "Nothing to hide.");
}

#[test]
fn test_renderCloze_unicodeWord_shouldMatchCaseInsensitively() {
    assert_eq!(render_cloze("Mèo is mèo.", "mèo"), "_____ is _____.");
}

#[test]
fn test_renderCloze_overlappingOccurrences_shouldReplaceLeftToRight() {
    // No special casing across word boundaries: matches are found
    // left-to-right and do not overlap.
    assert_eq!(render_cloze("aaa", "aa"), "_____a");
}
