/// Scenario 4: Word Highlight
///
/// Inside a changed line pair only the differing word is wrapped in markup,
/// and removing the markup gives back the original text.
use linediff_core::{
    DiffConfig, Differ, EntryKind, Granularity, HighlightConfig, HighlightOptions, Highlighter,
    Markup,
};

#[test]
fn test_scenario_04_only_changed_word_is_wrapped() {
    // GIVEN a one-word edit and the default word-granularity highlighter
    let differ = Differ::new(DiffConfig::default()).unwrap();

    // WHEN diffing
    let script = differ.diff(&["foo bar"], &["foo baz"]).unwrap();

    // THEN the change has exactly one span, around "baz"
    let change = &script.entries()[0];
    assert_eq!(change.kind, EntryKind::Change);
    assert_eq!(change.after_text, "foo <b>baz</b>");
    assert_eq!(change.after_text.matches("<b>").count(), 1);
    assert_eq!(change.before_text, "foo <b>bar</b>");
}

#[test]
fn test_scenario_04_custom_tag_with_attributes() {
    // GIVEN a highlight tag carrying an attribute
    let config = DiffConfig::default().with_highlight(Some(HighlightConfig {
        tag: r#"<span class="hl">"#.to_string(),
        ..HighlightConfig::default()
    }));
    let differ = Differ::new(config).unwrap();

    // WHEN diffing
    let script = differ.diff(&["let x = 1;"], &["let x = 2;"]).unwrap();

    // THEN the span closes with the bare tag name
    assert_eq!(
        script.entries()[0].after_text,
        r#"let x = <span class="hl">2</span>;"#
    );
}

#[test]
fn test_scenario_04_tabs_expanded_before_highlight() {
    // GIVEN lines indented with a tab
    let differ = Differ::new(DiffConfig::default()).unwrap();

    // WHEN diffing
    let script = differ.diff(&["\tvalue = 1"], &["\tvalue = 2"]).unwrap();

    // THEN spans are computed over the expanded text
    assert_eq!(script.entries()[0].before_text, "    value = <b>1</b>");
    assert_eq!(script.entries()[0].after_text, "    value = <b>2</b>");
}

#[test]
fn test_scenario_04_escaping_precedes_markup() {
    // GIVEN HTML escaping enabled
    let differ = Differ::new(DiffConfig::default().with_escape_html(true)).unwrap();

    // WHEN the text itself contains markup characters
    let script = differ.diff(&["<a> old"], &["<a> new"]).unwrap();

    // THEN content is escaped and only the highlight markup is raw
    assert_eq!(script.entries()[0].after_text, "&lt;a&gt; <b>new</b>");
}

#[test]
fn test_scenario_04_changed_entity_stays_whole() {
    // GIVEN HTML escaping enabled
    let differ = Differ::new(DiffConfig::default().with_escape_html(true)).unwrap();

    // WHEN the changed token is itself a markup character
    let script = differ.diff(&["if a < b"], &["if a > b"]).unwrap();

    // THEN the markup wraps whole entities, never the inside of one
    assert_eq!(script.entries()[0].before_text, "if a <b>&lt;</b> b");
    assert_eq!(script.entries()[0].after_text, "if a <b>&gt;</b> b");
}

#[test]
fn test_scenario_04_escaping_without_highlight() {
    // GIVEN HTML escaping with highlighting switched off
    let config = DiffConfig::default()
        .with_escape_html(true)
        .with_highlight(None);
    let differ = Differ::new(config).unwrap();

    // WHEN diffing
    let script = differ.diff(&["a & b", "x"], &["a & b", "y"]).unwrap();

    // THEN every text is escaped and nothing is marked
    assert_eq!(script.entries()[0].after_text, "a &amp; b");
    assert_eq!(script.entries()[1].after_text, "y");
}

#[test]
fn test_scenario_04_char_granularity_direct() {
    // GIVEN a char-level highlighter with custom markers
    let highlighter = Highlighter::new(
        HighlightOptions::new(Markup::new("[", "]")).with_granularity(Granularity::Char),
    );

    // WHEN highlighting a one-letter edit
    let (before, after) = highlighter.highlight_pair("colour", "color").unwrap();

    // THEN only the removed letter is marked
    assert_eq!(before, "colo[u]r");
    assert_eq!(after, "color");
}
