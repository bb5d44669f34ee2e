use std::collections::HashMap;
use tinct_markup::{clean, strip, visible_len, MarkupRenderer, StyleSpec};

fn test_styles() -> HashMap<String, StyleSpec> {
    let mut styles = HashMap::new();
    styles.insert("error".to_string(), StyleSpec::new().fg("red").look("bold"));
    styles.insert("note".to_string(), StyleSpec::new().fg("cyan"));
    styles.insert("em".to_string(), StyleSpec::new().look("italic"));
    styles
}

#[test]
fn full_pipeline_render_strip_clean() {
    let styles = test_styles();
    let renderer = MarkupRenderer::new(&styles);
    let input = "<error>failed</error> to open <note>config.toml</note>";

    let rendered = renderer.render(input);
    assert!(rendered.contains("\x1b[31;1mfailed\x1b[0m"));
    assert!(rendered.contains("\x1b[36mconfig.toml\x1b[0m"));

    // strip on the markup and clean on the rendering meet at the same text
    let plain = "failed to open config.toml";
    assert_eq!(strip(input), plain);
    assert_eq!(clean(&rendered), plain);
    assert_eq!(visible_len(&rendered), plain.len());
}

#[test]
fn mixed_tag_kinds_in_one_message() {
    let styles = test_styles();
    let renderer = MarkupRenderer::new(&styles);
    let input = "<#FF5733>orange</#FF5733> on <@#222222>dark</@#222222> with <@blue>blue bg</@blue>";

    let rendered = renderer.render(input);
    assert!(rendered.contains("\x1b[38;2;255;87;51morange\x1b[0m"));
    assert!(rendered.contains("\x1b[48;2;34;34;34mdark\x1b[0m"));
    assert!(rendered.contains("\x1b[44mblue bg\x1b[0m"));
}

#[test]
fn nesting_restores_outer_style_across_crate_boundary() {
    let styles = test_styles();
    let renderer = MarkupRenderer::new(&styles);

    let rendered = renderer.render("<note>see <em>this</em> file</note>");
    // After the italic span resets, cyan is reapplied for " file".
    assert_eq!(
        rendered,
        "\x1b[36msee \x1b[36;3mthis\x1b[0m\x1b[36m file\x1b[0m"
    );
}

#[test]
fn malformed_markup_passes_through() {
    let styles = test_styles();
    let renderer = MarkupRenderer::new(&styles);

    for input in [
        "<error>no close",
        "<error>wrong</note>",
        "<unknown>tag</unknown>",
        "a < b > c",
        "</error>",
    ] {
        assert_eq!(renderer.render(input), input);
    }
}

#[test]
fn escapes_survive_rendering_and_strip() {
    let styles = test_styles();
    let renderer = MarkupRenderer::new(&styles);

    let rendered = renderer.render(r"literal \<error> tag");
    assert_eq!(rendered, "literal <error> tag");

    // strip works on the raw markup form; the escaped form has no tag shape
    // until rendering resolves the backslashes.
    assert_eq!(strip("literal <error> tag"), "literal  tag");
}
