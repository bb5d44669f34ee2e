use tinct::{clean, strip, visible_len, Error, StyleSpec, Styler, Theme};

#[test]
fn custom_style_end_to_end() {
    let mut styler = Styler::new();
    styler
        .create("warn", StyleSpec::new().fg("yellow").look("bold"))
        .unwrap();

    assert_eq!(
        styler.format("<warn>careful</warn>"),
        "\x1b[33;1mcareful\x1b[0m"
    );

    styler.disable();
    assert_eq!(styler.format("<warn>careful</warn>"), "careful");
}

#[test]
fn disabled_format_equals_strip() {
    let mut styler = Styler::new();
    styler.disable();

    for markup in [
        "<red>a</red>",
        "<red><bold>a</bold>b</red>",
        "plain",
        "<unknown>x</unknown>",
        "<#FF5733>hex</#FF5733> and <@red>bg</@red>",
    ] {
        assert_eq!(styler.format(markup), strip(markup), "markup: {}", markup);
    }
}

#[test]
fn enabled_and_disabled_agree_on_visible_text() {
    let mut styler = Styler::new();
    let markup = "<green>ok</green>: <bold>3</bold> passed";

    let rendered = styler.format(markup);
    styler.disable();
    let plain = styler.format(markup);

    assert_eq!(clean(&rendered), plain);
    assert_eq!(visible_len(&rendered), plain.len());
}

#[test]
fn theme_switching_and_shadowing() {
    let mut styler = Styler::new();
    styler.set_theme(Theme::dark()).unwrap();
    assert_eq!(
        styler.format("<error>x</error>"),
        "\x1b[91;1mx\x1b[0m"
    );

    // A custom style shadows the theme entry until deleted.
    styler
        .create("error", StyleSpec::new().fg("magenta"))
        .unwrap();
    assert_eq!(styler.format("<error>x</error>"), "\x1b[35mx\x1b[0m");
    styler.delete("error");
    assert_eq!(
        styler.format("<error>x</error>"),
        "\x1b[91;1mx\x1b[0m"
    );
}

#[test]
fn unknown_theme_is_an_error() {
    assert!(matches!(
        Theme::named("gruvbox"),
        Err(Error::UnknownTheme(_))
    ));
}

#[test]
fn temporary_style_scoping() {
    let mut styler = Styler::new();
    let rendered = styler
        .with_temporary("hint", StyleSpec::new().fg("cyan").look("italic"), |s| {
            s.format("<hint>try --help</hint>")
        })
        .unwrap();
    assert_eq!(rendered, "\x1b[36;3mtry --help\x1b[0m");

    // Outside the scope the tag is unknown again and stays literal.
    assert_eq!(styler.format("<hint>gone</hint>"), "<hint>gone</hint>");
}

#[test]
fn hex_tags_need_no_registration() {
    let styler = Styler::new();
    assert_eq!(
        styler.format("<#3498db>sky</#3498db>"),
        "\x1b[38;2;52;152;219msky\x1b[0m"
    );
    assert_eq!(
        styler.format("<@#1a1a1a>ink</@#1a1a1a>"),
        "\x1b[48;2;26;26;26mink\x1b[0m"
    );
}

#[test]
fn style_api_respects_enable_state() {
    let mut styler = Styler::new();
    let spec = StyleSpec::new().fg("red").bg("white").look("underline");

    assert_eq!(styler.style("x", &spec).unwrap(), "\x1b[31;47;4mx\x1b[0m");

    styler.disable();
    assert_eq!(styler.style("x", &spec).unwrap(), "x");
}

#[test]
fn generated_palette_flows_into_markup() {
    use tinct::palette::{generate_theme_palette, ThemePaletteConfig};

    let mut styler = Styler::new();
    let palette = generate_theme_palette(
        &ThemePaletteConfig::new().base_color("#3498db"),
    )
    .unwrap();
    styler.apply_palette_theme(&palette).unwrap();

    let out = styler.format("<primary>p</primary> <error>e</error>");
    // Both slots render as 24-bit foreground colors.
    assert_eq!(out.matches("38;2;").count(), 2);
    assert_eq!(clean(&out), "p e");
}
