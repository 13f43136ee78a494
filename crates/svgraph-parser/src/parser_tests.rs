//! Unit tests for the markup parser.

use proptest::prelude::*;

use crate::{
    error::{ErrorCode, ParseError},
    parse, parse_bytes,
};

/// Parse and panic with the rendered error on failure
fn parse_ok(source: &str) -> crate::Document {
    match parse(source) {
        Ok(document) => document,
        Err(err) => panic!("Expected parsing to succeed, but got error: {err}"),
    }
}

/// Parse, expect failure, and return the first diagnostic's code
fn first_code(err: &ParseError) -> Option<ErrorCode> {
    err.diagnostics().first().and_then(|d| d.code())
}

fn parse_err(source: &str) -> ParseError {
    match parse(source) {
        Ok(document) => panic!(
            "Expected parsing to fail, but got {} elements",
            document.len()
        ),
        Err(err) => err,
    }
}

#[test]
fn test_single_text_element() {
    let doc = parse_ok(r#"<svg><text x="10" y="20" font-size="12">Hello</text></svg>"#);

    assert_eq!(doc.len(), 2);
    let text = &doc.elements()[1];
    assert_eq!(text.tag(), "text");
    assert_eq!(text.text(), "Hello");
    assert_eq!(text.attribute("x"), Some("10"));
    assert_eq!(text.attribute("y"), Some("20"));
    assert_eq!(text.attribute("font-size"), Some("12"));
}

#[test]
fn test_document_order_is_preserved() {
    let doc = parse_ok(
        r#"<svg>
            <g id="layer"><text>one</text><path d="M0 0"/></g>
            <text>two</text>
        </svg>"#,
    );

    let tags: Vec<_> = doc.elements().iter().map(|el| el.tag()).collect();
    assert_eq!(tags, vec!["svg", "g", "text", "path", "text"]);
}

#[test]
fn test_self_closing_has_empty_text() {
    let doc = parse_ok(r#"<svg><path d="M0 0 L10 10" marker-end="url(#arrow)"/></svg>"#);

    let path = &doc.elements()[1];
    assert_eq!(path.text(), "");
    assert_eq!(path.attribute("d"), Some("M0 0 L10 10"));
    assert_eq!(path.attribute("marker-end"), Some("url(#arrow)"));
}

#[test]
fn test_text_only_collects_direct_children() {
    let doc = parse_ok("<svg><text>Hello <tspan>big</tspan>world</text></svg>");

    assert_eq!(doc.elements()[1].text(), "Hello world");
    assert_eq!(doc.elements()[2].tag(), "tspan");
    assert_eq!(doc.elements()[2].text(), "big");
}

#[test]
fn test_text_is_kept_verbatim() {
    let doc = parse_ok("<svg><text>  padded label </text></svg>");

    assert_eq!(doc.elements()[1].text(), "  padded label ");
}

#[test]
fn test_entities_and_cdata_are_decoded() {
    let doc = parse_ok(r#"<svg><text title="a &amp; b">x &lt; y<![CDATA[ & z]]></text></svg>"#);

    let text = &doc.elements()[1];
    assert_eq!(text.attribute("title"), Some("a & b"));
    assert_eq!(text.text(), "x < y & z");
}

#[test]
fn test_prolog_and_comments_are_skipped() {
    let doc = parse_ok(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- generated -->
<svg><!-- inner --><text>kept</text></svg>"#,
    );

    assert_eq!(doc.len(), 2);
    assert_eq!(doc.root().map(|el| el.tag()), Some("svg"));
    assert_eq!(doc.elements()[1].text(), "kept");
}

#[test]
fn test_unknown_and_prefixed_tags_are_retained() {
    let doc = parse_ok(
        r##"<svg xmlns:xlink="http://www.w3.org/1999/xlink"><custom-shape/><use xlink:href="#a"/></svg>"##,
    );

    assert_eq!(doc.elements()[1].tag(), "custom-shape");
    assert_eq!(doc.elements()[2].attribute("xlink:href"), Some("#a"));
}

#[test]
fn test_parent_and_depth() {
    let doc = parse_ok("<svg><g><text>t</text></g></svg>");
    let ids: Vec<_> = doc.iter().map(|(id, _)| id).collect();

    assert_eq!(doc.elements()[0].parent(), None);
    assert_eq!(doc.elements()[0].depth(), 0);
    assert_eq!(doc.elements()[1].parent(), Some(ids[0]));
    assert_eq!(doc.elements()[2].parent(), Some(ids[1]));
    assert_eq!(doc.elements()[2].depth(), 2);
}

#[test]
fn test_element_span_points_at_start_tag() {
    let source = r#"<svg><text x="1">a</text></svg>"#;
    let doc = parse_ok(source);

    let span = doc.elements()[1].span();
    assert_eq!(span.start(), 5);
    assert!(source[span.start()..span.end()].starts_with("<text"));
}

#[test]
fn test_source_is_kept() {
    let source = "<svg/>";
    assert_eq!(parse_ok(source).source(), source);
}

#[test]
fn test_mismatched_closing_tag() {
    let err = parse_err("<svg><g></text></svg>");

    assert_eq!(first_code(&err), Some(ErrorCode::E100));
    let labels = err.diagnostics()[0].labels();
    assert_eq!(labels.len(), 2);
    assert!(labels[1].message().contains("<g>"));
}

#[test]
fn test_unclosed_element() {
    let err = parse_err("<svg><text>Hello</text>");

    assert_eq!(first_code(&err), Some(ErrorCode::E101));
    assert!(err.to_string().contains("`svg`"));
}

#[test]
fn test_every_unclosed_element_is_reported() {
    let err = parse_err("<svg><g><text>Hello");

    assert_eq!(err.diagnostics().len(), 3);
    assert!(err.diagnostics()[0].message().contains("`text`"));
    assert!(err.diagnostics()[2].message().contains("`svg`"));
}

#[test]
fn test_unterminated_tag_fails() {
    let err = parse_err(r#"<svg><text x="10""#);

    assert_eq!(first_code(&err), Some(ErrorCode::E002));
}

#[test]
fn test_unterminated_closing_tag_is_reported_at_the_tag() {
    let source = r#"<svg><text x="10">Hello</text"#;
    let err = parse_err(source);

    assert_eq!(first_code(&err), Some(ErrorCode::E002));
    let span = err.diagnostics()[0].labels()[0].span();
    assert!(span.end() <= source.len());
    assert!(span.end() > source.find("</text").unwrap());
}

#[test]
fn test_unterminated_final_closing_tag_fails() {
    let err = parse_err("<svg></svg");

    assert_eq!(first_code(&err), Some(ErrorCode::E002));
}

#[test]
fn test_broken_final_closing_tag_fails() {
    let err = parse_err("<svg><text>a</text></svg<");

    assert_eq!(first_code(&err), Some(ErrorCode::E002));
}

#[test]
fn test_trailing_partial_tag_fails() {
    let err = parse_err("<svg/><");

    assert_eq!(first_code(&err), Some(ErrorCode::E002));
}

#[test]
fn test_second_root_element_fails() {
    let err = parse_err("<a/><b/>");

    assert_eq!(first_code(&err), Some(ErrorCode::E104));
    let labels = err.diagnostics()[0].labels();
    assert_eq!(labels[0].span().start(), 4);
    assert_eq!(labels[1].span().start(), 0);
}

#[test]
fn test_text_after_root_fails() {
    let err = parse_err("<svg/>junk");

    assert_eq!(first_code(&err), Some(ErrorCode::E104));
}

#[test]
fn test_text_before_root_fails() {
    assert_eq!(first_code(&parse_err("junk<svg/>")), Some(ErrorCode::E104));
}

#[test]
fn test_whitespace_around_root_is_allowed() {
    let doc = parse_ok("\n  <svg><text>a</text></svg>\n\n");

    assert_eq!(doc.len(), 2);
}

#[test]
fn test_stray_closing_tag_fails() {
    let err = parse_err("</svg>");

    assert!(matches!(
        first_code(&err),
        Some(ErrorCode::E102 | ErrorCode::E002)
    ));
}

#[test]
fn test_duplicate_attribute_fails() {
    let err = parse_err(r#"<svg><text x="1" x="2">a</text></svg>"#);

    assert_eq!(first_code(&err), Some(ErrorCode::E003));
}

#[test]
fn test_unknown_entity_fails() {
    let err = parse_err("<svg><text>a &nope; b</text></svg>");

    assert_eq!(first_code(&err), Some(ErrorCode::E004));
}

#[test]
fn test_empty_input_fails() {
    assert_eq!(first_code(&parse_err("")), Some(ErrorCode::E103));
    assert_eq!(
        first_code(&parse_err("<!-- nothing here -->")),
        Some(ErrorCode::E103)
    );
}

#[test]
fn test_invalid_utf8_fails() {
    let err = parse_bytes(b"<svg><text>\xff\xfe</text></svg>").unwrap_err();

    assert_eq!(first_code(&err), Some(ErrorCode::E001));
    assert_eq!(err.diagnostics()[0].labels()[0].span().start(), 11);
}

#[test]
fn test_parse_bytes_accepts_utf8() {
    let doc = parse_bytes("<svg><text>Grüße</text></svg>".as_bytes()).expect("valid UTF-8");

    assert_eq!(doc.elements()[1].text(), "Grüße");
}

proptest! {
    #[test]
    fn prop_text_elements_keep_document_order(labels in prop::collection::vec("[a-zA-Z0-9]{1,8}", 0..12)) {
        let body: String = labels
            .iter()
            .map(|label| format!("<text>{label}</text><path d=\"M0 0\"/>"))
            .collect();
        let doc = parse(&format!("<svg>{body}</svg>")).expect("generated markup is well-formed");

        let texts: Vec<_> = doc
            .elements()
            .iter()
            .filter(|el| el.tag() == "text")
            .map(|el| el.text().to_string())
            .collect();
        prop_assert_eq!(texts, labels);
    }
}
