//! Integration tests for the HTML parser.

use quokka_dom::{DomNode, NodeType};
use quokka_html::{HtmlParseError, parse};

/// Helper to get the tag name of an element node.
fn tag(node: &DomNode) -> &str {
    &node
        .as_element()
        .expect("expected an element node")
        .tag_name
}

#[test]
fn test_single_root_is_returned_as_is() {
    let dom = parse("<div id=\"a\"><p>hi</p></div>").unwrap();
    assert_eq!(tag(&dom), "div");
    assert_eq!(dom.as_element().unwrap().id(), Some("a"));
    assert_eq!(dom.children.len(), 1);

    let p = &dom.children[0];
    assert_eq!(tag(p), "p");
    assert_eq!(p.children, vec![DomNode::text("hi")]);
}

#[test]
fn test_multiple_roots_are_wrapped_in_html() {
    let dom = parse("<p>a</p><p>b</p>").unwrap();
    assert_eq!(tag(&dom), "html");
    assert!(dom.as_element().unwrap().attrs.is_empty());
    assert_eq!(dom.children.len(), 2);
    assert_eq!(dom.text_content(), "ab");
}

#[test]
fn test_empty_document_is_empty_html() {
    let dom = parse("   ").unwrap();
    assert_eq!(tag(&dom), "html");
    assert!(dom.children.is_empty());
}

#[test]
fn test_bare_text_document() {
    let dom = parse("just text").unwrap();
    assert_eq!(dom, DomNode::text("just text"));
}

#[test]
fn test_nested_elements_and_text() {
    let html = "<html>
        <body>
            <h1>Title</h1>
            <div id=\"main\" class=\"test note\">
                <p>Hello <em>world</em>!</p>
            </div>
        </body>
    </html>";
    let dom = parse(html).unwrap();
    assert_eq!(tag(&dom), "html");

    let div = dom.find_element("div").unwrap();
    let data = div.as_element().unwrap();
    assert_eq!(data.id(), Some("main"));
    assert!(data.classes().contains("note"));

    let p = dom.find_element("p").unwrap();
    // Leading whitespace before a node is skipped; trailing whitespace in a
    // text run is kept.
    assert_eq!(p.children.len(), 3);
    assert_eq!(p.children[0], DomNode::text("Hello "));
    assert_eq!(tag(&p.children[1]), "em");
    assert_eq!(p.children[2], DomNode::text("!"));
}

#[test]
fn test_single_quoted_attribute() {
    let dom = parse("<a href='x.html' title=\"it's\"></a>").unwrap();
    let data = dom.as_element().unwrap();
    assert_eq!(data.attrs["href"], "x.html");
    assert_eq!(data.attrs["title"], "it's");
}

#[test]
fn test_multibyte_text() {
    let dom = parse("<p>あいう</p>").unwrap();
    assert!(matches!(&dom.children[0].node_type, NodeType::Text(t) if t == "あいう"));
}

#[test]
fn test_mismatched_closing_tag_fails() {
    let err = parse("<div><p>hi</div></p>").unwrap_err();
    assert_eq!(
        err,
        HtmlParseError::MismatchedClosingTag {
            expected: "p".to_string(),
            found: "div".to_string(),
            position: 12,
        }
    );
}

#[test]
fn test_unclosed_element_fails() {
    assert!(matches!(
        parse("<div><p>hi</p>"),
        Err(HtmlParseError::Syntax(_))
    ));
}

#[test]
fn test_missing_attribute_quote_fails() {
    assert!(matches!(
        parse("<div id=main></div>"),
        Err(HtmlParseError::UnquotedAttributeValue { .. })
    ));
    assert!(matches!(
        parse("<div id=\"main></div>"),
        Err(HtmlParseError::Syntax(_))
    ));
}

#[test]
fn test_stray_closing_tag_fails() {
    assert!(matches!(
        parse("<p>a</p></div>"),
        Err(HtmlParseError::UnexpectedClosingTag { position: 8 })
    ));
}

#[test]
fn test_empty_tag_name_fails() {
    assert!(matches!(
        parse("< p></p>"),
        Err(HtmlParseError::EmptyTagName { position: 1 })
    ));
}

#[test]
fn test_error_messages() {
    let err = parse("<div></span>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "closing tag </span> does not match <div> at position 7"
    );
}

#[test]
fn test_deeply_nested_elements() {
    let depth = 200;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let mut node = &parse(&html).unwrap();

    for _ in 1..depth {
        assert_eq!(node.children.len(), 1);
        node = &node.children[0];
    }
    assert_eq!(node.children, vec![DomNode::text("x")]);
}
