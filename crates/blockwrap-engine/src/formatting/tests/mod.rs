//! Behaviour tests for the selection formatters.
//!
//! Positions follow the document's token scheme; each test spells out the
//! layout it relies on.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::error::InvalidSelectionError;
use crate::formatting::{
    BlockTag, FormatOptions, Route, SelectionFormatter, TagNames, format_in_multi_nodes,
    format_in_single_node, format_selection,
};
use crate::models::{Document, Node, Selection};

/// Drop everything between `<` and `>`
fn inner_text(html: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn foo_bar() -> Document {
    // <p>Foo</p><p>Bar</p>: Foo at 1..4, Bar at 6..9, size 10
    Document::new([Node::paragraph_text("Foo"), Node::paragraph_text("Bar")])
}

// Single node

#[test]
fn partial_selection_keeps_surrounding_text() {
    // "Hello world" content at 1..12, "world" at 7..12
    let doc = Document::new([Node::paragraph_text("Hello world")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::new(7, 12), &doc).unwrap();
    insta::assert_snapshot!(html, @"<p>Hello </p><h1>world</h1>");
}

#[test]
fn caret_at_block_start_still_emits_target_pair() {
    let doc = Document::new([Node::paragraph_text("Hi")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::caret(1), &doc).unwrap();
    assert_eq!(html, "<h1></h1><p>Hi</p>");
}

#[test]
fn caret_in_empty_block() {
    let doc = Document::new([Node::paragraph_text("")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::caret(1), &doc).unwrap();
    assert_eq!(html, "<h1></h1>");
}

#[test]
fn heading_keeps_h1_around_unselected_text() {
    // "Title text" content at 1..11, "text" at 7..11
    let doc = Document::new([Node::heading_text("Title text")]);
    let html = format_in_single_node(BlockTag::Paragraph, Selection::new(7, 11), &doc).unwrap();
    assert_eq!(html, "<h1>Title </h1><p>text</p>");
}

#[test]
fn middle_selection_emits_three_parts() {
    let doc = Document::new([Node::paragraph_text("abcde")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::new(2, 5), &doc).unwrap();
    assert_eq!(html, "<p>a</p><h1>bcd</h1><p>e</p>");
}

#[test]
fn same_tag_is_not_short_circuited() {
    let doc = Document::new([Node::heading_text("Title")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::new(1, 6), &doc).unwrap();
    assert_eq!(html, "<h1>Title</h1>");
}

#[test]
fn selection_starting_before_block() {
    // position 0 sits before the heading, so nothing precedes the selection
    let doc = Document::new([Node::heading_text("Title")]);
    let html = format_in_single_node(BlockTag::Paragraph, Selection::new(0, 3), &doc).unwrap();
    assert_eq!(html, "<p>Ti</p><h1>tle</h1>");
}

#[test]
fn single_node_clamps_selection_leaking_into_next_block() {
    let doc = foo_bar();
    let html = format_in_single_node(BlockTag::Heading, Selection::new(2, 8), &doc).unwrap();
    assert_eq!(html, "<p>F</p><h1>oo</h1>");
}

#[test]
fn characters_not_bytes() {
    // "héllo wörld" content at 1..12
    let doc = Document::new([Node::paragraph_text("héllo wörld")]);
    let html = format_in_single_node(BlockTag::Heading, Selection::new(7, 12), &doc).unwrap();
    assert_eq!(html, "<p>héllo </p><h1>wörld</h1>");
}

#[test]
fn single_node_inner_text_reproduces_block() {
    let text = "Hello world";
    let doc = Document::new([Node::paragraph_text(text)]);
    let end = doc.content_size() - 1;
    for from in 1..=end {
        for to in from..=end {
            let html =
                format_in_single_node(BlockTag::Heading, Selection::new(from, to), &doc).unwrap();
            assert_eq!(inner_text(&html), text, "selection {from}..{to}");
            assert!(!html.contains("<p></p>"), "empty pair for {from}..{to}");
            assert_eq!(html.matches("<h1>").count(), 1, "selection {from}..{to}");
        }
    }
}

// Multi node

#[test]
fn two_paragraphs_fully_selected() {
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 9), &foo_bar()).unwrap();
    insta::assert_snapshot!(html, @"<h1>FooBar</h1>");
}

#[test]
fn select_all_from_document_edges() {
    let html =
        format_in_multi_nodes(BlockTag::Heading, Selection::new(0, 10), &foo_bar()).unwrap();
    assert_eq!(html, "<h1>FooBar</h1>");
}

#[test]
fn image_between_boundaries_interrupts_wrapper() {
    // A_text at 1..7, image at 8, B_text at 10..16
    let doc = Document::new([
        Node::paragraph_text("A_text"),
        Node::image("x.png"),
        Node::paragraph_text("B_text"),
    ]);
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 16), &doc).unwrap();
    insta::assert_snapshot!(html, @r#"<h1>A_text</h1><img src="x.png" /><h1>B_text</h1>"#);
}

#[test]
fn partial_boundaries_keep_original_tags() {
    // <h1>Intro</h1> content 1..6, <p>Body text</p> content 8..17
    let doc = Document::new([
        Node::heading_text("Intro"),
        Node::paragraph_text("Body text"),
    ]);
    let html = format_in_multi_nodes(BlockTag::Paragraph, Selection::new(3, 12), &doc).unwrap();
    assert_eq!(html, "<h1>In</h1><p>troBody</p><p> text</p>");
}

#[test]
fn blocks_between_boundaries_are_emitted_verbatim() {
    let doc = Document::new([
        Node::paragraph_text("A"),
        Node::heading_text("B"),
        Node::paragraph_text("C"),
    ]);
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 8), &doc).unwrap();
    assert_eq!(html, "<h1>ABC</h1>");
}

#[test]
fn inline_image_inside_middle_block() {
    // <p>A</p> 0..3, <p>x<img>y</p> 3..8, <p>B</p> 8..11
    let doc = Document::new([
        Node::paragraph_text("A"),
        Node::paragraph([Node::text("x"), Node::image("i.png"), Node::text("y")]),
        Node::paragraph_text("B"),
    ]);
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 10), &doc).unwrap();
    assert_eq!(html, r#"<h1>Ax</h1><img src="i.png" /><h1>yB</h1>"#);
}

#[test]
fn carets_at_block_edges() {
    // from the end of Foo to the start of Bar
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(4, 6), &foo_bar()).unwrap();
    assert_eq!(html, "<p>Foo</p><h1></h1><p>Bar</p>");
}

#[test]
fn unknown_blocks_in_between_are_skipped() {
    // <p>A</p> 0..3, <codeBlock>let x</codeBlock> 3..10, <p>B</p> 10..13
    let doc = Document::new([
        Node::paragraph_text("A"),
        Node::other("codeBlock", [Node::text("let x")]),
        Node::paragraph_text("B"),
    ]);
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 12), &doc).unwrap();
    assert_eq!(html, "<h1>AB</h1>");
}

#[test]
fn paragraphs_inside_list_items() {
    // One at 3..6, Two at 10..13
    let doc = Document::new([Node::other(
        "bulletList",
        [
            Node::other("listItem", [Node::paragraph_text("One")]),
            Node::other("listItem", [Node::paragraph_text("Two")]),
        ],
    )]);
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(4, 12), &doc).unwrap();
    assert_eq!(html, "<p>O</p><h1>neTw</h1><p>o</p>");
}

#[test]
fn degenerate_selection_leaves_wrapper_open() {
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 3), &foo_bar()).unwrap();
    assert_eq!(html, "<h1>Foo");
}

#[test]
fn multi_node_has_single_wrapper_pair() {
    let doc = Document::new([
        Node::paragraph_text("First"),
        Node::image("a.png"),
        Node::heading_text("Second"),
        Node::image("b.png"),
        Node::paragraph_text("Third"),
    ]);
    let size = doc.content_size();
    let html = format_in_multi_nodes(BlockTag::Heading, Selection::new(2, size - 3), &doc).unwrap();
    let without_images = html
        .replace(r#"</h1><img src="a.png" /><h1>"#, "")
        .replace(r#"</h1><img src="b.png" /><h1>"#, "");
    assert_eq!(without_images.matches("<h1>").count(), 1);
    assert_eq!(without_images.matches("</h1>").count(), 1);
    assert_eq!(without_images, "<p>F</p><h1>irstSecondThi</h1><p>rd</p>");
}

// Dispatch

#[rstest]
#[case::empty(Selection::caret(2), Route::SingleNode)]
#[case::inside_one_block(Selection::new(1, 4), Route::SingleNode)]
#[case::whole_first_block(Selection::new(0, 5), Route::SingleNode)]
#[case::across_blocks(Selection::new(2, 7), Route::MultiNodes)]
#[case::end_to_start(Selection::new(4, 6), Route::MultiNodes)]
#[case::select_all(Selection::new(0, 10), Route::MultiNodes)]
fn routes_selection(#[case] selection: Selection, #[case] expected: Route) {
    assert_eq!(Route::for_selection(selection, &foo_bar()).unwrap(), expected);
}

#[rstest]
#[case::scenario_partial(vec![Node::paragraph_text("Hello world")], 7, 12, "<p>Hello </p><h1>world</h1>")]
#[case::scenario_caret(vec![Node::paragraph_text("Hi")], 1, 1, "<h1></h1><p>Hi</p>")]
#[case::scenario_two_blocks(
    vec![Node::paragraph_text("Foo"), Node::paragraph_text("Bar")],
    1,
    9,
    "<h1>FooBar</h1>"
)]
#[case::scenario_image(
    vec![Node::paragraph_text("A"), Node::image("x.png"), Node::paragraph_text("B")],
    1,
    6,
    r#"<h1>A</h1><img src="x.png" /><h1>B</h1>"#
)]
#[case::ends_on_image(
    vec![Node::paragraph_text("A"), Node::image("x.png"), Node::paragraph_text("B")],
    1,
    4,
    r#"<h1>A</h1><img src="x.png" />"#
)]
#[case::starts_on_image(
    vec![Node::paragraph_text("A"), Node::image("x.png"), Node::paragraph_text("B")],
    3,
    6,
    r#"<img src="x.png" /><h1>B</h1>"#
)]
#[case::only_image(
    vec![Node::paragraph_text("A"), Node::image("x.png"), Node::paragraph_text("B")],
    3,
    4,
    r#"<img src="x.png" />"#
)]
#[case::ends_on_rule(
    vec![Node::paragraph_text("A"), Node::other_leaf("horizontalRule"), Node::paragraph_text("B")],
    1,
    4,
    "<h1>A</h1>"
)]
#[case::caret_at_end_after_image(
    vec![Node::heading_text("Title"), Node::image("x.png")],
    8,
    8,
    "<h1></h1>"
)]
#[case::image_before_selected_text(
    vec![Node::paragraph([Node::text("ab"), Node::image("i.png"), Node::text("cd")])],
    4,
    6,
    r#"<p>ab</p><img src="i.png" /><h1>cd</h1>"#
)]
#[case::image_before_start_boundary(
    vec![
        Node::paragraph([Node::text("ab"), Node::image("i.png"), Node::text("cd")]),
        Node::paragraph_text("Z"),
    ],
    5,
    9,
    r#"<p>ab</p><img src="i.png" /><p>c</p><h1>dZ</h1>"#
)]
#[case::image_after_end_boundary(
    vec![
        Node::paragraph_text("Z"),
        Node::paragraph([Node::text("ab"), Node::image("i.png"), Node::text("cd")]),
    ],
    1,
    5,
    r#"<h1>Za</h1><p>b</p><img src="i.png" /><p>cd</p>"#
)]
fn format_selection_routes_and_formats(
    #[case] blocks: Vec<Node>,
    #[case] from: usize,
    #[case] to: usize,
    #[case] expected: &str,
) {
    let doc = Document::new(blocks);
    let html = format_selection(BlockTag::Heading, Selection::new(from, to), &doc).unwrap();
    assert_eq!(html, expected);
}

#[test]
fn heading_back_to_paragraph_across_blocks() {
    let doc = Document::new([Node::heading_text("Title"), Node::heading_text("Sub")]);
    let html = format_selection(BlockTag::Paragraph, Selection::new(0, 12), &doc).unwrap();
    assert_eq!(html, "<p>TitleSub</p>");
}

#[test]
fn caret_between_heading_and_image_keeps_heading_tag() {
    // <h1>Title</h1> 0..7, image at 7, <p>Body</p> 8..14
    let doc = Document::new([
        Node::heading_text("Title"),
        Node::image("x.png"),
        Node::paragraph_text("Body"),
    ]);
    let html = format_selection(BlockTag::Paragraph, Selection::caret(7), &doc).unwrap();
    assert_eq!(html, "<h1>Title</h1><p></p>");
}

#[test]
fn single_node_keeps_images_in_every_part() {
    // content: a 1, b 2, image 3, c 4, d 5, image 6, e 7
    let doc = Document::new([Node::paragraph([
        Node::text("ab"),
        Node::image("1.png"),
        Node::text("cd"),
        Node::image("2.png"),
        Node::text("e"),
    ])]);
    let html = format_in_single_node(BlockTag::Heading, Selection::new(2, 5), &doc).unwrap();
    assert_eq!(
        html,
        r#"<p>a</p><h1>b</h1><img src="1.png" /><h1>c</h1><p>d</p><img src="2.png" /><p>e</p>"#
    );
}

#[test]
fn format_selection_markup_is_balanced() {
    let doc = Document::new([
        Node::paragraph_text("A"),
        Node::image("x.png"),
        Node::heading_text("B"),
        Node::other_leaf("horizontalRule"),
        Node::paragraph_text("C"),
    ]);
    let size = doc.content_size();
    for from in 0..=size {
        for to in from..=size {
            let html =
                format_selection(BlockTag::Heading, Selection::new(from, to), &doc).unwrap();
            assert_eq!(
                html.matches("<h1>").count(),
                html.matches("</h1>").count(),
                "selection {from}..{to}: {html}"
            );
            assert_eq!(
                html.matches("<p>").count(),
                html.matches("</p>").count(),
                "selection {from}..{to}: {html}"
            );
        }
    }
}

// Errors

#[test]
fn reversed_selection_is_rejected() {
    let err = format_selection(BlockTag::Heading, Selection::new(5, 2), &foo_bar()).unwrap_err();
    assert_eq!(err, InvalidSelectionError::Reversed { from: 5, to: 2 });
}

#[test]
fn out_of_bounds_selection_is_rejected() {
    for result in [
        format_in_single_node(BlockTag::Heading, Selection::new(1, 11), &foo_bar()),
        format_in_multi_nodes(BlockTag::Heading, Selection::new(1, 11), &foo_bar()),
        format_selection(BlockTag::Heading, Selection::new(11, 11), &foo_bar()),
    ] {
        assert_eq!(
            result.unwrap_err(),
            InvalidSelectionError::OutOfBounds { pos: 11, size: 10 }
        );
    }
}

#[test]
fn empty_document() {
    let doc = Document::new(Vec::<Node>::new());
    let html = format_selection(BlockTag::Heading, Selection::caret(0), &doc).unwrap();
    assert_eq!(html, "<h1></h1>");
}

// Options

#[test]
fn text_is_emitted_unmodified_by_default() {
    // <p>a<b</p> content 1..4, <p>c&d</p> content 6..9
    let doc = Document::new([Node::paragraph_text("a<b"), Node::paragraph_text("c&d")]);
    let html = format_selection(BlockTag::Heading, Selection::new(1, 9), &doc).unwrap();
    assert_eq!(html, "<h1>a<bc&d</h1>");
}

#[test]
fn escaping_is_opt_in() {
    let formatter = SelectionFormatter::new(FormatOptions {
        escape_html: true,
        ..FormatOptions::default()
    });
    let doc = Document::new([Node::paragraph_text("a<b & c")]);
    let html = formatter
        .format_selection(BlockTag::Heading, Selection::new(1, 8), &doc)
        .unwrap();
    assert_eq!(html, "<h1>a&lt;b &amp; c</h1>");
}

#[test]
fn formatter_uses_configured_options() {
    let formatter = SelectionFormatter::new(FormatOptions {
        escape_html: false,
        tags: TagNames {
            heading: "h2".to_string(),
            paragraph: "div".to_string(),
        },
    });
    let doc = Document::new([Node::paragraph_text("x<y> z")]);
    let html = formatter
        .format_selection(BlockTag::Heading, Selection::new(5, 7), &doc)
        .unwrap();
    assert_eq!(html, "<div>x<y></div><h2> z</h2>");
    assert!(!formatter.options().escape_html);
}
