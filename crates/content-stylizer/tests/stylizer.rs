use content_stylizer::{
    Producer, ProducerError, Stylizer, StylizerConfig, StylizerError, TagRegistry,
};
use serde_json::{Value, json};

fn article_stylizer() -> Stylizer {
    let config = StylizerConfig::from_json(
        r#"{
            "tags": [
                {"type": "br", "beginning": "<br>"},
                {"type": "style:anfang", "beginning": "<span class=\"Anfang\">", "end": "</span>"},
                {"type": "style:em", "beginning": "<em>", "end": "</em>"},
                {"type": "style:highlight", "beginning": "<span class=\"u-highlightText\">", "end": "</span>"},
                {"type": "style:strong", "beginning": "<strong>", "end": "</strong>"}
            ]
        }"#,
    )
    .unwrap();

    let mut stylizer = Stylizer::from_config(&config);
    stylizer
        .add_tag(
            "link:external",
            Producer::dynamic(|params| {
                Ok(format!(
                    "<a href=\"{}\" target=\"_blank\">",
                    params.str("uri")?
                ))
            }),
            Some("</a>".into()),
        )
        .add_tag(
            "link:internal",
            Producer::dynamic(|params| {
                let uri = params.str("uri")?;
                let (kind, id) = uri
                    .split_once(':')
                    .ok_or_else(|| ProducerError::Custom(format!("malformed content uri `{uri}`")))?;
                let href = match kind {
                    "author" => format!("/av/{id}"),
                    "topic" => format!("/om/{id}"),
                    _ => format!("/{id}"),
                };
                Ok(format!("<a href=\"{href}\">"))
            }),
            Some("</a>".into()),
        );
    stylizer
}

fn simple_stylizer() -> Stylizer {
    let mut stylizer = Stylizer::default();
    stylizer
        .add_tag("strong", "<strong>", Some("</strong>".into()))
        .add_tag("em", "<em>", Some("</em>".into()));
    stylizer
}

/// Check that the non-void tags in `html` open and close in stack order.
fn assert_well_formed(html: &str) {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        let end = start + rest[start..].find('>').expect("unterminated tag");
        let tag = &rest[start + 1..end];
        if let Some(name) = tag.strip_prefix('/') {
            assert_eq!(stack.pop(), Some(name), "mismatched close in {html}");
        } else {
            let name = tag.split_whitespace().next().unwrap_or(tag);
            if name != "br" {
                stack.push(name);
            }
        }
        rest = &rest[end + 1..];
    }
    assert!(stack.is_empty(), "unclosed tags {stack:?} in {html}");
}

/// Drop all markup and decode entities, leaving only the source text.
fn strip_markup(html: &str) -> String {
    let mut text = String::new();
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        text.push_str(&rest[..start]);
        let end = start + rest[start..].find('>').expect("unterminated tag");
        rest = &rest[end + 1..];
    }
    text.push_str(rest);
    html_escape::decode_html_entities(&text).into_owned()
}

#[test]
fn test_plain_text() {
    let stylizer = Stylizer::default();
    insta::assert_snapshot!(stylizer.render("Test string", &[]).unwrap(), @"Test string");
    assert_eq!(stylizer.render("Test\nstring", &[]).unwrap(), "Test\nstring");
}

#[test]
fn test_line_break_tag() {
    let mut stylizer = Stylizer::default();
    stylizer.add_tag("br", "<br>", None);
    assert_eq!(
        stylizer.render("Test\nstring", &[]).unwrap(),
        "Test<br>\nstring"
    );
}

#[test]
fn test_line_break_idempotent_without_terminators() {
    let annotations = vec![json!({"type": "strong", "offset": 2, "length": 5})];
    let plain = simple_stylizer();
    let mut with_br = simple_stylizer();
    with_br.add_tag("br", "<br>", None);

    assert_eq!(
        plain.render("single line", &annotations).unwrap(),
        with_br.render("single line", &annotations).unwrap()
    );
}

#[test]
fn test_longer_span_encloses() {
    let annotations = vec![
        json!({"type": "strong", "offset": 0, "length": 4}),
        json!({"type": "em", "offset": 0, "length": 7}),
    ];
    let html = simple_stylizer().render("Testing", &annotations).unwrap();
    insta::assert_snapshot!(html, @"<em><strong>Test</strong>ing</em>");
}

#[test]
fn test_crossing_spans_are_split() {
    let annotations = vec![
        json!({"type": "strong", "offset": 0, "length": 5}),
        json!({"type": "em", "offset": 3, "length": 5}),
    ];
    let html = simple_stylizer().render("ABCDEFGH", &annotations).unwrap();
    insta::assert_snapshot!(html, @"<strong>ABC<em>DE</em></strong><em>FGH</em>");
    assert_well_formed(&html);
}

#[test]
fn test_article_with_links() {
    let annotations = vec![
        json!({"length": 6, "offset": 26, "type": "style:highlight"}),
        json!({"length": 10, "offset": 46, "type": "style:em"}),
        json!({"length": 16, "offset": 49, "type": "link:external", "uri": "http://www.example.com"}),
        json!({"length": 8, "offset": 57, "type": "style:strong"}),
        json!({
            "length": 8,
            "offset": 70,
            "type": "link:internal",
            "uri": "article:9336dcbc-db7d-3985-8ea2-cd691897dde7"
        }),
    ];
    let text = "This is sample text which should help to test if content stylizer\nfor articles works as it has to.";

    let html = article_stylizer().render(text, &annotations).unwrap();
    assert_eq!(
        html,
        concat!(
            "This is sample text which <span class=\"u-highlightText\">should</span> help to test ",
            "<em>if <a href=\"http://www.example.com\" target=\"_blank\">content</a></em>",
            "<a href=\"http://www.example.com\" target=\"_blank\"> <strong>stylizer</strong></a><br>\n",
            "for <a href=\"/9336dcbc-db7d-3985-8ea2-cd691897dde7\">articles</a> works as it has to."
        )
    );
    assert_well_formed(&html);
}

#[test]
fn test_markup_inheritance() {
    let annotations = vec![
        json!({"length": 4, "offset": 0, "type": "style:strong"}),
        json!({"length": 7, "offset": 0, "type": "style:em"}),
        json!({"length": 18, "offset": 5, "type": "style:highlight"}),
        json!({"length": 7, "offset": 8, "type": "style:anfang"}),
        json!({"length": 15, "offset": 8, "type": "style:em"}),
        json!({"length": 11, "offset": 24, "type": "style:em"}),
        json!({"length": 29, "offset": 6, "type": "style:strong"}),
    ];

    let html = article_stylizer()
        .render("Test of correct markups inheritance.", &annotations)
        .unwrap();
    assert_eq!(
        html,
        concat!(
            "<em><strong>Test</strong> <span class=\"u-highlightText\">o<strong>f</strong></span></em>",
            "<strong><span class=\"u-highlightText\"> <em><span class=\"Anfang\">correct</span> markups</em>",
            "</span> <em>inheritance</em></strong>."
        )
    );
    assert_well_formed(&html);
}

#[test]
fn test_escapes_text_outside_and_inside_spans() {
    let annotations = vec![json!({"type": "strong", "offset": 4, "length": 3})];
    let html = simple_stylizer()
        .render(r#"1 < 2 & "3" > '0'"#, &annotations)
        .unwrap();
    insta::assert_snapshot!(
        html,
        @"1 &lt; <strong>2 &amp;</strong> &quot;3&quot; &gt; &#x27;0&#x27;"
    );
}

#[test]
fn test_unicode_offsets_are_chars() {
    let annotations = vec![json!({"type": "em", "offset": 5, "length": 4})];
    let html = simple_stylizer()
        .render("Zażółć gęślą jaźń", &annotations)
        .unwrap();
    assert_eq!(html, "Zażół<em>ć gę</em>ślą jaźń");
}

#[test]
fn test_unknown_tags_are_ignored() {
    let annotations = vec![
        json!({"type": "underline", "offset": 0, "length": 4}),
        json!({"type": "strong", "length": 4}),
    ];
    let html = simple_stylizer().render("Test", &annotations).unwrap();
    assert_eq!(html, "Test");
}

#[test]
fn test_out_of_range_annotations_are_clamped() {
    let annotations = vec![
        json!({"type": "strong", "offset": -3, "length": 5}),
        json!({"type": "em", "offset": 3, "length": 100}),
    ];
    let html = simple_stylizer().render("abcdef", &annotations).unwrap();
    assert_eq!(html, "<strong>ab</strong>c<em>def</em>");
}

#[test]
fn test_producer_failure_fails_render() {
    let annotations = vec![json!({"type": "link:external", "offset": 0, "length": 4})];
    let err = article_stylizer().render("Test", &annotations).unwrap_err();

    match err {
        StylizerError::Producer { tag, source } => {
            assert_eq!(tag, "link:external");
            assert!(matches!(source, ProducerError::MissingParam { ref name } if name == "uri"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_split_fragments_keep_params() {
    let annotations = vec![
        json!({"type": "strong", "offset": 0, "length": 3}),
        json!({"type": "link:external", "offset": 1, "length": 4, "uri": "https://a.example"}),
    ];
    let mut stylizer = article_stylizer();
    stylizer.add_tag("strong", "<b>", Some("</b>".into()));

    let html = stylizer.render("abcdef", &annotations).unwrap();
    assert_eq!(
        html,
        concat!(
            "<b>a<a href=\"https://a.example\" target=\"_blank\">bc</a></b>",
            "<a href=\"https://a.example\" target=\"_blank\">de</a>f"
        )
    );
}

/// Small deterministic generator so the property checks need no extra crates.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

fn generated_stylizer() -> Stylizer {
    let mut registry = TagRegistry::new();
    for name in ["a", "b", "c", "d"] {
        registry.add_tag(name, format!("<{name}>"), Some(format!("</{name}>").into()));
    }
    registry.add_tag("br", "<br>", None);
    Stylizer::new(registry)
}

#[test]
fn test_generated_annotations_nest_and_cover_text() {
    let stylizer = generated_stylizer();
    let text = "a<b>&\"c\"\n'd' é\nxyz";
    let char_count = text.chars().count() as u64;
    let mut rng = Lcg(0x5eed);

    for _ in 0..500 {
        let count = rng.next(7);
        let annotations: Vec<Value> = (0..count)
            .map(|_| {
                let kind = ["a", "b", "c", "d", "br"][rng.next(5) as usize];
                // Only `br` may be zero-length; the others need a closing tag.
                let (offset, length) = if kind == "br" {
                    (rng.next(char_count + 1), 0)
                } else {
                    (rng.next(char_count), 1 + rng.next(char_count / 2))
                };
                json!({"type": kind, "offset": offset, "length": length})
            })
            .collect();

        let html = stylizer.render(text, &annotations).unwrap();
        assert_well_formed(&html);
        assert_eq!(strip_markup(&html), text, "annotations: {annotations:?}");
    }
}

#[test]
fn test_stylizer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Stylizer>();

    let stylizer = simple_stylizer();
    let annotations = vec![json!({"type": "em", "offset": 0, "length": 2})];
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| stylizer.render("hello", &annotations).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), "<em>he</em>llo");
        }
    });
}
