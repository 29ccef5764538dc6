//! End-to-end scans over parsed documents

use fos_a11y::{
    AuditConfig, AuditError, ChannelReporter, Collector, DomView, EventDispatcher, EventReporter,
    NodeId, Reporter, RuleError, RuleRegistry, Scanner, Violation, ViolationEvent, accessible_name,
    help_url, labelled_by_is_valid, query_all,
};
use fos_dom::Document;
use fos_html::HtmlParser;
use std::sync::Arc;

const MIXED: &str = concat!(
    r#"<main><img src="a.png"><a href="/"></a>"#,
    r#"<p id="x"></p><p id="x"></p><marquee>Hi</marquee></main>"#,
);

fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html).unwrap()
}

/// Parse and return the first element of the body as scan root
fn fixture(html: &str) -> (Document, NodeId) {
    let doc = parse(html);
    let root = doc.first_body_element().unwrap();
    (doc, root)
}

fn scan(doc: &Document, root: NodeId) -> Vec<Violation> {
    smol::block_on(fos_a11y::scan(doc.tree(), root)).unwrap()
}

/// Run every registered rule, streaming into `reporter`
fn stream(
    scanner: &Scanner,
    doc: &Document,
    root: NodeId,
    reporter: &mut dyn Reporter,
) -> Result<Vec<Violation>, AuditError> {
    let rules = scanner.registry().rules();
    smol::block_on(scanner.scan_with(doc.tree(), root, rules, reporter))
}

#[test]
fn duplicate_ids_report_each_occurrence() {
    let (doc, root) = fixture(r#"<div><div id="foo"></div><span id="foo"></span></div>"#);
    let found = scan(&doc, root);

    assert_eq!(found.len(), 2);
    for violation in &found {
        assert_eq!(violation.text, "IDs must be unique");
        assert_eq!(
            violation.url,
            "https://dequeuniversity.com/rules/axe/4.8/duplicate-id"
        );
    }
    assert_ne!(found[0].element, found[1].element);
}

#[test]
fn small_button_is_a_small_target() {
    let (doc, root) = fixture(r#"<button style="width:20px;height:20px">Small</button>"#);
    let found = scan(&doc, root);

    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].text,
        "Ensure touch target have sufficient size and space"
    );
    assert_eq!(
        found[0].url,
        "https://dequeuniversity.com/rules/axe/4.8/target-size"
    );
    assert_eq!(found[0].element, root);
}

#[test]
fn svg_image_needs_a_name() {
    let (doc, root) = fixture(r#"<svg role="img"></svg>"#);
    let found = scan(&doc, root);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, help_url("svg-img-alt"));

    let (doc, root) = fixture(r#"<svg role="img" aria-label="x"></svg>"#);
    assert!(scan(&doc, root).is_empty());
}

#[test]
fn scanning_twice_is_idempotent() {
    let (doc, root) = fixture(MIXED);
    let first = scan(&doc, root);
    let second = scan(&doc, root);

    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn root_is_checked_itself() {
    let (doc, root) = fixture("<marquee>News</marquee>");
    let found = scan(&doc, root);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].element, root);
    assert_eq!(found[0].url, help_url("marquee"));
}

#[test]
fn violations_in_open_shadow_roots_are_found_once() {
    let light = scan_one("<div><blink>Old</blink></div>");
    let shadowed = scan_one(&in_shadow_root("open", "<blink>Old</blink>"));
    let closed = scan_one(&in_shadow_root("closed", "<blink>Old</blink>"));

    assert_eq!(light.len(), 1);
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].text, light[0].text);
    assert_eq!(shadowed[0].url, light[0].url);
    assert!(closed.is_empty());
}

fn scan_one(html: &str) -> Vec<Violation> {
    let (doc, root) = fixture(html);
    scan(&doc, root)
}

fn in_shadow_root(mode: &str, content: &str) -> String {
    format!(
        r#"<div><x-card><template shadowrootmode="{mode}">{content}</template></x-card></div>"#
    )
}

#[test]
fn nested_shadow_roots_are_traversed() {
    let html = r#"<div>
        <x-outer><template shadowrootmode="open">
            <x-inner><template shadowrootmode="open"><img src="a.png"></template></x-inner>
        </template></x-outer>
    </div>"#;
    let (doc, root) = fixture(html);
    let images = query_all(doc.tree(), "img", root).unwrap();
    assert_eq!(images.len(), 1);

    let found = scan(&doc, root);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].element, images[0]);
}

#[test]
fn labelledby_cycles_terminate() {
    let doc = parse(
        r#"<div id="a" aria-labelledby="b"></div><div id="b" aria-labelledby="a"></div>
           <span id="name">Name</span><input id="field" aria-labelledby="name">"#,
    );
    let tree = doc.tree();
    let a = doc.get_element_by_id("a").unwrap();
    let b = doc.get_element_by_id("b").unwrap();
    let field = doc.get_element_by_id("field").unwrap();

    assert!(!labelled_by_is_valid(tree, a));
    assert!(!labelled_by_is_valid(tree, b));
    assert!(labelled_by_is_valid(tree, field));
}

#[test]
fn spaces_between_inline_elements_separate_words() {
    let doc = parse(r#"<a id="home" href="/"><span>Go</span> <span>home</span></a>"#);
    let link = doc.get_element_by_id("home").unwrap();

    let name = accessible_name(doc.tree(), link);
    assert_eq!(name.as_deref(), Some("Go home"));
    let found = scan(&doc, link);
    assert!(found.iter().all(|v| v.url != help_url("link-name")));
}

#[derive(Default)]
struct Recorder {
    events: Vec<ViolationEvent>,
}

impl EventDispatcher for Recorder {
    fn dispatch_event(&mut self, event: ViolationEvent) -> bool {
        self.events.push(event);
        true
    }
}

#[test]
fn streaming_matches_bulk_order() {
    let (doc, root) = fixture(MIXED);
    let scanner = Scanner::default();

    let mut collector = Collector::new();
    let bulk = stream(&scanner, &doc, root, &mut collector).unwrap();
    assert_eq!(collector.violations(), bulk.as_slice());

    let mut events = EventReporter::at_document(Recorder::default());
    stream(&scanner, &doc, root, &mut events).unwrap();
    let events = events.into_inner().events;
    assert_eq!(events.len(), bulk.len());
    assert!(events.iter().all(|e| e.bubbles));
    assert!(events.iter().all(|e| e.target == NodeId::ROOT));
    let errors: Vec<_> = events.iter().map(|e| e.error.clone()).collect();
    assert_eq!(errors, bulk);

    // Rule order first: duplicate-id precedes marquee, which precedes image-alt
    let urls: Vec<_> = bulk.iter().map(|v| v.url.as_str()).collect();
    let position = |id: &str| urls.iter().position(|u| *u == help_url(id));
    assert!(position("duplicate-id") < position("marquee"));
    assert!(position("marquee") < position("image-alt"));
    assert!(position("image-alt") < position("link-name"));
}

#[test]
fn channel_reporter_receives_every_violation() {
    let (doc, root) = fixture("<div><blink></blink><marquee></marquee><img></div>");
    let scanner = Scanner::default();

    // A one-slot channel would have to drop all but the first violation
    let (tx, _rx) = smol::channel::bounded(1);
    assert!(matches!(
        ChannelReporter::new(tx),
        Err(AuditError::BoundedChannel(1))
    ));

    let (mut reporter, rx) = ChannelReporter::unbounded();
    let bulk = stream(&scanner, &doc, root, &mut reporter).unwrap();
    drop(reporter);
    assert_eq!(bulk.len(), 3);

    let streamed: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(streamed, bulk);
}

#[test]
fn concurrent_scans_match_single_threaded() {
    let (doc, root) = fixture(MIXED);
    let scanner = Scanner::default();
    let expected = scanner.scan_blocking(doc.tree(), root).unwrap();
    assert!(!expected.is_empty());

    let (scanner, tree) = (&scanner, doc.tree());
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(move || scanner.scan_blocking(tree, root)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), expected);
        }
    });
}

fn always_fails(_dom: &dyn DomView, _root: NodeId) -> Result<Vec<Violation>, RuleError> {
    Err(RuleError::Failed("unavailable".into()))
}

#[test]
fn failing_rule_aborts_scan() {
    let (doc, root) = fixture("<div><blink></blink></div>");
    let mut registry = RuleRegistry::with_defaults(&AuditConfig::default());
    registry
        .register("always-fails", Arc::new(always_fails))
        .unwrap();
    let scanner = Scanner::new(registry);

    let mut collector = Collector::new();
    let result = stream(&scanner, &doc, root, &mut collector);

    assert!(matches!(
        result,
        Err(AuditError::RuleFailed { ref rule, .. }) if rule == "always-fails"
    ));
    // Earlier rules had already streamed their findings
    assert_eq!(collector.violations().len(), 1);
}

#[test]
fn selected_rules_run_in_caller_order() {
    let (doc, root) = fixture(r#"<div><img><blink></blink></div>"#);
    let scanner = Scanner::default();

    let selected = scanner.scan_rules(doc.tree(), root, &["image-alt", "blink"]);
    let found = smol::block_on(selected).unwrap();
    let urls: Vec<_> = found.iter().map(|v| v.url.clone()).collect();
    assert_eq!(urls, vec![help_url("image-alt"), help_url("blink")]);

    let unknown = scanner.scan_rules(doc.tree(), root, &["nope"]);
    let err = smol::block_on(unknown).unwrap_err();
    assert!(matches!(err, AuditError::UnknownRule(id) if id == "nope"));
}

#[test]
fn invalid_roots_yield_nothing() {
    let doc = parse("<div><blink></blink></div>");
    assert!(scan(&doc, NodeId::NONE).is_empty());
}

#[test]
fn scan_blocking_uses_configuration() {
    let (doc, root) = fixture(r#"<button style="width:30px;height:30px">Go</button>"#);

    let relaxed = Scanner::default();
    assert!(relaxed.scan_blocking(doc.tree(), root).unwrap().is_empty());

    let config = AuditConfig::default().with_min_target_size(44.0);
    let strict = Scanner::with_config(&config);
    assert_eq!(strict.scan_blocking(doc.tree(), root).unwrap().len(), 1);
}
