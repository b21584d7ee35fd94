mod common;

use common::{names, node, params, parse};
use refdiff_core::{NodeKind, SourceCodeAnalyzer};
use refdiff_js::JsAnalyzer;

#[test]
fn test_functions_in_source_order() {
    let (tree, _) = parse(&[(
        "a.js",
        "function foo(a, b) { return a + b; }\nfunction bar() { return foo(1, 2); }\n",
    )]);

    assert_eq!(tree.roots().len(), 1);
    let file = &tree[tree.roots()[0]];
    assert_eq!(file.kind, NodeKind::File);
    assert_eq!(file.local_name, "a.js");
    assert_eq!(file.namespace.as_deref(), Some(""));
    assert_eq!(names(&tree, file.children()), vec!["foo", "bar"]);

    let foo = node(&tree, "foo");
    let bar = node(&tree, "bar");
    assert_eq!(foo.kind, NodeKind::Function);
    assert_eq!(params(foo), vec!["a", "b"]);
    assert!(params(bar).is_empty());
    assert!(bar.calls().contains(&foo.id()));
    assert!(foo.calls().is_empty());
}

#[test]
fn test_function_location_and_body() {
    let source = "// header\nfunction foo(a) {\n  return a;\n}\n";
    let (tree, _) = parse(&[("a.js", source)]);
    let foo = node(&tree, "foo");

    assert_eq!(&source[foo.location.span()], "function foo(a) {\n  return a;\n}");
    assert_eq!(&source[foo.location.body_span()], "{\n  return a;\n}");
    assert_eq!(foo.location.line_start, 2);
    assert_eq!(foo.location.line_end, 4);
    assert!(foo.location.has_body());

    let file = &tree[tree.roots()[0]];
    assert_eq!(file.location.span(), 0..source.len());
    assert!(!file.location.has_body());
}

#[test]
fn test_this_call_resolves_to_method() {
    let (tree, _) = parse(&[(
        "cart.js",
        "class Cart {\n  add(item) { this.items.push(item); this.recount(); }\n  recount() { return this.items.length; }\n}\n",
    )]);

    let cart = node(&tree, "Cart");
    assert_eq!(cart.kind, NodeKind::Class);
    assert_eq!(names(&tree, cart.children()), vec!["add", "recount"]);

    let add = node(&tree, "add");
    let recount = node(&tree, "recount");
    assert_eq!(add.parent(), Some(cart.id()));
    assert_eq!(params(add), vec!["item"]);
    assert_eq!(add.calls().len(), 1);
    assert!(add.calls().contains(&recount.id()));
}

#[test]
fn test_function_values() {
    let (tree, _) = parse(&[(
        "api.js",
        "const double = (x) => x * 2;\n\
         const inc = y => y + 1;\n\
         const square = function (n) { return n * n; };\n\
         module.exports.triple = function (t) { return t * 3; };\n\
         const api = { run(job) { return double(job); }, stop: (id) => square(id) };\n",
    )]);

    let file = &tree[tree.roots()[0]];
    assert_eq!(
        names(&tree, file.children()),
        vec!["double", "inc", "square", "triple", "run", "stop"]
    );
    assert_eq!(params(node(&tree, "double")), vec!["x"]);
    assert_eq!(params(node(&tree, "inc")), vec!["y"]);
    assert_eq!(params(node(&tree, "square")), vec!["n"]);
    assert_eq!(params(node(&tree, "triple")), vec!["t"]);
    assert_eq!(params(node(&tree, "stop")), vec!["id"]);

    let double = node(&tree, "double");
    let square = node(&tree, "square");
    assert!(node(&tree, "run").calls().contains(&double.id()));
    assert!(node(&tree, "stop").calls().contains(&square.id()));

    // The declarator is the declaration, the arrow's expression is its body.
    let source = "const double = (x) => x * 2;";
    assert_eq!(double.location.span(), 6..source.len() - 1);
    assert_eq!(double.location.body_span(), 22..27);
}

#[test]
fn test_parameter_patterns() {
    let (tree, _) = parse(&[("a.js", "function f(a, b = 2, { c }, ...rest) { return a; }\n")]);
    assert_eq!(params(node(&tree, "f")), vec!["a", "b", "rest"]);
}

#[test]
fn test_nested_declarations() {
    let (tree, _) = parse(&[(
        "a.js",
        "function outer() {\n  function inner() { return 1; }\n  return inner();\n}\n",
    )]);
    let outer = node(&tree, "outer");
    let inner = node(&tree, "inner");
    assert_eq!(inner.parent(), Some(outer.id()));
    assert!(outer.calls().contains(&inner.id()));
}

#[test]
fn test_unresolved_calls_are_dropped() {
    let (tree, _) = parse(&[("a.js", "function f() { console.log(1); g(); obj.h(); }\n")]);
    assert!(node(&tree, "f").calls().is_empty());
}

#[test]
fn test_tokens_skip_comments_and_keep_literals_whole() {
    let source = "let s = \"a b\"; // note\nlet r = /x+/g;";
    let (tree, files) = parse(&[("a.js", source)]);
    let file = &tree[tree.roots()[0]];
    let index = tree.tokens_for(&file.location.file).unwrap();
    let bytes = &files[&std::path::PathBuf::from("a.js")];

    let texts: Vec<&str> = index
        .tokens()
        .iter()
        .map(|t| std::str::from_utf8(&bytes[t.range()]).unwrap())
        .collect();
    assert_eq!(
        texts,
        vec!["let", "s", "=", "\"a b\"", ";", "let", "r", "=", "/x+/g", ";"]
    );
}

#[test]
fn test_namespace_is_parent_directory() {
    let (tree, _) = parse(&[("lib/util.js", "function f() {}\n"), ("main.js", "f();\n")]);
    assert_eq!(tree.roots().len(), 2);

    let util = &tree[tree.roots()[0]];
    assert_eq!(util.local_name, "util.js");
    assert_eq!(util.namespace.as_deref(), Some("lib"));
    assert_eq!(util.qualified_name(), "lib/util.js");

    let main = &tree[tree.roots()[1]];
    assert_eq!(main.qualified_name(), "main.js");
    // Calls are only resolved within a file.
    assert!(main.calls().is_empty());
}

#[test]
fn test_syntax_errors_still_yield_a_tree() {
    let (tree, _) = parse(&[("broken.js", "function ok() { return 1; }\nfunction broken( {\n")]);
    assert_eq!(tree.roots().len(), 1);
    assert!(tree.iter().any(|n| n.local_name == "ok"));
}

#[test]
fn test_analyzer_metadata() {
    let analyzer = JsAnalyzer::new().unwrap();
    assert_eq!(analyzer.name(), "javascript");
    assert!(analyzer.supported_extensions().contains(&"mjs"));
}
