use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const PAGE: &str = r#"<html><body><div id="main" class="card highlight"><p style="color:red">Hi</p></div></body></html>"#;

fn html2css(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_html2css"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run html2css")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =========================================================================
// Arguments and missing inputs
// =========================================================================

#[test]
fn test_no_arguments_prints_usage() {
    let output = html2css(&[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn test_build_without_inputs_fails() {
    let output = html2css(&["build"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_html_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.html");
    let output = html2css(&["build", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist."));
    assert!(!dir.path().join("missing.css").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

// =========================================================================
// build
// =========================================================================

#[test]
fn test_build_writes_css_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", PAGE);

    let output = html2css(&["build", &input]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("CSS file has been generated at"));

    let css = fs::read_to_string(dir.path().join("index.css")).unwrap();
    assert_eq!(
        css,
        "html {\n    /* Add your styles here */\n}\n\n\
         body {\n    /* Add your styles here */\n}\n\n\
         div {\n    /* Add your styles here */\n}\n\n\
         p {\n    color:red;\n}\n\n\
         .card {\n    /* Add your styles here */\n}\n\n\
         .highlight {\n    /* Add your styles here */\n}\n\n\
         #main {\n    /* Add your styles here */\n}\n"
    );
}

#[test]
fn test_build_with_local_stylesheet_and_breakpoint() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", PAGE);
    let sheet = write(
        dir.path(),
        "site.css",
        ".card { color: blue; } .unused { color: green; }\n\
         @media (max-width: 480px) { .card { padding: 0; } .unused { margin: 0; } }",
    );

    let output = html2css(&["build", &input, "--css", &sheet, "--mobile"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Mobile CSS file has been generated at"));

    let base = fs::read_to_string(dir.path().join("index.css")).unwrap();
    assert!(base.contains(".card {\n    color: blue;\n}"));
    assert!(!base.contains(".unused {"));
    assert!(!base.contains("padding"));

    let mobile = fs::read_to_string(dir.path().join("index_mobile.css")).unwrap();
    assert_eq!(
        mobile,
        "@media (max-width: 480px) {\n    .card {\n        padding: 0;\n    }\n}\n"
    );
}

#[test]
fn test_build_out_dir() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "about.html", "<p>x</p>");
    let out = dir.path().join("dist");

    let output = html2css(&["build", &input, "--out-dir", out.to_str().unwrap(), "--tv"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(out.join("about.css").is_file());
    assert!(out.join("about_tv.css").is_file());
    assert!(!dir.path().join("about.css").exists());
}

#[test]
fn test_build_multiple_inputs_named_after_first() {
    let dir = TempDir::new().unwrap();
    let first = write(dir.path(), "home.html", r#"<p class="intro">a</p>"#);
    let second = write(dir.path(), "contact.html", r#"<form id="contact">b</form>"#);

    let output = html2css(&["build", &first, &second]);
    assert!(output.status.success(), "{}", stderr(&output));

    let css = fs::read_to_string(dir.path().join("home.css")).unwrap();
    assert!(css.contains("form {"));
    assert!(css.contains(".intro {"));
    assert!(css.contains("#contact {"));
    assert!(!dir.path().join("contact.css").exists());
}

// =========================================================================
// External stylesheet sources
// =========================================================================

#[test]
fn test_default_css_next_to_input() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", "<p>x</p>");
    write(dir.path(), "default.css", "p { line-height: 1.5; }");

    let output = html2css(&["print", &input]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "p {\n    line-height: 1.5;\n}\n");
}

#[test]
fn test_linked_stylesheet_resolved_against_input_dir() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    write(&dir.path().join("css"), "main.css", ".lead { font-weight: bold; }");
    let input = write(
        dir.path(),
        "index.html",
        r#"<link rel="stylesheet" href="css/main.css"><p class="lead">x</p>"#,
    );

    let output = html2css(&["print", &input, "--placeholder", "empty"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let css = stdout(&output);
    assert!(css.contains(".lead {\n    font-weight: bold;\n}"));

    let ignored = html2css(&["print", &input, "--no-links"]);
    assert!(!stdout(&ignored).contains("font-weight"));
}

#[test]
fn test_css_none_disables_every_source() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "default.css", "p { color: red; }");
    write(dir.path(), "linked.css", "p { margin: 0; }");
    let input = write(
        dir.path(),
        "index.html",
        r#"<link rel="stylesheet" href="linked.css"><p>x</p>"#,
    );

    let output = html2css(&["print", &input, "--css", "none", "--mobile"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "link {\n    /* Add your styles here */\n}\n\n\
         p {\n    /* Add your styles here */\n}\n\n\
         @media (max-width: 480px) {\n    link {\n    }\n\n    p {\n    }\n}\n"
    );
}

#[test]
fn test_missing_stylesheet_degrades() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "index.html",
        r#"<link rel="stylesheet" href="gone.css"><p>x</p>"#,
    );
    let missing = dir.path().join("nope.css");

    let output = html2css(&["print", &input, "--css", missing.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("p {"));
    assert!(stderr(&output).contains("does not exist."));
}

#[test]
fn test_root_block_first() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", "<body><p>x</p></body>");
    let sheet = write(dir.path(), "vars.css", ":root { --main-color: #fff; }");

    let output = html2css(&["print", &input, "--css", &sheet]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).starts_with(":root {\n    --main-color: #fff;\n}\n"));
}

// =========================================================================
// print options
// =========================================================================

#[test]
fn test_print_exclude_preset_and_order() {
    let dir = TempDir::new().unwrap();
    let input = write(
        dir.path(),
        "index.html",
        r#"<head><title>t</title></head><div class="box"><a id="top">x</a></div>"#,
    );

    let output = html2css(&[
        "print",
        &input,
        "--css",
        "none",
        "--exclude-preset",
        "structural",
        "--exclude",
        "a",
        "--order",
        "alphabetical",
        "--placeholder",
        "empty",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), ".box {\n}\n\n#top {\n}\n");
}

#[test]
fn test_print_rejects_unknown_option_value() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", "<p>x</p>");

    let output = html2css(&["print", &input, "--order", "random"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("random"));
}

#[test]
fn test_print_breakpoints_in_order() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", "<p>x</p>");

    let output = html2css(&["print", &input, "--css", "none", "--tv", "--mobile", "--tablet"]);
    let css = stdout(&output);
    let mobile = css.find("(max-width: 480px)").unwrap();
    let tablet = css.find("(min-width: 481px)").unwrap();
    let tv = css.find("(min-width: 1201px)").unwrap();
    assert!(mobile < tablet && tablet < tv);
}

// =========================================================================
// selectors / sort
// =========================================================================

#[test]
fn test_selectors_lists_grouped() {
    let dir = TempDir::new().unwrap();
    let input = write(dir.path(), "index.html", PAGE);
    write(dir.path(), "default.css", ".ignored { x: 1 }");

    let output = html2css(&["selectors", &input]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "html\nbody\ndiv\np\n.card\n.highlight\n#main\n"
    );
}

#[test]
fn test_sort_stylesheet() {
    let dir = TempDir::new().unwrap();
    let sheet = write(dir.path(), "style.css", "p { color: red; }\n.btn { x: 1; }\nbody {margin:0}");

    let output = html2css(&["sort", &sheet]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), ".btn { x: 1; }\nbody {margin:0}\np { color: red; }\n");
}

#[test]
fn test_sort_missing_file() {
    let output = html2css(&["sort", "definitely/not/here.css"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist."));
}
