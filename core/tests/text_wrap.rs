use std::convert::Infallible;

use meshpaint_core::wrap_lines;

/// Every character is 10px wide.
fn monospace(text: &str) -> Result<f64, Infallible> {
    Ok(text.chars().count() as f64 * 10.0)
}

fn wrap(content: &str, max_width: f64) -> Vec<String> {
    match wrap_lines(content, max_width, monospace) {
        Ok(lines) => lines,
        Err(never) => match never {},
    }
}

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap("Hello there", 200.0), vec!["Hello there"]);
}

#[test]
fn wraps_between_words() {
    assert_eq!(
        wrap("aaaa bbbb cccc", 90.0),
        vec!["aaaa bbbb", "cccc"]
    );
}

#[test]
fn overlong_word_breaks_between_characters() {
    let word = "a".repeat(25);
    let lines = wrap(&word, 100.0);
    assert_eq!(lines, vec!["a".repeat(10), "a".repeat(10), "a".repeat(5)]);
}

#[test]
fn long_line_on_narrow_preview_becomes_several_lines() {
    // 200 characters against 90% of a 640px preview
    let content = "a".repeat(200);
    let lines = wrap(&content, 640.0 * 0.9);
    assert!(lines.len() > 1);
    assert!(lines.iter().all(|line| line.chars().count() * 10 <= 576));
    assert_eq!(lines.concat(), content);
}

#[test]
fn newlines_always_break() {
    assert_eq!(wrap("one\n\ntwo", 500.0), vec!["one", "", "two"]);
}

#[test]
fn measure_errors_propagate() {
    let result = wrap_lines("abc", 100.0, |_| Err::<f64, &str>("no context"));
    assert_eq!(result, Err("no context"));
}

#[test]
fn tiny_width_keeps_one_character_per_line() {
    assert_eq!(wrap("abc", 1.0), vec!["a", "b", "c"]);
}
