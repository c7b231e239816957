use crate::parsers::text;

#[test]
fn test_strip_ascii_punctuation() {
    assert_eq!(
        text::strip_punctuation("Hello, world! This is a test."),
        "Hello world This is a test"
    );
}

#[test]
fn test_strip_full_width_punctuation() {
    assert_eq!(text::strip_punctuation("你好，世界！你好。"), "你好世界你好");
}

#[test]
fn test_keeps_word_characters_of_every_script() {
    let input = "naïve café ñandú 日本語 한국어 Ελληνικά snake_case 42";
    assert_eq!(text::strip_punctuation(input), input);
}

#[test]
fn test_keeps_whitespace() {
    assert_eq!(text::strip_punctuation("a -\tb\n— c"), "a \tb\n c");
}

#[test]
fn test_empty_and_punctuation_only() {
    assert_eq!(text::strip_punctuation(""), "");
    assert_eq!(text::strip_punctuation("!?…《》“”"), "");
}
