use super::*;
use crate::foundation::error::StyleError;
use crate::text::measure::MonospaceMeasurer;

// 10px per character at size 10 with advance 1.0.
fn setup() -> (MonospaceMeasurer, FontDescriptor) {
    (
        MonospaceMeasurer { advance_em: 1.0 },
        FontDescriptor::new("Mono", 400.0, 10.0),
    )
}

fn texts(lines: &[WrappedLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

#[test]
fn greedy_wrap_fills_lines() {
    let (mut m, font) = setup();
    let lines = WrapRequest::new("the quick brown fox jumps", &font, 100.0)
        .collect(&mut m)
        .unwrap();
    assert_eq!(texts(&lines), vec!["the quick", "brown fox", "jumps"]);
    assert_eq!(lines[0].width, 90.0);
    assert_eq!(lines[2].width, 50.0);
}

#[test]
fn exact_fit_stays_on_one_line() {
    let (mut m, font) = setup();
    let lines = WrapRequest::new("abcd efghi", &font, 100.0)
        .collect(&mut m)
        .unwrap();
    assert_eq!(texts(&lines), vec!["abcd efghi"]);
}

#[test]
fn oversized_word_gets_its_own_line_without_empty_lines() {
    let (mut m, font) = setup();
    let lines = WrapRequest::new("supercalifragilistic is long", &font, 60.0)
        .collect(&mut m)
        .unwrap();
    assert_eq!(texts(&lines), vec!["supercalifragilistic", "is", "long"]);
    assert!(lines.iter().all(|l| !l.text.is_empty()));

    let lines = WrapRequest::new("a enormousword b", &font, 60.0)
        .collect(&mut m)
        .unwrap();
    assert_eq!(texts(&lines), vec!["a", "enormousword", "b"]);
}

#[test]
fn manual_breaks_split_paragraphs_first() {
    let (mut m, font) = setup();
    let lines = WrapRequest::new("one two\r\nthree\n\nfour", &font, 1000.0)
        .collect(&mut m)
        .unwrap();
    assert_eq!(texts(&lines), vec!["one two", "three", "", "four"]);
}

#[test]
fn lines_respect_width_and_preserve_word_order() {
    let (mut m, font) = setup();
    let text = "lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod tempor";
    for max in [40.0, 70.0, 110.0, 250.0] {
        let lines = WrapRequest::new(text, &font, max).collect(&mut m).unwrap();
        for line in &lines {
            let single_word = !line.text.contains(' ');
            assert!(line.width <= max || single_word, "{line:?} > {max}");
            assert_eq!(m.measure(&line.text, &font).unwrap(), line.width);
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.text.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }
}

#[test]
fn iteration_is_lazy_and_restartable() {
    let (mut m, font) = setup();
    let req = WrapRequest::new("aa bb cc dd", &font, 50.0);
    let first: Vec<_> = req.lines(&mut m).take(1).collect::<Result<_, _>>().unwrap();
    assert_eq!(texts(&first), vec!["aa bb"]);
    let all = req.collect(&mut m).unwrap();
    assert_eq!(texts(&all), vec!["aa bb", "cc dd"]);
}

#[test]
fn measurement_failures_surface_as_errors() {
    struct Broken;
    impl TextMeasurer for Broken {
        fn measure(&mut self, _: &str, _: &FontDescriptor) -> StyleResult<f32> {
            Err(StyleError::measurement("no canvas"))
        }
    }
    let font = FontDescriptor::new("Mono", 400.0, 10.0);
    let err = WrapRequest::new("hello world", &font, 100.0)
        .collect(&mut Broken)
        .unwrap_err();
    assert!(matches!(err, StyleError::Measurement(_)));
}

#[test]
fn empty_text_is_one_empty_line() {
    let (mut m, font) = setup();
    let lines = WrapRequest::new("", &font, 100.0).collect(&mut m).unwrap();
    assert_eq!(texts(&lines), vec![""]);
}
