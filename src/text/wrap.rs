use crate::foundation::error::StyleResult;
use crate::text::measure::{FontDescriptor, TextMeasurer};

/// One wrapped output line with its measured width.
#[derive(Clone, Debug, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
}

/// Greedy word-wrap request over a text that may contain manual line breaks.
#[derive(Clone, Debug, PartialEq)]
pub struct WrapRequest<'a> {
    pub text: &'a str,
    pub font: &'a FontDescriptor,
    pub max_width: f32,
}

impl<'a> WrapRequest<'a> {
    pub fn new(text: &'a str, font: &'a FontDescriptor, max_width: f32) -> Self {
        Self {
            text,
            font,
            max_width,
        }
    }

    /// Lazily wrap the text. Each call starts a fresh pass over the input.
    pub fn lines<'m, M: TextMeasurer + ?Sized>(&self, measurer: &'m mut M) -> WrappedLines<'a, 'm, M> {
        WrappedLines {
            paragraphs: self.text.split('\n'),
            words: None,
            current: String::new(),
            current_width: 0.0,
            font: self.font,
            max_width: self.max_width,
            measurer,
        }
    }

    /// Collect every line, stopping at the first measurement failure.
    pub fn collect<M: TextMeasurer + ?Sized>(&self, measurer: &mut M) -> StyleResult<Vec<WrappedLine>> {
        self.lines(measurer).collect()
    }
}

/// Iterator produced by [`WrapRequest::lines`].
///
/// Paragraphs are split on `\n` first, then words are accumulated while the space-joined line still
/// fits `max_width`. A word that alone exceeds the width is emitted unsplit on its own line; an empty
/// paragraph yields an empty line so manual blank lines survive.
pub struct WrappedLines<'a, 'm, M: TextMeasurer + ?Sized> {
    paragraphs: std::str::Split<'a, char>,
    words: Option<std::str::SplitWhitespace<'a>>,
    current: String,
    current_width: f32,
    font: &'a FontDescriptor,
    max_width: f32,
    measurer: &'m mut M,
}

impl<M: TextMeasurer + ?Sized> WrappedLines<'_, '_, M> {
    fn take_line(&mut self, next_word: Option<(&str, f32)>) -> WrappedLine {
        let (text, width) = match next_word {
            Some((w, ww)) => (w.to_owned(), ww),
            None => (String::new(), 0.0),
        };
        let line = WrappedLine {
            text: std::mem::replace(&mut self.current, text),
            width: self.current_width,
        };
        self.current_width = width;
        line
    }
}

impl<M: TextMeasurer + ?Sized> Iterator for WrappedLines<'_, '_, M> {
    type Item = StyleResult<WrappedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(words) = self.words.as_mut() else {
                let paragraph = self.paragraphs.next()?;
                let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
                let mut words = paragraph.split_whitespace();
                let Some(first) = words.next() else {
                    return Some(Ok(WrappedLine {
                        text: String::new(),
                        width: 0.0,
                    }));
                };
                let width = match self.measurer.measure(first, self.font) {
                    Ok(w) => w,
                    Err(e) => return Some(Err(e)),
                };
                self.current = first.to_owned();
                self.current_width = width;
                self.words = Some(words);
                continue;
            };

            let Some(word) = words.next() else {
                self.words = None;
                return Some(Ok(self.take_line(None)));
            };

            let candidate = format!("{} {}", self.current, word);
            let candidate_width = match self.measurer.measure(&candidate, self.font) {
                Ok(w) => w,
                Err(e) => {
                    self.words = None;
                    return Some(Err(e));
                }
            };
            if candidate_width <= self.max_width {
                self.current = candidate;
                self.current_width = candidate_width;
                continue;
            }

            let word_width = match self.measurer.measure(word, self.font) {
                Ok(w) => w,
                Err(e) => {
                    self.words = None;
                    return Some(Err(e));
                }
            };
            return Some(Ok(self.take_line(Some((word, word_width)))));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
