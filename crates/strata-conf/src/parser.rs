//! Single-pass character state machine over an in-memory buffer.

use strata_trie::Trie;

use crate::config::{Config, Section};
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    SectionStart,
    Section,
    SectionKey,
    SectionValueStart,
    SectionValueQuote,
    SectionValuePostQuoted,
    SectionValue,
    SectionListStart,
    SectionListQuote,
    SectionListPostQuoted,
    SectionList,
}

pub(crate) fn parse(src: &[u8], list_sections: &[&str]) -> Result<Config, ParseError> {
    let mut root: Trie<Section> = Trie::new();

    let mut state = State::Start;
    let mut current = 0usize;
    let mut start = 0usize;

    // section under construction; flushed into the trie when the next
    // header opens or the input ends
    let mut section: Option<(String, Section)> = None;

    let mut key: Option<String> = None;
    let mut value: Option<Vec<u8>> = None;
    let mut escaped = false;

    while current < src.len() {
        let c = src[current];
        let is_last = current == src.len() - 1;

        // escaping applies whenever a value buffer is active, in every
        // state, and is checked before the state dispatch
        if escaped {
            if let Some(buf) = value.as_mut() {
                buf.push(c);
            }
            escaped = false;
            current += 1;
            continue;
        }

        if value.is_some() && c == b'\\' {
            escaped = true;
            current += 1;
            continue;
        }

        match state {
            State::Start => {
                if c == b'#' || c == b';' {
                    while current < src.len()
                        && src[current] != b'\r'
                        && src[current] != b'\n'
                    {
                        current += 1;
                    }
                } else if c == b' ' || c == b'\t' || c == b'\r' || c == b'\n' {
                    // blank between entries
                } else if c == b'[' {
                    state = State::SectionStart;
                } else if let Some((_, open)) = section.as_ref() {
                    start = current;
                    match open {
                        Section::Map(_) => state = State::SectionKey,
                        Section::List(_) => {
                            state = State::SectionListStart;
                            if value.is_none() {
                                value = Some(Vec::new());
                            }
                        }
                    }
                    continue;
                } else {
                    return Err(ParseError::at(
                        src,
                        current,
                        "file must start with section",
                    ));
                }
            }

            State::SectionStart => {
                start = current;
                state = State::Section;
            }

            State::Section => {
                if c == b']' {
                    let name = text(&src[start..current]);
                    let opened = if list_sections.iter().any(|s| *s == name) {
                        Section::List(Vec::new())
                    } else {
                        Section::Map(Trie::new())
                    };
                    // a recurring name replaces the earlier section
                    // wholesale, it is not merged into it
                    if let Some((prev_name, prev)) = section.replace((name, opened)) {
                        root.insert(prev_name.as_bytes(), prev);
                    }
                    state = State::Start;
                } else if c == b'\r' || c == b'\n' {
                    return Err(ParseError::at(
                        src,
                        current,
                        "section names can't have new lines",
                    ));
                }
            }

            State::SectionKey => {
                if c == b'=' {
                    key = Some(text(&src[start..current]));
                    state = State::SectionValueStart;
                    if is_last {
                        if let (Some(k), Some((_, Section::Map(map)))) =
                            (key.take(), section.as_mut())
                        {
                            map.insert(strip(&k).as_bytes(), String::new());
                        }
                    } else if value.is_none() {
                        value = Some(Vec::new());
                    }
                } else if c == b'\r' || c == b'\n' || is_last {
                    let end = if is_last && c != b'\n' && c != b'\r' {
                        src.len()
                    } else {
                        current
                    };
                    let k = text(&src[start..end]);
                    return Err(ParseError::at(
                        src,
                        current,
                        format!("key without value: {k}"),
                    ));
                }
            }

            State::SectionValueStart => {
                if is_blank(c) {
                    // leading whitespace before the value
                } else if c == b'"' {
                    state = State::SectionValueQuote;
                } else if c == b'\r' || c == b'\n' || is_last {
                    state = State::SectionValue;
                    continue;
                } else {
                    if let Some(buf) = value.as_mut() {
                        buf.push(c);
                    }
                    state = State::SectionValue;
                }
            }

            State::SectionValueQuote => {
                if c == b'"' {
                    if let (Some(k), Some(buf), Some((_, Section::Map(map)))) =
                        (key.take(), value.take(), section.as_mut())
                    {
                        map.insert(strip(&k).as_bytes(), text(&buf));
                    }
                    state = State::SectionValuePostQuoted;
                } else if let Some(buf) = value.as_mut() {
                    buf.push(c);
                }
            }

            State::SectionValuePostQuoted => {
                if is_blank(c) {
                    // trailing whitespace after the closing quote
                } else if c == b'\r' || c == b'\n' || is_last {
                    state = State::Start;
                } else {
                    return Err(ParseError::at(
                        src,
                        current,
                        "invalid value for key, should not have anything after quotes",
                    ));
                }
            }

            State::SectionValue => {
                if c == b'\r' || c == b'\n' || is_last {
                    if is_last && c != b'\r' && c != b'\n' {
                        if let Some(buf) = value.as_mut() {
                            buf.push(c);
                        }
                    }
                    if let (Some(k), Some(buf), Some((_, Section::Map(map)))) =
                        (key.take(), value.take(), section.as_mut())
                    {
                        map.insert(strip(&k).as_bytes(), rstrip(&text(&buf)).to_string());
                    }
                    state = State::Start;
                } else if let Some(buf) = value.as_mut() {
                    buf.push(c);
                }
            }

            State::SectionListStart => {
                if is_blank(c) {
                    // leading whitespace before the item
                } else if c == b'"' {
                    state = State::SectionListQuote;
                } else {
                    if let Some(buf) = value.as_mut() {
                        buf.push(c);
                    }
                    state = State::SectionList;
                }
            }

            State::SectionListQuote => {
                if c == b'"' {
                    if let (Some(buf), Some((_, Section::List(items)))) =
                        (value.take(), section.as_mut())
                    {
                        items.push(text(&buf));
                    }
                    state = State::SectionListPostQuoted;
                } else if let Some(buf) = value.as_mut() {
                    buf.push(c);
                }
            }

            State::SectionListPostQuoted => {
                if is_blank(c) {
                    // trailing whitespace after the closing quote
                } else if c == b'\r' || c == b'\n' || is_last {
                    state = State::Start;
                } else {
                    return Err(ParseError::at(
                        src,
                        current,
                        "invalid value for list item, should not have anything after quotes",
                    ));
                }
            }

            State::SectionList => {
                if c == b'\r' || c == b'\n' || is_last {
                    if is_last && c != b'\r' && c != b'\n' {
                        if let Some(buf) = value.as_mut() {
                            buf.push(c);
                        }
                    }
                    if let (Some(buf), Some((_, Section::List(items)))) =
                        (value.take(), section.as_mut())
                    {
                        items.push(strip(&text(&buf)).to_string());
                    }
                    state = State::Start;
                } else if let Some(buf) = value.as_mut() {
                    buf.push(c);
                }
            }
        }

        current += 1;
    }

    if let Some((name, open)) = section.take() {
        root.insert(name.as_bytes(), open);
    }

    Ok(Config { root })
}

fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\x0c' | b'\x0b')
}

fn strip(s: &str) -> &str {
    s.trim_matches(is_space)
}

fn rstrip(s: &str) -> &str {
    s.trim_end_matches(is_space)
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
