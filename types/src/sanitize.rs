//! Terminal text sanitization for fault display.
//!
//! Fault messages come from panic payloads, which may embed arbitrary data
//! (file contents, user input, network responses). Terminal emulators act on
//! escape sequences that can rewrite the screen, set the clipboard (OSC 52)
//! or hide hyperlinks (OSC 8), so anything shown in the fallback view or
//! written to the log goes through [`sanitize_terminal_text`] first.

use std::borrow::Cow;
use std::iter::Peekable;
use std::str::Chars;

const ESC: char = '\x1b';
const BEL: char = '\x07';
const DEL: char = '\x7f';
/// Single-byte C1 equivalent of `ESC [`.
const C1_CSI: char = '\u{9b}';

/// Strip escape sequences and control characters from `input`.
///
/// Newlines, tabs and carriage returns survive; every other C0 control, C1
/// control and DEL is dropped, together with the full body of any ANSI
/// sequence it introduces. Clean input is returned borrowed.
///
/// ```
/// use ward_types::sanitize_terminal_text;
///
/// assert_eq!(sanitize_terminal_text("plain"), "plain");
/// assert_eq!(sanitize_terminal_text("a\x1b[2Jb"), "ab");
/// ```
#[must_use]
pub fn sanitize_terminal_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_unsafe) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESC => skip_escape(&mut chars),
            C1_CSI => skip_csi(&mut chars),
            c if is_unsafe(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Truncate `input` to at most `max_chars` characters, appending `...` when
/// anything was cut.
#[must_use]
pub fn truncate_chars(input: &str, max_chars: usize) -> Cow<'_, str> {
    match input.char_indices().nth(max_chars) {
        None => Cow::Borrowed(input),
        Some((cut, _)) => {
            let keep = input[..cut]
                .char_indices()
                .nth(max_chars.saturating_sub(3))
                .map_or(cut, |(idx, _)| idx);
            Cow::Owned(format!("{}...", &input[..keep]))
        }
    }
}

fn is_unsafe(c: char) -> bool {
    match c {
        '\n' | '\t' | '\r' => false,
        c if c <= '\x1f' => true,
        DEL => true,
        '\u{80}'..='\u{9f}' => true,
        _ => false,
    }
}

fn skip_escape(chars: &mut Peekable<Chars<'_>>) {
    match chars.peek() {
        Some('[') => {
            chars.next();
            skip_csi(chars);
        }
        Some(']') => {
            chars.next();
            skip_string(chars, true);
        }
        Some('P' | '^' | '_' | 'X') => {
            chars.next();
            skip_string(chars, false);
        }
        // Charset designation and line attributes carry one argument.
        Some('(' | ')' | '*' | '+' | '#' | ' ' | '%') => {
            chars.next();
            chars.next();
        }
        Some('7' | '8' | '=' | '>' | '<' | 'c' | 'D' | 'E' | 'H' | 'M' | 'N' | 'O' | 'Z') => {
            chars.next();
        }
        _ => {}
    }
}

/// CSI: parameter and intermediate bytes (0x20-0x3F) up to a final byte (0x40-0x7E).
fn skip_csi(chars: &mut Peekable<Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        match c {
            '\x40'..='\x7e' => {
                chars.next();
                return;
            }
            '\x20'..='\x3f' => {
                chars.next();
            }
            _ => return,
        }
    }
}

/// OSC/DCS/PM/APC bodies end at ST (`ESC \`); OSC also accepts BEL.
fn skip_string(chars: &mut Peekable<Chars<'_>>, bel_terminates: bool) {
    while let Some(c) = chars.next() {
        if c == BEL && bel_terminates {
            return;
        }
        if c == ESC && chars.peek() == Some(&'\\') {
            chars.next();
            return;
        }
    }
}
