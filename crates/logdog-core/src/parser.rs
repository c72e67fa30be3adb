//! Logcat `threadtime` line parsing and stack-trace continuation detection
//!
//! Expected shape: `MM-DD HH:MM:SS.mmm  PID  TID P TAG: MESSAGE`. Parsing is
//! total: anything that does not have that shape becomes an
//! [`Severity::Unknown`] entry carrying the raw text.

use crate::types::{LogEntry, Severity};

/// Minimum whitespace-delimited tokens in a threadtime line
const MIN_FIELDS: usize = 6;

/// Shapes of the date and time tokens; `9` stands for any ASCII digit
const DATE_SHAPE: &str = "99-99";
const TIME_SHAPE: &str = "99:99:99.999";

/// Message prefixes that mark a line as part of a stack trace
const STACK_TRACE_PREFIXES: [&str; 5] = ["at ", "Caused by:", "Suppressed:", "...", "Stack trace:"];

/// Parse one raw logcat line. Never fails.
pub fn parse_line(raw: &str) -> LogEntry {
    let mut fields = raw.split_whitespace();
    let tokens: Vec<&str> = fields.by_ref().take(MIN_FIELDS).collect();
    if tokens.len() < MIN_FIELDS {
        return LogEntry::unparsed(raw);
    }
    let Some(severity) = threadtime_severity(&tokens) else {
        return LogEntry::unparsed(raw);
    };

    let mut entry = LogEntry {
        timestamp: format!("{} {}", tokens[0], tokens[1]),
        pid: tokens[2].to_string(),
        tid: tokens[3].to_string(),
        severity,
        raw: raw.to_string(),
        ..Default::default()
    };

    let remainder = remainder_after_severity(raw, &tokens[..5]).trim();
    match remainder.find(':') {
        Some(colon) => {
            entry.tag = remainder[..colon].trim().to_string();
            let message = &remainder[colon + 1..];
            entry.message = message.strip_prefix(' ').unwrap_or(message).to_string();
        }
        None => entry.message = remainder.to_string(),
    }

    entry
}

/// Severity of a line whose leading tokens have the threadtime shape.
///
/// Any single letter is accepted in the severity column; letters outside
/// the table map to [`Severity::Unknown`].
fn threadtime_severity(tokens: &[&str]) -> Option<Severity> {
    let shaped = has_shape(tokens[0], DATE_SHAPE)
        && has_shape(tokens[1], TIME_SHAPE)
        && tokens[2].parse::<u32>().is_ok()
        && tokens[3].parse::<u32>().is_ok();
    if !shaped {
        return None;
    }

    let mut chars = tokens[4].chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(Severity::from_char(c)),
        _ => None,
    }
}

fn has_shape(token: &str, shape: &str) -> bool {
    token.len() == shape.len()
        && token.bytes().zip(shape.bytes()).all(|(t, s)| match s {
            b'9' => t.is_ascii_digit(),
            _ => t == s,
        })
}

/// Slice of `raw` after the first five tokens
fn remainder_after_severity<'a>(raw: &'a str, leading: &[&str]) -> &'a str {
    let mut rest = raw;
    for token in leading {
        match rest.find(token) {
            Some(pos) => rest = &rest[pos + token.len()..],
            None => return "",
        }
    }
    rest
}

/// True when a message looks like a stack frame or trace header.
///
/// Leading whitespace is ignored, since frames usually arrive tab-indented.
pub fn is_stack_trace_line(message: &str) -> bool {
    let trimmed = message.trim_start();
    STACK_TRACE_PREFIXES
        .iter()
        .any(|prefix| trimmed.starts_with(prefix))
}

/// True when `entry` directly continues `prev`: same origin and a
/// stack-trace message.
pub fn continues(prev: &LogEntry, entry: &LogEntry) -> bool {
    entry.same_origin(prev) && is_stack_trace_line(&entry.message)
}

/// Whether `entry` renders as a continuation of the entry before it.
///
/// An entry is a continuation when it shares its origin with `prev` and
/// either its own message is a stack-trace line or the `next` entry continues
/// it. The lookahead keeps the first line of a trace (the exception text)
/// attached to the header line above it.
pub fn is_continuation(prev: Option<&LogEntry>, entry: &LogEntry, next: Option<&LogEntry>) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    if !entry.same_origin(prev) {
        return false;
    }
    is_stack_trace_line(&entry.message) || next.is_some_and(|next| continues(entry, next))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(sev: char, tag: &str, msg: &str) -> String {
        format!("12-14 15:31:12.345  1234  5678 {sev} {tag}: {msg}")
    }

    #[test]
    fn test_parse_basic_line() {
        let entry = parse_line("12-14 15:31:12.345  1234  5678 I ActivityManager: Start proc");
        assert_eq!(entry.timestamp, "12-14 15:31:12.345");
        assert_eq!(entry.pid, "1234");
        assert_eq!(entry.tid, "5678");
        assert_eq!(entry.severity, Severity::Info);
        assert_eq!(entry.tag, "ActivityManager");
        assert_eq!(entry.message, "Start proc");
    }

    #[test]
    fn test_parse_preserves_message_indentation() {
        let entry = parse_line("12-14 15:31:12.345  1234  5678 D MyTag:     Indented message");
        assert_eq!(entry.timestamp, "12-14 15:31:12.345");
        assert_eq!(entry.pid, "1234");
        assert_eq!(entry.tid, "5678");
        assert_eq!(entry.severity, Severity::Debug);
        assert_eq!(entry.tag, "MyTag");
        assert_eq!(entry.message, "    Indented message");
    }

    #[test]
    fn test_parse_trims_tag_padding() {
        let entry = parse_line("01-02 03:04:05.678   100   200 W  chatty   : uid=1000 expire 3 lines");
        assert_eq!(entry.tag, "chatty");
        assert_eq!(entry.message, "uid=1000 expire 3 lines");
        assert_eq!(entry.severity, Severity::Warn);
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let entry = parse_line(&line('E', "Net", "url: http://x:80/a"));
        assert_eq!(entry.tag, "Net");
        assert_eq!(entry.message, "url: http://x:80/a");
    }

    #[test]
    fn test_parse_without_colon() {
        let entry = parse_line("12-14 15:31:12.345  1234  5678 I   no colon here");
        assert_eq!(entry.tag, "");
        assert_eq!(entry.message, "no colon here");
    }

    #[test]
    fn test_parse_empty_message() {
        let entry = parse_line("12-14 15:31:12.345  1234  5678 V Tag: ");
        assert_eq!(entry.tag, "Tag");
        assert_eq!(entry.message, "");
    }

    #[test]
    fn test_parse_malformed_lines() {
        for raw in ["", "--------- beginning of main", "a b c d e", "   "] {
            let entry = parse_line(raw);
            assert_eq!(entry.severity, Severity::Unknown, "input {raw:?}");
            assert_eq!(entry.message, raw);
            assert_eq!(entry.raw, raw);
            assert!(entry.timestamp.is_empty());
            assert!(entry.pid.is_empty());
        }
    }

    #[test]
    fn test_parse_banner_with_many_words() {
        for raw in [
            "--------- beginning of main and more words",
            "--------- switch to crash buffer for good measure",
        ] {
            let entry = parse_line(raw);
            assert_eq!(entry.severity, Severity::Unknown);
            assert_eq!(entry.message, raw);
            assert!(entry.timestamp.is_empty());
            assert!(entry.tag.is_empty());
        }
    }

    #[test]
    fn test_parse_prose_is_not_threadtime() {
        let raw = "the quick brown fox jumps over the lazy dog";
        let entry = parse_line(raw);
        assert_eq!(entry.severity, Severity::Unknown);
        assert_eq!(entry.message, raw);
        assert!(entry.pid.is_empty());
    }

    #[test]
    fn test_parse_rejects_misshapen_fields() {
        for raw in [
            "2024-12-14 15:31:12.345  1234  5678 I Tag: bad date",
            "12-14 15:31:12  1234  5678 I Tag: no millis",
            "12-14 15:31:12.345  pid  5678 I Tag: bad pid",
            "12-14 15:31:12.345  1234  tid I Tag: bad tid",
            "12-14 15:31:12.345  1234  5678 Info Tag: long severity",
            "12-14 15:31:12.345  1234  5678 7 Tag: digit severity",
        ] {
            let entry = parse_line(raw);
            assert_eq!(entry.severity, Severity::Unknown, "input {raw:?}");
            assert_eq!(entry.message, raw, "input {raw:?}");
            assert!(entry.timestamp.is_empty(), "input {raw:?}");
        }
    }

    #[test]
    fn test_parse_unknown_severity_char() {
        let entry = parse_line(&line('X', "Tag", "hello"));
        assert_eq!(entry.severity, Severity::Unknown);
        assert_eq!(entry.tag, "Tag");
        assert_eq!(entry.message, "hello");
    }

    #[test]
    fn test_parse_keeps_raw() {
        let raw = line('I', "Tag", "payload");
        assert_eq!(parse_line(&raw).raw, raw);
    }

    #[test]
    fn test_is_stack_trace_line() {
        assert!(is_stack_trace_line("at com.example.Foo.bar(Foo.java:10)"));
        assert!(is_stack_trace_line("\tat com.example.Foo.bar(Foo.java:10)"));
        assert!(is_stack_trace_line("Caused by: java.lang.NullPointerException"));
        assert!(is_stack_trace_line("Suppressed: java.io.IOException"));
        assert!(is_stack_trace_line("... 12 more"));
        assert!(is_stack_trace_line("Stack trace:"));
        assert!(!is_stack_trace_line("attached to window"));
        assert!(!is_stack_trace_line("java.lang.RuntimeException: boom"));
    }

    #[test]
    fn test_continuation_requires_same_origin() {
        let header = parse_line(&line('E', "AndroidRuntime", "FATAL EXCEPTION: main"));
        let frame = parse_line(&line('E', "AndroidRuntime", "\tat com.example.Main.run(Main.java:3)"));
        let other = parse_line(&line('E', "Other", "\tat com.example.Main.run(Main.java:3)"));

        assert!(is_continuation(Some(&header), &frame, None));
        assert!(!is_continuation(Some(&header), &other, None));
        assert!(!is_continuation(None, &frame, None));
    }

    #[test]
    fn test_continuation_lookahead_for_trace_head() {
        let header = parse_line(&line('E', "AndroidRuntime", "FATAL EXCEPTION: main"));
        let exception = parse_line(&line('E', "AndroidRuntime", "java.lang.RuntimeException: boom"));
        let frame = parse_line(&line('E', "AndroidRuntime", "\tat com.example.Main.run(Main.java:3)"));

        assert!(is_continuation(Some(&header), &exception, Some(&frame)));
        assert!(!is_continuation(Some(&header), &exception, None));
        assert!(!is_continuation(None, &header, Some(&exception)));
    }

    #[test]
    fn test_continues() {
        let a = parse_line(&line('E', "T", "boom"));
        let b = parse_line(&line('E', "T", "Caused by: x"));
        assert!(continues(&a, &b));
        assert!(!continues(&b, &a));
    }
}
