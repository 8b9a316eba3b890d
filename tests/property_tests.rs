//! Property-based tests for tskv_logger using proptest

use std::sync::Arc;

use proptest::prelude::*;
use tskv_logger::info_to;
use tskv_logger::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Trace),
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warning),
        Just(Level::Error),
        Just(Level::Critical),
    ]
}

fn capture_logger(level: Level, limit: usize) -> (Logger, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder()
        .level(level)
        .shared_sink(Arc::clone(&sink))
        .message_limit(limit)
        .build()
        .unwrap();
    (logger, sink)
}

fn text_field(record: &str) -> &str {
    record.split("\ttext=").nth(1).expect("text field")
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level names round-trip through parsing
    #[test]
    fn test_level_str_round_trip(level in any_level()) {
        let parsed: Level = level.as_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level ordering is consistent with its numeric representation
    #[test]
    fn test_level_ordering_matches_repr(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
        prop_assert_eq!(a >= b, (a as u8) >= (b as u8));
        prop_assert_eq!(a > b, (a as u8) > (b as u8));
    }

    /// A record is written exactly when its level passes the threshold
    #[test]
    fn test_emitted_iff_level_passes_threshold(
        record_level in any_level(),
        threshold in any_level(),
    ) {
        let (logger, sink) = capture_logger(threshold, 10_000);
        logger.record(record_level).append("probe");
        let expected = usize::from(record_level >= threshold);
        prop_assert_eq!(sink.take().len(), expected);
        prop_assert_eq!(logger.metrics().emitted(), expected as u64);
    }
}

// ============================================================================
// Escaping Tests
// ============================================================================

proptest! {
    /// Value-mode escaping is lossless
    #[test]
    fn test_escape_value_round_trip(original in any::<String>()) {
        let escaped = escape(&original, EscapeMode::Value);
        prop_assert_eq!(unescape(&escaped), original);
    }

    /// Escaped output never contains raw reserved characters
    #[test]
    fn test_escaped_output_has_no_raw_reserved_chars(
        original in any::<String>(),
        key_mode in any::<bool>(),
    ) {
        let mode = if key_mode { EscapeMode::Key } else { EscapeMode::Value };
        let escaped = escape(&original, mode);
        prop_assert!(!escaped.contains(['\t', '\n', '\r']));
        // '=' may appear only as the second half of a \= escape
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                chars.next();
                continue;
            }
            prop_assert_ne!(c, '=');
        }
        if key_mode {
            prop_assert!(!escaped.contains('.'));
        }
    }

    /// Any message survives the trip through a full record
    #[test]
    fn test_record_is_single_line_and_round_trips(message in any::<String>()) {
        let (logger, sink) = capture_logger(Level::Info, usize::MAX);
        info_to!(logger, "{}", message);
        let records = sink.take();
        prop_assert_eq!(records.len(), 1);
        let record = &records[0];
        prop_assert!(!record.contains('\n'));
        prop_assert!(!record.contains('\r'));
        prop_assert_eq!(unescape(text_field(record)), message);
    }

    /// Extra fields keep their value through encode and parse
    #[test]
    fn test_extra_fields_parse_back(
        key in "[a-z][a-z0-9_.]{0,15}",
        value in any::<String>(),
    ) {
        let encoded_key = key.replace('.', "_");
        prop_assume!(!["timestamp", "level", "module", "thread_id", "trace_id", "span_id", "text"]
            .contains(&encoded_key.as_str()));

        let (logger, sink) = capture_logger(Level::Info, 10_000);
        logger
            .record(Level::Info)
            .extra(key.clone(), value.clone())
            .append("probe");
        let records = sink.take();
        let prefix = format!("{encoded_key}=");
        let field = records[0]
            .split('\t')
            .find(|f| f.starts_with(&prefix))
            .expect("extra field");
        prop_assert_eq!(unescape(&field[prefix.len()..]), value);
    }
}

// ============================================================================
// Rendering Tests
// ============================================================================

proptest! {
    /// Fixed-width hex is always 2x the byte width, lowercase, lossless
    #[test]
    fn test_hex_fixed_width(value in any::<u32>()) {
        let rendered = Hex::new(value).to_string();
        prop_assert_eq!(rendered.len(), 8);
        prop_assert!(rendered
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        prop_assert_eq!(u32::from_str_radix(&rendered, 16).unwrap(), value);
    }

    /// Short hex has no leading zeros and stays lossless
    #[test]
    fn test_hex_short_is_minimal(value in any::<u64>()) {
        let rendered = HexShort::new(value).to_string();
        prop_assert!(!rendered.is_empty());
        if value == 0 {
            prop_assert_eq!(rendered.as_str(), "0");
        } else {
            prop_assert!(!rendered.starts_with('0'));
            prop_assert_eq!(u64::from_str_radix(&rendered, 16).unwrap(), value);
        }
    }

    /// The range marker accounts for every element not rendered
    #[test]
    fn test_range_marker_accounts_for_every_element(
        elems in proptest::collection::vec(0u32..1000, 0..40),
        limit in 1usize..200,
    ) {
        let (logger, sink) = capture_logger(Level::Info, limit);
        logger.record(Level::Info).append(elems.as_slice());
        let records = sink.take();
        let text = text_field(&records[0]).to_string();
        prop_assert!(text.starts_with('['));
        prop_assert!(text.ends_with(']'));

        let inner = &text[1..text.len() - 1];
        let rendered_count = |part: &str| {
            let part = part.trim_end_matches(' ');
            if part.is_empty() {
                0
            } else {
                part.split(", ").count()
            }
        };
        if let Some(pos) = inner.find("...(") {
            let marker = &inner[pos..];
            let remaining: usize = marker
                .strip_prefix("...(")
                .and_then(|m| m.strip_suffix(" more)"))
                .expect("exact count marker")
                .parse()
                .unwrap();
            prop_assert_eq!(rendered_count(&inner[..pos]) + remaining, elems.len());
        } else {
            prop_assert_eq!(rendered_count(inner), elems.len());
        }
    }
}
