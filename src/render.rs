//! Safe, bounded rendering of arbitrary values for diagnostics.
//!
//! Rendering is total: every tag produces a printable, single-line string,
//! nothing is serialized, and string payloads are cut to a character budget
//! without ever splitting a multi-byte character.

use crate::raw_value::{Candidate, RawValue, Surface};

/// Character budget applied to string payloads.
pub const DEFAULT_LIMIT: usize = 50;

const ELLIPSIS: char = '…';

/// Renders a raw value with the default limit.
pub fn render(value: &RawValue) -> String {
    render_with_limit(value, DEFAULT_LIMIT)
}

/// Renders a raw value into a single printable line.
pub fn render_with_limit(value: &RawValue, limit: usize) -> String {
    match value {
        RawValue::Null => "null".to_owned(),
        RawValue::Bool(true) => "true".to_owned(),
        RawValue::Bool(false) => "false".to_owned(),
        RawValue::Int(value) => value.to_string(),
        RawValue::Float(value) => value.to_string(),
        RawValue::Str(value) => quote(value, limit),
        RawValue::List(items) => format!("array({})", items.len()),
        RawValue::Opaque(opaque) => {
            let name = short_name(opaque.type_name());
            match opaque.surface() {
                Surface::Resource { kind: Some(kind) } => format!("resource ({})", kind),
                Surface::Resource { kind: None } => "resource".to_owned(),
                Surface::Text(text) => format!("({}){}", name, quote(&text, limit)),
                Surface::Count(count) => format!("{}({})", name, count),
                Surface::Plain => name.to_owned(),
            }
        }
    }
}

/// Renders a candidate; wrapped instances show their class and payload.
pub fn render_candidate(candidate: &Candidate) -> String {
    render_candidate_with_limit(candidate, DEFAULT_LIMIT)
}

pub fn render_candidate_with_limit(candidate: &Candidate, limit: usize) -> String {
    match candidate {
        Candidate::Raw(raw) => render_with_limit(raw, limit),
        Candidate::Wrapped(value) => format!(
            "({}){}",
            value.short_class_name(),
            render_with_limit(value.raw(), limit)
        ),
    }
}

/// Keeps only the final `::` path segment of a type name.
pub fn short_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Quotes a string payload: at most `limit` characters, an ellipsis when
/// truncated, quotes and backslashes escaped, control characters spelled out.
fn quote(text: &str, limit: usize) -> String {
    let mut out = String::with_capacity(limit.min(text.len()) + 4);
    out.push('\'');
    let mut chars = text.chars();
    for ch in chars.by_ref().take(limit) {
        match ch {
            '\'' | '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch.is_control() => out.extend(ch.escape_default()),
            ch => out.push(ch),
        }
    }
    if chars.next().is_some() {
        out.push(ELLIPSIS);
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_value::OpaqueSurface;
    use proptest::prelude::*;

    #[derive(Debug)]
    struct Stream {
        kind: Option<String>,
    }

    impl OpaqueSurface for Stream {
        fn type_name(&self) -> &str {
            "tests::Stream"
        }

        fn surface(&self) -> Surface {
            Surface::Resource {
                kind: self.kind.clone(),
            }
        }
    }

    #[derive(Debug)]
    struct Bag(usize);

    impl OpaqueSurface for Bag {
        fn type_name(&self) -> &str {
            "collections::util::Bag"
        }

        fn surface(&self) -> Surface {
            Surface::Count(self.0)
        }
    }

    #[derive(Debug)]
    struct Label(String);

    impl OpaqueSurface for Label {
        fn type_name(&self) -> &str {
            "tests::Label"
        }

        fn surface(&self) -> Surface {
            Surface::Text(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct Blob;

    impl OpaqueSurface for Blob {
        fn type_name(&self) -> &str {
            "tests::Blob"
        }
    }

    #[test]
    fn null_renders_as_literal() {
        assert_eq!(render(&RawValue::Null), "null");
    }

    #[test]
    fn booleans_render_as_literals() {
        assert_eq!(render(&RawValue::Bool(true)), "true");
        assert_eq!(render(&RawValue::Bool(false)), "false");
    }

    #[test]
    fn integers_render_in_plain_decimal() {
        assert_eq!(render(&RawValue::Int(0)), "0");
        assert_eq!(render(&RawValue::Int(1000)), "1000");
        assert_eq!(render(&RawValue::Int(-1000)), "-1000");
        assert_eq!(render(&RawValue::Int(99_999_999_999)), "99999999999");
        assert_eq!(render(&RawValue::Int(-99_999_999_999)), "-99999999999");
    }

    #[test]
    fn floats_render_without_padding() {
        assert_eq!(render(&RawValue::Float(0.0)), "0");
        assert_eq!(render(&RawValue::Float(0.2)), "0.2");
        assert_eq!(render(&RawValue::Float(-8.8)), "-8.8");
    }

    #[test]
    fn strings_are_quoted() {
        assert_eq!(render(&RawValue::Str("".into())), "''");
        assert_eq!(render(&RawValue::Str("Hello!".into())), "'Hello!'");
    }

    #[test]
    fn embedded_quotes_and_backslashes_are_escaped() {
        assert_eq!(render(&RawValue::Str("foo'bar".into())), "'foo\\'bar'");
        assert_eq!(render(&RawValue::Str("a\\b".into())), "'a\\\\b'");
        assert_eq!(render(&RawValue::Str("say \"hi\"".into())), "'say \\\"hi\\\"'");
    }

    #[test]
    fn control_characters_stay_printable() {
        let rendered = render(&RawValue::Str("a\nb".into()));
        assert_eq!(rendered, "'a\\nb'");
    }

    #[test]
    fn long_strings_are_truncated_with_an_ellipsis() {
        let long = "ABCDEFGHIJKLMNO ".repeat(1000);
        let rendered = render(&RawValue::Str(long));

        assert!(rendered.starts_with("'ABCDEFGHIJKLMNO"));
        assert!(rendered.ends_with("…'"));
        // 50 payload characters, the ellipsis, and two quotes.
        assert_eq!(rendered.chars().count(), DEFAULT_LIMIT + 3);
    }

    #[test]
    fn truncation_never_splits_multi_byte_characters() {
        let long = "Ä".repeat(1000);
        let rendered = render(&RawValue::Str(long));

        assert!(rendered.ends_with("ÄÄÄÄÄ…'"));
        assert_eq!(rendered.chars().count(), DEFAULT_LIMIT + 3);
    }

    #[test]
    fn short_strings_get_no_ellipsis() {
        let exact = "x".repeat(DEFAULT_LIMIT);
        let rendered = render(&RawValue::Str(exact));
        assert!(!rendered.contains(ELLIPSIS));
    }

    #[test]
    fn lists_render_as_a_count() {
        assert_eq!(render(&RawValue::List(vec![])), "array(0)");
        assert_eq!(
            render(&RawValue::List(vec![
                RawValue::Int(66),
                RawValue::Int(77),
                RawValue::Int(88),
                RawValue::Int(99),
            ])),
            "array(4)"
        );
    }

    #[test]
    fn resources_render_their_kind() {
        assert_eq!(
            render(&RawValue::opaque(Stream {
                kind: Some("stream".into())
            })),
            "resource (stream)"
        );
        assert_eq!(render(&RawValue::opaque(Stream { kind: None })), "resource");
    }

    #[test]
    fn countable_objects_render_name_and_count() {
        assert_eq!(render(&RawValue::opaque(Bag(0))), "Bag(0)");
        assert_eq!(render(&RawValue::opaque(Bag(7))), "Bag(7)");
    }

    #[test]
    fn text_objects_render_name_and_quoted_text() {
        assert_eq!(
            render(&RawValue::opaque(Label("Hello!".into()))),
            "(Label)'Hello!'"
        );
    }

    #[test]
    fn text_objects_are_truncated_like_strings() {
        let rendered = render(&RawValue::opaque(Label("ABCDEFGHIJKLMNO ".repeat(1000))));
        assert!(rendered.starts_with("(Label)'ABCDEFGHIJKLMNO"));
        assert!(rendered.ends_with("…'"));
    }

    #[test]
    fn plain_objects_render_their_short_name() {
        assert_eq!(render(&RawValue::opaque(Blob)), "Blob");
    }

    #[test]
    fn short_name_keeps_the_final_segment() {
        assert_eq!(short_name("a::b::Widget"), "Widget");
        assert_eq!(short_name("Widget"), "Widget");
        assert_eq!(render(&RawValue::opaque(Bag(1))), "Bag(1)");
    }

    #[test]
    fn custom_limits_apply() {
        let rendered = render_with_limit(&RawValue::Str("abcdef".into()), 3);
        assert_eq!(rendered, "'abc…'");
    }

    proptest! {
        #[test]
        fn rendering_is_total_and_single_line(s in ".*") {
            let rendered = render(&RawValue::Str(s));
            prop_assert!(!rendered.chars().any(char::is_control));
        }

        #[test]
        fn rendering_is_bounded(s in ".*") {
            let rendered = render_with_limit(&RawValue::Str(s), 50);
            // Worst case: every payload character escapes to several
            // characters, plus quotes and the ellipsis.
            prop_assert!(rendered.chars().count() <= 50 * 10 + 3);
        }

        #[test]
        fn int_never_renders_like_its_string_form(i in any::<i64>()) {
            let as_int = render(&RawValue::Int(i));
            let as_str = render(&RawValue::Str(i.to_string()));
            prop_assert_ne!(as_int, as_str);
        }
    }
}
