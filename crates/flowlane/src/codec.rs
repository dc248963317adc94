//! The lane-geometry string codec.
//!
//! Swim-lane dividers are persisted as a single delimited string on the
//! process graph: `token ("|" token)*` where each token is
//! `ident ":" payload` and `ident` is `vline` or `hline` (matched
//! case-insensitively). The payload belongs to the divider itself; this
//! codec only handles the token framing.
//!
//! Decoding is deliberately lenient: tokens with an unknown ident, an
//! empty ident, or no `:` separator are skipped without a diagnostic so
//! that strings written by newer or older producers still load. A payload
//! the divider rejects is skipped too, with a log entry; nothing stops
//! decoding of the remaining tokens.

use log::warn;

use flowlane_core::divider::{DividerLine, Orientation};

/// Encodes dividers to a single lane-geometry string, in iteration order.
///
/// Returns `None` when there are no dividers, signalling "nothing to
/// persist" to the caller (distinct from an empty-but-present string).
pub fn encode<'a, I>(dividers: I) -> Option<String>
where
    I: IntoIterator<Item = &'a DividerLine>,
{
    let tokens: Vec<String> = dividers
        .into_iter()
        .map(|divider| {
            let ident = match divider.orientation() {
                Orientation::Vertical => "vline",
                Orientation::Horizontal => "hline",
            };
            format!("{ident}:{}", divider.encode_geometry())
        })
        .collect();

    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join("|"))
    }
}

/// Decodes a lane-geometry string back into dividers, best effort.
///
/// `None` input yields an empty vector; it is not an error.
pub fn decode(geometry: Option<&str>) -> Vec<DividerLine> {
    let Some(geometry) = geometry else {
        return Vec::new();
    };

    let mut dividers = Vec::new();
    for token in geometry.split('|') {
        let Some((ident, payload)) = token.split_once(':') else {
            continue;
        };
        if ident.is_empty() {
            continue;
        }

        let orientation = if ident.eq_ignore_ascii_case("vline") {
            Orientation::Vertical
        } else if ident.eq_ignore_ascii_case("hline") {
            Orientation::Horizontal
        } else {
            continue;
        };

        match DividerLine::from_geometry(orientation, payload) {
            Ok(divider) => dividers.push(divider),
            Err(reason) => {
                warn!(token = token, reason = reason; "Skipping divider with unreadable payload");
            }
        }
    }
    dividers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_is_none() {
        let dividers: Vec<DividerLine> = Vec::new();
        assert_eq!(encode(&dividers), None);
    }

    #[test]
    fn test_decode_none_is_empty() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn test_encode_joins_tokens() {
        let dividers = vec![
            DividerLine::vertical(10.0, 20.0),
            DividerLine::horizontal(5.0, 5.0),
        ];
        assert_eq!(encode(&dividers), Some("vline:10,20|hline:5,5".to_string()));
    }

    #[test]
    fn test_decode_skips_unknown_idents() {
        let dividers = decode(Some("vline:10,20|garbage:xx|hline:5,5"));

        assert_eq!(dividers.len(), 2);
        assert_eq!(dividers[0].orientation(), Orientation::Vertical);
        assert_eq!(dividers[0].encode_geometry(), "10,20");
        assert_eq!(dividers[1].orientation(), Orientation::Horizontal);
        assert_eq!(dividers[1].encode_geometry(), "5,5");
    }

    #[test]
    fn test_decode_skips_tokens_without_separator() {
        let dividers = decode(Some("vline:1,2|nocolon|hline:3,4"));
        assert_eq!(dividers.len(), 2);
    }

    #[test]
    fn test_decode_skips_empty_ident() {
        let dividers = decode(Some(":1,2|vline:3,4"));
        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_decode_ident_is_case_insensitive() {
        let dividers = decode(Some("VLINE:1,2|HLine:3,4"));
        assert_eq!(dividers.len(), 2);
        assert_eq!(dividers[0].orientation(), Orientation::Vertical);
        assert_eq!(dividers[1].orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_decode_skips_unreadable_payload_and_continues() {
        let dividers = decode(Some("vline:not-a-number|hline:7,8"));
        assert_eq!(dividers.len(), 1);
        assert_eq!(dividers[0].orientation(), Orientation::Horizontal);
    }

    #[test]
    fn test_round_trip_preserves_dividers() {
        let dividers = vec![
            DividerLine::horizontal(40.0, 400.0),
            DividerLine::vertical(120.0, 300.0),
            DividerLine::horizontal(80.0, 400.0),
        ];

        let encoded = encode(&dividers).unwrap();
        let decoded = decode(Some(&encoded));
        assert_eq!(decoded, dividers);
    }
}
