//! Frame codec: converts between [`ProtocolMessage`]s and socket text.
//!
//! The wire form of a message is
//!
//! ```text
//! "[" name "]"                 (no body)
//! "[" name "] " json-body      (with body)
//! ```
//!
//! There is no length prefix and no batching: one frame, one message.
//!
//! The session layer does not call [`encode`]/[`decode`] directly. It is
//! generic over the [`FrameCodec`] trait, and [`TextFrameCodec`] is the
//! implementation used on the real socket.

use serde_json::Value;

use crate::{ProtocolError, ProtocolMessage, UNKNOWN_NAME};

/// Something that can turn messages into text frames and back.
///
/// `Send + Sync + 'static` so a codec can live inside a client that is
/// moved into a Tokio task.
pub trait FrameCodec: Send + Sync + 'static {
    /// Encodes a message into one text frame. Infallible: a
    /// [`ProtocolMessage`] body is already JSON.
    fn encode(&self, message: &ProtocolMessage) -> String;

    /// Decodes one text frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the body is not valid JSON.
    fn decode(&self, frame: &str) -> Result<ProtocolMessage, ProtocolError>;
}

/// The bracketed-name text codec.
///
/// ```rust
/// use yard_protocol::{FrameCodec, ProtocolMessage, TextFrameCodec};
///
/// let codec = TextFrameCodec;
/// let frame = codec.encode(&ProtocolMessage::new("startGame"));
/// assert_eq!(frame, "[startGame]");
///
/// let msg = codec.decode(r#"[game] {"id":"abc"}"#).unwrap();
/// assert_eq!(msg.name, "game");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFrameCodec;

impl FrameCodec for TextFrameCodec {
    fn encode(&self, message: &ProtocolMessage) -> String {
        encode(&message.name, message.body.as_ref())
    }

    fn decode(&self, frame: &str) -> Result<ProtocolMessage, ProtocolError> {
        decode(frame)
    }
}

/// Encodes `name` and an optional body into a text frame.
///
/// A body of `None` or JSON `null` produces `"[name]"` with no trailing
/// space.
pub fn encode(name: &str, body: Option<&Value>) -> String {
    match body {
        Some(body) if !body.is_null() => format!("[{name}] {body}"),
        _ => format!("[{name}]"),
    }
}

/// Decodes a text frame into a [`ProtocolMessage`].
///
/// The frame is split on its first whitespace character:
///
/// - The head must look like `[name]`. Anything else (empty, missing a
///   bracket) yields the name [`UNKNOWN_NAME`]. The name is never an error.
/// - The tail, if present and not blank, is parsed as JSON. A literal
///   `null` is folded into "no body".
///
/// # Errors
/// Returns [`ProtocolError::Decode`] if the tail is not valid JSON. The
/// error is not recovered here; the whole frame is rejected.
pub fn decode(frame: &str) -> Result<ProtocolMessage, ProtocolError> {
    let (head, tail) = match frame.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, Some(tail)),
        None => (frame, None),
    };

    let name = head
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(UNKNOWN_NAME);

    let body = match tail {
        Some(tail) if !tail.trim().is_empty() => {
            let value: Value =
                serde_json::from_str(tail).map_err(ProtocolError::Decode)?;
            (!value.is_null()).then_some(value)
        }
        _ => None,
    };

    Ok(ProtocolMessage {
        name: name.to_string(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // =====================================================================
    // encode
    // =====================================================================

    #[test]
    fn test_encode_with_body() {
        let frame = encode("createGame", Some(&json!({ "number_of_detectives": 4 })));
        assert_eq!(frame, r#"[createGame] {"number_of_detectives":4}"#);
    }

    #[test]
    fn test_encode_without_body_has_no_trailing_space() {
        assert_eq!(encode("startGame", None), "[startGame]");
    }

    #[test]
    fn test_encode_null_body_is_same_as_none() {
        assert_eq!(encode("startGame", Some(&Value::Null)), "[startGame]");
    }

    #[test]
    fn test_encode_scalar_and_array_bodies() {
        assert_eq!(encode("n", Some(&json!(7))), "[n] 7");
        assert_eq!(encode("s", Some(&json!("hi there"))), r#"[s] "hi there""#);
        assert_eq!(encode("a", Some(&json!([1, 2]))), "[a] [1,2]");
    }

    // =====================================================================
    // decode
    // =====================================================================

    #[test]
    fn test_decode_name_only() {
        let msg = decode("[foo]").unwrap();
        assert_eq!(msg, ProtocolMessage::new("foo"));
    }

    #[test]
    fn test_decode_name_and_object_body() {
        let msg = decode(r#"[foo] {"a":1}"#).unwrap();
        assert_eq!(msg.name, "foo");
        assert_eq!(msg.body, Some(json!({ "a": 1 })));
    }

    #[test]
    fn test_decode_body_with_inner_spaces() {
        // Only the first whitespace separates name from body.
        let msg = decode(r#"[error] {"message": "not your turn"}"#).unwrap();
        assert_eq!(msg.body, Some(json!({ "message": "not your turn" })));
    }

    #[test]
    fn test_decode_malformed_name_uses_sentinel() {
        let msg = decode("malformed").unwrap();
        assert_eq!(msg.name, UNKNOWN_NAME);
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_decode_half_bracketed_name_uses_sentinel() {
        assert_eq!(decode("[foo").unwrap().name, UNKNOWN_NAME);
        assert_eq!(decode("foo]").unwrap().name, UNKNOWN_NAME);
    }

    #[test]
    fn test_decode_empty_frame() {
        let msg = decode("").unwrap();
        assert_eq!(msg.name, UNKNOWN_NAME);
        assert_eq!(msg.body, None);
    }

    #[test]
    fn test_decode_unnamed_frame_still_parses_body() {
        let msg = decode(r#" {"a":1}"#).unwrap();
        assert_eq!(msg.name, UNKNOWN_NAME);
        assert_eq!(msg.body, Some(json!({ "a": 1 })));
    }

    #[test]
    fn test_decode_invalid_json_is_an_error() {
        let err = decode("[foo] not-json").unwrap_err();
        assert!(matches!(err, ProtocolError::Decode(_)));
        assert!(err.to_string().starts_with("decode failed"));
    }

    #[test]
    fn test_decode_blank_tail_is_no_body() {
        assert_eq!(decode("[foo] ").unwrap().body, None);
        assert_eq!(decode("[foo]   ").unwrap().body, None);
    }

    #[test]
    fn test_decode_null_body_is_no_body() {
        assert_eq!(decode("[foo] null").unwrap().body, None);
    }

    // =====================================================================
    // round trip
    // =====================================================================

    #[test]
    fn test_round_trip_preserves_name_and_body() {
        let cases = [
            ("createGame", Some(json!({ "number_of_detectives": 4 }))),
            ("joinGame", Some(json!({ "id": "3f1c0b7e-2b8a-4e5e-9a55-3c4b1c1d2e3f" }))),
            ("moveMisterX", Some(json!([{ "station_id": 12, "transport_type": "taxi" }]))),
            ("weird", Some(json!({ "nested": { "list": [1.5, null, "x y"] } }))),
            ("startGame", None),
        ];

        for (name, body) in cases {
            let frame = encode(name, body.as_ref());
            let decoded = decode(&frame).unwrap();
            assert_eq!(decoded.name, name, "frame {frame}");
            assert_eq!(decoded.body, body, "frame {frame}");
        }
    }

    /// Small deterministic generator for JSON bodies.
    struct BodyGen(u64);

    impl BodyGen {
        const STRINGS: [&'static str; 8] = [
            "",
            "x y",
            "  leading and trailing  ",
            "tab\tnew\nline",
            "[bracketed] name",
            "Baker Street \u{1F575}",
            "Zoë, Jürgen, 東京",
            "quote \" and \\ slash",
        ];

        fn next(&mut self) -> u64 {
            self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            self.0 >> 33
        }

        fn value(&mut self, depth: usize) -> Value {
            let pick = if depth == 0 { self.next() % 4 } else { self.next() % 6 };
            match pick {
                0 => json!(self.next() % 2 == 0),
                1 => json!(self.next() as i64 - (1 << 30)),
                // Eighths are exact in binary, so they survive text.
                2 => json!((self.next() % 10_000) as f64 / 8.0 - 600.0),
                3 => json!(Self::STRINGS[(self.next() % 8) as usize]),
                4 => {
                    let len = self.next() % 4;
                    Value::Array((0..len).map(|_| self.value(depth - 1)).collect())
                }
                _ => {
                    let len = self.next() % 4;
                    let mut map = serde_json::Map::new();
                    for i in 0..len {
                        let key = format!("{} {i}", Self::STRINGS[(self.next() % 8) as usize]);
                        map.insert(key, self.value(depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }
    }

    #[test]
    fn test_round_trip_generated_bodies() {
        let mut generator = BodyGen(0x5ca7_1a2d);
        for i in 0..500 {
            let body = generator.value(5);
            let frame = encode("gameState", Some(&body));
            let decoded = decode(&frame).unwrap();
            assert_eq!(decoded.name, "gameState", "case {i}: {frame}");
            // Top-level null folds into "no body".
            let expected = (!body.is_null()).then_some(body);
            assert_eq!(decoded.body, expected, "case {i}: {frame}");
        }
    }

    #[test]
    fn test_round_trip_deep_nesting() {
        let mut body = json!({ "station_id": 199, "transport_type": "underground" });
        for level in 0..100 {
            body = if level % 2 == 0 {
                json!([body, level])
            } else {
                json!({ "level": level, "inner": body })
            };
        }

        let frame = encode("gameState", Some(&body));
        assert_eq!(decode(&frame).unwrap().body, Some(body));
    }

    #[test]
    fn test_round_trip_floats() {
        for x in [0.0, -0.5, 1.25, 1024.0625, 3.0e10, 9.5367431640625e-7, -123456.75] {
            let body = json!({ "pos_x": x, "list": [x, -x] });
            let frame = encode("station", Some(&body));
            assert_eq!(decode(&frame).unwrap().body, Some(body), "frame {frame}");
        }
    }

    #[test]
    fn test_text_frame_codec_delegates() {
        let codec = TextFrameCodec;
        let msg = ProtocolMessage {
            name: "game".into(),
            body: Some(json!({ "id": "abc" })),
        };
        let frame = codec.encode(&msg);
        assert_eq!(frame, r#"[game] {"id":"abc"}"#);
        assert_eq!(codec.decode(&frame).unwrap(), msg);
    }
}
