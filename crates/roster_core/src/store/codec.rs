//! One-line text codec for participant records.
//!
//! Line format: `<id> <name> <team_name>\n`, fields separated by a single
//! space. There is no escaping, and values are written verbatim:
//! - an embedded space produces a line with too many fields, which later
//!   fails to decode and blocks every read of the store;
//! - an embedded newline splits the value into extra lines. Each one decodes
//!   on its own when it happens to have three fields, so a value such as
//!   `"Blue\na1 Mallory Black"` stores a second record with a caller-chosen,
//!   possibly duplicate id.
//!
//! Callers are expected to supply single-token values.

use crate::model::participant::Participant;
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIELD_SEPARATOR: char = ' ';
const FIELD_COUNT: usize = 3;

/// A stored line that does not split into exactly three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    /// 1-based line number when known.
    pub line_number: Option<usize>,
    pub line: String,
}

impl MalformedRecord {
    pub(crate) fn at_line(mut self, line_number: usize) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

impl Display for MalformedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.line_number {
            Some(number) => write!(f, "malformed record at line {number}: `{}`", self.line),
            None => write!(f, "malformed record: `{}`", self.line),
        }
    }
}

impl Error for MalformedRecord {}

/// Encodes one participant as a newline-terminated store line.
pub fn encode(participant: &Participant) -> String {
    format!(
        "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}\n",
        participant.id, participant.name, participant.team_name
    )
}

/// Decodes one store line (with or without its trailing newline).
///
/// # Errors
/// - Returns `MalformedRecord` unless the trimmed line has exactly three
///   non-empty, single-space separated fields.
pub fn decode(line: &str) -> Result<Participant, MalformedRecord> {
    let malformed = || MalformedRecord {
        line_number: None,
        line: line.trim_end_matches(['\n', '\r']).to_string(),
    };

    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    if fields.len() != FIELD_COUNT || fields.iter().any(|field| field.is_empty()) {
        return Err(malformed());
    }

    Ok(Participant::with_id(fields[0], fields[1], fields[2]))
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::model::participant::Participant;
    use crate::store::decode_lines;

    #[test]
    fn encode_writes_single_line() {
        let participant = Participant::with_id("a1", "Alice", "Red");
        assert_eq!(encode(&participant), "a1 Alice Red\n");
    }

    #[test]
    fn decode_reverses_encode() {
        let participant = Participant::new("Bob", "Blue");
        let decoded = decode(&encode(&participant)).expect("encoded line should decode");
        assert_eq!(decoded, participant);
    }

    #[test]
    fn decode_trims_surrounding_whitespace() {
        let decoded = decode("  b2 Bob Blue \r\n").expect("padded line should decode");
        assert_eq!(decoded, Participant::with_id("b2", "Bob", "Blue"));
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        let err = decode("a1 Alice").expect_err("two fields must be rejected");
        assert_eq!(err.line, "a1 Alice");
        assert_eq!(err.line_number, None);

        decode("a1 Alice Red extra").expect_err("four fields must be rejected");
        decode("").expect_err("empty line must be rejected");
    }

    #[test]
    fn decode_rejects_double_space() {
        decode("a1  Alice Red").expect_err("empty field must be rejected");
    }

    #[test]
    fn newline_in_team_name_splits_into_extra_record() {
        let participant = Participant::with_id("b2", "Eve", "Blue\na1 Mallory Black");
        let encoded = encode(&participant);
        assert_eq!(encoded, "b2 Eve Blue\na1 Mallory Black\n");

        let decoded = decode_lines(&encoded).expect("both lines have three fields");
        assert_eq!(
            decoded,
            vec![
                Participant::with_id("b2", "Eve", "Blue"),
                Participant::with_id("a1", "Mallory", "Black"),
            ]
        );
    }

    #[test]
    fn space_in_name_produces_undecodable_line() {
        let participant = Participant::with_id("a1", "Alice Smith", "Red");
        decode(&encode(&participant)).expect_err("embedded space cannot round-trip");
    }
}
