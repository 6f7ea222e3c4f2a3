use serde::Serialize;

use crate::lex::Tokenizer;

use super::RegisterError;

/// Board names in fixed index order; the index is what the database
/// stores.
pub const BOARD_NAMES: [&str; 8] = [
    "General", "Ideas", "Announce", "Bugs", "Personal", "Immortal", "Builder", "Kingdom",
];

/// One bulletin-board note. The board index is supplied by the caller
/// (one file per board).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub sender: String,
    pub date: String,
    pub date_stamp: i64,
    pub expire: i64,
    pub to_list: String,
    pub subject: String,
    pub text: String,
}

const KIND: &str = "note file";

/// Parse one board file: a sequence of
/// `Sender`/`Date`/`Stamp`/`Expire`/`To`/`Subject`/`Text` records, the
/// body tilde-terminated.
pub fn parse_notes(text: &str) -> Result<Vec<Note>, RegisterError> {
    let mut tok = Tokenizer::new(text);
    let mut notes = Vec::new();

    loop {
        tok.skip_whitespace();
        if tok.at_end() {
            return Ok(notes);
        }
        let sender = field_line(&mut tok, "Sender")?;
        let date = field_line(&mut tok, "Date")?;
        let date_stamp = int_line(&mut tok, "Stamp")?;
        let expire = int_line(&mut tok, "Expire")?;
        let to_list = field_line(&mut tok, "To")?;
        let subject = field_line(&mut tok, "Subject")?;
        let marker = read_line(&mut tok)?;
        if marker != "Text" {
            return Err(RegisterError::malformed(
                KIND,
                format!("expected Text marker, found {marker:?}"),
            ));
        }
        let body = tok
            .read_tilde_string()
            .map_err(|source| RegisterError::Token { file_kind: KIND, source })?;
        notes.push(Note {
            sender,
            date,
            date_stamp,
            expire,
            to_list,
            subject,
            text: body,
        });
    }
}

fn read_line(tok: &mut Tokenizer) -> Result<String, RegisterError> {
    tok.skip_whitespace();
    tok.read_line()
        .map_err(|source| RegisterError::Token { file_kind: KIND, source })
}

/// `Keyword value~` on one line.
fn field_line(tok: &mut Tokenizer, key: &str) -> Result<String, RegisterError> {
    let line = read_line(tok)?;
    let rest = line
        .strip_prefix(key)
        .ok_or_else(|| RegisterError::malformed(KIND, format!("expected {key}, found {line:?}")))?
        .trim();
    Ok(rest.strip_suffix('~').unwrap_or(rest).to_string())
}

fn int_line(tok: &mut Tokenizer, key: &str) -> Result<i64, RegisterError> {
    let value = field_line(tok, key)?;
    value
        .parse()
        .map_err(|_| RegisterError::malformed(KIND, format!("bad {key} integer {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_notes() {
        let src = "\
Sender  Taz~
Date    Sat Jan  4 12:00:00 2003~
Stamp   1041681600
Expire  1042891200
To      all~
Subject greetings~
Text
Hello everyone.
Welcome back.
~
Sender  Siva~
Date    Sun Jan  5 09:30:00 2003~
Stamp   1041759000
Expire  1042968600
To      immortal~
Subject reboot~
Text
Rebooting at noon.
~
";
        let notes = parse_notes(src).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].sender, "Taz");
        assert_eq!(notes[0].date_stamp, 1041681600);
        assert_eq!(notes[0].to_list, "all");
        assert_eq!(notes[0].text, "Hello everyone.\nWelcome back.\n");
        assert_eq!(notes[1].subject, "reboot");
    }

    #[test]
    fn empty_file_yields_no_notes() {
        assert!(parse_notes("").unwrap().is_empty());
        assert!(parse_notes("\n\n").unwrap().is_empty());
    }

    #[test]
    fn wrong_field_order_is_an_error() {
        let src = "Date Sat~\nSender Taz~\n";
        assert!(parse_notes(src).is_err());
    }

    #[test]
    fn board_name_table() {
        assert_eq!(BOARD_NAMES[0], "General");
        assert_eq!(BOARD_NAMES[7], "Kingdom");
    }
}
