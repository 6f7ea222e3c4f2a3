use serde::Serialize;

/// One bug report line. System bugs (`[****]`) get vnum 0, the player
/// `SYSTEM` and the full raw line as the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bug {
    pub room_vnum: i64,
    pub player: String,
    pub message: String,
    pub timestamp: i64,
}

/// Parse a bug register: `[<vnum>] <player>: <message>` per line. Lines
/// that do not match the shape are ignored, as the legacy file mixes in
/// free-form noise.
pub fn parse_bugs(text: &str) -> Vec<Bug> {
    let mut bugs = Vec::new();
    for line in text.lines() {
        let Some(rest) = line.strip_prefix('[') else {
            continue;
        };
        let Some((inside, after)) = rest.split_once(']') else {
            continue;
        };
        let after = after.trim_start();
        let Some((player, message)) = after.split_once(':') else {
            continue;
        };
        if player.is_empty() || player.contains(char::is_whitespace) {
            continue;
        }
        let inside = inside.trim();
        if inside.contains('*') {
            bugs.push(Bug {
                room_vnum: 0,
                player: "SYSTEM".to_string(),
                message: line.to_string(),
                timestamp: 0,
            });
        } else if let Ok(room_vnum) = inside.parse::<i64>() {
            bugs.push(Bug {
                room_vnum,
                player: player.to_string(),
                message: message.trim_start().to_string(),
                timestamp: 0,
            });
        }
    }
    bugs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_and_system_bugs() {
        let src = "\
[ 3001] Taz: the fountain has no description
[*****] BUG: Fread_char: no Vnum
random noise line
[30012] Siva: door leads nowhere
";
        let bugs = parse_bugs(src);
        assert_eq!(bugs.len(), 3);
        assert_eq!(bugs[0].room_vnum, 3001);
        assert_eq!(bugs[0].player, "Taz");
        assert_eq!(bugs[0].message, "the fountain has no description");
        assert_eq!(bugs[1].room_vnum, 0);
        assert_eq!(bugs[1].player, "SYSTEM");
        assert_eq!(bugs[1].message, "[*****] BUG: Fread_char: no Vnum");
        assert_eq!(bugs[2].room_vnum, 30012);
    }

    #[test]
    fn unmatched_lines_are_skipped() {
        assert!(parse_bugs("no brackets here\n[half open\n").is_empty());
    }
}
