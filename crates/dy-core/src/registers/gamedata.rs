//! Small fixed-shape game-state files: `gameconfig.txt`,
//! `topboard.txt`, `leader.txt`, `kingdoms.txt`.

use serde::Serialize;

use super::RegisterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopboardEntry {
    pub rank: i64,
    pub name: String,
    pub pkscore: i64,
}

/// Leaderboard categories in file order.
pub const LEADER_CATEGORIES: [&str; 7] = ["bestpk", "pk", "pd", "mk", "md", "tt", "qc"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub category: &'static str,
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kingdom {
    pub id: i64,
    pub name: String,
    pub whoname: String,
    pub leader: String,
    pub general: String,
    pub kills: i64,
    pub deaths: i64,
    pub qps: i64,
    pub req_hit: i64,
    pub req_move: i64,
    pub req_mana: i64,
    pub req_qps: i64,
}

const MAX_TOP_PLAYERS: usize = 20;
const MAX_KINGDOMS: i64 = 5;

/// `key: value` lines; anything without a colon is noise and skipped.
pub fn parse_gameconfig(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}

/// A tilde-terminated value on one line.
fn tilde_line(line: &str) -> String {
    let line = line.trim_end();
    line.strip_suffix('~').unwrap_or(line).to_string()
}

fn int_line(line: &str, kind: &'static str) -> Result<i64, RegisterError> {
    line.trim()
        .parse()
        .map_err(|_| RegisterError::malformed(kind, format!("expected integer, found {line:?}")))
}

/// Up to twenty `name~` / `pkscore` pairs; rank is positional (1-based).
pub fn parse_topboard(text: &str) -> Result<Vec<TopboardEntry>, RegisterError> {
    const KIND: &str = "topboard file";
    let mut lines = text.lines();
    let mut entries = Vec::new();
    for rank in 1..=MAX_TOP_PLAYERS as i64 {
        let Some(name) = lines.next() else { break };
        let Some(score) = lines.next() else { break };
        entries.push(TopboardEntry {
            rank,
            name: tilde_line(name),
            pkscore: int_line(score, KIND)?,
        });
    }
    Ok(entries)
}

/// One `name~` / `value` pair per category, in `LEADER_CATEGORIES` order.
pub fn parse_leaderboard(text: &str) -> Result<Vec<LeaderboardEntry>, RegisterError> {
    const KIND: &str = "leaderboard file";
    let mut lines = text.lines();
    let mut entries = Vec::new();
    for category in LEADER_CATEGORIES {
        let Some(name) = lines.next() else { break };
        let Some(value) = lines.next() else { break };
        entries.push(LeaderboardEntry {
            category,
            name: tilde_line(name),
            value: int_line(value, KIND)?,
        });
    }
    Ok(entries)
}

/// Five kingdoms, each four tilde strings, a `kills deaths qps` line and
/// a `req_hit req_move req_mana req_qps` line. Ids are positional 1..5.
pub fn parse_kingdoms(text: &str) -> Result<Vec<Kingdom>, RegisterError> {
    const KIND: &str = "kingdoms file";
    let mut lines = text.lines();
    let mut kingdoms = Vec::new();
    for id in 1..=MAX_KINGDOMS {
        let Some(name) = lines.next() else { break };
        let (Some(whoname), Some(leader), Some(general)) =
            (lines.next(), lines.next(), lines.next())
        else {
            return Err(RegisterError::malformed(KIND, "truncated kingdom record"));
        };
        let score_line = lines
            .next()
            .ok_or_else(|| RegisterError::malformed(KIND, "missing score line"))?;
        let req_line = lines
            .next()
            .ok_or_else(|| RegisterError::malformed(KIND, "missing requirements line"))?;
        let scores = ints(score_line, 3, KIND)?;
        let reqs = ints(req_line, 4, KIND)?;
        kingdoms.push(Kingdom {
            id,
            name: tilde_line(name),
            whoname: tilde_line(whoname),
            leader: tilde_line(leader),
            general: tilde_line(general),
            kills: scores[0],
            deaths: scores[1],
            qps: scores[2],
            req_hit: reqs[0],
            req_move: reqs[1],
            req_mana: reqs[2],
            req_qps: reqs[3],
        });
    }
    Ok(kingdoms)
}

fn ints(line: &str, want: usize, kind: &'static str) -> Result<Vec<i64>, RegisterError> {
    let values: Result<Vec<i64>, _> = line
        .split_whitespace()
        .map(|t| t.parse::<i64>())
        .collect();
    match values {
        Ok(v) if v.len() == want => Ok(v),
        _ => Err(RegisterError::malformed(
            kind,
            format!("expected {want} integers, found {line:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameconfig_pairs() {
        let src = "port: 4000\nmaxplayers : 300\njunk line\n";
        let config = parse_gameconfig(src);
        assert_eq!(config.len(), 2);
        assert_eq!(config[0], ("port".to_string(), "4000".to_string()));
        assert_eq!(config[1], ("maxplayers".to_string(), "300".to_string()));
    }

    #[test]
    fn topboard_ranks_are_positional() {
        let src = "Taz~\n5000\nSiva~\n4200\n";
        let board = parse_topboard(src).unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].name, "Taz");
        assert_eq!(board[1].pkscore, 4200);
    }

    #[test]
    fn leaderboard_categories_in_order() {
        let src = "A~\n1\nB~\n2\nC~\n3\nD~\n4\nE~\n5\nF~\n6\nG~\n7\n";
        let board = parse_leaderboard(src).unwrap();
        assert_eq!(board.len(), 7);
        assert_eq!(board[0].category, "bestpk");
        assert_eq!(board[6].category, "qc");
        assert_eq!(board[6].value, 7);
    }

    #[test]
    fn kingdoms() {
        let mut src = String::new();
        for i in 1..=2 {
            src.push_str(&format!("Kingdom{i}~\nwho{i}~\nLeader{i}~\nGeneral{i}~\n"));
            src.push_str("10 5 100\n1000 900 800 50\n");
        }
        let kingdoms = parse_kingdoms(&src).unwrap();
        assert_eq!(kingdoms.len(), 2);
        assert_eq!(kingdoms[0].id, 1);
        assert_eq!(kingdoms[1].name, "Kingdom2");
        assert_eq!(kingdoms[0].kills, 10);
        assert_eq!(kingdoms[1].req_qps, 50);
    }

    #[test]
    fn truncated_kingdom_is_an_error() {
        assert!(parse_kingdoms("Name~\nwho~\n").is_err());
    }
}
