use serde::Serialize;

use crate::lex::Tokenizer;

use super::RegisterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ban {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledCommand {
    pub command_name: String,
    pub level: i64,
    pub disabled_by: String,
}

/// Ban register: alternating `name` line and tilde-terminated reason,
/// ended by a line `END`.
pub fn parse_bans(text: &str) -> Result<Vec<Ban>, RegisterError> {
    const KIND: &str = "ban file";
    let mut tok = Tokenizer::new(text);
    let mut bans = Vec::new();
    loop {
        tok.skip_whitespace();
        if tok.at_end() {
            return Ok(bans);
        }
        let name = tok
            .read_line()
            .map_err(|source| RegisterError::Token { file_kind: KIND, source })?;
        if name.is_empty() || name == "END" {
            return Ok(bans);
        }
        let reason = tok
            .read_tilde_string()
            .map_err(|source| RegisterError::Token { file_kind: KIND, source })?;
        bans.push(Ban {
            name,
            reason: reason.trim().to_string(),
        });
    }
}

/// Disabled-command register: `name level by` per line, ended by `END`.
pub fn parse_disabled(text: &str) -> Result<Vec<DisabledCommand>, RegisterError> {
    const KIND: &str = "disabled-commands file";
    let mut commands = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "END" {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [name, level, by] = tokens[..] else {
            return Err(RegisterError::malformed(
                KIND,
                format!("expected `name level by`, found {line:?}"),
            ));
        };
        let level: i64 = level.parse().map_err(|_| {
            RegisterError::malformed(KIND, format!("bad level {level:?} for {name}"))
        })?;
        commands.push(DisabledCommand {
            command_name: name.to_string(),
            level,
            disabled_by: by.to_string(),
        });
    }
    Ok(commands)
}
