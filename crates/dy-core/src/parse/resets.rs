//! `#RESETS` parsing and binding resolution.
//!
//! The legacy loader carried an implicit "current mob" cursor across the
//! program. Here the cursor lives only inside `resolve_reset_bindings`,
//! which runs once over the raw command list at the end of the section
//! and stores each binding as an index into the reset list.

use crate::area::{Area, Reset};
use crate::lex::Tokenizer;

use super::{Ctx, ParseError, split_ints};

pub(crate) fn parse_resets(tok: &mut Tokenizer, area: &mut Area) -> Result<(), ParseError> {
    let ctx = Ctx::new("RESETS");
    let mut raw: Vec<(char, Vec<i64>)> = Vec::new();
    loop {
        tok.skip_whitespace();
        let line = tok.read_line().map_err(|e| ctx.token(e))?;
        if line == "S" {
            break;
        }
        if line.is_empty() || line.starts_with('*') {
            continue;
        }
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| ctx.record(format!("malformed reset line {line:?}")))?;
        let mut letters = command.chars();
        let letter = letters.next().unwrap_or_default();
        if letters.next().is_some() {
            return Err(ctx.record(format!("malformed reset command {command:?}")));
        }
        raw.push((letter, split_ints(rest, &ctx)?));
    }
    area.resets = resolve_reset_bindings(&raw)?;
    Ok(())
}

/// Turn raw `(command, args)` lines into typed resets, resolving the
/// `G`/`E` → latest-`M` and `P` → latest-`O`-or-`P` bindings. A binding
/// command with nothing to bind to is an `InvariantViolation`.
pub fn resolve_reset_bindings(raw: &[(char, Vec<i64>)]) -> Result<Vec<Reset>, ParseError> {
    let ctx = Ctx::new("RESETS");
    let mut resets = Vec::with_capacity(raw.len());
    let mut last_mob: Option<usize> = None;
    let mut last_container: Option<usize> = None;

    for (index, (letter, args)) in raw.iter().enumerate() {
        let three = |what: &str| -> Result<(i64, i64, i64), ParseError> {
            let [a, b, c] = args[..] else {
                return Err(ctx.record(format!("reset {index}: `{letter}` {what} wants three arguments")));
            };
            Ok((a, b, c))
        };
        let reset = match letter {
            'M' => {
                let (mob_vnum, limit, room_vnum) = three("mob")?;
                last_mob = Some(index);
                Reset::Mob { mob_vnum, limit, room_vnum }
            }
            'O' => {
                let (obj_vnum, limit, room_vnum) = three("object")?;
                last_container = Some(index);
                Reset::Object { obj_vnum, limit, room_vnum }
            }
            'G' => {
                let (obj_vnum, limit, arg3) = three("give")?;
                let mob_slot = last_mob.ok_or(ParseError::InvariantViolation {
                    index,
                    letter: 'G',
                    needed: "M",
                })?;
                Reset::Give { obj_vnum, limit, arg3, mob_slot }
            }
            'E' => {
                let (obj_vnum, limit, wear_loc) = three("equip")?;
                let mob_slot = last_mob.ok_or(ParseError::InvariantViolation {
                    index,
                    letter: 'E',
                    needed: "M",
                })?;
                Reset::Equip { obj_vnum, limit, wear_loc, mob_slot }
            }
            'P' => {
                let (obj_vnum, limit, container_vnum) = three("put")?;
                let container_slot = last_container.ok_or(ParseError::InvariantViolation {
                    index,
                    letter: 'P',
                    needed: "O",
                })?;
                // A put object can itself be the next container.
                last_container = Some(index);
                Reset::Put { obj_vnum, limit, container_vnum, container_slot }
            }
            'D' => {
                let (room_vnum, direction, state) = three("door")?;
                Reset::Door { room_vnum, direction, state }
            }
            'R' => {
                let (room_vnum, exit_count) = match args[..] {
                    [a, b] => (a, b),
                    [a, b, 0] => (a, b),
                    _ => {
                        return Err(ctx.record(format!(
                            "reset {index}: `R` wants a room and an exit count"
                        )));
                    }
                };
                Reset::Randomize { room_vnum, exit_count }
            }
            other => {
                return Err(ctx.record(format!("reset {index}: unknown command {other:?}")));
            }
        };
        resets.push(reset);
    }
    Ok(resets)
}
