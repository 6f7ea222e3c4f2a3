use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed dice expression {0:?}")]
pub struct DiceError(pub String);

/// A `NdS+P` dice triple. `2d6+10` means two six-sided dice plus ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dice {
    pub number: i64,
    pub size: i64,
    pub plus: i64,
}

impl Dice {
    pub const fn new(number: i64, size: i64, plus: i64) -> Self {
        Dice { number, size, plus }
    }

    /// Expected value of the roll.
    pub fn average(&self) -> f64 {
        self.number as f64 * (self.size as f64 + 1.0) / 2.0 + self.plus as f64
    }

    pub fn min(&self) -> i64 {
        self.number + self.plus
    }

    pub fn max(&self) -> i64 {
        self.number * self.size + self.plus
    }
}

impl FromStr for Dice {
    type Err = DiceError;

    /// Accepts `NdS+P`, `NdS-P` and `NdS`; whitespace around the
    /// operators is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let err = || DiceError(s.to_string());
        let (num, rest) = compact.split_once(['d', 'D']).ok_or_else(err)?;
        let number: i64 = num.parse().map_err(|_| err())?;
        let (size_text, plus) = if let Some(i) = rest.find(['+', '-']) {
            let sign = if rest.as_bytes()[i] == b'-' { -1 } else { 1 };
            let p: i64 = rest[i + 1..].parse().map_err(|_| err())?;
            (&rest[..i], sign * p)
        } else {
            (rest, 0)
        };
        let size: i64 = size_text.parse().map_err(|_| err())?;
        Ok(Dice { number, size, plus })
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.number, self.size)?;
        if self.plus > 0 {
            write!(f, "+{}", self.plus)?;
        } else if self.plus < 0 {
            write!(f, "{}", self.plus)?;
        }
        Ok(())
    }
}

/// An NPC template. Flag fields hold the raw source integers; decoding
/// to names lives in `crate::flags` and is never written back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mobile {
    pub vnum: i64,
    /// Keyword list (`player_name` in the relational schema).
    pub name: String,
    pub short_descr: String,
    pub long_descr: String,
    pub description: String,
    pub act: i64,
    pub affected_by: i64,
    pub alignment: i64,
    pub level: i64,
    pub hitroll: i64,
    pub ac: i64,
    pub hit_dice: Dice,
    pub dam_dice: Dice,
    pub gold: i64,
    pub sex: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dice_forms() {
        assert_eq!("2d6+10".parse::<Dice>().unwrap(), Dice::new(2, 6, 10));
        assert_eq!("1d1-5".parse::<Dice>().unwrap(), Dice::new(1, 1, -5));
        assert_eq!("3d8".parse::<Dice>().unwrap(), Dice::new(3, 8, 0));
        assert_eq!("1d1+30000".parse::<Dice>().unwrap(), Dice::new(1, 1, 30000));
    }

    #[test]
    fn dice_whitespace_around_operators() {
        assert_eq!("2 d 6 + 1".parse::<Dice>().unwrap(), Dice::new(2, 6, 1));
    }

    #[test]
    fn dice_rejects_garbage() {
        assert!("".parse::<Dice>().is_err());
        assert!("2x6".parse::<Dice>().is_err());
        assert!("d6".parse::<Dice>().is_err());
        assert!("2d".parse::<Dice>().is_err());
    }

    #[test]
    fn dice_average() {
        assert_eq!(Dice::new(2, 6, 10).average(), 17.0);
        assert_eq!(Dice::new(1, 1, 30000).average(), 30001.0);
    }

    #[test]
    fn dice_display_round_trips() {
        for s in ["2d6+10", "1d1-5", "3d8"] {
            assert_eq!(s.parse::<Dice>().unwrap().to_string(), s);
        }
    }
}
