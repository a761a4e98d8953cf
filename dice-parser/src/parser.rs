/*
Copyright 2021 Robin Marchart

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

//! Grammar for dice notation.
//!
//! ```text
//! RollList   := Roll (";" Roll)*
//! Roll       := (UInt "x")? Dice
//! Dice       := DiceCore DiceTail
//! DiceCore   := (UInt)? "d" UInt (SignedInt)?
//! DiceTail   := ("&" Dice)?
//! ```
//!
//! Every rule returns `None` when it does not match and then leaves the
//! cursor where it found it. Inputs above [`MAX_REPEAT`], [`MAX_DICE`] or
//! [`MAX_COMBINED`] do not match either.

use crate::{
    cursor::Cursor,
    dice_types::{DieRoll, LabeledRolls, RollSpecSequence},
};
use std::{convert::TryFrom, fmt, iter, num::NonZeroU32, str::FromStr, sync::Arc};

#[cfg(feature = "logging")]
use log::debug;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// The whole input that could not be parsed.
    InvalidExpression(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidExpression(input) => {
                write!(f, "invalid dice expression: {:?}", input)
            }
        }
    }
}

impl std::error::Error for ParseError {}

fn attempt<'a, T, F>(cursor: &mut Cursor<'a>, rule: F) -> Option<T>
where
    F: FnOnce(&mut Cursor<'a>) -> Option<T>,
{
    let checkpoint = cursor.checkpoint();
    let result = rule(cursor);
    if result.is_none() {
        cursor.restore_from(checkpoint);
    }
    result
}

/// Largest accepted `Nx` repeat prefix.
pub const MAX_REPEAT: u32 = 1_000;
/// Largest accepted number of dice in one group.
pub const MAX_DICE: u32 = 100_000;
/// Largest accepted number of groups joined with `&`.
pub const MAX_COMBINED: usize = 1_000;

fn positive(value: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(value)
}

fn bounded(value: u32, max: u32) -> Option<NonZeroU32> {
    positive(value).filter(|v| v.get() <= max)
}

pub fn parse_roll_list(cursor: &mut Cursor<'_>) -> Option<RollSpecSequence> {
    attempt(cursor, |cursor| {
        let mut rolls = parse_roll(cursor)?;
        while cursor.consume_literal(";") {
            rolls.extend(parse_roll(cursor)?);
        }
        Some(rolls)
    })
}

/// A `0x` prefix is rejected instead of producing no rolls.
pub fn parse_repeat_count(cursor: &mut Cursor<'_>) -> Option<NonZeroU32> {
    attempt(cursor, |cursor| {
        let checkpoint = cursor.checkpoint();
        if let Some(count) = cursor.read_unsigned_int() {
            if cursor.consume_literal("x") {
                return bounded(count, MAX_REPEAT);
            }
        }
        cursor.restore_from(checkpoint);
        positive(1)
    })
}

pub fn parse_roll(cursor: &mut Cursor<'_>) -> Option<RollSpecSequence> {
    attempt(cursor, |cursor| {
        let count = parse_repeat_count(cursor)?;
        let dice = Arc::new(parse_dice(cursor)?);
        Some(iter::repeat(dice).take(count.get() as usize).collect())
    })
}

pub fn parse_dice(cursor: &mut Cursor<'_>) -> Option<DieRoll> {
    attempt(cursor, |cursor| {
        let core = parse_dice_core(cursor)?;
        parse_dice_tail(cursor, core)
    })
}

pub fn parse_dice_core(cursor: &mut Cursor<'_>) -> Option<DieRoll> {
    attempt(cursor, |cursor| {
        let ndice = cursor
            .read_unsigned_int()
            .map_or(positive(1), |n| bounded(n, MAX_DICE))?;
        if !cursor.consume_literal("d") {
            return None;
        }
        let dsides = positive(cursor.read_unsigned_int()?)?;
        let bonus = match cursor.read_signed_int() {
            Some(bonus) => i32::try_from(bonus).ok()?,
            None => 0,
        };
        Some(DieRoll::leaf(ndice, dsides, bonus))
    })
}

/// Reads every `& DiceCore` after `prev` in a loop and joins the groups from
/// the right, so `a & b & c` becomes `a & (b & c)`.
pub fn parse_dice_tail(cursor: &mut Cursor<'_>, prev: DieRoll) -> Option<DieRoll> {
    attempt(cursor, |cursor| {
        let mut groups = vec![prev];
        while cursor.consume_literal("&") {
            if groups.len() == MAX_COMBINED {
                return None;
            }
            groups.push(parse_dice_core(cursor)?);
        }
        let mut groups = groups.into_iter().rev();
        let last = groups.next()?;
        Some(groups.fold(last, |right, left| DieRoll::combined(left, right)))
    })
}

fn reject(input: &str, cursor: &Cursor<'_>) -> ParseError {
    #[cfg(feature = "logging")]
    {
        debug!("rejected {:?}, stopped at {:?}", input, cursor.remaining())
    }
    #[cfg(not(feature = "logging"))]
    let _ = cursor;
    ParseError::InvalidExpression(input.to_string())
}

/// Parses a complete roll list. Fails if anything but whitespace is left over.
pub fn parse(input: &str) -> Result<RollSpecSequence, ParseError> {
    let mut cursor = Cursor::new(input);
    let rolls = match parse_roll_list(&mut cursor) {
        Some(rolls) => rolls,
        None => return Err(reject(input, &cursor)),
    };
    if !cursor.is_exhausted() {
        return Err(reject(input, &cursor));
    }
    #[cfg(feature = "logging")]
    {
        debug!("parsed {:?} into {} rolls", input, rolls.len())
    }
    Ok(rolls)
}

/// Splits `name=spec` at the last `=` and parses the spec part.
pub fn parse_labeled(line: &str) -> Result<LabeledRolls, ParseError> {
    let (name, spec) = match line.rsplit_once('=') {
        Some((name, spec)) => (Some(name.trim().to_string()), spec),
        None => (None, line),
    };
    parse(spec).map(|rolls| LabeledRolls { name, rolls })
}

impl FromStr for DieRoll {
    type Err = ParseError;

    /// Parses a single dice expression without repeat prefix or `;`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        match parse_dice(&mut cursor) {
            Some(dice) if cursor.remaining().trim().is_empty() => Ok(dice),
            _ => Err(reject(s, &cursor)),
        }
    }
}
