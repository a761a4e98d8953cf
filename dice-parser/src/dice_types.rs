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

#[cfg(feature = "serde-support")]
use serde::{Deserialize, Serialize};
use std::{fmt, num::NonZeroU32, sync::Arc};

/// One dice expression, either a plain group like `3d8-5` or two groups
/// joined with `&`. A group always has at least one die with at least one side.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum DieRoll {
    Leaf {
        ndice: NonZeroU32,
        dsides: NonZeroU32,
        bonus: i32,
    },
    Combined { left: Box<DieRoll>, right: Box<DieRoll> },
}

impl DieRoll {
    pub fn leaf(ndice: NonZeroU32, dsides: NonZeroU32, bonus: i32) -> DieRoll {
        DieRoll::Leaf {
            ndice,
            dsides,
            bonus,
        }
    }

    pub fn combined(left: DieRoll, right: DieRoll) -> DieRoll {
        DieRoll::Combined {
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DieRoll::Leaf {
                ndice,
                dsides,
                bonus,
            } => {
                write!(f, "{}d{}", ndice, dsides)?;
                write_bonus(f, *bonus)
            }
            DieRoll::Combined { left, right } => write!(f, "{} & {}", left, right),
        }
    }
}

/// Rolls produced by a single parse, in display order. Entries repeated with
/// an `Nx` prefix point to the same [`DieRoll`].
pub type RollSpecSequence = Vec<Arc<DieRoll>>;

/// Input line of the form `name=spec`, or just `spec`.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub struct LabeledRolls {
    pub name: Option<String>,
    pub rolls: RollSpecSequence,
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde-support", derive(Serialize, Deserialize))]
pub enum RollResult {
    Leaf {
        rolls: Vec<u32>,
        bonus: i32,
        total: i64,
    },
    Combined {
        left: Box<RollResult>,
        right: Box<RollResult>,
        total: i64,
    },
}

impl RollResult {
    pub fn leaf(rolls: Vec<u32>, bonus: i32) -> RollResult {
        let total = rolls.iter().map(|r| i64::from(*r)).sum::<i64>() + i64::from(bonus);
        RollResult::Leaf {
            rolls,
            bonus,
            total,
        }
    }

    pub fn combined(left: RollResult, right: RollResult) -> RollResult {
        let total = left.total() + right.total();
        RollResult::Combined {
            left: Box::new(left),
            right: Box::new(right),
            total,
        }
    }

    pub fn total(&self) -> i64 {
        match self {
            RollResult::Leaf { total, .. } => *total,
            RollResult::Combined { total, .. } => *total,
        }
    }

    /// Every single die outcome, left to right.
    pub fn rolls(&self) -> Vec<u32> {
        match self {
            RollResult::Leaf { rolls, .. } => rolls.clone(),
            RollResult::Combined { left, right, .. } => [left.rolls(), right.rolls()].concat(),
        }
    }

    fn fmt_outcomes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollResult::Leaf { rolls, bonus, .. } => {
                write!(f, "[")?;
                for (i, roll) in rolls.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", roll)?;
                }
                write!(f, "]")?;
                if *bonus != 0 {
                    write!(f, " ")?;
                    write_bonus(f, *bonus)?;
                }
                Ok(())
            }
            RollResult::Combined { left, right, .. } => {
                left.fmt_outcomes(f)?;
                write!(f, " & ")?;
                right.fmt_outcomes(f)
            }
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_outcomes(f)?;
        write!(f, " = {}", self.total())
    }
}

fn write_bonus(f: &mut fmt::Formatter<'_>, bonus: i32) -> fmt::Result {
    match bonus {
        0 => Ok(()),
        b if b > 0 => write!(f, "+{}", b),
        b => write!(f, "{}", b),
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn leaf(ndice: u32, dsides: u32, bonus: i32) -> DieRoll {
        DieRoll::leaf(
            NonZeroU32::new(ndice).unwrap(),
            NonZeroU32::new(dsides).unwrap(),
            bonus,
        )
    }

    #[test]
    fn test_display_die_roll() {
        assert_eq!(leaf(1, 6, 0).to_string(), "1d6");
        assert_eq!(leaf(2, 4, 3).to_string(), "2d4+3");
        assert_eq!(leaf(3, 8, -5).to_string(), "3d8-5");
        assert_eq!(
            DieRoll::combined(leaf(12, 10, 5), leaf(4, 6, 2)).to_string(),
            "12d10+5 & 4d6+2"
        );
        assert_eq!(
            DieRoll::combined(
                leaf(9, 10, 0),
                DieRoll::combined(leaf(3, 6, 0), leaf(4, 12, 17))
            )
            .to_string(),
            "9d10 & 3d6 & 4d12+17"
        );
    }

    #[test]
    fn test_leaf_total() {
        let result = RollResult::leaf(vec![3, 1, 6], -2);
        assert_eq!(result.total(), 8);
        assert_eq!(result.rolls(), vec![3, 1, 6]);
        assert_eq!(RollResult::leaf(vec![], 4).total(), 4);
    }

    #[test]
    fn test_combined_total() {
        let result = RollResult::combined(
            RollResult::leaf(vec![2, 5], 1),
            RollResult::leaf(vec![4], -3),
        );
        assert_eq!(result.total(), 9);
        assert_eq!(result.rolls(), vec![2, 5, 4]);
    }

    #[test]
    fn test_display_roll_result() {
        assert_eq!(RollResult::leaf(vec![4], 0).to_string(), "[4] = 4");
        assert_eq!(RollResult::leaf(vec![3, 5], 2).to_string(), "[3, 5] +2 = 10");
        assert_eq!(RollResult::leaf(vec![6], -5).to_string(), "[6] -5 = 1");
        assert_eq!(
            RollResult::combined(
                RollResult::leaf(vec![1, 2], 5),
                RollResult::leaf(vec![6], 0)
            )
            .to_string(),
            "[1, 2] +5 & [6] = 14"
        );
    }

    #[cfg(feature = "serde-support")]
    #[test]
    fn test_deserialize_rejects_empty_groups() {
        let dice: DieRoll =
            serde_json::from_str(r#"{"Leaf":{"ndice":2,"dsides":6,"bonus":-1}}"#).unwrap();
        assert_eq!(dice, leaf(2, 6, -1));
        for json in &[
            r#"{"Leaf":{"ndice":1,"dsides":0,"bonus":0}}"#,
            r#"{"Leaf":{"ndice":0,"dsides":6,"bonus":0}}"#,
        ] {
            assert!(serde_json::from_str::<DieRoll>(json).is_err(), "{}", json);
        }
    }
}
