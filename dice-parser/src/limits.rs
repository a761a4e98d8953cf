pub trait DiceLimits {
    fn min(&self) -> i64;
    fn max(&self) -> i64;
}

use crate::dice_types::*;

impl DiceLimits for DieRoll {
    fn min(&self) -> i64 {
        match self {
            DieRoll::Leaf { ndice, bonus, .. } => {
                i64::from(ndice.get()).saturating_add((*bonus).into())
            }
            DieRoll::Combined { left, right } => left.min().saturating_add(right.min()),
        }
    }

    fn max(&self) -> i64 {
        match self {
            DieRoll::Leaf {
                ndice,
                dsides,
                bonus,
            } => i64::from(ndice.get())
                .saturating_mul(dsides.get().into())
                .saturating_add((*bonus).into()),
            DieRoll::Combined { left, right } => left.max().saturating_add(right.max()),
        }
    }
}
