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

use crate::dice_types::*;
use rand::{distributions::Uniform, Rng};
use std::sync::Arc;

#[cfg(feature = "logging")]
use log::debug;

pub trait DieRollEvaluate {
    /// Draws fresh outcomes on every call.
    fn evaluate<R: Rng>(&self, rng: &mut R) -> RollResult;
}

impl DieRollEvaluate for DieRoll {
    fn evaluate<R: Rng>(&self, rng: &mut R) -> RollResult {
        let result = match self {
            DieRoll::Leaf {
                ndice,
                dsides,
                bonus,
            } => {
                let dist = Uniform::new_inclusive(1, dsides.get());
                let mut rolls: Vec<u32> = Vec::with_capacity(ndice.get() as usize);
                for _ in 0..ndice.get() {
                    rolls.push(rng.sample(dist));
                }
                RollResult::leaf(rolls, *bonus)
            }
            DieRoll::Combined { left, right } => {
                let left_r = left.evaluate(rng);
                let right_r = right.evaluate(rng);
                RollResult::combined(left_r, right_r)
            }
        };

        #[cfg(feature = "logging")]
        {
            debug!("Dice roll result for {} is {:?}", &self, &result);
        }

        result
    }
}

impl DieRollEvaluate for Arc<DieRoll> {
    fn evaluate<R: Rng>(&self, rng: &mut R) -> RollResult {
        self.as_ref().evaluate(rng)
    }
}

pub trait SequenceEvaluate {
    fn evaluate<R: Rng>(&self, rng: &mut R) -> Vec<RollResult>;
}

impl SequenceEvaluate for [Arc<DieRoll>] {
    fn evaluate<R: Rng>(&self, rng: &mut R) -> Vec<RollResult> {
        self.iter().map(|roll| roll.evaluate(rng)).collect()
    }
}
