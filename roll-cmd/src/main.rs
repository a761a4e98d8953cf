use jdice_parser::{dice_roll::DieRollEvaluate, limits::DiceLimits, DieRoll};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::{convert::TryFrom, process};

const MAX_BUCKETS: i64 = 1 << 24;

/// Counts per value. Element 0 holds the lowest value, element `i` counts
/// `lowest + i - 1`.
struct Histogram {
    counts: Vec<i64>,
}

impl Histogram {
    fn new(lowest: i64, highest: i64) -> Option<Histogram> {
        let size = highest.checked_sub(lowest)?.checked_add(2)?;
        if size > MAX_BUCKETS {
            return None;
        }
        let mut counts = vec![0; usize::try_from(size).ok()?];
        counts[0] = lowest;
        Some(Histogram { counts })
    }

    fn add(&mut self, value: i64) {
        let slot = usize::try_from(value - self.counts[0] + 1).ok();
        if let Some(count) = slot.and_then(|i| self.counts.get_mut(i)) {
            *count += 1;
        }
    }
}

fn largest_die(dice: &DieRoll) -> u32 {
    match dice {
        DieRoll::Leaf { dsides, .. } => dsides.get(),
        DieRoll::Combined { left, right } => largest_die(left).max(largest_die(right)),
    }
}

fn histogram_or_exit(lowest: i64, highest: i64) -> Histogram {
    Histogram::new(lowest, highest).unwrap_or_else(|| {
        log::error!("range {}..={} is too wide to sample", lowest, highest);
        process::exit(2)
    })
}

fn main() {
    pretty_env_logger::init();
    let (dice, num) = {
        let mut args = std::env::args().skip(1);
        let dice = match args.next().map(|a| a.parse::<DieRoll>()) {
            Some(Ok(dice)) => dice,
            Some(Err(e)) => {
                log::error!("{}", e);
                process::exit(2)
            }
            None => {
                log::error!("usage: roll-cmd <dice> [trials]");
                process::exit(2)
            }
        };
        (
            dice,
            args.next()
                .and_then(|a| u32::from_str_radix(&a, 10).ok())
                .unwrap_or(1),
        )
    };
    let mut master_rng = ChaCha20Rng::from_entropy();

    let mut results = histogram_or_exit(dice.min(), dice.max());
    let mut throws = histogram_or_exit(1, i64::from(largest_die(&dice)));

    log::info!("sampling {} {} times", dice, num);
    for result in (0..num)
        .map(|_| {
            let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
            master_rng.fill(&mut seed);
            Xoshiro256PlusPlus::from_seed(seed)
        })
        .map(|mut r| dice.evaluate(&mut r))
    {
        results.add(result.total());
        result
            .rolls()
            .iter()
            .for_each(|r| throws.add(i64::from(*r)));
    }

    for (path, histogram) in [("throws.npy", throws), ("rolls.npy", results)] {
        if let Err(e) = npy::to_file(path, histogram.counts) {
            log::error!("unable to write {}: {}", path, e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_histogram_layout() {
        let mut histogram = Histogram::new(-2, 19).unwrap();
        histogram.add(-2);
        histogram.add(19);
        histogram.add(19);
        histogram.add(40);
        assert_eq!(histogram.counts.len(), 23);
        assert_eq!(histogram.counts[0], -2);
        assert_eq!(histogram.counts[1], 1);
        assert_eq!(histogram.counts[22], 2);
    }

    #[test]
    fn test_histogram_too_wide() {
        assert!(Histogram::new(0, i64::MAX).is_none());
        assert!(Histogram::new(1, MAX_BUCKETS).is_none());
    }

    #[test]
    fn test_largest_die() {
        let dice: DieRoll = "d4 & 2d12 & 3d6".parse().unwrap();
        assert_eq!(largest_die(&dice), 12);
    }
}
