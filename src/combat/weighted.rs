//! Weighted random choice
//!
//! Every table lookup in targeting goes through here.

use rand::Rng;

/// Pick one item with probability proportional to its weight
///
/// Callers must pass a non-empty list of positive weights; tables are
/// validated at load time.
pub fn weighted_choice<'a, T, R: Rng>(entries: &'a [(T, f32)], rng: &mut R) -> &'a T {
    &weighted_pick(entries, |(_, w)| *w, rng).0
}

/// Pick one record, reading its weight through an accessor
///
/// Draws once in [0, total) and scans with running subtraction, so on a
/// tie the earlier entry wins.
pub fn weighted_pick<'a, T, R: Rng>(
    entries: &'a [T],
    weight: impl Fn(&T) -> f32,
    rng: &mut R,
) -> &'a T {
    let total: f32 = entries.iter().map(&weight).sum();
    let mut draw = rng.gen::<f32>() * total;
    tracing::trace!(total, draw, "weighted draw");

    for entry in entries {
        let w = weight(entry);
        if draw < w {
            return entry;
        }
        draw -= w;
    }

    &entries[entries.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_draw_picks_first() {
        let mut rng = ScriptedRng::new(&[0.0]);
        let entries = [("a", 1.0), ("b", 1.0)];
        assert_eq!(*weighted_choice(&entries, &mut rng), "a");
    }

    #[test]
    fn test_boundary_goes_to_next() {
        // draw = 0.5 * 2.0 = 1.0, which is past "a"'s weight of 1.0
        let mut rng = ScriptedRng::new(&[0.5]);
        let entries = [("a", 1.0), ("b", 1.0)];
        assert_eq!(*weighted_choice(&entries, &mut rng), "b");
    }

    #[test]
    fn test_top_draw_picks_last() {
        let mut rng = ScriptedRng::new(&[0.999]);
        let entries = [("a", 3.0), ("b", 1.0), ("c", 6.0)];
        assert_eq!(*weighted_choice(&entries, &mut rng), "c");
    }

    #[test]
    fn test_single_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let entries = [(42, 0.5)];
        for _ in 0..10 {
            assert_eq!(*weighted_choice(&entries, &mut rng), 42);
        }
    }

    #[test]
    fn test_distribution_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let entries = [(0usize, 10.0), (1, 30.0), (2, 60.0)];
        let mut counts = [0u32; 3];
        let n = 20_000;
        for _ in 0..n {
            counts[*weighted_choice(&entries, &mut rng)] += 1;
        }
        let expected = [0.1, 0.3, 0.6];
        for (count, p) in counts.iter().zip(expected) {
            let observed = *count as f32 / n as f32;
            assert!((observed - p).abs() < 0.02, "observed {} expected {}", observed, p);
        }
    }

    #[test]
    fn test_weighted_pick_uses_accessor() {
        let mut rng = ScriptedRng::new(&[0.7]);
        let entries = [("low", 1.0f32), ("high", 9.0f32)];
        let picked = weighted_pick(&entries, |e| e.1, &mut rng);
        assert_eq!(picked.0, "high");
    }
}
