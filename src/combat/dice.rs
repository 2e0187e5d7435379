//! Dice expressions
//!
//! Grammar: one or more terms joined by `+`, each term either `<count>d<sides>`
//! or a bare integer. Parsing is defensive: a term that does not parse
//! contributes 0 instead of failing the whole weapon.

use nom::branch::alt;
use nom::character::complete::{char, digit1, space0};
use nom::combinator::{all_consuming, map_opt, opt};
use nom::sequence::delimited;
use nom::{IResult, Parser};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on dice in one term, so a typo cannot stall a turn
const MAX_DICE_PER_TERM: u32 = 100;

/// Largest side count or constant a term may carry
const MAX_TERM_VALUE: u32 = i32::MAX as u32;

/// One additive term of a dice expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceTerm {
    /// Sum of `count` uniform draws in [1, sides]
    Dice { count: u32, sides: u32 },
    /// Flat amount
    Constant(u32),
    /// Unparseable input, contributes 0
    Invalid,
}

impl DiceTerm {
    fn roll<R: Rng>(&self, rng: &mut R) -> i32 {
        match *self {
            DiceTerm::Dice { count, sides } if sides > 0 => {
                let sides = sides.min(MAX_TERM_VALUE) as i32;
                (0..count).fold(0i32, |total, _| total.saturating_add(rng.gen_range(1..=sides)))
            }
            DiceTerm::Dice { .. } => 0,
            DiceTerm::Constant(value) => value.min(MAX_TERM_VALUE) as i32,
            DiceTerm::Invalid => 0,
        }
    }

    fn bounds(&self) -> (i32, i32) {
        match *self {
            DiceTerm::Dice { count, sides } if sides > 0 => {
                (count as i32, count.saturating_mul(sides).min(MAX_TERM_VALUE) as i32)
            }
            DiceTerm::Constant(value) => {
                let value = value.min(MAX_TERM_VALUE) as i32;
                (value, value)
            }
            _ => (0, 0),
        }
    }
}

/// Parsed damage expression such as `1d8+1d6` or `2d4+3`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DiceExpr {
    source: String,
    terms: Vec<DiceTerm>,
}

impl DiceExpr {
    /// Parse an expression; never fails, bad terms become `DiceTerm::Invalid`
    pub fn parse(source: &str) -> Self {
        let terms = source
            .split('+')
            .map(|raw| match term(raw) {
                Ok((_, parsed)) => parsed,
                Err(_) => {
                    tracing::warn!(expr = source, term = raw, "unparseable dice term");
                    DiceTerm::Invalid
                }
            })
            .collect();

        Self {
            source: source.to_string(),
            terms,
        }
    }

    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }

    /// Roll every term and sum them
    pub fn roll<R: Rng>(&self, rng: &mut R) -> i32 {
        self.terms
            .iter()
            .fold(0i32, |total, t| total.saturating_add(t.roll(rng)))
    }

    /// Smallest and largest possible roll
    pub fn bounds(&self) -> (i32, i32) {
        self.terms.iter().fold((0, 0), |(lo, hi), t| {
            let (tlo, thi) = t.bounds();
            (lo.saturating_add(tlo), hi.saturating_add(thi))
        })
    }
}

impl From<String> for DiceExpr {
    fn from(source: String) -> Self {
        DiceExpr::parse(&source)
    }
}

impl From<DiceExpr> for String {
    fn from(expr: DiceExpr) -> Self {
        expr.source
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Non-negative integer that fits an `i32`; anything larger fails the term
fn number(input: &str) -> IResult<&str, u32> {
    map_opt(digit1, |digits: &str| {
        digits.parse::<u32>().ok().filter(|v| *v <= MAX_TERM_VALUE)
    })
    .parse(input)
}

fn dice(input: &str) -> IResult<&str, DiceTerm> {
    let (input, count) = opt(number).parse(input)?;
    let (input, _) = alt((char('d'), char('D'))).parse(input)?;
    let (input, sides) = number(input)?;
    let count = count.unwrap_or(1).min(MAX_DICE_PER_TERM);
    Ok((input, DiceTerm::Dice { count, sides }))
}

fn constant(input: &str) -> IResult<&str, DiceTerm> {
    let (input, value) = number(input)?;
    Ok((input, DiceTerm::Constant(value)))
}

fn term(input: &str) -> IResult<&str, DiceTerm> {
    all_consuming(delimited(space0, alt((dice, constant)), space0)).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_compound() {
        let expr = DiceExpr::parse("1d8+1d6");
        assert_eq!(
            expr.terms(),
            &[
                DiceTerm::Dice { count: 1, sides: 8 },
                DiceTerm::Dice { count: 1, sides: 6 }
            ]
        );
        assert_eq!(expr.bounds(), (2, 14));
    }

    #[test]
    fn test_parse_constant_and_spaces() {
        let expr = DiceExpr::parse("2d4 + 3");
        assert_eq!(
            expr.terms(),
            &[DiceTerm::Dice { count: 2, sides: 4 }, DiceTerm::Constant(3)]
        );
        assert_eq!(expr.bounds(), (5, 11));
    }

    #[test]
    fn test_implicit_single_die() {
        let expr = DiceExpr::parse("d6");
        assert_eq!(expr.terms(), &[DiceTerm::Dice { count: 1, sides: 6 }]);
    }

    #[test]
    fn test_bad_term_contributes_zero() {
        let expr = DiceExpr::parse("1d6+banana");
        assert_eq!(expr.terms()[1], DiceTerm::Invalid);
        assert_eq!(expr.bounds(), (1, 6));

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let roll = expr.roll(&mut rng);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn test_subtraction_not_supported() {
        let expr = DiceExpr::parse("1d6-1");
        assert_eq!(expr.terms(), &[DiceTerm::Invalid]);
        assert_eq!(expr.bounds(), (0, 0));
    }

    #[test]
    fn test_zero_sided_die_is_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(DiceExpr::parse("3d0").roll(&mut rng), 0);
    }

    #[test]
    fn test_roll_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let expr = DiceExpr::parse("1d8+1d6");
        for _ in 0..500 {
            let roll = expr.roll(&mut rng);
            assert!((2..=14).contains(&roll), "rolled {}", roll);
        }
    }

    #[test]
    fn test_constant_roll_is_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(DiceExpr::parse("10").roll(&mut rng), 10);
    }

    #[test]
    fn test_oversized_constant_is_invalid() {
        let expr = DiceExpr::parse("3000000000");
        assert_eq!(expr.terms(), &[DiceTerm::Invalid]);
        assert_eq!(expr.bounds(), (0, 0));
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        assert_eq!(expr.roll(&mut rng), 0);
    }

    #[test]
    fn test_huge_sums_saturate() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let expr = DiceExpr::parse("2000000000+2000000000");
        assert_eq!(expr.roll(&mut rng), i32::MAX);
        assert_eq!(expr.bounds(), (i32::MAX, i32::MAX));

        let dice = DiceExpr::parse("100d2147483647");
        assert!(dice.roll(&mut rng) > 0);
        assert_eq!(dice.bounds(), (100, i32::MAX));
    }

    #[test]
    fn test_display_keeps_source() {
        assert_eq!(DiceExpr::parse("1d8+1d6").to_string(), "1d8+1d6");
    }
}
