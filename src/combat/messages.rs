//! Combat message templates
//!
//! Templates are plain strings with tokens:
//!
//! - `{a}` attacker, `{t}` target, `{t's}` target possessive
//! - `{w}` weapon (or armor, for block lines), `{p}` body part, `{d}` damage
//! - `{x}` wound type
//! - `{verb}` the attack verb, `{v:word}` any verb, both conjugated for the
//!   attacker; `{tv:word}` a verb conjugated for the target
//!
//! The player is addressed in second person, so verbs only change form for
//! everyone else ("you bash", "the zombie bashes").

use crate::core::error::{CombatError, Result};
use crate::core::types::Turn;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a message line describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Attack,
    Miss,
    Block,
    Stagger,
    Parry,
    Critical,
    PartDestroyed,
    Kill,
    Wound,
    /// Informational: an arm took a blow meant for somewhere else
    Intercept,
}

/// A rendered line waiting for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatMessage {
    pub kind: MessageKind,
    pub text: String,
    pub turn: Turn,
}

/// Values substituted into a template
#[derive(Debug, Clone, Default)]
pub struct MessageTokens<'a> {
    pub attacker: &'a str,
    pub target: &'a str,
    pub weapon: &'a str,
    pub part: &'a str,
    pub damage: i32,
    pub verb: &'a str,
    pub wound: &'a str,
}

fn pool(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

/// Template pools, one per message kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub attack: Vec<String>,
    pub miss: Vec<String>,
    pub block: Vec<String>,
    pub stagger: Vec<String>,
    pub parry: Vec<String>,
    pub critical: Vec<String>,
    pub part_destroyed: Vec<String>,
    pub kill: Vec<String>,
    pub wound: Vec<String>,
    pub intercept: Vec<String>,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            attack: pool(&[
                "{a} {verb} {t} in the {p} for {d} damage.",
                "{a} {verb} {t} with {w}, hitting the {p} for {d}.",
                "{a} {v:catch} {t} in the {p} with {w} for {d} damage.",
            ]),
            miss: pool(&[
                "{a} {v:miss} {t}.",
                "{a} {v:swing} at {t} and {v:miss}.",
                "{t} {tv:dodge} {a}.",
            ]),
            block: pool(&[
                "The {w} absorbs {d} damage.",
                "The {w} takes {d} of the blow.",
            ]),
            stagger: pool(&["{t} {tv:stagger} from the blow!", "{t} {tv:reel}, dazed."]),
            parry: pool(&[
                "{t} {tv:parry} the blow with {w}.",
                "{t} {tv:turn} {a} aside with {w}.",
            ]),
            critical: pool(&["A vicious blow!", "{a} {v:find} a weak spot!"]),
            part_destroyed: pool(&["{t's} {p} is ruined!", "{t's} {p} gives out!"]),
            kill: pool(&["{t} {tv:die}.", "{t} {tv:collapse}, lifeless."]),
            wound: pool(&["{t's} {p} suffers a {x}.", "{a} {v:leave} a {x} on {t's} {p}."]),
            intercept: pool(&["{t} {tv:raise} an arm and {tv:take} the blow meant for the {p}."]),
        }
    }
}

impl MessageTemplates {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let templates: MessageTemplates = toml::from_str(content)?;
        templates.validate()?;
        Ok(templates)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Every pool must have at least one template
    pub fn validate(&self) -> Result<()> {
        for kind in ALL_KINDS {
            if self.pool(kind).is_empty() {
                return Err(CombatError::InvalidTable(format!(
                    "message pool {kind:?} is empty"
                )));
            }
        }
        Ok(())
    }

    pub fn pool(&self, kind: MessageKind) -> &[String] {
        match kind {
            MessageKind::Attack => &self.attack,
            MessageKind::Miss => &self.miss,
            MessageKind::Block => &self.block,
            MessageKind::Stagger => &self.stagger,
            MessageKind::Parry => &self.parry,
            MessageKind::Critical => &self.critical,
            MessageKind::PartDestroyed => &self.part_destroyed,
            MessageKind::Kill => &self.kill,
            MessageKind::Wound => &self.wound,
            MessageKind::Intercept => &self.intercept,
        }
    }

    /// Pick a template at random and fill it in
    pub fn compose<R: Rng>(
        &self,
        kind: MessageKind,
        tokens: &MessageTokens<'_>,
        player_name: &str,
        rng: &mut R,
    ) -> Option<String> {
        let template = self.pool(kind).choose(rng)?;
        Some(render(template, tokens, player_name))
    }
}

const ALL_KINDS: [MessageKind; 10] = [
    MessageKind::Attack,
    MessageKind::Miss,
    MessageKind::Block,
    MessageKind::Stagger,
    MessageKind::Parry,
    MessageKind::Critical,
    MessageKind::PartDestroyed,
    MessageKind::Kill,
    MessageKind::Wound,
    MessageKind::Intercept,
];

/// Third-person singular of a base verb
pub fn third_person(verb: &str) -> String {
    const SIBILANTS: [&str; 5] = ["s", "sh", "ch", "x", "z"];
    if SIBILANTS.iter().any(|end| verb.ends_with(end)) {
        return format!("{verb}es");
    }
    if let Some(stem) = verb.strip_suffix('y') {
        if !stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            return format!("{stem}ies");
        }
    }
    format!("{verb}s")
}

fn conjugate(verb: &str, subject: &str, player_name: &str) -> String {
    if subject == player_name {
        verb.to_string()
    } else {
        third_person(verb)
    }
}

fn possessive(name: &str, player_name: &str) -> String {
    if name == player_name {
        "your".to_string()
    } else {
        format!("{name}'s")
    }
}

/// Substitute every token and capitalize the sentence
pub fn render(template: &str, tokens: &MessageTokens<'_>, player_name: &str) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let token = &after[..close];
        match expand(token, tokens, player_name) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    capitalize(&out)
}

fn expand(token: &str, tokens: &MessageTokens<'_>, player_name: &str) -> Option<String> {
    let value = match token {
        "a" => tokens.attacker.to_string(),
        "t" => tokens.target.to_string(),
        "t's" => possessive(tokens.target, player_name),
        "w" => tokens.weapon.to_string(),
        "p" => tokens.part.to_string(),
        "d" => tokens.damage.to_string(),
        "x" => tokens.wound.to_string(),
        "verb" => conjugate(tokens.verb, tokens.attacker, player_name),
        _ => {
            if let Some(verb) = token.strip_prefix("v:") {
                conjugate(verb, tokens.attacker, player_name)
            } else if let Some(verb) = token.strip_prefix("tv:") {
                conjugate(verb, tokens.target, player_name)
            } else {
                return None;
            }
        }
    };
    Some(value)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
