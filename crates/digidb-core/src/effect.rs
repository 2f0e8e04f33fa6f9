//! Status-effect classifier for the free-text Effect / Chance / Details cells
//!
//! Effect labels in the database are hand-written: modifiers are mixed in
//! ("Pierce, Burn"), abbreviations appear ("KB") and punctuation is loose
//! ("Armor-Pierce25%"). Classification runs in two passes:
//!
//! 1. Token pass: split on whitespace and commas, skip modifier words, and
//!    take the first token that is an exact effect name, as written in the
//!    document. `armor` followed by `break`/`pierce`/`ignore` is read as
//!    Armor Break.
//! 2. Substring pass: if no token matched, search the lower-cased label for
//!    each entry of [`SUBSTRING_FALLBACK`] in order; the first hit wins.
//!
//! The two passes may disagree for the same text; the token pass always
//! takes precedence.

use crate::record::StatusEffect;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static CHANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*%").expect("valid chance regex"));

static DURATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*s\b").expect("valid duration regex"));

/// Canonical status-effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Burn,
    Freeze,
    Slow,
    Stun,
    Poison,
    Confuse,
    Fear,
    Root,
    Bleed,
    Knockback,
    Holy,
    Crit,
    Lifesteal,
    ArmorBreak,
    ArmorPierce,
    Execute,
    Heal,
    Debuff,
    Blind,
    Berserk,
    Summon,
    Block,
    AntiAir,
    Aura,
    Rebirth,
    Reset,
    Reflect,
    DragonSlayer,
    Shield,
    Purge,
    Split,
}

impl EffectKind {
    /// Name written into records and resources
    pub fn label(self) -> &'static str {
        match self {
            EffectKind::Burn => "Burn",
            EffectKind::Freeze => "Freeze",
            EffectKind::Slow => "Slow",
            EffectKind::Stun => "Stun",
            EffectKind::Poison => "Poison",
            EffectKind::Confuse => "Confuse",
            EffectKind::Fear => "Fear",
            EffectKind::Root => "Root",
            EffectKind::Bleed => "Bleed",
            EffectKind::Knockback => "Knockback",
            EffectKind::Holy => "Holy",
            EffectKind::Crit => "Crit",
            EffectKind::Lifesteal => "Lifesteal",
            EffectKind::ArmorBreak => "Armor Break",
            EffectKind::ArmorPierce => "Armor Pierce",
            EffectKind::Execute => "Execute",
            EffectKind::Heal => "Heal",
            EffectKind::Debuff => "Debuff",
            EffectKind::Blind => "Blind",
            EffectKind::Berserk => "Berserk",
            EffectKind::Summon => "Summon",
            EffectKind::Block => "Block",
            EffectKind::AntiAir => "Anti-Air",
            EffectKind::Aura => "Aura",
            EffectKind::Rebirth => "Rebirth",
            EffectKind::Reset => "Reset",
            EffectKind::Reflect => "Reflect",
            EffectKind::DragonSlayer => "Dragon Slayer",
            EffectKind::Shield => "Shield",
            EffectKind::Purge => "Purge",
            EffectKind::Split => "Split",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Words that describe how an attack lands rather than what it inflicts
pub const MODIFIER_TOKENS: &[&str] = &[
    "pierce",
    "aoe",
    "multi-hit",
    "chain",
    "tracking",
    "flying",
    "splash",
    "kb",
];

/// Exact single-token matches for the token pass (lower-case)
pub const TOKEN_VOCABULARY: &[(&str, EffectKind)] = &[
    ("burn", EffectKind::Burn),
    ("freeze", EffectKind::Freeze),
    ("slow", EffectKind::Slow),
    ("stun", EffectKind::Stun),
    ("poison", EffectKind::Poison),
    ("confuse", EffectKind::Confuse),
    ("fear", EffectKind::Fear),
    ("root", EffectKind::Root),
    ("bleed", EffectKind::Bleed),
    ("knockback", EffectKind::Knockback),
    ("holy", EffectKind::Holy),
    ("crit", EffectKind::Crit),
    ("lifesteal", EffectKind::Lifesteal),
    ("execute", EffectKind::Execute),
    ("heal", EffectKind::Heal),
    ("debuff", EffectKind::Debuff),
    ("blind", EffectKind::Blind),
    ("berserk", EffectKind::Berserk),
    ("summon", EffectKind::Summon),
    ("block", EffectKind::Block),
    ("anti-air", EffectKind::AntiAir),
    ("aura", EffectKind::Aura),
    ("rebirth", EffectKind::Rebirth),
    ("reset", EffectKind::Reset),
    ("reflect", EffectKind::Reflect),
    ("shield", EffectKind::Shield),
    ("purge", EffectKind::Purge),
    ("split", EffectKind::Split),
];

/// Second word that turns a preceding `armor` into Armor Break
const ARMOR_COMPOUND_TAILS: &[&str] = &["break", "pierce", "ignore"];

/// Ordered substring search for the fallback pass. First hit wins.
pub const SUBSTRING_FALLBACK: &[(&[&str], EffectKind)] = &[
    (&["burn"], EffectKind::Burn),
    (&["freeze"], EffectKind::Freeze),
    (&["slow"], EffectKind::Slow),
    (&["stun"], EffectKind::Stun),
    (&["poison"], EffectKind::Poison),
    (&["confuse"], EffectKind::Confuse),
    (&["fear"], EffectKind::Fear),
    (&["root"], EffectKind::Root),
    (&["bleed"], EffectKind::Bleed),
    (&["knockback"], EffectKind::Knockback),
    (&["holy"], EffectKind::Holy),
    (&["crit"], EffectKind::Crit),
    (&["lifesteal"], EffectKind::Lifesteal),
    (&["armor break"], EffectKind::ArmorBreak),
    (&["armor pierce", "armor ignore"], EffectKind::ArmorPierce),
    (&["execute"], EffectKind::Execute),
    (&["heal"], EffectKind::Heal),
    (&["debuff"], EffectKind::Debuff),
    (&["blind"], EffectKind::Blind),
    (&["berserk"], EffectKind::Berserk),
    (&["aura"], EffectKind::Aura),
    (&["rebirth"], EffectKind::Rebirth),
    (&["reset"], EffectKind::Reset),
    (&["reflect"], EffectKind::Reflect),
    (&["shield"], EffectKind::Shield),
    (&["dragon slayer"], EffectKind::DragonSlayer),
];

/// Classify the three effect cells of a row into a [`StatusEffect`].
///
/// Returns the empty effect when the label is blank, `-` or `none`.
pub fn classify_effect(effect_label: &str, chance_label: &str, detail_text: &str) -> StatusEffect {
    let label = effect_label.trim();
    if is_empty_label(label) {
        return StatusEffect::default();
    }

    let kind = classify_tokens(label)
        .or_else(|| classify_substring(label).map(|k| k.label().to_string()))
        .unwrap_or_default();

    StatusEffect {
        kind,
        chance: parse_chance(chance_label),
        duration: parse_duration(detail_text),
    }
}

/// Token pass: first exact effect token, skipping modifiers.
///
/// Returns the token with its source casing (`"STUN"` stays `"STUN"`); the
/// armor compound always comes back as `"Armor Break"`.
pub fn classify_tokens(label: &str) -> Option<String> {
    let normalized = label.replace(',', " ");
    let raw: Vec<&str> = normalized.split_whitespace().collect();
    let tokens: Vec<String> = raw.iter().map(|t| t.to_lowercase()).collect();

    for (i, token) in tokens.iter().enumerate() {
        if MODIFIER_TOKENS.contains(&token.as_str()) {
            continue;
        }
        let exact = TOKEN_VOCABULARY
            .iter()
            .find(|(word, _)| *word == token.as_str());
        if exact.is_some() {
            return Some(raw[i].to_string());
        }
        if token == "armor" {
            let tail = tokens.get(i + 1).map(String::as_str);
            if tail.is_some_and(|t| ARMOR_COMPOUND_TAILS.contains(&t)) {
                return Some(EffectKind::ArmorBreak.label().to_string());
            }
        }
    }

    None
}

/// Substring pass over the whole lower-cased label
pub fn classify_substring(label: &str) -> Option<EffectKind> {
    let lower = label.to_lowercase();
    SUBSTRING_FALLBACK
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lower.contains(n)))
        .map(|(_, kind)| *kind)
}

/// First `<number>%` in the chance cell as a fraction, 0.0 when absent
pub fn parse_chance(chance_label: &str) -> f64 {
    let chance_label = chance_label.trim();
    if chance_label.is_empty() || chance_label == "-" {
        return 0.0;
    }
    first_number(&CHANCE_RE, chance_label).map_or(0.0, |pct| pct / 100.0)
}

/// First whole-word `<number>s` in the details cell, 0.0 when absent
pub fn parse_duration(detail_text: &str) -> f64 {
    first_number(&DURATION_RE, detail_text).unwrap_or(0.0)
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn is_empty_label(label: &str) -> bool {
    label.is_empty() || label == "-" || label.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: &[EffectKind] = &[
        EffectKind::Burn,
        EffectKind::Freeze,
        EffectKind::Slow,
        EffectKind::Stun,
        EffectKind::Poison,
        EffectKind::Confuse,
        EffectKind::Fear,
        EffectKind::Root,
        EffectKind::Bleed,
        EffectKind::Knockback,
        EffectKind::Holy,
        EffectKind::Crit,
        EffectKind::Lifesteal,
        EffectKind::ArmorBreak,
        EffectKind::ArmorPierce,
        EffectKind::Execute,
        EffectKind::Heal,
        EffectKind::Debuff,
        EffectKind::Blind,
        EffectKind::Berserk,
        EffectKind::Summon,
        EffectKind::Block,
        EffectKind::AntiAir,
        EffectKind::Aura,
        EffectKind::Rebirth,
        EffectKind::Reset,
        EffectKind::Reflect,
        EffectKind::DragonSlayer,
        EffectKind::Shield,
        EffectKind::Purge,
        EffectKind::Split,
    ];

    #[test]
    fn test_empty_labels() {
        assert!(classify_effect("", "25%", "3s").is_none());
        assert!(classify_effect("-", "25%", "3s").is_none());
        assert!(classify_effect("None", "25%", "3s").is_none());
        assert_eq!(classify_effect("NONE", "25%", "3s"), StatusEffect::default());
    }

    #[test]
    fn test_simple_effect() {
        let effect = classify_effect("Burn", "25%", "3s");
        assert_eq!(effect, StatusEffect::new("Burn", 0.25, 3.0));
    }

    #[test]
    fn test_modifiers_are_skipped() {
        assert_eq!(classify_effect("Pierce, Stun", "10%", "").kind, "Stun");
        assert_eq!(classify_effect("AoE Splash Freeze", "", "").kind, "Freeze");
        assert_eq!(classify_effect("KB Poison", "", "").kind, "Poison");
    }

    #[test]
    fn test_token_keeps_source_casing() {
        assert_eq!(classify_effect("burn", "", "").kind, "burn");
        assert_eq!(classify_effect("STUN, AoE", "", "").kind, "STUN");
        assert_eq!(classify_effect("anti-air", "", "").kind, "anti-air");
        // Substring hits use the canonical label
        assert_eq!(classify_effect("burning", "", "").kind, "Burn");
        // Feeding the result back in is stable
        let again = classify_effect("STUN", "", "");
        assert_eq!(again.kind, "STUN");
    }

    #[test]
    fn test_first_effect_token_wins() {
        assert_eq!(classify_effect("Slow, Burn", "", "").kind, "Slow");
    }

    #[test]
    fn test_armor_compound() {
        assert_eq!(classify_tokens("Armor Break").as_deref(), Some("Armor Break"));
        assert_eq!(classify_tokens("armor pierce").as_deref(), Some("Armor Break"));
        assert_eq!(classify_tokens("Armor Ignore, AoE").as_deref(), Some("Armor Break"));
        assert_eq!(classify_tokens("Armor"), None);
    }

    #[test]
    fn test_substring_fallback() {
        assert_eq!(classify_effect("Burning!", "", "").kind, "Burn");
        assert_eq!(classify_effect("Chain-Stun", "", "").kind, "Stun");
        assert_eq!(classify_effect("Dragon Slayer", "", "").kind, "Dragon Slayer");
        assert_eq!(classify_substring("mega armor pierce"), Some(EffectKind::ArmorPierce));
        // Hyphenated compounds match neither pass
        assert_eq!(classify_effect("Armor-Pierce25%", "", "").kind, "");
    }

    #[test]
    fn test_substring_order_is_fixed() {
        // "burn" is checked before "heal"
        assert_eq!(classify_substring("healburn"), Some(EffectKind::Burn));
        // "fear" is checked before "shield"
        assert_eq!(classify_substring("shield-of-fear"), Some(EffectKind::Fear));
    }

    #[test]
    fn test_unrecognized_label_keeps_chance() {
        let effect = classify_effect("Pierce", "50%", "2s");
        assert_eq!(effect.kind, "");
        assert_eq!(effect.chance, 0.5);
        assert_eq!(effect.duration, 2.0);
    }

    #[test]
    fn test_parse_chance() {
        assert_eq!(parse_chance("100%"), 1.0);
        assert_eq!(parse_chance("10%/25%"), 0.10);
        assert_eq!(parse_chance("-"), 0.0);
        assert_eq!(parse_chance("always"), 0.0);
        assert_eq!(parse_chance("12.5 %"), 0.125);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("4s burn"), 4.0);
        assert_eq!(parse_duration("slows for 2.5s"), 2.5);
        assert_eq!(parse_duration("deals 5 dmg per second"), 0.0);
        assert_eq!(parse_duration("10 stacks"), 0.0);
        assert_eq!(parse_duration(""), 0.0);
    }

    #[test]
    fn test_only_ascii_digits_are_numbers() {
        assert!(!DURATION_RE.is_match("٣s burn"));
        assert!(!CHANCE_RE.is_match("５０%"));
        assert_eq!(parse_duration("٣s burn, then 2s slow"), 2.0);
        assert_eq!(parse_chance("５０% / 25%"), 0.25);
    }

    #[test]
    fn test_reclassifying_kind_is_stable() {
        for kind in ALL_KINDS {
            // Armor Pierce only comes out of the substring pass; the token
            // pass reads "armor pierce" as Armor Break.
            if *kind == EffectKind::ArmorPierce {
                continue;
            }
            let first = classify_effect(kind.label(), "", "");
            assert_eq!(first.kind, kind.label());
            let second = classify_effect(&first.kind, "", "");
            assert_eq!(second.kind, first.kind);
        }
    }
}
