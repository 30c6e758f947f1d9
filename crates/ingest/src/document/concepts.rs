//! Jungian concept tagging.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Concept key and its pattern. Matching is case-insensitive; output follows
/// this order.
const CONCEPT_PATTERNS: &[(&str, &str)] = &[
    ("anima", r"\banima\b"),
    ("animus", r"\banimus\b"),
    ("shadow", r"\bshadow\b"),
    ("self", r"\bSelf\b"),
    ("ego", r"\bego\b"),
    ("individuation", r"\bindividuation\b"),
    ("archetype", r"\barchetype"),
    ("collective_unconscious", r"collective unconscious"),
    ("personal_unconscious", r"personal unconscious"),
    ("complex", r"\bcomplex(es)?\b"),
    ("persona", r"\bpersona\b"),
    ("synchronicity", r"\bsynchronicity\b"),
    ("mandala", r"\bmandala"),
    ("quaternity", r"\bquaternity\b"),
    ("coniunctio", r"\bconiunctio\b"),
    ("projection", r"\bprojection\b"),
    ("transference", r"\btransference\b"),
    ("libido", r"\blibido\b"),
    ("introversion", r"\bintroversion\b"),
    ("extraversion", r"\bextraversion\b"),
    ("feeling", r"\bfeeling\s+(function|type)"),
    ("thinking", r"\bthinking\s+(function|type)"),
    ("sensation", r"\bsensation\s+(function|type)"),
    ("intuition", r"\bintuition\s+(function|type)"),
    ("alchemy", r"\balchem"),
    ("dream", r"\bdream(s|ing)?\b"),
    ("symbol", r"\bsymbol"),
    ("myth", r"\bmyth"),
    ("religion", r"\breligion|\breligious\b"),
    ("god_image", r"\bgod[- ]image|imago dei\b"),
    ("transformation", r"\btransformation\b"),
    ("rebirth", r"\brebirth\b"),
    ("mother", r"\b(mother|maternal)\s*(archetype|complex|image)?"),
    ("father", r"\b(father|paternal)\s*(archetype|complex|image)?"),
    ("child", r"\bchild\s*(archetype)?|puer|divine child"),
    ("wise_old_man", r"wise old man|senex"),
    ("trickster", r"\btrickster\b"),
    ("hero", r"\bhero\s*(archetype|myth|journey)?"),
];

static CONCEPTS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    CONCEPT_PATTERNS
        .iter()
        .map(|(key, pattern)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("hardcoded regex pattern is valid");
            (*key, regex)
        })
        .collect()
});

/// Concept keys present anywhere in `text`, in vocabulary order.
pub fn detect_concepts(text: &str) -> Vec<String> {
    CONCEPTS
        .iter()
        .filter(|(_, regex)| regex.is_match(text))
        .map(|(key, _)| (*key).to_string())
        .collect()
}
