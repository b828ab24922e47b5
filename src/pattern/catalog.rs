use serde::Serialize;

use super::BreathingPattern;

/// Catalog entry exposed by the techniques API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechniqueInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub pattern: BreathingPattern,
}

// Catalog is defined with raw struct literals rather than
// BreathingPattern::new so it can live in a const table; the invariants
// (inhale > 0, exhale > 0, cycles > 0) are checked by catalog_is_valid below.
const CATALOG: &[TechniqueInfo] = &[
    TechniqueInfo {
        id: "box-breathing",
        name: "Box Breathing",
        pattern: BreathingPattern {
            inhale_secs: 4,
            hold_in_secs: 4,
            exhale_secs: 4,
            hold_out_secs: 4,
            cycles: 6,
        },
    },
    TechniqueInfo {
        id: "478",
        name: "4-7-8 Relaxing Breath",
        pattern: BreathingPattern {
            inhale_secs: 4,
            hold_in_secs: 7,
            exhale_secs: 8,
            hold_out_secs: 0,
            cycles: 4,
        },
    },
    TechniqueInfo {
        id: "coherent",
        name: "Coherent Breathing",
        pattern: BreathingPattern {
            inhale_secs: 5,
            hold_in_secs: 0,
            exhale_secs: 5,
            hold_out_secs: 0,
            cycles: 12,
        },
    },
    TechniqueInfo {
        id: "extended-exhale",
        name: "Extended Exhale",
        pattern: BreathingPattern {
            inhale_secs: 4,
            hold_in_secs: 0,
            exhale_secs: 6,
            hold_out_secs: 0,
            cycles: 8,
        },
    },
    TechniqueInfo {
        id: "triangle",
        name: "Triangle Breathing",
        pattern: BreathingPattern {
            inhale_secs: 4,
            hold_in_secs: 4,
            exhale_secs: 4,
            hold_out_secs: 0,
            cycles: 8,
        },
    },
];

/// Look up the pattern for a technique id.
pub fn find_pattern(technique_id: &str) -> Option<BreathingPattern> {
    CATALOG
        .iter()
        .find(|t| t.id == technique_id)
        .map(|t| t.pattern)
}

/// All catalog entries, for the techniques listing endpoint.
pub fn technique_ids() -> &'static [TechniqueInfo] {
    CATALOG
}
