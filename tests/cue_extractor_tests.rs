// Integration tests for cue extraction
//
// These feed synthetic character alignments through the extractor and
// check cue ordering, phase attribution, and the JSON artifact shape.

use anyhow::Result;
use calma_sessions::{extract_cues, AlignedChar, BreathPhase, Language};

/// Build an alignment with each character occupying `step` seconds.
fn align(text: &str, step: f64) -> Vec<AlignedChar> {
    text.chars()
        .enumerate()
        .map(|(i, c)| AlignedChar {
            character: c.to_string(),
            start_secs: i as f64 * step,
            end_secs: (i + 1) as f64 * step,
        })
        .collect()
}

#[test]
fn spanish_inhale_count_sequence() {
    let chars = align("Inhala, dos, tres, cuatro.", 0.1);
    let artifact = extract_cues(&chars, "box-breathing", "sofia", Language::Es);

    assert_eq!(artifact.cues.len(), 4);

    let first = &artifact.cues[0];
    assert_eq!(first.word, "inhala");
    assert_eq!(first.phase, Some(BreathPhase::Inhale));
    assert_eq!(first.count, None);

    let expected = [("dos", 2u8), ("tres", 3), ("cuatro", 4)];
    for (cue, (word, count)) in artifact.cues[1..].iter().zip(expected) {
        assert_eq!(cue.word, word);
        assert_eq!(cue.phase, Some(BreathPhase::Inhale));
        assert_eq!(cue.count, Some(count));
    }
}

#[test]
fn cues_are_time_ordered() {
    let chars = align(
        "Hola, bienvenido. Inhala, dos, tres. Sostén, dos. Exhala, dos, tres. Pausa.",
        0.08,
    );
    let artifact = extract_cues(&chars, "box-breathing", "sofia", Language::Es);

    assert!(artifact.cues.len() > 5);
    for pair in artifact.cues.windows(2) {
        assert!(pair[0].time <= pair[1].time);
    }
}

#[test]
fn full_spanish_narration_walks_all_phases() {
    let chars = align(
        "Hola. Inhala, dos, tres, cuatro. Sostén, dos, tres, cuatro. \
         Exhala, dos, tres, cuatro. Pausa, dos, tres, cuatro.",
        0.05,
    );
    let artifact = extract_cues(&chars, "box-breathing", "sofia", Language::Es);

    let phases: Vec<BreathPhase> = artifact
        .cues
        .iter()
        .filter(|c| c.count.is_none())
        .filter_map(|c| c.phase)
        .collect();

    assert_eq!(
        phases,
        vec![
            BreathPhase::Prepare,
            BreathPhase::Inhale,
            BreathPhase::HoldIn,
            BreathPhase::Exhale,
            BreathPhase::HoldOut,
        ]
    );

    // Every count cue carries the phase of the preceding keyword.
    let hold_counts: Vec<u8> = artifact
        .cues
        .iter()
        .filter(|c| c.phase == Some(BreathPhase::HoldIn))
        .filter_map(|c| c.count)
        .collect();
    assert_eq!(hold_counts, vec![2, 3, 4]);
}

#[test]
fn english_narration_uses_english_tables() {
    let chars = align("Welcome. Inhale, two, three. Hold. Exhale, two, three.", 0.05);
    let artifact = extract_cues(&chars, "478", "amelia", Language::En);

    let words: Vec<&str> = artifact.cues.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(
        words,
        vec!["welcome", "inhale", "two", "three", "hold", "exhale", "two", "three"]
    );
    assert_eq!(artifact.cues[4].phase, Some(BreathPhase::HoldIn));
}

#[test]
fn artifact_serializes_with_camel_case_and_omitted_options() -> Result<()> {
    let chars = align("Inhala, dos.", 0.1);
    let artifact = extract_cues(&chars, "box-breathing", "sofia", Language::Es);

    let json = serde_json::to_value(&artifact)?;

    assert_eq!(json["techniqueId"], "box-breathing");
    assert_eq!(json["voiceId"], "sofia");
    assert!(json["totalDuration"].as_f64().unwrap() > 0.0);

    // Phase cue has no count field at all; count cue has both.
    let cues = json["cues"].as_array().unwrap();
    assert_eq!(cues[0]["phase"], "inhale");
    assert!(cues[0].get("count").is_none());
    assert_eq!(cues[1]["count"], 2);

    Ok(())
}

#[test]
fn non_keyword_words_produce_no_cues() {
    let chars = align("respira con calma y suavidad", 0.1);
    let artifact = extract_cues(&chars, "coherent", "sofia", Language::Es);
    assert!(artifact.cues.is_empty());
    assert!(artifact.total_duration > 0.0);
}
