//! Keyword-triggered section extraction.
//!
//! A pure presence check: the first sentence-like unit containing a
//! trigger keyword becomes the section text, otherwise a fixed filler
//! takes its place.

/// One sentence or filler per section; no nesting.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerSections {
    pub definition: String,
    pub symptoms: String,
    pub causes: String,
    pub treatment: String,
    pub prevention: String,
    pub complications: String,
}

const SYMPTOM_FILLER: &str = "Not clearly listed, but you may experience common disease \
     symptoms like fever, fatigue, or other condition-specific indicators.";
const CAUSE_FILLER: &str = "Causes are not specifically listed. Check detailed medical sources.";
const TREATMENT_FILLER: &str =
    "Treatment methods are not specifically listed. Seek professional medical guidance.";
const PREVENTION_FILLER: &str =
    "General health precautions may apply: hygiene, healthy diet, regular medical checkups.";
const COMPLICATION_FILLER: &str = "Possible complications are not specifically listed. Ask a \
     medical professional about risks associated with this condition.";

pub fn extract_sections(text: &str) -> AnswerSections {
    let units = sentence_units(text);

    AnswerSections {
        definition: text.trim().to_string(),
        symptoms: pick(&units, &["symptom"], SYMPTOM_FILLER),
        causes: pick(&units, &["cause"], CAUSE_FILLER),
        treatment: pick(&units, &["treat"], TREATMENT_FILLER),
        prevention: pick(&units, &["prevent"], PREVENTION_FILLER),
        complications: pick(&units, &["complicat"], COMPLICATION_FILLER),
    }
}

fn sentence_units(text: &str) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| line.split(". "))
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .map(|unit| unit.to_string())
        .collect()
}

fn pick(units: &[String], triggers: &[&str], filler: &str) -> String {
    for unit in units {
        let lower = unit.to_lowercase();
        if triggers.iter().any(|trigger| lower.contains(trigger)) {
            let mut sentence = unit.clone();
            if !sentence.ends_with('.') {
                sentence.push('.');
            }
            return sentence;
        }
    }
    filler.to_string()
}
