use super::sections::AnswerSections;

pub const DISCLAIMER: &str =
    "Disclaimer: Always consult a medical professional for accurate diagnosis and treatment.";

/// Renders the fixed multi-section reply. Deterministic given its inputs.
pub fn compose_answer(topic: &str, sections: &AnswerSections) -> String {
    format!(
        "📌 **Information about {title}**\n\
         \n\
         📖 **Definition**\n\
         {definition}\n\
         \n\
         🩺 **Symptoms**\n\
         - {symptoms}\n\
         \n\
         ⚠️ **Causes**\n\
         - {causes}\n\
         \n\
         💊 **Treatment**\n\
         - {treatment}\n\
         \n\
         🛡️ **Precautions / Prevention**\n\
         - {prevention}\n\
         \n\
         ❗ **Possible Complications**\n\
         - {complications}\n\
         \n\
         ⚠️ *{disclaimer}*",
        title = title_case(topic),
        definition = sections.definition,
        symptoms = sections.symptoms,
        causes = sections.causes,
        treatment = sections.treatment,
        prevention = sections.prevention,
        complications = sections.complications,
        disclaimer = DISCLAIMER,
    )
}

/// First letter of each word upper-cased, the rest lowered.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
