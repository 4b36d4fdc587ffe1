use super::HealthDocument;

/// The fixed document set used by the knowledge-base strategy.
pub fn seed_documents() -> Vec<HealthDocument> {
    vec![
        HealthDocument {
            id: "doc_1".to_string(),
            content: "Diabetes is a chronic condition that affects how your body processes \
                      blood sugar (glucose). Type 1 diabetes occurs when your immune system \
                      attacks insulin-producing cells. Type 2 diabetes occurs when your body \
                      becomes resistant to insulin or doesn't make enough insulin."
                .to_string(),
            source: "WHO Diabetes Fact Sheet 2023".to_string(),
            category: "diabetes".to_string(),
            url: "https://www.who.int/news-room/fact-sheets/detail/diabetes".to_string(),
        },
        HealthDocument {
            id: "doc_2".to_string(),
            content: "Hypertension (high blood pressure) is a serious medical condition that \
                      significantly increases the risks of heart, brain, kidney and other \
                      diseases. Blood pressure is measured in millimeters of mercury (mmHg) \
                      and is recorded as two numbers: systolic pressure (when the heart beats) \
                      over diastolic pressure (when the heart rests between beats)."
                .to_string(),
            source: "American Heart Association Guidelines 2023".to_string(),
            category: "hypertension".to_string(),
            url: "https://www.heart.org/en/health-topics/high-blood-pressure".to_string(),
        },
        HealthDocument {
            id: "doc_3".to_string(),
            content: "Regular physical activity is one of the most important things you can do \
                      for your health. It can help control your weight, reduce your risk of \
                      heart disease, strengthen your bones and muscles, and improve your mental \
                      health and mood. Adults should aim for at least 150 minutes of \
                      moderate-intensity aerobic activity per week."
                .to_string(),
            source: "CDC Physical Activity Guidelines 2023".to_string(),
            category: "exercise".to_string(),
            url: "https://www.cdc.gov/physicalactivity/basics/adults/index.htm".to_string(),
        },
        HealthDocument {
            id: "doc_4".to_string(),
            content: "A balanced diet includes a variety of foods from all food groups: fruits, \
                      vegetables, whole grains, lean proteins, and healthy fats. Limiting \
                      processed foods, added sugars, and excessive sodium can help prevent \
                      chronic diseases and maintain optimal health."
                .to_string(),
            source: "Harvard School of Public Health 2023".to_string(),
            category: "nutrition".to_string(),
            url: "https://www.hsph.harvard.edu/nutritionsource/healthy-eating-plate/".to_string(),
        },
        HealthDocument {
            id: "doc_5".to_string(),
            content: "Mental health includes our emotional, psychological, and social \
                      well-being. It affects how we think, feel, and act. Good mental health is \
                      essential at every stage of life. Common mental health conditions include \
                      depression, anxiety disorders, and stress-related disorders."
                .to_string(),
            source: "National Institute of Mental Health 2023".to_string(),
            category: "mental_health".to_string(),
            url: "https://www.nimh.nih.gov/health/topics/mental-health-information".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_documents_have_unique_ids_and_citations() {
        let documents = seed_documents();

        assert_eq!(documents.len(), 5);
        for doc in &documents {
            assert!(!doc.content.is_empty());
            assert!(!doc.source.is_empty());
            assert!(doc.url.starts_with("https://"));
        }

        let mut ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}
