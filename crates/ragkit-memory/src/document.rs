use serde::{Deserialize, Serialize};

/// A short text with a human-readable source label.
///
/// Fields are private: a document never changes after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    content: String,
    source: String,
}

impl Document {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source: source.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

const HEALTHCARE_CORPUS: &[(&str, &str)] = &[
    ("Diabetes is a chronic disease where the body is unable to regulate blood sugar levels.", "Diabetes Overview"),
    ("Hypertension, or high blood pressure, is a common cardiovascular condition that can lead to heart disease.", "Hypertension Overview"),
    ("COVID-19 vaccines are effective at preventing severe illness, hospitalization, and death.", "COVID-19 Vaccine Efficacy"),
    ("Antibiotic resistance occurs when bacteria evolve to resist the effects of drugs.", "Antibiotic Resistance"),
    ("Asthma is a chronic disease that affects the airways in the lungs, causing difficulty in breathing.", "Asthma Overview"),
    ("The flu (influenza) is a viral infection that attacks the respiratory system.", "Influenza Overview"),
    ("Heart disease refers to a range of conditions that affect the heart's structure and function.", "Heart Disease Overview"),
    ("Cancer occurs when cells in the body begin to grow uncontrollably, forming tumors.", "Cancer Overview"),
    ("Alzheimer's disease is a progressive neurological disorder that causes memory loss and cognitive decline.", "Alzheimer's Disease Overview"),
    ("Osteoarthritis is the most common form of arthritis, causing joint pain and stiffness.", "Osteoarthritis Overview"),
    ("Chronic obstructive pulmonary disease (COPD) is a lung condition that causes breathing difficulties.", "COPD Overview"),
    ("Inflammatory bowel disease (IBD) is a group of disorders that cause chronic inflammation in the digestive tract.", "IBD Overview"),
    ("Epilepsy is a neurological disorder characterized by recurrent seizures.", "Epilepsy Overview"),
    ("HIV (Human Immunodeficiency Virus) attacks the immune system, potentially leading to AIDS.", "HIV Overview"),
    ("Multiple sclerosis (MS) is a disease where the immune system attacks the nervous system.", "Multiple Sclerosis Overview"),
    ("Parkinson's disease is a progressive neurological disorder that affects movement and coordination.", "Parkinson's Disease Overview"),
    ("Obesity is a medical condition characterized by excessive body fat that increases the risk of various diseases.", "Obesity Overview"),
    ("Tuberculosis (TB) is a bacterial infection that primarily affects the lungs, but can affect other parts of the body.", "Tuberculosis Overview"),
    ("Stroke occurs when the blood supply to part of the brain is interrupted, causing brain damage.", "Stroke Overview"),
    ("Chronic kidney disease (CKD) is the gradual loss of kidney function over time.", "Chronic Kidney Disease Overview"),
    ("Cystic fibrosis is a genetic disorder that affects the lungs, pancreas, and other organs.", "Cystic Fibrosis Overview"),
    ("Sickle cell disease is a genetic condition that causes abnormal red blood cells that can lead to blockages in blood vessels.", "Sickle Cell Disease Overview"),
    ("Hepatitis is an inflammation of the liver, often caused by viral infections.", "Hepatitis Overview"),
    ("Mental health disorders, such as depression and anxiety, are common and can affect a person's thoughts, emotions, and behavior.", "Mental Health Overview"),
    ("Pneumonia is an infection that causes inflammation in the air sacs of the lungs, leading to breathing difficulties.", "Pneumonia Overview"),
    ("Atherosclerosis is a condition where plaque builds up inside the arteries, increasing the risk of heart attack and stroke.", "Atherosclerosis Overview"),
    ("Rheumatoid arthritis is an autoimmune disease that causes inflammation in the joints.", "Rheumatoid Arthritis Overview"),
    ("SARS (Severe Acute Respiratory Syndrome) is a viral respiratory illness caused by a coronavirus.", "SARS Overview"),
    ("Chikungunya is a viral disease transmitted by mosquitoes, causing fever and joint pain.", "Chikungunya Overview"),
];

/// The builtin healthcare overview corpus ingested by `ragkit ask`.
pub fn healthcare_documents() -> Vec<Document> {
    HEALTHCARE_CORPUS
        .iter()
        .map(|(content, source)| Document::new(*content, *source))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_size_and_labels() {
        let docs = healthcare_documents();
        assert_eq!(docs.len(), 29);
        assert!(docs.iter().all(|d| !d.content().is_empty() && !d.source().is_empty()));
        assert_eq!(docs[0].source(), "Diabetes Overview");
    }

    #[test]
    fn test_document_serialization() {
        let doc = Document::new("Asthma affects the airways.", "Asthma Overview");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["content"], "Asthma affects the airways.");
        assert_eq!(json["source"], "Asthma Overview");
        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
