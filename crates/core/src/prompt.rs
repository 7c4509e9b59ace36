//! Prompt rendering for downstream language-model integration.
//!
//! Renders the knowledge-base catalog and a patient record as the plain-text
//! block an external assistant would receive. Pure string assembly; the
//! engine itself never calls out anywhere.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::knowledge::KnowledgeBase;
use crate::record::PatientRecord;

/// Renders the knowledge base plus patient data as a prompt block.
pub fn build_user_prompt(record: &PatientRecord, today: NaiveDate) -> String {
    let kb = KnowledgeBase::standard();

    let mut prompt = String::from("Knowledge Base:\n");
    for rule in kb.rules() {
        let _ = writeln!(prompt, "- {}: {}", rule.id, rule.citation);
    }

    let _ = write!(
        prompt,
        "\nPatient Data:\nPatient: {}, Age: {}, Gender: {}\nNotes: {}\n\nVisits:",
        record.name,
        record.age_or_default(today),
        record.gender,
        record.notes
    );

    for visit in &record.visits {
        let _ = write!(
            prompt,
            "\n- {}: {} | {}",
            visit.date, visit.chief_complaint, visit.notes
        );
    }

    let _ = write!(prompt, "\n\nVitals:");
    for vital in &record.vitals {
        let _ = write!(
            prompt,
            "\n- {}: {} = {} {}",
            vital.date, vital.vital_type, vital.value, vital.unit
        );
    }

    prompt
}
