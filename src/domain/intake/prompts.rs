//! Prompt rendering for the receptionist model.
//!
//! Both prompts are pure functions of the transcript. The model keeps no
//! memory between calls: progress is re-derived from the inlined transcript
//! on every turn.

use super::conversation::{Turn, TurnRole};
use super::schema::{FieldSchema, RegistrationField};

/// Opening assistant turn of every session.
pub const GREETING: &str = "Hello! Welcome to MediCare Clinic. I'm here to help you complete your registration. Let's start - what's your full name?";

/// Assistant turn appended when extraction yields a complete record.
pub const COMPLETION_MESSAGE: &str = "Perfect! I've collected all your information. Please review it on the screen and make any edits if needed.";

/// Phrase the model is told to emit once every item has been discussed.
pub const ALL_COLLECTED_PHRASE: &str =
    "Perfect! I have all your information. Let me prepare it for review.";

/// Reply shown to the patient when the model call fails.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, I'm having trouble. Could you please repeat that?";

/// Transcript with numbered lines labelled AI / PATIENT.
pub fn numbered_transcript(conversation: &[Turn]) -> String {
    conversation
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            let role = match turn.role {
                TurnRole::Assistant => "AI",
                TurnRole::User => "PATIENT",
            };
            format!("{}. {}: {}", i + 1, role, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Transcript labelled RECEPTIONIST / PATIENT, turns separated by blank lines.
pub fn labelled_transcript(conversation: &[Turn]) -> String {
    conversation
        .iter()
        .map(|turn| {
            let role = match turn.role {
                TurnRole::Assistant => "RECEPTIONIST",
                TurnRole::User => "PATIENT",
            };
            format!("{}: {}", role, turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn checklist() -> String {
    FieldSchema::required_fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if field.is_optional() {
                optional_marker(*field)
            } else {
                "REQUIRED"
            };
            format!("{}. {} ({})", i + 1, field.description(), marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn optional_marker(field: RegistrationField) -> &'static str {
    match field {
        RegistrationField::Email => "OPTIONAL - can skip",
        _ => "OPTIONAL - say none if none",
    }
}

/// System prompt asking the model for the next question.
pub fn next_question_prompt(conversation: &[Turn]) -> String {
    let count = FieldSchema::field_count();
    format!(
        "You are a friendly medical receptionist helping a patient register at MediCare Clinic.\n\n\
        REQUIRED INFORMATION TO COLLECT ({count} items):\n{checklist}\n\n\
        CONVERSATION SO FAR:\n{transcript}\n\n\
        YOUR TASK:\n\
        - Review the conversation carefully and identify what information has ALREADY been collected\n\
        - Ask for the NEXT MISSING piece of information\n\
        - DO NOT repeat questions for information already provided\n\
        - If patient changes previous info, acknowledge: \"I'll update that\" and move to next missing item\n\
        - Keep responses SHORT (1-2 sentences max)\n\
        - For optional fields (email, medical history, allergies, medications), if they say \"none\"/\"no\"/\"skip\", accept it and move on\n\
        - Continue until ALL {count} items are discussed\n\
        - When ALL items are collected, say: \"{done}\"\n\n\
        Generate your next question:",
        count = count,
        checklist = checklist(),
        transcript = numbered_transcript(conversation),
        done = ALL_COLLECTED_PHRASE,
    )
}

fn json_template() -> String {
    let lines = FieldSchema::required_fields()
        .iter()
        .map(|field| format!("  \"{}\": \"{}\"", field.key(), field.extraction_hint()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{}\n}}", lines)
}

/// Prompt asking the model to turn the whole transcript into one JSON object.
pub fn extraction_prompt(conversation: &[Turn]) -> String {
    let count = FieldSchema::field_count();
    let optional_keys = FieldSchema::optional_fields()
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Extract ALL registration information from this conversation between a medical receptionist and a patient.\n\n\
        FULL CONVERSATION:\n{transcript}\n\n\
        Return a JSON object with these EXACT keys:\n\n{template}\n\n\
        EXTRACTION RULES:\n\
        1. If patient CHANGED any value (e.g., phone number), use the MOST RECENT value\n\
        2. For optional fields ({optional_keys}):\n   \
           - Use empty string \"\" if patient said \"none\", \"no\", \"nothing\", \"skip\", \"don't have\"\n   \
           - Use empty string \"\" if not mentioned\n\
        3. For age: extract only the number\n\
        4. For gender: standardize to \"Male\", \"Female\", or \"Other\"\n\
        5. Extract ALL information even if briefly mentioned\n\
        6. ALL {count} fields MUST be in the JSON (use \"\" for missing values)\n\n\
        Return ONLY the JSON, no other text:",
        transcript = labelled_transcript(conversation),
        template = json_template(),
        optional_keys = optional_keys,
        count = count,
    )
}
