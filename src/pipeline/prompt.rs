//! Stage-specific prompts for the generation service.
//!
//! Each stage embeds the user context it needs and a constrained
//! "**Title**: body" line format with no preamble, so the section
//! parser has a fighting chance with the response.

use super::types::LocationHint;
use crate::models::UserProfile;

/// Prompt for the personalized guidance stage.
pub fn guidance_prompt(profile: &UserProfile, query: &str) -> String {
    format!(
        "Provide a brief health recommendation for {name} (use a nickname or first name), \
         aged {age}, gender {gender}, based on this symptom: {query}.\n\
         Keep it under 3-4 sentences. Avoid disclaimers, subtopics, or questions.",
        name = profile.name,
        age = profile.age,
        gender = profile.gender.as_str(),
    )
}

/// Prompt for the medicine suggestion stage.
pub fn medicines_prompt(profile: &UserProfile, query: &str) -> String {
    format!(
        "Suggest tablets and medicines (brand names only, like Dolo 650, Crocin, etc.) \
         suitable for a person aged {age} for the condition: {query}.\n\
         Ensure the response is in this exact format, without any introductory text, \
         and give no examples:\n\
         **Medicine Name**: Dosage instructions.\n\
         **Medicine Name**: Dosage and when to take it.\n\
         Keep it simple and to the point. Avoid disclaimers, subtopics, or questions.",
        age = profile.age,
    )
}

/// Prompt for the natural remedy stage.
pub fn remedies_prompt(profile: &UserProfile, query: &str) -> String {
    format!(
        "Suggest natural home remedies for a person aged {age} with the condition: {query}.\n\
         List remedies in this exact format, without any introduction and without repeating \
         the words 'Remedy Name' or 'Description':\n\
         **Remedy Name**: Description.\n\
         **Remedy Name**: Description.\n\
         Keep it simple and to the point. Avoid disclaimers, subtopics, or questions.",
        age = profile.age,
    )
}

/// Prompt for the nearby-facility stage. Requires a location hint.
pub fn facilities_prompt(location: LocationHint) -> String {
    format!(
        "List the top nearby hospitals for a person located at \
         Latitude: {lat}, Longitude: {lon}.\n\
         Provide the hospital name and address in this exact format:\n\
         **Hospital Name**,\n\
         Address: Full address.\n\
         Do not add extra text, disclaimers, or subtopics. \
         Just return the hospitals in this structured format.",
        lat = location.latitude,
        lon = location.longitude,
    )
}
