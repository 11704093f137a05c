use crate::models::ProfileRecord;

/// Closing instruction appended after the candidate list
pub const CLOSING_INSTRUCTION: &str =
    "List the profile names in order of best fit to least fit for the task.";

/// Compose the ranking prompt for a task and a list of profiles
///
/// The output is a pure function of its inputs: candidates are enumerated
/// from 1 in exactly the order given, with no filtering or deduplication.
///
/// # Layout
/// 1. Instruction line quoting the task and naming the criteria
/// 2. One line per profile
/// 3. Closing instruction
pub fn compose_prompt(task: &str, profiles: &[ProfileRecord]) -> String {
    let mut prompt = instruction_line(task);
    prompt.push_str("\n\n");

    for (index, profile) in profiles.iter().enumerate() {
        prompt.push_str(&candidate_line(index + 1, profile));
        prompt.push('\n');
    }

    prompt.push('\n');
    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}

/// Opening line with the task embedded verbatim
pub fn instruction_line(task: &str) -> String {
    format!(
        "Rank the following profiles based on their suitability for the task: '{}'. \
         Consider their skills, experience, availability, and rating.",
        task
    )
}

/// Enumerated line for a single candidate, without trailing newline
pub fn candidate_line(position: usize, profile: &ProfileRecord) -> String {
    format!(
        "{}. Name: {}, Skills: {}, Experience: {} hours, Rating: {}, Trust Score: {}, Availability: {}",
        position,
        profile.name,
        profile.skills.join(", "),
        profile.task_experience,
        profile.rating,
        profile.trust_score,
        profile.availability,
    )
}
