use crate::models::UserProfile;

const DEFAULT_NAME: &str = "User";
const DEFAULT_AGE: u32 = 25;

/// Compose the chatbot prompt: persona and rules, then the user's question
pub fn build_prompt(profile: Option<&UserProfile>, question: &str) -> String {
    let (name, age) = match profile {
        Some(p) => (p.name.as_str(), p.age),
        None => (DEFAULT_NAME, DEFAULT_AGE),
    };

    format!(
        "You are 'FitBot', an elite sports nutritionist.\n\
         The user is {name}, aged {age}.\n\
         \n\
         Rules:\n\
         1. Keep answers short (at most 3-4 bullet points).\n\
         2. Be encouraging but scientific.\n\
         3. If asked about non-fitness topics, politely refuse.\n\
         4. Use emojis.\n\
         \n\
         User Question: {question}",
        name = name,
        age = age,
        question = question.trim(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uses_defaults_without_profile() {
        let prompt = build_prompt(None, "What should I eat before a run?");
        assert!(prompt.contains("The user is User, aged 25."));
        assert!(prompt.ends_with("User Question: What should I eat before a run?"));
    }

    #[test]
    fn test_prompt_uses_profile() {
        let profile = UserProfile::new("Maya", 34, 2100).unwrap();
        let prompt = build_prompt(Some(&profile), "  protein intake?  ");
        assert!(prompt.contains("The user is Maya, aged 34."));
        assert!(prompt.contains("politely refuse"));
        assert!(prompt.ends_with("User Question: protein intake?"));
    }
}
