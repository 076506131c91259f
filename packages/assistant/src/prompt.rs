/// Build the prompt asking for a plain-language summary.
pub fn build_summary_prompt(text: &str) -> String {
    format!("Summarize the following legal text in plain language, with short bullet points:\n\n{text}")
}

/// Build the prompt asking a question about a document.
pub fn build_question_prompt(context: &str, question: &str) -> String {
    format!("Context:\n{context}\n\nQuestion: {question}\nAnswer in concise plain language.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_contains_text() {
        let prompt = build_summary_prompt("The tenant pays rent.");
        assert!(prompt.starts_with("Summarize the following legal text"));
        assert!(prompt.ends_with("\n\nThe tenant pays rent."));
    }

    #[test]
    fn test_question_prompt_layout() {
        assert_eq!(
            build_question_prompt("Rent is due monthly.", "When is rent due?"),
            "Context:\nRent is due monthly.\n\nQuestion: When is rent due?\nAnswer in concise plain language."
        );
    }
}
