//! Prompt builder: fixed few-shot system message + per-question user message.

/// System instructions with three worked examples.
///
/// The shots are adapted from "Leveraging Large Language Models for Multiple
/// Choice Question Answering" (Robinson et al., arXiv:2210.12353). They show
/// the `Option X` answer shape the resolver expects, and that an
/// "all of the above"-style option wins when several options are correct.
pub const SYSTEM_PROMPT: &str = r#"
You are a helpful expert biology research assistant.

Pick the correct answer from several possible options using only the given relevant background context. If many of the options are correct at the same time and there is an option similar to "all of the above" or "both a and b", pick that option.

Be concise and only return the letter corresponding to the correct option.

Background Context:
Today I went to the new Trader Joe's on Court Street. It is so pretty. It's inside what appears to be an old bank. It was spacious and there were no NYU students wearing velour sweatpants.
Question: What was the narrator very impressed with?
Possible answers:
Option A: None of the above choices.
Option B: The grocery store.
Option C: The NYU campus.
Option D: The bank workers.
Answer: Option B

Background Context:
When we are very young, we start getting knowledge. Kids like watching and listening. Color pictures especially interest them. When kids are older, they enjoy reading. When something interests them, they love to ask questions.
Question: What activities do kids enjoy?
Possible answers:
Option A: watching
Option B: listening
Option C: reading
Option D: all the above
Answer: D

Background Context:
M: I want to send this package by first-class mail. W: Do you want it insured? M: Yes, for 50 dollars, please. I'd also like some stamps--a book of 22 and three airmail. W: You'll have to get those at the stamp window over there, next to general delivery. M: Can I get money orders there, too? W: No, that's to the left, three windows down the hall.
Question: Where can the man get stamps?
Possible answers:
Option A: At the stamp window.
Option B: Next to general delivery.
Option C: Three windows down the hall.
Option D: Both a and c
Answer: D
"#;

/// Number of letters available for options (`A`..=`Z`).
pub const MAX_CHOICES: usize = 26;

/// Letter for the option at `index`, or `None` past `Z`.
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|&i| (i as usize) < MAX_CHOICES)
        .map(|i| (b'A' + i) as char)
}

/// Renders choices as `Option A: ...` lines joined by `\n`.
///
/// Choices past the 26th have no letter and are not rendered.
///
/// # Example
/// ```
/// # use mcq_agent::prompt::format_options;
/// let s = format_options(&["mitosis".to_string(), "meiosis".to_string()]);
/// assert_eq!(s, "Option A: mitosis\nOption B: meiosis");
/// ```
pub fn format_options(answer_choices: &[String]) -> String {
    answer_choices
        .iter()
        .enumerate()
        .filter_map(|(i, choice)| option_letter(i).map(|l| format!("Option {l}: {choice}")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the user message in the same layout as the system prompt's shots.
// Options go on their own lines under `Possible Answers:`, as in the shots.
pub fn build_user_prompt(context: &str, question: &str, answer_choices: &[String]) -> String {
    format!(
        "Background Context:\n{context}\nQuestion: {question}\nPossible Answers:\n{options}\nAnswer: ",
        question = question.trim(),
        options = format_options(answer_choices),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        [
            "uses labeled ddNTPs",
            "uses only dideoxynucleotides",
            "uses only deoxynucleotides",
            "uses labeled dNTPs",
        ]
        .map(String::from)
        .to_vec()
    }

    #[test]
    fn formats_sequencing_choices() {
        assert_eq!(
            format_options(&choices()),
            "Option A: uses labeled ddNTPs\nOption B: uses only dideoxynucleotides\nOption C: uses only deoxynucleotides\nOption D: uses labeled dNTPs"
        );
    }

    #[test]
    fn letters_cover_full_alphabet_in_order() {
        let many: Vec<String> = (0..26).map(|i| format!("choice {i}")).collect();
        let formatted = format_options(&many);
        let lines: Vec<&str> = formatted.lines().collect();

        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], "Option A: choice 0");
        assert_eq!(lines[25], "Option Z: choice 25");
        for (i, line) in lines.iter().enumerate() {
            let expected = format!("Option {}: choice {i}", option_letter(i).unwrap());
            assert_eq!(*line, expected);
        }
    }

    #[test]
    fn no_letter_past_z() {
        assert_eq!(option_letter(25), Some('Z'));
        assert_eq!(option_letter(26), None);
        assert_eq!(option_letter(300), None);
    }

    #[test]
    fn empty_choices_format_to_empty_string() {
        assert_eq!(format_options(&[]), "");
    }

    #[test]
    fn user_prompt_carries_context_question_and_options() {
        let prompt = build_user_prompt(
            "Sanger sequencing relies on chain termination.",
            "  What does Sanger sequencing use?  ",
            &choices(),
        );

        assert!(prompt.starts_with("Background Context:\nSanger sequencing relies on chain termination.\n"));
        assert!(prompt.contains("Question: What does Sanger sequencing use?\n"));
        assert!(prompt.contains("Possible Answers:\nOption A: uses labeled ddNTPs\n"));
        assert!(prompt.ends_with("Option D: uses labeled dNTPs\nAnswer: "));
    }

    #[test]
    fn system_prompt_asks_for_letter_only() {
        assert!(SYSTEM_PROMPT.contains("only return the letter"));
        assert!(SYSTEM_PROMPT.contains("all of the above"));
    }
}
