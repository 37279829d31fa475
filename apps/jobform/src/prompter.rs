//! Prompter: confirmation dialogs and notices, behind a trait so the
//! controller can be driven by a terminal or by a script in tests.

use async_trait::async_trait;

pub const CLEAR_FORM_QUESTION: &str = "Are you sure you want to clear all fields?";
pub const CLEAR_AFTER_SUCCESS_QUESTION: &str =
    "Application sent successfully! Do you want to clear the form?";

const SUCCESS_TEXT: &str = "\u{2705} Application submitted successfully!\n\n\
Your details were saved and we will get in touch soon.\n\n\
Thank you for applying!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success,
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::Success => SUCCESS_TEXT.to_string(),
            Notice::Failure(message) => format!(
                "\u{274C} Error: {message}\n\nPlease try again or contact us if the problem persists."
            ),
        }
    }
}

#[async_trait]
pub trait Prompter: Send + Sync {
    /// Blocks until the applicant answers; `false` on cancel.
    async fn confirm(&self, question: &str) -> bool;

    async fn notify(&self, notice: Notice);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Answers confirmations from a script and records everything it was shown.
    /// Runs out of answers as "no".
    #[derive(Default)]
    pub struct ScriptedPrompter {
        answers: Mutex<VecDeque<bool>>,
        questions: Mutex<Vec<String>>,
        notices: Mutex<Vec<Notice>>,
    }

    impl ScriptedPrompter {
        pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
            Self {
                answers: Mutex::new(answers.into_iter().collect()),
                ..Self::default()
            }
        }

        pub fn questions(&self) -> Vec<String> {
            self.questions.lock().unwrap().clone()
        }

        pub fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Prompter for ScriptedPrompter {
        async fn confirm(&self, question: &str) -> bool {
            self.questions.lock().unwrap().push(question.to_string());
            self.answers.lock().unwrap().pop_front().unwrap_or(false)
        }

        async fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notice_carries_message() {
        let text = Notice::Failure("Connection error. Please try again.".into()).text();
        assert!(text.contains("Error: Connection error. Please try again."));
    }

    #[test]
    fn test_success_notice_text() {
        assert!(Notice::Success.text().contains("submitted successfully"));
    }
}
