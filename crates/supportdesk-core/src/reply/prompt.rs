//! Prompt assembly for the support agent.
//!
//! The system instruction is built from fixed sections using XML tags for
//! boundaries, the same way for every request:
//!
//! ```text
//! <persona>...</persona>
//! <knowledge>- Shipping: ...</knowledge>
//! <instructions>...</instructions>
//! ```
//!
//! The conversation window is mapped onto the model's role vocabulary:
//! `user` turns become `User` messages and `agent` turns `Assistant` messages.

use supportdesk_types::chat::{Sender, Turn};
use supportdesk_types::llm::{CompletionRequest, Message};

/// Name of the store the agent answers for.
pub const STORE_NAME: &str = "Spur Store";

/// Fixed domain knowledge handed to the model on every request.
pub const KNOWLEDGE: &[(&str, &str)] = &[
    (
        "Shipping",
        "We ship worldwide. Standard shipping is free on orders over $50. Otherwise it's $5.",
    ),
    (
        "Returns",
        "You can return items within 30 days of receipt if they are unused.",
    ),
    ("Support Hours", "Mon-Fri 9am - 5pm EST."),
    (
        "Products",
        "We sell \"Cool Gadgets\", \"Funny T-shirts\", and \"Tech Accessories\".",
    ),
];

/// Builds completion requests for the support agent.
pub struct SupportPromptBuilder;

impl SupportPromptBuilder {
    /// The complete system instruction.
    pub fn system_prompt() -> String {
        let knowledge: Vec<String> = KNOWLEDGE
            .iter()
            .map(|(topic, fact)| format!("- {topic}: {fact}"))
            .collect();

        let sections = [
            format!(
                "<persona>\n\
                You are a helpful customer support agent for \"{STORE_NAME}\", a fictional e-commerce shop.\n\
                Your goal is to answer customer questions clearly and concisely.\n\
                </persona>"
            ),
            format!("<knowledge>\n{}\n</knowledge>", knowledge.join("\n")),
            "<instructions>\n\
            If you don't know the answer, politely say you don't know and offer to connect them to a human \
            (simulate this by saying \"I'll leave a note for a human agent\").\n\
            Always be polite and professional.\n\
            </instructions>"
                .to_string(),
        ];

        sections.join("\n\n")
    }

    /// Map stored turns onto LLM messages, preserving order.
    pub fn to_messages(history: &[Turn]) -> Vec<Message> {
        history
            .iter()
            .map(|turn| match turn.sender {
                Sender::User => Message::user(turn.text.clone()),
                Sender::Agent => Message::assistant(turn.text.clone()),
            })
            .collect()
    }

    /// Build the request for a history window.
    ///
    /// Leading agent turns are dropped so the conversation sent to the
    /// model always opens on a user turn. Returns `None` when the window
    /// does not end on a user turn: there is no new message to answer.
    pub fn build(history: &[Turn], max_tokens: u32) -> Option<CompletionRequest> {
        let start = history.iter().position(|turn| turn.sender == Sender::User)?;
        let history = &history[start..];

        match history.last() {
            Some(turn) if turn.sender == Sender::User => {}
            _ => return None,
        }

        Some(CompletionRequest {
            messages: Self::to_messages(history),
            system: Some(Self::system_prompt()),
            max_tokens,
            temperature: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use supportdesk_types::llm::MessageRole;

    #[test]
    fn test_system_prompt_sections() {
        let prompt = SupportPromptBuilder::system_prompt();
        assert!(prompt.contains("<persona>"));
        assert!(prompt.contains("Spur Store"));
        assert!(prompt.contains("- Shipping: We ship worldwide."));
        assert!(prompt.contains("- Returns: You can return items within 30 days"));
        assert!(prompt.contains("- Support Hours: Mon-Fri 9am - 5pm EST."));
        assert!(prompt.contains("Tech Accessories"));
        assert!(prompt.contains("I'll leave a note for a human agent"));
    }

    #[test]
    fn test_role_mapping() {
        let history = vec![
            Turn::user("s", "hi"),
            Turn::agent("s", "hello"),
            Turn::user("s", "returns?"),
        ];
        let messages = SupportPromptBuilder::to_messages(&history);
        let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(messages[2].content, "returns?");
    }

    #[test]
    fn test_build_splits_context_and_new_message() {
        let history = vec![
            Turn::user("s", "hi"),
            Turn::agent("s", "hello"),
            Turn::user("s", "What is your return policy?"),
        ];
        let request = SupportPromptBuilder::build(&history, 150).unwrap();
        assert_eq!(request.max_tokens, 150);
        assert!(request.system.as_deref().unwrap().contains("<knowledge>"));
        assert_eq!(
            request.new_message().unwrap().content,
            "What is your return policy?"
        );
        assert_eq!(request.context().len(), 2);
    }

    #[test]
    fn test_build_drops_leading_agent_turns() {
        let history = vec![
            Turn::agent("s", "earlier answer"),
            Turn::agent("s", "another answer"),
            Turn::user("s", "and returns?"),
            Turn::agent("s", "30 days."),
            Turn::user("s", "thanks"),
        ];
        let request = SupportPromptBuilder::build(&history, 150).unwrap();
        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(request.messages[0].content, "and returns?");
    }

    #[test]
    fn test_build_requires_trailing_user_turn() {
        assert!(SupportPromptBuilder::build(&[], 150).is_none());

        let history = vec![Turn::user("s", "hi"), Turn::agent("s", "hello")];
        assert!(SupportPromptBuilder::build(&history, 150).is_none());
    }
}
