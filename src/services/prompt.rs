use crate::models::ExtractedText;
use crate::services::chat_model::ChatMessage;

const CONTENT_PLACEHOLDER: &str = "{pdf_content}";

const SYSTEM_TEMPLATE: &str = "You are a professional document analyst and summarizer. Your expertise lies in extracting and condensing key information while maintaining accuracy and context.

TASK:
Analyze the provided document and create a concise summary following these guidelines:

1. Structure:
- Begin with the main topic/purpose
- Include key points in order of importance
- Maintain logical flow between ideas

2. Content Requirements:
- Capture essential information and main arguments
- Preserve factual accuracy
- Retain critical details and statistics
- Eliminate redundant or peripheral information

3. Style:
- Use clear, professional language
- Maintain objective tone
- Keep sentences concise but informative
- Ensure readability for business context

4. Length:
- Aim for approximately 15-20% of original length
- Maximum 3-4 paragraphs

CONTENT TO SUMMARIZE:
{pdf_content}

OUTPUT FORMAT:
Provide a cohesive summary in clear paragraphs without section headers or bullet points.";

pub const HUMAN_MESSAGE: &str = "Please provide a clear and concise summary of this document.";

/// The rendered system and human turns sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    pub system: String,
    pub human: String,
}

impl SummaryPrompt {
    pub fn render(text: &ExtractedText) -> Self {
        // Split once so text containing the placeholder is never re-expanded.
        let (head, tail) = SYSTEM_TEMPLATE
            .split_once(CONTENT_PLACEHOLDER)
            .unwrap_or((SYSTEM_TEMPLATE, ""));

        let mut system = String::with_capacity(SYSTEM_TEMPLATE.len() + text.as_str().len());
        system.push_str(head);
        system.push_str(text.as_str());
        system.push_str(tail);

        Self {
            system,
            human: HUMAN_MESSAGE.to_string(),
        }
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.human.clone()),
        ]
    }
}
