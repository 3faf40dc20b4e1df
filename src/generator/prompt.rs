use serde_json::{Value, json};

use super::GenerationRequest;
use crate::models::OPTION_COUNT;

/// JSON schema the reply has to conform to.
pub fn output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "questions": {
                "type": "array",
                "description": "An array of multiple-choice questions, their options, correct answers, and explanations.",
                "items": {
                    "type": "object",
                    "properties": {
                        "question": {
                            "type": "string",
                            "description": "The multiple-choice question."
                        },
                        "options": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": OPTION_COUNT,
                            "maxItems": OPTION_COUNT,
                            "description": format!("The {} possible answer options.", OPTION_COUNT)
                        },
                        "correctAnswer": {
                            "type": "string",
                            "description": "The correct answer to the question."
                        },
                        "explanation": {
                            "type": "string",
                            "description": "The explanation of why the answer is correct."
                        }
                    },
                    "required": ["question", "options", "correctAnswer", "explanation"]
                }
            }
        },
        "required": ["questions"]
    })
}

pub fn system_prompt() -> String {
    format!(
        "You reply with a single JSON object and nothing else. The object must conform to this JSON schema:\n{}",
        output_schema()
    )
}

/// Fills the quiz prompt template for `request`.
pub fn render_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"You are an expert quiz generator. Your task is to create high-quality multiple-choice questions based on the provided document. Do not make questions about the document, focus on the document content.

You will generate exactly {count} multiple-choice questions.
Each question must have exactly {options} answer options.
For each question, provide:
1. The question itself.
2. The {options} answer options.
3. The correct answer from the {options} options.
4. A detailed explanation of why that answer is correct, referencing information from the document if possible.

The questions should be extensive and elaborate, designed to test a deeper understanding of the material rather than simple factual recall. Each question should encourage critical thinking.
The {options} options provided for each question should be plausible and distinct, with one clearly correct answer based on the provided document content.

Document content:
{document}

Ensure that your entire output is a single, valid JSON object that strictly conforms to the provided output schema. Do not include any text outside of this JSON object."#,
        count = request.number_of_questions,
        options = OPTION_COUNT,
        document = request.document_content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_count_and_document() {
        let request = GenerationRequest::new("Mitochondria produce ATP.", 15);
        let prompt = render_prompt(&request);
        assert!(prompt.contains("exactly 15 multiple-choice questions"));
        assert!(prompt.contains("exactly 5 answer options"));
        assert!(prompt.contains("Document content:\nMitochondria produce ATP."));
    }

    #[test]
    fn test_schema_pins_option_count() {
        let schema = output_schema();
        let options = &schema["properties"]["questions"]["items"]["properties"]["options"];
        assert_eq!(options["minItems"], 5);
        assert_eq!(options["maxItems"], 5);
        assert!(system_prompt().contains("correctAnswer"));
    }
}
