use super::GenerateError;
use crate::models::{GeneratedQuestion, GeneratedQuiz};

/// Parses the model's reply into a [`GeneratedQuiz`].
///
/// A reply that is already valid JSON is taken as is. Otherwise Markdown
/// fences and prose around the JSON are ignored. A bare array of questions
/// is accepted as well as the `{"questions": [...]}` object.
pub fn parse_quiz_output(content: &str) -> Result<GeneratedQuiz, GenerateError> {
    let content = content.trim();
    if let Ok(quiz) = parse_json(content) {
        return Ok(quiz);
    }

    let body = strip_code_fence(content).unwrap_or(content);
    let mut candidates: Vec<&str> = [enclosed(body, '{', '}'), enclosed(body, '[', ']')]
        .into_iter()
        .flatten()
        .collect();
    // Earliest first; prose like "[5] questions: {...}" falls through to the object.
    candidates.sort_by_key(|json| json.as_ptr() as usize);

    let mut first_error = None;
    for json in candidates {
        match parse_json(json) {
            Ok(quiz) => return Ok(quiz),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    Err(first_error.map_or(GenerateError::EmptyOutput, GenerateError::MalformedOutput))
}

fn parse_json(json: &str) -> Result<GeneratedQuiz, serde_json::Error> {
    if json.starts_with('[') {
        let questions: Vec<GeneratedQuestion> = serde_json::from_str(json)?;
        return Ok(GeneratedQuiz { questions });
    }
    serde_json::from_str(json)
}

/// The span from the first `open` to the last `close`.
fn enclosed(body: &str, open: char, close: char) -> Option<&str> {
    let start = body.find(open)?;
    let end = body.rfind(close)?;
    (end > start).then(|| &body[start..=end])
}

fn strip_code_fence(content: &str) -> Option<&str> {
    let start = content.find("```")?;
    let mut inner = &content[start + 3..];

    // Skip a language tag such as ```json
    if let Some(newline) = inner.find('\n') {
        if inner[..newline].trim().chars().all(|c| c.is_ascii_alphanumeric()) {
            inner = &inner[newline + 1..];
        }
    }

    let end = inner.rfind("```")?;
    Some(inner[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{"questions":[{"question":"Q1?","options":["a","b","c","d","e"],"correctAnswer":"c","explanation":"c is right"}]}"#;

    #[test]
    fn test_plain_object() {
        let quiz = parse_quiz_output(PLAIN).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].correct_answer, "c");
    }

    #[test]
    fn test_fenced_with_prose() {
        let reply = format!("Here is your quiz:\n```json\n{}\n```\nGood luck!", PLAIN);
        let quiz = parse_quiz_output(&reply).unwrap();
        assert_eq!(quiz.questions[0].question, "Q1?");
    }

    #[test]
    fn test_untagged_fence() {
        let reply = format!("```\n{}\n```", PLAIN);
        assert!(parse_quiz_output(&reply).is_ok());
    }

    #[test]
    fn test_bare_array() {
        let reply = r#"[{"question":"Q?","options":["x"],"correctAnswer":"x","explanation":""}]"#;
        let quiz = parse_quiz_output(reply).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].options, vec!["x".to_string()]);
    }

    #[test]
    fn test_null_and_prose_are_empty_output() {
        assert!(matches!(
            parse_quiz_output("null"),
            Err(GenerateError::EmptyOutput)
        ));
        assert!(matches!(
            parse_quiz_output("I cannot help with that."),
            Err(GenerateError::EmptyOutput)
        ));
    }

    #[test]
    fn test_broken_json_is_malformed() {
        assert!(matches!(
            parse_quiz_output(r#"{"questions": [ {"question": } ]}"#),
            Err(GenerateError::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_missing_questions_key_gives_empty_quiz() {
        let quiz = parse_quiz_output("{}").unwrap();
        assert!(quiz.questions.is_empty());
    }

    #[test]
    fn test_backticks_inside_strings() {
        let reply = r#"{"questions":[{"question":"What does ```let x = 1;``` bind?","options":["a","b","c","d","e"],"correctAnswer":"a","explanation":"x"}]}"#;
        let quiz = parse_quiz_output(reply).unwrap();
        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.questions[0].question, "What does ```let x = 1;``` bind?");
    }

    #[test]
    fn test_fenced_reply_with_backticks_inside() {
        let inner = r#"{"questions":[{"question":"Which `fn` is called?","options":["a"],"correctAnswer":"a","explanation":"Run ```main```."}]}"#;
        let reply = format!("```json\n{}\n```", inner);
        let quiz = parse_quiz_output(&reply).unwrap();
        assert_eq!(quiz.questions[0].explanation, "Run ```main```.");
    }

    #[test]
    fn test_prose_brackets_before_object() {
        let reply = format!("Here are [5] questions: {}", PLAIN);
        let quiz = parse_quiz_output(&reply).unwrap();
        assert_eq!(quiz.questions.len(), 1);
    }
}
