use tracing::warn;

use crate::models::{GeneratedQuestion, GeneratedQuiz, OPTION_COUNT, OPTION_PLACEHOLDER, Question};

/// Shapes a raw AI reply into the questions the quiz runs on.
///
/// At most `requested` questions are kept. Each keeps its first
/// [`OPTION_COUNT`] options; short option lists are padded with
/// [`OPTION_PLACEHOLDER`].
pub fn normalize_questions(output: GeneratedQuiz, requested: usize) -> Vec<Question> {
    output
        .questions
        .into_iter()
        .take(requested)
        .enumerate()
        .map(|(index, raw)| normalize_question(index, raw))
        .collect()
}

fn normalize_question(index: usize, raw: GeneratedQuestion) -> Question {
    let GeneratedQuestion {
        question,
        options,
        correct_answer,
        explanation,
    } = raw;

    let options: [String; OPTION_COUNT] = std::array::from_fn(|i| {
        options
            .get(i)
            .cloned()
            .unwrap_or_else(|| OPTION_PLACEHOLDER.to_string())
    });

    let question = Question {
        text: question,
        options,
        correct_answer,
        explanation,
        user_answer: None,
        is_correct: None,
    };

    if question.correct_index().is_none() {
        warn!(
            question = index + 1,
            "correct answer is not among the options and cannot be selected"
        );
    }

    question
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(options: &[&str], correct: &str) -> GeneratedQuestion {
        GeneratedQuestion {
            question: "What is it?".to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
            explanation: "Because.".to_string(),
        }
    }

    #[test]
    fn test_extra_questions_are_dropped() {
        let output = GeneratedQuiz {
            questions: vec![raw(&["a", "b", "c", "d", "e"], "a"); 8],
        };
        assert_eq!(normalize_questions(output, 5).len(), 5);
    }

    #[test]
    fn test_fewer_questions_are_kept() {
        let output = GeneratedQuiz {
            questions: vec![raw(&["a", "b", "c", "d", "e"], "a"); 3],
        };
        assert_eq!(normalize_questions(output, 10).len(), 3);
    }

    #[test]
    fn test_options_are_truncated() {
        let output = GeneratedQuiz {
            questions: vec![raw(&["a", "b", "c", "d", "e", "f", "g"], "b")],
        };
        let questions = normalize_questions(output, 5);
        assert_eq!(questions[0].options, ["a", "b", "c", "d", "e"].map(String::from));
    }

    #[test]
    fn test_short_options_are_padded() {
        let output = GeneratedQuiz {
            questions: vec![raw(&["yes", "no"], "yes")],
        };
        let question = &normalize_questions(output, 5)[0];
        assert_eq!(question.options[0], "yes");
        assert_eq!(question.options[1], "no");
        assert!(question.options[2..].iter().all(|o| o == OPTION_PLACEHOLDER));
        assert_eq!(question.user_answer, None);
        assert_eq!(question.is_correct, None);
    }

    #[test]
    fn test_truncation_can_drop_correct_answer() {
        let output = GeneratedQuiz {
            questions: vec![raw(&["a", "b", "c", "d", "e", "f"], "f")],
        };
        let question = &normalize_questions(output, 5)[0];
        assert_eq!(question.correct_index(), None);
        assert_eq!(question.correct_answer, "f");
    }
}
