use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::data::decode_entities;

/// One fetched question, exactly as the API returns it: text fields still
/// carry HTML-escaped entities.
#[derive(Clone, Debug, Deserialize)]
pub struct Question {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

/// A decoded, display-ready answer choice for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String,
    pub correct: bool,
}

impl Question {
    /// The prompt with HTML entities decoded for display.
    pub fn decoded_prompt(&self) -> String {
        decode_entities(&self.question)
    }

    /// Combine the correct answer with the incorrect ones, decode each, and
    /// shuffle the lot so the correct answer's slot is unpredictable.
    pub fn build_options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<AnswerOption> {
        let mut options: Vec<AnswerOption> = self
            .incorrect_answers
            .iter()
            .map(|text| AnswerOption {
                text: decode_entities(text),
                correct: false,
            })
            .collect();
        options.push(AnswerOption {
            text: decode_entities(&self.correct_answer),
            correct: true,
        });
        options.shuffle(rng);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_question() -> Question {
        Question {
            question: "Who wrote &quot;Dune&quot;?".to_string(),
            correct_answer: "Frank Herbert".to_string(),
            incorrect_answers: vec![
                "Isaac Asimov".to_string(),
                "Arthur C. Clarke".to_string(),
                "Ursula K. Le Guin".to_string(),
            ],
        }
    }

    #[test]
    fn test_options_are_exactly_correct_plus_incorrect() {
        let question = sample_question();
        let options = question.build_options(&mut rand::rng());

        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| o.correct).count(), 1);

        let mut texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        texts.sort_unstable();
        let mut expected = vec![
            "Frank Herbert",
            "Isaac Asimov",
            "Arthur C. Clarke",
            "Ursula K. Le Guin",
        ];
        expected.sort_unstable();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_options_are_decoded() {
        let question = Question {
            question: "q".to_string(),
            correct_answer: "Rock &amp; Roll".to_string(),
            incorrect_answers: vec!["Caf&eacute;".to_string()],
        };
        let options = question.build_options(&mut rand::rng());
        assert!(options.iter().any(|o| o.text == "Rock & Roll"));
        assert!(options.iter().any(|o| o.text == "Café"));
        assert_eq!(question.decoded_prompt(), "q");
    }

    #[test]
    fn test_shuffle_is_approximately_uniform() {
        // With 4 options the correct answer should land in each slot about a
        // quarter of the time. The bounds are ~7 standard deviations wide, so
        // a sound shuffle practically never trips them.
        const TRIALS: usize = 2000;
        let question = sample_question();
        let mut rng = rand::rng();
        let mut slot_counts = [0usize; 4];

        for _ in 0..TRIALS {
            let options = question.build_options(&mut rng);
            let slot = options.iter().position(|o| o.correct).unwrap();
            slot_counts[slot] += 1;
        }

        for count in slot_counts {
            assert!(
                (350..=650).contains(&count),
                "skewed slot counts: {slot_counts:?}"
            );
        }
    }
}
