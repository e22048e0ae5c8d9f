use std::fmt::Display;

use wordle_agents::{strategy::best_by_key, AgentError, GameState, Result, Strategy, Word};

use crate::util::{frequency_score, LetterTable};

/// A strategy that guesses the candidate made of the most common letters.
///
/// Each round it counts how often every letter appears across the remaining
/// candidates, then scores each candidate by adding up those counts for its
/// distinct letters. Repeated letters only count once, which favors guesses
/// that test many letters at a time.
///
/// Letter counts for the whole vocabulary are computed once, when the
/// strategy is created.
#[derive(Debug, Clone)]
pub struct Frequency {
    letters: LetterTable,
}

impl Frequency {
    /// Creates a `Frequency` strategy for `vocabulary`.
    ///
    /// Words outside the vocabulary still work, their letters are just
    /// counted when they are needed.
    pub fn new<'a>(vocabulary: impl IntoIterator<Item = &'a Word>) -> Self {
        Frequency {
            letters: LetterTable::new(vocabulary),
        }
    }

    /// Scores every candidate, in the order of `candidates`.
    pub fn scores(&self, candidates: &[Word]) -> Vec<(Word, u32)> {
        let freq = self.letters.frequencies(candidates);
        candidates
            .iter()
            .map(|word| (*word, frequency_score(word, &freq)))
            .collect()
    }
}

impl Strategy for Frequency {
    fn select(&mut self, state: &GameState) -> Result<Word> {
        best_by_key(self.scores(state.candidates()), |&(_, score)| score)
            .map(|(word, _)| word)
            .ok_or_else(|| AgentError::EmptyCandidateSet.into())
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "wordle_strategies::Frequency")
    }
}

#[cfg(test)]
mod test {
    use wordle_agents::{words::parse_word_list, Agent, Feedback};

    use super::*;

    fn word(s: &str) -> Word {
        s.parse().unwrap()
    }

    #[test]
    fn scores_distinct_letters_by_frequency() {
        let words = parse_word_list("sassy\nsissy\nabbey");
        let frequency = Frequency::new(&words);
        let scores = frequency.scores(&words);
        // s: 6, a: 2, y: 3, i: 1, b: 2, e: 1
        assert_eq!(
            scores,
            vec![
                (word("sassy"), 6 + 2 + 3),
                (word("sissy"), 6 + 1 + 3),
                (word("abbey"), 2 + 2 + 1 + 3),
            ]
        );
    }

    #[test]
    fn guesses_the_best_scoring_candidate() -> Result<()> {
        let words = parse_word_list("abbey\nsissy\nsassy");
        let mut agent = Agent::new(words.clone(), Frequency::new(&words))?;
        assert_eq!(agent.guess()?, word("sassy"));
        Ok(())
    }

    #[test]
    fn ties_go_to_the_first_word() -> Result<()> {
        let words = parse_word_list("trace\ncrate\nslate");
        let mut agent = Agent::new(words.clone(), Frequency::new(&words))?;
        assert_eq!(agent.guess()?, word("crate"));

        let target = word("slate");
        let guess = agent.guess()?;
        agent.process_feedback(guess, Feedback::compute(&guess, &target));
        assert_eq!(agent.candidates(), &[target]);
        assert_eq!(agent.guess()?, target);
        Ok(())
    }
}
