use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::{bail, Context};
use log::info;
use reqwest::blocking::Client;
use wordle_agents::{words::parse_word_list, Word};

/// Every word the game accepts as a guess.
const VOCABULARY_URL: &str = "https://raw.githubusercontent.com/tabatkins/wordle-list/main/words";

/// The words the game picks its answers from.
const ANSWERS_URL: &str = "https://gist.githubusercontent.com/cfreshman/a03ef2cba789d8cf00c08f767e0fad7b/raw/wordle-answers-alphabetical.txt";

pub const VOCABULARY_FILE: &str = "wordle_full_vocab.txt";
pub const ANSWERS_FILE: &str = "wordle_answers.txt";

/// Fetches both word lists into `dir`, creating it if needed.
pub fn download(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("could not create {}", dir.display()))?;

    let client = Client::new();
    for (url, name) in [(VOCABULARY_URL, VOCABULARY_FILE), (ANSWERS_URL, ANSWERS_FILE)] {
        let body = fetch(&client, url)?;
        let words = parse_word_list(&body);
        if words.is_empty() {
            bail!("{} did not return any five letter words", url);
        }

        let path = dir.join(name);
        write_word_list(&path, &words)?;
        info!("wrote {} words to {}", words.len(), path.display());
    }

    Ok(())
}

fn fetch(client: &Client, url: &str) -> anyhow::Result<String> {
    info!("downloading {}", url);
    client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("could not download {}", url))
}

/// Writes one word per line.
pub fn write_word_list(path: &Path, words: &[Word]) -> anyhow::Result<()> {
    let file = fs::File::create(path).with_context(|| format!("could not create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for word in words {
        writeln!(writer, "{}", word)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use wordle_agents::words::load_word_list;

    use super::*;

    #[test]
    fn written_lists_load_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(ANSWERS_FILE);
        let words = parse_word_list("cigar\nrebut\nsissy\nhumph");

        write_word_list(&path, &words)?;
        assert_eq!(fs::read_to_string(&path)?, "cigar\nrebut\nsissy\nhumph\n");
        assert_eq!(load_word_list(&path)?, words);
        Ok(())
    }
}
