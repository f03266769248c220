use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Fixed pool of random keys shared by every command of one run.
///
/// Duplicates are kept on purpose: they raise the odds of repeated
/// operations on the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds `word_count` words, each of a length drawn uniformly from
    /// `1..=word_length` and made of lowercase ASCII letters.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, word_count: usize, word_length: usize) -> Self {
        let max_len = word_length.max(1);
        let words = (0..word_count)
            .map(|_| {
                let len = rng.gen_range(1..=max_len);
                (0..len)
                    .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                    .collect::<String>()
            })
            .collect();
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Uniform pick with replacement. Panics on an empty vocabulary, which
    /// configuration validation rules out.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
