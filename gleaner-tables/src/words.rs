use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// How many words the summaries report.
pub const TOP_WORDS: usize = 5;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{4,}\b").expect("static word regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// The `n` most frequent words of four or more ASCII letters across `texts`,
/// case-folded. Equal counts keep first-seen order.
///
/// ```
/// use gleaner_tables::top_words;
///
/// let top = top_words(["Veni vidi vici", "Vidi AQUA vidi"], 5);
/// assert_eq!(top[0].word, "vidi");
/// assert_eq!(top[0].count, 3);
/// assert_eq!(top[1].word, "veni");
/// ```
pub fn top_words<'a, I>(texts: I, n: usize) -> Vec<WordCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = texts
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let mut order: Vec<WordCount> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for m in WORD.find_iter(&joined) {
        match slot.get(m.as_str()) {
            Some(&i) => order[i].count += 1,
            None => {
                slot.insert(m.as_str(), order.len());
                order.push(WordCount {
                    word: m.as_str().to_string(),
                    count: 1,
                });
            }
        }
    }

    // stable sort keeps insertion order among equal counts
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order.truncate(n);
    order
}

/// Just the words, most frequent first.
pub fn words_only(counts: &[WordCount]) -> Vec<String> {
    counts.iter().map(|c| c.word.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_short_and_non_ascii_tokens() {
        let top = top_words(["in et ad", "café niño 2024 rex", "amor, AMOR! amor."], TOP_WORDS);
        assert_eq!(
            top,
            vec![WordCount {
                word: "amor".into(),
                count: 3
            }]
        );
    }

    #[test]
    fn word_boundaries_are_respected() {
        // "data_set" is one \w run, so no boundary splits it
        let top = top_words(["data_set datum-data"], TOP_WORDS);
        let words = words_only(&top);
        assert_eq!(words, vec!["datum", "data"]);
    }

    #[test]
    fn results_are_capped_lowercase_and_non_increasing() {
        let text = "Alpha beta gamma delta Epsilon zeta theta iota kappa lambda \
                    alpha GAMMA gamma delta delta delta kappa";
        let top = top_words([text], TOP_WORDS);
        assert!(top.len() <= TOP_WORDS);
        for w in &top {
            assert!(w.word.len() >= 4);
            assert_eq!(w.word, w.word.to_lowercase());
        }
        for pair in top.windows(2) {
            assert!(pair[0].count >= pair[1].count);
        }
        assert_eq!(words_only(&top), vec!["delta", "gamma", "alpha", "kappa", "beta"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(top_words(std::iter::empty::<&str>(), TOP_WORDS).is_empty());
    }
}
