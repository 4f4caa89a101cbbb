/// Number of sentences every template set produces.
pub const SENTENCES: usize = 5;

/// Five fixed sentence patterns with one `{}` slot each, plus the word used
/// when fewer than five are supplied.
#[derive(Debug, Clone, Copy)]
pub struct Templates {
    patterns: [&'static str; SENTENCES],
    filler: &'static str,
}

impl Templates {
    /// Sentences about ideas; used by the Latin phrases run.
    pub const fn ethics() -> Self {
        Self {
            patterns: [
                "The principle of '{}' defines our modern ethics.",
                "Without '{}', true justice would not exist.",
                "Throughout history, '{}' has been the key to power.",
                "Ancient philosophy can be summed up in the concept of '{}'.",
                "We should always aspire to '{}' in our lives.",
            ],
            filler: "life",
        }
    }

    /// Neutral sentences about a dataset; used by the interactive table run.
    pub const fn analysis() -> Self {
        Self {
            patterns: [
                "The analysis shows that '{}' is a decisive factor.",
                "In this context, '{}' stands out for its frequency.",
                "The relationship with '{}' is essential to understanding the table.",
                "There is a clear trend towards the concept of '{}'.",
                "It is worth noting how often '{}' repeats in the data.",
            ],
            filler: "data",
        }
    }

    /// Fill each pattern with the word at the same position. Missing words
    /// are replaced by the filler; extra words are ignored.
    ///
    /// ```
    /// use gleaner_tables::Templates;
    ///
    /// let lines = Templates::analysis().fill(&["table".to_string()]);
    /// assert_eq!(lines.len(), 5);
    /// assert!(lines[0].contains("'table'"));
    /// assert!(lines[4].contains("'data'"));
    /// ```
    pub fn fill<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| {
                let word = words.get(i).map(|w| w.as_ref()).unwrap_or(self.filler);
                pattern.replacen("{}", word, 1)
            })
            .collect()
    }
}
