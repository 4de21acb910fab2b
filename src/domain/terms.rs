//! Text tokenization shared by the TF-IDF vectorizer and the term-frequency aggregation.
//!
//! A token is a run of word characters (Unicode alphanumeric or `_`) of length >= 2,
//! lowercased. Same rule as the usual `\b\w\w+\b` token pattern.

/// Common English function words dropped from term-frequency lists.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "don", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its", "itself",
    "just", "ll", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of", "off",
    "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "re",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "ve", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `text` into lowercase tokens of at least two characters.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !is_word_char(c))
        .filter(|tok| tok.chars().nth(1).is_some())
        .map(str::to_lowercase)
}

/// True for tokens that carry no topical signal (stop words and bare numbers).
pub fn is_noise(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok() || token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_strips_punctuation() {
        let tokens: Vec<String> = tokenize("Great video!!! Loved it, 10/10 :)").collect();
        assert_eq!(tokens, vec!["great", "video", "loved", "it", "10", "10"]);
    }

    #[test]
    fn tokenize_drops_single_characters() {
        let tokens: Vec<String> = tokenize("a b c ok").collect();
        assert_eq!(tokens, vec!["ok"]);
    }

    #[test]
    fn tokenize_keeps_non_latin_words() {
        let tokens: Vec<String> = tokenize("정말 좋아요! 최고").collect();
        assert_eq!(tokens, vec!["정말", "좋아요", "최고"]);
    }

    #[test]
    fn stop_words_are_sorted_for_binary_search() {
        assert!(STOP_WORDS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn noise_covers_stop_words_and_numbers() {
        assert!(is_noise("the"));
        assert!(is_noise("2024"));
        assert!(!is_noise("amazing"));
        assert!(!is_noise("4k"));
    }
}
