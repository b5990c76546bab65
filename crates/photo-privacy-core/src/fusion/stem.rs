/// Word normalizer used when comparing labels
pub trait Stemmer {
    fn stem<'a>(&self, word: &'a str) -> &'a str;
}

/// Strips the first matching suffix of `-ing`, `-s`, `-ed`, `-er`
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStemmer;

const SUFFIXES: [&str; 4] = ["ing", "s", "ed", "er"];

impl Stemmer for SuffixStemmer {
    fn stem<'a>(&self, word: &'a str) -> &'a str {
        SUFFIXES
            .iter()
            .find_map(|suffix| word.strip_suffix(suffix))
            .unwrap_or(word)
    }
}

/// Whether two labels name the same concept.
///
/// Labels match when one contains the other (case-insensitive) or when any
/// pair of their stemmed words is equal or nested.
pub fn labels_similar(a: &str, b: &str, stemmer: &dyn Stemmer) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let stems_b: Vec<&str> = b.split_whitespace().map(|w| stemmer.stem(w)).collect();
    a.split_whitespace().map(|w| stemmer.stem(w)).any(|sa| {
        stems_b
            .iter()
            .any(|sb| sa == *sb || sa.contains(sb) || sb.contains(sa))
    })
}
