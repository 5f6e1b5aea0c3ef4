// Topic extraction: a TF-IDF vectorizer and the keyword extractor built on it.

pub mod keywords;
pub mod vectorizer;

pub use keywords::KeywordExtractor;
pub use vectorizer::{TfidfMatrix, TfidfVectorizer, VectorizerConfig};
