pub mod analyzer;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod headline;
pub mod lexical;
pub mod oracle;
pub mod score;

pub use analyzer::{AnalysisResult, Analyzer, AnalyzerConfig, AnalyzerConfigBuilder};
pub use document::{BodyBlock, ImageNode, InlineNode, Post, RichBody, Taxonomy};
pub use error::{Result, SeoscopeError};
pub use extract::{Extraction, extract, extract_markup};
pub use fetch::{FetchConfig, fetch_post, post_from_payload};
pub use headline::{HeadlineWordCounts, score_headline};
pub use lexical::{
    DENSITY_TERM_LIMIT, LexicalStats, ReadTime, TOP_TERM_LIMIT, TermCount, WORDS_PER_MINUTE,
    count_words, extract_terms, keyword_density, read_time, term_frequency,
};
pub use oracle::{OpenAiOracle, Oracle, OracleConfig, parse_word_counts};
pub use score::{ScoreBreakdown, ScoreInputs, score_content};
