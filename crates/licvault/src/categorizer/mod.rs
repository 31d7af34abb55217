pub mod keyword;

pub use keyword::{Keyword, KeywordCategorizer, KeywordRule, KEYWORD_RULES};
