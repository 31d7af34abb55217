pub mod code;
pub mod expiration;

pub use code::{ActivationTokenMatcher, CodeLabel, CodeMatcher, CODE_LABELS};
pub use expiration::{parse_fuzzy_date, ExpirationMatcher};
