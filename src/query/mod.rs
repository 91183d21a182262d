//! Query evaluation: boolean set retrieval and regex matching.

pub mod boolean;
pub mod parser;
pub mod regex;

pub use boolean::{BooleanSearcher, DocumentSetIndex};
pub use parser::{BooleanExpr, BooleanOp, BooleanQueryParser, MAX_QUERY_DEPTH, tokenize_query};
pub use self::regex::{NO_MATCHES_MESSAGE, RegexMatch, RegexMatcher, RegexOutcome, regex_search};
