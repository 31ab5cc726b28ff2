//! Question supply: the Open Trivia DB client and entity decoding for the
//! text it returns.

mod entities;
mod fetcher;

pub use entities::decode_entities;
pub use fetcher::{DEFAULT_API_URL, FetchError, TriviaClient};
