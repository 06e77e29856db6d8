//! Crate error type
//!
//! Nothing in the per-tick path of the main scene surfaces these to the host:
//! contact errors are logged and dropped there. The tutorial treats them as
//! fatal, and the config loaders propagate them.

use thiserror::Error;

use crate::sim::collision::Category;

#[derive(Debug, Error)]
pub enum GameError {
    /// A contact pair with no handler in the dispatch table
    #[error("unexpected contact between {low:?} and {high:?}")]
    UnexpectedContact { low: Category, high: Category },

    /// A throwable body arrived without its entity handle
    #[error("{category:?} body has no entity handle")]
    MissingEntity { category: Category },

    /// A tuning value outside its usable range
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning {
        field: &'static str,
        reason: &'static str,
    },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
