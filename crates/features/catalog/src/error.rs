use std::borrow::Cow;

#[trek_derive::trek_error]
pub enum CatalogError {
    /// A required field is blank or the budget is not a usable number.
    #[error("Invalid destination{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The backing store rejected or failed the operation.
    #[error("Store failure{}: {message}", format_context(.context))]
    Store { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[cfg(feature = "client")]
    #[error("HTTP transport failure{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("SurrealDB failure{}: {source}", format_context(.context))]
    Surreal { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Database failure{}: {source}", format_context(.context))]
    Database { source: trek_database::DatabaseError, context: Option<Cow<'static, str>> },

    #[cfg(feature = "server")]
    #[error("Server state failure{}: {source}", format_context(.context))]
    State {
        source: trek_kernel::server::state::ApiStateError,
        context: Option<Cow<'static, str>>,
    },

    #[error("Seed file I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed destination JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl CatalogError {
    pub(crate) fn required(field: &'static str) -> Self {
        Self::Validation { message: format!("{field} is required").into(), context: None }
    }

    pub(crate) fn store(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Store { message: message.into(), context: None }
    }
}
