#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace.
//!
//! * [`trek_error`]: context-aware error enums on top of `thiserror`.
//! * [`api_model`] / [`api_handler`]: DTO and handler glue for `serde` + `utoipa`.
//! * [`trek_slice`]: `Arc` wrapped feature state registered in the server kernel.
//! * [`main`]: async entry point running on a `trek-runtime` profile.
//!
//! The examples are `ignore`d because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Turns an `async fn main` into a synchronous `main` driven by a `trek-runtime` profile.
///
/// Accepted profiles: `high_performance`, `memory_efficient`, `default` (or nothing).
/// The function must return a `Result`.
///
/// ```rust,ignore
/// #[trek_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a data transfer object.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when they are not derived already,
/// `utoipa::ToSchema` behind the `server` feature of the consuming crate, and a serde
/// policy of `rename_all = "camelCase"` plus `deny_unknown_fields`.
///
/// Both policies can be overridden:
///
/// ```rust,ignore
/// #[api_model(rename_all = "snake_case", deny_unknown_fields = false)]
/// pub struct Listing {
///     pub id: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Registers an Axum handler with `utoipa::path` when the `server` feature is on.
///
/// The arguments are forwarded untouched to `utoipa::path`.
///
/// ```rust,ignore
/// #[api_handler(get, path = "/health", responses((status = OK, body = HealthResponse)))]
/// pub async fn health_handler() -> impl IntoResponse { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Builds a domain error enum.
///
/// Every variant must use named fields. Variants that wrap another error through a
/// `source` field (or a field marked `#[source]`) must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// Generated items:
/// * `#[derive(Debug, thiserror::Error)]` unless already present.
/// * A `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to results of
///   every wrapped source error.
/// * `From<Source>` for each source-wrapping variant.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for the `#[error(..)]` strings.
///
/// ```rust,ignore
/// #[trek_error]
/// pub enum StoreError {
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn trek_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Wraps a struct into a cheaply cloneable feature slice.
///
/// `struct Catalog { .. }` becomes `CatalogInner { .. }` plus an `Arc` backed `Catalog`
/// handle that derefs to the inner state and implements
/// `trek_kernel::domain::registry::FeatureSlice`.
#[proc_macro_attribute]
pub fn trek_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
