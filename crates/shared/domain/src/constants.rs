//! Identifiers shared between the server, the store and the OpenAPI document.

/// Table holding catalog records.
pub const DESTINATION_TABLE: &str = "destination";

/// OpenAPI tag of the catalog endpoints.
pub const CATALOG_TAG: &str = "Catalog";

/// OpenAPI tag of the health and status endpoints.
pub const SYSTEM_TAG: &str = "System";

/// Inclusive budget range applied when a filter leaves the bounds unset.
pub const DEFAULT_BUDGET_MIN: f64 = 0.0;
pub const DEFAULT_BUDGET_MAX: f64 = 1000.0;
