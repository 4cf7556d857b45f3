mod handlers;
mod types;

pub use handlers::{create_outage, list_outages, resolve_outage};
pub use types::{CreateOutageRequest, OutageResponse, OutagesQuery, ResolveOutageRequest};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_create_outage, __path_list_outages, __path_resolve_outage};
