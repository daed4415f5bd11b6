//! Shared request/response types.

pub mod pagination;
pub mod response;

pub use pagination::{FindParams, ListQuery, Pageable, SortParams};
pub use response::{
    BulkMutationResponse, ListResponse, MessageResponse, MutationResponse, SuccessType,
};
