//! Shared response envelope types for API handlers.
//!
//! Every successful response is `{ "success": true, "data": ... }`; listings
//! add a `pagination` block. Use these instead of ad-hoc `json!` bodies.

use glocal_core::listing::page_count;
use glocal_core::listing::PageRequest;
use serde::Serialize;

/// Standard `{ "success": true, "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Pagination block of a listing response.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(total: i64, page: PageRequest) -> Self {
        Self {
            total,
            page: page.page,
            limit: page.limit,
            pages: page_count(total, page.limit),
        }
    }
}

/// `{ "success": true, "data": [T], "pagination": {...} }` envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T: Serialize> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: PageRequest) -> Self {
        Self {
            success: true,
            data,
            pagination: Pagination::new(total, page),
        }
    }
}
