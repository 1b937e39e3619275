//! Shared building blocks for the blog services: response envelope, logging setup,
//! small wire types and the admin listener.

pub mod types;
pub mod utils;
pub mod response;
pub mod admin_http;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn page_serializes_items_and_totals() {
        let p = types::Page { items: vec![1, 2], total: 7, page: 2, limit: 2 };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v, serde_json::json!({"items": [1, 2], "total": 7, "page": 2, "limit": 2}));
    }
}
