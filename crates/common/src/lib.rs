//! Pieces shared by the workspace crates: tracing setup and small response types.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn health_serializes_status_only() {
        let h = types::Health::ok();
        let json = serde_json::to_value(&h).expect("serialize health");
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
