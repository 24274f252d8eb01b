use uuid::Uuid;

/// Allocate a new entity id with a readable prefix, e.g. `rec_3f2a...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let a = new_id("rec");
        let b = new_id("rec");
        assert!(a.starts_with("rec_"));
        assert_ne!(a, b);
    }
}
