use uuid::Uuid;

/// Id generation capability injected into everything that creates nodes.
///
/// Production uses [`UuidIds`]; tests use [`SequentialIds`] so exact ids
/// can be asserted.
pub trait IdSource {
    /// Generate the next id. Ids are opaque, stable, and never reused.
    fn next_id(&mut self) -> String;
}

/// Sequential id generator scoped to one document
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u32,
}

impl SequentialIds {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}

/// Random id generator for production sessions
#[derive(Debug, Clone, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new("doc");

        assert_eq!(ids.next_id(), "doc-1");
        assert_eq!(ids.next_id(), "doc-2");
        assert_eq!(ids.next_id(), "doc-3");
    }

    #[test]
    fn test_uuid_ids_unique() {
        let mut ids = UuidIds;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }
}
