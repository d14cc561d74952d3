//! Mount bookkeeping for target and source instances
//!
//! Separate from content routing: records which component instance is
//! currently mounted under a target or source name.

use std::collections::HashMap;

/// Name to instance-ID table with duplicate detection
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    instances: HashMap<String, u64>,
}

impl MountTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount `instance_id` under `name`
    ///
    /// Without `force`, an existing mount is left untouched and its ID is
    /// returned as the error. With `force`, the mount is replaced and the
    /// previous ID is returned.
    pub fn mount(&mut self, name: &str, instance_id: u64, force: bool) -> Result<Option<u64>, u64> {
        match self.instances.get(name) {
            Some(&existing) if !force => Err(existing),
            _ => Ok(self.instances.insert(name.to_string(), instance_id)),
        }
    }

    /// Remove the mount for `name`, returning its instance ID
    pub fn unmount(&mut self, name: &str) -> Option<u64> {
        self.instances.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.instances.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_unmount() {
        let mut table = MountTable::new();

        assert_eq!(table.mount("modal", 1, false), Ok(None));
        assert!(table.contains("modal"));
        assert_eq!(table.get("modal"), Some(1));

        assert_eq!(table.unmount("modal"), Some(1));
        assert!(table.is_empty());
        assert_eq!(table.unmount("modal"), None);
    }

    #[test]
    fn test_duplicate_mount_rejected() {
        let mut table = MountTable::new();
        table.mount("modal", 1, false).unwrap();

        assert_eq!(table.mount("modal", 2, false), Err(1));
        assert_eq!(table.get("modal"), Some(1));
    }

    #[test]
    fn test_forced_mount_replaces() {
        let mut table = MountTable::new();
        table.mount("modal", 1, false).unwrap();

        assert_eq!(table.mount("modal", 2, true), Ok(Some(1)));
        assert_eq!(table.get("modal"), Some(2));
        assert_eq!(table.len(), 1);
    }
}
