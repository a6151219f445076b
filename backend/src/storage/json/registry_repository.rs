use log::{debug, info, warn};
use std::fs;

use crate::domain::registry::ChildRegistry;
use crate::storage::{RegistryStorage, StorageError};

use super::connection::JsonConnection;
use super::document::{self, DocumentFormat};

/// Registry persisted as one JSON document
#[derive(Debug, Clone)]
pub struct JsonRegistryRepository {
    connection: JsonConnection,
    format: DocumentFormat,
}

impl JsonRegistryRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self::with_format(connection, DocumentFormat::default())
    }

    pub fn with_format(connection: JsonConnection, format: DocumentFormat) -> Self {
        Self { connection, format }
    }

    pub fn connection(&self) -> &JsonConnection {
        &self.connection
    }

    /// Copy an undecodable document next to the original before it can be
    /// overwritten by a save
    fn preserve_unreadable(&self, bytes: &[u8]) {
        let copy_path = self.connection.unreadable_copy_path();
        match fs::write(&copy_path, bytes) {
            Ok(()) => warn!("Kept a copy of the unreadable registry at {:?}", copy_path),
            Err(e) => warn!(
                "Could not keep a copy of the unreadable registry at {:?}: {}",
                copy_path, e
            ),
        }
    }
}

impl RegistryStorage for JsonRegistryRepository {
    fn load(&self) -> Result<ChildRegistry, StorageError> {
        let path = self.connection.registry_file_path();
        if !path.exists() {
            info!("No registry at {:?}, starting empty", path);
            return Ok(ChildRegistry::new());
        }

        let bytes = fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;
        debug!("Read {} bytes from {:?}", bytes.len(), path);

        match document::decode(&bytes) {
            Ok(registry) => {
                info!("Loaded {} children from {:?}", registry.len(), path);
                Ok(registry)
            }
            Err(e) => {
                self.preserve_unreadable(&bytes);
                Err(e)
            }
        }
    }

    fn save(&self, registry: &ChildRegistry) -> Result<(), StorageError> {
        let bytes = document::encode(registry, self.format)?;
        self.connection.ensure_base_directory()?;

        let path = self.connection.registry_file_path();
        let temp_path = self.connection.temp_file_path();

        // Write to a temp file, then rename over the document
        fs::write(&temp_path, &bytes).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;
        fs::rename(&temp_path, &path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Saved {} children ({} bytes) to {:?}", registry.len(), bytes.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registry::RegistryError;
    use crate::storage::test_utils::TestEnvironment;
    use chrono::Utc;
    use shared::{Avatar, Child, CreateChildRequest, ThemeColor, Transaction, TransactionType};

    #[test]
    fn test_load_missing_file_is_empty() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();

        assert!(repository.load().unwrap().is_empty());
        assert!(!repository.connection().registry_file_path().exists());
    }

    #[test]
    fn test_round_trip_empty_registry() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();

        repository.save(&ChildRegistry::new()).unwrap();
        assert!(repository.connection().registry_file_path().exists());
        assert_eq!(repository.load().unwrap(), ChildRegistry::new());
    }

    #[test]
    fn test_round_trip_children_transactions_and_avatar() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();

        let mut registry = ChildRegistry::new();
        let no_history = registry
            .create_child(CreateChildRequest::default())
            .unwrap()
            .id;
        let with_photo = Child::new(
            "Shira",
            ThemeColor::PastelPurple,
            Avatar::Girl,
            Some(vec![0x89, 0x50, 0x4e, 0x47]),
        );
        let shira = with_photo.id;
        registry.add(with_photo).unwrap();
        registry
            .prepend_transaction(
                shira,
                Transaction::new(10.0, "Allowance", Utc::now(), TransactionType::Income),
            )
            .unwrap();
        registry
            .prepend_transaction(
                shira,
                Transaction::new(4.25, "Comics", Utc::now(), TransactionType::Outcome),
            )
            .unwrap();

        repository.save(&registry).unwrap();
        let loaded = repository.load().unwrap();

        assert_eq!(loaded, registry);
        assert!(loaded.get(no_history).unwrap().transactions.is_empty());
        assert_eq!(loaded.get(shira).unwrap().avatar_data, Some(vec![0x89, 0x50, 0x4e, 0x47]));
    }

    #[test]
    fn test_save_overwrites_previous_document() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();

        let mut registry = ChildRegistry::new();
        registry.create_child(CreateChildRequest::default()).unwrap();
        registry.create_child(CreateChildRequest::default()).unwrap();
        repository.save(&registry).unwrap();

        registry.remove_at_offsets(&[0]);
        repository.save(&registry).unwrap();

        assert_eq!(repository.load().unwrap().len(), 1);
        assert!(!repository.connection().temp_file_path().exists());
    }

    #[test]
    fn test_legacy_format_writes_bare_array() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository_with_format(DocumentFormat::Legacy);

        let mut registry = ChildRegistry::new();
        registry.create_child(CreateChildRequest::default()).unwrap();
        repository.save(&registry).unwrap();

        let raw = fs::read_to_string(repository.connection().registry_file_path()).unwrap();
        assert!(raw.trim_start().starts_with('['));
        assert_eq!(repository.load().unwrap(), registry);
    }

    #[test]
    fn test_unreadable_document_is_preserved() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();
        let path = repository.connection().registry_file_path();
        fs::write(&path, b"{ definitely not json").unwrap();

        assert!(matches!(repository.load(), Err(StorageError::Decode(_))));

        let copy = fs::read(repository.connection().unreadable_copy_path()).unwrap();
        assert_eq!(copy, b"{ definitely not json");
    }

    #[test]
    fn test_negative_amount_fails_load() {
        let env = TestEnvironment::new().unwrap();
        let repository = env.repository();
        let mut child = Child::new("Noa", ThemeColor::PastelMint, Avatar::Girl, None);
        child.transactions = vec![Transaction::new(
            -7.0,
            "Candy",
            Utc::now(),
            TransactionType::Outcome,
        )];
        let raw = serde_json::to_vec(&vec![child]).unwrap();
        fs::write(repository.connection().registry_file_path(), &raw).unwrap();

        assert!(matches!(
            repository.load(),
            Err(StorageError::InvalidRegistry(RegistryError::InvalidAmount { .. }))
        ));
        assert_eq!(fs::read(repository.connection().unreadable_copy_path()).unwrap(), raw);
    }

    #[test]
    fn test_save_creates_missing_data_directory() {
        let env = TestEnvironment::new().unwrap();
        let connection = JsonConnection::in_directory(env.base_path.join("nested"));
        let repository = JsonRegistryRepository::new(connection);

        repository.save(&ChildRegistry::new()).unwrap();
        assert!(env.base_path.join("nested").join("children.json").exists());
    }
}
