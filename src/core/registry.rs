// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema registry.
//!
//! Bound schemas are cached by target type so each [`JsonClass`] is bound
//! once and then shared read-only by every decode and encode, across
//! threads.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use tracing::debug;

use super::error::{JsonLinkError, Result};
use crate::schema::contract::{JsonClass, Schema};

type ErasedSchema = Arc<dyn Any + Send + Sync>;

/// Thread-safe cache of bound schemas keyed by target type.
///
/// Uses RwLock for concurrent read access with exclusive write access.
pub struct SchemaRegistry {
    schemas: RwLock<HashMap<TypeId, ErasedSchema>>,
}

impl SchemaRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            schemas: RwLock::new(HashMap::new()),
        }
    }

    /// Get the schema of `T`, binding it on first use.
    ///
    /// Binding runs outside the lock. If two threads bind the same type
    /// concurrently, the first insert is kept.
    pub fn schema<T: JsonClass>(&self) -> Result<Arc<Schema<T>>> {
        let cached = self
            .schemas
            .read()
            .map_err(|e| JsonLinkError::Other(format!("Registry lock poisoned: {e}")))?
            .get(&TypeId::of::<T>())
            .cloned();
        if let Some(entry) = cached {
            return downcast::<T>(entry);
        }

        let bound: ErasedSchema = Arc::new(T::json_schema()?);
        let entry = {
            let mut schemas = self
                .schemas
                .write()
                .map_err(|e| JsonLinkError::Other(format!("Registry lock poisoned: {e}")))?;
            Arc::clone(schemas.entry(TypeId::of::<T>()).or_insert(bound))
        };
        debug!(
            class = std::any::type_name::<T>(),
            "registered schema"
        );
        downcast::<T>(entry)
    }

    /// Register a schema for `T`, replacing any cached one.
    pub fn register<T: JsonClass>(&self, schema: Schema<T>) -> Result<()> {
        let mut schemas = self
            .schemas
            .write()
            .map_err(|e| JsonLinkError::Other(format!("Registry lock poisoned: {e}")))?;
        debug!(class = schema.class_name(), "registered schema");
        schemas.insert(TypeId::of::<T>(), Arc::new(schema));
        Ok(())
    }

    /// Check if a schema for `T` is cached.
    pub fn contains<T: 'static>(&self) -> bool {
        self.schemas
            .read()
            .map(|schemas| schemas.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().map(|schemas| schemas.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached schema.
    pub fn clear(&self) -> Result<()> {
        self.schemas
            .write()
            .map_err(|e| JsonLinkError::Other(format!("Registry lock poisoned: {e}")))?
            .clear();
        Ok(())
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn downcast<T: JsonClass>(entry: ErasedSchema) -> Result<Arc<Schema<T>>> {
    entry.downcast::<Schema<T>>().map_err(|_| {
        JsonLinkError::Other(format!(
            "Registry entry for {} holds a different schema type",
            std::any::type_name::<T>()
        ))
    })
}

static GLOBAL_REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();

/// Get the process-wide schema registry.
pub fn global_registry() -> &'static SchemaRegistry {
    GLOBAL_REGISTRY.get_or_init(SchemaRegistry::new)
}
