//! User profiles stored in the registry
//!
//! Profiles are transformed with the write directory before they are sent and
//! with the read directory after they come back. The profile's `userType`
//! names the schema section used on both sides.

use super::transport::RegistryTransport;
use crate::directory::{EnumDirectory, FieldDirectory};
use crate::engine::Transformer;
use crate::error::{Error, Result};
use crate::types::{Direction, Record};
use serde_json::Value;
use std::sync::Arc;

/// Attribute and setting names used by the user registry
pub mod keys {
    pub const USER_TYPE: &str = "userType";
    pub const MAIN_PROVIDER: &str = "sunbird.mainProvider";
    pub const EXTERNAL_IDS: &str = "externalIds";
    pub const PROVIDER: &str = "provider";
    pub const ID: &str = "id";
    pub const USER_ID: &str = "userId";
    pub const ENTITY: &str = "entity";
    pub const REGISTRY_ID: &str = "registryId";
    pub const ACCESS_TOKEN: &str = "accessToken";
}

/// Create, read, update and delete user profiles in the registry
pub struct UserRegistry<T> {
    transport: T,
    write_fields: Arc<FieldDirectory>,
    read_fields: Arc<FieldDirectory>,
    enums: Arc<EnumDirectory>,
}

impl<T: RegistryTransport> UserRegistry<T> {
    pub fn new(
        transport: T,
        write_fields: Arc<FieldDirectory>,
        read_fields: Arc<FieldDirectory>,
        enums: Arc<EnumDirectory>,
    ) -> Self {
        Self {
            transport,
            write_fields,
            read_fields,
            enums,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Add a profile to the registry and return the new registry id
    pub async fn create(&self, profile: &Record, access_token: &str) -> Result<String> {
        let access_token = require(keys::ACCESS_TOKEN, Some(access_token))?;
        let user = self.user_for_write(profile)?;
        tracing::info!(user_type = user_type(profile)?, "Adding user to registry");

        let result = self
            .transport
            .add_entity(&Value::Object(user), access_token)
            .await
            .and_then(|response| response.into_result("add"))?;

        let registry_id = result
            .get(keys::ENTITY)
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::Registry {
                operation: "add".to_string(),
                message: "response carries no entity id".to_string(),
            })?;

        tracing::info!(registry_id, "User added to registry");
        Ok(registry_id.to_string())
    }

    /// Read a profile of `user_type` back from the registry
    pub async fn read(&self, registry_id: &str, user_type: &str, access_token: &str) -> Result<Record> {
        let access_token = require(keys::ACCESS_TOKEN, Some(access_token))?;
        let registry_id = require(keys::REGISTRY_ID, Some(registry_id))?;
        let user_type = require(keys::USER_TYPE, Some(user_type))?;
        tracing::info!(registry_id, user_type, "Reading user from registry");

        let mut result = self
            .transport
            .read_entity(registry_id, access_token)
            .await
            .and_then(|response| response.into_result("read"))?;

        let mut user = match result.get_mut(user_type).map(Value::take) {
            Some(Value::Object(user)) => user,
            _ => {
                return Err(Error::Registry {
                    operation: "read".to_string(),
                    message: format!("response carries no '{}' entity", user_type),
                })
            }
        };
        user.remove(keys::ID);

        Transformer::new(&self.read_fields, &self.enums).transform(&user, user_type, Direction::Read)
    }

    /// Replace the registry entity `registry_id` with `profile`
    pub async fn update(&self, profile: &Record, registry_id: &str, access_token: &str) -> Result<()> {
        let access_token = require(keys::ACCESS_TOKEN, Some(access_token))?;
        let registry_id = require(keys::REGISTRY_ID, Some(registry_id))?;
        let mut user = self.user_for_write(profile)?;
        user.insert(keys::ID.to_string(), Value::String(registry_id.to_string()));
        tracing::info!(registry_id, "Updating user in registry");

        self.transport
            .update_entity(&Value::Object(user), access_token)
            .await
            .and_then(|response| response.into_result("update"))?;
        Ok(())
    }

    /// Delete the registry entity `registry_id`
    pub async fn delete(&self, registry_id: &str, access_token: &str) -> Result<()> {
        let access_token = require(keys::ACCESS_TOKEN, Some(access_token))?;
        let registry_id = require(keys::REGISTRY_ID, Some(registry_id))?;
        tracing::info!(registry_id, "Deleting user from registry");

        self.transport
            .delete_entity(registry_id, access_token)
            .await
            .and_then(|response| response.into_result("delete"))?;
        Ok(())
    }

    fn user_for_write(&self, profile: &Record) -> Result<Record> {
        let user_type = user_type(profile)?;
        let mut user =
            Transformer::new(&self.write_fields, &self.enums).transform(profile, user_type, Direction::Write)?;
        self.set_main_provider_id(&mut user)?;
        Ok(user)
    }

    /// Copy the id issued by the main provider into `userId`; the last matching entry wins
    fn set_main_provider_id(&self, user: &mut Record) -> Result<()> {
        let main_provider = require(
            keys::MAIN_PROVIDER,
            self.write_fields.setting(keys::MAIN_PROVIDER).and_then(Value::as_str),
        )?;

        let user_id = user
            .get(keys::EXTERNAL_IDS)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
            .filter(|external_id| {
                external_id
                    .get(keys::PROVIDER)
                    .and_then(Value::as_str)
                    .is_some_and(|provider| provider.eq_ignore_ascii_case(main_provider))
            })
            .last()
            .and_then(|external_id| external_id.get(keys::ID))
            .cloned();

        if let Some(user_id) = user_id {
            user.insert(keys::USER_ID.to_string(), user_id);
        }
        Ok(())
    }
}

fn user_type(profile: &Record) -> Result<&str> {
    require(keys::USER_TYPE, profile.get(keys::USER_TYPE).and_then(Value::as_str))
}

fn require<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => {
            tracing::error!(field, "Required attribute is blank");
            Err(Error::validation(field, "must not be blank"))
        }
    }
}
