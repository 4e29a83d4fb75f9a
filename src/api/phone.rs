use serde_json::Value;

use crate::api::entity::{
    ActionBuilder, AddBuilder, EntityHandler, GetBuilder, ListBuilder, UpdateBuilder,
};
use crate::operations::{Entity, Verb};
use crate::AxlClient;

/// Provides methods for managing phones.
///
/// On top of the CRUD operations, phones can have pending configuration
/// applied, or be reset or restarted.
#[derive(Debug, Clone)]
pub struct PhoneHandler {
    inner: EntityHandler,
}

impl PhoneHandler {
    pub(crate) fn new(client: AxlClient) -> Self {
        Self {
            inner: EntityHandler::new(client, Entity::PHONE),
        }
    }

    /// Fetches a phone by device name, e.g. `SEP001122334455`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// let reply = client.phones().get("SEP001122334455").send().await?;
    /// match reply.error {
    ///     Some(fault) => println!("lookup failed: {fault}"),
    ///     None => println!("{:?}", reply.response),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, name: impl Into<String>) -> GetBuilder {
        self.inner.get(name)
    }

    pub fn list(&self) -> ListBuilder {
        self.inner.list()
    }

    pub fn add(&self, phone: Value) -> AddBuilder {
        self.inner.add(phone)
    }

    pub fn update(&self, name: impl Into<String>) -> UpdateBuilder {
        self.inner.update(name)
    }

    pub fn remove(&self, name: impl Into<String>) -> ActionBuilder {
        self.inner.remove(name)
    }

    /// Pushes pending configuration to the phone without a full reset.
    pub fn apply(&self, name: impl Into<String>) -> ActionBuilder {
        self.inner.action(Verb::Apply, name)
    }

    /// Resets the phone.
    pub fn reset(&self, name: impl Into<String>) -> ActionBuilder {
        self.inner.action(Verb::Reset, name)
    }

    /// Restarts the phone.
    pub fn restart(&self, name: impl Into<String>) -> ActionBuilder {
        self.inner.action(Verb::Restart, name)
    }
}
