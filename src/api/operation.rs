use serde_json::{Map, Value};

use crate::operations::Operation;
use crate::{AxlClient, AxlResponse, AxlResult};

/// Builder for any operation, with arguments supplied as JSON.
///
/// Argument order is preserved; AXL validates elements against the XSD
/// sequence, so supply them in schema order.
///
/// # Examples
///
/// ```no_run
/// # use axl_client::{AxlClient, Entity};
/// # use serde_json::json;
/// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
/// let reply = client
///     .operation(Entity::SIP_TRUNK.get())
///     .arg("name", "PSTN-Trunk")
///     .arg("returnedTags", json!({ "name": null, "description": null }))
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct OperationBuilder {
    client: AxlClient,
    operation: Operation,
    args: Value,
}

impl OperationBuilder {
    pub(crate) fn new(client: AxlClient, operation: Operation) -> Self {
        Self {
            client,
            operation,
            args: Value::Object(Map::new()),
        }
    }

    /// Appends one argument element.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Value::Object(map) = &mut self.args {
            map.insert(name.into(), value.into());
        }
        self
    }

    /// Merges a JSON object of arguments. A non-object value replaces the
    /// arguments and is rejected when the request is sent.
    pub fn args(mut self, args: Value) -> Self {
        match (&mut self.args, args) {
            (Value::Object(map), Value::Object(extra)) => map.extend(extra),
            (current, other) => *current = other,
        }
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        self.client.execute(&self.operation, self.args).await
    }
}
