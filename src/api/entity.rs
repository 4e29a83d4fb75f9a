use serde_json::{Map, Value};

use crate::operations::{Entity, Operation, Verb};
use crate::{AxlClient, AxlResponse, AxlResult};

/// Provides the CRUD operations of one AXL entity family.
///
/// Instances are identified by the family's key element (`name`, `userid`,
/// `pattern`, ...) or by UUID. Pattern-keyed families also take a route
/// partition.
#[derive(Debug, Clone)]
pub struct EntityHandler {
    client: AxlClient,
    entity: Entity,
}

impl EntityHandler {
    /// Creates a new entity API instance.
    ///
    /// This method is intended for internal use by the AXL client.
    pub(crate) fn new(client: AxlClient, entity: Entity) -> Self {
        Self { client, entity }
    }

    /// The family this handler operates on.
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Fetches one instance.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// let line = client
    ///     .lines()
    ///     .get("1000")
    ///     .partition("Internal-PT")
    ///     .returned_tags(["pattern", "description"])
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, id: impl Into<String>) -> GetBuilder {
        GetBuilder {
            client: self.client.clone(),
            entity: self.entity,
            selector: Selector::new(self.entity.key(), id.into()),
            returned_tags: Vec::new(),
        }
    }

    /// Searches for instances. Without criteria, every instance is matched
    /// and only the key element is returned.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// let phones = client
    ///     .phones()
    ///     .list()
    ///     .search("name", "SEP%")
    ///     .returned_tags(["name", "model"])
    ///     .first(100)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self) -> ListBuilder {
        ListBuilder {
            client: self.client.clone(),
            entity: self.entity,
            search: Map::new(),
            returned_tags: Vec::new(),
            skip: None,
            first: None,
        }
    }

    /// Creates an instance from a full JSON description.
    pub fn add(&self, payload: Value) -> AddBuilder {
        AddBuilder {
            client: self.client.clone(),
            entity: self.entity,
            payload,
        }
    }

    /// Changes fields of an existing instance.
    pub fn update(&self, id: impl Into<String>) -> UpdateBuilder {
        UpdateBuilder {
            client: self.client.clone(),
            operation: self.entity.update(),
            selector: Selector::new(self.entity.key(), id.into()),
            fields: Map::new(),
        }
    }

    /// Deletes an instance.
    pub fn remove(&self, id: impl Into<String>) -> ActionBuilder {
        self.action(Verb::Remove, id)
    }

    /// Runs a verb that only needs the instance identity (`remove`, `apply`,
    /// `reset`, `restart`).
    pub fn action(&self, verb: Verb, id: impl Into<String>) -> ActionBuilder {
        ActionBuilder {
            client: self.client.clone(),
            operation: self.entity.operation(verb),
            selector: Selector::new(self.entity.key(), id.into()),
        }
    }
}

/// Identity of one instance in a request.
#[derive(Debug, Clone)]
struct Selector {
    key: &'static str,
    value: String,
    uuid: Option<String>,
    partition: Option<String>,
}

impl Selector {
    fn new(key: &'static str, value: String) -> Self {
        Self {
            key,
            value,
            uuid: None,
            partition: None,
        }
    }

    fn into_args(self) -> Map<String, Value> {
        let mut args = Map::new();
        match self.uuid {
            Some(uuid) => {
                args.insert("uuid".to_string(), Value::String(uuid));
            }
            None => {
                args.insert(self.key.to_string(), Value::String(self.value));
                if let Some(partition) = self.partition {
                    args.insert("routePartitionName".to_string(), Value::String(partition));
                }
            }
        }
        args
    }
}

fn returned_tags_value(tags: Vec<String>) -> Value {
    Value::Object(tags.into_iter().map(|tag| (tag, Value::Null)).collect())
}

#[derive(Debug, Clone)]
pub struct GetBuilder {
    client: AxlClient,
    entity: Entity,
    selector: Selector,
    returned_tags: Vec<String>,
}

impl GetBuilder {
    /// Identify the instance by UUID instead of its key.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.selector.uuid = Some(uuid.into());
        self
    }

    /// Route partition of a pattern-keyed instance.
    pub fn partition(mut self, partition: impl Into<String>) -> Self {
        self.selector.partition = Some(partition.into());
        self
    }

    /// Restrict the reply to these elements. All elements are returned by
    /// default.
    pub fn returned_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returned_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let mut args = self.selector.into_args();
        if !self.returned_tags.is_empty() {
            args.insert("returnedTags".to_string(), returned_tags_value(self.returned_tags));
        }
        self.client
            .execute(&self.entity.get(), Value::Object(args))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ListBuilder {
    client: AxlClient,
    entity: Entity,
    search: Map<String, Value>,
    returned_tags: Vec<String>,
    skip: Option<u64>,
    first: Option<u64>,
}

impl ListBuilder {
    /// Match `field` against a SQL `LIKE` pattern (`%` is the wildcard).
    pub fn search(mut self, field: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.search
            .insert(field.into(), Value::String(pattern.into()));
        self
    }

    /// Elements to return for each match.
    pub fn returned_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returned_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Skip the first `n` matches.
    pub fn skip(mut self, n: u64) -> Self {
        self.skip = Some(n);
        self
    }

    /// Return at most `n` matches.
    pub fn first(mut self, n: u64) -> Self {
        self.first = Some(n);
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let key = self.entity.key();
        let search = if self.search.is_empty() {
            Map::from_iter([(key.to_string(), Value::String("%".to_string()))])
        } else {
            self.search
        };
        let tags = if self.returned_tags.is_empty() {
            vec![key.to_string()]
        } else {
            self.returned_tags
        };

        let mut args = Map::new();
        args.insert("searchCriteria".to_string(), Value::Object(search));
        args.insert("returnedTags".to_string(), returned_tags_value(tags));
        if let Some(skip) = self.skip {
            args.insert("skip".to_string(), Value::from(skip));
        }
        if let Some(first) = self.first {
            args.insert("first".to_string(), Value::from(first));
        }

        self.client
            .execute(&self.entity.list(), Value::Object(args))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct AddBuilder {
    client: AxlClient,
    entity: Entity,
    payload: Value,
}

impl AddBuilder {
    /// On success the response is the new instance's UUID.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let mut args = Map::new();
        args.insert(self.entity.field().to_string(), self.payload);
        self.client
            .execute(&self.entity.add(), Value::Object(args))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    client: AxlClient,
    operation: Operation,
    selector: Selector,
    fields: Map<String, Value>,
}

impl UpdateBuilder {
    /// Identify the instance by UUID instead of its key.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.selector.uuid = Some(uuid.into());
        self
    }

    /// Route partition of a pattern-keyed instance.
    pub fn partition(mut self, partition: impl Into<String>) -> Self {
        self.selector.partition = Some(partition.into());
        self
    }

    /// Set one element to a new value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let mut args = self.selector.into_args();
        args.extend(self.fields);
        self.client
            .execute(&self.operation, Value::Object(args))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct ActionBuilder {
    client: AxlClient,
    operation: Operation,
    selector: Selector,
}

impl ActionBuilder {
    /// Identify the instance by UUID instead of its key.
    pub fn uuid(mut self, uuid: impl Into<String>) -> Self {
        self.selector.uuid = Some(uuid.into());
        self
    }

    /// Route partition of a pattern-keyed instance.
    pub fn partition(mut self, partition: impl Into<String>) -> Self {
        self.selector.partition = Some(partition.into());
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        self.client
            .execute(&self.operation, Value::Object(self.selector.into_args()))
            .await
    }
}
