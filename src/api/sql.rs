use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::operations::{EXECUTE_SQL_QUERY, EXECUTE_SQL_UPDATE};
use crate::{AxlClient, AxlError, AxlResponse, AxlResult};

/// Provides direct access to the UCM Informix database.
///
/// Columns come back as strings (or `null` for empty values), keyed by the
/// column name or alias used in the statement.
#[derive(Debug, Clone)]
pub struct SqlHandler {
    client: AxlClient,
}

impl SqlHandler {
    pub(crate) fn new(client: AxlClient) -> Self {
        Self { client }
    }

    /// Runs a `SELECT` statement.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// let rows = client
    ///     .sql()
    ///     .query("select name, description from device where tkclass = 1")
    ///     .rows()
    ///     .await?;
    /// for row in rows {
    ///     println!("{:?}", row.get("name"));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn query(&self, sql: impl Into<String>) -> SqlQueryBuilder {
        SqlQueryBuilder {
            client: self.client.clone(),
            sql: sql.into(),
        }
    }

    /// Runs an `INSERT`, `UPDATE` or `DELETE` statement.
    pub fn update(&self, sql: impl Into<String>) -> SqlUpdateBuilder {
        SqlUpdateBuilder {
            client: self.client.clone(),
            sql: sql.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SqlQueryBuilder {
    client: AxlClient,
    sql: String,
}

impl SqlQueryBuilder {
    /// Sends the query and returns the envelope; the response is the array
    /// of rows.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        self.client
            .execute(&EXECUTE_SQL_QUERY, json!({ "sql": self.sql }))
            .await
    }

    /// Sends the query and returns its rows. A query matching nothing yields
    /// an empty vector.
    ///
    /// # Errors
    ///
    /// A SOAP fault is returned as [`AxlError::Fault`].
    pub async fn rows(self) -> AxlResult<Vec<Map<String, Value>>> {
        let rows = match self.send().await?.into_result()? {
            Some(Value::Array(rows)) => rows,
            _ => return Ok(Vec::new()),
        };
        Ok(rows
            .into_iter()
            .map(|row| match row {
                Value::Object(map) => map,
                _ => Map::new(),
            })
            .collect())
    }

    /// Sends the query and deserializes each row into `T`.
    pub async fn rows_as<T: DeserializeOwned>(self) -> AxlResult<Vec<T>> {
        self.rows()
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(Value::Object(row)).map_err(AxlError::from))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct SqlUpdateBuilder {
    client: AxlClient,
    sql: String,
}

impl SqlUpdateBuilder {
    /// Sends the statement and returns the envelope; the response is the
    /// `rowsUpdated` count as text.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        self.client
            .execute(&EXECUTE_SQL_UPDATE, json!({ "sql": self.sql }))
            .await
    }

    /// Sends the statement and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// A SOAP fault is returned as [`AxlError::Fault`]; a count that is not
    /// a number as [`AxlError::MalformedResponse`].
    pub async fn rows_updated(self) -> AxlResult<u64> {
        match self.send().await?.into_result()? {
            Some(Value::String(count)) => count.trim().parse().map_err(|_| {
                AxlError::MalformedResponse(format!("rowsUpdated is not a number: {count}"))
            }),
            _ => Ok(0),
        }
    }
}
