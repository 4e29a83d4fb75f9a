use serde_json::{Map, Value};

use crate::operations::{GET_CCM_VERSION, SMART_LICENSE_DETAILS, SMART_LICENSE_STATUS};
use crate::{AxlClient, AxlError, AxlResponse, AxlResult};

/// Provides cluster-wide information: software version and licensing.
#[derive(Debug, Clone)]
pub struct SystemHandler {
    client: AxlClient,
}

impl SystemHandler {
    pub(crate) fn new(client: AxlClient) -> Self {
        Self { client }
    }

    /// Queries the active UCM version.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::AxlClient;
    /// # async fn example(client: &AxlClient) -> Result<(), axl_client::AxlError> {
    /// let version = client.system().ccm_version().version().await?;
    /// println!("UCM {version}");
    /// # Ok(())
    /// # }
    /// ```
    pub fn ccm_version(&self) -> CcmVersionBuilder {
        CcmVersionBuilder {
            client: self.client.clone(),
            process_node: None,
        }
    }

    /// Smart licensing status, unwrapped no further than `return`.
    pub async fn smart_license_status(&self) -> AxlResult<AxlResponse> {
        self.client
            .execute(&SMART_LICENSE_STATUS, Value::Object(Map::new()))
            .await
    }

    /// The `LicenseDetails` section of the smart licensing status.
    pub async fn smart_license_details(&self) -> AxlResult<AxlResponse> {
        self.client
            .execute(&SMART_LICENSE_DETAILS, Value::Object(Map::new()))
            .await
    }
}

#[derive(Debug, Clone)]
pub struct CcmVersionBuilder {
    client: AxlClient,
    process_node: Option<String>,
}

impl CcmVersionBuilder {
    /// Ask a specific cluster node instead of the publisher.
    pub fn process_node(mut self, name: impl Into<String>) -> Self {
        self.process_node = Some(name.into());
        self
    }

    /// Sends the request.
    pub async fn send(self) -> AxlResult<AxlResponse> {
        let mut args = Map::new();
        if let Some(node) = self.process_node {
            args.insert("processNodeName".to_string(), Value::String(node));
        }
        self.client
            .execute(&GET_CCM_VERSION, Value::Object(args))
            .await
    }

    /// Sends the request and returns the version string, e.g.
    /// `12.5.1.11900(146)`.
    ///
    /// # Errors
    ///
    /// A SOAP fault is returned as [`AxlError::Fault`]; a reply without a
    /// version as [`AxlError::MalformedResponse`].
    pub async fn version(self) -> AxlResult<String> {
        let component = self.send().await?.into_result()?;
        component
            .as_ref()
            .and_then(|component| component.get("version"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                AxlError::MalformedResponse("getCCMVersion returned no version".to_string())
            })
    }
}
