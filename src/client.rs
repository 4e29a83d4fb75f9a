use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "default-client")]
use arc_swap::ArcSwapOption;
use http::StatusCode;
use log::{debug, trace, warn};
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::api::device::DeviceHandler;
use crate::api::entity::EntityHandler;
use crate::api::operation::OperationBuilder;
use crate::api::phone::PhoneHandler;
use crate::api::sql::SqlHandler;
use crate::api::system::SystemHandler;
use crate::models::api_response::AxlResponse;
use crate::operations::{Entity, Operation};
use crate::schema::{self, Schema};
use crate::soap::{self, Reply};
use crate::transport::{HttpTransport, SoapTransport, TransportResponse};
use crate::{AxlError, AxlResult};

/// Default AXL HTTPS port.
pub const DEFAULT_PORT: u16 = 8443;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(feature = "default-client")]
static AXL_CLIENT: ArcSwapOption<AxlClient> = ArcSwapOption::const_empty();

/// Installs `client` as the process-wide default client.
#[cfg(feature = "default-client")]
pub fn initialize(client: AxlClient) {
    AXL_CLIENT.store(Some(Arc::new(client)));
}

/// Returns the process-wide default client, if one was installed with
/// [`initialize`].
#[cfg(feature = "default-client")]
pub fn instance() -> Option<Arc<AxlClient>> {
    AXL_CLIENT.load_full()
}

enum PasswordSource {
    Value(SecretString),
    Env(String),
}

/// Builder for AXL clients.
///
/// This builder provides a fluent API for creating clients with validation
/// at build time.
#[derive(Default)]
pub struct AxlClientBuilder {
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
    username: Option<String>,
    password: Option<PasswordSource>,
    version: Option<String>,
    verify_tls: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    schema_dir: Option<PathBuf>,
    wsdl_path: Option<PathBuf>,
    http_client: Option<ReqwestClient>,
    transport: Option<Arc<dyn SoapTransport>>,
}

impl AxlClientBuilder {
    /// Sets the UCM publisher host name or IP address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the HTTPS port (default 8443).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Overrides the service location with a full base URL; requests go to
    /// `<base_url>/axl/`. Takes precedence over `host` and `port`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the username for basic authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for basic authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(PasswordSource::Value(SecretString::from(password.into())));
        self
    }

    /// Reads the password from an environment variable when the client is
    /// built.
    pub fn password_from_env(mut self, var_name: impl Into<String>) -> Self {
        self.password = Some(PasswordSource::Env(var_name.into()));
        self
    }

    /// Sets the UCM release, e.g. `12.5`. Selects the AXL namespace, the
    /// `SOAPAction` header and the WSDL directory.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets whether to verify TLS certificates (default false).
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Sets the HTTP request timeout (default 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the directory holding `<version>/AXLAPI.wsdl`.
    pub fn schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = Some(dir.into());
        self
    }

    /// Sets the WSDL file directly. Takes precedence over `schema_dir`.
    pub fn wsdl_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.wsdl_path = Some(path.into());
        self
    }

    /// Sets a custom reqwest client (e.g., for custom TLS roots or proxies).
    pub fn http_client(mut self, http_client: ReqwestClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Replaces the HTTP transport entirely.
    pub fn transport(mut self, transport: Arc<dyn SoapTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validates the configuration, loads the WSDL if one is configured and
    /// builds the client. No request is sent to the server.
    pub async fn build(self) -> AxlResult<AxlClient> {
        let username = self
            .username
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| AxlError::ConfigurationError("Username is required".into()))?;

        let password = match self.password {
            Some(PasswordSource::Value(secret)) => Some(secret),
            Some(PasswordSource::Env(var)) => {
                let value = std::env::var(&var).map_err(|e| {
                    AxlError::ConfigurationError(format!(
                        "Failed to read environment variable '{var}': {e}"
                    ))
                })?;
                Some(SecretString::from(value))
            }
            None => None,
        }
        .filter(|p| !p.expose_secret().trim().is_empty())
        .ok_or_else(|| AxlError::ConfigurationError("Password is required".into()))?;

        let version = self
            .version
            .map(|v| v.trim().to_string())
            .ok_or_else(|| AxlError::ConfigurationError("Version is required".into()))?;
        if !is_valid_version(&version) {
            return Err(AxlError::ConfigurationError(format!(
                "Invalid AXL version: {version}"
            )));
        }

        let schema_path = self
            .wsdl_path
            .or_else(|| self.schema_dir.map(|dir| schema::wsdl_path(dir, &version)));
        let schema = match schema_path {
            Some(path) => Some(Schema::load(&path).await?),
            None => None,
        };

        let namespace = schema
            .as_ref()
            .and_then(|s| s.namespace())
            .map(str::to_string)
            .unwrap_or_else(|| schema::axl_namespace(&version));

        let transport: Arc<dyn SoapTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let endpoint = match self.base_url {
                    Some(base) => endpoint_from_base(&base)?,
                    None => {
                        let host = self
                            .host
                            .filter(|h| !h.trim().is_empty())
                            .ok_or_else(|| AxlError::ConfigurationError("Host is required".into()))?;
                        let port = self.port.unwrap_or(DEFAULT_PORT);
                        Url::parse(&format!("https://{}:{port}/axl/", host.trim())).map_err(
                            |e| AxlError::ConfigurationError(format!("Invalid host: {e}")),
                        )?
                    }
                };

                let http_client = match self.http_client {
                    Some(custom_client) => custom_client,
                    None => {
                        let user_agent = self
                            .user_agent
                            .as_deref()
                            .unwrap_or(concat!("axl-client/", env!("CARGO_PKG_VERSION")));
                        ReqwestClient::builder()
                            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
                            .danger_accept_invalid_certs(!self.verify_tls)
                            .cookie_store(true)
                            .user_agent(user_agent)
                            .build()
                            .map_err(|e| {
                                AxlError::ConfigurationError(format!(
                                    "Failed to create HTTP client: {e}"
                                ))
                            })?
                    }
                };

                Arc::new(HttpTransport::new(http_client, endpoint, username, password))
            }
        };

        debug!(
            "Configured AXL client for {} (version {version})",
            transport.endpoint()
        );

        Ok(AxlClient {
            version,
            namespace,
            transport,
            schema,
        })
    }
}

fn endpoint_from_base(base: &str) -> AxlResult<Url> {
    let base = Url::parse(base)
        .map_err(|e| AxlError::ConfigurationError(format!("Invalid base URL: {e}")))?;
    Ok(base.join("/axl/")?)
}

fn is_valid_version(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
}

/// The main client for the AXL SOAP API.
///
/// Every operation goes through [`AxlClient::execute`]; the handler methods
/// (`phones()`, `sql()`, ...) only assemble arguments for it. Cloning is
/// cheap and clones share the underlying connection pool.
#[derive(Clone)]
pub struct AxlClient {
    version: String,
    namespace: String,
    transport: Arc<dyn SoapTransport>,
    schema: Option<Arc<Schema>>,
}

impl fmt::Debug for AxlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxlClient")
            .field("endpoint", self.transport.endpoint())
            .field("version", &self.version)
            .field("namespace", &self.namespace)
            .field("schema", &self.schema.is_some())
            .finish()
    }
}

impl AxlClient {
    /// Creates a new builder for configuring an AXL client.
    pub fn builder() -> AxlClientBuilder {
        AxlClientBuilder::default()
    }

    /// The configured UCM release.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The AXL namespace used for request elements.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        self.transport.endpoint()
    }

    /// The loaded WSDL, if one was configured.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    /// Invokes one remote operation and shapes its reply.
    ///
    /// A SOAP fault is not an error: it is returned inside the envelope with
    /// `success == false`. Transport failures, authentication rejections and
    /// unparseable replies are returned as `Err`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The loaded WSDL does not declare the operation.
    /// - `args` is not a JSON object.
    /// - The request fails due to network issues.
    /// - The server rejects the credentials (HTTP 401/403).
    /// - The server answers with any other non-success status that does not
    ///   carry a SOAP fault.
    /// - The reply is not a SOAP envelope.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use axl_client::{AxlClient, AxlError, Entity};
    /// # use serde_json::json;
    /// # async fn example(client: &AxlClient) -> Result<(), AxlError> {
    /// let reply = client
    ///     .execute(&Entity::PHONE.get(), json!({ "name": "SEP001122334455" }))
    ///     .await?;
    /// if reply.success {
    ///     println!("{:?}", reply.response);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn execute(&self, operation: &Operation, args: Value) -> AxlResult<AxlResponse> {
        let name = operation.name();
        if let Some(schema) = &self.schema {
            if !schema.supports(&name) {
                return Err(AxlError::UnknownOperation(name));
            }
        }

        let envelope = soap::build_envelope(&self.namespace, &name, &args)?;
        let soap_action = soap::soap_action(&self.version, &name);
        debug!("AXL {name} -> {}", self.transport.endpoint());
        trace!("AXL {name} request: {envelope}");

        let reply = self.transport.send(&soap_action, envelope).await?;
        trace!("AXL {name} reply ({}): {}", reply.status, reply.body);

        match decode(&name, reply)? {
            Reply::Return(value) => Ok(AxlResponse::from_return(operation, value)),
            Reply::Fault(fault) => {
                warn!("AXL {name} fault: {fault}");
                Ok(AxlResponse::from_fault(fault))
            }
        }
    }

    /// Invokes an operation by wire name, e.g. `"getPhone"`.
    ///
    /// # Warning
    ///
    /// Names outside the catalogue return the raw `return` element. Prefer
    /// [`execute`](Self::execute) with a catalogued [`Operation`].
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute); additionally fails with
    /// [`AxlError::UnknownOperation`] if `name` is not `<verb><Object>`.
    pub async fn call(&self, name: &str, args: Value) -> AxlResult<AxlResponse> {
        let operation =
            Operation::parse(name).ok_or_else(|| AxlError::UnknownOperation(name.to_string()))?;
        self.execute(&operation, args).await
    }

    /// Gets a generic builder for `operation`.
    pub fn operation(&self, operation: Operation) -> OperationBuilder {
        OperationBuilder::new(self.clone(), operation)
    }

    /// Gets the CRUD interface for any entity family.
    pub fn entity(&self, entity: Entity) -> EntityHandler {
        EntityHandler::new(self.clone(), entity)
    }

    /// Gets the phone API interface.
    pub fn phones(&self) -> PhoneHandler {
        PhoneHandler::new(self.clone())
    }

    /// Gets the directory number API interface.
    pub fn lines(&self) -> EntityHandler {
        self.entity(Entity::LINE)
    }

    /// Gets the end user API interface.
    pub fn users(&self) -> EntityHandler {
        self.entity(Entity::USER)
    }

    /// Gets the device action API interface.
    pub fn devices(&self) -> DeviceHandler {
        DeviceHandler::new(self.clone())
    }

    /// Gets the SQL API interface.
    pub fn sql(&self) -> SqlHandler {
        SqlHandler::new(self.clone())
    }

    /// Gets the system information API interface.
    pub fn system(&self) -> SystemHandler {
        SystemHandler::new(self.clone())
    }
}

fn decode(name: &str, reply: TransportResponse) -> AxlResult<Reply> {
    let status = reply.status;
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        warn!("AXL {name} rejected with status {status}");
        return Err(AxlError::AuthenticationError(format!(
            "AXL request rejected with status code: {status}"
        )));
    }

    if status.is_success() {
        return soap::parse_reply(&reply.body);
    }

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        if let Ok(fault @ Reply::Fault(_)) = soap::parse_reply(&reply.body) {
            return Ok(fault);
        }
    }

    warn!("AXL {name} failed with status {status}");
    Err(AxlError::HttpStatus {
        status: status.as_u16(),
        body: reply.body,
    })
}
