//! Loading of the AXL WSDL.
//!
//! The WSDL is only used to learn which operations the target UCM release
//! declares and which namespace its messages live in. Parsed schemas are
//! cached per path for the lifetime of the process.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::debug;
use once_cell::sync::Lazy;

use crate::xml::{self, Element};
use crate::{AxlError, AxlResult};

/// File name of the service description inside a version directory.
pub const WSDL_FILE_NAME: &str = "AXLAPI.wsdl";

const AXL_NAMESPACE_PREFIX: &str = "http://www.cisco.com/AXL/API/";

static SCHEMA_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Schema>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Namespace of AXL request and response elements for `version`.
pub fn axl_namespace(version: &str) -> String {
    format!("{AXL_NAMESPACE_PREFIX}{version}")
}

/// Path of the WSDL for `version` under `schema_dir`.
pub fn wsdl_path(schema_dir: impl AsRef<Path>, version: &str) -> PathBuf {
    schema_dir.as_ref().join(version).join(WSDL_FILE_NAME)
}

/// The operations and namespace declared by one AXL WSDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    namespace: Option<String>,
    operations: BTreeSet<String>,
}

impl Schema {
    /// Parses a WSDL document.
    pub fn parse(wsdl: &str) -> AxlResult<Self> {
        let root = xml::parse_document(wsdl).map_err(|e| {
            AxlError::SchemaError(format!("WSDL is not well-formed: {e}"))
        })?;
        if root.name != "definitions" {
            return Err(AxlError::SchemaError(format!(
                "expected <definitions> root, found <{}>",
                root.name
            )));
        }

        let mut port_types = Vec::new();
        root.descendants("portType", &mut port_types);
        let operations: BTreeSet<String> = port_types
            .iter()
            .flat_map(|port| port.children.iter())
            .filter(|child| child.name == "operation")
            .filter_map(|op| op.attribute("name"))
            .map(str::to_string)
            .collect();

        if operations.is_empty() {
            return Err(AxlError::SchemaError("WSDL declares no operations".to_string()));
        }

        Ok(Self {
            namespace: find_axl_namespace(&root),
            operations,
        })
    }

    /// Loads the WSDL at `path`, reusing a previously parsed copy.
    pub async fn load(path: &Path) -> AxlResult<Arc<Schema>> {
        if let Some(schema) = cached(path) {
            debug!("Using cached AXL schema for {}", path.display());
            return Ok(schema);
        }

        let wsdl = tokio::fs::read_to_string(path).await.map_err(|e| {
            AxlError::SchemaError(format!("cannot read WSDL {}: {e}", path.display()))
        })?;
        let schema = Arc::new(Schema::parse(&wsdl)?);
        debug!(
            "Loaded AXL schema {} with {} operations",
            path.display(),
            schema.operations.len()
        );

        if let Ok(mut cache) = SCHEMA_CACHE.lock() {
            cache.insert(path.to_path_buf(), Arc::clone(&schema));
        }
        Ok(schema)
    }

    /// The AXL namespace imported by the WSDL, if it names one.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns true if the WSDL declares `operation`.
    pub fn supports(&self, operation: &str) -> bool {
        self.operations.contains(operation)
    }

    /// Every declared operation name, sorted.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(String::as_str)
    }
}

fn cached(path: &Path) -> Option<Arc<Schema>> {
    SCHEMA_CACHE.lock().ok()?.get(path).cloned()
}

fn find_axl_namespace(root: &Element) -> Option<String> {
    let mut imports = Vec::new();
    root.descendants("import", &mut imports);
    imports
        .iter()
        .filter_map(|import| import.attribute("namespace"))
        .find(|ns| ns.starts_with(AXL_NAMESPACE_PREFIX))
        .map(str::to_string)
}
