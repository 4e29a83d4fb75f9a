//! The AXL operation table.
//!
//! AXL exposes several hundred operations that differ only by verb, object
//! and the field of `return` that carries the result. Instead of one method
//! per operation, each is described by an [`Operation`] value and dispatched
//! through [`AxlClient::execute`](crate::AxlClient::execute).
//!
//! CRUD families are described by [`Entity`]:
//!
//! ```
//! use axl_client::Entity;
//!
//! let op = Entity::SIP_PROFILE.get();
//! assert_eq!(op.name(), "getSipProfile");
//! assert_eq!(op.response_field(), Some("sipProfile"));
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::xml;

/// The verb prefix of an AXL operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    List,
    Add,
    Update,
    Remove,
    Apply,
    Reset,
    Restart,
    Do,
    Execute,
}

impl Verb {
    // "restart" must be tried before "reset"; both start with "res".
    const PARSE_ORDER: [Verb; 10] = [
        Verb::Restart,
        Verb::Reset,
        Verb::Remove,
        Verb::Update,
        Verb::Execute,
        Verb::Apply,
        Verb::List,
        Verb::Add,
        Verb::Get,
        Verb::Do,
    ];

    /// The lower-case prefix used in operation names.
    pub fn prefix(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::List => "list",
            Verb::Add => "add",
            Verb::Update => "update",
            Verb::Remove => "remove",
            Verb::Apply => "apply",
            Verb::Reset => "reset",
            Verb::Restart => "restart",
            Verb::Do => "do",
            Verb::Execute => "execute",
        }
    }

    /// Returns true for verbs that change server configuration.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Verb::Get | Verb::List)
    }

    /// Splits an operation name into its verb and object.
    ///
    /// The object must start with an upper-case letter and be a valid XML
    /// name as a whole.
    pub fn split(name: &str) -> Option<(Verb, &str)> {
        Self::PARSE_ORDER.iter().find_map(|verb| {
            let object = name.strip_prefix(verb.prefix())?;
            let upper = object.chars().next().is_some_and(|c| c.is_ascii_uppercase());
            (upper && xml::is_name(object)).then_some((*verb, object))
        })
    }
}

/// One remote AXL operation and the way its reply is unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operation {
    verb: Verb,
    object: Cow<'static, str>,
    response_field: Option<Cow<'static, str>>,
    many: bool,
}

impl Operation {
    const fn build(
        verb: Verb,
        object: &'static str,
        response_field: Option<&'static str>,
        many: bool,
    ) -> Self {
        Self {
            verb,
            object: Cow::Borrowed(object),
            response_field: match response_field {
                Some(field) => Some(Cow::Borrowed(field)),
                None => None,
            },
            many,
        }
    }

    /// An operation whose response is the raw `return` element.
    pub const fn raw(verb: Verb, object: &'static str) -> Self {
        Self::build(verb, object, None, false)
    }

    /// An operation whose response is `return[field]`.
    pub const fn field(verb: Verb, object: &'static str, field: &'static str) -> Self {
        Self::build(verb, object, Some(field), false)
    }

    /// An operation whose response is `return[field]`, always as an array.
    pub const fn rows(verb: Verb, object: &'static str, field: &'static str) -> Self {
        Self::build(verb, object, Some(field), true)
    }

    /// Resolves an operation by wire name.
    ///
    /// Known names map to their catalogued unwrapping rule. Any other
    /// well-formed name (`<verb><Object>`) is unwrapped by convention: `get`
    /// and `list` read the lower-camel object field (`listSipRealm` returns
    /// the `sipRealm` rows), other verbs keep the raw `return`.
    pub fn parse(name: &str) -> Option<Self> {
        if let Some(op) = STANDALONE.iter().find(|op| op.name() == name) {
            return Some(op.clone());
        }
        let (verb, object) = Verb::split(name)?;
        if let Some(entity) = Entity::find(object) {
            return Some(entity.operation(verb));
        }
        let response_field = match verb {
            Verb::Get | Verb::List => Some(Cow::Owned(lower_camel(object))),
            _ => None,
        };
        Some(Self {
            verb,
            object: Cow::Owned(object.to_string()),
            response_field,
            many: verb == Verb::List,
        })
    }

    /// The operation's verb.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// The object part of the name, e.g. `Phone`.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// The wire name, e.g. `getPhone`.
    pub fn name(&self) -> String {
        format!("{}{}", self.verb.prefix(), self.object)
    }

    /// The sub-field of `return` that forms the response, if any.
    pub fn response_field(&self) -> Option<&str> {
        self.response_field.as_deref()
    }

    /// Whether the response is normalised to an array.
    pub fn is_many(&self) -> bool {
        self.many
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.verb.prefix(), self.object)
    }
}

fn lower_camel(object: &str) -> String {
    let mut chars = object.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A family of CRUD operations over one AXL object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    object: &'static str,
    field: &'static str,
    key: &'static str,
}

macro_rules! entities {
    ($( $(#[$doc:meta])* $konst:ident => ($object:literal, $field:literal, $key:literal) ),* $(,)?) => {
        impl Entity {
            $(
                $(#[$doc])*
                pub const $konst: Entity = Entity::new($object, $field, $key);
            )*

            /// Every catalogued entity family.
            pub const ALL: &'static [Entity] = &[$(Entity::$konst),*];
        }
    };
}

entities! {
    /// IP phones and other phone-class devices.
    PHONE => ("Phone", "phone", "name"),
    /// Directory numbers.
    LINE => ("Line", "line", "pattern"),
    /// End users.
    USER => ("User", "user", "userid"),
    /// Application users.
    APP_USER => ("AppUser", "appUser", "userid"),
    DEVICE_PROFILE => ("DeviceProfile", "deviceProfile", "name"),
    SIP_PROFILE => ("SipProfile", "sipProfile", "name"),
    SIP_TRUNK => ("SipTrunk", "sipTrunk", "name"),
    SIP_TRUNK_SECURITY_PROFILE => ("SipTrunkSecurityProfile", "sipTrunkSecurityProfile", "name"),
    PHONE_SECURITY_PROFILE => ("PhoneSecurityProfile", "phoneSecurityProfile", "name"),
    ROUTE_PATTERN => ("RoutePattern", "routePattern", "pattern"),
    TRANSLATION_PATTERN => ("TransPattern", "transPattern", "pattern"),
    ROUTE_PARTITION => ("RoutePartition", "routePartition", "name"),
    /// Calling search spaces.
    CSS => ("Css", "css", "name"),
    DEVICE_POOL => ("DevicePool", "devicePool", "name"),
    LOCATION => ("Location", "location", "name"),
    REGION => ("Region", "region", "name"),
    HUNT_PILOT => ("HuntPilot", "huntPilot", "pattern"),
    HUNT_LIST => ("HuntList", "huntList", "name"),
    LINE_GROUP => ("LineGroup", "lineGroup", "name"),
    ROUTE_GROUP => ("RouteGroup", "routeGroup", "name"),
    ROUTE_LIST => ("RouteList", "routeList", "name"),
    MEDIA_RESOURCE_GROUP => ("MediaResourceGroup", "mediaResourceGroup", "name"),
    MEDIA_RESOURCE_LIST => ("MediaResourceList", "mediaResourceList", "name"),
    /// MGCP gateways, keyed by domain name.
    GATEWAY => ("Gateway", "gateway", "domainName"),
    CTI_ROUTE_POINT => ("CtiRoutePoint", "ctiRoutePoint", "name"),
    REMOTE_DESTINATION => ("RemoteDestination", "remoteDestination", "destination"),
    REMOTE_DESTINATION_PROFILE => ("RemoteDestinationProfile", "remoteDestinationProfile", "name"),
    CONFERENCE_BRIDGE => ("ConferenceBridge", "conferenceBridge", "name"),
    MTP => ("Mtp", "mtp", "name"),
    TRANSCODER => ("Transcoder", "transcoder", "name"),
    CALL_PICKUP_GROUP => ("CallPickupGroup", "callPickupGroup", "name"),
    VOICE_MAIL_PILOT => ("VoiceMailPilot", "voiceMailPilot", "dirn"),
    VOICE_MAIL_PROFILE => ("VoiceMailProfile", "voiceMailProfile", "name"),
    CALL_PARK => ("CallPark", "callPark", "pattern"),
    DATE_TIME_GROUP => ("DateTimeGroup", "dateTimeGroup", "name"),
    AAR_GROUP => ("AarGroup", "aarGroup", "name"),
    SRST => ("Srst", "srst", "name"),
    COMMON_PHONE_CONFIG => ("CommonPhoneConfig", "commonPhoneConfig", "name"),
    CALL_MANAGER_GROUP => ("CallManagerGroup", "callManagerGroup", "name"),
}

impl Entity {
    /// Describes a family not present in the catalogue.
    pub const fn new(object: &'static str, field: &'static str, key: &'static str) -> Self {
        Self { object, field, key }
    }

    /// Looks up a catalogued family by its object name.
    pub fn find(object: &str) -> Option<Entity> {
        Self::ALL.iter().copied().find(|e| e.object == object)
    }

    /// The object part of operation names, e.g. `SipProfile`.
    pub fn object(&self) -> &'static str {
        self.object
    }

    /// The field of `return` carrying the entity.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The element that identifies an instance, e.g. `name` or `userid`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The operation for `verb` on this family.
    pub fn operation(&self, verb: Verb) -> Operation {
        match verb {
            Verb::Get => Operation::field(verb, self.object, self.field),
            Verb::List => Operation::rows(verb, self.object, self.field),
            _ => Operation::raw(verb, self.object),
        }
    }

    /// `get<Object>`, unwrapped to the entity field.
    pub fn get(&self) -> Operation {
        self.operation(Verb::Get)
    }

    /// `list<Object>`, unwrapped to an array of rows.
    pub fn list(&self) -> Operation {
        self.operation(Verb::List)
    }

    /// `add<Object>`; the response is the new uuid.
    pub fn add(&self) -> Operation {
        self.operation(Verb::Add)
    }

    /// `update<Object>`; the response is the raw `return`.
    pub fn update(&self) -> Operation {
        self.operation(Verb::Update)
    }

    /// `remove<Object>`; the response is the raw `return`.
    pub fn remove(&self) -> Operation {
        self.operation(Verb::Remove)
    }
}

/// Resets a device.
pub const DO_DEVICE_RESET: Operation = Operation::raw(Verb::Do, "DeviceReset");
/// Logs a user into a device (Extension Mobility).
pub const DO_DEVICE_LOGIN: Operation = Operation::raw(Verb::Do, "DeviceLogin");
/// Logs the current user out of a device.
pub const DO_DEVICE_LOGOUT: Operation = Operation::raw(Verb::Do, "DeviceLogout");
/// Runs a read-only SQL statement; rows are returned under `row`.
pub const EXECUTE_SQL_QUERY: Operation = Operation::rows(Verb::Execute, "SQLQuery", "row");
/// Runs a data-modifying SQL statement.
pub const EXECUTE_SQL_UPDATE: Operation =
    Operation::field(Verb::Execute, "SQLUpdate", "rowsUpdated");
/// Returns the active UCM software version.
pub const GET_CCM_VERSION: Operation =
    Operation::field(Verb::Get, "CCMVersion", "componentVersion");
/// Smart licensing status, as returned.
pub const SMART_LICENSE_STATUS: Operation = Operation::raw(Verb::Get, "SmartLicenseStatus");
/// The license details section of the smart licensing status.
pub const SMART_LICENSE_DETAILS: Operation =
    Operation::field(Verb::Get, "SmartLicenseStatus", "LicenseDetails");

/// Catalogued operations that are not part of an entity family. When two
/// entries share a wire name, [`Operation::parse`] returns the first.
pub const STANDALONE: &[Operation] = &[
    DO_DEVICE_RESET,
    DO_DEVICE_LOGIN,
    DO_DEVICE_LOGOUT,
    EXECUTE_SQL_QUERY,
    EXECUTE_SQL_UPDATE,
    GET_CCM_VERSION,
    SMART_LICENSE_STATUS,
    SMART_LICENSE_DETAILS,
];
