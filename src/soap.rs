mod config;
mod de;
mod ser;

pub use config::XmlConfig;
pub use de::{fault_string, find_text};
pub use ser::to_string;

use serde::{Serialize, ser::SerializeStruct};

pub mod ns {
    pub const SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";
    pub const XMDS: &str = "urn:xmds";
}

pub mod prefix {
    pub const SOAP_ENV: &str = "soapenv";
    pub const XMDS: &str = "xmds";
}

/// A request that can be sent as the body of a SOAP envelope
pub trait Operation: Serialize {
    /// Qualified name of the request element, e.g. `xmds:BlackList`
    const ELEMENT: &'static str;
}

/// A SOAP request envelope
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    body: T,
}

impl<T> Envelope<T> {
    /// Creates a new envelope with the given body
    pub fn new(body: T) -> Self {
        Self { body }
    }

    /// Returns the body of the envelope
    pub fn body(&self) -> &T {
        &self.body
    }

    /// Consumes the envelope and returns the body
    pub fn into_body(self) -> T {
        self.body
    }
}

impl<T: Operation> Envelope<T> {
    /// Serialize this envelope into an XMDS SOAP request with optional pretty printing
    pub fn serialize_soap(&self, pretty: bool) -> Result<String, quick_xml::SeError> {
        let config = XmlConfig::new()
            .pretty(pretty)
            .namespace(prefix::SOAP_ENV, ns::SOAP_ENV)
            .namespace(prefix::XMDS, ns::XMDS);

        to_string(&config, &EnvelopeRef(self))
    }
}

struct EnvelopeRef<'a, T>(&'a Envelope<T>);

impl<T: Operation> Serialize for EnvelopeRef<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("soapenv:Envelope", 1)?;
        state.serialize_field("soapenv:Body", &BodyRef(&self.0.body))?;
        state.end()
    }
}

// The request is written as a named field since quick-xml cannot place a
// struct in a `$value` field
struct BodyRef<'a, T>(&'a T);

impl<T: Operation> Serialize for BodyRef<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("soapenv:Body", 1)?;
        state.serialize_field(T::ELEMENT, self.0)?;
        state.end()
    }
}
