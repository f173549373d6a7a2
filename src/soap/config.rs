use std::collections::BTreeMap;

/// Options for writing SOAP documents
#[derive(Debug, Clone)]
pub struct XmlConfig {
    pub pretty: bool,
    pub indent_size: usize,
    pub xml_decl: bool,
    /// Declared on the root element as `xmlns:<prefix>="<uri>"`
    pub namespaces: BTreeMap<String, String>,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_size: 2,
            xml_decl: true,
            namespaces: BTreeMap::new(),
        }
    }
}

impl XmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent nested elements. Off by default.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Emit the `<?xml ...?>` declaration. On by default.
    pub fn xml_decl(mut self, decl: bool) -> Self {
        self.xml_decl = decl;
        self
    }

    pub fn namespace<S: ToString>(mut self, prefix: S, uri: S) -> Self {
        self.namespaces.insert(prefix.to_string(), uri.to_string());
        self
    }
}
