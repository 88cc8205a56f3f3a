//! XML namespace handling
//!
//! A [`NamespaceContext`] holds the in-scope prefix bindings of an element and
//! turns `prefix:local` text into a [`QName`].

use crate::datatypes::AnyUri;
use crate::error::{Error, Result};
use crate::names::{is_valid_ncname, split_qname, NCName, QName};
use crate::{XMLNS_NAMESPACE, XML_NAMESPACE};
use std::collections::HashMap;

/// Namespace prefix
pub type Prefix = String;

/// Namespace context for resolving prefixes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceContext {
    /// Mapping from prefix to namespace URI
    prefixes: HashMap<Prefix, AnyUri>,
    /// Default namespace (no prefix)
    default_namespace: Option<AnyUri>,
}

impl NamespaceContext {
    /// Create a new empty namespace context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `namespace`
    ///
    /// `xmlns` can never be declared, `xml` only for the XML namespace, and
    /// the XML and XMLNS namespaces cannot be bound to any other prefix.
    pub fn add_prefix(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        if !is_valid_ncname(prefix) || prefix == "xmlns" {
            return Err(Error::invalid_value(prefix, "namespace prefix"));
        }
        let reserved = namespace == XML_NAMESPACE || namespace == XMLNS_NAMESPACE;
        if (prefix == "xml") != (namespace == XML_NAMESPACE) || (prefix != "xml" && reserved) {
            return Err(Error::invalid_value(namespace, "namespace binding"));
        }
        self.prefixes
            .insert(prefix.to_string(), AnyUri::new(namespace)?);
        Ok(())
    }

    /// Set the default namespace; an empty string removes it
    pub fn set_default_namespace(&mut self, namespace: &str) -> Result<()> {
        if namespace == XML_NAMESPACE || namespace == XMLNS_NAMESPACE {
            return Err(Error::invalid_value(namespace, "namespace binding"));
        }
        self.default_namespace = if namespace.is_empty() {
            None
        } else {
            Some(AnyUri::new(namespace)?)
        };
        Ok(())
    }

    /// Get the namespace for a prefix
    pub fn get_namespace(&self, prefix: &str) -> Option<&AnyUri> {
        self.prefixes.get(prefix)
    }

    /// Get the default namespace
    pub fn get_default_namespace(&self) -> Option<&AnyUri> {
        self.default_namespace.as_ref()
    }

    /// Resolve `prefix:local` (or `local`) text into a QName
    ///
    /// Errors name the invalid component only: the prefix, the local part, or
    /// an undeclared prefix.
    pub fn resolve_qname(&self, text: &str) -> Result<QName> {
        let (prefix, local) = split_qname(text);

        let namespace = match prefix {
            Some(prefix) => {
                if !is_valid_ncname(prefix) {
                    return Err(Error::invalid_value(prefix, "QName prefix"));
                }
                Some(self.lookup_prefix(prefix)?)
            }
            None => self.default_namespace.clone(),
        };

        let local_part =
            NCName::new(local).map_err(|_| Error::invalid_value(local, "QName local part"))?;
        Ok(QName::new(local_part, namespace))
    }

    fn lookup_prefix(&self, prefix: &str) -> Result<AnyUri> {
        if let Some(namespace) = self.prefixes.get(prefix) {
            return Ok(namespace.clone());
        }
        if prefix == "xml" {
            return AnyUri::new(XML_NAMESPACE);
        }
        Err(Error::invalid_value(prefix, "namespace prefix"))
    }
}
