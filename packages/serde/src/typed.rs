//! Typed read and write extension traits.

use serde::de::DeserializeOwned;
use serde::Serialize;

use structyaml_core::{Address, SectionMut, SectionRef};

use crate::convert::{from_value, to_value};
use crate::error::Error;

/// Extension trait for typed reads.
///
/// Implemented for [`SectionRef`]. A section is read as a map of its
/// entries, so a nested section deserializes straight into a struct.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use structyaml_core::Document;
/// use structyaml_serde::TypedSection;
///
/// #[derive(Deserialize)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let mut doc = Document::new();
/// doc.root_mut().set("server.host", "localhost").unwrap();
/// doc.root_mut().set("server.port", 8080).unwrap();
///
/// let server: Server = doc.root().read_as("server").unwrap().unwrap();
/// assert_eq!(server.port, 8080);
/// ```
pub trait TypedSection {
    /// Read the entry at `address` and deserialize it.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    fn read_as<T: DeserializeOwned>(&self, address: impl Into<Address>)
        -> Result<Option<T>, Error>;

    /// Read the entry at `address` as a `serde_json::Value`.
    fn read_json(&self, address: impl Into<Address>) -> Result<Option<serde_json::Value>, Error> {
        self.read_as(address)
    }
}

impl TypedSection for SectionRef<'_> {
    fn read_as<T: DeserializeOwned>(
        &self,
        address: impl Into<Address>,
    ) -> Result<Option<T>, Error> {
        let Some(item) = self.get_safe(address) else {
            return Ok(None);
        };
        let typed = from_value(item.to_value())?;
        Ok(Some(typed))
    }
}

/// Extension trait for typed writes.
///
/// Implemented for [`SectionMut`]. Data serializing to a map is stored as a
/// section, so a struct lands as nested, individually addressable entries;
/// the previous entry's comments are kept either way. Data serializing to
/// `null` removes the entry, as with [`SectionMut::set`].
pub trait TypedSectionMut {
    /// Serialize `data` and store it at `address`.
    fn write_as<T: Serialize>(&mut self, address: impl Into<Address>, data: &T)
        -> Result<(), Error>;

    /// Store a `serde_json::Value` at `address`.
    fn write_json(
        &mut self,
        address: impl Into<Address>,
        data: serde_json::Value,
    ) -> Result<(), Error> {
        self.write_as(address, &data)
    }
}

impl TypedSectionMut for SectionMut<'_> {
    fn write_as<T: Serialize>(
        &mut self,
        address: impl Into<Address>,
        data: &T,
    ) -> Result<(), Error> {
        let value = to_value(data)?;
        self.set(address, value)?;
        Ok(())
    }
}
