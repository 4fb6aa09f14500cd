//! Lookup path: inventory -> filter -> resolve -> connect.

use crate::domain::{Inventory, LocationFilter, NamespaceLocation};
use crate::error::Result;
use crate::ports::{ConnectReport, Connector, LocationChooser};

use super::resolver::{resolve, Resolution};

/// Result of locating a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocateOutcome {
    /// Nothing matched; the connector was not invoked.
    NotFound,
    /// A location was chosen and the connector ran.
    Connected {
        location: NamespaceLocation,
        report: ConnectReport,
    },
}

/// Application service for finding a namespace and switching to it.
pub struct LocateService<C: Connector> {
    connector: C,
}

impl<C: Connector> LocateService<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Pick one location for `namespace`, asking `chooser` only when several match.
    ///
    /// Returns `None` when nothing matches.
    pub fn select(
        &self,
        inventory: &Inventory,
        namespace: &str,
        filter: &LocationFilter,
        chooser: &mut impl LocationChooser,
    ) -> Result<Option<NamespaceLocation>> {
        match resolve(inventory.filter(namespace, filter)) {
            Resolution::NotFound => Ok(None),
            Resolution::Resolved(location) => Ok(Some(location)),
            Resolution::Ambiguous(candidates) => chooser.choose(&candidates).map(Some),
        }
    }

    /// Select a location for `namespace` and connect to it.
    ///
    /// The chooser blocks the calling task while the operator answers.
    pub async fn locate(
        &self,
        inventory: &Inventory,
        namespace: &str,
        filter: &LocationFilter,
        chooser: &mut impl LocationChooser,
    ) -> Result<LocateOutcome> {
        let Some(location) = self.select(inventory, namespace, filter, chooser)? else {
            tracing::debug!(namespace, "namespace not found in inventory");
            return Ok(LocateOutcome::NotFound);
        };

        tracing::debug!(namespace, location = %location, "connecting");
        let report = self.connector.connect(&location).await?;
        Ok(LocateOutcome::Connected { location, report })
    }
}
