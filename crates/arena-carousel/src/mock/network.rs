//! Mutable network hint that counts how often it is read.

use crate::quality::{ConnectionInfo, NetworkInformation};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared mock of the host network-information capability
#[derive(Debug, Clone, Default)]
pub struct MockNetwork {
    connection: Rc<RefCell<Option<ConnectionInfo>>>,
    queries: Rc<Cell<u32>>,
}

impl MockNetwork {
    /// Host without the capability
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Host reporting `effective_type`
    #[must_use]
    pub fn with_effective_type(effective_type: &str) -> Self {
        let network = Self::default();
        network.set_effective_type(effective_type);
        network
    }

    /// Change the reported effective type
    pub fn set_effective_type(&self, effective_type: &str) {
        *self.connection.borrow_mut() = Some(ConnectionInfo::with_effective_type(effective_type));
    }

    /// Replace the whole connection entry
    pub fn set_connection(&self, connection: Option<ConnectionInfo>) {
        *self.connection.borrow_mut() = connection;
    }

    /// How many times the hint was read
    #[must_use]
    pub fn query_count(&self) -> u32 {
        self.queries.get()
    }
}

impl NetworkInformation for MockNetwork {
    fn connection(&self) -> Option<ConnectionInfo> {
        self.queries.set(self.queries.get() + 1);
        self.connection.borrow().clone()
    }
}
