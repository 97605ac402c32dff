//! Connector descriptors for the node kinds.
//!
//! Each node kind declares its connectors via a static `ConnectorDescriptor`
//! array. The position in that array is the connector's port index, which the
//! builder uses to mint `ConnectorId`s and to check connection directions.

use serde::{Deserialize, Serialize};

/// Whether a connector consumes or produces a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectorDirection {
    Input,
    Output,
}

/// Static descriptor for a node's connector.
#[derive(Debug, Clone)]
pub struct ConnectorDescriptor {
    pub name: &'static str,
    pub direction: ConnectorDirection,
}

impl ConnectorDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: ConnectorDirection::Input,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: ConnectorDirection::Output,
        }
    }
}

pub(crate) const SOURCE_CONNECTORS: &[ConnectorDescriptor] =
    &[ConnectorDescriptor::output("clip")];

pub(crate) const FILTER_CONNECTORS: &[ConnectorDescriptor] = &[
    ConnectorDescriptor::input("clip"),
    ConnectorDescriptor::output("clip"),
];

pub(crate) const OUTPUT_CONNECTORS: &[ConnectorDescriptor] =
    &[ConnectorDescriptor::input("clip")];
