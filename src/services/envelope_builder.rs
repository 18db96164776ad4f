/*
 * C1 - Envelope Builder. Produces a prefilled response document stamped
 * with local node identity, address, protocol, and client version. No
 * I/O, no failure modes - everything it needs lives on `Config`.
 */

use std::sync::Arc;

use crate::models::{Caching, ClientVersion, NodeAddress, ProtocolVersion};
use crate::utils::Config;
use crate::models::ApiResponse;

pub struct EnvelopeBuilder {
    config: Arc<Config>,
}

impl EnvelopeBuilder {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Build a fresh envelope with node identity and address filled in,
    /// everything else at its zero value. Callers overwrite `entity`,
    /// `endpoint`, `timestamp`, `response_body`, and friends afterward.
    pub fn new_envelope(&self) -> ApiResponse {
        let identity = &self.config.identity;

        ApiResponse {
            node_id: identity.node_id.clone(),
            address: NodeAddress {
                location_type: identity.location_type.clone(),
                port: identity.port,
                protocol: ProtocolVersion {
                    major: identity.protocol_major,
                    minor: identity.protocol_minor,
                    extensions: identity.protocol_extensions.clone(),
                },
                client: ClientVersion {
                    major: identity.client_major,
                    minor: identity.client_minor,
                    patch: identity.client_patch,
                    name: identity.client_name.clone(),
                },
            },
            caching: Caching::default(),
            ..Default::default()
        }
    }
}
