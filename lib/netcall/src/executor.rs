//! Dispatches a descriptor through the binding it selects.

use tracing::debug;

use crate::envelope::Envelope;
use crate::{Descriptor, Method, Networking, Result, Transport};

/// Send `descriptor` and return the raw envelope.
///
/// Faults are returned as-is, classification is left to the façades.
pub(crate) async fn execute<C: Transport>(
    networking: &Networking<C>,
    descriptor: Descriptor<C>,
) -> Result<Envelope> {
    let (target, method, body, headers, transport) = descriptor.into_parts();
    let binding = networking.service_for(transport, headers);

    debug!(
        %method,
        url = %target,
        shared = binding.is_shared(),
        "dispatching request"
    );

    match method {
        Method::Get => binding.get(&target).await,
        Method::Post => binding.post(&target, body).await,
        Method::Put => binding.put(&target, body).await,
        Method::Patch => binding.patch(&target, body).await,
        Method::Delete => binding.delete(&target).await,
    }
}
