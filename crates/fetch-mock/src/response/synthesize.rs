//! Turning declared outcomes into responses.

use super::outcome::{MockOutcome, ProvidedOutcome, ProviderFuture, Rejection};
use super::types::{Response, ResponseInit};
use crate::error::FetchError;
use crate::request::Request;
use tracing::debug;

/// Resolve `outcome` for `request` and build the response.
///
/// Provider results are raced against the request's signal. Whatever the
/// outcome kind, the signal is checked again once it has settled and a fired
/// signal discards the result.
pub async fn synthesize(
    request: &Request,
    outcome: MockOutcome,
    init: &ResponseInit,
) -> Result<Response, FetchError> {
    let resolved = match outcome {
        MockOutcome::Literal(body) => ProvidedOutcome::Literal(body),
        MockOutcome::Descriptor(descriptor) => ProvidedOutcome::Descriptor(descriptor),
        MockOutcome::Prebuilt(response) => ProvidedOutcome::Prebuilt(response),
        MockOutcome::Provider(provider) => settle(request, provider.call(request.clone())).await?,
    };

    if request.is_aborted() {
        return Err(FetchError::Aborted);
    }
    render(resolved, init)
}

/// Fail according to `rejection`.
///
/// A dynamic rejection is called and its result synthesized without overrides,
/// so it may still produce a response.
pub async fn reject(request: &Request, rejection: Rejection) -> Result<Response, FetchError> {
    match rejection {
        Rejection::Value(value) => Err(FetchError::Rejected(value)),
        Rejection::Dynamic(f) => {
            let resolved = settle(request, f()).await?;
            if request.is_aborted() {
                return Err(FetchError::Aborted);
            }
            render(resolved, &ResponseInit::default())
        }
    }
}

/// Build a response from an already resolved outcome.
pub fn render(outcome: ProvidedOutcome, init: &ResponseInit) -> Result<Response, FetchError> {
    match outcome {
        ProvidedOutcome::Literal(body) => Response::from_init(body, init),
        ProvidedOutcome::Descriptor(descriptor) => {
            // Descriptor fields win, including a descriptor url over an override url.
            let merged = init.under(&descriptor.init);
            Response::from_init(descriptor.body, &merged)
        }
        ProvidedOutcome::Prebuilt(response) => Ok(response),
    }
}

async fn settle(request: &Request, pending: ProviderFuture) -> Result<ProvidedOutcome, FetchError> {
    let settled = match request.signal() {
        Some(signal) => {
            tokio::select! {
                biased;
                _ = signal.aborted() => {
                    debug!(url = %request.url(), "Call aborted while provider was pending");
                    return Err(FetchError::Aborted);
                }
                settled = pending => settled,
            }
        }
        None => pending.await,
    };
    settled.map_err(FetchError::Rejected)
}
