//! Per-target task body
//!
//! A dispatcher owns one target for its whole life. Every failure is logged
//! here and turned into `TargetState::Failed`; nothing propagates to the
//! coordinator or to other targets.

use crate::crawler::fetcher::Fetcher;
use crate::output::Metadata;
use crate::state::TargetState;
use crate::url::Target;
use tokio::sync::mpsc;

/// Fetches one target and forwards its metadata to the reporter
///
/// # Flow
///
/// 1. `Pending -> InFlight`
/// 2. Fetch and persist the page (plus metadata/image sources when enabled)
/// 3. Download the page's assets when any were returned
/// 4. Send the metadata, if any, on `results`
/// 5. `InFlight -> Succeeded`, or `InFlight -> Failed` if step 2 failed
///
/// `results` is consumed so the sender is released as soon as this returns.
pub async fn dispatch(
    fetcher: Fetcher,
    target: Target,
    results: mpsc::Sender<Metadata>,
) -> TargetState {
    let mut state = TargetState::Pending;
    advance(&mut state, TargetState::InFlight, &target);

    let page = match fetcher.fetch(&target).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Error while fetching {}: {}", target.url(), e);
            advance(&mut state, TargetState::Failed, &target);
            return state;
        }
    };

    tracing::info!(
        "Fetched {} ({} bytes) in {:?}",
        target.url(),
        page.body.len(),
        page.elapsed
    );

    if !page.image_sources.is_empty() {
        let report = fetcher
            .retrieve_assets(target.url(), &page.image_sources)
            .await;
        tracing::info!(
            "Assets for {}: {} fetched, {} failed, {} skipped",
            target.url(),
            report.fetched,
            report.failed,
            report.skipped
        );
    }

    if let Some(metadata) = page.metadata {
        if results.send(metadata).await.is_err() {
            tracing::warn!("Result channel closed, dropping metadata for {}", target.url());
        }
    }

    advance(&mut state, TargetState::Succeeded, &target);
    state
}

fn advance(state: &mut TargetState, next: TargetState, target: &Target) {
    if !state.can_transition_to(next) {
        tracing::warn!(
            "Invalid state transition for {}: {} -> {}",
            target.url(),
            state,
            next
        );
    }
    tracing::trace!("{}: {} -> {}", target.url(), state, next);
    *state = next;
}
