//! Change cycle command
//!
//! One cycle turns a change request into a new snapshot:
//! 1. Resolve the latest snapshot (none means an empty baseline)
//! 2. For each element kind in dependency order, ask the proposer, normalize
//!    its answer and merge it into the baseline collection
//! 3. Write the merged model with a change record pointing at the baseline
//!
//! Nothing is written until every kind has merged, so a proposer failure or
//! an unbalanced flow leaves the store untouched.

use chrono::NaiveDate;
use modelver_core::merge::merge;
use modelver_core::normalize::BlockSource;
use modelver_core::{log_op_end, log_op_error, log_op_start};
use modelver_core::{
    normalize, Element, ElementKind, ExError, ExErrorKind, ModelContents, ModelKind, ProposalShape,
};
use modelver_core_types::CycleId;
use modelver_store::version_store::{find_latest, load};
use modelver_store::{SnapshotRef, SnapshotWriter, StoreConfig, WriteRequest};

use crate::proposer::{ProposalRequest, Proposer};

type Result<T> = std::result::Result<T, ExError>;

/// Options for a change cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleOptions {
    /// Merge everything but skip the write
    pub dry_run: bool,
    /// Snapshot date; local today when unset
    pub today: Option<NaiveDate>,
}

/// What happened to one collection during a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindReport {
    pub kind: ElementKind,
    pub added: usize,
    pub removed: usize,
    /// Proposal lines the grammar rejected
    pub dropped: usize,
    pub shape: ProposalShape,
    pub coerced: bool,
    pub source: BlockSource,
}

#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub cycle_id: CycleId,
    /// `None` for a dry run
    pub snapshot: Option<SnapshotRef>,
    pub parent: Option<SnapshotRef>,
    pub contents: ModelContents,
    pub reports: Vec<KindReport>,
}

impl CycleOutcome {
    pub fn report(&self, kind: ElementKind) -> Option<&KindReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    /// True when no collection changed
    pub fn is_noop(&self) -> bool {
        self.reports.iter().all(|r| r.added == 0 && r.removed == 0)
    }
}

/// Run one change cycle and write the result as a new snapshot
///
/// # Errors
///
/// - `ExternalService` when the proposer fails (nothing written)
/// - `FlowStructure` when the merged flow is unbalanced (nothing written)
/// - `Io`/`Serialization` for store failures
pub fn run_cycle<P>(
    config: &StoreConfig,
    model: ModelKind,
    change_request: &str,
    proposer: &mut P,
) -> Result<CycleOutcome>
where
    P: Proposer + ?Sized,
{
    run_cycle_with(config, model, change_request, proposer, CycleOptions::default())
}

/// [`run_cycle`] with explicit options
///
/// # Errors
///
/// See [`run_cycle`].
pub fn run_cycle_with<P>(
    config: &StoreConfig,
    model: ModelKind,
    change_request: &str,
    proposer: &mut P,
    options: CycleOptions,
) -> Result<CycleOutcome>
where
    P: Proposer + ?Sized,
{
    let cycle_id = CycleId::new();
    log_op_start!(
        "run_cycle",
        cycle_id = %cycle_id,
        model_kind = %model,
        dry_run = options.dry_run
    );
    let start = std::time::Instant::now();

    let result = run_cycle_impl(config, model, change_request, proposer, options, &cycle_id)
        .map_err(|e| {
            log_op_error!(
                "run_cycle",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

    log_op_end!(
        "run_cycle",
        duration_ms = start.elapsed().as_millis() as u64,
        cycle_id = %cycle_id,
        snapshot_id = %result.snapshot.as_ref().map(SnapshotRef::dir_name).unwrap_or_default(),
        elements = result.contents.total_elements()
    );

    Ok(result)
}

fn run_cycle_impl<P>(
    config: &StoreConfig,
    model: ModelKind,
    change_request: &str,
    proposer: &mut P,
    options: CycleOptions,
    cycle_id: &CycleId,
) -> Result<CycleOutcome>
where
    P: Proposer + ?Sized,
{
    let parent = find_latest(config, model)?;
    let baseline = match &parent {
        Some(snapshot) => load(snapshot)?.contents,
        None => {
            tracing::info!(model_kind = %model, "no baseline snapshot, starting empty");
            ModelContents::empty(model)
        }
    };

    let mut contents = baseline.clone();
    let mut context: Vec<(ElementKind, Vec<Element>)> = Vec::new();
    let mut reports = Vec::new();

    for &kind in model.element_kinds() {
        let base = baseline.elements(kind);
        let request = ProposalRequest {
            model,
            element_kind: kind,
            baseline: &base,
            change_request,
            context: &context,
        };

        let raw = proposer.propose(&request).map_err(|e| {
            ExError::new(ExErrorKind::ExternalService)
                .with_op("propose")
                .with_model_kind(model.to_string())
                .with_element_kind(kind.to_string())
                .with_message("collaborator failed to propose changes")
                .with_source(e)
        })?;

        let normalized = normalize(&raw, kind);
        if !normalized.dropped.is_empty() {
            tracing::warn!(
                kind = %kind,
                dropped = normalized.dropped.len(),
                "proposal lines rejected by grammar"
            );
        }

        let outcome = merge(kind, &base, &normalized.proposal)
            .map_err(|e| ExError::from(e).with_model_kind(model.to_string()))?;

        tracing::info!(
            kind = %kind,
            added = outcome.added,
            removed = outcome.removed,
            coerced = outcome.coerced,
            "merged collection"
        );

        reports.push(KindReport {
            kind,
            added: outcome.added,
            removed: outcome.removed,
            dropped: normalized.dropped.len(),
            shape: normalized.proposal.shape(),
            coerced: outcome.coerced,
            source: normalized.source,
        });
        contents.replace(kind, outcome.elements.clone())?;
        context.push((kind, outcome.elements));
    }

    let snapshot = if options.dry_run {
        None
    } else {
        let writer = SnapshotWriter::new(config);
        let request = WriteRequest {
            contents: &contents,
            change_request,
            parent: parent.as_ref(),
            cycle_id: Some(cycle_id),
        };
        Some(match options.today {
            Some(today) => writer.write_on(today, request)?,
            None => writer.write(request)?,
        })
    };

    Ok(CycleOutcome {
        cycle_id: cycle_id.clone(),
        snapshot,
        parent,
        contents,
        reports,
    })
}
