//! Collaborator seam
//!
//! The engine never generates proposals itself. For each element kind it
//! hands a [`ProposalRequest`] to a [`Proposer`] and treats the returned text
//! as untrusted input for the normalizer.

use modelver_core::{Element, ElementKind, ExError, ExErrorKind, ModelKind, ProposalShape};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Everything a collaborator may look at when proposing one collection
#[derive(Debug, Clone, Copy)]
pub struct ProposalRequest<'a> {
    pub model: ModelKind,
    pub element_kind: ElementKind,
    /// The collection as stored in the baseline snapshot
    pub baseline: &'a [Element],
    pub change_request: &'a str,
    /// Collections already finalized earlier in this cycle, in order
    pub context: &'a [(ElementKind, Vec<Element>)],
}

impl<'a> ProposalRequest<'a> {
    /// Finalized elements of an earlier kind, if it was already merged
    pub fn context_for(&self, kind: ElementKind) -> Option<&'a [Element]> {
        self.context
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, elements)| elements.as_slice())
    }

    /// Plain-text instructions describing the request and the answer format
    ///
    /// Collaborators backed by a text generator can send this verbatim.
    pub fn render_instructions(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Model: {}\n", self.model.title()));
        out.push_str(&format!("Collection: {}\n", self.element_kind.title()));
        out.push_str(&format!(
            "\nChange request:\n{}\n",
            self.change_request.trim()
        ));

        for (kind, elements) in self.context {
            out.push_str(&format!("\nFinalized {}:\n", kind.title()));
            push_lines(&mut out, elements);
        }

        out.push_str(&format!("\nCurrent {}:\n", self.element_kind.title()));
        push_lines(&mut out, self.baseline);

        out.push_str("\nAnswer with exactly one ```RESULT fenced block.\n");
        match self.element_kind.expected_shape() {
            ProposalShape::Delta => out.push_str(
                "Inside it list changes under `Added:`, `Deleted:` and `Modified:` labels, \
                 one element per line; write modifications as `old => new`.\n",
            ),
            ProposalShape::Replacement => out.push_str(
                "Inside it list the complete new collection, one element per line.\n",
            ),
        }
        out
    }
}

fn push_lines(out: &mut String, elements: &[Element]) {
    if elements.is_empty() {
        out.push_str("(none)\n");
    }
    for element in elements {
        out.push_str(&format!("{}\n", element));
    }
}

/// External collaborator that proposes changes for one collection
///
/// Implementations may block for as long as they need; the engine applies
/// no timeout or retry. Any error aborts the whole cycle before a snapshot
/// is written.
///
/// Closures implement this trait, which keeps test stubs short:
///
/// ```
/// use modelver_core::ExError;
/// use modelver_engine::{ProposalRequest, Proposer};
///
/// let mut stub = |_req: &ProposalRequest<'_>| -> Result<String, ExError> {
///     Ok(String::from("```RESULT\nOrder\n```"))
/// };
/// # fn takes<P: Proposer>(_p: &mut P) {}
/// takes(&mut stub);
/// ```
pub trait Proposer {
    /// Raw text answer for one collection
    ///
    /// The text should hold a single RESULT block but may be malformed,
    /// empty, or shaped differently than requested.
    ///
    /// # Errors
    ///
    /// Any failure to obtain an answer.
    fn propose(&mut self, request: &ProposalRequest<'_>) -> Result<String, ExError>;
}

impl<F> Proposer for F
where
    F: FnMut(&ProposalRequest<'_>) -> Result<String, ExError>,
{
    fn propose(&mut self, request: &ProposalRequest<'_>) -> Result<String, ExError> {
        self(request)
    }
}

/// Replays recorded answers from `<dir>/<collection>.txt`
///
/// A missing file is an empty answer, so the collection stays unchanged.
///
/// # Example
/// ```
/// use modelver_engine::ReplayProposer;
///
/// let replay = ReplayProposer::new("responses");
/// assert_eq!(
///     replay.response_path(modelver_core::ElementKind::Class),
///     std::path::Path::new("responses/classes.txt")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ReplayProposer {
    dir: PathBuf,
}

impl ReplayProposer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn response_path(&self, kind: ElementKind) -> PathBuf {
        self.dir.join(format!("{}.txt", kind.collection_name()))
    }
}

impl Proposer for ReplayProposer {
    fn propose(&mut self, request: &ProposalRequest<'_>) -> Result<String, ExError> {
        let path = self.response_path(request.element_kind);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no recorded response");
                Ok(String::new())
            }
            Err(e) => Err(ExError::new(ExErrorKind::Io)
                .with_op("replay_response")
                .with_element_kind(request.element_kind.to_string())
                .with_message(format!("{}: {}", path.display(), e))),
        }
    }
}
