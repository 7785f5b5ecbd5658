//! Content-based MIME type detection.
//!
//! [`MimeDetection`] holds an append-only registry of
//! [`SignatureDefinition`]s and evaluates all of them against a buffer:
//!
//! 1. Every definition is evaluated independently (in parallel by default).
//!    A panic while evaluating one definition counts as "nothing matched"
//!    for that definition only.
//! 2. Definitions that matched nothing are dropped.
//! 3. The remaining results are ranked (magic, then members, then pattern)
//!    and every result tied at the best rank is returned in registration
//!    order.
//!
//! ```rust
//! use mimesniff::MimeDetection;
//!
//! let detection = MimeDetection::new();
//! let found = detection.detect(&[0xff, 0xd8, 0xff, 0xe0]);
//! assert_eq!(found[0].subtype, "jpeg");
//! assert!(detection.detect(&[]).is_empty());
//! ```

pub mod archive;
pub mod matchers;
pub mod priority;

use crate::common::unique_by;
use crate::config::ParallelConfig;
use crate::definitions::{builtin_definitions, SignatureDefinition};
use crate::mime::Mime;
use archive::{ArchiveReader, ZipReader};
use matchers::{match_magic, match_pattern, ArchiveProbe};
use parking_lot::RwLock;
use priority::select_best;
use rayon::prelude::*;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, debug_span, warn};

pub use priority::FacetMatch;

/// Facet results for one definition.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub facets: FacetMatch,
    pub definition: SignatureDefinition,
}

/// Detection engine over a registry of signature definitions.
pub struct MimeDetection {
    definitions: RwLock<Arc<Vec<SignatureDefinition>>>,
    archive_reader: Arc<dyn ArchiveReader>,
    parallel: ParallelConfig,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Default for MimeDetection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MimeDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MimeDetection")
            .field("definitions", &self.len())
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl MimeDetection {
    /// Engine with the built-in definitions.
    pub fn new() -> Self {
        Self::from_definitions(builtin_definitions())
    }

    /// Engine with the built-in definitions followed by `definitions`.
    pub fn with_definitions(definitions: impl IntoIterator<Item = SignatureDefinition>) -> Self {
        let engine = Self::new();
        engine.add_definitions(definitions);
        engine
    }

    /// Engine with exactly `definitions`, no built-ins.
    pub fn from_definitions(definitions: Vec<SignatureDefinition>) -> Self {
        Self {
            definitions: RwLock::new(Arc::new(definitions)),
            archive_reader: Arc::new(ZipReader),
            parallel: ParallelConfig::default(),
            pool: None,
        }
    }

    /// Use `parallel` for evaluation.
    ///
    /// A `max_concurrency` limit gets a dedicated thread pool; if that pool
    /// cannot be created the global rayon pool is used instead.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.pool = match parallel.max_concurrency {
            Some(threads) if parallel.enabled => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => Some(Arc::new(pool)),
                    Err(e) => {
                        warn!(threads, error = %e, "Failed to build detection thread pool");
                        None
                    }
                }
            }
            _ => None,
        };
        self.parallel = parallel;
        self
    }

    pub fn parallel(&self) -> &ParallelConfig {
        &self.parallel
    }

    /// Replace the container reader used by member facets.
    #[must_use]
    pub fn with_archive_reader(mut self, reader: Arc<dyn ArchiveReader>) -> Self {
        self.archive_reader = reader;
        self
    }

    /// Append definitions to the registry.
    ///
    /// No deduplication; new entries become additional candidates after the
    /// existing ones. Detections already running keep their snapshot.
    pub fn add_definitions(&self, definitions: impl IntoIterator<Item = SignatureDefinition>) {
        let mut registry = self.definitions.write();
        let mut next = Vec::clone(&registry);
        next.extend(definitions);
        debug!(total = next.len(), "Definitions registered");
        *registry = Arc::new(next);
    }

    /// Current registry snapshot, in registration order.
    pub fn definitions(&self) -> Arc<Vec<SignatureDefinition>> {
        Arc::clone(&self.definitions.read())
    }

    pub fn len(&self) -> usize {
        self.definitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Definitions tied at the best priority for `buffer`.
    ///
    /// Never fails; an empty buffer or one matching nothing gives an empty
    /// list. Definitions sharing a type/subtype may all be returned.
    pub fn detect(&self, buffer: &[u8]) -> Vec<SignatureDefinition> {
        let results = self
            .evaluate(buffer)
            .into_iter()
            .map(|result| (result.facets, result.definition))
            .collect();
        select_best(results)
    }

    /// Facet results of every registered definition, in registration order.
    ///
    /// Empty for an empty buffer.
    pub fn evaluate(&self, buffer: &[u8]) -> Vec<DetectionResult> {
        let snapshot = self.definitions();
        if buffer.is_empty() {
            return Vec::new();
        }

        let _span = debug_span!(
            "detect",
            bytes = buffer.len(),
            definitions = snapshot.len()
        )
        .entered();

        let probe = ArchiveProbe::new(buffer, self.archive_reader.as_ref());
        let facets = self.evaluate_all(buffer, &snapshot, &probe);

        snapshot
            .iter()
            .zip(facets)
            .map(|(definition, facets)| DetectionResult {
                facets,
                definition: definition.clone(),
            })
            .collect()
    }

    fn evaluate_all(
        &self,
        buffer: &[u8],
        definitions: &[SignatureDefinition],
        probe: &ArchiveProbe<'_>,
    ) -> Vec<FacetMatch> {
        let evaluate = |definition: &SignatureDefinition| evaluate_isolated(buffer, definition, probe);

        if !self.parallel.enabled {
            return definitions.iter().map(evaluate).collect();
        }
        // indexed collect keeps registration order
        match &self.pool {
            Some(pool) => pool.install(|| definitions.par_iter().map(evaluate).collect()),
            None => definitions.par_iter().map(evaluate).collect(),
        }
    }

    /// Every registered type, deduplicated by canonical form.
    ///
    /// Includes definitions without facets, which are never detected.
    pub fn known_types(&self) -> Vec<Mime> {
        let mimes = self.definitions().iter().map(Mime::from).collect::<Vec<_>>();
        unique_by(mimes, |mime| mime.to_string())
    }
}

/// Evaluate the declared facets of `definition`; undeclared facets are false.
pub fn evaluate_definition(
    buffer: &[u8],
    definition: &SignatureDefinition,
    probe: &ArchiveProbe<'_>,
) -> FacetMatch {
    FacetMatch {
        magic: definition
            .magic
            .as_ref()
            .is_some_and(|magic| match_magic(buffer, magic)),
        members: definition
            .members
            .as_ref()
            .is_some_and(|members| probe.contains_all(members)),
        pattern: definition
            .pattern
            .as_ref()
            .is_some_and(|pattern| match_pattern(buffer, pattern)),
    }
}

/// [`evaluate_definition`] with panics downgraded to [`FacetMatch::NONE`].
fn evaluate_isolated(
    buffer: &[u8],
    definition: &SignatureDefinition,
    probe: &ArchiveProbe<'_>,
) -> FacetMatch {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        evaluate_definition(buffer, definition, probe)
    }));

    match result {
        Ok(facets) => facets,
        Err(payload) => {
            warn!(
                definition = %definition.label(),
                reason = %panic_message(payload.as_ref()),
                "Definition evaluation panicked, treating as no match"
            );
            FacetMatch::NONE
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
