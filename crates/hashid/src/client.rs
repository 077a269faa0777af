use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{ClientConfig, ClientKind};
use crate::error::IdError;
use crate::id;
use crate::observed::ObservedIds;
use crate::retry::{self, Allocation, CandidateSource, RETRY_LIMIT, TimeOrderedUuids};
use crate::types::{IdFamily, MutationKey};
use crate::validate::{ShapeValidator, Validator};

/// Operations every identifier client provides.
///
/// `get_*` may return `None` for implementations that only look up ids that
/// already exist; `create_*` turns that into [`IdError::Missing`].
pub trait IdClient: Send + Sync {
    fn get_donor_id(&self, submitted_donor_id: &str, project_id: &str)
    -> Result<Option<String>, IdError>;

    fn get_specimen_id(
        &self,
        submitted_specimen_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError>;

    fn get_sample_id(
        &self,
        submitted_sample_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError>;

    fn get_file_id(&self, submitted_file_id: &str, project_id: &str)
    -> Result<Option<String>, IdError>;

    fn get_mutation_id(&self, key: &MutationKey) -> Result<Option<String>, IdError>;

    fn get_object_id(&self, analysis_id: &str, file_name: &str)
    -> Result<Option<String>, IdError>;

    fn get_analysis_id(&self, submitted_analysis_id: &str) -> Result<Option<String>, IdError>;

    fn create_analysis_id(&self, submitted_analysis_id: &str) -> Result<String, IdError>;

    /// A random analysis id not observed by this client. Does not reserve it.
    fn generate_unique_analysis_id(&self) -> Result<String, IdError>;

    /// A random analysis id, reserved immediately when the client persists.
    fn create_random_analysis_id(&self) -> Result<String, IdError>;

    fn close(&self) -> Result<(), IdError> {
        Ok(())
    }

    fn create_donor_id(&self, submitted_donor_id: &str, project_id: &str) -> Result<String, IdError> {
        self.get_donor_id(submitted_donor_id, project_id)?
            .ok_or(IdError::Missing(IdFamily::Donor))
    }

    fn create_specimen_id(
        &self,
        submitted_specimen_id: &str,
        project_id: &str,
    ) -> Result<String, IdError> {
        self.get_specimen_id(submitted_specimen_id, project_id)?
            .ok_or(IdError::Missing(IdFamily::Specimen))
    }

    fn create_sample_id(&self, submitted_sample_id: &str, project_id: &str) -> Result<String, IdError> {
        self.get_sample_id(submitted_sample_id, project_id)?
            .ok_or(IdError::Missing(IdFamily::Sample))
    }

    fn create_file_id(&self, submitted_file_id: &str, project_id: &str) -> Result<String, IdError> {
        self.get_file_id(submitted_file_id, project_id)?
            .ok_or(IdError::Missing(IdFamily::File))
    }

    fn create_mutation_id(&self, key: &MutationKey) -> Result<String, IdError> {
        self.get_mutation_id(key)?
            .ok_or(IdError::Missing(IdFamily::Mutation))
    }

    fn create_object_id(&self, analysis_id: &str, file_name: &str) -> Result<String, IdError> {
        self.get_object_id(analysis_id, file_name)?
            .ok_or(IdError::Missing(IdFamily::Object))
    }
}

/// Builds the client selected by `config`.
pub fn connect(config: &ClientConfig) -> Result<Box<dyn IdClient>, IdError> {
    match config.kind {
        ClientKind::Hash => Ok(Box::new(HashIdClient::from_config(config))),
        ClientKind::Remote => Err(IdError::Config(
            "remote identifier client is not available in this build".to_string(),
        )),
    }
}

/// Derives ids from their business keys; needs no storage.
///
/// Analysis ids are the exception: they are either caller-chosen or random,
/// and the only record of them is the in-process [`ObservedIds`] set, which is
/// written only when the client was built to persist.
pub struct HashIdClient {
    persist: bool,
    observed: Arc<ObservedIds>,
    validator: Box<dyn Validator>,
    source: Box<dyn CandidateSource>,
}

impl Default for HashIdClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HashIdClient {
    pub fn new() -> Self {
        Self::with_observed(Arc::new(ObservedIds::new()), false)
    }

    pub fn persistent() -> Self {
        Self::with_observed(Arc::new(ObservedIds::new()), true)
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_observed(Arc::new(ObservedIds::new()), config.persist)
    }

    /// Uses `observed` as the observation set, e.g. one shared with another
    /// client or seeded with known ids.
    pub fn with_observed(observed: Arc<ObservedIds>, persist: bool) -> Self {
        HashIdClient {
            persist,
            observed,
            validator: Box::new(ShapeValidator),
            source: Box::new(TimeOrderedUuids),
        }
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_source(mut self, source: impl CandidateSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    pub fn observed(&self) -> &Arc<ObservedIds> {
        &self.observed
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    fn derived(&self, family: IdFamily, keys: &[&str]) -> Result<Option<String>, IdError> {
        let issued = id::prefixed(family, keys);
        debug!(%family, id = %issued, "derived id");
        Ok(Some(issued))
    }
}

impl IdClient for HashIdClient {
    fn get_donor_id(
        &self,
        submitted_donor_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError> {
        self.derived(IdFamily::Donor, &[submitted_donor_id, project_id])
    }

    fn get_specimen_id(
        &self,
        submitted_specimen_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError> {
        self.derived(IdFamily::Specimen, &[submitted_specimen_id, project_id])
    }

    fn get_sample_id(
        &self,
        submitted_sample_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError> {
        self.derived(IdFamily::Sample, &[submitted_sample_id, project_id])
    }

    fn get_file_id(
        &self,
        submitted_file_id: &str,
        project_id: &str,
    ) -> Result<Option<String>, IdError> {
        self.derived(IdFamily::File, &[submitted_file_id, project_id])
    }

    fn get_mutation_id(&self, key: &MutationKey) -> Result<Option<String>, IdError> {
        self.derived(IdFamily::Mutation, &key.keys())
    }

    fn get_object_id(
        &self,
        analysis_id: &str,
        file_name: &str,
    ) -> Result<Option<String>, IdError> {
        let issued = id::object_id(analysis_id, file_name);
        debug!(family = %IdFamily::Object, id = %issued, "derived id");
        Ok(Some(issued))
    }

    fn get_analysis_id(&self, submitted_analysis_id: &str) -> Result<Option<String>, IdError> {
        self.validator.validate_analysis_id(submitted_analysis_id)?;
        if self.observed.contains(submitted_analysis_id) {
            Ok(Some(submitted_analysis_id.to_string()))
        } else {
            Ok(None)
        }
    }

    fn create_analysis_id(&self, submitted_analysis_id: &str) -> Result<String, IdError> {
        if submitted_analysis_id.is_empty() {
            return Err(IdError::Precondition(
                "failed to create analysis id: submitted analysis id is empty".to_string(),
            ));
        }
        self.validator.validate_analysis_id(submitted_analysis_id)?;
        if self.persist {
            self.observed.insert(submitted_analysis_id);
        }
        debug!(id = submitted_analysis_id, persisted = self.persist, "accepted analysis id");
        Ok(submitted_analysis_id.to_string())
    }

    fn generate_unique_analysis_id(&self) -> Result<String, IdError> {
        match retry::allocate(&*self.source, |c| self.observed.contains(c), RETRY_LIMIT) {
            Allocation::Fresh { id, attempts } => {
                self.validator.validate_uuid(&id)?;
                debug!(%id, attempts, "generated unique analysis id");
                Ok(id)
            }
            Allocation::Exhausted { attempts } => {
                warn!(attempts, "no unique analysis id found");
                Err(IdError::RetryExhausted { limit: RETRY_LIMIT })
            }
        }
    }

    fn create_random_analysis_id(&self) -> Result<String, IdError> {
        let id = self.source.next_candidate();
        self.validator.validate_uuid(&id)?;
        if self.persist {
            self.observed.insert(&id);
        }
        debug!(%id, persisted = self.persist, "created random analysis id");
        Ok(id)
    }
}
