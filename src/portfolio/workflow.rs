use std::fmt;
use tracing::{info, warn};

use crate::api::PortfolioBackend;
use crate::error::ClientError;
use crate::portfolio::form::{FormMode, PortfolioForm};
use crate::portfolio::reorder::ImageReorder;
use crate::portfolio::uploader::ImageUploader;

/// Steps of a full edit save, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    SaveInfo,
    UploadImages,
    SaveOrder,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::SaveInfo, Step::UploadImages, Step::SaveOrder];

    fn index(self) -> usize {
        match self {
            Self::SaveInfo => 0,
            Self::UploadImages => 1,
            Self::SaveOrder => 2,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SaveInfo => "simpan info",
            Self::UploadImages => "upload gambar",
            Self::SaveOrder => "simpan urutan",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepState {
    Pending,
    Done,
    /// Nothing to do (no queued images, order unchanged).
    Skipped,
    Failed(String),
}

impl StepState {
    fn is_finished(&self) -> bool {
        matches!(self, Self::Done | Self::Skipped)
    }
}

/// A step that failed, with the error that stopped the run.
#[derive(Debug)]
pub struct StepFailure {
    pub step: Step,
    pub error: ClientError,
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gagal {}: {}", self.step, self.error)
    }
}

/// Tracks the three independent requests of an edit save so a failed step
/// can be retried without repeating the ones that already went through.
#[derive(Debug, Clone)]
pub struct EditWorkflow {
    portfolio_id: u64,
    states: [StepState; 3],
}

impl EditWorkflow {
    pub fn new(portfolio_id: u64) -> Self {
        Self {
            portfolio_id,
            states: [StepState::Pending, StepState::Pending, StepState::Pending],
        }
    }

    pub fn portfolio_id(&self) -> u64 {
        self.portfolio_id
    }

    pub fn state(&self, step: Step) -> &StepState {
        &self.states[step.index()]
    }

    fn set(&mut self, step: Step, state: StepState) {
        self.states[step.index()] = state;
    }

    pub fn is_complete(&self) -> bool {
        self.states.iter().all(StepState::is_finished)
    }

    /// Forget progress, e.g. after the entry was re-fetched.
    pub fn reset(&mut self) {
        self.states = [StepState::Pending, StepState::Pending, StepState::Pending];
    }

    /// Run every unfinished step in order, stopping at the first failure.
    ///
    /// Calling `run` again after a failure resumes at the failed step.
    /// Uploaded files leave `uploader` only once the upload succeeded, and
    /// `reorder` is marked saved only once the order request succeeded.
    pub async fn run<B: PortfolioBackend>(
        &mut self,
        backend: &B,
        form: &PortfolioForm,
        uploader: &mut ImageUploader,
        reorder: &mut ImageReorder,
    ) -> Result<(), StepFailure> {
        for step in Step::ALL {
            if self.state(step).is_finished() {
                continue;
            }

            let outcome = match step {
                Step::SaveInfo => self.save_info(backend, form).await,
                Step::UploadImages if uploader.is_empty() => Ok(StepState::Skipped),
                Step::UploadImages => backend
                    .upload_images(self.portfolio_id, uploader.files())
                    .await
                    .map(|()| {
                        uploader.clear();
                        StepState::Done
                    }),
                Step::SaveOrder if !reorder.is_dirty() => Ok(StepState::Skipped),
                Step::SaveOrder => backend
                    .reorder_images(&reorder.order_request())
                    .await
                    .map(|()| {
                        reorder.mark_saved();
                        StepState::Done
                    }),
            };

            match outcome {
                Ok(state) => {
                    info!("Portfolio {} step '{step}': {state:?}", self.portfolio_id);
                    self.set(step, state);
                }
                Err(error) => {
                    warn!("Portfolio {} step '{step}' failed: {error}", self.portfolio_id);
                    self.set(step, StepState::Failed(error.to_string()));
                    return Err(StepFailure { step, error });
                }
            }
        }
        Ok(())
    }

    async fn save_info<B: PortfolioBackend>(
        &self,
        backend: &B,
        form: &PortfolioForm,
    ) -> Result<StepState, ClientError> {
        let valid = form.validate(FormMode::Edit, 0)?;
        backend
            .update_portfolio(self.portfolio_id, valid.to_payload())
            .await?;
        Ok(StepState::Done)
    }
}
