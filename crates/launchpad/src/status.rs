//! Deployment status reporting
//!
//! A [`DeploymentSession`] owns the token form and the current
//! [`DeploymentStatus`]. Status changes are published on a watch channel so a
//! front end can render progress while the launch is running.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::ChainClient;
use crate::constants::{PROGRESS_CEILING, PROGRESS_STEP, PROGRESS_TICK_MS};
use crate::creator::TokenLauncher;
use crate::error::{LaunchError, LaunchResult};
use crate::types::{DeploymentResult, TokenMetadata};
use crate::wallet::WalletSigner;

/// Deployment lifecycle: idle, deploying, then success or error
#[derive(Debug, Clone, PartialEq)]
pub enum DeploymentStatus {
    Idle,
    /// Launch running. Progress is cosmetic and stops at 90 until the outcome arrives.
    Deploying { progress: u8 },
    Success(DeploymentResult),
    Error { message: String },
}

impl DeploymentStatus {
    pub fn progress(&self) -> u8 {
        match self {
            DeploymentStatus::Idle => 0,
            DeploymentStatus::Deploying { progress } => *progress,
            DeploymentStatus::Success(_) => 100,
            DeploymentStatus::Error { .. } => 0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeploymentStatus::Idle => "idle",
            DeploymentStatus::Deploying { .. } => "deploying",
            DeploymentStatus::Success(_) => "success",
            DeploymentStatus::Error { .. } => "error",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DeploymentStatus::Idle)
    }

    pub fn is_deploying(&self) -> bool {
        matches!(self, DeploymentStatus::Deploying { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::Success(_) | DeploymentStatus::Error { .. }
        )
    }
}

/// One token form and the status of its launch
pub struct DeploymentSession {
    metadata: TokenMetadata,
    status: watch::Sender<DeploymentStatus>,
}

impl Default for DeploymentSession {
    fn default() -> Self {
        Self::new(TokenMetadata::default())
    }
}

impl DeploymentSession {
    pub fn new(metadata: TokenMetadata) -> Self {
        let (status, _) = watch::channel(DeploymentStatus::Idle);
        Self { metadata, status }
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Edit the form values
    pub fn update_metadata(&mut self, edit: impl FnOnce(&mut TokenMetadata)) {
        edit(&mut self.metadata);
    }

    /// Snapshot of the current status
    pub fn status(&self) -> DeploymentStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status change, including progress ticks
    pub fn subscribe(&self) -> watch::Receiver<DeploymentStatus> {
        self.status.subscribe()
    }

    /// Launch the token described by the form.
    ///
    /// Only allowed from idle. The final status is success or error; the
    /// returned value carries the same outcome.
    pub async fn deploy<C, W>(
        &mut self,
        launcher: &TokenLauncher<C>,
        wallet: &W,
    ) -> LaunchResult<DeploymentResult>
    where
        C: ChainClient + ?Sized,
        W: WalletSigner + ?Sized,
    {
        if !self.status.borrow().is_idle() {
            return Err(LaunchError::DeploymentInProgress);
        }

        info!(name = %self.metadata.name, symbol = %self.metadata.symbol, "starting token deployment");
        self.status.send_replace(DeploymentStatus::Deploying { progress: 0 });

        let pipeline = launcher.create_token(wallet, &self.metadata);
        tokio::pin!(pipeline);

        let mut ticker = tokio::time::interval(Duration::from_millis(PROGRESS_TICK_MS));
        // First tick completes immediately
        ticker.tick().await;

        let outcome = loop {
            tokio::select! {
                result = &mut pipeline => break result,
                _ = ticker.tick() => advance_progress(&self.status),
            }
        };

        match &outcome {
            Ok(result) => {
                self.status.send_replace(DeploymentStatus::Success(result.clone()));
            }
            Err(err) => {
                warn!(error = %err, "token deployment failed");
                self.status.send_replace(DeploymentStatus::Error {
                    message: err.to_string(),
                });
            }
        }

        outcome
    }

    /// Back to idle after a finished launch, keeping the form as is
    pub fn retry(&mut self) -> bool {
        if !self.status.borrow().is_terminal() {
            return false;
        }
        self.status.send_replace(DeploymentStatus::Idle);
        true
    }

    /// Back to idle with a fresh default form
    pub fn create_another(&mut self) -> bool {
        if self.status.borrow().is_deploying() {
            return false;
        }
        self.metadata = TokenMetadata::default();
        self.status.send_replace(DeploymentStatus::Idle);
        true
    }
}

fn advance_progress(status: &watch::Sender<DeploymentStatus>) {
    status.send_if_modified(|current| match current {
        DeploymentStatus::Deploying { progress }
            if *progress + PROGRESS_STEP <= PROGRESS_CEILING =>
        {
            *progress += PROGRESS_STEP;
            true
        }
        _ => false,
    });
}
