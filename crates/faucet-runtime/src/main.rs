//! # Thanks Faucet Runtime
//!
//! Runs the faucet against a local in-memory network.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Install tracing
//! 3. Provision the feedback channel and a demo wallet
//! 4. Authorise the application
//! 5. Serve one submission per stdin line until EOF
//!
//! Ctrl-C cancels the submission in flight; remaining stages are skipped
//! and nothing already written is undone.

use anyhow::{Context, Result};
use fc_05_orchestrator::{cancellation, FaucetApi, FaucetError};
use faucet_runtime::{
    logging, FaucetContainer, RuntimeConfig, Sandbox, SubmissionOutcome, SubmissionRequest,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::from_env();
    logging::init_tracing(&config)?;

    info!("===========================================");
    info!("  Thanks Faucet v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let sandbox = Sandbox::new(config.faucet.clone());
    sandbox
        .provision_feedback_channel()
        .context("Failed to provision feedback channel")?;
    let wallet = sandbox.provision_wallet();
    info!(wallet_key = %wallet.wallet_key, inbox = %wallet.inbox, "Demo wallet ready");
    println!("{}", wallet.wallet_key);

    let container = FaucetContainer::bootstrap(config, sandbox.network())
        .await
        .context("Authorisation failed")?;

    // One orchestrator per page load; a transferred reward stays claimed
    // until the page is reloaded.
    let mut orchestrator = container.orchestrator();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "reload" {
            orchestrator = container.orchestrator();
            info!("Page reloaded");
            continue;
        }

        let request = match SubmissionRequest::parse(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Unreadable submission line");
                println!("{}", SubmissionOutcome::rejected(orchestrator.status(), e.to_string()).to_line());
                continue;
            }
        };
        let submission = request.into_submission();
        let submission_id = submission.submission_id;

        let (handle, token) = cancellation::pair();
        let submit = orchestrator.submit(submission, token);
        tokio::pin!(submit);
        let result: Result<_, FaucetError> = tokio::select! {
            result = &mut submit => result,
            _ = tokio::signal::ctrl_c() => {
                warn!(%submission_id, "Interrupt received, cancelling submission");
                handle.cancel();
                submit.await
            }
        };

        println!(
            "{}",
            SubmissionOutcome::completed(submission_id, orchestrator.status(), result).to_line()
        );
    }

    info!("Input closed, shutting down");
    Ok(())
}
