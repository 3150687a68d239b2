//! Scanner screen on a terminal.
//!
//! Each stdin line is one decoded QR payload (keyboard-wedge scanners type
//! the code and press Enter). Lines starting with `:` are operator
//! commands; an empty line dismisses the shown result.

use crate::AppContext;
use crate::core::camera::LineFeed;
use crate::core::scanner::{DecodeOutcome, IgnoreReason, ScanMode, ScanState, ScannerController};
use crate::errors::AppResult;
use crate::ui::messages::{error, header, info, muted, success, warning};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Scan a code, or type :mode (switch check-in/check-out), :reset, :status, :quit";

pub async fn handle(mode: ScanMode, ctx: &AppContext) -> AppResult<()> {
    let (client, session) = ctx.authed()?;
    let controller = ScannerController::new(client, LineFeed::new(), mode);

    header(format!("QR Scanner ({})", controller.mode().label()));
    muted(format!("Signed in as {}", session.identity.email));
    muted(HELP);
    controller.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let input = line.trim();

        match input {
            ":quit" | ":q" => break,
            ":mode" | ":m" => {
                let mode = controller.toggle_mode()?;
                info(format!("Mode: {}", mode.label()));
            }
            ":reset" | ":r" => {
                controller.reset()?;
                muted("Ready to scan");
            }
            ":status" | ":s" => show_status(&controller),
            ":help" | ":h" => muted(HELP),
            "" => {
                if matches!(controller.state(), ScanState::Succeeded(_) | ScanState::Failed(_)) {
                    controller.reset()?;
                    muted("Ready to scan");
                }
            }
            code => report(controller.on_decoded(code).await?),
        }
    }

    controller.shutdown()?;
    info("Scanner closed");
    Ok(())
}

fn report(outcome: DecodeOutcome) {
    match outcome {
        DecodeOutcome::Succeeded(ok) => {
            success(format!("{}: {}", ok.member_id, ok.message()));
            if ok.mode == ScanMode::CheckIn {
                muted("Press Enter to scan another");
            }
        }
        DecodeOutcome::Failed(failure) => {
            error(failure);
            muted("Press Enter to try again");
        }
        DecodeOutcome::Ignored(IgnoreReason::Paused) => {
            warning("Scanner paused: press Enter to scan again");
        }
        DecodeOutcome::Ignored(IgnoreReason::Cooldown) => muted("Too soon, scan again"),
        DecodeOutcome::Ignored(IgnoreReason::Busy) => muted("Still processing the previous scan"),
        DecodeOutcome::Ignored(IgnoreReason::Empty) => {}
    }
}

fn show_status<B, C>(controller: &ScannerController<B, C>)
where
    B: crate::core::scanner::CheckinBackend,
    C: crate::core::scanner::CameraFeed,
{
    let snap = controller.snapshot();
    let state = match &snap.state {
        ScanState::Scanning => "scanning".to_string(),
        ScanState::Processing => "processing".to_string(),
        ScanState::Succeeded(ok) => format!("done: {}", ok.message()),
        ScanState::Failed(f) => format!("error: {f}"),
    };
    info(format!(
        "Mode: {} | State: {} | Last code: {}",
        controller.mode().label(),
        state,
        snap.last_result.as_deref().unwrap_or("-")
    ));
}
