//! Best-effort image display.

use std::path::Path;

use grabshot_core::tools::VIEWERS;
use tracing::{info, warn};

use crate::notify;
use crate::system::{Context, Invocation};

/// Open `file` in the first installed viewer, detached from this process.
///
/// Never fails: problems are downgraded to a warning notification.
pub fn display(ctx: &Context, file: &Path) {
    let Some(viewer) = ctx.locator.first_available(&VIEWERS) else {
        warn!("No image viewer found (tried {})", VIEWERS.join(", "));
        notify::error(
            ctx,
            "No image viewer found",
            &format!("Install one of: {}", VIEWERS.join(", ")),
        );
        return;
    };

    match ctx
        .runner
        .spawn_detached(&Invocation::new(viewer).arg(file))
    {
        Ok(()) => info!("Opened {} in {}", file.display(), viewer),
        Err(e) => {
            warn!("Failed to start {}: {}", viewer, e);
            notify::error(
                ctx,
                "Could not open screenshot",
                &format!("{} failed to start: {}", viewer, e),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::FakeRunner;
    use grabshot_core::tools::FixedLocator;
    use grabshot_core::Environment;

    #[test]
    fn test_first_viewer_in_priority_order_is_detached() {
        let env = Environment::default();
        let locator = FixedLocator::new(["gwenview", "eog"]);
        let runner = FakeRunner::default();
        let ctx = Context::new(&env, &locator, &runner);

        display(&ctx, Path::new("/tmp/shot.png"));

        let detached = runner.detached.borrow();
        assert_eq!(detached.len(), 1);
        assert_eq!(detached[0].program, "eog");
        assert_eq!(detached[0].arg_str(0).as_deref(), Some("/tmp/shot.png"));
        assert!(runner.runs.borrow().is_empty());
    }

    #[test]
    fn test_viewer_spawn_failure_is_a_warning() {
        let env = Environment::default();
        let locator = FixedLocator::new(["feh"]);
        let runner = FakeRunner::default().failing_detach(std::io::ErrorKind::PermissionDenied);
        let ctx = Context::new(&env, &locator, &runner);

        display(&ctx, Path::new("/tmp/shot.png"));

        assert_eq!(runner.detached.borrow().len(), 1);
        let notes = runner.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, "Could not open screenshot");
        assert!(notes[0].1.contains("feh failed to start"), "{}", notes[0].1);
    }

    #[test]
    fn test_no_viewer_sends_single_warning() {
        let env = Environment::default();
        let locator = FixedLocator::default();
        let runner = FakeRunner::default();
        let ctx = Context::new(&env, &locator, &runner);

        display(&ctx, Path::new("/tmp/shot.png"));

        assert!(runner.detached.borrow().is_empty());
        let notes = runner.notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].0, "No image viewer found");
    }
}
