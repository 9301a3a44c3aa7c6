use futures::{future::BoxFuture, FutureExt};

use crate::tui::PointerCapture;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("the terminal is not reporting mouse events")]
    PointerUnavailable,
}

/// Whatever has to be up before a live region may receive pointer and timer
/// driven behaviour. Starting may suspend; it must never take the page down.
pub trait BehaviorRuntime: Send + Sync {
    fn start(&self) -> BoxFuture<'static, Result<(), RuntimeError>>;
}

/// Ready once the terminal reports mouse events. Capture itself belongs to
/// the terminal, this only gates the live gallery on it.
#[derive(Debug, Clone)]
pub struct PointerRuntime {
    capture: PointerCapture,
}

impl PointerRuntime {
    pub fn new(capture: PointerCapture) -> Self {
        Self { capture }
    }
}

impl BehaviorRuntime for PointerRuntime {
    fn start(&self) -> BoxFuture<'static, Result<(), RuntimeError>> {
        let enabled = self.capture.is_enabled();
        async move {
            if enabled {
                Ok(())
            } else {
                Err(RuntimeError::PointerUnavailable)
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fails_without_mouse_capture() {
        let runtime = PointerRuntime::new(PointerCapture::default());

        let result = runtime.start().await;

        assert!(matches!(result, Err(RuntimeError::PointerUnavailable)));
    }

    #[tokio::test]
    async fn starts_once_capture_is_on() {
        let capture = PointerCapture::default();
        let runtime = PointerRuntime::new(capture.clone());

        capture.set(true);

        assert!(runtime.start().await.is_ok());
    }
}
