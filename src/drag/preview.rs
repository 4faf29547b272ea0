use std::fmt;
use tracing::trace;

/// Host-side artifact shown under the pointer while a task is dragged
pub trait DragPreview {
    /// Removes the artifact from the host.
    ///
    /// Returns `false` when the host had already discarded it.
    fn release(&mut self) -> bool;
}

/// Owns a drag preview for the lifetime of a drag session.
///
/// The preview is released at most once: on an explicit [`release`] or,
/// failing that, when the guard is dropped.
///
/// [`release`]: PreviewGuard::release
#[derive(Default)]
pub struct PreviewGuard {
    preview: Option<Box<dyn DragPreview>>,
}

impl PreviewGuard {
    pub fn new(preview: Box<dyn DragPreview>) -> Self {
        Self {
            preview: Some(preview),
        }
    }

    /// A guard holding nothing, for hosts that render no preview
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.preview.is_some()
    }

    pub fn release(&mut self) {
        if let Some(mut preview) = self.preview.take() {
            if !preview.release() {
                trace!("drag preview was already removed by the host");
            }
        }
    }
}

impl From<Option<Box<dyn DragPreview>>> for PreviewGuard {
    fn from(preview: Option<Box<dyn DragPreview>>) -> Self {
        Self { preview }
    }
}

impl Drop for PreviewGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for PreviewGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewGuard")
            .field("held", &self.is_held())
            .finish()
    }
}
