//! Media service - signed uploads and asset cleanup on the image host

use linkify_core::UploadSignature;
use tracing::{instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MediaService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parameters the dashboard uses to upload an image directly
    #[instrument(skip(self))]
    pub fn upload_signature(&self) -> ServiceResult<UploadSignature> {
        Ok(self.ctx.image_store().upload_signature()?)
    }

    /// Delete a replaced or orphaned asset; failures are logged and swallowed
    pub async fn discard(&self, public_id: Option<&str>) {
        let Some(public_id) = public_id.filter(|id| !id.is_empty()) else {
            return;
        };

        if let Err(e) = self.ctx.image_store().delete(public_id).await {
            warn!(public_id = %public_id, error = %e, "Failed to delete image asset");
        }
    }

    pub async fn discard_all<I, S>(&self, public_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for public_id in public_ids {
            self.discard(Some(public_id.as_ref())).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{FakeImageStore, Harness};

    #[tokio::test]
    async fn test_discard_skips_empty_ids() {
        let h = Harness::new();
        let media = MediaService::new(&h.ctx);
        media.discard(None).await;
        media.discard(Some("")).await;
        media.discard_all(["linkify/a", "linkify/b"]).await;
        assert_eq!(h.deleted_images(), vec!["linkify/a".to_string(), "linkify/b".to_string()]);
    }

    #[tokio::test]
    async fn test_discard_swallows_failures() {
        let h = Harness::with_images(FakeImageStore { fail_deletes: true, ..Default::default() });
        MediaService::new(&h.ctx).discard(Some("linkify/a")).await;
        assert!(h.deleted_images().is_empty());
    }

    #[test]
    fn test_upload_signature_comes_from_store() {
        let h = Harness::new();
        let signature = MediaService::new(&h.ctx).upload_signature().unwrap();
        assert_eq!(signature.signature_algorithm, "sha256");
    }
}
