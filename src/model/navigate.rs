//! Navigation between related entities.
//!
//! Each method issues a fresh query filtered by the owning identifier and
//! takes the [`ApiClient`] explicitly. Nothing is cached: calling a
//! navigation method twice performs two round trips.

use crate::client::paginate::CursorPages;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::model::{FileReference, Image, ImageRepresentation, RepresentationFormat, Study};

impl Study {
    /// Look up a study by accession id.
    ///
    /// Returns `Ok(None)` when no study matches.
    pub fn by_accession(client: &ApiClient, accession_id: &str) -> Result<Option<Study>, ApiError> {
        client.study_by_accession(accession_id)
    }

    /// Iterate over every image of this study.
    pub fn images<'c>(
        &self,
        client: &'c ApiClient,
    ) -> CursorPages<Image, impl FnMut(Option<&str>, usize) -> Result<Vec<Image>, ApiError> + 'c>
    {
        client.study_images(&self.uuid)
    }

    /// Iterate over the images of this study carrying a representation of
    /// the given format.
    pub fn images_with_representation<'c>(
        &self,
        client: &'c ApiClient,
        format: &RepresentationFormat,
    ) -> CursorPages<Image, impl FnMut(Option<&str>, usize) -> Result<Vec<Image>, ApiError> + 'c>
    {
        client.study_images_with_representation(&self.uuid, format)
    }

    /// Collect every representation of the given format across the images
    /// of this study.
    pub fn image_representations(
        &self,
        client: &ApiClient,
        format: &RepresentationFormat,
    ) -> Result<Vec<ImageRepresentation>, ApiError> {
        let mut representations = Vec::new();
        for image in self.images_with_representation(client, format) {
            let image = image?;
            representations.extend(
                image
                    .representations
                    .iter()
                    .filter(|rep| rep.format.as_ref() == Some(format))
                    .cloned(),
            );
        }
        Ok(representations)
    }

    /// Iterate over every file reference of this study.
    pub fn file_references<'c>(
        &self,
        client: &'c ApiClient,
    ) -> CursorPages<
        FileReference,
        impl FnMut(Option<&str>, usize) -> Result<Vec<FileReference>, ApiError> + 'c,
    > {
        client.study_file_references(&self.uuid)
    }

    /// Look up an image of this study by its alias.
    ///
    /// Returns `Ok(None)` when no image carries the alias.
    pub fn image_by_alias(
        &self,
        client: &ApiClient,
        alias: &str,
    ) -> Result<Option<Image>, ApiError> {
        client.study_image_by_alias(&self.accession_id, alias)
    }
}

impl Image {
    /// Fetch the study owning this image.
    pub fn study(&self, client: &ApiClient) -> Result<Study, ApiError> {
        client.get_study(&self.study_uuid)
    }
}

impl FileReference {
    /// Fetch the study owning this file reference.
    pub fn study(&self, client: &ApiClient) -> Result<Study, ApiError> {
        client.get_study(&self.study_uuid)
    }
}
