use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::{Gateway, normalize};
use crate::{
    error::GatewayError,
    log_gateway_result,
    types::{SongUpload, Track, TrackPatch},
};

impl Gateway {
    pub async fn list_songs(&self) -> Result<Vec<Track>, GatewayError> {
        let req = self.maybe_authorized(self.http.get(self.endpoint("songs")));
        let result = self.send_json(req, None).await;
        log_gateway_result!("list_songs", result);

        normalize::tracks(result?, &self.context())
    }

    /// Uploads an audio file (and optional cover) as multipart form data.
    ///
    /// The backend may answer with one record or a list; both are returned
    /// as a list.
    pub async fn upload_song(&self, upload: &SongUpload) -> Result<Vec<Track>, GatewayError> {
        let mut form = Form::new()
            .part("songs", file_part(&upload.audio_file).await?)
            .text(
                "artist",
                upload
                    .artist
                    .clone()
                    .unwrap_or_else(|| normalize::UNKNOWN_ARTIST.to_string()),
            )
            .text(
                "album",
                upload
                    .album
                    .clone()
                    .unwrap_or_else(|| normalize::UNKNOWN_ALBUM.to_string()),
            );
        if let Some(cover) = &upload.cover_file {
            form = form.part("cover", file_part(cover).await?);
        }

        let req = self.maybe_authorized(self.http.post(self.endpoint("songs/upload")));
        let result = self.send_json(req.multipart(form), None).await;
        log_gateway_result!("upload_song", result);

        let tracks = normalize::tracks(result?, &self.context())?;
        info!(count = tracks.len(), "songs uploaded");
        Ok(tracks)
    }

    /// Applies a partial edit and returns the record the backend now holds.
    ///
    /// When the backend omits the id in its answer the requested id is kept.
    pub async fn update_song(&self, id: &str, patch: &TrackPatch) -> Result<Track, GatewayError> {
        let req = self.maybe_authorized(self.http.put(self.endpoint(&format!("songs/{id}"))));
        let result = self.send_json(req.json(patch), None).await;
        log_gateway_result!("update_song", result);

        let value = result?;
        let mut track = normalize::track(&value, 0, &self.context());
        if normalize::id_of(&value).is_none() {
            track.id = id.to_string();
        }
        Ok(track)
    }

    pub async fn delete_song(&self, id: &str) -> Result<(), GatewayError> {
        let req = self.maybe_authorized(self.http.delete(self.endpoint(&format!("songs/{id}"))));
        let result = self.send_empty(req, None).await;
        log_gateway_result!("delete_song", result);
        result
    }
}

async fn file_part(path: &Path) -> Result<Part, GatewayError> {
    let bytes = async_fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    debug!(file = %path.display(), size = bytes.len(), "attaching file");
    Ok(Part::bytes(bytes).file_name(file_name))
}
