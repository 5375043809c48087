use super::{Gateway, normalize};
use crate::{
    error::GatewayError,
    log_gateway_result,
    types::{Playlist, PlaylistDraft},
};

impl Gateway {
    /// Playlists owned by the signed-in user.
    pub async fn my_playlists(&self) -> Result<Vec<Playlist>, GatewayError> {
        let req = self.authorized(self.http.get(self.endpoint("playlists/my")))?;
        let result = self.send_json(req, None).await;
        log_gateway_result!("my_playlists", result);

        normalize::playlists(result?, &self.context())
    }

    /// Creates a playlist; playlists are public unless the draft says otherwise.
    pub async fn create_playlist(&self, draft: &PlaylistDraft) -> Result<Playlist, GatewayError> {
        let mut draft = draft.clone();
        draft.is_public.get_or_insert(true);

        let req = self.authorized(self.http.post(self.endpoint("playlists")))?;
        let result = self.send_json(req.json(&draft), None).await;
        log_gateway_result!("create_playlist", result);

        Ok(normalize::playlist(&result?, 0, &self.context()))
    }

    pub async fn update_playlist(
        &self,
        id: &str,
        draft: &PlaylistDraft,
    ) -> Result<Playlist, GatewayError> {
        let req = self.authorized(self.http.put(self.endpoint(&format!("playlists/{id}"))))?;
        let result = self.send_json(req.json(draft), None).await;
        log_gateway_result!("update_playlist", result);

        let value = result?;
        let mut playlist = normalize::playlist(&value, 0, &self.context());
        if normalize::id_of(&value).is_none() {
            playlist.id = id.to_string();
        }
        Ok(playlist)
    }

    pub async fn delete_playlist(&self, id: &str) -> Result<(), GatewayError> {
        let req = self.authorized(self.http.delete(self.endpoint(&format!("playlists/{id}"))))?;
        let result = self.send_empty(req, None).await;
        log_gateway_result!("delete_playlist", result);
        result
    }
}
