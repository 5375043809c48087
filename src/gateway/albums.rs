use super::{Gateway, normalize};
use crate::{
    error::GatewayError,
    log_gateway_result,
    types::{Album, AlbumDraft},
};

impl Gateway {
    pub async fn list_albums(&self) -> Result<Vec<Album>, GatewayError> {
        let req = self.maybe_authorized(self.http.get(self.endpoint("albums")));
        let result = self.send_json(req, None).await;
        log_gateway_result!("list_albums", result);

        normalize::albums(result?, &self.context())
    }

    pub async fn create_album(&self, draft: &AlbumDraft) -> Result<Album, GatewayError> {
        let req = self.maybe_authorized(self.http.post(self.endpoint("albums")));
        let result = self.send_json(req.json(draft), None).await;
        log_gateway_result!("create_album", result);

        Ok(normalize::album(&result?, 0, &self.context()))
    }

    pub async fn update_album(&self, id: &str, draft: &AlbumDraft) -> Result<Album, GatewayError> {
        let req = self.maybe_authorized(self.http.put(self.endpoint(&format!("albums/{id}"))));
        let result = self.send_json(req.json(draft), None).await;
        log_gateway_result!("update_album", result);

        let value = result?;
        let mut album = normalize::album(&value, 0, &self.context());
        if normalize::id_of(&value).is_none() {
            album.id = id.to_string();
        }
        Ok(album)
    }

    pub async fn delete_album(&self, id: &str) -> Result<(), GatewayError> {
        let req = self.maybe_authorized(self.http.delete(self.endpoint(&format!("albums/{id}"))));
        let result = self.send_empty(req, None).await;
        log_gateway_result!("delete_album", result);
        result
    }
}
