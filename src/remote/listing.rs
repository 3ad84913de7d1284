//! `files.list` paging for [`DriveClient`].

use super::*;

impl DriveClient {
    fn fetch_page(
        &self,
        container_id: &str,
        page_token: Option<&str>,
    ) -> Result<FileList, RemoteError> {
        let query = children_query(container_id);
        let page_size = self.remote.page_size.to_string();
        let mut params = vec![
            ("q", query.as_str()),
            ("fields", LIST_FIELDS),
            ("pageSize", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let resp = self
            .client
            .get(self.url(FILES_PATH))
            .header(reqwest::header::AUTHORIZATION, self.auth())
            .query(&params)
            .send()
            .map_err(|err| RemoteError::Transient(format!("send: {}", err)))?;

        self.ensure_ok(resp, "list children")?
            .json::<FileList>()
            .map_err(|err| RemoteError::Transient(format!("parse file list: {}", err)))
    }
}

impl ListingClient for DriveClient {
    fn list_children(&self, container_id: &str) -> Result<Vec<RemoteEntry>, RemoteError> {
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let page = with_retries(
                &format!("list children of {}", container_id),
                self.remote.attempts,
                || self.fetch_page(container_id, page_token.as_deref()),
            )?;
            pages += 1;
            out.extend(page.files.into_iter().map(RemoteEntry::from));
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }
        tracing::debug!(container_id, pages, children = out.len(), "listed children");
        Ok(out)
    }
}
