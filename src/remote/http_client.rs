use super::*;

/// Runs `f` up to `attempts` times, backing off between transient failures.
/// Authorization failures are returned immediately.
pub(super) fn with_retries<T>(
    label: &str,
    attempts: u32,
    mut f: impl FnMut() -> Result<T, RemoteError>,
) -> Result<T, RemoteError> {
    let attempts = attempts.max(1);
    let mut i = 0;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if err.is_fatal() => return Err(err),
            Err(RemoteError::Transient(msg)) => {
                i += 1;
                if i >= attempts {
                    return Err(RemoteError::Transient(format!("{}: {}", label, msg)));
                }
                tracing::warn!(attempt = i, %msg, "{} failed, retrying", label);
                std::thread::sleep(std::time::Duration::from_millis(200 * (1 << (i - 1).min(4))));
            }
            Err(err) => return Err(err),
        }
    }
}

impl DriveClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response, RemoteError> {
        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RemoteError::Auth(
                "unauthorized (access token invalid/expired)".to_string(),
            ));
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(RemoteError::Auth(
                "forbidden (insufficient permissions for this drive)".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(RemoteError::Transient(format!("{} status {}", label, status)));
        }
        Ok(resp)
    }

    pub(super) fn auth(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.remote.base_url.trim_end_matches('/'), path)
    }
}
