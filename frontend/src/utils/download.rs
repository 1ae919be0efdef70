use thiserror::Error;

use crate::{api::DownloadedFile, state::notifications::Notifier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("failed to create blob")]
    Blob,
    #[error("failed to create object URL")]
    ObjectUrl,
    #[error("document is not available")]
    NoDocument,
    #[error("failed to attach download link")]
    Link,
}

/// Server-provided name when present, otherwise `fallback`.
pub fn download_name(file: &DownloadedFile, fallback: &str) -> String {
    file.filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// Hands a downloaded payload to the browser as a file save and returns
/// the name it was saved under.
pub fn save_file(file: &DownloadedFile, fallback_name: &str) -> Result<String, DownloadError> {
    let filename = download_name(file, fallback_name);
    write_blob(&file.bytes, file.content_type.as_deref(), &filename)?;
    Ok(filename)
}

/// Saves `file` and reports the outcome; `true` when the save went through.
pub fn deliver_download(
    file: &DownloadedFile,
    fallback_name: &str,
    notifier: &dyn Notifier,
    success_message: &str,
) -> bool {
    match save_file(file, fallback_name) {
        Ok(filename) => {
            log::debug!("saved download {}", filename);
            notifier.success(success_message);
            true
        }
        Err(err) => {
            log::warn!("download failed: {}", err);
            notifier.error(&format!("下载失败: {}", err));
            false
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn write_blob(bytes: &[u8], content_type: Option<&str>, filename: &str) -> Result<(), DownloadError> {
    use wasm_bindgen::JsCast;

    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    let options = web_sys::BlobPropertyBag::new();
    if let Some(content_type) = content_type {
        options.set_type(content_type);
    }
    let blob = web_sys::Blob::new_with_buffer_source_sequence_and_options(&parts, &options)
        .map_err(|_| DownloadError::Blob)?;

    let url =
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| DownloadError::ObjectUrl)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DownloadError::NoDocument)?;
    let anchor = document
        .create_element("a")
        .map_err(|_| DownloadError::Link)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| DownloadError::Link)?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or(DownloadError::NoDocument)?
        .append_child(&anchor)
        .map_err(|_| DownloadError::Link)?;
    anchor.click();
    anchor.remove();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

// Host builds have no document to attach a link to.
#[cfg(not(target_arch = "wasm32"))]
fn write_blob(bytes: &[u8], _content_type: Option<&str>, filename: &str) -> Result<(), DownloadError> {
    log::debug!("skipping browser save of {} ({} bytes)", filename, bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: Option<&str>) -> DownloadedFile {
        DownloadedFile {
            filename: name.map(str::to_string),
            content_type: None,
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn prefers_server_filename() {
        assert_eq!(download_name(&file(Some("att.xlsx")), "x.xlsx"), "att.xlsx");
        assert_eq!(download_name(&file(Some("  ")), "x.xlsx"), "x.xlsx");
        assert_eq!(download_name(&file(None), "员工数据.xlsx"), "员工数据.xlsx");
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::notifications::{NoticeLevel, RecordingNotifier};

    #[test]
    fn delivery_reports_success() {
        let notifier = RecordingNotifier::new();
        assert!(deliver_download(&file_named("r.xlsx"), "x.xlsx", &notifier, "导出成功"));
        assert_eq!(notifier.messages(NoticeLevel::Success), vec!["导出成功".to_string()]);
    }

    fn file_named(name: &str) -> DownloadedFile {
        DownloadedFile {
            filename: Some(name.to_string()),
            content_type: Some("application/octet-stream".into()),
            bytes: b"PK".to_vec(),
        }
    }
}
