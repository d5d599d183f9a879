/// Resolve a stored image path to a URL the browser (or CLI) can open.
///
/// Full `http(s)://` URLs pass through; relative storage paths are served
/// from `<storage_base>/storage/<path>`.
pub fn resolve_image_url(storage_base: &str, path: &str) -> String {
    let path = path.trim();
    if path.is_empty() {
        return String::new();
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/storage/{}",
        storage_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
