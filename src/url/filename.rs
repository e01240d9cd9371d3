use url::Url;

/// Suffix appended to every page filename
const PAGE_SUFFIX: &str = ".html";

/// Fallback name for asset sources that reduce to nothing
const EMPTY_ASSET_NAME: &str = "asset";

/// Derives the relative filename a page body is stored under
///
/// The name is the URL authority followed by its (already percent-encoded)
/// path with trailing slashes removed, suffixed with `.html`. Query and
/// fragment do not take part, so two URLs differing only there collide.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_fetch::url::page_filename;
///
/// let url = Url::parse("https://example.com/").unwrap();
/// assert_eq!(page_filename(&url), "example.com.html");
///
/// let url = Url::parse("http://example.com:8080/a/b/").unwrap();
/// assert_eq!(page_filename(&url), "example.com:8080/a/b.html");
/// ```
pub fn page_filename(url: &Url) -> String {
    let mut name = authority(url);
    name.push_str(url.path().trim_end_matches('/'));
    name.push_str(PAGE_SUFFIX);
    name
}

/// Derives the relative filename an image asset is stored under
///
/// The raw `src` attribute is used as-is after dropping its scheme, query,
/// fragment, and any empty, `.` or `..` segments, so the result always stays
/// below the output directory.
pub fn asset_filename(src: &str) -> String {
    let src = src.trim();
    let without_scheme = match src.find("://") {
        Some(idx) => &src[idx + 3..],
        None => src,
    };
    let path = without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let name = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect::<Vec<_>>()
        .join("/");

    if name.is_empty() {
        EMPTY_ASSET_NAME.to_string()
    } else {
        name
    }
}

fn authority(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
